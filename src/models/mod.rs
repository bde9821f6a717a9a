pub mod assignment;
pub mod course;
pub mod student;

pub use assignment::{Assignment, NewAssignmentRequest, Status, UpdateAssignmentRequest};
pub use course::{Course, NewCourseRequest, UpdateCourseRequest};
pub use student::{LoginRequest, NewStudentRequest, Student};
