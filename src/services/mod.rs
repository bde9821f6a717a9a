pub mod assignments;
pub mod auth;
pub mod fetch;

pub use assignments::AssignmentsModifier;
pub use fetch::DataFetcher;
