use std::io::{BufRead, Write, stdin, stdout};

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::interface::ControlInterface;
use crate::models::{Status, Student};
use crate::services::{AssignmentsModifier, DataFetcher, auth};

/// Interactive text menu. Logs a student in, then loops over numbered
/// commands until `exit`.
pub struct ConsoleInterface {
    db: SqlitePool,
}

impl ConsoleInterface {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    async fn login(&self) -> Result<Option<Student>, AppError> {
        for _ in 0..3 {
            let Some(email) = prompt("email: ") else {
                return Ok(None);
            };
            let Some(password) = prompt("password: ") else {
                return Ok(None);
            };
            match auth::try_login(&self.db, email.trim(), password.trim()).await? {
                Some(student) => return Ok(Some(student)),
                None => println!("Wrong email or password, try again."),
            }
        }
        Ok(None)
    }

    async fn list_assignments(&self, student: &Student) -> Result<(), AppError> {
        let fetcher = DataFetcher::new(self.db.clone());
        let list = fetcher.assignments(student.id).await?;
        if list.is_empty() {
            println!("No assignments.");
        }
        for a in list {
            let course = match a.course_id {
                Some(id) => format!(" (course {})", id),
                None => String::new(),
            };
            println!(
                "  #{} [{}] {} — due {}{}",
                a.id,
                a.status.as_str(),
                a.title,
                a.deadline,
                course
            );
        }
        Ok(())
    }

    async fn list_courses(&self, student: &Student) -> Result<(), AppError> {
        let fetcher = DataFetcher::new(self.db.clone());
        let list = fetcher.courses(student.id).await?;
        if list.is_empty() {
            println!("No courses.");
        }
        for c in list {
            println!("  #{} {} ({} to {})", c.id, c.name, c.start_date, c.end_date);
        }
        Ok(())
    }

    async fn add_assignment(&self, student: &Student) -> Result<(), AppError> {
        let Some(title) = prompt("title: ") else {
            return Ok(());
        };
        let Some(deadline) = prompt("deadline (yyyy-MM-dd): ") else {
            return Ok(());
        };
        let Ok(deadline) = NaiveDate::parse_from_str(deadline.trim(), "%Y-%m-%d") else {
            println!("Invalid date format");
            return Ok(());
        };
        let description = prompt("description (blank for none): ")
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        let course_id = prompt("course id (blank for none): ")
            .and_then(|c| c.trim().parse::<i64>().ok());

        let modifier = AssignmentsModifier::new(self.db.clone());
        match modifier
            .add(
                student.id,
                course_id,
                title.trim(),
                description.as_deref(),
                deadline,
            )
            .await
        {
            Ok(a) => println!("Added assignment #{}", a.id),
            Err(AppError::BadRequest(msg)) => println!("{}", msg),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    async fn remove_assignment(&self) -> Result<(), AppError> {
        let Some(id) = prompt("assignment id: ").and_then(|s| s.trim().parse::<i64>().ok())
        else {
            println!("Not a number.");
            return Ok(());
        };
        let modifier = AssignmentsModifier::new(self.db.clone());
        if modifier.remove(id).await? {
            println!("Removed.");
        } else {
            println!("No assignment with id {}", id);
        }
        Ok(())
    }

    async fn change_status(&self) -> Result<(), AppError> {
        let Some(id) = prompt("assignment id: ").and_then(|s| s.trim().parse::<i64>().ok())
        else {
            println!("Not a number.");
            return Ok(());
        };
        let Some(status) =
            prompt("status (pending/in-progress/completed/overdue): ")
                .and_then(|s| Status::parse(s.trim()))
        else {
            println!("Unknown status.");
            return Ok(());
        };
        let modifier = AssignmentsModifier::new(self.db.clone());
        if modifier.set_status(id, status).await? {
            println!("Updated.");
        } else {
            println!("No assignment with id {}", id);
        }
        Ok(())
    }
}

#[async_trait]
impl ControlInterface for ConsoleInterface {
    async fn run(self: Box<Self>) -> Result<(), AppError> {
        let Some(student) = self.login().await? else {
            println!("Goodbye.");
            return Ok(());
        };
        println!("Hello, {}!", student.name);

        loop {
            println!();
            println!("1) list assignments");
            println!("2) list courses");
            println!("3) add assignment");
            println!("4) remove assignment");
            println!("5) change assignment status");
            println!("exit) quit");

            let Some(choice) = prompt("> ") else {
                break;
            };
            match choice.trim() {
                "1" => self.list_assignments(&student).await?,
                "2" => self.list_courses(&student).await?,
                "3" => self.add_assignment(&student).await?,
                "4" => self.remove_assignment().await?,
                "5" => self.change_status().await?,
                "exit" => break,
                other => println!("Unknown option: {}", other),
            }
        }

        println!("Goodbye.");
        Ok(())
    }
}

fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    stdout().flush().ok()?;
    let mut line = String::new();
    match stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches('\n').to_string()),
    }
}
