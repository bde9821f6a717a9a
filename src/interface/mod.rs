mod console;
mod http;

use async_trait::async_trait;

use crate::error::AppError;

pub use console::ConsoleInterface;
pub use http::HttpInterface;

/// Front-end seam: the backend runs behind exactly one of these per process,
/// picked at startup.
#[async_trait]
pub trait ControlInterface {
    async fn run(self: Box<Self>) -> Result<(), AppError>;
}
