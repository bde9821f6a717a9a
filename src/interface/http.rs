use std::net::SocketAddr;

use async_trait::async_trait;
use tracing::info;

use crate::api;
use crate::error::AppError;
use crate::interface::ControlInterface;
use crate::state::AppState;

pub struct HttpInterface {
    state: AppState,
    addr: SocketAddr,
}

impl HttpInterface {
    pub fn new(state: AppState, addr: SocketAddr) -> Self {
        Self { state, addr }
    }
}

#[async_trait]
impl ControlInterface for HttpInterface {
    async fn run(self: Box<Self>) -> Result<(), AppError> {
        let app = api::router(self.state);

        info!("listening on http://{}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
