//! # HTTP Server
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /health` | liveness |
//! | `GET /route` | query-string route request |
//! | `POST /route` | JSON route request |
//! | `POST /route/bulk` | one origin, many destinations |

mod handlers;
mod router;
mod state;

pub use handlers::TOOK_HEADER;
pub use router::create_router;
pub use state::AppState;

use crate::config::ServerConfig;
use crate::orchestrator::RouteOrchestrator;
use crate::Result;
use std::net::SocketAddr;

/// Run the HTTP server
pub async fn run(config: &ServerConfig, orchestrator: RouteOrchestrator) -> Result<()> {
    let router = create_router(AppState::new(orchestrator));

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("route server listening on http://{}", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
