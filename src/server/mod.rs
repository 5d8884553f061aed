//! HTTP server for the summarization form.

pub mod error;
pub mod handlers;
pub mod health;
pub mod router;
pub mod session;
pub mod shutdown;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::{HttpModelLoader, ModelCache};
use crate::pipeline::Summarizer;
use crate::server::router::build_router;
use crate::server::session::{SessionLimits, SessionStore};
use crate::server::shutdown::ShutdownManager;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

/// Errors that can occur while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address '{addr}': {source}")]
    InvalidBindAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Could not find available port in range {start}-{end}")]
    NoAvailablePort { start: u16, end: u16 },

    #[error("try_bind() must be called before run()")]
    NotBound,

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Summarizer,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(summarizer: Summarizer) -> Self {
        Self {
            summarizer,
            sessions: SessionStore::new(),
        }
    }

    /// State backed by the HTTP inference API from `config`.
    pub fn from_config(config: &Config) -> Self {
        let loader = Arc::new(HttpModelLoader::new(config.inference.clone()));
        Self {
            summarizer: Summarizer::new(ModelCache::new(loader)),
            sessions: SessionStore::with_limits(SessionLimits::from_config(&config.server)),
        }
    }
}

pub struct AppServer {
    pub addr: SocketAddr,
    /// The bound listener, kept alive to prevent port race conditions.
    /// Populated by try_bind(), consumed by run().
    listener: Option<TcpListener>,
    state: AppState,
    max_body_bytes: usize,
    shutdown: Arc<ShutdownManager>,
}

impl AppServer {
    pub fn new(config: &Config) -> Self {
        Self::with_state(config, AppState::from_config(config))
    }

    /// Server with caller-provided state (e.g., a different model loader).
    pub fn with_state(config: &Config, state: AppState) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)), // Will be determined at bind time
            listener: None,
            state,
            max_body_bytes: config.server.max_body_bytes,
            shutdown: Arc::new(ShutdownManager::new()),
        }
    }

    /// Try to bind to `bind_addr`, falling back to incremental ports if busy.
    ///
    /// The listener is kept alive so no other process can claim the port
    /// between try_bind() and run().
    pub async fn try_bind(&mut self, bind_addr: &str) -> Result<SocketAddr, ServerError> {
        let addr: SocketAddr = bind_addr.parse().map_err(|source| ServerError::InvalidBindAddr {
            addr: bind_addr.to_string(),
            source,
        })?;

        let start_port = addr.port();
        let end_port = start_port.saturating_add(100);
        let host = addr.ip();

        for port in start_port..=end_port {
            let try_addr = SocketAddr::new(host, port);
            match TcpListener::bind(try_addr).await {
                Ok(listener) => {
                    let actual_addr = listener.local_addr()?;
                    self.addr = actual_addr;
                    self.listener = Some(listener);
                    tracing::info!("Server bound to {}", actual_addr);
                    return Ok(actual_addr);
                }
                Err(e) => {
                    tracing::debug!("Port {} busy: {}", port, e);
                    // Port 0 means "any"; a failure there won't be fixed by the next port.
                    if port == 0 {
                        return Err(e.into());
                    }
                }
            }
        }

        Err(ServerError::NoAvailablePort {
            start: start_port,
            end: end_port,
        })
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Run the server until shutdown is signalled.
    ///
    /// Consumes self to take ownership of the pre-bound listener.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self.listener.ok_or(ServerError::NotBound)?;

        tracing::info!("Starting summarization server on http://{}", self.addr);

        let sweeper = self.state.sessions.spawn_sweeper();
        let app = build_router(self.state, self.max_body_bytes);

        let shutdown = self.shutdown.clone();
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(e) = shutdown.wait_for_shutdown().await {
                    tracing::error!(error = %e, "Failed to install signal handler");
                }
            })
            .into_future()
            .await;
        sweeper.abort();
        served?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
