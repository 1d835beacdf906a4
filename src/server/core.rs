use log::{error, info};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use axum::Router;

use crate::auth::CredentialStore;
use crate::config::ServerConfig;
use crate::error::PortalError;
use crate::routes::portal_router;
use crate::server::state::AppState;
use crate::session::SessionCodec;

pub struct Server {
    listener: TcpListener,
    app: Router,
}

impl Server {
    pub async fn new(config: ServerConfig) -> Result<Self, PortalError> {
        let app = build_app(&config)?;
        let socket = config.server.socket_addr();

        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(e.into());
            }
        };

        Ok(Self { listener, app })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, PortalError> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves requests until Ctrl+C or SIGTERM.
    pub async fn start(self) -> Result<(), PortalError> {
        info!("Starting login portal on {}", self.local_addr()?);

        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Login portal stopped");
        Ok(())
    }
}

/// Builds the credential store, session codec and router without binding a port.
pub fn build_app(config: &ServerConfig) -> Result<Router, PortalError> {
    let store = CredentialStore::from_entries(&config.users, config.auth.bcrypt_cost)?;
    let sessions = SessionCodec::new(&config.secret_key, &config.session);
    let state = Arc::new(AppState::new(store, sessions));

    Ok(portal_router(state))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}
