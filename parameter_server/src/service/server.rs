use std::io;

use axum::Router;
use log::info;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use super::router;
use crate::{
    optimization::Updater,
    storage::{ParameterStore, StoreHandle},
};

/// The default limit on request bodies, large enough for big models.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 256 * 1024 * 1024;

/// The central server structure, it serves the canonical parameters to any
/// number of workers over HTTP.
pub struct ParameterServer<U: Updater> {
    handle: StoreHandle<U>,
    max_payload_bytes: usize,
}

impl<U: Updater> ParameterServer<U> {
    /// Creates a new `ParameterServer`.
    ///
    /// # Arguments
    /// * `store` - The canonical parameters and their updater.
    ///
    /// # Returns
    /// A new `ParameterServer` instance.
    pub fn new(store: ParameterStore<U>) -> Self {
        Self {
            handle: StoreHandle::new(store),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }

    /// Sets the largest request body the server accepts.
    pub fn with_max_payload_bytes(mut self, max_payload_bytes: usize) -> Self {
        self.max_payload_bytes = max_payload_bytes;
        self
    }

    /// Returns a handle to the parameter store.
    pub fn handle(&self) -> StoreHandle<U> {
        self.handle.clone()
    }
}

impl<U: Updater + 'static> ParameterServer<U> {
    /// Creates the router of this server, for embedding it in a larger app.
    pub fn router(&self) -> Router {
        router(self.handle(), self.max_payload_bytes)
    }

    /// Serves requests on `listener` until `cancel` fires.
    ///
    /// # Arguments
    /// * `listener` - A bound TCP listener.
    /// * `cancel` - Triggers a graceful shutdown.
    ///
    /// # Returns
    /// An io error if the server fails.
    pub async fn serve(self, listener: TcpListener, cancel: CancellationToken) -> io::Result<()> {
        let addr = listener.local_addr()?;
        info!("serving parameters at http://{addr}");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(cancel.cancelled_owned())
            .await?;

        info!("parameter server stopped");
        Ok(())
    }
}
