//! Model server bootstrap
//!
//! Initializes the execution engine from the resolved configuration and serves
//! the Predict handler until shutdown.

use super::dispatcher::RequestDispatcher;
use crate::engine::ExecutionEngine;
use modelserver_common::{ModelServerError, Result, ServingConfiguration};
use modelserver_proto::PredictionServiceServer;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::Server;
use tracing::info;

/// Largest message accepted or sent, in bytes
pub const MAX_MESSAGE_SIZE: usize = i32::MAX as usize;

/// A gRPC server with an initialized engine behind it
pub struct ModelServer {
    listen_addr: SocketAddr,
    dispatcher: RequestDispatcher,
}

impl ModelServer {
    /// Initialize the engine with `init` and prepare to listen on `listen_addr`.
    ///
    /// Any initialization failure is reported as a startup error; there is no
    /// retry and no partial service.
    pub fn new<E, F>(config: &ServingConfiguration, listen_addr: SocketAddr, init: F) -> Result<Self>
    where
        E: ExecutionEngine,
        F: FnOnce(&ServingConfiguration) -> Result<E>,
    {
        let engine = init(config).map_err(|e| match e {
            ModelServerError::Startup(msg) => ModelServerError::Startup(msg),
            other => ModelServerError::startup(other.to_string()),
        })?;

        info!(
            "Execution engine initialized for {} model(s)",
            config.models.len()
        );

        Ok(Self {
            listen_addr,
            dispatcher: RequestDispatcher::new(Arc::new(engine)),
        })
    }

    /// Address the server binds to
    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }

    /// The Predict service with message size limits applied
    pub fn service(&self) -> PredictionServiceServer<RequestDispatcher> {
        PredictionServiceServer::new(self.dispatcher.clone())
            .max_decoding_message_size(MAX_MESSAGE_SIZE)
            .max_encoding_message_size(MAX_MESSAGE_SIZE)
    }

    /// Serve until Ctrl-C
    pub async fn serve(self) -> Result<()> {
        self.serve_with_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received shutdown signal");
            }
        })
        .await
    }

    /// Serve until `signal` resolves
    pub async fn serve_with_shutdown<F>(self, signal: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!("Running ModelServer at {} ...", self.listen_addr);

        Server::builder()
            .add_service(self.service())
            .serve_with_shutdown(self.listen_addr, signal)
            .await?;

        info!("ModelServer shutdown complete");
        Ok(())
    }
}

/// Initialize the engine and serve on `listen_addr` until Ctrl-C
pub async fn start<E, F>(config: &ServingConfiguration, listen_addr: SocketAddr, init: F) -> Result<()>
where
    E: ExecutionEngine,
    F: FnOnce(&ServingConfiguration) -> Result<E>,
{
    ModelServer::new(config, listen_addr, init)?.serve().await
}
