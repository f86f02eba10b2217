//! gRPC request dispatch and server bootstrap

pub mod dispatcher;
pub mod server;

pub use dispatcher::RequestDispatcher;
pub use server::{ModelServer, MAX_MESSAGE_SIZE};
