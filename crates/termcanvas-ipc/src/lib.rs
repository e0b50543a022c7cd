#![deny(clippy::all)]

mod client;
mod error;
mod socket;
mod types;

pub use client::DEFAULT_TIMEOUT_MS;
pub use client::request;
pub use client::update;
pub use error::ClientError;
pub use socket::default_socket_path;
pub use socket::socket_dir;
pub use types::QueryRequest;
pub use types::Reply;
