pub mod api;
pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use api::{DetailApi, SearchApi};
pub use client::FusionClient;
pub use error::ClientError;
