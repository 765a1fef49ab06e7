pub mod cleanup;
pub mod client;
pub mod config;
pub mod error;
pub mod inventory;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod orders;
pub mod products;
pub mod resources;
pub mod transport;

pub use client::AdminClient;
pub use config::ApiConfig;
pub use error::{AdminError, AdminResult};
pub use reqwest::Method;
