//! HTTP client library for the Chain Volume Log API.
//!
//! This crate provides a typed HTTP client for recording option-chain
//! observations through the Chain Volume Log backend.
//!
//! # Example
//!
//! ```no_run
//! use chain_log_client::{ChainLogClient, ClientConfig, ObservationParams};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), chain_log_client::Error> {
//!     let client = ChainLogClient::new(ClientConfig {
//!         base_url: "http://localhost:8080".into(),
//!         timeout: Duration::from_secs(30),
//!     })?;
//!
//!     let record = client
//!         .record_observation(&ObservationParams {
//!             call_volume: Some("120".into()),
//!             put_volume: Some("80".into()),
//!             lst_price: Some("450.2".into()),
//!             selected_ticker: Some("SPY".into()),
//!         })
//!         .await?;
//!     println!("Stored record #{}", record.id);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{ChainLogClient, ClientConfig};
pub use error::Error;
pub use types::*;
