//! # Chain Volume Log - Option-Chain Observation Recorder
//!
//! A small HTTP service that records option-chain observations (call volume,
//! put volume, last price and ticker) into one append-only JSON log per day,
//! stored in an object store. Built with [Axum](https://crates.io/crates/axum)
//! and the [AWS SDK for S3](https://crates.io/crates/aws-sdk-s3).
//!
//! ## Key Features
//!
//! - **Daily Partitioning**: one object per calendar day, keyed
//!   `YYYY-MM-DD.json`, with the day decided in a fixed named timezone
//!   (`America/New_York` by default) while record timestamps stay in UTC.
//!
//! - **Sequential Ids**: each record gets the previous record's id plus one.
//!
//! - **Pluggable Storage**: S3 (or any S3-compatible endpoint), a local
//!   directory, or process memory.
//!
//! - **CORS Support**: every response carries permissive CORS headers.
//!
//! - **Structured Logging**: request tracing with `tower-http` and `tracing`.
//!
//! ## Append Semantics
//!
//! An append reads the whole day's array, adds one record and writes the whole
//! array back. There is no locking and no conditional write: concurrent
//! appends to the same day can lose records (last writer wins).
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers and router configuration |
//! | [`config`] | TOML configuration with environment overrides |
//! | [`daily_log`] | The read-modify-write daily log appender |
//! | [`error`] | Append and API error types with `IntoResponse` implementation |
//! | [`models`] | Request boundary and record types |
//! | [`state`] | Application state management |
//! | [`store`] | Object store trait and backends |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/health` | Health check |
//! | GET, POST | `/api/v1/observations` | Append an observation |
//! | GET, POST | `/` | Same as above, for function URL deployments |
//!
//! ## Example Usage
//!
//! ```bash
//! # S3 backend
//! BUCKET_NAME=my-chain-logs AWS_REGION=us-east-1 cargo run
//!
//! # Local directory backend
//! STORAGE_BACKEND=local STORAGE_ROOT=./logs cargo run
//!
//! # Record an observation
//! curl "http://localhost:8080/api/v1/observations?callVolume=120&putVolume=80&lstPrice=450.2&selectedTicker=SPY"
//! ```
//!
//! Successful responses return the stored record:
//!
//! ```json
//! {
//!   "id": 1,
//!   "timestamp": "2024-03-15T14:30:00.000Z",
//!   "callVolume": "120",
//!   "putVolume": "80",
//!   "selectedTicker": "SPY",
//!   "lstPrice": "450.2"
//! }
//! ```
//!
//! Failures return HTTP 500 with
//! `{"error": "Internal Server Error", "details": "..."}`.

pub mod api;
pub mod config;
pub mod daily_log;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
