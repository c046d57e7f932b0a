//! # testbank_client
//!
//! Async client for the Test Bank REST backend.
//!
//! This crate provides:
//! - [`TestBankClient`]: typed access to every `/api/tests` endpoint
//! - [`CreateTest`] and [`UpdateTest`]: request bodies for saving a draft
//! - [`ClientError`]: transport, status and decoding failures
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use testbank_client::TestBankClient;
//!
//! # async fn run() -> Result<(), testbank_client::ClientError> {
//! let client = TestBankClient::builder()
//!     .base_url("http://localhost:3001")
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! for test in client.list_tests("user-1").await? {
//!     println!("{} ({})", test.title, test.status);
//! }
//! # Ok(())
//! # }
//! ```

mod envelope;
pub mod error;
pub mod http_client;
pub mod request;

pub use error::ClientError;
pub use http_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TestBankClient, TestBankClientBuilder};
pub use request::{CreateTest, UpdateTest};
