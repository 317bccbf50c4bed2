//! Gasless relay integration.
//!
//! The relay pays fees and submits `submit_answer` on the user's behalf. We
//! use its HTTP API:
//! 1. POST `{relay}/submit-answer` with the user and hex proof segments
//! 2. 2xx carries the broadcast transaction signature
//! 3. non-2xx carries an `error` message, or nothing useful at all
//!
//! ## Modules
//!
//! - [`client`]: HTTP client implementing `RelayTransport`
//! - [`types`]: request/response bodies

pub mod client;
pub mod types;

pub use client::RelayClient;
pub use types::{SubmitAnswerRequest, SubmitAnswerResponse};
