//! End-to-end checks for the ReqRes demo API.
//!
//! A run creates one [`http::context::TestContext`], drives every case of
//! [`suite::reqres_suite`] through [`testing::run_suite`] and disposes the
//! context afterwards.

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod http;
pub mod suite;
pub mod testing;
