//! Fetch and decode layer for the spreadsheet-backed data sources.
//!
//! Each sheet is reachable over an unauthenticated visualization-query
//! endpoint that wraps its JSON payload in a callback invocation. This module
//! unwraps that envelope, exposes sparse rows, and normalizes individual
//! cells into typed values with per-kind fallbacks.

pub mod cell;
pub mod client;
pub mod envelope;
pub mod sources;
