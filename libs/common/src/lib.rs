//! Common library for the Getaway booking backend
//!
//! This crate provides the shared infrastructure used by the API service:
//! database connectivity and the error types that go with it.

pub mod database;
pub mod error;
