// Name Affinity Analyzer - API Core
//
// This crate provides the backend API for rating the affinity of two names
// via an upstream GLM model, with tolerant verdict extraction and a
// fallback path handled by the `affinity` library.

pub mod analyzer;
pub mod config;
pub mod server;

pub use config::*;
