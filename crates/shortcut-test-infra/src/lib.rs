//! Disposable backend containers for integration tests.
//!
//! Every fixture needs a reachable Docker daemon.

pub mod error;
pub mod mongo;
pub mod redis;

pub use error::{Result, TestInfraError};
