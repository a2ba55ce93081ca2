//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use async_trait::async_trait;

use crate::backend::{Backend, BackendError, Payload, Record, Resource};

/// A backend that accepts everything and stores nothing.
#[derive(Default)]
pub struct NoopBackend;

#[async_trait]
impl Backend for NoopBackend {
    fn name(&self) -> &str {
        "noop"
    }

    async fn list(&self, _resource: Resource) -> Result<Vec<Record>, BackendError> {
        Ok(Vec::new())
    }

    async fn create(&self, _payload: &Payload) -> Result<(), BackendError> {
        Ok(())
    }

    async fn update(&self, _id: i64, _payload: &Payload) -> Result<(), BackendError> {
        Ok(())
    }

    async fn delete(&self, _resource: Resource, _id: i64) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Creates a test App with a NoopBackend.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopBackend))
}
