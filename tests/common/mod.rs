//! Shared test utilities for integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use spquery::{Catalog, GraphqlPayload, GraphqlTransport, TransportError};

/// Load the catalog fixture from the test_data directory
pub fn load_catalog() -> Catalog {
    Catalog::from_file("test_data/social_protection.yaml")
        .unwrap_or_else(|e| panic!("Failed to load catalog: {}", e))
}

/// Transport replaying canned responses in order, recording what was posted
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    sent: Mutex<Vec<GraphqlPayload>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn sent(&self) -> Vec<GraphqlPayload> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphqlTransport for MockTransport {
    async fn post(&self, payload: &GraphqlPayload) -> Result<Value, TransportError> {
        self.sent.lock().unwrap().push(payload.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no canned response".into())))
    }
}
