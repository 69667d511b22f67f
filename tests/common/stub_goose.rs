//! A deterministic **in‑process stand‑in** for a real "Goose" driver.
//!
//! *  `StubGoose` builds schemas that simply remember their definition.
//! *  `StubConnection::model` returns `{ name, schema }` so tests can check
//!    exactly what the manager asked for.
//! *  `StubConnector` either hands out a connection or fails with a fixed
//!    message, and counts how often it was asked.

use async_trait::async_trait;
use goosemgr::{Connector, Goose, GooseConnection};
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug)]
pub struct StubGoose;

#[derive(Debug, Clone, PartialEq)]
pub struct StubSchema {
    pub definition: Value,
}

impl Goose for StubGoose {
    type Definition = Value;
    type Schema = StubSchema;

    fn new() -> Self {
        StubGoose
    }

    fn schema(definition: &Value) -> StubSchema {
        StubSchema {
            definition: definition.clone(),
        }
    }
}

#[derive(Debug)]
pub struct StubConnection;

#[derive(Debug, Clone, PartialEq)]
pub struct StubModel {
    pub name: String,
    pub schema: StubSchema,
}

impl GooseConnection<StubGoose> for StubConnection {
    type Model = StubModel;

    fn model(&self, name: &str, schema: StubSchema) -> StubModel {
        StubModel {
            name: name.to_owned(),
            schema,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StubError(pub String);

impl fmt::Display for StubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StubError {}

pub struct StubConnector {
    fail_with: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl StubConnector {
    /// A connector that always connects, plus a counter of its calls.
    pub fn succeeding() -> (Self, Arc<AtomicUsize>) {
        Self::build(None)
    }

    /// A connector that always fails with `message`.
    pub fn failing(message: &str) -> (Self, Arc<AtomicUsize>) {
        Self::build(Some(message.to_owned()))
    }

    fn build(fail_with: Option<String>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                fail_with,
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

#[async_trait]
impl Connector for StubConnector {
    type Config = Value;
    type Connection = StubConnection;
    type Error = StubError;

    async fn create_connection(&self, _config: Value) -> Result<StubConnection, StubError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.fail_with {
            Some(message) => Err(StubError(message.clone())),
            None => Ok(StubConnection),
        }
    }
}
