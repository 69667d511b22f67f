use crate::connections::connection::{Connector, Goose, GooseConnection};
use async_trait::async_trait;
use log::{debug, info};
use serde_json::Value;
use std::fmt::{self, Display};

/// A driver that keeps everything in process.
///
/// It has no storage of its own: its models simply describe what a real
/// driver would have been asked to build. Useful for inspecting definitions
/// and as a reference implementation of the driver traits.
#[derive(Debug, Default)]
pub struct MemoryGoose {
    _private: (),
}

impl MemoryGoose {
    pub fn name(&self) -> &'static str {
        "memory"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemorySchema {
    pub definition: Value,
}

impl Goose for MemoryGoose {
    type Definition = Value;
    type Schema = MemorySchema;

    fn new() -> Self {
        Self::default()
    }

    fn schema(definition: &Value) -> MemorySchema {
        MemorySchema {
            definition: definition.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryConfig {
    pub database: String,
}

impl MemoryConfig {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
        }
    }
}

#[derive(Debug)]
pub struct MemoryConnection {
    database: String,
}

impl MemoryConnection {
    pub fn database(&self) -> &str {
        &self.database
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemoryModel {
    pub database: String,
    pub name: String,
    pub schema: MemorySchema,
}

impl GooseConnection<MemoryGoose> for MemoryConnection {
    type Model = MemoryModel;

    fn model(&self, name: &str, schema: MemorySchema) -> MemoryModel {
        debug!("memory model '{}' in '{}'", name, self.database);
        MemoryModel {
            database: self.database.clone(),
            name: name.to_owned(),
            schema,
        }
    }
}

#[derive(Debug)]
pub enum MemoryError {
    EmptyDatabaseName,
}

impl Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryError::EmptyDatabaseName => write!(f, "database name must not be empty"),
        }
    }
}

impl std::error::Error for MemoryError {}

/// Opens `MemoryConnection`s.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryConnector;

#[async_trait]
impl Connector for MemoryConnector {
    type Config = MemoryConfig;
    type Connection = MemoryConnection;
    type Error = MemoryError;

    async fn create_connection(&self, config: MemoryConfig) -> Result<MemoryConnection, MemoryError> {
        if config.database.trim().is_empty() {
            return Err(MemoryError::EmptyDatabaseName);
        }
        info!("Opening in-memory database '{}'", config.database);
        Ok(MemoryConnection {
            database: config.database,
        })
    }
}
