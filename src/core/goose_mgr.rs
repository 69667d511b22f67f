use crate::connections::connection::{Connector, Goose, GooseConnection};
use crate::core::errors::{ConfigError, ConnectError};
use crate::storage::definitions::{Definitions, DefinitionsSource};
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// The model type a manager ends up holding.
pub type ModelOf<G, K> = <<K as Connector>::Connection as GooseConnection<G>>::Model;

/// Connects a "Goose" driver to a database and builds one model per
/// definition.
///
/// 1. `new` loads the definitions and instantiates the driver. Nothing talks
///    to the database yet.
/// 2. `connect` asks the injected `Connector` for a connection, then builds
///    every model in definition order. Models are built exactly once: either
///    all of them on success, or none when the connector fails.
/// 3. `model` and `goose` hand out what was built.
///
/// `connect` takes `&mut self`, so two overlapping connects on the same
/// manager cannot be expressed.
pub struct GooseMgr<G, K>
where
    G: Goose,
    K: Connector,
    K::Connection: GooseConnection<G>,
{
    definitions: Definitions<G::Definition>,
    connector: K,
    goose: G,
    connection: Option<K::Connection>,
    models: HashMap<String, ModelOf<G, K>>,
}

impl<G, K> GooseMgr<G, K>
where
    G: Goose,
    K: Connector,
    K::Connection: GooseConnection<G>,
{
    /// Builds a manager from inline definitions or a JSON file path.
    ///
    /// File errors are returned here, before the driver is instantiated.
    pub fn new(
        definitions: impl Into<DefinitionsSource<G::Definition>>,
        connector: K,
    ) -> Result<Self, ConfigError>
    where
        G::Definition: DeserializeOwned,
    {
        let definitions = definitions.into().load()?;
        Ok(Self::with_definitions(definitions, connector))
    }

    /// Builds a manager from definitions that are already in memory.
    pub fn with_definitions(definitions: Definitions<G::Definition>, connector: K) -> Self {
        debug!(
            "Creating manager for {} definition(s)",
            definitions.models().count()
        );
        Self {
            definitions,
            connector,
            goose: G::new(),
            connection: None,
            models: HashMap::new(),
        }
    }

    /// Connects and builds the models.
    ///
    /// `config` goes to the connector untouched. A connector failure comes
    /// back as `ConnectError::Connection` with the connector's own error, and
    /// the manager stays unconnected so the call can be retried. Calling this
    /// again after a successful connect fails with
    /// `ConnectError::AlreadyConnected` without touching the connector.
    pub async fn connect(&mut self, config: K::Config) -> Result<(), ConnectError<K::Error>> {
        if self.connection.is_some() {
            warn!("connect called on an already connected manager");
            return Err(ConnectError::AlreadyConnected);
        }

        info!("Connecting...");
        let connection = match self.connector.create_connection(config).await {
            Ok(connection) => connection,
            Err(e) => {
                error!("Connection failed: {}", e);
                return Err(ConnectError::Connection(e));
            }
        };

        let mut models = HashMap::new();
        for (name, definition) in self.definitions.models() {
            debug!("Building model '{}'", name);
            let schema = G::schema(definition);
            models.insert(name.to_owned(), connection.model(name, schema));
        }

        info!("Connected; built {} model(s).", models.len());
        self.models = models;
        self.connection = Some(connection);
        Ok(())
    }

    /// The driver instance, the same one for the manager's whole life.
    pub fn goose(&self) -> &G {
        &self.goose
    }

    /// The model named `name`, or `None` if no such model was built.
    pub fn model(&self, name: &str) -> Option<&ModelOf<G, K>> {
        self.models.get(name)
    }

    pub fn definitions(&self) -> &Definitions<G::Definition> {
        &self.definitions
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Built models in definition order. Empty until connected.
    pub fn models(&self) -> impl Iterator<Item = (&str, &ModelOf<G, K>)> {
        self.definitions
            .models()
            .filter_map(move |(name, _)| self.models.get(name).map(|m| (name, m)))
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models().map(|(name, _)| name)
    }
}
