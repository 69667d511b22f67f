use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;

/// A database driver ("Goose") managed by a `GooseMgr`.
///
/// The driver is instantiated once per manager and owns the schema
/// constructor used to turn each definition into a schema object.
pub trait Goose {
    /// Whatever a single entry of the definitions file describes.
    type Definition;
    /// The driver's schema object built from one definition.
    type Schema;

    fn new() -> Self
    where
        Self: Sized;

    fn schema(definition: &Self::Definition) -> Self::Schema;
}

/// A live connection able to turn named schemas into models.
pub trait GooseConnection<G: Goose> {
    type Model;

    fn model(&self, name: &str, schema: G::Schema) -> Self::Model;
}

/// Establishes connections for a `GooseMgr`.
///
/// This is the one capability a concrete back end has to provide. It is
/// handed to the manager at construction, so a manager can never exist
/// without a way to connect.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Driver-specific settings (host, database, credentials, ...).
    type Config: Send + 'static;
    type Connection: Send + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn create_connection(
        &self,
        config: Self::Config,
    ) -> Result<Self::Connection, Self::Error>;
}

/// Adapts an async closure into a `Connector`.
///
/// ```ignore
/// let connector = connector_fn(|cfg: MyConfig| async move { MyConnection::open(cfg).await });
/// ```
pub struct FnConnector<F, C> {
    f: F,
    _config: PhantomData<fn(C)>,
}

pub fn connector_fn<F, Fut, C, Conn, E>(f: F) -> FnConnector<F, C>
where
    F: Fn(C) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Conn, E>> + Send,
{
    FnConnector {
        f,
        _config: PhantomData,
    }
}

#[async_trait]
impl<F, Fut, C, Conn, E> Connector for FnConnector<F, C>
where
    F: Fn(C) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Conn, E>> + Send + 'static,
    C: Send + 'static,
    Conn: Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    type Config = C;
    type Connection = Conn;
    type Error = E;

    async fn create_connection(&self, config: C) -> Result<Conn, E> {
        (self.f)(config).await
    }
}
