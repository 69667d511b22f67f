pub mod connections;
pub mod core;
pub mod storage;
pub mod ui;
pub mod utils;

// re‑export ergonomic entry points
pub use crate::connections::connection::{Connector, Goose, GooseConnection};
pub use crate::core::errors::{ConfigError, ConnectError};
pub use crate::core::goose_mgr::GooseMgr;
pub use crate::storage::definitions::{Definitions, DefinitionsSource, COMMENT_KEY};
