use clap::{Parser, Subcommand};
use log::info;
use std::fmt::{self, Display};
use std::path::PathBuf;

use crate::connections::memory::{MemoryConfig, MemoryConnector, MemoryError, MemoryGoose};
use crate::core::errors::{ConfigError, ConnectError};
use crate::core::goose_mgr::GooseMgr;
use crate::storage::definitions::Definitions;
use crate::storage::store::DefinitionsStore;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "goosemgr", version, subcommand_required = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the models a connect would build, in order
    Models {
        /// Definitions file (default: definitions.json in the config dir)
        #[arg(long)]
        definitions: Option<PathBuf>,
    },
    /// Connect the definitions through the in-memory driver and print every model
    Connect {
        /// Definitions file (default: definitions.json in the config dir)
        #[arg(long)]
        definitions: Option<PathBuf>,
        /// Database name handed to the driver
        #[arg(long, default_value = "main")]
        database: String,
    },
}

#[derive(Debug)]
pub enum CliError {
    Config(ConfigError),
    Connect(ConnectError<MemoryError>),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err)
    }
}

impl From<ConnectError<MemoryError>> for CliError {
    fn from(err: ConnectError<MemoryError>) -> Self {
        CliError::Connect(err)
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "configuration error: {}", e),
            CliError::Connect(e) => write!(f, "connect error: {}", e),
        }
    }
}

impl std::error::Error for CliError {}

pub async fn run_cli(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Models { definitions } => {
            let path = resolve_path(definitions)?;
            let defs: Definitions = Definitions::from_file(&path)?;
            for (name, _) in defs.models() {
                println!("{}", name);
            }
        }
        Command::Connect {
            definitions,
            database,
        } => {
            let path = resolve_path(definitions)?;
            info!("Using definitions from {:?}", path);
            let mut mgr: GooseMgr<MemoryGoose, _> = GooseMgr::new(path, MemoryConnector)?;
            mgr.connect(MemoryConfig::new(database)).await?;
            for (name, model) in mgr.models() {
                println!("{}.{}: {}", model.database, name, model.schema.definition);
            }
        }
    }
    Ok(())
}

fn resolve_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(DefinitionsStore::new()?.path()),
    }
}
