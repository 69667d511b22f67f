use std::fmt::{self, Display};
use std::path::PathBuf;

/// Failures while loading or saving a definitions file.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
    NotUtf8 {
        path: PathBuf,
    },
    NoConfigDir,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "cannot access {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "invalid definitions in {}: {}", path.display(), source)
            }
            ConfigError::Encode { path, source } => {
                write!(f, "cannot encode definitions for {}: {}", path.display(), source)
            }
            ConfigError::NotUtf8 { path } => {
                write!(f, "{} is not UTF-8 encoded JSON", path.display())
            }
            ConfigError::NoConfigDir => write!(f, "unable to locate config dir"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } | ConfigError::Encode { source, .. } => Some(source),
            ConfigError::NotUtf8 { .. } | ConfigError::NoConfigDir => None,
        }
    }
}

/// Failures of `GooseMgr::connect`.
///
/// `Connection` carries the connector's error untouched; its message is
/// displayed as-is so callers see exactly what the driver reported.
#[derive(Debug)]
pub enum ConnectError<E> {
    AlreadyConnected,
    Connection(E),
}

impl<E> ConnectError<E> {
    /// The connector's error, if that is what failed.
    pub fn into_connection_error(self) -> Option<E> {
        match self {
            ConnectError::Connection(e) => Some(e),
            ConnectError::AlreadyConnected => None,
        }
    }
}

impl<E: Display> Display for ConnectError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectError::AlreadyConnected => write!(f, "already connected; models are built once"),
            ConnectError::Connection(e) => write!(f, "{}", e),
        }
    }
}

impl<E: std::error::Error> std::error::Error for ConnectError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConnectError::Connection(e) => e.source(),
            ConnectError::AlreadyConnected => None,
        }
    }
}
