use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use log::debug;
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::core::errors::ConfigError;

/// Reserved key for annotations inside a definitions file. Never a model.
pub const COMMENT_KEY: &str = "//";

/// Named schema definitions, one per table or collection.
///
/// Entries keep the order they were inserted in (file order when parsed from
/// JSON), so models are always built in a predictable sequence. The values
/// are opaque here and are handed to the driver's schema constructor as-is.
///
/// A file looks like:
/// `{ "//": "accounts db", "users": { ... }, "orders": { ... } }`
///
/// The `"//"` value may be anything. When it cannot be read as a `D` it is
/// kept aside as raw JSON (see `comment`) instead of failing the whole file.
#[derive(Debug, Clone, PartialEq)]
pub struct Definitions<D = serde_json::Value> {
    entries: Vec<(String, D)>,
    index: HashMap<String, usize>,
    comment: Option<Value>,
}

impl<D> Default for Definitions<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Definitions<D> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            comment: None,
        }
    }

    /// Adds `definition` under `name`, replacing (in place) and returning any
    /// previous definition with that name.
    pub fn insert(&mut self, name: impl Into<String>, definition: D) -> Option<D> {
        let name = name.into();
        match self.index.get(&name) {
            Some(&at) => Some(std::mem::replace(&mut self.entries[at].1, definition)),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, definition));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&D> {
        self.index.get(name).map(|&at| &self.entries[at].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every typed entry, including a comment entry that was read as a `D`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &D)> {
        self.entries.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// Entries that become models: everything except `COMMENT_KEY`.
    pub fn models(&self) -> impl Iterator<Item = (&str, &D)> {
        self.iter().filter(|(name, _)| *name != COMMENT_KEY)
    }

    /// The raw `"//"` value, when it did not fit the definition type.
    pub fn comment(&self) -> Option<&Value> {
        self.comment.as_ref()
    }
}

impl<D: DeserializeOwned> Definitions<D> {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses a JSON definitions file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading definitions from {:?}", path);
        let text = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::InvalidData => ConfigError::NotUtf8 {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let definitions = Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded {} definition(s) from {:?}", definitions.len(), path);
        Ok(definitions)
    }
}

impl<K: Into<String>, D> FromIterator<(K, D)> for Definitions<D> {
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut definitions = Self::new();
        for (name, definition) in iter {
            definitions.insert(name, definition);
        }
        definitions
    }
}

impl<D: Serialize> Serialize for Definitions<D> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.entries.len() + usize::from(self.comment.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(comment) = &self.comment {
            map.serialize_entry(COMMENT_KEY, comment)?;
        }
        for (name, definition) in &self.entries {
            map.serialize_entry(name, definition)?;
        }
        map.end()
    }
}

struct DefinitionsVisitor<D>(PhantomData<D>);

impl<'de, D: DeserializeOwned> Visitor<'de> for DefinitionsVisitor<D> {
    type Value = Definitions<D>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of definition names to definitions")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut definitions = Definitions::new();
        while let Some(name) = access.next_key::<String>()? {
            if name != COMMENT_KEY {
                let definition = access.next_value::<D>()?;
                definitions.insert(name, definition);
                continue;
            }
            let raw = access.next_value::<Value>()?;
            match serde_json::from_value::<D>(raw.clone()) {
                Ok(definition) => {
                    definitions.insert(name, definition);
                }
                Err(_) => definitions.comment = Some(raw),
            }
        }
        Ok(definitions)
    }
}

impl<'de, D: DeserializeOwned> Deserialize<'de> for Definitions<D> {
    fn deserialize<De: Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        deserializer.deserialize_map(DefinitionsVisitor(PhantomData))
    }
}

/// Where a manager gets its definitions from.
///
/// Strings convert to `Path`, never to inline JSON.
#[derive(Debug, Clone)]
pub enum DefinitionsSource<D = serde_json::Value> {
    Inline(Definitions<D>),
    Path(PathBuf),
}

impl<D: DeserializeOwned> DefinitionsSource<D> {
    /// Produces the definitions, reading the file for `Path`.
    pub fn load(self) -> Result<Definitions<D>, ConfigError> {
        match self {
            DefinitionsSource::Inline(definitions) => Ok(definitions),
            DefinitionsSource::Path(path) => Definitions::from_file(path),
        }
    }
}

impl<D> From<Definitions<D>> for DefinitionsSource<D> {
    fn from(definitions: Definitions<D>) -> Self {
        DefinitionsSource::Inline(definitions)
    }
}

impl<D> From<PathBuf> for DefinitionsSource<D> {
    fn from(path: PathBuf) -> Self {
        DefinitionsSource::Path(path)
    }
}

impl<D> From<&Path> for DefinitionsSource<D> {
    fn from(path: &Path) -> Self {
        DefinitionsSource::Path(path.to_path_buf())
    }
}

impl<D> From<&str> for DefinitionsSource<D> {
    fn from(path: &str) -> Self {
        DefinitionsSource::Path(PathBuf::from(path))
    }
}

impl<D> From<String> for DefinitionsSource<D> {
    fn from(path: String) -> Self {
        DefinitionsSource::Path(PathBuf::from(path))
    }
}
