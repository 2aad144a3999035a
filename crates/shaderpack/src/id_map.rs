//! Identifier remapping tables (`item.properties`, `entity.properties`,
//! `block.properties`).
//!
//! Each file maps a numeric alias to the identifiers that should report it:
//!
//! ```text
//! item.100=diamond_sword minecraft:golden_sword
//! entity.5=minecraft:zombie
//! block.31=minecraft:grass minecraft:oak_log:axis=y
//! ```
//!
//! Identifiers without a namespace default to `minecraft`. Block identifiers may
//! carry `key=value` state properties after the path.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use shaderpack_properties::{load_properties, Encoding, Properties};

use crate::error::{Error, Result};

pub const ITEM_PROPERTIES_FILE: &str = "item.properties";
pub const ENTITY_PROPERTIES_FILE: &str = "entity.properties";
pub const BLOCK_PROPERTIES_FILE: &str = "block.properties";

const DEFAULT_NAMESPACE: &str = "minecraft";

/// A `namespace:path` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacedId {
    namespace: String,
    path: String,
}

fn valid_namespace(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-'))
}

fn valid_path(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-' | '/')
        })
}

impl NamespacedId {
    pub fn new(namespace: &str, path: &str) -> Result<Self> {
        if !valid_namespace(namespace) || !valid_path(path) {
            return Err(Error::InvalidIdentifier(format!("{}:{}", namespace, path)));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for NamespacedId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, s),
        }
    }
}

impl fmt::Display for NamespacedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

/// One `block.<n>` mapping, optionally restricted to some block states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    pub id: u16,
    pub state: BTreeMap<String, String>,
}

/// Parse `ns:path[:key=value...]` into the block id and its state filter.
fn parse_block_token(token: &str) -> Result<(NamespacedId, BTreeMap<String, String>)> {
    let parts: Vec<&str> = token.split(':').collect();
    let id_len = parts.iter().take_while(|p| !p.contains('=')).count();

    let id = match &parts[..id_len] {
        [path] => NamespacedId::new(DEFAULT_NAMESPACE, path)?,
        [namespace, path] => NamespacedId::new(namespace, path)?,
        _ => return Err(Error::InvalidIdentifier(token.to_string())),
    };

    let mut state = BTreeMap::new();
    for part in &parts[id_len..] {
        match part.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                state.insert(key.to_string(), value.to_string());
            }
            _ => return Err(Error::InvalidIdentifier(token.to_string())),
        }
    }

    Ok((id, state))
}

/// `prefix.<n>` entries of a table, sorted by `n`. Malformed keys are skipped.
fn numbered_entries<'a>(properties: &'a Properties, prefix: &str) -> Vec<(u16, &'a str)> {
    let mut entries: Vec<(u16, &str)> = properties
        .iter()
        .filter_map(|(key, value)| {
            let Some(number) = key.strip_prefix(prefix).and_then(|k| k.strip_prefix('.')) else {
                tracing::warn!("Ignoring id map key '{}': expected {}.<number>", key, prefix);
                return None;
            };
            match number.parse::<u16>() {
                Ok(n) => Some((n, value)),
                Err(_) => {
                    tracing::warn!("Ignoring id map key '{}': '{}' is not a valid id", key, number);
                    None
                }
            }
        })
        .collect();
    entries.sort_by_key(|(n, _)| *n);
    entries
}

fn parse_simple_map(properties: &Properties, prefix: &str) -> HashMap<NamespacedId, u16> {
    let mut map = HashMap::new();
    for (n, value) in numbered_entries(properties, prefix) {
        for token in value.split_whitespace() {
            match token.parse::<NamespacedId>() {
                Ok(id) => {
                    map.insert(id, n);
                }
                Err(e) => tracing::warn!("Ignoring {}.{} entry: {}", prefix, n, e),
            }
        }
    }
    map
}

fn parse_block_map(properties: &Properties) -> HashMap<NamespacedId, Vec<BlockEntry>> {
    let mut map: HashMap<NamespacedId, Vec<BlockEntry>> = HashMap::new();
    for (n, value) in numbered_entries(properties, "block") {
        for token in value.split_whitespace() {
            let (id, state) = match parse_block_token(token) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("Ignoring block.{} entry: {}", n, e);
                    continue;
                }
            };

            let entries = map.entry(id).or_default();
            match entries.iter_mut().find(|entry| entry.state == state) {
                Some(existing) => existing.id = n,
                None => entries.push(BlockEntry { id: n, state }),
            }
        }
    }
    map
}

/// Alias tables built from the pack root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdMap {
    items: HashMap<NamespacedId, u16>,
    entities: HashMap<NamespacedId, u16>,
    blocks: HashMap<NamespacedId, Vec<BlockEntry>>,
}

impl IdMap {
    /// Read the three tables from `root`. Missing files give empty tables.
    pub fn load(root: Option<&Utf8Path>) -> Self {
        let load = |name| load_properties(root, name, Encoding::Latin1).unwrap_or_default();

        Self::from_properties(
            &load(ITEM_PROPERTIES_FILE),
            &load(ENTITY_PROPERTIES_FILE),
            &load(BLOCK_PROPERTIES_FILE),
        )
    }

    pub fn from_properties(items: &Properties, entities: &Properties, blocks: &Properties) -> Self {
        Self {
            items: parse_simple_map(items, "item"),
            entities: parse_simple_map(entities, "entity"),
            blocks: parse_block_map(blocks),
        }
    }

    pub fn item_id(&self, id: &NamespacedId) -> Option<u16> {
        self.items.get(id).copied()
    }

    pub fn entity_id(&self, id: &NamespacedId) -> Option<u16> {
        self.entities.get(id).copied()
    }

    /// Every mapping declared for a block, one per distinct state filter.
    pub fn block_entries(&self, id: &NamespacedId) -> &[BlockEntry] {
        self.blocks.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn items(&self) -> impl Iterator<Item = (&NamespacedId, u16)> {
        self.items.iter().map(|(id, n)| (id, *n))
    }

    pub fn entities(&self) -> impl Iterator<Item = (&NamespacedId, u16)> {
        self.entities.iter().map(|(id, n)| (id, *n))
    }

    pub fn blocks(&self) -> impl Iterator<Item = (&NamespacedId, &[BlockEntry])> {
        self.blocks.iter().map(|(id, entries)| (id, entries.as_slice()))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.entities.is_empty() && self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::utf8;
    use std::fs;
    use tempfile::tempdir;

    fn id(s: &str) -> NamespacedId {
        s.parse().unwrap()
    }

    #[test]
    fn test_identifier_parsing() {
        assert_eq!(id("stone"), NamespacedId::new("minecraft", "stone").unwrap());
        assert_eq!(id("mymod:ore/copper").to_string(), "mymod:ore/copper");
        assert!("Stone".parse::<NamespacedId>().is_err());
        assert!("a:b:c".parse::<NamespacedId>().is_err());
        assert!(":stone".parse::<NamespacedId>().is_err());
    }

    #[test]
    fn test_items_and_entities() {
        let items = Properties::parse("item.100=diamond_sword minecraft:golden_sword\nitem.7=Bad!\n");
        let entities = Properties::parse("entity.5=zombie\nentity.x=skeleton\n");
        let map = IdMap::from_properties(&items, &entities, &Properties::new());

        assert_eq!(map.item_id(&id("diamond_sword")), Some(100));
        assert_eq!(map.item_id(&id("golden_sword")), Some(100));
        assert_eq!(map.item_count(), 2);
        assert_eq!(map.entity_id(&id("zombie")), Some(5));
        assert_eq!(map.entity_count(), 1);
    }

    #[test]
    fn test_later_ids_win() {
        let items = Properties::parse("item.20=stick\nitem.3=stick\n");
        let map = IdMap::from_properties(&items, &Properties::new(), &Properties::new());
        assert_eq!(map.item_id(&id("stick")), Some(20));
    }

    #[test]
    fn test_block_states() {
        let blocks = Properties::parse(
            "block.31=grass oak_log:axis=y\nblock.32=minecraft:oak_log:axis=x\nblock.40=oak_log:axis=y:broken\n",
        );
        let map = IdMap::from_properties(&Properties::new(), &Properties::new(), &blocks);

        assert_eq!(
            map.block_entries(&id("grass")),
            &[BlockEntry {
                id: 31,
                state: BTreeMap::new()
            }]
        );

        let logs = map.block_entries(&id("oak_log"));
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].id, 31);
        assert_eq!(logs[0].state.get("axis").map(String::as_str), Some("y"));
        assert_eq!(logs[1].id, 32);
        assert!(map.block_entries(&id("dirt")).is_empty());
    }

    #[test]
    fn test_load_from_root() {
        let dir = tempdir().unwrap();
        let root = utf8(dir.path());
        fs::write(root.join(BLOCK_PROPERTIES_FILE), "block.1=stone\n").unwrap();

        let map = IdMap::load(Some(&root));
        assert_eq!(map.block_count(), 1);
        assert_eq!(map.item_count(), 0);
        assert!(IdMap::load(None).is_empty());
    }
}
