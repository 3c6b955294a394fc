//! Lookup tables built once per run from the configured dictionaries.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Instant;

use tracing::{info, info_span};

use crate::dict::{DictError, Entry, LineSource, Variant};
use crate::group;
use crate::index::{build_plain_set, Groups, Indexer};
use crate::settings::{Settings, TableKind, TableSettings};

/// One indexed dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Table {
    Keys(HashSet<String>),
    Groups(Groups),
    Safe(BTreeMap<String, Variant>),
}

impl Table {
    /// Build the table described by `cfg`, reading its file once.
    pub fn build(settings: &Settings, cfg: &TableSettings) -> Result<Self, DictError> {
        let source = LineSource::open(&settings.resolve(&cfg.path))?;
        let lines = source.data_lines();
        let indexer = Indexer::new(cfg.rule()).with_malformed(cfg.malformed);
        Ok(match cfg.kind {
            TableKind::Plain => Table::Keys(build_plain_set(lines)?),
            TableKind::Set => Table::Keys(indexer.build_set(lines)?),
            TableKind::Groups => {
                let groups = indexer.build_map(lines)?;
                Table::Groups(group::filter(&groups, cfg.policy.unwrap_or_default()))
            }
            TableKind::SafeMap => Table::Safe(indexer.build_safe_map(lines)?),
        })
    }

    pub fn len(&self) -> usize {
        match self {
            Table::Keys(keys) => keys.len(),
            Table::Groups(groups) => groups.len(),
            Table::Safe(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        match self {
            Table::Keys(keys) => keys.contains(key),
            Table::Groups(groups) => groups.contains_key(key),
            Table::Safe(map) => map.contains_key(key),
        }
    }

    /// Entries stored under `key`; empty when absent.
    pub fn lookup(&self, key: &str) -> Vec<Entry> {
        match self {
            Table::Keys(keys) => keys
                .get(key)
                .map(|k| vec![Entry::PlainKey(k.clone())])
                .unwrap_or_default(),
            Table::Groups(groups) => groups
                .get(key)
                .map(|variants| variants.iter().cloned().map(Entry::TextCode).collect())
                .unwrap_or_default(),
            Table::Safe(map) => map
                .get(key)
                .map(|v| vec![Entry::TextCode(v.clone())])
                .unwrap_or_default(),
        }
    }
}

/// Every configured table, keyed by its settings name.
#[derive(Debug)]
pub struct Tables {
    configs: BTreeMap<String, TableSettings>,
    tables: HashMap<String, Table>,
}

impl Tables {
    /// Index every table in `settings`. A missing file aborts the load.
    pub fn load(settings: &Settings) -> Result<Self, DictError> {
        Self::load_only(settings, |_| true)
    }

    /// Index the tables whose name satisfies `keep`; the rest are never read.
    pub fn load_only<F>(settings: &Settings, keep: F) -> Result<Self, DictError>
    where
        F: Fn(&str) -> bool,
    {
        let configs: BTreeMap<String, TableSettings> = settings
            .tables
            .iter()
            .filter(|(name, _)| keep(name.as_str()))
            .map(|(name, cfg)| (name.clone(), cfg.clone()))
            .collect();
        let mut tables = HashMap::with_capacity(configs.len());
        for (name, cfg) in &configs {
            let _span = info_span!("load_table", table = %name, path = %cfg.path.display()).entered();
            let start = Instant::now();
            let table = Table::build(settings, cfg)?;
            info!(
                entries = table.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "table loaded"
            );
            tables.insert(name.clone(), table);
        }
        Ok(Self { configs, tables })
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Table names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    /// The lookup key for `(text, code)` under table `name`'s own rule.
    pub fn key_for(&self, name: &str, text: &str, code: &str) -> Option<String> {
        self.configs.get(name).map(|cfg| cfg.key(text, code))
    }
}
