use std::path::Path;
use std::process;

use rime_core::dict::{rewrite_weights_file, LineSource};
use rime_core::group::{self, GroupPolicy};
use rime_core::index::{Groups, Indexer, MalformedPolicy};
use rime_core::normalize::{CutoffRule, EntryRule, FilterRule};
use rime_core::settings::{Settings, TableKind};
use rime_core::tables::Tables;

use super::emit;

/// Indexing options shared by `keys`, `groups`, and `safe`.
pub struct IndexOptions {
    pub filter: FilterRule,
    pub cutoff: CutoffRule,
    pub skip_malformed: bool,
}

impl IndexOptions {
    fn indexer(&self) -> Indexer {
        let policy = if self.skip_malformed {
            MalformedPolicy::Skip
        } else {
            MalformedPolicy::Fail
        };
        Indexer::new(EntryRule::new(self.filter, self.cutoff)).with_malformed(policy)
    }
}

fn open(dict_file: &str) -> LineSource {
    eprintln!("Reading {dict_file}...");
    die!(
        LineSource::open(Path::new(dict_file)),
        "Error opening dictionary: {}"
    )
}

fn group_rows(groups: &Groups) -> Vec<String> {
    groups
        .iter()
        .flat_map(|(key, variants)| variants.iter().map(move |v| format!("{key}\t{v}")))
        .collect()
}

pub fn keys(dict_file: &str, opts: &IndexOptions, output: Option<&str>) {
    let source = open(dict_file);
    let set = die!(
        opts.indexer().build_set(source.data_lines()),
        "Error indexing {dict_file}: {}"
    );
    let mut keys: Vec<String> = set.into_iter().collect();
    keys.sort();
    eprintln!("  {} keys", keys.len());
    emit(&keys, output);
}

pub fn groups(dict_file: &str, opts: &IndexOptions, policy: GroupPolicy, output: Option<&str>) {
    let source = open(dict_file);
    let all = die!(
        opts.indexer().build_map(source.data_lines()),
        "Error indexing {dict_file}: {}"
    );
    let retained = group::filter(&all, policy);
    eprintln!("  {} of {} groups retained ({policy:?})", retained.len(), all.len());
    emit(&group_rows(&retained), output);
}

pub fn safe(dict_file: &str, opts: &IndexOptions, output: Option<&str>) {
    let source = open(dict_file);
    let map = die!(
        opts.indexer().build_safe_map(source.data_lines()),
        "Error indexing {dict_file}: {}"
    );
    eprintln!("  {} safe lowercase keys", map.len());
    let rows: Vec<String> = map.iter().map(|(key, v)| format!("{key}\t{v}")).collect();
    emit(&rows, output);
}

pub fn weight(dict_file: &str, weight: i64) {
    die!(
        rewrite_weights_file(Path::new(dict_file), weight),
        "Error rewriting weights: {}"
    );
    eprintln!("Set weight {weight} in {dict_file}");
}

fn kind_name(kind: TableKind) -> &'static str {
    match kind {
        TableKind::Plain => "plain",
        TableKind::Set => "set",
        TableKind::Groups => "groups",
        TableKind::SafeMap => "safe-map",
    }
}

pub fn tables(settings: &Settings) {
    let tables = die!(Tables::load(settings), "Error loading tables: {}");
    println!("rime_dir: {}", settings.rime_dir.display());
    for name in tables.names() {
        let (Some(table), Some(cfg)) = (tables.get(name), settings.tables.get(name)) else {
            continue;
        };
        println!(
            "  {name:<12} {:<9} {:>8} entries  {}",
            kind_name(cfg.kind),
            table.len(),
            cfg.path.display()
        );
    }
}

pub fn lookup(settings: &Settings, table_name: &str, text: &str, code: &str) {
    if !settings.tables.contains_key(table_name) {
        let names: Vec<&str> = settings.tables.keys().map(String::as_str).collect();
        eprintln!(
            "Error: unknown table '{table_name}' (available: {})",
            names.join(", ")
        );
        process::exit(1);
    }
    let tables = die!(
        Tables::load_only(settings, |name| name == table_name),
        "Error loading table {table_name}: {}"
    );
    let (Some(table), Some(key)) = (
        tables.get(table_name),
        tables.key_for(table_name, text, code),
    ) else {
        return;
    };
    let entries = table.lookup(&key);
    if entries.is_empty() {
        println!("{key}: not found");
    } else {
        println!("{key}: {} entries", entries.len());
        for entry in &entries {
            println!("  {entry}");
        }
    }
}
