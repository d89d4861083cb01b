//! Loading a policy file into a name-keyed table.

use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Deserialize;

use super::{Defaults, RawPolicy, TargetSection};
use crate::{ConsistencyError, InputError, Result};

/// Serialization format of a policy file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PolicyFormat {
    #[default]
    Toml,
    Json,
}

impl PolicyFormat {
    /// JSON for a `.json` extension, TOML otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

impl FromStr for PolicyFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown policy format `{s}` (expected toml or json)")),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPolicyFile {
    #[serde(default)]
    target: TargetSection,
    #[serde(default)]
    defaults: Defaults,
    #[serde(default, rename = "function")]
    functions: Vec<RawPolicy>,
}

/// Policy entries keyed by function name, `[defaults]` already applied.
#[derive(Clone, Debug, Default)]
pub struct PolicyTable {
    target: TargetSection,
    entries: IndexMap<String, RawPolicy>,
}

impl PolicyTable {
    pub fn parse(origin: &str, text: &str, format: PolicyFormat) -> Result<Self> {
        let file: RawPolicyFile = match format {
            PolicyFormat::Toml => toml::from_str(text).map_err(|e| policy_file_error(origin, e))?,
            PolicyFormat::Json => {
                serde_json::from_str(text).map_err(|e| policy_file_error(origin, e))?
            }
        };

        let table = Self::from_parts(file.target, &file.defaults, file.functions)?;
        tracing::debug!(origin, functions = table.len(), "loaded policy table");
        Ok(table)
    }

    pub fn from_toml(origin: &str, text: &str) -> Result<Self> {
        Self::parse(origin, text, PolicyFormat::Toml)
    }

    pub fn from_json(origin: &str, text: &str) -> Result<Self> {
        Self::parse(origin, text, PolicyFormat::Json)
    }

    /// Build a table from entries with no `[target]` or `[defaults]`.
    pub fn from_entries(entries: impl IntoIterator<Item = RawPolicy>) -> Result<Self> {
        Self::from_parts(TargetSection::default(), &Defaults::default(), entries)
    }

    fn from_parts(
        target: TargetSection,
        defaults: &Defaults,
        functions: impl IntoIterator<Item = RawPolicy>,
    ) -> Result<Self> {
        let mut entries = IndexMap::new();
        for mut entry in functions {
            defaults.apply(&mut entry);
            match entries.entry(entry.name.clone()) {
                Entry::Occupied(_) => {
                    return Err(ConsistencyError::DuplicatePolicy {
                        function: entry.name,
                    }
                    .into());
                }
                Entry::Vacant(e) => {
                    e.insert(entry);
                }
            }
        }
        Ok(Self { target, entries })
    }

    pub fn target(&self) -> &TargetSection {
        &self.target
    }

    pub fn get(&self, name: &str) -> Option<&RawPolicy> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = &RawPolicy> {
        self.entries.values()
    }
}

fn policy_file_error(origin: &str, err: impl std::fmt::Display) -> InputError {
    InputError::PolicyFile {
        origin: origin.to_string(),
        message: err.to_string().trim_end().to_string(),
    }
}
