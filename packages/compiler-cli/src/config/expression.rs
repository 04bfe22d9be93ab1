use anyhow::{bail, Context};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use endorphin_compiler::{GlobalAllowList, HelperAllowList};

static IDENTIFIER_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Allow-lists read from an `--config` JSON file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpressionConfig {
    #[serde(default)]
    pub helpers: Vec<String>,
    /// Replaces the default globals when present
    pub globals: Option<Vec<String>>,
}

impl ExpressionConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: ExpressionConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let globals = self.globals.iter().flatten();
        for name in self.helpers.iter().chain(globals) {
            validate_name(name)?;
        }
        Ok(())
    }

    /// Merge extra helper names given on the command line
    pub fn with_helpers<I, S>(mut self, names: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            validate_name(&name)?;
            if !self.helpers.contains(&name) {
                self.helpers.push(name);
            }
        }
        Ok(self)
    }

    pub fn helper_list(&self) -> HelperAllowList {
        self.helpers.iter().cloned().collect()
    }

    pub fn global_list(&self) -> GlobalAllowList {
        match &self.globals {
            Some(names) => GlobalAllowList::new(names.iter().cloned()),
            None => GlobalAllowList::default(),
        }
    }
}

fn validate_name(name: &str) -> anyhow::Result<()> {
    if !IDENTIFIER_REGEXP.is_match(name) {
        bail!("Invalid identifier in allow-list: {:?}", name);
    }
    Ok(())
}
