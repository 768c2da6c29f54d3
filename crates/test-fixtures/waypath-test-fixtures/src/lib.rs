use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    paths: HashMap<String, String>,
    #[serde(default)]
    baked: HashMap<String, BakedEntry>,
}

/// A baked reference run and the path document it was produced from
#[derive(Debug, Deserialize)]
struct BakedEntry {
    source: String,
    output: String,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod paths {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.paths.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.paths, "path", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.paths, "path", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.paths, "path", name)?;
        Ok(resolve_path(rel))
    }
}

pub mod baked {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.baked.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Path document the run was baked from
    pub fn source_json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.baked, "baked", name)?;
        read_to_string(&entry.source)
    }

    pub fn output_json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.baked, "baked", name)?;
        read_to_string(&entry.output)
    }

    pub fn output<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.baked, "baked", name)?;
        super::load_json(&entry.output)
    }
}
