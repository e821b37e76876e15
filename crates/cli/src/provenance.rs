//! `<artifact>.provenance.json` sidecars for files the CLI writes.

use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use serde_json::{json, Value};

/// What produced an artifact.
pub struct Payload {
    /// Command parameters, echoed verbatim.
    pub params: Value,
    /// Files the artifact was derived from.
    pub sources: Vec<PathBuf>,
    /// Small numeric summary (group count, elapsed time, ...).
    pub summary: Value,
}

impl Payload {
    pub fn new(params: Value) -> Self {
        Self {
            params,
            sources: Vec::new(),
            summary: Value::Null,
        }
    }

    pub fn with_source(mut self, path: &Path) -> Self {
        self.sources.push(path.to_path_buf());
        self
    }

    pub fn with_summary(mut self, summary: Value) -> Self {
        self.summary = summary;
        self
    }
}

/// Common header of every provenance document.
pub fn header() -> Value {
    json!({
        "code_rev": current_git_rev(),
        "version": overlaps::VERSION,
    })
}

/// Write the sidecar next to `artifact` and return its path. The callsite
/// recorded is the caller of this function.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = sidecar_path(artifact);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let mut doc = header();
    doc["callsite"] = json!({ "file": callsite.file(), "line": callsite.line() });
    doc["params"] = payload.params;
    doc["sources"] = payload.sources.iter().map(|p| p.to_string_lossy().into_owned()).collect();
    doc["summary"] = payload.summary;
    doc["outputs"] = json!([artifact.to_string_lossy()]);
    fs::write(&path, serde_json::to_vec_pretty(&doc)?).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Commit of the running code: `GIT_COMMIT` at build time, then at run time,
/// then `git rev-parse HEAD`, else `"unknown"`.
pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Some(rev) = std::env::var("GIT_COMMIT").ok().filter(|s| !s.is_empty()) {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_replaces_extension() {
        let derived = sidecar_path(Path::new("/tmp/out/report.json"));
        assert_eq!(derived, Path::new("/tmp/out/report.provenance.json"));
    }

    #[test]
    fn sidecar_records_params_sources_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("report.json");
        fs::write(&artifact, "{}").unwrap();
        let input = dir.path().join("input.json");
        let payload = Payload::new(json!({"timeout_secs": 60}))
            .with_source(&input)
            .with_summary(json!({"groups": 7}));
        let path = write_sidecar(&artifact, payload).unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(doc["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(doc["sources"][0], input.to_string_lossy().as_ref());
        assert_eq!(doc["params"]["timeout_secs"], 60);
        assert_eq!(doc["summary"]["groups"], 7);
        assert_eq!(doc["version"], overlaps::VERSION);
        assert!(doc["callsite"]["line"].as_u64().is_some());
    }
}
