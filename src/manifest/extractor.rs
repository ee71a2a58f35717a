use crate::manifest::keywords::is_ai_related;
use crate::shared::Result;
use anyhow::Context;
use log::{debug, warn};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Manifest files the extractor looks for, in a fixed order so output is
/// deterministic when the same package appears in several of them.
const MANIFEST_FILES: &[&str] = &[
    "requirements.txt",
    "requirements-dev.txt",
    "package.json",
    "pyproject.toml",
];

/// A dependency declared in a package manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredDependency {
    pub name: String,
    pub version: Option<String>,
    pub package_manager: String,
    pub is_ai_related: bool,
    pub source_file: String,
}

/// Extracts declared dependencies from the manifests present at a
/// repository root. A malformed manifest is logged and contributes
/// nothing; malformed individual lines are skipped.
#[derive(Debug)]
pub struct DependencyExtractor {
    requirement_line: Regex,
}

impl DependencyExtractor {
    /// # Errors
    /// Returns an error only if the static requirement pattern fails to compile
    pub fn new() -> Result<Self> {
        Ok(DependencyExtractor {
            requirement_line: Regex::new(r"^([a-zA-Z0-9_-][a-zA-Z0-9._-]*)([=~<>!]+)(.+)$")
                .context("invalid requirement pattern")?,
        })
    }

    /// Reads every known manifest under `root` and returns all declared
    /// dependencies, in manifest order then declaration order.
    pub fn extract(&self, root: &Path) -> Vec<DeclaredDependency> {
        let mut dependencies = Vec::new();

        for manifest in MANIFEST_FILES {
            let path = root.join(manifest);
            if !path.is_file() {
                continue;
            }
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!("cannot read {}: {}", path.display(), e);
                    continue;
                }
            };

            match *manifest {
                "package.json" => self.parse_package_json(&content, manifest, &mut dependencies),
                "pyproject.toml" => self.parse_pyproject(&content, manifest, &mut dependencies),
                _ => self.parse_requirements(&content, manifest, &mut dependencies),
            }
        }

        dependencies
    }

    /// requirements.txt style: one specifier per line, `#` comments,
    /// pip options (`-r`, `--index-url`) ignored.
    fn parse_requirements(&self, content: &str, source: &str, out: &mut Vec<DeclaredDependency>) {
        for raw_line in content.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() || line.starts_with('-') {
                continue;
            }

            if let Some(caps) = self.requirement_line.captures(line) {
                // Environment markers after ';' are not part of the version
                let version = caps[3].split(';').next().unwrap_or("").trim();
                out.push(Self::dependency(
                    &caps[1],
                    (!version.is_empty()).then(|| version.to_string()),
                    "pip",
                    source,
                ));
            } else {
                // Bare package name, possibly with a marker
                let name = line.split(';').next().unwrap_or("").trim();
                if name.chars().all(|c| c.is_alphanumeric() || "._-".contains(c)) && !name.is_empty()
                {
                    out.push(Self::dependency(name, None, "pip", source));
                } else {
                    debug!("skipping malformed requirement line: {}", raw_line);
                }
            }
        }
    }

    /// package.json: dependencies, devDependencies and peerDependencies.
    fn parse_package_json(&self, content: &str, source: &str, out: &mut Vec<DeclaredDependency>) {
        let parsed: serde_json::Value = match serde_json::from_str(content) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("malformed {}: {}", source, e);
                return;
            }
        };

        for section in ["dependencies", "devDependencies", "peerDependencies"] {
            let Some(map) = parsed.get(section).and_then(|v| v.as_object()) else {
                continue;
            };
            for (name, version) in map {
                out.push(Self::dependency(
                    name,
                    version.as_str().map(|v| v.to_string()),
                    "npm",
                    source,
                ));
            }
        }
    }

    /// pyproject.toml: PEP 621 `[project.dependencies]` plus
    /// `[tool.poetry.dependencies]` (minus the python entry itself).
    fn parse_pyproject(&self, content: &str, source: &str, out: &mut Vec<DeclaredDependency>) {
        let parsed: toml::Value = match toml::from_str(content) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("malformed {}: {}", source, e);
                return;
            }
        };

        if let Some(specs) = parsed
            .get("project")
            .and_then(|p| p.get("dependencies"))
            .and_then(|d| d.as_array())
        {
            for spec in specs.iter().filter_map(|s| s.as_str()) {
                if let Some(caps) = self.requirement_line.captures(spec.trim()) {
                    let version = caps[3].split(';').next().unwrap_or("").trim();
                    out.push(Self::dependency(
                        &caps[1],
                        (!version.is_empty()).then(|| version.to_string()),
                        "pip",
                        source,
                    ));
                } else {
                    let name = spec.split(|c| "[<>=~!; ".contains(c)).next().unwrap_or("");
                    if !name.is_empty() {
                        out.push(Self::dependency(name, None, "pip", source));
                    }
                }
            }
        }

        if let Some(table) = parsed
            .get("tool")
            .and_then(|t| t.get("poetry"))
            .and_then(|p| p.get("dependencies"))
            .and_then(|d| d.as_table())
        {
            for (name, value) in table {
                if name == "python" {
                    continue;
                }
                let version = match value {
                    toml::Value::String(v) if v != "*" => Some(v.clone()),
                    toml::Value::Table(t) => t
                        .get("version")
                        .and_then(|v| v.as_str())
                        .filter(|v| *v != "*")
                        .map(|v| v.to_string()),
                    _ => None,
                };
                out.push(Self::dependency(name, version, "poetry", source));
            }
        }
    }

    fn dependency(
        name: &str,
        version: Option<String>,
        manager: &str,
        source: &str,
    ) -> DeclaredDependency {
        DeclaredDependency {
            is_ai_related: is_ai_related(name),
            name: name.to_string(),
            version,
            package_manager: manager.to_string(),
            source_file: source.to_string(),
        }
    }
}
