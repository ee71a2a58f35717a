use log::debug;
use std::fs;
use std::path::Path;

/// Git provenance recorded on a BOM. Every field is best-effort: a missing
/// or unusual `.git` layout yields `None`s, never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepositoryInfo {
    pub url: Option<String>,
    pub commit: Option<String>,
    pub branch: Option<String>,
}

impl RepositoryInfo {
    /// Reads `.git/HEAD`, the matching ref and the origin url from
    /// `.git/config` without shelling out to git.
    pub fn discover(root: &Path) -> Self {
        let git_dir = root.join(".git");
        if !git_dir.is_dir() {
            debug!("no .git directory under {}", root.display());
            return RepositoryInfo::default();
        }

        let mut info = RepositoryInfo::default();

        if let Ok(head) = fs::read_to_string(git_dir.join("HEAD")) {
            let head = head.trim();
            if let Some(reference) = head.strip_prefix("ref: ") {
                info.branch = reference
                    .strip_prefix("refs/heads/")
                    .map(|b| b.to_string());
                info.commit = resolve_ref(&git_dir, reference);
            } else if head.len() == 40 && head.chars().all(|c| c.is_ascii_hexdigit()) {
                // Detached HEAD
                info.commit = Some(head.to_string());
            }
        }

        info.url = origin_url(&git_dir);
        info
    }
}

/// Resolves a symbolic ref via the loose ref file, falling back to
/// `packed-refs`.
fn resolve_ref(git_dir: &Path, reference: &str) -> Option<String> {
    if let Ok(content) = fs::read_to_string(git_dir.join(reference)) {
        let commit = content.trim();
        if !commit.is_empty() {
            return Some(commit.to_string());
        }
    }

    let packed = fs::read_to_string(git_dir.join("packed-refs")).ok()?;
    for line in packed.lines() {
        if line.starts_with('#') || line.starts_with('^') {
            continue;
        }
        if let Some((commit, name)) = line.split_once(' ') {
            if name.trim() == reference {
                return Some(commit.trim().to_string());
            }
        }
    }
    None
}

/// Pulls the url out of the `[remote "origin"]` section of `.git/config`.
fn origin_url(git_dir: &Path) -> Option<String> {
    let config = fs::read_to_string(git_dir.join("config")).ok()?;
    let mut in_origin = false;
    for line in config.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            in_origin = line == "[remote \"origin\"]";
            continue;
        }
        if in_origin {
            if let Some((key, value)) = line.split_once('=') {
                if key.trim() == "url" {
                    return Some(value.trim().to_string());
                }
            }
        }
    }
    None
}
