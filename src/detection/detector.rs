use crate::detection::intent::DetectionBucket;
use crate::detection::language::Language;
use crate::detection::matcher::{DetectionMatch, PatternMatcher};
use crate::shared::Result;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Default cap on scanned source files (10 MiB). Larger files are recorded
/// as skipped, never parsed.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Directories never descended into.
const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "venv",
    ".venv",
    "__pycache__",
    "dist",
    "build",
    ".tox",
    "site-packages",
];

/// Maximum snippet length attached to a detection.
const MAX_SNIPPET_LEN: usize = 500;

/// A file the walker refused to parse, with its size for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedFile {
    pub path: String,
    pub size_mb: f64,
}

/// One match together with its file and surrounding snippet.
#[derive(Debug, Clone)]
pub struct FileDetection {
    /// Path relative to the scan root
    pub file: String,
    pub matched: DetectionMatch,
    pub snippet: String,
}

/// Everything one repository walk produced, bucketed by intent.
#[derive(Debug, Default)]
pub struct DetectionReport {
    pub ai_clients: Vec<FileDetection>,
    pub ml_libraries: Vec<FileDetection>,
    pub models: Vec<FileDetection>,
    pub datasets: Vec<FileDetection>,
    pub files_scanned: usize,
    pub skipped_files: Vec<SkippedFile>,
    /// Full text of every file that produced at least one match, for
    /// name recovery downstream. One read per file per scan.
    file_sources: BTreeMap<String, String>,
}

impl DetectionReport {
    pub fn total_detections(&self) -> usize {
        self.ai_clients.len() + self.ml_libraries.len() + self.models.len() + self.datasets.len()
    }

    /// Cached source text of a matched file, if any.
    pub fn source_of(&self, file: &str) -> Option<&str> {
        self.file_sources.get(file).map(|s| s.as_str())
    }
}

/// Walks a repository and buckets structural matches into component
/// candidates. One detector instance holds its compiled patterns and a
/// size cap; all per-scan state lives in the returned report.
#[derive(Debug)]
pub struct ComponentDetector {
    matcher: PatternMatcher,
    max_file_size: u64,
    extra_excluded_dirs: Vec<String>,
}

impl ComponentDetector {
    /// Creates a detector with the default file-size cap.
    ///
    /// # Errors
    /// Returns an error if the static pattern tables fail to compile
    pub fn new() -> Result<Self> {
        Self::with_limits(DEFAULT_MAX_FILE_SIZE, Vec::new())
    }

    /// Creates a detector with an explicit size cap and additional
    /// directory names to exclude from the walk.
    pub fn with_limits(max_file_size: u64, extra_excluded_dirs: Vec<String>) -> Result<Self> {
        Ok(ComponentDetector {
            matcher: PatternMatcher::new()?,
            max_file_size,
            extra_excluded_dirs,
        })
    }

    /// Scans every supported source file under `root`.
    ///
    /// Unreadable files are logged and skipped; oversized files are logged
    /// and recorded in the report's skip list. The walk order is sorted by
    /// file name, so reports are deterministic for identical trees.
    ///
    /// # Errors
    /// Returns an error only if the root itself cannot be walked
    pub fn scan(&self, root: &Path) -> Result<DetectionReport> {
        let mut report = DetectionReport::default();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(language) = Language::from_path(entry.path()) else {
                continue;
            };

            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .to_string();

            match entry.metadata() {
                Ok(metadata) if metadata.len() > self.max_file_size => {
                    let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);
                    warn!("skipping oversized file {} ({:.1} MB)", relative, size_mb);
                    report.skipped_files.push(SkippedFile {
                        path: relative,
                        size_mb,
                    });
                    continue;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("skipping {}: cannot read metadata: {}", relative, e);
                    continue;
                }
            }

            let source = match fs::read_to_string(entry.path()) {
                Ok(source) => source,
                Err(e) => {
                    debug!("skipping {}: not readable as UTF-8 text: {}", relative, e);
                    continue;
                }
            };

            report.files_scanned += 1;
            self.scan_source(&relative, language, &source, &mut report);
        }

        debug!(
            "scan of {} finished: {} files, {} detections, {} skipped",
            root.display(),
            report.files_scanned,
            report.total_detections(),
            report.skipped_files.len()
        );
        Ok(report)
    }

    /// Buckets the matches of a single file. Split out so tests can feed
    /// in-memory sources.
    fn scan_source(
        &self,
        file: &str,
        language: Language,
        source: &str,
        report: &mut DetectionReport,
    ) {
        let matches = self.matcher.matches_in(language, source);
        if matches.is_empty() {
            return;
        }

        // Split once per file; snippets index into this cache.
        let lines: Vec<&str> = source.lines().collect();
        for matched in matches {
            let snippet = snippet_around(&lines, matched.line);
            let detection = FileDetection {
                file: file.to_string(),
                matched,
                snippet,
            };
            match detection.matched.intent.bucket() {
                DetectionBucket::AiClients => report.ai_clients.push(detection),
                DetectionBucket::MlLibraries => report.ml_libraries.push(detection),
                DetectionBucket::Models => report.models.push(detection),
                DetectionBucket::Datasets => report.datasets.push(detection),
            }
        }

        report
            .file_sources
            .insert(file.to_string(), source.to_string());
    }

    fn is_excluded_dir(&self, entry: &walkdir::DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let Some(name) = entry.file_name().to_str() else {
            return false;
        };
        EXCLUDED_DIRS.contains(&name) || self.extra_excluded_dirs.iter().any(|d| d == name)
    }
}

/// Extracts the matched line with one line of context on each side,
/// truncated to `MAX_SNIPPET_LEN` characters.
fn snippet_around(lines: &[&str], line: usize) -> String {
    if lines.is_empty() || line == 0 {
        return String::new();
    }
    let idx = line - 1;
    let start = idx.saturating_sub(1);
    let end = (idx + 2).min(lines.len());
    let snippet = lines[start..end].join("\n");
    if snippet.len() > MAX_SNIPPET_LEN {
        snippet.chars().take(MAX_SNIPPET_LEN).collect()
    } else {
        snippet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::intent::DetectionIntent;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_buckets_matches() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "app.py",
            "import openai\nresp = openai.chat.completions.create(model=\"gpt-4\")\n",
        );
        write(&dir, "train.py", "import torch\nmodel.fit(x, y)\n");
        write(&dir, "data.py", "ds = load_dataset(\"imdb\")\n");

        let report = ComponentDetector::new().unwrap().scan(dir.path()).unwrap();
        assert_eq!(report.files_scanned, 3);
        assert!(!report.ai_clients.is_empty());
        assert!(!report.ml_libraries.is_empty());
        assert!(!report.models.is_empty());
        assert!(!report.datasets.is_empty());
    }

    #[test]
    fn test_non_source_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        write(&dir, "notes.md", "import torch\n");
        write(&dir, "data.csv", "a,b,c\n");

        let report = ComponentDetector::new().unwrap().scan(dir.path()).unwrap();
        assert_eq!(report.files_scanned, 0);
        assert_eq!(report.total_detections(), 0);
    }

    #[test]
    fn test_excluded_directories_are_not_walked() {
        let dir = TempDir::new().unwrap();
        write(&dir, "node_modules/pkg/index.js", "require(\"openai\");\n");
        write(&dir, "venv/lib/site.py", "import torch\n");
        write(&dir, "src/main.py", "import torch\n");

        let report = ComponentDetector::new().unwrap().scan(dir.path()).unwrap();
        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.ml_libraries.len(), 1);
        assert_eq!(report.ml_libraries[0].file, "src/main.py");
    }

    #[test]
    fn test_oversized_file_is_skipped_and_recorded() {
        let dir = TempDir::new().unwrap();
        write(&dir, "big.py", &"# padding\n".repeat(64));
        write(&dir, "small.py", "import torch\n");

        let detector = ComponentDetector::with_limits(100, Vec::new()).unwrap();
        let report = detector.scan(dir.path()).unwrap();
        assert_eq!(report.skipped_files.len(), 1);
        assert_eq!(report.skipped_files[0].path, "big.py");
        assert!(report.skipped_files[0].size_mb > 0.0);
        assert_eq!(report.files_scanned, 1);
    }

    #[test]
    fn test_snippet_has_one_context_line_each_side() {
        let dir = TempDir::new().unwrap();
        write(&dir, "m.py", "# before\nmodel.predict(x)\n# after\n# far\n");

        let report = ComponentDetector::new().unwrap().scan(dir.path()).unwrap();
        let detection = &report.models[0];
        assert_eq!(detection.snippet, "# before\nmodel.predict(x)\n# after");
    }

    #[test]
    fn test_snippet_truncated_to_cap() {
        let long_line = "x".repeat(1200);
        let lines = vec![long_line.as_str()];
        let snippet = snippet_around(&lines, 1);
        assert_eq!(snippet.len(), MAX_SNIPPET_LEN);
    }

    #[test]
    fn test_source_cache_only_holds_matched_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "hit.py", "import torch\n");
        write(&dir, "miss.py", "print('nothing to see')\n");

        let report = ComponentDetector::new().unwrap().scan(dir.path()).unwrap();
        assert!(report.source_of("hit.py").is_some());
        assert!(report.source_of("miss.py").is_none());
    }

    #[test]
    fn test_two_identical_calls_two_matches() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "two.py",
            "a = AutoModel.from_pretrained(\"gpt2\")\nb = AutoModel.from_pretrained(\"gpt2\")\n",
        );

        let report = ComponentDetector::new().unwrap().scan(dir.path()).unwrap();
        let named: Vec<_> = report
            .models
            .iter()
            .filter(|d| d.matched.intent == DetectionIntent::HuggingfaceModel)
            .collect();
        assert_eq!(named.len(), 2);
    }
}
