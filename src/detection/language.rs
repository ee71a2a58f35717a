use std::path::Path;

/// Source languages the scanner understands.
///
/// Files whose extension maps to no variant are ignored by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Python,
    JavaScript,
}

impl Language {
    /// Resolves a language from a file path's extension.
    ///
    /// # Returns
    /// `Some(Language)` for supported extensions (.py, .js, .jsx, .ts, .tsx),
    /// `None` otherwise
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("py") => Some(Language::Python),
            Some("js") | Some("jsx") | Some("ts") | Some("tsx") => Some(Language::JavaScript),
            _ => None,
        }
    }

    /// All extensions the scanner considers, used for walker filtering.
    pub fn supported_extensions() -> &'static [&'static str] {
        &["py", "js", "jsx", "ts", "tsx"]
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Python => write!(f, "python"),
            Language::JavaScript => write!(f, "javascript"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_path_python() {
        assert_eq!(
            Language::from_path(&PathBuf::from("src/train.py")),
            Some(Language::Python)
        );
    }

    #[test]
    fn test_from_path_javascript_variants() {
        for ext in ["js", "jsx", "ts", "tsx"] {
            assert_eq!(
                Language::from_path(&PathBuf::from(format!("app/index.{}", ext))),
                Some(Language::JavaScript),
                "extension {} should map to JavaScript",
                ext
            );
        }
    }

    #[test]
    fn test_from_path_unsupported() {
        assert_eq!(Language::from_path(&PathBuf::from("README.md")), None);
        assert_eq!(Language::from_path(&PathBuf::from("Makefile")), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Language::Python.to_string(), "python");
        assert_eq!(Language::JavaScript.to_string(), "javascript");
    }
}
