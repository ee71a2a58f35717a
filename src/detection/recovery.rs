use crate::shared::Result;
use anyhow::Context;
use regex::Regex;

/// Best-effort recovery of model and dataset identifiers from source text.
///
/// Used when the structural match itself carried no name, e.g.
/// `from_pretrained(model_name)` where the identifier lives in an
/// assignment elsewhere in the file. Recovery is heuristic: a miss is
/// normal and never an error.
#[derive(Debug)]
pub struct NameRecovery {
    model_patterns: Vec<Regex>,
    from_pretrained: Regex,
    dataset_load: Regex,
}

/// Candidates that are clearly not model identifiers (URLs, data files,
/// filesystem paths).
const REJECT_SUBSTRINGS: &[&str] = &["http://", "https://", ".csv", ".json", ".txt", "path", "file"];

impl NameRecovery {
    /// Compiles the recovery patterns.
    ///
    /// # Errors
    /// Returns an error only if a static pattern fails to compile
    pub fn new() -> Result<Self> {
        let sources = [
            // model_name = "org/model"
            r#"(?:MODEL_NAME|model_name|model_id|MODEL_ID|model|checkpoint|CHECKPOINT)\s*=\s*["']([^"']+/[^"']+)["']"#,
            // model_name = "bert-base-uncased" style triples
            r#"(?:MODEL_NAME|model_name|model_id|MODEL_ID|model|checkpoint|CHECKPOINT)\s*=\s*["']([a-zA-Z]+-[a-zA-Z]+-[a-zA-Z]+)["']"#,
            // any literal from_pretrained argument
            r#"from_pretrained\s*\(\s*["']([^"']+)["']"#,
            // pipeline("task", model="...")
            r#"pipeline\s*\([^,]+,\s*model\s*=\s*["']([^"']+)["']"#,
            // pipeline("task", "org/model")
            r#"pipeline\s*\([^,]+,\s*["']([^"']+/[^"']+)["']"#,
        ];

        let mut model_patterns = Vec::with_capacity(sources.len());
        for source in sources {
            model_patterns
                .push(Regex::new(source).with_context(|| format!("invalid pattern: {}", source))?);
        }

        Ok(NameRecovery {
            model_patterns,
            from_pretrained: Regex::new(r#"from_pretrained\s*\(\s*["']([^"']+)["']"#)?,
            dataset_load: Regex::new(r#"load_dataset\s*\(\s*["']([^"']+)["']"#)?,
        })
    }

    /// Scans a whole file for a plausible model identifier.
    ///
    /// Patterns are tried in priority order; the first accepted candidate
    /// wins. URLs, data-file names and path-like strings are rejected.
    pub fn model_name_in_source(&self, source: &str) -> Option<String> {
        for pattern in &self.model_patterns {
            for caps in pattern.captures_iter(source) {
                if let Some(candidate) = caps.get(1) {
                    let candidate = candidate.as_str();
                    if Self::is_plausible_model_name(candidate) {
                        return Some(candidate.to_string());
                    }
                }
            }
        }
        None
    }

    /// Extracts a model name from one matched text fragment, if it contains
    /// a literal `from_pretrained` argument.
    pub fn model_name_in_text(&self, text: &str) -> Option<String> {
        self.from_pretrained
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|c| c.as_str().to_string())
    }

    /// Extracts a dataset name from one matched text fragment.
    pub fn dataset_name_in_text(&self, text: &str) -> Option<String> {
        self.dataset_load
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|c| c.as_str().to_string())
    }

    fn is_plausible_model_name(candidate: &str) -> bool {
        let lowered = candidate.to_lowercase();
        !REJECT_SUBSTRINGS.iter().any(|s| lowered.contains(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recovery() -> NameRecovery {
        NameRecovery::new().unwrap()
    }

    #[test]
    fn test_recovers_assigned_org_model() {
        let source = "MODEL_ID = \"facebook/bart-large\"\nmodel = AutoModel.from_pretrained(MODEL_ID)\n";
        assert_eq!(
            recovery().model_name_in_source(source).as_deref(),
            Some("facebook/bart-large")
        );
    }

    #[test]
    fn test_recovers_hyphenated_triple() {
        let source = "model_name = \"bert-base-uncased\"\n";
        assert_eq!(
            recovery().model_name_in_source(source).as_deref(),
            Some("bert-base-uncased")
        );
    }

    #[test]
    fn test_rejects_urls_and_data_files() {
        let source = "model = \"https://example.com/weights/model\"\ncheckpoint = \"data/output.csv\"\n";
        assert_eq!(recovery().model_name_in_source(source), None);
    }

    #[test]
    fn test_recovers_pipeline_model_kwarg() {
        let source = "clf = pipeline(\"ner\", model=\"dslim/bert-base-NER\")\n";
        assert_eq!(
            recovery().model_name_in_source(source).as_deref(),
            Some("dslim/bert-base-NER")
        );
    }

    #[test]
    fn test_model_name_in_text() {
        assert_eq!(
            recovery()
                .model_name_in_text(".from_pretrained(\"gpt2\")")
                .as_deref(),
            Some("gpt2")
        );
        assert_eq!(recovery().model_name_in_text(".from_pretrained(name)"), None);
    }

    #[test]
    fn test_dataset_name_in_text() {
        assert_eq!(
            recovery()
                .dataset_name_in_text("load_dataset(\"imdb\", split=\"train\")")
                .as_deref(),
            Some("imdb")
        );
        assert_eq!(recovery().dataset_name_in_text("load_dataset(variable)"), None);
    }
}
