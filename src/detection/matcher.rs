use crate::detection::intent::DetectionIntent;
use crate::detection::language::Language;
use crate::detection::patterns::{CaptureKind, PatternSet};
use crate::shared::Result;

/// A single structural match inside one source file.
///
/// Lines and columns are 1-indexed; `end_column` is exclusive. Matches never
/// span lines, so `end_line == line`.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionMatch {
    pub intent: DetectionIntent,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    /// The matched text itself (not the whole line)
    pub text: String,
    /// Typed capture (model name, dataset name, library, class), if the
    /// pattern defines one
    pub capture: Option<String>,
    pub capture_kind: CaptureKind,
}

/// Applies the per-language pattern sets to source text.
///
/// Pattern sets are compiled once at construction; matching itself is
/// infallible and allocation is bounded by the number of matches.
#[derive(Debug)]
pub struct PatternMatcher {
    python: PatternSet,
    javascript: PatternSet,
}

impl PatternMatcher {
    /// Compiles both pattern sets.
    ///
    /// # Errors
    /// Returns an error only if a static pattern fails to compile
    pub fn new() -> Result<Self> {
        Ok(PatternMatcher {
            python: PatternSet::for_language(Language::Python)?,
            javascript: PatternSet::for_language(Language::JavaScript)?,
        })
    }

    /// Runs every pattern for `language` over `source`.
    ///
    /// Patterns are evaluated in their fixed table order and, within a
    /// pattern, in source order, so output is deterministic for identical
    /// input. A line can contribute several matches across patterns.
    ///
    /// # Returns
    /// All matches found; empty when nothing matched
    pub fn matches_in(&self, language: Language, source: &str) -> Vec<DetectionMatch> {
        let set = match language {
            Language::Python => &self.python,
            Language::JavaScript => &self.javascript,
        };

        let mut matches = Vec::new();
        for pattern in set.patterns() {
            for (line_idx, line) in source.lines().enumerate() {
                for caps in pattern.regex.captures_iter(line) {
                    // Group 0 always exists for a successful match
                    let Some(whole) = caps.get(0) else { continue };
                    // Alternation groups in captureless patterns must not
                    // surface as names
                    let capture = if pattern.capture == CaptureKind::None {
                        None
                    } else {
                        caps.get(1).map(|c| c.as_str().to_string())
                    };
                    matches.push(DetectionMatch {
                        intent: pattern.intent,
                        line: line_idx + 1,
                        column: whole.start() + 1,
                        end_line: line_idx + 1,
                        end_column: whole.end() + 1,
                        text: whole.as_str().to_string(),
                        capture,
                        capture_kind: pattern.capture,
                    });
                }
            }
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> PatternMatcher {
        PatternMatcher::new().unwrap()
    }

    #[test]
    fn test_empty_source_yields_no_matches() {
        let matches = matcher().matches_in(Language::Python, "");
        assert!(matches.is_empty());
    }

    #[test]
    fn test_plain_code_yields_no_matches() {
        let source = "import os\n\ndef main():\n    print('hello')\n";
        let matches = matcher().matches_in(Language::Python, source);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_line_and_column_are_one_indexed() {
        let source = "import os\nimport torch\n";
        let matches = matcher().matches_in(Language::Python, source);
        assert_eq!(matches.len(), 1);
        let m = &matches[0];
        assert_eq!(m.intent, DetectionIntent::MlLibraryImport);
        assert_eq!(m.line, 2);
        assert_eq!(m.column, 1);
        assert_eq!(m.end_line, 2);
        assert_eq!(m.capture.as_deref(), Some("torch"));
    }

    #[test]
    fn test_from_pretrained_literal_hits_named_and_catch_all() {
        let source = r#"model = AutoModel.from_pretrained("gpt2")"#;
        let matches = matcher().matches_in(Language::Python, source);
        let intents: Vec<_> = matches.iter().map(|m| m.intent).collect();
        assert!(intents.contains(&DetectionIntent::HuggingfaceModel));
        assert!(intents.contains(&DetectionIntent::FromPretrainedAny));
        assert!(intents.contains(&DetectionIntent::HuggingfaceAutoClasses));

        // The named match must precede the catch-all, dedup relies on it
        let named_pos = intents
            .iter()
            .position(|i| *i == DetectionIntent::HuggingfaceModel)
            .unwrap();
        let any_pos = intents
            .iter()
            .position(|i| *i == DetectionIntent::FromPretrainedAny)
            .unwrap();
        assert!(named_pos < any_pos);
    }

    #[test]
    fn test_matches_are_deterministic() {
        let source = "import torch\nmodel.fit(x, y)\nds = load_dataset(\"imdb\")\n";
        let first = matcher().matches_in(Language::Python, source);
        let second = matcher().matches_in(Language::Python, source);
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_pattern_source_order_within_file() {
        let source = "a.predict(x)\nb.predict(y)\n";
        let matches = matcher().matches_in(Language::Python, source);
        let lines: Vec<_> = matches
            .iter()
            .filter(|m| m.intent == DetectionIntent::ModelCall)
            .map(|m| m.line)
            .collect();
        assert_eq!(lines, vec![1, 2]);
    }

    #[test]
    fn test_javascript_patterns_apply_to_typescript() {
        let source = r#"const anthropic = require("anthropic");"#;
        let matches = matcher().matches_in(Language::JavaScript, source);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].intent, DetectionIntent::AiLibraryRequire);
        assert_eq!(matches[0].capture.as_deref(), Some("anthropic"));
    }

    #[test]
    fn test_captureless_patterns_carry_no_capture() {
        let source = "df = pd.read_csv(path)\nloader = torch.utils.data.DataLoader(ds)\n";
        let matches = matcher().matches_in(Language::Python, source);
        let pandas = matches
            .iter()
            .find(|m| m.intent == DetectionIntent::PandasData)
            .unwrap();
        assert_eq!(pandas.capture_kind, CaptureKind::None);
        assert_eq!(pandas.capture, None);
        let loader = matches
            .iter()
            .find(|m| m.intent == DetectionIntent::TorchDataloader)
            .unwrap();
        assert_eq!(loader.capture, None);
    }

    #[test]
    fn test_capture_kind_is_carried() {
        let source = r#"ds = load_dataset("squad")"#;
        let matches = matcher().matches_in(Language::Python, source);
        let m = matches
            .iter()
            .find(|m| m.intent == DetectionIntent::DatasetLoad)
            .unwrap();
        assert_eq!(m.capture_kind, CaptureKind::DatasetName);
        assert_eq!(m.capture.as_deref(), Some("squad"));
    }
}
