use crate::detection::intent::DetectionIntent;
use crate::detection::language::Language;
use crate::shared::Result;
use anyhow::Context;
use regex::Regex;

/// What the first capture group of a pattern means, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    None,
    /// Hugging Face style model identifier (`"bert-base-uncased"`)
    ModelName,
    /// Dataset identifier from `load_dataset("...")`
    DatasetName,
    /// Imported library/module name
    LibraryName,
    /// Estimator or chain class name (`RandomForestClassifier`, `ChatOpenAI`)
    ClassName,
}

/// One compiled pattern, applied line by line.
#[derive(Debug)]
pub struct Pattern {
    pub intent: DetectionIntent,
    pub regex: Regex,
    pub capture: CaptureKind,
}

/// Compiled pattern set for one language, kept in a fixed order so match
/// output is deterministic.
#[derive(Debug)]
pub struct PatternSet {
    pub language: Language,
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Compiles the pattern set for a language.
    ///
    /// # Errors
    /// Returns an error if any pattern fails to compile; the tables are
    /// static so this only fires on a programming mistake.
    pub fn for_language(language: Language) -> Result<Self> {
        let table: &[(DetectionIntent, &str, CaptureKind)] = match language {
            Language::Python => PYTHON_PATTERNS,
            Language::JavaScript => JAVASCRIPT_PATTERNS,
        };

        let mut patterns = Vec::with_capacity(table.len());
        for (intent, source, capture) in table {
            let regex = Regex::new(source)
                .with_context(|| format!("invalid pattern for {}: {}", intent, source))?;
            patterns.push(Pattern {
                intent: *intent,
                regex,
                capture: *capture,
            });
        }

        Ok(PatternSet { language, patterns })
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

/// Python patterns, in evaluation order. Order matters: the BOM generator
/// dedups on first occurrence, so named Hugging Face matches must come
/// before the bare `from_pretrained` catch-all.
const PYTHON_PATTERNS: &[(DetectionIntent, &str, CaptureKind)] = &[
    (
        DetectionIntent::OpenAiClient,
        r"\bopenai\.\w+(?:\.\w+)*\s*\(",
        CaptureKind::None,
    ),
    (
        DetectionIntent::AnthropicClient,
        r"\banthropic\.\w+(?:\.\w+)*\s*\(",
        CaptureKind::None,
    ),
    (
        DetectionIntent::MlLibraryImport,
        r"^\s*import\s+(torch|tensorflow|keras|sklearn|transformers|huggingface|pytorch|sentence_transformers)\b",
        CaptureKind::LibraryName,
    ),
    (
        DetectionIntent::AiLibraryImport,
        r"^\s*import\s+(openai|anthropic|cohere|replicate|langchain|llama_index|haystack|ollama|vllm|mlflow|together|groq|fireworks|mistralai|google\.generativeai|vertexai)\b",
        CaptureKind::LibraryName,
    ),
    (
        DetectionIntent::AiFromImport,
        r"^\s*from\s+(openai|anthropic|transformers|langchain|sentence_transformers|ollama|vllm|torch|tensorflow|sklearn|huggingface_hub)\b",
        CaptureKind::LibraryName,
    ),
    (
        DetectionIntent::ModelCall,
        r"\.(predict|generate|forward|inference|embed|encode|decode|complete|chat)\s*\(",
        CaptureKind::None,
    ),
    (
        DetectionIntent::HuggingfaceModel,
        r#"\.from_pretrained\s*\(\s*["']([^"']+)["']"#,
        CaptureKind::ModelName,
    ),
    (
        DetectionIntent::HuggingfaceAutoClasses,
        r"\b(AutoModelForSequenceClassification|AutoModelForCausalLM|AutoModelForTokenClassification|AutoModelForQuestionAnswering|AutoModelForMaskedLM|AutoModel|AutoTokenizer|AutoConfig|AutoFeatureExtractor|AutoProcessor)\s*\.\s*from_pretrained\s*\(",
        CaptureKind::ClassName,
    ),
    (
        DetectionIntent::FromPretrainedAny,
        r"\.from_pretrained\s*\(",
        CaptureKind::None,
    ),
    (
        DetectionIntent::HuggingfacePipeline,
        r"(?:^|[^\w.])pipeline\s*\(",
        CaptureKind::None,
    ),
    (
        DetectionIntent::DatasetLoad,
        r#"\bload_dataset\s*\(\s*["']([^"']+)["']"#,
        CaptureKind::DatasetName,
    ),
    (
        DetectionIntent::Training,
        r"\.(fit|train|train_step|training_step)\s*\(",
        CaptureKind::None,
    ),
    (
        DetectionIntent::SklearnModel,
        r"\b(RandomForest\w*|GradientBoosting\w*|LogisticRegression|SVC|SVR|KNeighbors\w*|DecisionTree\w*|AdaBoost\w*|XGB\w*|LGBM\w*|CatBoost\w*|LinearRegression|Ridge|Lasso|ElasticNet|KMeans|DBSCAN|IsolationForest|PCA|StandardScaler|MinMaxScaler)\s*\(",
        CaptureKind::ClassName,
    ),
    (
        DetectionIntent::Langchain,
        r"\b(ChatOpenAI|ChatAnthropic|OpenAI|Anthropic|LLMChain|ConversationChain|RetrievalQA|AgentExecutor)\s*\(",
        CaptureKind::ClassName,
    ),
    (
        DetectionIntent::PandasData,
        r"\bpd\.(read_csv|read_json|read_parquet|read_excel|read_sql)\s*\(",
        CaptureKind::None,
    ),
    (
        DetectionIntent::TorchDataloader,
        r"\.(DataLoader|Dataset)\s*\(",
        CaptureKind::None,
    ),
];

/// JavaScript / TypeScript patterns, in evaluation order.
const JAVASCRIPT_PATTERNS: &[(DetectionIntent, &str, CaptureKind)] = &[
    (
        DetectionIntent::AiLibraryImportJs,
        r#"^\s*import\b[^;]*?\bfrom\s+["']((?:@openai|@anthropic-ai|@cohere|langchain|@huggingface)[^"']*)["']"#,
        CaptureKind::LibraryName,
    ),
    (
        DetectionIntent::AiLibraryRequire,
        r#"\brequire\s*\(\s*["']((?:@openai|@anthropic|openai|anthropic)[^"']*)["']\s*\)"#,
        CaptureKind::LibraryName,
    ),
    (
        DetectionIntent::AiApiCall,
        r"\.(createChatCompletion|createCompletion|createEmbedding)\s*\(|\bmessages\.create\s*\(",
        CaptureKind::None,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn python_set() -> PatternSet {
        PatternSet::for_language(Language::Python).unwrap()
    }

    fn js_set() -> PatternSet {
        PatternSet::for_language(Language::JavaScript).unwrap()
    }

    fn find<'a>(set: &'a PatternSet, intent: DetectionIntent) -> &'a Pattern {
        set.patterns()
            .iter()
            .find(|p| p.intent == intent)
            .unwrap()
    }

    #[test]
    fn test_all_pattern_tables_compile() {
        assert_eq!(python_set().patterns().len(), 16);
        assert_eq!(js_set().patterns().len(), 3);
    }

    #[test]
    fn test_huggingface_model_captures_name() {
        let set = python_set();
        let pattern = find(&set, DetectionIntent::HuggingfaceModel);
        let caps = pattern
            .regex
            .captures(r#"model = AutoModel.from_pretrained("bert-base-uncased")"#)
            .unwrap();
        assert_eq!(&caps[1], "bert-base-uncased");
        assert_eq!(pattern.capture, CaptureKind::ModelName);
    }

    #[test]
    fn test_from_pretrained_any_matches_variable_argument() {
        let set = python_set();
        let pattern = find(&set, DetectionIntent::FromPretrainedAny);
        assert!(pattern.regex.is_match("tok = AutoTokenizer.from_pretrained(model_name)"));
        // The named variant must not match when the argument is not a literal
        let named = find(&set, DetectionIntent::HuggingfaceModel);
        assert!(!named.regex.is_match("tok = AutoTokenizer.from_pretrained(model_name)"));
    }

    #[test]
    fn test_named_hf_pattern_precedes_catch_all() {
        let set = python_set();
        let named_pos = set
            .patterns()
            .iter()
            .position(|p| p.intent == DetectionIntent::HuggingfaceModel)
            .unwrap();
        let any_pos = set
            .patterns()
            .iter()
            .position(|p| p.intent == DetectionIntent::FromPretrainedAny)
            .unwrap();
        assert!(named_pos < any_pos);
    }

    #[test]
    fn test_openai_client_call() {
        let set = python_set();
        let pattern = find(&set, DetectionIntent::OpenAiClient);
        assert!(pattern.regex.is_match("resp = openai.ChatCompletion.create(model=m)"));
        assert!(!pattern.regex.is_match("import openai"));
    }

    #[test]
    fn test_ml_library_import_captures_library() {
        let set = python_set();
        let pattern = find(&set, DetectionIntent::MlLibraryImport);
        let caps = pattern.regex.captures("import torch").unwrap();
        assert_eq!(&caps[1], "torch");
        assert!(pattern.regex.is_match("import tensorflow as tf"));
        assert!(!pattern.regex.is_match("import os"));
    }

    #[test]
    fn test_ai_from_import() {
        let set = python_set();
        let pattern = find(&set, DetectionIntent::AiFromImport);
        let caps = pattern
            .regex
            .captures("from transformers import AutoModel")
            .unwrap();
        assert_eq!(&caps[1], "transformers");
        assert!(!pattern.regex.is_match("from pathlib import Path"));
    }

    #[test]
    fn test_dataset_load_requires_string_literal() {
        let set = python_set();
        let pattern = find(&set, DetectionIntent::DatasetLoad);
        let caps = pattern
            .regex
            .captures(r#"ds = load_dataset("imdb", split="train")"#)
            .unwrap();
        assert_eq!(&caps[1], "imdb");
        assert!(!pattern.regex.is_match("ds = load_dataset(name)"));
    }

    #[test]
    fn test_sklearn_class_capture() {
        let set = python_set();
        let pattern = find(&set, DetectionIntent::SklearnModel);
        let caps = pattern
            .regex
            .captures("clf = RandomForestClassifier(n_estimators=100)")
            .unwrap();
        assert_eq!(&caps[1], "RandomForestClassifier");
        assert!(pattern.regex.is_match("scaler = StandardScaler()"));
    }

    #[test]
    fn test_langchain_chat_class() {
        let set = python_set();
        let pattern = find(&set, DetectionIntent::Langchain);
        let caps = pattern
            .regex
            .captures("llm = ChatOpenAI(temperature=0)")
            .unwrap();
        assert_eq!(&caps[1], "ChatOpenAI");
    }

    #[test]
    fn test_pipeline_does_not_match_attribute_access() {
        let set = python_set();
        let pattern = find(&set, DetectionIntent::HuggingfacePipeline);
        assert!(pattern.regex.is_match(r#"clf = pipeline("sentiment-analysis")"#));
        assert!(!pattern.regex.is_match("result = sklearn.pipeline(steps)"));
    }

    #[test]
    fn test_js_import_capture() {
        let set = js_set();
        let pattern = find(&set, DetectionIntent::AiLibraryImportJs);
        let caps = pattern
            .regex
            .captures(r#"import OpenAI from "openai-lib";"#);
        assert!(caps.is_none());
        let caps = pattern
            .regex
            .captures(r#"import Anthropic from "@anthropic-ai/sdk";"#)
            .unwrap();
        assert_eq!(&caps[1], "@anthropic-ai/sdk");
    }

    #[test]
    fn test_js_require_capture() {
        let set = js_set();
        let pattern = find(&set, DetectionIntent::AiLibraryRequire);
        let caps = pattern
            .regex
            .captures(r#"const { OpenAI } = require("openai");"#)
            .unwrap();
        assert_eq!(&caps[1], "openai");
    }

    #[test]
    fn test_js_api_call() {
        let set = js_set();
        let pattern = find(&set, DetectionIntent::AiApiCall);
        assert!(pattern.regex.is_match("await client.createChatCompletion({})"));
        assert!(pattern.regex.is_match("await anthropic.messages.create({})"));
        assert!(!pattern.regex.is_match("await client.get(url)"));
    }
}
