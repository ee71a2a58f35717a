use crate::bom::component::ModelType;

/// Keyword tables for model-type inference. Checked in priority order:
/// language models first, then vision, then embeddings.
const LLM_KEYWORDS: &[&str] = &[
    "bert", "gpt", "llama", "mistral", "falcon", "gemma", "phi", "qwen", "t5", "bart", "roberta",
];

const VISION_KEYWORDS: &[&str] = &["vit", "resnet", "clip", "dino", "sam", "yolo", "detr"];

const EMBEDDING_KEYWORDS: &[&str] = &["embed", "sentence-transformer", "all-minilm", "bge", "e5"];

/// Infers the model family from its identifier.
///
/// Matching is a case-insensitive substring test against fixed keyword
/// tables; anything unrecognized is `Custom`.
pub fn infer_model_type(name: &str) -> ModelType {
    let lowered = name.to_lowercase();
    if LLM_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        ModelType::Llm
    } else if VISION_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        ModelType::Vision
    } else if EMBEDDING_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        ModelType::Embedding
    } else {
        ModelType::Custom
    }
}
