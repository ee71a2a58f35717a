use crate::bom::AiBom;
use crate::compliance::requirements::{GpaiAssessment, GpaiRole, GpaiType};

/// General-purpose AI detection: recognizes hosted foundation models by
/// provider name or model identifier.
#[derive(Debug, Default)]
pub struct GpaiValidator;

/// Known GPAI providers and the model-name fragments that identify them.
const GPAI_PROVIDERS: &[(&str, &[&str])] = &[
    (
        "openai",
        &["gpt-3.5", "gpt-4", "gpt-4-turbo", "text-embedding", "dall-e"],
    ),
    ("anthropic", &["claude-3", "claude-2", "claude-instant"]),
    ("google", &["gemini", "palm", "bard"]),
    ("meta", &["llama", "llama-2", "llama-3"]),
    ("mistral", &["mistral", "mixtral"]),
    ("cohere", &["command", "embed"]),
];

/// Model names that carry systemic-risk designation.
const SYSTEMIC_RISK_MODELS: &[&str] = &["gpt-4", "claude-3-opus", "gemini-ultra", "llama-3-405b"];

impl GpaiValidator {
    pub fn new() -> Self {
        GpaiValidator
    }

    /// Returns `None` when no GPAI usage is found; otherwise the
    /// assessment with every attestation defaulting to false.
    pub fn assess(&self, bom: &AiBom) -> Option<GpaiAssessment> {
        let mut providers = Vec::new();
        let mut matched_names = Vec::new();

        for model in &bom.models {
            let name = model.name.to_lowercase();
            let provider_field = model
                .provider
                .as_deref()
                .unwrap_or_default()
                .to_lowercase();

            for (provider, patterns) in GPAI_PROVIDERS {
                let provider_hit = provider_field.contains(provider);
                let name_hit = patterns.iter().any(|p| name.contains(p));
                if provider_hit || name_hit {
                    if !providers.contains(&provider.to_string()) {
                        providers.push(provider.to_string());
                    }
                    matched_names.push(name.clone());
                }
            }
        }

        if providers.is_empty() {
            return None;
        }

        let all_names = matched_names.join(" ");
        let gpai_type = if ["gpt", "claude", "llama", "palm", "gemini", "command"]
            .iter()
            .any(|k| all_names.contains(k))
        {
            GpaiType::Llm
        } else if ["dall-e", "stable-diffusion", "midjourney", "whisper", "audio"]
            .iter()
            .any(|k| all_names.contains(k))
        {
            GpaiType::Vision
        } else if all_names.contains("embed") {
            GpaiType::Embedding
        } else if all_names.contains("codex") || all_names.contains("code") {
            GpaiType::CodeGeneration
        } else {
            GpaiType::Other
        };

        // Provider matches come from scanned model components, so the
        // audited repository always consumes the model rather than
        // publishing it.
        let user_role = GpaiRole::Deployer;

        let systemic_risk = matched_names
            .iter()
            .any(|name| SYSTEMIC_RISK_MODELS.iter().any(|m| name.contains(m)));

        Some(GpaiAssessment {
            providers,
            gpai_type,
            user_role,
            systemic_risk,
            // Attestations require human input, absent here by definition
            transparency_info_provided_to_users: false,
            ai_generated_content_disclosed: false,
            upstream_provider_compliance_verified: false,
            intended_use_documented: false,
            downstream_risk_assessment_performed: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::{LicenseType, ModelComponent, ModelType};

    fn bom_with_model(name: &str, provider: Option<&str>) -> AiBom {
        let mut bom = AiBom::new("fixture");
        bom.models.push(ModelComponent {
            name: name.to_string(),
            version: None,
            model_type: ModelType::Llm,
            provider: provider.map(|p| p.to_string()),
            api_endpoint: None,
            license: LicenseType::Unknown,
            source_location: None,
            parameters: None,
            detected_in: vec![],
            detection_locations: vec![],
            usage_context: None,
        });
        bom
    }

    #[test]
    fn test_no_models_no_gpai() {
        assert!(GpaiValidator::new().assess(&AiBom::new("fixture")).is_none());
    }

    #[test]
    fn test_plain_hf_model_is_not_gpai() {
        let bom = bom_with_model("bert-base-uncased", Some("HuggingFace"));
        assert!(GpaiValidator::new().assess(&bom).is_none());
    }

    #[test]
    fn test_openai_provider_detected_as_deployer() {
        let bom = bom_with_model("OpenAI API Model", Some("OpenAI"));
        let gpai = GpaiValidator::new().assess(&bom).unwrap();
        assert_eq!(gpai.providers, vec!["openai"]);
        assert_eq!(gpai.user_role, GpaiRole::Deployer);
        assert!(!gpai.compliant_as_deployer());
    }

    #[test]
    fn test_gpt4_name_flags_systemic_risk() {
        let bom = bom_with_model("gpt-4-turbo", Some("OpenAI"));
        let gpai = GpaiValidator::new().assess(&bom).unwrap();
        assert!(gpai.systemic_risk);
        assert_eq!(gpai.gpai_type, GpaiType::Llm);
    }

    #[test]
    fn test_llama_matched_by_name_without_provider() {
        let bom = bom_with_model("meta-llama/Llama-2-7b-hf", Some("HuggingFace"));
        let gpai = GpaiValidator::new().assess(&bom).unwrap();
        assert_eq!(gpai.providers, vec!["meta"]);
        assert!(!gpai.systemic_risk);
    }

    #[test]
    fn test_embedding_model_typed_as_embedding() {
        let bom = bom_with_model("text-embedding-3-small", Some("OpenAI"));
        let gpai = GpaiValidator::new().assess(&bom).unwrap();
        assert_eq!(gpai.gpai_type, GpaiType::Embedding);
    }
}
