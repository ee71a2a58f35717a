use crate::bom::{AiBom, DatasetComponent, DependencyComponent, ModelComponent};
use crate::ports::outbound::BomFormatter;
use crate::shared::Result;

/// Markdown table header for model information
const MODEL_TABLE_HEADER: &str = "| Model | Type | Provider | License | Detected in |\n";
const MODEL_TABLE_SEPARATOR: &str = "|-------|------|----------|---------|-------------|\n";

/// Markdown table header for dataset information
const DATASET_TABLE_HEADER: &str = "| Dataset | Type | License | GDPR | Detected in |\n";
const DATASET_TABLE_SEPARATOR: &str = "|---------|------|---------|------|-------------|\n";

/// Markdown table header for dependency information
const DEPENDENCY_TABLE_HEADER: &str = "| Package | Version | Manager | Source |\n";
const DEPENDENCY_TABLE_SEPARATOR: &str = "|---------|---------|---------|--------|\n";

/// MarkdownFormatter adapter for a human-readable AI-BOM summary
///
/// This adapter implements the BomFormatter port for Markdown format,
/// grouping the document into model, dataset and dependency sections.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn render_header(&self, output: &mut String, bom: &AiBom) {
        output.push_str(&format!("# {}\n\n", bom.name));
        output.push_str(&format!(
            "Generated {} by {}.\n\n",
            bom.created.format("%Y-%m-%d %H:%M UTC"),
            bom.creator
        ));
        if let Some(url) = &bom.repository_url {
            output.push_str(&format!("Repository: {}\n", url));
        }
        if let Some(commit) = &bom.repository_commit {
            output.push_str(&format!("Commit: `{}`\n", commit));
        }
        output.push('\n');
        output.push_str(&format!(
            "**{} models, {} datasets, {} dependencies ({} AI-related)**\n\n",
            bom.models.len(),
            bom.datasets.len(),
            bom.dependencies.len(),
            bom.dependencies.iter().filter(|d| d.is_ai_related).count()
        ));
    }

    fn render_models(&self, output: &mut String, models: &[ModelComponent]) {
        if models.is_empty() {
            return;
        }
        output.push_str("## Models\n\n");
        output.push_str(MODEL_TABLE_HEADER);
        output.push_str(MODEL_TABLE_SEPARATOR);
        for model in models {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_cell(&model.name),
                serde_plain_name(&model.model_type),
                Self::escape_cell(model.provider.as_deref().unwrap_or("-")),
                model.license,
                Self::escape_cell(&model.detected_in.join(", ")),
            ));
        }
        output.push('\n');
    }

    fn render_datasets(&self, output: &mut String, datasets: &[DatasetComponent]) {
        if datasets.is_empty() {
            return;
        }
        output.push_str("## Datasets\n\n");
        output.push_str(DATASET_TABLE_HEADER);
        output.push_str(DATASET_TABLE_SEPARATOR);
        for dataset in datasets {
            let gdpr = match dataset.gdpr_compliant {
                Some(true) => "yes",
                Some(false) => "no",
                None => "unverified",
            };
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::escape_cell(&dataset.name),
                serde_plain_name(&dataset.dataset_type),
                dataset.license,
                gdpr,
                Self::escape_cell(&dataset.detected_in.join(", ")),
            ));
        }
        output.push('\n');
    }

    fn render_dependencies(&self, output: &mut String, dependencies: &[DependencyComponent]) {
        let ai_related: Vec<&DependencyComponent> =
            dependencies.iter().filter(|d| d.is_ai_related).collect();
        if !ai_related.is_empty() {
            output.push_str("## AI-related dependencies\n\n");
            output.push_str(DEPENDENCY_TABLE_HEADER);
            output.push_str(DEPENDENCY_TABLE_SEPARATOR);
            for dep in &ai_related {
                output.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    Self::escape_cell(&dep.name),
                    Self::escape_cell(dep.version.as_deref().unwrap_or("-")),
                    dep.package_manager,
                    Self::escape_cell(dep.detected_in.as_deref().unwrap_or("-")),
                ));
            }
            output.push('\n');
        }
        let other = dependencies.len() - ai_related.len();
        if other > 0 {
            output.push_str(&format!(
                "{} further dependencies are not AI-related and are listed in the JSON document only.\n\n",
                other
            ));
        }
    }

    fn render_scan_notes(&self, output: &mut String, bom: &AiBom) {
        let Some(scan) = bom.metadata.get("scan_results") else {
            return;
        };
        output.push_str("## Scan notes\n\n");
        if let Some(files) = scan.get("files_scanned").and_then(|v| v.as_u64()) {
            output.push_str(&format!("- Files scanned: {}\n", files));
        }
        if let Some(detections) = scan.get("total_detections").and_then(|v| v.as_u64()) {
            output.push_str(&format!("- Detections: {}\n", detections));
        }
        if let Some(skipped) = scan.get("skipped_files").and_then(|v| v.as_array()) {
            if !skipped.is_empty() {
                output.push_str(&format!(
                    "- Skipped {} file(s) over the size limit\n",
                    skipped.len()
                ));
            }
        }
        output.push('\n');
    }
}

/// Snake_case serde tag of a unit enum variant, for table cells.
fn serde_plain_name<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_default()
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BomFormatter for MarkdownFormatter {
    fn format(&self, bom: &AiBom) -> Result<String> {
        let mut output = String::new();
        self.render_header(&mut output, bom);
        self.render_models(&mut output, &bom.models);
        self.render_datasets(&mut output, &bom.datasets);
        self.render_dependencies(&mut output, &bom.dependencies);
        self.render_scan_notes(&mut output, bom);
        Ok(output)
    }
}
