// Rendering and plain-text export of a prediction result

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::errors::{AdvisorError, AdvisorResult};
use crate::prediction_service::PredictionResult;

pub const EXPORT_FILE_NAME: &str = "crop_prediction.txt";
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// Recommendations shown with every result, independent of crop and inputs
pub const ADVICE_LINES: [&str; 3] = [
    "Ensure proper irrigation and soil fertility.",
    "Maintain correct pH value and nutrient balance.",
    "Monitor rainfall & humidity for better growth.",
];

/// Shorter wording used in the downloadable file
const EXPORT_ADVICE_LINES: [&str; 3] = [
    "Ensure proper irrigation and soil fertility.",
    "Maintain correct pH and nutrients.",
    "Monitor rainfall & humidity.",
];

/// The bullet list attached to every prediction
pub fn advice_text() -> String {
    ADVICE_LINES
        .iter()
        .map(|line| format!("• {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportPayload {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub content: String,
}

/// On-screen result block
pub fn render_display(result: &PredictionResult) -> String {
    format!(
        "🌱 Recommended Crop: {}\n\n📝 Suggestions:\n{}\n",
        result.crop_label, result.advice_text
    )
}

pub fn render_export(result: &PredictionResult) -> ExportPayload {
    let suggestions = EXPORT_ADVICE_LINES
        .iter()
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n");

    ExportPayload {
        file_name: EXPORT_FILE_NAME,
        mime_type: EXPORT_MIME_TYPE,
        content: format!(
            "Recommended Crop: {}\n\nSuggestions:\n{}",
            result.crop_label, suggestions
        ),
    }
}

/// Write the payload into `dir` under its fixed file name
pub fn write_export(payload: &ExportPayload, dir: &Path) -> AdvisorResult<PathBuf> {
    if !dir.is_dir() {
        fs::create_dir_all(dir)
            .map_err(|e| AdvisorError::io(format!("creating {}", dir.display()), e))?;
    }

    let path = dir.join(payload.file_name);
    fs::write(&path, &payload.content)
        .map_err(|e| AdvisorError::io(format!("writing {}", path.display()), e))?;

    info!(path = %path.display(), "Prediction exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_for(crop: &str) -> PredictionResult {
        PredictionResult {
            class_id: 0,
            crop_label: crop.to_string(),
            advice_text: advice_text(),
        }
    }

    #[test]
    fn test_export_content_is_exact() {
        let payload = render_export(&result_for("Rice"));
        assert_eq!(payload.file_name, "crop_prediction.txt");
        assert_eq!(payload.mime_type, "text/plain");
        assert_eq!(
            payload.content,
            "Recommended Crop: Rice\n\nSuggestions:\n- Ensure proper irrigation and soil fertility.\n- Maintain correct pH and nutrients.\n- Monitor rainfall & humidity."
        );
    }

    #[test]
    fn test_export_only_substitutes_crop_name() {
        let rice = render_export(&result_for("Rice")).content;
        let jute = render_export(&result_for("Jute")).content;
        assert_eq!(rice.replacen("Rice", "Jute", 1), jute);
    }

    #[test]
    fn test_display_block() {
        let display = render_display(&result_for("Mango"));
        assert!(display.starts_with("🌱 Recommended Crop: Mango\n"));
        assert!(display.contains("• Maintain correct pH value and nutrient balance."));
    }

    #[test]
    fn test_write_export_creates_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let target = dir.path().join("out");
        let payload = render_export(&result_for("Coffee"));

        let path = write_export(&payload, &target).expect("export should be written");
        assert_eq!(path.file_name().unwrap(), "crop_prediction.txt");
        assert_eq!(fs::read_to_string(path).unwrap(), payload.content);
    }
}
