use super::types::{InputWarning, ScannedDocument};

/// OCR confidence thresholds shared with callers surfacing input quality.
pub mod thresholds {
    /// Below this: recognition likely failed outright.
    pub const VERY_LOW: f32 = 0.30;

    /// Below this: significant uncertainty; findings should be double-checked
    /// against the source image.
    pub const LOW: f32 = 0.50;

    /// Below this: some uncertainty.
    pub const MODERATE: f32 = 0.70;

    /// Above this: high confidence.
    pub const HIGH: f32 = 0.85;
}

/// Minimum characters a lab report plausibly contains.
const SPARSE_TEXT_CHARS: usize = 40;

/// Judge input quality from the OCR confidence and text volume. Warnings
/// annotate trust in the source; findings are computed regardless.
pub fn assess_input(document: &ScannedDocument) -> Vec<InputWarning> {
    let mut warnings = Vec::new();

    if document.confidence < thresholds::VERY_LOW {
        warnings.push(InputWarning::UnreadableScan {
            confidence: document.confidence,
        });
    } else if document.confidence < thresholds::LOW {
        warnings.push(InputWarning::LowConfidence {
            confidence: document.confidence,
        });
    }

    let chars = document.text.trim().chars().count();
    if chars > 0 && chars < SPARSE_TEXT_CHARS {
        warnings.push(InputWarning::SparseText { chars });
    }

    warnings
}
