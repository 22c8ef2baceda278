use crate::rules::NormalRange;

/// Message template builder for findings and immediate actions. One place
/// owns the wording so reports stay consistent and testable.
pub struct MessageTemplates;

impl MessageTemplates {
    /// "Hemoglobin: 14.2 g/dL (Normal)"
    pub fn quantitative_normal(name: &str, value: f64, unit: &str) -> String {
        format!("{name}: {value} {unit} (Normal)")
    }

    /// "Hemoglobin: 12.8 g/dL (LOW - Normal: 13.5-17.5) - Anemia detected"
    pub fn quantitative_low(
        name: &str,
        value: f64,
        unit: &str,
        normal: &NormalRange,
        note: Option<&str>,
    ) -> String {
        let base = format!(
            "{name}: {value} {unit} (LOW - Normal: {}-{})",
            normal.min, normal.max
        );
        match note {
            Some(note) => format!("{base} - {note}"),
            None => base,
        }
    }

    /// "Triglycerides: 620 mg/dL (HIGH - Normal: 0-150) - High triglycerides..."
    pub fn quantitative_high(
        name: &str,
        value: f64,
        unit: &str,
        normal: &NormalRange,
        note: Option<&str>,
    ) -> String {
        let base = format!(
            "{name}: {value} {unit} (HIGH - Normal: {}-{})",
            normal.min, normal.max
        );
        match note {
            Some(note) => format!("{base} - {note}"),
            None => base,
        }
    }

    /// "Urine Protein: NEGATIVE"
    pub fn qualitative_normal(name: &str, token: &str) -> String {
        format!("{name}: {}", token.to_uppercase())
    }

    /// "Urine Protein: POSITIVE - Proteinuria detected - Kidney issue"
    pub fn qualitative_abnormal(name: &str, token: &str, note: &str) -> String {
        format!("{name}: {} - {note}", token.to_uppercase())
    }
}

/// Immediate actions when any critical-tier finding is present.
pub const CRITICAL_ACTIONS: &[&str] = &[
    "URGENT: Consult your doctor immediately - critical values detected",
    "Contact emergency services if experiencing severe symptoms",
];

/// Immediate actions when the worst tier present is high.
pub const HIGH_ACTIONS: &[&str] = &[
    "Schedule a doctor appointment within 24-48 hours",
    "Bring this report to your healthcare provider",
];

/// Immediate actions when every detected test came back normal.
pub const ALL_NORMAL_ACTIONS: &[&str] = &[
    "All results normal - continue current health routine",
    "Schedule your next check-up as per your doctor's recommendation",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: f64, max: f64) -> NormalRange {
        NormalRange {
            min,
            max,
            unit: "mg/dL".into(),
        }
    }

    #[test]
    fn normal_message_shape() {
        let msg = MessageTemplates::quantitative_normal("Glucose", 95.0, "mg/dL");
        assert_eq!(msg, "Glucose: 95 mg/dL (Normal)");
    }

    #[test]
    fn low_message_includes_range_and_note() {
        let msg = MessageTemplates::quantitative_low(
            "Hemoglobin",
            12.8,
            "g/dL",
            &range(13.5, 17.5),
            Some("Anemia detected"),
        );
        assert_eq!(
            msg,
            "Hemoglobin: 12.8 g/dL (LOW - Normal: 13.5-17.5) - Anemia detected"
        );
    }

    #[test]
    fn high_message_without_note_has_no_trailing_dash() {
        let msg = MessageTemplates::quantitative_high("LDL", 130.0, "mg/dL", &range(0.0, 100.0), None);
        assert_eq!(msg, "LDL: 130 mg/dL (HIGH - Normal: 0-100)");
        assert!(!msg.ends_with('-'));
    }

    #[test]
    fn qualitative_messages_uppercase_token() {
        assert_eq!(
            MessageTemplates::qualitative_normal("Urine Protein", "negative"),
            "Urine Protein: NEGATIVE"
        );
        assert_eq!(
            MessageTemplates::qualitative_abnormal("Urine Protein", "trace", "Proteinuria"),
            "Urine Protein: TRACE - Proteinuria"
        );
    }

    #[test]
    fn action_sets_are_distinct() {
        let all: Vec<&str> = CRITICAL_ACTIONS
            .iter()
            .chain(HIGH_ACTIONS)
            .chain(ALL_NORMAL_ACTIONS)
            .copied()
            .collect();
        let mut dedup = all.clone();
        dedup.sort_unstable();
        dedup.dedup();
        assert_eq!(all.len(), dedup.len());
    }
}
