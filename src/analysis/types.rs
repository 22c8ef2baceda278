use serde::{Deserialize, Serialize};

use crate::rules::{ConditionFamily, Severity};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Where a reading sits relative to its reference. Quantitative readings are
/// `Low`/`High`; qualitative readings that miss the normal token are
/// `Abnormal`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Normal,
    Low,
    High,
    Abnormal,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Low => "low",
            Self::High => "high",
            Self::Abnormal => "abnormal",
        }
    }
}

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// Raw value extracted for one parameter. Numeric for quantitative rules,
/// a lower-cased token for qualitative ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ObservedValue {
    Numeric(f64),
    Token(String),
}

/// One extraction result: at most one per rule per analysis, created fresh
/// per call and never persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub parameter: String,
    pub value: ObservedValue,
}

// ---------------------------------------------------------------------------
// Finding
// ---------------------------------------------------------------------------

/// A classified observation. Field shape mirrors how lab results are stored
/// downstream: numeric value and unit for quantitative readings, text value
/// for qualitative ones.
///
/// Invariant: `status == Normal` exactly when `severity == None`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Finding {
    pub parameter: String,
    pub value: Option<f64>,
    pub value_text: Option<String>,
    pub unit: Option<String>,
    pub status: Status,
    pub severity: Severity,
    pub family: Option<ConditionFamily>,
    pub message: String,
}

impl Finding {
    pub fn is_normal(&self) -> bool {
        self.status == Status::Normal
    }
}

// ---------------------------------------------------------------------------
// TierBuckets
// ---------------------------------------------------------------------------

/// Findings bucketed by severity tier, insertion order preserved (rule
/// declaration order, not magnitude).
#[derive(Debug, Clone, Default)]
pub struct TierBuckets {
    pub critical: Vec<Finding>,
    pub high: Vec<Finding>,
    pub moderate: Vec<Finding>,
    pub mild: Vec<Finding>,
    pub normal: Vec<Finding>,
}

impl TierBuckets {
    pub fn normal_count(&self) -> usize {
        self.normal.len()
    }

    pub fn abnormal_count(&self) -> usize {
        self.critical.len() + self.high.len() + self.moderate.len() + self.mild.len()
    }

    pub fn total_tests(&self) -> usize {
        self.normal_count() + self.abnormal_count()
    }

    /// All non-normal findings, most severe tier first.
    pub fn abnormal(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.critical
            .iter()
            .chain(&self.high)
            .chain(&self.moderate)
            .chain(&self.mild)
    }
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

/// The four advice lists produced by the synthesizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    pub immediate_actions: Vec<String>,
    pub lifestyle: Vec<String>,
    pub dietary: Vec<String>,
    pub follow_up: Vec<String>,
}

// ---------------------------------------------------------------------------
// AnalysisResult
// ---------------------------------------------------------------------------

/// The aggregate output of one analysis run. Built once, returned immutably;
/// identical input text yields a byte-identical result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub total_tests: usize,
    pub normal_count: usize,
    pub abnormal_count: usize,
    pub normal_results: Vec<Finding>,
    pub critical_concerns: Vec<Finding>,
    pub high_concerns: Vec<Finding>,
    pub moderate_concerns: Vec<Finding>,
    pub mild_concerns: Vec<Finding>,
    pub immediate_actions: Vec<String>,
    pub lifestyle_recommendations: Vec<String>,
    pub dietary_advice: Vec<String>,
    pub follow_up_advice: Vec<String>,
}

impl AnalysisResult {
    pub(crate) fn from_parts(buckets: TierBuckets, recs: Recommendations) -> Self {
        Self {
            total_tests: buckets.total_tests(),
            normal_count: buckets.normal_count(),
            abnormal_count: buckets.abnormal_count(),
            normal_results: buckets.normal,
            critical_concerns: buckets.critical,
            high_concerns: buckets.high,
            moderate_concerns: buckets.moderate,
            mild_concerns: buckets.mild,
            immediate_actions: recs.immediate_actions,
            lifestyle_recommendations: recs.lifestyle,
            dietary_advice: recs.dietary,
            follow_up_advice: recs.follow_up,
        }
    }

    pub fn has_abnormal(&self) -> bool {
        self.abnormal_count > 0
    }

    /// All non-normal findings, most severe tier first.
    pub fn concerns(&self) -> impl Iterator<Item = &Finding> + '_ {
        self.critical_concerns
            .iter()
            .chain(&self.high_concerns)
            .chain(&self.moderate_concerns)
            .chain(&self.mild_concerns)
    }
}

// ---------------------------------------------------------------------------
// Scanned input
// ---------------------------------------------------------------------------

/// What the OCR collaborator hands over: extracted text plus its overall
/// recognition confidence in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedDocument {
    pub text: String,
    pub confidence: f32,
}

/// Input-quality caveats. Warnings annotate trust in the source text; they
/// never change findings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum InputWarning {
    UnreadableScan { confidence: f32 },
    LowConfidence { confidence: f32 },
    SparseText { chars: usize },
}

/// Analysis of a scanned document: the structured result, input-quality
/// warnings, and the rendered report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub result: AnalysisResult,
    pub warnings: Vec<InputWarning>,
    pub report: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(parameter: &str, status: Status, severity: Severity) -> Finding {
        Finding {
            parameter: parameter.into(),
            value: Some(1.0),
            value_text: None,
            unit: Some("u".into()),
            status,
            severity,
            family: None,
            message: format!("{parameter}: test"),
        }
    }

    #[test]
    fn bucket_counts_add_up() {
        let buckets = TierBuckets {
            critical: vec![finding("a", Status::Low, Severity::Critical)],
            high: vec![finding("b", Status::High, Severity::High)],
            moderate: vec![],
            mild: vec![finding("c", Status::High, Severity::Mild)],
            normal: vec![finding("d", Status::Normal, Severity::None)],
        };
        assert_eq!(buckets.total_tests(), 4);
        assert_eq!(buckets.normal_count(), 1);
        assert_eq!(buckets.abnormal_count(), 3);
    }

    #[test]
    fn abnormal_iterates_most_severe_first() {
        let buckets = TierBuckets {
            critical: vec![finding("a", Status::Low, Severity::Critical)],
            high: vec![],
            moderate: vec![finding("b", Status::High, Severity::Moderate)],
            mild: vec![finding("c", Status::High, Severity::Mild)],
            normal: vec![],
        };
        let order: Vec<&str> = buckets.abnormal().map(|f| f.parameter.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn result_from_parts_preserves_counts() {
        let buckets = TierBuckets {
            critical: vec![],
            high: vec![finding("x", Status::High, Severity::High)],
            moderate: vec![],
            mild: vec![],
            normal: vec![finding("y", Status::Normal, Severity::None)],
        };
        let result = AnalysisResult::from_parts(buckets, Recommendations::default());
        assert_eq!(result.total_tests, 2);
        assert_eq!(result.normal_count + result.abnormal_count, result.total_tests);
        assert!(result.has_abnormal());
    }

    #[test]
    fn result_serializes_to_plain_data() {
        let result = AnalysisResult::from_parts(TierBuckets::default(), Recommendations::default());
        let json = serde_json::to_string(&result).unwrap();
        let back: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
