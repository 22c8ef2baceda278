use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity tier of a finding. Ordering carries the escalation precedence:
/// `None < Mild < Moderate < High < Critical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Mild,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

// ---------------------------------------------------------------------------
// ConditionFamily
// ---------------------------------------------------------------------------

/// Condition family a parameter belongs to. Drives recommendation synthesis:
/// a family's advice is emitted once if any abnormal finding carries it.
/// Parameters with no obvious family (e.g. platelets) carry `None` and fall
/// back to generic advice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConditionFamily {
    Lipid,
    Glucose,
    Liver,
    Kidney,
    Anemia,
    Thyroid,
    Vitamin,
}

impl ConditionFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lipid => "lipid",
            Self::Glucose => "glucose",
            Self::Liver => "liver",
            Self::Kidney => "kidney",
            Self::Anemia => "anemia",
            Self::Thyroid => "thyroid",
            Self::Vitamin => "vitamin",
        }
    }
}

// ---------------------------------------------------------------------------
// TestGroup
// ---------------------------------------------------------------------------

/// Panel grouping for a parameter. The builtin table declares blood panels
/// before urinalysis, so overlapping patterns (serum vs urine glucose)
/// resolve by declaration order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TestGroup {
    BloodCount,
    LipidProfile,
    Diabetes,
    LiverFunction,
    KidneyFunction,
    Thyroid,
    Vitamins,
    Urinalysis,
}

// ---------------------------------------------------------------------------
// Ranges
// ---------------------------------------------------------------------------

/// Inclusive reference range for a quantitative parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalRange {
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

/// Bounds beyond which a reading escalates to critical severity. Either side
/// may be open (e.g. triglycerides only have a critical ceiling).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CriticalRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

// ---------------------------------------------------------------------------
// ValueNormalizer
// ---------------------------------------------------------------------------

/// Named, serializable correction applied to a parsed value before
/// classification. Normalizers are data, not code, so rule tables stay
/// loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueNormalizer {
    /// Divides by 10 while the value exceeds `max_plausible` (at most three
    /// shifts). Recovers readings where OCR dropped the decimal point, e.g.
    /// a hemoglobin of "128" meaning 12.8.
    DecimalShift { max_plausible: f64 },
}

impl ValueNormalizer {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Self::DecimalShift { max_plausible } => {
                let mut v = value;
                let mut shifts = 0;
                while v > *max_plausible && shifts < 3 {
                    v /= 10.0;
                    shifts += 1;
                }
                v
            }
        }
    }
}

// ---------------------------------------------------------------------------
// RuleKind
// ---------------------------------------------------------------------------

fn default_synonyms() -> Vec<String> {
    vec!["nil".to_string()]
}

/// What a rule measures. A parameter is either quantitative (numeric value
/// against a reference range) or qualitative (categorical token against a
/// normal token); the enum makes any other combination unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RuleKind {
    Quantitative {
        normal: NormalRange,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        critical: Option<CriticalRange>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        low_severity: Option<Severity>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        high_severity: Option<Severity>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        low_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        high_message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        normalizer: Option<ValueNormalizer>,
    },
    Qualitative {
        normal_token: String,
        #[serde(default = "default_synonyms")]
        synonyms: Vec<String>,
        abnormal_message: String,
        severity: Severity,
    },
}

// ---------------------------------------------------------------------------
// ParameterRule
// ---------------------------------------------------------------------------

/// One clinical parameter: its display name, panel group, condition family,
/// extraction patterns (tried in order, first match wins), and how to judge
/// the extracted value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterRule {
    pub name: String,
    pub group: TestGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<ConditionFamily>,
    pub patterns: Vec<String>,
    #[serde(flatten)]
    pub kind: RuleKind,
}
