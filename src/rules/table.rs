use std::collections::HashSet;
use std::path::Path;

use regex::Regex;

use super::builtin::builtin_rules;
use super::schema::{ParameterRule, RuleKind, Severity};
use super::RuleError;

/// A rule with its patterns compiled. Compilation happens once, at table
/// construction; analysis runs never touch the regex engine's parser.
#[derive(Debug)]
pub struct CompiledRule {
    pub rule: ParameterRule,
    pub patterns: Vec<Regex>,
}

/// The read-only rule table shared across analyses.
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<CompiledRule>,
}

impl RuleTable {
    /// Validate and compile a rule set.
    pub fn new(rules: Vec<ParameterRule>) -> Result<Self, RuleError> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in rules {
            if !seen.insert(rule.name.clone()) {
                return Err(RuleError::DuplicateRule(rule.name));
            }
            validate(&rule)?;

            let mut patterns = Vec::with_capacity(rule.patterns.len());
            for pattern in &rule.patterns {
                let regex = Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
                    rule: rule.name.clone(),
                    message: e.to_string(),
                })?;
                // Group 0 is the whole match; the value lives in group 1.
                if regex.captures_len() != 2 {
                    return Err(RuleError::BadCapture {
                        rule: rule.name.clone(),
                        pattern: pattern.clone(),
                    });
                }
                patterns.push(regex);
            }

            compiled.push(CompiledRule { rule, patterns });
        }

        Ok(Self { rules: compiled })
    }

    /// The built-in clinical table.
    pub fn builtin() -> Self {
        Self::new(builtin_rules()).expect("builtin rule table must compile")
    }

    /// Parse a rule table from a JSON array of rules.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let rules: Vec<ParameterRule> =
            serde_json::from_str(json).map_err(|e| RuleError::Parse(e.to_string()))?;
        Self::new(rules)
    }

    /// Load a rule table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, RuleError> {
        let json = std::fs::read_to_string(path).map_err(|e| RuleError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Look up a rule by parameter name.
    pub fn get(&self, name: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|c| c.rule.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn validate(rule: &ParameterRule) -> Result<(), RuleError> {
    if rule.patterns.is_empty() {
        return Err(RuleError::InvalidRule {
            rule: rule.name.clone(),
            message: "no extraction patterns".into(),
        });
    }

    match &rule.kind {
        RuleKind::Quantitative {
            normal, critical, ..
        } => {
            if normal.min > normal.max {
                return Err(RuleError::InvalidRule {
                    rule: rule.name.clone(),
                    message: format!("normal range inverted ({} > {})", normal.min, normal.max),
                });
            }
            if let Some(c) = critical {
                if c.min.is_none() && c.max.is_none() {
                    return Err(RuleError::InvalidRule {
                        rule: rule.name.clone(),
                        message: "critical range has no bounds".into(),
                    });
                }
                if c.min.is_some_and(|m| m > normal.min)
                    || c.max.is_some_and(|m| m < normal.max)
                {
                    return Err(RuleError::InvalidRule {
                        rule: rule.name.clone(),
                        message: "critical range tighter than normal range".into(),
                    });
                }
            }
        }
        RuleKind::Qualitative {
            normal_token,
            severity,
            ..
        } => {
            if normal_token.is_empty() {
                return Err(RuleError::InvalidRule {
                    rule: rule.name.clone(),
                    message: "empty normal token".into(),
                });
            }
            if *severity == Severity::None {
                return Err(RuleError::InvalidRule {
                    rule: rule.name.clone(),
                    message: "qualitative severity must not be none".into(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::super::schema::{NormalRange, TestGroup};
    use super::*;

    fn minimal_rule(name: &str, pattern: &str) -> ParameterRule {
        ParameterRule {
            name: name.into(),
            group: TestGroup::BloodCount,
            family: None,
            patterns: vec![pattern.into()],
            kind: RuleKind::Quantitative {
                normal: NormalRange {
                    min: 1.0,
                    max: 2.0,
                    unit: "u".into(),
                },
                critical: None,
                low_severity: None,
                high_severity: None,
                low_message: None,
                high_message: None,
                normalizer: None,
            },
        }
    }

    #[test]
    fn builtin_table_compiles() {
        let table = RuleTable::builtin();
        assert_eq!(table.len(), 21);
        assert!(!table.is_empty());
    }

    #[test]
    fn lookup_by_name() {
        let table = RuleTable::builtin();
        assert!(table.get("Hemoglobin").is_some());
        assert!(table.get("Urine Ketones").is_some());
        assert!(table.get("Potassium").is_none());
    }

    #[test]
    fn rejects_invalid_regex() {
        let err = RuleTable::new(vec![minimal_rule("Broken", r"value[:\s+(\d+)")]).unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { .. }));
    }

    #[test]
    fn rejects_pattern_without_capture() {
        let err = RuleTable::new(vec![minimal_rule("NoCapture", r"value[:\s]+\d+")]).unwrap_err();
        assert!(matches!(err, RuleError::BadCapture { .. }));
    }

    #[test]
    fn rejects_pattern_with_two_captures() {
        let err =
            RuleTable::new(vec![minimal_rule("TwoCaptures", r"(value)[:\s]+(\d+)")]).unwrap_err();
        assert!(matches!(err, RuleError::BadCapture { .. }));
    }

    #[test]
    fn rejects_duplicate_names() {
        let rules = vec![
            minimal_rule("Same", r"a[:\s]+(\d+)"),
            minimal_rule("Same", r"b[:\s]+(\d+)"),
        ];
        let err = RuleTable::new(rules).unwrap_err();
        assert!(matches!(err, RuleError::DuplicateRule(name) if name == "Same"));
    }

    #[test]
    fn rejects_inverted_range() {
        let mut rule = minimal_rule("Inverted", r"value[:\s]+(\d+)");
        if let RuleKind::Quantitative { ref mut normal, .. } = rule.kind {
            normal.min = 5.0;
            normal.max = 1.0;
        }
        let err = RuleTable::new(vec![rule]).unwrap_err();
        assert!(matches!(err, RuleError::InvalidRule { .. }));
    }

    #[test]
    fn rejects_empty_pattern_list() {
        let mut rule = minimal_rule("Empty", r"value[:\s]+(\d+)");
        rule.patterns.clear();
        let err = RuleTable::new(vec![rule]).unwrap_err();
        assert!(matches!(err, RuleError::InvalidRule { .. }));
    }

    #[test]
    fn builtin_round_trips_through_json() {
        let json = serde_json::to_string(&builtin_rules()).unwrap();
        let table = RuleTable::from_json(&json).unwrap();
        assert_eq!(table.len(), 21);
        assert!(table.get("Blood Glucose (Fasting)").is_some());
    }

    #[test]
    fn load_reads_rules_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&builtin_rules()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let table = RuleTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 21);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = RuleTable::load(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(matches!(err, RuleError::Load { .. }));
    }

    #[test]
    fn from_json_reports_bad_payload() {
        let err = RuleTable::from_json("not json").unwrap_err();
        assert!(matches!(err, RuleError::Parse(_)));
    }
}
