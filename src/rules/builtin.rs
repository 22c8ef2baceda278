//! Built-in clinical rule table.
//!
//! Reference ranges and severities follow common adult panels. Declaration
//! order matters twice: patterns within a rule are tried first-match-wins,
//! and blood panels are declared before urinalysis so overlapping patterns
//! (serum vs urine glucose) resolve predictably.

use super::schema::{
    ConditionFamily, CriticalRange, NormalRange, ParameterRule, RuleKind, Severity, TestGroup,
    ValueNormalizer,
};

fn range(min: f64, max: f64, unit: &str) -> NormalRange {
    NormalRange {
        min,
        max,
        unit: unit.into(),
    }
}

fn critical(min: Option<f64>, max: Option<f64>) -> Option<CriticalRange> {
    Some(CriticalRange { min, max })
}

fn patterns(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|p| (*p).to_string()).collect()
}

/// The full built-in rule table, in scan order.
pub fn builtin_rules() -> Vec<ParameterRule> {
    let mut rules = Vec::new();

    // ── Blood count ─────────────────────────────────────────────
    rules.push(ParameterRule {
        name: "Hemoglobin".into(),
        group: TestGroup::BloodCount,
        family: Some(ConditionFamily::Anemia),
        patterns: patterns(&[
            r"hemoglobin[:\s]+(\d+\.?\d*)\s*(?:g/dl|g/l)?",
            r"hb[:\s]+(\d+\.?\d*)\s*(?:g/dl|g/l)?",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(13.5, 17.5, "g/dL"),
            critical: critical(Some(7.0), Some(20.0)),
            low_severity: Some(Severity::High),
            high_severity: Some(Severity::Moderate),
            low_message: Some("Anemia detected".into()),
            high_message: Some("Polycythemia detected".into()),
            // Scanned reports often lose the decimal point ("128" for 12.8).
            normalizer: Some(ValueNormalizer::DecimalShift { max_plausible: 25.0 }),
        },
    });

    rules.push(ParameterRule {
        name: "White Blood Cell Count".into(),
        group: TestGroup::BloodCount,
        family: None,
        patterns: patterns(&[
            r"wbc[:\s]+count[:\s]*(\d+,?\d*)\s*(?:/mm|cells)?",
            r"white\s+blood\s+cell[:\s]+(\d+,?\d*)",
            r"leukocyte[:\s]+count[:\s]*(\d+,?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(4000.0, 11000.0, "/mm\u{b3}"),
            critical: critical(Some(1000.0), Some(25000.0)),
            low_severity: Some(Severity::High),
            high_severity: Some(Severity::High),
            low_message: Some("Leukopenia - Low immune defense".into()),
            high_message: Some("Leukocytosis - Possible infection".into()),
            normalizer: None,
        },
    });

    rules.push(ParameterRule {
        name: "Red Blood Cell Count".into(),
        group: TestGroup::BloodCount,
        family: Some(ConditionFamily::Anemia),
        patterns: patterns(&[
            r"rbc[:\s]+count[:\s]*(\d+\.?\d*)\s*(?:million)?",
            r"red\s+blood\s+cell[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(4.5, 5.9, "million/mm\u{b3}"),
            critical: None,
            low_severity: Some(Severity::Moderate),
            high_severity: Some(Severity::Moderate),
            low_message: Some("Low RBC - Anemia risk".into()),
            high_message: Some("High RBC - Polycythemia".into()),
            normalizer: None,
        },
    });

    rules.push(ParameterRule {
        name: "Platelet Count".into(),
        group: TestGroup::BloodCount,
        family: None,
        patterns: patterns(&[
            r"platelets?\s+count[:\s]*(\d+,?\d*)\s*(?:/mm|lakh)?",
            r"plt[:\s]+(\d+,?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(150000.0, 450000.0, "/mm\u{b3}"),
            critical: critical(Some(50000.0), Some(1000000.0)),
            low_severity: Some(Severity::Critical),
            high_severity: Some(Severity::High),
            low_message: Some("Thrombocytopenia - Bleeding risk".into()),
            high_message: Some("Thrombocytosis - Clotting risk".into()),
            normalizer: None,
        },
    });

    // ── Lipid profile ───────────────────────────────────────────
    rules.push(ParameterRule {
        name: "Total Cholesterol".into(),
        group: TestGroup::LipidProfile,
        family: Some(ConditionFamily::Lipid),
        patterns: patterns(&[
            r"(?:total\s+)?cholesterol[:\s]+(\d+\.?\d*)\s*(?:mg/dl|m[og]/dl)?",
            r"cholesterol\s+total[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(125.0, 200.0, "mg/dL"),
            critical: None,
            low_severity: Some(Severity::Moderate),
            high_severity: Some(Severity::High),
            low_message: Some("Low cholesterol - Malnutrition risk".into()),
            high_message: Some("High cholesterol - Cardiovascular risk".into()),
            normalizer: None,
        },
    });

    rules.push(ParameterRule {
        name: "HDL Cholesterol".into(),
        group: TestGroup::LipidProfile,
        family: Some(ConditionFamily::Lipid),
        patterns: patterns(&[
            r"hdl[:\s]+(?:cholesterol[:\s]+)?(\d+\.?\d*)\s*(?:mg/dl)?",
            r"hdl[-\s]+c[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(40.0, 60.0, "mg/dL"),
            critical: None,
            low_severity: Some(Severity::High),
            // High HDL is protective, so the flag stays mild.
            high_severity: Some(Severity::Mild),
            low_message: Some("Low HDL - Heart disease risk".into()),
            high_message: Some("High HDL - Protective".into()),
            normalizer: None,
        },
    });

    rules.push(ParameterRule {
        name: "LDL Cholesterol".into(),
        group: TestGroup::LipidProfile,
        family: Some(ConditionFamily::Lipid),
        patterns: patterns(&[
            r"ldl[:\s]+(?:cholesterol[:\s]+)?(\d+\.?\d*)\s*(?:mg/dl)?",
            r"ldl[-\s]+c[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(0.0, 100.0, "mg/dL"),
            critical: None,
            low_severity: Some(Severity::Mild),
            high_severity: Some(Severity::High),
            low_message: None,
            high_message: Some("High LDL - Heart disease risk".into()),
            normalizer: None,
        },
    });

    rules.push(ParameterRule {
        name: "Triglycerides".into(),
        group: TestGroup::LipidProfile,
        family: Some(ConditionFamily::Lipid),
        patterns: patterns(&[
            r"triglycerides?[:\s]+(\d+\.?\d*)\s*(?:mg/dl|m[og]/dl)?",
            r"tg[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(0.0, 150.0, "mg/dL"),
            critical: critical(None, Some(500.0)),
            low_severity: Some(Severity::Mild),
            high_severity: Some(Severity::High),
            low_message: None,
            high_message: Some(
                "High triglycerides - Pancreatitis & heart disease risk".into(),
            ),
            normalizer: None,
        },
    });

    // ── Diabetes markers ────────────────────────────────────────
    rules.push(ParameterRule {
        name: "Blood Glucose (Fasting)".into(),
        group: TestGroup::Diabetes,
        family: Some(ConditionFamily::Glucose),
        patterns: patterns(&[
            r"(?:fasting\s+)?glucose[:\s]+(\d+\.?\d*)\s*(?:mg/dl)?",
            r"blood\s+sugar[:\s]+(\d+\.?\d*)",
            r"fbs[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(70.0, 100.0, "mg/dL"),
            critical: critical(Some(40.0), Some(250.0)),
            low_severity: Some(Severity::Critical),
            high_severity: Some(Severity::High),
            low_message: Some("Hypoglycemia - Low blood sugar".into()),
            high_message: Some("Hyperglycemia - Diabetes risk".into()),
            normalizer: None,
        },
    });

    rules.push(ParameterRule {
        name: "HbA1c".into(),
        group: TestGroup::Diabetes,
        family: Some(ConditionFamily::Glucose),
        patterns: patterns(&[
            r"hba1c[:\s]+(\d+\.?\d*)\s*%?",
            r"glycated\s+hemoglobin[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(4.0, 5.6, "%"),
            critical: critical(None, Some(9.0)),
            low_severity: Some(Severity::Mild),
            high_severity: Some(Severity::High),
            low_message: None,
            high_message: Some("Prediabetes/Diabetes - Poor glucose control".into()),
            normalizer: None,
        },
    });

    // ── Liver function ──────────────────────────────────────────
    rules.push(ParameterRule {
        name: "ALT (SGPT)".into(),
        group: TestGroup::LiverFunction,
        family: Some(ConditionFamily::Liver),
        patterns: patterns(&[
            r"(?:alt|sgpt)[:\s]+(\d+\.?\d*)\s*(?:u/l|iu/l)?",
            r"alanine\s+aminotransferase[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(7.0, 56.0, "U/L"),
            critical: critical(None, Some(200.0)),
            low_severity: Some(Severity::Mild),
            high_severity: Some(Severity::High),
            low_message: None,
            high_message: Some("Elevated ALT - Liver inflammation".into()),
            normalizer: None,
        },
    });

    rules.push(ParameterRule {
        name: "AST (SGOT)".into(),
        group: TestGroup::LiverFunction,
        family: Some(ConditionFamily::Liver),
        patterns: patterns(&[
            r"(?:ast|sgot)[:\s]+(\d+\.?\d*)\s*(?:u/l|iu/l)?",
            r"aspartate\s+aminotransferase[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(10.0, 40.0, "U/L"),
            critical: critical(None, Some(200.0)),
            low_severity: Some(Severity::Mild),
            high_severity: Some(Severity::High),
            low_message: None,
            high_message: Some("Elevated AST - Liver/heart damage".into()),
            normalizer: None,
        },
    });

    rules.push(ParameterRule {
        name: "Total Bilirubin".into(),
        group: TestGroup::LiverFunction,
        family: Some(ConditionFamily::Liver),
        patterns: patterns(&[r"(?:total\s+)?bilirubin[:\s]+(\d+\.?\d*)\s*(?:mg/dl)?"]),
        kind: RuleKind::Quantitative {
            normal: range(0.1, 1.2, "mg/dL"),
            critical: critical(None, Some(3.0)),
            low_severity: Some(Severity::Mild),
            high_severity: Some(Severity::High),
            low_message: None,
            high_message: Some("High bilirubin - Jaundice risk".into()),
            normalizer: None,
        },
    });

    // ── Kidney function ─────────────────────────────────────────
    rules.push(ParameterRule {
        name: "Creatinine".into(),
        group: TestGroup::KidneyFunction,
        family: Some(ConditionFamily::Kidney),
        patterns: patterns(&[
            r"creatinine[:\s]+(\d+\.?\d*)\s*(?:mg/dl)?",
            r"serum\s+creatinine[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(0.7, 1.3, "mg/dL"),
            critical: critical(None, Some(3.0)),
            low_severity: Some(Severity::Mild),
            high_severity: Some(Severity::Critical),
            low_message: None,
            high_message: Some("High creatinine - Kidney dysfunction".into()),
            normalizer: None,
        },
    });

    rules.push(ParameterRule {
        name: "Blood Urea Nitrogen (BUN)".into(),
        group: TestGroup::KidneyFunction,
        family: Some(ConditionFamily::Kidney),
        patterns: patterns(&[
            r"(?:bun|blood\s+urea\s+nitrogen)[:\s]+(\d+\.?\d*)\s*(?:mg/dl)?",
            r"urea[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(7.0, 20.0, "mg/dL"),
            critical: critical(None, Some(50.0)),
            low_severity: Some(Severity::Mild),
            high_severity: Some(Severity::High),
            low_message: None,
            high_message: Some("High BUN - Kidney function issue".into()),
            normalizer: None,
        },
    });

    // ── Thyroid ─────────────────────────────────────────────────
    rules.push(ParameterRule {
        name: "TSH".into(),
        group: TestGroup::Thyroid,
        family: Some(ConditionFamily::Thyroid),
        patterns: patterns(&[
            r"tsh[:\s]+(\d+\.?\d*)\s*(?:miu/l|uiu/ml)?",
            r"thyroid\s+stimulating\s+hormone[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(0.4, 4.0, "mIU/L"),
            critical: None,
            low_severity: Some(Severity::Moderate),
            high_severity: Some(Severity::Moderate),
            low_message: Some("Low TSH - Hyperthyroidism".into()),
            high_message: Some("High TSH - Hypothyroidism".into()),
            normalizer: None,
        },
    });

    // ── Vitamins ────────────────────────────────────────────────
    rules.push(ParameterRule {
        name: "Vitamin D".into(),
        group: TestGroup::Vitamins,
        family: Some(ConditionFamily::Vitamin),
        patterns: patterns(&[
            r"vitamin\s+d[:\s]+(\d+\.?\d*)\s*(?:ng/ml)?",
            r"25[-\s]?oh[-\s]?d[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(30.0, 100.0, "ng/mL"),
            critical: None,
            low_severity: Some(Severity::Moderate),
            high_severity: Some(Severity::Mild),
            low_message: Some("Vitamin D deficiency - Bone health risk".into()),
            high_message: Some("High Vitamin D".into()),
            normalizer: None,
        },
    });

    rules.push(ParameterRule {
        name: "Vitamin B12".into(),
        group: TestGroup::Vitamins,
        family: Some(ConditionFamily::Vitamin),
        patterns: patterns(&[
            r"(?:vitamin\s+)?b[-\s]?12[:\s]+(\d+\.?\d*)\s*(?:pg/ml)?",
            r"cobalamin[:\s]+(\d+\.?\d*)",
        ]),
        kind: RuleKind::Quantitative {
            normal: range(200.0, 900.0, "pg/mL"),
            critical: None,
            low_severity: Some(Severity::Moderate),
            high_severity: Some(Severity::Mild),
            low_message: Some("B12 deficiency - Anemia & nerve damage risk".into()),
            high_message: Some("High B12".into()),
            normalizer: None,
        },
    });

    // ── Urinalysis (qualitative) ────────────────────────────────
    rules.push(ParameterRule {
        name: "Urine Protein".into(),
        group: TestGroup::Urinalysis,
        family: Some(ConditionFamily::Kidney),
        patterns: patterns(&[r"protein[:\s]+(negative|trace|positive|\+)"]),
        kind: RuleKind::Qualitative {
            normal_token: "negative".into(),
            synonyms: vec!["nil".into()],
            abnormal_message: "Proteinuria detected - Kidney issue".into(),
            severity: Severity::High,
        },
    });

    rules.push(ParameterRule {
        name: "Urine Glucose".into(),
        group: TestGroup::Urinalysis,
        family: Some(ConditionFamily::Glucose),
        patterns: patterns(&[r"glucose[:\s]+(negative|trace|positive|\+)"]),
        kind: RuleKind::Qualitative {
            normal_token: "negative".into(),
            synonyms: vec!["nil".into()],
            abnormal_message: "Glycosuria detected - Diabetes risk".into(),
            severity: Severity::High,
        },
    });

    rules.push(ParameterRule {
        name: "Urine Blood".into(),
        group: TestGroup::Urinalysis,
        family: None,
        patterns: patterns(&[r"blood[:\s]+(negative|trace|positive|\+)"]),
        kind: RuleKind::Qualitative {
            normal_token: "negative".into(),
            synonyms: vec!["nil".into()],
            abnormal_message: "Hematuria detected - Bleeding in urinary tract".into(),
            severity: Severity::Critical,
        },
    });

    rules.push(ParameterRule {
        name: "Urine Ketones".into(),
        group: TestGroup::Urinalysis,
        family: None,
        patterns: patterns(&[r"ketones?[:\s]+(negative|trace|positive|\+)"]),
        kind: RuleKind::Qualitative {
            normal_token: "negative".into(),
            synonyms: vec!["nil".into()],
            abnormal_message: "Ketonuria detected".into(),
            severity: Severity::Moderate,
        },
    });

    rules
}
