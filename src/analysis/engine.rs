use std::time::Instant;

use tracing::info;

use crate::rules::RuleTable;

use super::aggregator::aggregate;
use super::classifier::classify;
use super::confidence::assess_input;
use super::correction::correct_clinical_terms;
use super::extractor::extract;
use super::normalize::{fold_case, sanitize_text};
use super::recommend::synthesize;
use super::report::render_report;
use super::types::{AnalysisResult, DocumentAnalysis, Finding, ScannedDocument};
use super::AnalysisError;

/// The engine's function boundary. Implementations are pure: same text in,
/// byte-identical result out.
pub trait ReportAnalyzer {
    /// Analyze raw OCR text into a structured assessment.
    fn analyze(&self, raw_text: &str) -> Result<AnalysisResult, AnalysisError>;

    /// Analyze a scanned document: structured assessment plus input-quality
    /// warnings and the rendered report.
    fn analyze_scan(&self, document: &ScannedDocument) -> Result<DocumentAnalysis, AnalysisError>;
}

/// Rule-table-driven analyzer. Holds only the immutable compiled table, so
/// one instance serves concurrent analyses without locking.
pub struct RuleBasedAnalyzer {
    table: RuleTable,
}

impl RuleBasedAnalyzer {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    /// Analyzer over the built-in clinical table.
    pub fn with_builtin_rules() -> Self {
        Self::new(RuleTable::builtin())
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }
}

impl ReportAnalyzer for RuleBasedAnalyzer {
    fn analyze(&self, raw_text: &str) -> Result<AnalysisResult, AnalysisError> {
        if raw_text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let start = Instant::now();

        let sanitized = sanitize_text(raw_text);
        let corrected = correct_clinical_terms(&sanitized);
        let text = fold_case(&corrected);

        let observations = extract(&text, &self.table);

        let findings: Vec<Finding> = observations
            .iter()
            .filter_map(|observation| {
                self.table
                    .get(&observation.parameter)
                    .map(|compiled| classify(&compiled.rule, observation))
            })
            .collect();

        let buckets = aggregate(findings);
        let recommendations = synthesize(&buckets);
        let result = AnalysisResult::from_parts(buckets, recommendations);

        info!(
            total = result.total_tests,
            normal = result.normal_count,
            abnormal = result.abnormal_count,
            critical = result.critical_concerns.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "lab analysis complete"
        );

        Ok(result)
    }

    fn analyze_scan(&self, document: &ScannedDocument) -> Result<DocumentAnalysis, AnalysisError> {
        let warnings = assess_input(document);
        let result = self.analyze(&document.text)?;
        let report = render_report(&result);

        Ok(DocumentAnalysis {
            result,
            warnings,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{InputWarning, Status};
    use crate::rules::Severity;

    fn analyzer() -> RuleBasedAnalyzer {
        RuleBasedAnalyzer::with_builtin_rules()
    }

    #[test]
    fn analyzer_is_parallel_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleBasedAnalyzer>();
    }

    // ── Representative reports ─────────────────────────────────

    #[test]
    fn low_hemoglobin_scenario() {
        let result = analyzer().analyze("Hemoglobin: 12.8 g/dL").unwrap();

        assert_eq!(result.total_tests, 1);
        assert_eq!(result.abnormal_count, 1);
        let finding = &result.high_concerns[0];
        assert_eq!(finding.status, Status::Low);
        assert_eq!(finding.severity, Severity::High);
        assert!(result.dietary_advice.iter().any(|a| a.contains("iron")));
        assert!(!result.lifestyle_recommendations.is_empty());
    }

    #[test]
    fn normal_glucose_scenario() {
        let result = analyzer().analyze("Glucose: 95 mg/dL").unwrap();

        assert_eq!(result.total_tests, 1);
        assert_eq!(result.normal_count, 1);
        assert_eq!(result.abnormal_count, 0);
        assert!(result.immediate_actions.iter().any(|a| a.contains("continue")));
    }

    #[test]
    fn critical_platelets_scenario() {
        let result = analyzer().analyze("Platelet count: 45000").unwrap();

        assert_eq!(result.critical_concerns.len(), 1);
        assert_eq!(result.critical_concerns[0].severity, Severity::Critical);
        assert!(result.immediate_actions.iter().any(|a| a.contains("URGENT")));
        assert!(!result
            .immediate_actions
            .iter()
            .any(|a| a.contains("24-48 hours")));
        assert!(!result.immediate_actions.iter().any(|a| a.contains("normal")));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            analyzer().analyze(""),
            Err(AnalysisError::EmptyInput)
        ));
        assert!(matches!(
            analyzer().analyze("   \n\t  "),
            Err(AnalysisError::EmptyInput)
        ));
    }

    // ── Invariants ─────────────────────────────────────────────

    const MIXED_PANEL: &str = "\
        Complete Blood Count\n\
        Hemoglobin: 12.8 g/dL\n\
        WBC count: 13,500 /mm³\n\
        Platelet count: 250,000 /mm³\n\
        Lipid Profile\n\
        Total Cholesterol: 240 mg/dL\n\
        HDL cholesterol: 35 mg/dL\n\
        Glucose: 95 mg/dL\n\
        Creatinine: 1.1 mg/dL\n\
        Urine Examination\n\
        Protein: trace\n\
        Ketones: negative\n";

    #[test]
    fn counts_balance_on_mixed_panel() {
        let result = analyzer().analyze(MIXED_PANEL).unwrap();
        assert_eq!(
            result.normal_count + result.abnormal_count,
            result.total_tests
        );
        assert_eq!(result.total_tests, 9);
    }

    #[test]
    fn status_severity_invariant_holds_everywhere() {
        let result = analyzer().analyze(MIXED_PANEL).unwrap();
        for finding in result.normal_results.iter().chain(result.concerns()) {
            assert_eq!(
                finding.status == Status::Normal,
                finding.severity == Severity::None,
                "invariant broken for {}",
                finding.parameter
            );
        }
    }

    #[test]
    fn analysis_is_idempotent() {
        let a = analyzer().analyze(MIXED_PANEL).unwrap();
        let b = analyzer().analyze(MIXED_PANEL).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn family_advice_not_duplicated_across_findings() {
        // Cholesterol and HDL both carry the lipid family.
        let result = analyzer().analyze(MIXED_PANEL).unwrap();
        let lipid_follow_ups = result
            .follow_up_advice
            .iter()
            .filter(|a| a.contains("lipid profile"))
            .count();
        assert_eq!(lipid_follow_ups, 1);
    }

    #[test]
    fn case_and_noise_do_not_change_results() {
        let clean = analyzer().analyze("hemoglobin: 12.8 g/dl").unwrap();
        let noisy = analyzer()
            .analyze("  HEMOGLOBIN:   12.8 \x01 G/DL \n\n")
            .unwrap();
        assert_eq!(clean, noisy);
    }

    #[test]
    fn ocr_misread_parameter_name_still_detected() {
        let result = analyzer().analyze("Hemoglbin: 12.8 g/dL").unwrap();
        assert_eq!(result.total_tests, 1);
        assert_eq!(result.high_concerns[0].parameter, "Hemoglobin");
    }

    #[test]
    fn unrecognized_text_yields_empty_all_normal_result() {
        let result = analyzer()
            .analyze("patient slept well and reports no complaints")
            .unwrap();
        assert_eq!(result.total_tests, 0);
        assert!(result.immediate_actions.iter().any(|a| a.contains("normal")));
    }

    // ── Scanned document surface ───────────────────────────────

    #[test]
    fn analyze_scan_bundles_report_and_warnings() {
        let doc = ScannedDocument {
            text: "Hemoglobin: 12.8 g/dL".into(),
            confidence: 0.45,
        };
        let analysis = analyzer().analyze_scan(&doc).unwrap();

        assert!(analysis
            .warnings
            .iter()
            .any(|w| matches!(w, InputWarning::LowConfidence { .. })));
        assert!(analysis.report.contains("LAB REPORT ANALYSIS"));
        assert_eq!(analysis.result.total_tests, 1);
    }

    #[test]
    fn analyze_scan_propagates_empty_input() {
        let doc = ScannedDocument {
            text: "  ".into(),
            confidence: 0.9,
        };
        assert!(matches!(
            analyzer().analyze_scan(&doc),
            Err(AnalysisError::EmptyInput)
        ));
    }
}
