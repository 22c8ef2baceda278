use super::types::{AnalysisResult, Finding};

/// Render the human-readable report: fixed section headers, severity tiers
/// first, then the four advice lists. Pure concatenation over the result, so
/// re-rendering the same result is byte-stable.
pub fn render_report(result: &AnalysisResult) -> String {
    let mut out = String::new();

    out.push_str("LAB REPORT ANALYSIS\n");
    out.push_str("===================\n\n");
    out.push_str(&format!(
        "Tests detected: {} ({} normal, {} abnormal)\n",
        result.total_tests, result.normal_count, result.abnormal_count
    ));

    finding_section(&mut out, "CRITICAL CONCERNS", &result.critical_concerns);
    finding_section(&mut out, "HIGH CONCERNS", &result.high_concerns);
    finding_section(&mut out, "MODERATE CONCERNS", &result.moderate_concerns);
    finding_section(&mut out, "MILD CONCERNS", &result.mild_concerns);
    finding_section(&mut out, "NORMAL RESULTS", &result.normal_results);

    advice_section(&mut out, "IMMEDIATE ACTIONS", &result.immediate_actions);
    advice_section(
        &mut out,
        "LIFESTYLE RECOMMENDATIONS",
        &result.lifestyle_recommendations,
    );
    advice_section(&mut out, "DIETARY ADVICE", &result.dietary_advice);
    advice_section(&mut out, "FOLLOW-UP ADVICE", &result.follow_up_advice);

    out
}

fn finding_section(out: &mut String, header: &str, findings: &[Finding]) {
    if findings.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(header);
    out.push('\n');
    for finding in findings {
        out.push_str("- ");
        out.push_str(&finding.message);
        out.push('\n');
    }
}

fn advice_section(out: &mut String, header: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(header);
    out.push('\n');
    for entry in entries {
        out.push_str("- ");
        out.push_str(entry);
        out.push('\n');
    }
}
