use tracing::debug;

use crate::rules::Severity;

use super::types::{Finding, TierBuckets};

/// Bucket classified findings by severity tier. Insertion order inside each
/// bucket is the order findings arrive in (rule declaration order), not
/// magnitude.
pub fn aggregate(findings: Vec<Finding>) -> TierBuckets {
    let mut buckets = TierBuckets::default();

    for finding in findings {
        match finding.severity {
            Severity::None => buckets.normal.push(finding),
            Severity::Mild => buckets.mild.push(finding),
            Severity::Moderate => buckets.moderate.push(finding),
            Severity::High => buckets.high.push(finding),
            Severity::Critical => buckets.critical.push(finding),
        }
    }

    debug!(
        total = buckets.total_tests(),
        normal = buckets.normal_count(),
        abnormal = buckets.abnormal_count(),
        "severity aggregation complete"
    );

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::Status;

    fn finding(parameter: &str, status: Status, severity: Severity) -> Finding {
        Finding {
            parameter: parameter.into(),
            value: Some(1.0),
            value_text: None,
            unit: None,
            status,
            severity,
            family: None,
            message: parameter.into(),
        }
    }

    #[test]
    fn findings_land_in_their_tier() {
        let buckets = aggregate(vec![
            finding("a", Status::Normal, Severity::None),
            finding("b", Status::Low, Severity::Mild),
            finding("c", Status::High, Severity::Moderate),
            finding("d", Status::Low, Severity::High),
            finding("e", Status::Abnormal, Severity::Critical),
        ]);

        assert_eq!(buckets.normal.len(), 1);
        assert_eq!(buckets.mild.len(), 1);
        assert_eq!(buckets.moderate.len(), 1);
        assert_eq!(buckets.high.len(), 1);
        assert_eq!(buckets.critical.len(), 1);
    }

    #[test]
    fn counts_always_balance() {
        let buckets = aggregate(vec![
            finding("a", Status::Normal, Severity::None),
            finding("b", Status::Normal, Severity::None),
            finding("c", Status::High, Severity::High),
        ]);
        assert_eq!(
            buckets.normal_count() + buckets.abnormal_count(),
            buckets.total_tests()
        );
        assert_eq!(buckets.total_tests(), 3);
    }

    #[test]
    fn insertion_order_is_preserved_within_a_tier() {
        let buckets = aggregate(vec![
            finding("first", Status::High, Severity::High),
            finding("second", Status::Low, Severity::High),
            finding("third", Status::High, Severity::High),
        ]);
        let order: Vec<&str> = buckets.high.iter().map(|f| f.parameter.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn empty_input_yields_empty_buckets() {
        let buckets = aggregate(Vec::new());
        assert_eq!(buckets.total_tests(), 0);
        assert!(buckets.abnormal().next().is_none());
    }
}
