use tracing::{debug, warn};

use crate::rules::{CompiledRule, RuleKind, RuleTable};

use super::types::{Observation, ObservedValue};

/// Scan normalized (lower-cased) text against the full rule table. Each rule
/// yields at most one observation; rules whose patterns never match yield
/// nothing; absence is not a finding.
pub fn extract(text: &str, table: &RuleTable) -> Vec<Observation> {
    let mut observations = Vec::new();

    for compiled in table.rules() {
        if let Some(observation) = extract_one(text, compiled) {
            observations.push(observation);
        }
    }

    debug!(
        rules = table.len(),
        observations = observations.len(),
        "parameter extraction pass complete"
    );

    observations
}

/// Try a rule's patterns in declared order; the first pattern that matches
/// (and, for quantitative rules, parses) wins. A matched substring that
/// fails to parse is treated as a non-match and the remaining patterns are
/// still tried.
fn extract_one(text: &str, compiled: &CompiledRule) -> Option<Observation> {
    for regex in &compiled.patterns {
        let Some(captures) = regex.captures(text) else {
            continue;
        };
        let raw = captures.get(1).map_or("", |m| m.as_str());

        match &compiled.rule.kind {
            RuleKind::Quantitative { normalizer, .. } => {
                let Some(parsed) = parse_value(raw) else {
                    warn!(
                        rule = %compiled.rule.name,
                        matched = raw,
                        "matched value failed numeric parse; treating as non-match"
                    );
                    continue;
                };

                let value = match normalizer {
                    Some(n) => {
                        let corrected = n.apply(parsed);
                        if corrected != parsed {
                            warn!(
                                rule = %compiled.rule.name,
                                raw = parsed,
                                corrected,
                                "value normalizer rewrote implausible reading"
                            );
                        }
                        corrected
                    }
                    None => parsed,
                };

                return Some(Observation {
                    parameter: compiled.rule.name.clone(),
                    value: ObservedValue::Numeric(value),
                });
            }
            RuleKind::Qualitative { .. } => {
                return Some(Observation {
                    parameter: compiled.rule.name.clone(),
                    value: ObservedValue::Token(raw.to_lowercase()),
                });
            }
        }
    }

    None
}

/// Parse a captured numeric substring: thousands separators stripped first,
/// non-finite results rejected.
fn parse_value(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
