use crate::rules::{CriticalRange, NormalRange, ParameterRule, RuleKind, Severity};

use super::messages::MessageTemplates;
use super::types::{Finding, Observation, ObservedValue, Status};

/// Classify one observation against its rule. Pure: reads only the parsed
/// observation, never the source text.
pub fn classify(rule: &ParameterRule, observation: &Observation) -> Finding {
    match (&rule.kind, &observation.value) {
        (
            RuleKind::Quantitative {
                normal,
                critical,
                low_severity,
                high_severity,
                low_message,
                high_message,
                ..
            },
            ObservedValue::Numeric(value),
        ) => classify_quantitative(
            rule,
            *value,
            normal,
            critical.as_ref(),
            *low_severity,
            *high_severity,
            low_message.as_deref(),
            high_message.as_deref(),
        ),
        (
            RuleKind::Qualitative {
                normal_token,
                synonyms,
                abnormal_message,
                severity,
            },
            ObservedValue::Token(token),
        ) => classify_qualitative(rule, token, normal_token, synonyms, abnormal_message, *severity),
        // A rule only ever produces its own value kind; a mismatched pair is
        // surfaced as an abnormal reading instead of panicking.
        _ => Finding {
            parameter: rule.name.clone(),
            value: None,
            value_text: None,
            unit: None,
            status: Status::Abnormal,
            severity: Severity::Moderate,
            family: rule.family,
            message: format!("{}: unrecognized reading", rule.name),
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn classify_quantitative(
    rule: &ParameterRule,
    value: f64,
    normal: &NormalRange,
    critical: Option<&CriticalRange>,
    low_severity: Option<Severity>,
    high_severity: Option<Severity>,
    low_message: Option<&str>,
    high_message: Option<&str>,
) -> Finding {
    let unit = normal.unit.as_str();

    let (status, severity, message) = if value >= normal.min && value <= normal.max {
        (
            Status::Normal,
            Severity::None,
            MessageTemplates::quantitative_normal(&rule.name, value, unit),
        )
    } else if value < normal.min {
        // Critical escalation applies only in the same direction the value
        // left the range.
        let severity = match critical.and_then(|c| c.min) {
            Some(floor) if value < floor => Severity::Critical,
            _ => low_severity.unwrap_or(Severity::Moderate),
        };
        (
            Status::Low,
            severity,
            MessageTemplates::quantitative_low(&rule.name, value, unit, normal, low_message),
        )
    } else {
        let severity = match critical.and_then(|c| c.max) {
            Some(ceiling) if value > ceiling => Severity::Critical,
            _ => high_severity.unwrap_or(Severity::Moderate),
        };
        (
            Status::High,
            severity,
            MessageTemplates::quantitative_high(&rule.name, value, unit, normal, high_message),
        )
    };

    Finding {
        parameter: rule.name.clone(),
        value: Some(value),
        value_text: None,
        unit: Some(unit.to_string()),
        status,
        severity,
        family: rule.family,
        message,
    }
}

fn classify_qualitative(
    rule: &ParameterRule,
    token: &str,
    normal_token: &str,
    synonyms: &[String],
    abnormal_message: &str,
    severity: Severity,
) -> Finding {
    let is_normal = token.eq_ignore_ascii_case(normal_token)
        || synonyms.iter().any(|s| token.eq_ignore_ascii_case(s));

    let (status, severity, message) = if is_normal {
        (
            Status::Normal,
            Severity::None,
            MessageTemplates::qualitative_normal(&rule.name, token),
        )
    } else {
        (
            Status::Abnormal,
            severity,
            MessageTemplates::qualitative_abnormal(&rule.name, token, abnormal_message),
        )
    };

    Finding {
        parameter: rule.name.clone(),
        value: None,
        value_text: Some(token.to_lowercase()),
        unit: None,
        status,
        severity,
        family: rule.family,
        message,
    }
}
