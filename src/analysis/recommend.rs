//! Recommendation synthesis.
//!
//! Advice is a static registry keyed by condition family. A family's pack is
//! appended once if any abnormal finding carries that family, however many
//! findings match; deduplication is by family, not by string. Immediate
//! actions follow strict precedence: critical > high > none-abnormal.

use tracing::debug;

use crate::rules::ConditionFamily;

use super::messages::{ALL_NORMAL_ACTIONS, CRITICAL_ACTIONS, HIGH_ACTIONS};
use super::types::{Recommendations, TierBuckets};

struct AdvicePack {
    family: ConditionFamily,
    lifestyle: &'static [&'static str],
    dietary: &'static [&'static str],
    follow_up: &'static [&'static str],
}

/// Registry order fixes the order advice blocks appear in the output.
static ADVICE_PACKS: &[AdvicePack] = &[
    AdvicePack {
        family: ConditionFamily::Lipid,
        lifestyle: &[
            "Exercise: 30 minutes of cardio daily, 5 days a week",
            "Avoid smoking and limit alcohol consumption",
        ],
        dietary: &[
            "Reduce saturated fats (red meat, butter, cheese)",
            "Increase omega-3 fatty acids (fish, nuts, seeds)",
            "Increase fiber intake (oats, beans, vegetables)",
        ],
        follow_up: &[
            "Repeat lipid profile in 3 months",
            "Consider a cardiology consultation",
        ],
    },
    AdvicePack {
        family: ConditionFamily::Glucose,
        lifestyle: &[
            "Monitor blood sugar levels daily",
            "Maintain a healthy body weight (BMI 18.5-24.9)",
        ],
        dietary: &[
            "Limit refined sugars and carbohydrates",
            "Focus on low glycemic index foods",
            "Avoid sugary beverages",
        ],
        follow_up: &[
            "Consult an endocrinologist for diabetes management",
            "HbA1c test every 3 months",
        ],
    },
    AdvicePack {
        family: ConditionFamily::Liver,
        lifestyle: &[
            "Avoid alcohol completely",
            "Review all medications with your doctor",
        ],
        dietary: &[
            "Eat liver-friendly foods (leafy greens, berries)",
            "Stay well-hydrated (8-10 glasses of water daily)",
        ],
        follow_up: &[
            "Liver function tests in 4-6 weeks",
            "Consider a hepatology consultation",
        ],
    },
    AdvicePack {
        family: ConditionFamily::Kidney,
        lifestyle: &[
            "Stay well-hydrated (2-3 liters of water daily)",
            "Limit salt intake",
        ],
        dietary: &[
            "Monitor protein intake - consult a dietitian",
            "Limit potassium if advised by your doctor",
        ],
        follow_up: &[
            "Kidney function tests in 2-4 weeks",
            "Nephrology consultation recommended",
        ],
    },
    AdvicePack {
        family: ConditionFamily::Anemia,
        lifestyle: &[],
        dietary: &[
            "Increase iron-rich foods (red meat, spinach, lentils)",
            "Vitamin C aids iron absorption (citrus fruits)",
            "Iron supplements as prescribed by your doctor",
        ],
        follow_up: &["Complete blood count in 6-8 weeks"],
    },
    AdvicePack {
        family: ConditionFamily::Thyroid,
        lifestyle: &[],
        dietary: &[],
        follow_up: &[
            "Thyroid function monitoring every 6-12 weeks",
            "Endocrinology consultation for thyroid management",
        ],
    },
    AdvicePack {
        family: ConditionFamily::Vitamin,
        lifestyle: &[],
        dietary: &[
            "Vitamin D: 15-20 minutes of sun exposure daily",
            "Fortified foods (milk, cereals) for vitamin D",
            "B12 sources: eggs, dairy, meat, fortified cereals",
        ],
        follow_up: &["Recheck vitamin levels in 3 months"],
    },
];

/// Generic advice when abnormal findings exist but no family matched.
static GENERIC_LIFESTYLE: &[&str] = &[
    "Regular exercise - 150 minutes of moderate activity a week",
    "Adequate sleep - 7-9 hours nightly",
    "Stress management - meditation, yoga",
];

static GENERIC_DIETARY: &[&str] = &[
    "Balanced diet with fruits and vegetables",
    "Adequate hydration - 8-10 glasses of water daily",
];

/// Maintenance advice for an all-normal report.
static MAINTAIN_LIFESTYLE: &str = "Continue current healthy lifestyle";
static MAINTAIN_DIETARY: &str = "Maintain a balanced, nutritious diet";

/// Build the four advice lists from the bucketed findings.
pub fn synthesize(buckets: &TierBuckets) -> Recommendations {
    let mut recs = Recommendations::default();

    let has_abnormal = buckets.abnormal_count() > 0;

    // Immediate actions: mutually exclusive by precedence.
    if !buckets.critical.is_empty() {
        extend(&mut recs.immediate_actions, CRITICAL_ACTIONS);
    } else if !buckets.high.is_empty() {
        extend(&mut recs.immediate_actions, HIGH_ACTIONS);
    } else if !has_abnormal {
        extend(&mut recs.immediate_actions, ALL_NORMAL_ACTIONS);
    }

    // One pass over abnormal findings collects which families are present.
    let mut families: Vec<ConditionFamily> = Vec::new();
    for finding in buckets.abnormal() {
        if let Some(family) = finding.family {
            if !families.contains(&family) {
                families.push(family);
            }
        }
    }

    for pack in ADVICE_PACKS {
        if families.contains(&pack.family) {
            extend(&mut recs.lifestyle, pack.lifestyle);
            extend(&mut recs.dietary, pack.dietary);
            extend(&mut recs.follow_up, pack.follow_up);
        }
    }

    // Fallbacks keep the lists meaningful when nothing family-specific fired.
    if recs.lifestyle.is_empty() && has_abnormal {
        extend(&mut recs.lifestyle, GENERIC_LIFESTYLE);
    }
    if recs.dietary.is_empty() && has_abnormal {
        extend(&mut recs.dietary, GENERIC_DIETARY);
    }
    if !has_abnormal {
        recs.lifestyle.push(MAINTAIN_LIFESTYLE.to_string());
        recs.dietary.push(MAINTAIN_DIETARY.to_string());
    }

    debug!(
        families = families.len(),
        immediate = recs.immediate_actions.len(),
        "recommendation synthesis complete"
    );

    recs
}

fn extend(list: &mut Vec<String>, entries: &[&str]) {
    list.extend(entries.iter().map(|e| (*e).to_string()));
}
