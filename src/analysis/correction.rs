//! Post-OCR correction of clinical parameter names.
//!
//! OCR regularly misreads parameter names ("hemogIobin", "creatiniue"),
//! which would make every pattern miss. Each word is checked against a
//! dictionary of the terms the rule table scans for and replaced when it is
//! an unambiguous near-miss. Corrections require word length >= 5 and edit
//! distance <= 2; shorter words and ambiguous matches are left untouched.

/// Parameter-name vocabulary, lowercase, sorted for binary search.
const CLINICAL_TERMS: &[&str] = &[
    "alanine",
    "aminotransferase",
    "aspartate",
    "bilirubin",
    "cholesterol",
    "cobalamin",
    "creatinine",
    "glucose",
    "hemoglobin",
    "ketones",
    "leukocyte",
    "nitrogen",
    "platelet",
    "platelets",
    "protein",
    "thyroid",
    "triglyceride",
    "triglycerides",
    "vitamin",
];

/// Correct clinical terms in sanitized (not yet lower-cased) text.
pub fn correct_clinical_terms(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word = String::new();

    for ch in text.chars() {
        if ch.is_alphabetic() {
            word.push(ch);
        } else {
            flush_word(&mut out, &mut word);
            out.push(ch);
        }
    }
    flush_word(&mut out, &mut word);

    out
}

fn flush_word(out: &mut String, word: &mut String) {
    if word.is_empty() {
        return;
    }
    match correct_word(word) {
        Some(corrected) => out.push_str(&corrected),
        None => out.push_str(word),
    }
    word.clear();
}

/// Returns the corrected word, or `None` when the word should stand as-is.
fn correct_word(word: &str) -> Option<String> {
    if word.chars().count() < 5 {
        return None;
    }

    let lower = word.to_lowercase();
    if CLINICAL_TERMS.binary_search(&lower.as_str()).is_ok() {
        return None;
    }

    let word_len = lower.chars().count() as i64;
    let mut best: Option<&str> = None;
    let mut best_distance = 3u32;
    let mut tied = false;

    for &term in CLINICAL_TERMS {
        // Length pre-filter: distance is at least the length difference.
        if (term.chars().count() as i64 - word_len).abs() > 2 {
            continue;
        }
        let distance = edit_distance(&lower, term);
        if distance < best_distance {
            best_distance = distance;
            best = Some(term);
            tied = false;
        } else if distance == best_distance && best.is_some() {
            tied = true;
        }
    }

    match best {
        Some(term) if !tied => Some(match_case(word, term)),
        _ => None,
    }
}

/// Carry the original word's capitalization onto the replacement: all-caps
/// stays all-caps, a leading capital stays capitalized.
fn match_case(original: &str, replacement: &str) -> String {
    if original.chars().all(|c| c.is_uppercase()) {
        return replacement.to_uppercase();
    }
    if original.chars().next().is_some_and(|c| c.is_uppercase()) {
        let mut chars = replacement.chars();
        return match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
    }
    replacement.to_string()
}

/// Levenshtein distance over chars, two-row rolling buffer.
fn edit_distance(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len() as u32;
    }
    if b.is_empty() {
        return a.len() as u32;
    }

    let mut previous: Vec<u32> = (0..=b.len() as u32).collect();
    let mut current = vec![0u32; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i as u32 + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + u32::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}
