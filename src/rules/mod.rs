pub mod builtin;
pub mod schema;
pub mod table;

pub use builtin::builtin_rules;
pub use schema::*;
pub use table::{CompiledRule, RuleTable};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("rule file read failed ({path}): {message}")]
    Load { path: String, message: String },

    #[error("rule table parse failed: {0}")]
    Parse(String),

    #[error("invalid pattern for rule '{rule}': {message}")]
    InvalidPattern { rule: String, message: String },

    #[error("pattern for rule '{rule}' must capture exactly one value: {pattern}")]
    BadCapture { rule: String, pattern: String },

    #[error("invalid rule '{rule}': {message}")]
    InvalidRule { rule: String, message: String },

    #[error("duplicate rule name: {0}")]
    DuplicateRule(String),
}
