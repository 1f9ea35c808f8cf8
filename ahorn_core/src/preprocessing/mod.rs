//! Checks applied to datasheets before they are published.

pub mod validator;

pub use validator::{DatasheetLinter, LintIssue, LintReport, KEY_ORDER, REQUIRED_KEYS};
