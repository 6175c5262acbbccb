//! Composition error types and message lookup.
//!
//! Message data lives in `data.rs`. Every detectable contradiction in a
//! composition surfaces as a single `CompositionError`; input-contract
//! violations are distinguished from composition-logic errors by category
//! and are reported before any graph construction takes place.

use serde::Serialize;
use std::fmt;

// Diagnostic messages and diagnostic_codes
pub mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

/// Error category.
///
/// `InvalidInput` marks programmer errors in the declarations handed to the
/// resolver (missing types, a non-class target). `Composition` marks
/// contradictions between otherwise well-formed declarations (ordering
/// cycles, duplicate introductions, unresolved overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    InvalidInput = 0,
    Composition = 1,
}

/// A composition diagnostic message definition with code, category, and
/// message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: ErrorCategory,
    pub message: &'static str,
}

/// The single fatal error kind covering all build-time contradictions.
///
/// No partial composition is ever returned alongside one of these; a build
/// either completes or fails with exactly one `CompositionError`.
#[derive(Clone, Debug, Serialize)]
pub struct CompositionError {
    pub category: ErrorCategory,
    pub code: u32,
    pub message_text: String,
    /// Additional context lines (e.g. the declaration sites that requested
    /// an unsatisfied requirement).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<String>,
}

impl CompositionError {
    /// Create an error from a message definition, substituting `{0}`, `{1}`,
    /// etc. with `args`.
    #[must_use]
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            category: message.category,
            code: message.code,
            message_text: format_message(message.message, args),
            related_information: Vec::new(),
        }
    }

    /// Add a related-information line to this error.
    #[must_use]
    pub fn with_related(mut self, info: impl Into<String>) -> Self {
        self.related_information.push(info.into());
        self
    }
}

impl fmt::Display for CompositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MX{}: {}", self.code, self.message_text)?;
        for info in &self.related_information {
            write!(f, "\n  {info}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CompositionError {}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Look up the message template for a diagnostic code.
pub fn get_message_template(code: u32) -> Option<&'static str> {
    DIAGNOSTIC_MESSAGES
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_message_substitutes_in_order() {
        assert_eq!(
            format_message("Interface '{0}' is introduced by both mixin '{1}' and mixin '{2}'", &["IBar", "X", "Y"]),
            "Interface 'IBar' is introduced by both mixin 'X' and mixin 'Y'"
        );
    }

    #[test]
    fn error_display_includes_code_and_related() {
        let err = CompositionError::new(
            &diagnostic_messages::UNKNOWN_TYPE,
            &["Missing"],
        )
        .with_related("requested by mixin 'X'");
        let text = err.to_string();
        assert!(text.contains("MX1001"));
        assert!(text.contains("Missing"));
        assert!(text.contains("requested by mixin 'X'"));
    }

    #[test]
    fn codes_are_unique() {
        let mut seen = rustc_hash::FxHashSet::default();
        for message in DIAGNOSTIC_MESSAGES {
            assert!(seen.insert(message.code), "duplicate code {}", message.code);
        }
    }

    #[test]
    fn template_lookup_matches_table() {
        let template = get_message_template(diagnostic_codes::CYCLIC_MIXIN_DEPENDENCY);
        assert_eq!(
            template,
            Some(diagnostic_messages::CYCLIC_MIXIN_DEPENDENCY.message)
        );
    }
}
