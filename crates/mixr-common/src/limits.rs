//! Centralized limits and thresholds for the composition resolver.
//!
//! The resolver's work is bounded by the size of the input declarations,
//! so these are safety backstops against pathological or cyclic input
//! rather than tuning knobs.

/// Maximum recursion depth when following annotation copy-forwarding
/// directives across entities. Chains deeper than this are rejected with
/// a composition error; well-formed declarations stay far below it.
pub const MAX_ANNOTATION_COPY_DEPTH: usize = 16;

/// Maximum length of a dependency aggregator chain walked when collecting
/// the declaration sites behind a requirement for diagnostics.
pub const MAX_DEPENDENCY_CHAIN: usize = 4096;
