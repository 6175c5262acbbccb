//! Common types and utilities for the mixr composition resolver.
//!
//! This crate provides foundational types used across all mixr crates:
//! - String interning (`Atom`, `Interner`)
//! - Composition diagnostics (`CompositionError`, diagnostic codes/messages)
//! - Centralized limits and thresholds

// String interning for name deduplication
pub mod interner;
pub use interner::{Atom, Interner};

// Composition error reporting
pub mod diagnostics;
pub use diagnostics::{CompositionError, ErrorCategory, format_message};

// Centralized limits and thresholds
pub mod limits;
