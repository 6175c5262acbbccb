//! Resolver configuration options.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// Interfaces used internally by the composition runtime itself. They are
/// structural markers on every mixin and are never introduced onto a
/// target class.
pub static DEFAULT_INTERNAL_INTERFACES: Lazy<FxHashSet<String>> = Lazy::new(|| {
    ["IComposedObject", "IMixinTarget"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
});

/// Namespace prefixes whose annotation kinds belong to the resolver's own
/// control vocabulary. Matching annotations never propagate.
pub const DEFAULT_INTERNAL_ANNOTATION_NAMESPACES: &[&str] = &["mixr."];

/// Policy for a base member that ends up with more than one overrider
/// (e.g. two different mixins both declaring an override of the same
/// target member).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MultipleOverridePolicy {
    /// Fail the build naming the base member and both mixins.
    Reject,
    /// Record every overrider, ordered by mixin ordinal; generation-time
    /// semantics are last-mixin-wins.
    AllowOrdered,
}

/// Configuration options for the composition resolver.
#[derive(Clone, Debug)]
pub struct ResolverOptions {
    /// Interfaces that are never introduced onto a target class, even when
    /// a mixin implements them. Seeded with the runtime's own marker
    /// interfaces; embedding systems may extend the set.
    pub internal_interfaces: FxHashSet<String>,
    /// Annotation-kind namespace prefixes that never propagate.
    pub internal_annotation_namespaces: Vec<String>,
    /// How to treat multiple overriders of one base member.
    pub multiple_overrides: MultipleOverridePolicy,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        ResolverOptions {
            internal_interfaces: DEFAULT_INTERNAL_INTERFACES.clone(),
            internal_annotation_namespaces: DEFAULT_INTERNAL_ANNOTATION_NAMESPACES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            multiple_overrides: MultipleOverridePolicy::Reject,
        }
    }
}
