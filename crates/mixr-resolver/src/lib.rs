//! Static composition resolver for the mixr mixin model.
//!
//! Given a target class declaration and the ordered set of mixins attached
//! to it, the resolver computes one immutable `ClassComposition` graph
//! describing how every mixin's members, introduced interfaces, and
//! declarative annotations attach to the target class. The graph is the
//! single source of truth for a downstream proxy-type generator.
//!
//! The build runs as a fixed sequence of passes over one mutable graph:
//! requirement collection, mixin ordering, interface introduction,
//! required-member resolution, override resolution, and annotation
//! propagation. Each pass lives in its own module as an `impl` block on
//! `ResolverState`; `CompositionBuilder` sequences them and freezes the
//! result. A build either completes or fails with a single
//! `CompositionError` - no partial composition is ever returned.

pub mod builder;
pub mod composition;
pub mod options;

mod annotations;
mod introductions;
mod matching;
mod ordering;
mod overrides;
mod required_members;
mod requirements;
mod state;

mod error_reporter;

pub use builder::CompositionBuilder;
pub use composition::{
    AnnotationEntry, ClassComposition, DefId, Dependency, DependencyId, EventIntroduction,
    InterfaceIntroduction, MemberDefinition, MethodIntroduction, MixinIndex, MixinNode,
    NonInterfaceIntroduction, NonIntroductionReason, PropertyIntroduction, Requester, Requirement,
    RequirementId, RequiredMember, RequiredMemberSource,
};
pub use options::{
    DEFAULT_INTERNAL_ANNOTATION_NAMESPACES, DEFAULT_INTERNAL_INTERFACES, MultipleOverridePolicy,
    ResolverOptions,
};
