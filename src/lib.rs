//! mixr - static composition resolver for mixin-based class models.
//!
//! Given a target class declaration and the ordered set of mixins attached
//! to it, mixr computes one immutable [`ClassComposition`] graph describing
//! how every mixin's members, introduced interfaces, and declarative
//! annotations attach to the target class. The graph is consumed by a
//! downstream code generator that emits the runtime proxy type.
//!
//! ```
//! use mixr::{DeclArena, compose};
//!
//! let mut arena = DeclArena::new();
//! let target = arena.add_class("Order");
//! arena.add_method(target, "total", &[], "Money");
//! let mixin = arena.add_class("AuditMixin");
//! arena.attach_mixin(target, mixin);
//!
//! let composition = compose(&arena, target).unwrap();
//! assert_eq!(composition.mixins().len(), 1);
//! ```

pub use mixr_common::{Atom, CompositionError, ErrorCategory, Interner};
pub use mixr_model::{
    AnnotationDecl, AnnotationId, AnnotationOwner, AnnotationPayload, CopySource, DeclArena,
    MemberDecl, MemberId, MemberKind, MixinConfig, Signature, TargetConfig, TypeDecl, TypeId,
    TypeKind, Visibility, member_flags,
};
pub use mixr_resolver::{
    AnnotationEntry, ClassComposition, CompositionBuilder, DefId, Dependency, DependencyId,
    EventIntroduction, InterfaceIntroduction, MemberDefinition, MethodIntroduction, MixinIndex,
    MixinNode, MultipleOverridePolicy, NonInterfaceIntroduction, NonIntroductionReason,
    PropertyIntroduction, Requester, Requirement, RequirementId, RequiredMember,
    RequiredMemberSource, ResolverOptions,
};

/// Build the composition for `target` with default options.
pub fn compose(arena: &DeclArena, target: TypeId) -> Result<ClassComposition, CompositionError> {
    compose_with_options(arena, target, &ResolverOptions::default())
}

/// Build the composition for `target` with explicit options.
pub fn compose_with_options(
    arena: &DeclArena,
    target: TypeId,
    options: &ResolverOptions,
) -> Result<ClassComposition, CompositionError> {
    CompositionBuilder::new(arena, options).build(target)
}
