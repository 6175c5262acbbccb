//! Materialized declaration model for the mixr composition resolver.
//!
//! The resolver never reflects over live code. Instead, a declaration
//! source materializes every class, mixin, interface, member, and
//! annotation into a `DeclArena` up front; the resolver consumes that
//! arena read-only. Cross-references between declarations are typed
//! integer ids (`TypeId`, `MemberId`, `AnnotationId`) into the arena's
//! own collections, so the model carries no shared mutable ownership.

pub mod arena;
pub mod decl;

pub use arena::{AnnotationId, DeclArena, MemberId, TypeId};
pub use decl::{
    AnnotationDecl, AnnotationOwner, AnnotationPayload, CopySource, MemberDecl, MemberKind,
    MixinConfig, Signature, TargetConfig, TypeDecl, TypeKind, Visibility, member_flags,
};
