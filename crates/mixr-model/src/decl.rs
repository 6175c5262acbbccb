//! Declaration payloads stored in the `DeclArena`.

use crate::arena::{AnnotationId, MemberId, TypeId};
use mixr_common::Atom;
use serde::Serialize;
use smallvec::SmallVec;

/// Whether a declared type is a class or an interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TypeKind {
    Class,
    Interface,
}

/// Member discriminator. Methods paired with a property or event (accessor
/// methods) stay in the member list but are linked from their owner via
/// `MemberDecl::accessors`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MemberKind {
    Method,
    Property,
    Event,
}

impl MemberKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Method => "method",
            MemberKind::Property => "property",
            MemberKind::Event => "event",
        }
    }
}

/// Member visibility on the composed target surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Public,
    Internal,
    Private,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Private
    }
}

/// Declaration flags for members.
pub mod member_flags {
    /// The member declares that it overrides a base member found elsewhere
    /// in the composition (on the target class or an earlier mixin).
    pub const OVERRIDE: u32 = 1 << 0;
}

/// A member's matching signature.
///
/// Methods match on name + parameter types + value type; properties and
/// events have no parameters and match on name + value type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Signature {
    /// Parameter type names (methods only; empty for properties/events).
    pub params: Vec<Atom>,
    /// Return type for methods, value type for properties, handler type
    /// for events.
    pub value_type: Atom,
}

/// One declared type: a class (target or mixin) or an interface.
#[derive(Clone, Debug, Serialize)]
pub struct TypeDecl {
    pub id: TypeId,
    pub name: Atom,
    pub kind: TypeKind,
    /// Directly declared members, in declaration order.
    pub members: Vec<MemberId>,
    /// Declared (implemented or extended) interfaces.
    pub interfaces: Vec<TypeId>,
    /// Directly declared annotations.
    pub annotations: Vec<AnnotationId>,
}

/// One declared member of a type.
#[derive(Clone, Debug, Serialize)]
pub struct MemberDecl {
    pub id: MemberId,
    pub owner: TypeId,
    pub name: Atom,
    pub kind: MemberKind,
    pub signature: Signature,
    /// Explicit visibility override; `None` falls back to the owning
    /// mixin's configured default.
    pub visibility: Option<Visibility>,
    /// See `member_flags`.
    pub flags: u32,
    /// For properties/events: the accessor methods paired with this member
    /// (getter/setter, add/remove). Introduction analysis skips these
    /// methods to avoid double-counting.
    pub accessors: SmallVec<[MemberId; 2]>,
    /// Directly declared annotations.
    pub annotations: Vec<AnnotationId>,
}

impl MemberDecl {
    #[inline]
    pub fn is_override(&self) -> bool {
        self.flags & member_flags::OVERRIDE != 0
    }
}

/// The entity an annotation is declared on or attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AnnotationOwner {
    Type(TypeId),
    Member(MemberId),
}

/// The named source entity of a copy-forwarding directive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CopySource {
    pub type_name: Atom,
    /// `None` copies from the type itself; `Some` from one of its members.
    pub member_name: Option<Atom>,
}

/// What a declared annotation means to the propagation engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum AnnotationPayload {
    /// An ordinary annotation instance of kind `AnnotationDecl::kind`.
    Plain,
    /// A "copy annotations from elsewhere" directive.
    CopyFrom(CopySource),
    /// A "suppress annotations of kind X" directive. Only suppresses
    /// occurrences originating from entities other than the declaring one.
    Suppress(Atom),
}

/// One declared annotation instance.
#[derive(Clone, Debug, Serialize)]
pub struct AnnotationDecl {
    pub id: AnnotationId,
    pub owner: AnnotationOwner,
    /// The annotation's kind name. Kinds inside a configured internal
    /// namespace are control vocabulary and never propagate.
    pub kind: Atom,
    /// Whether the annotation kind is marked as inheritable. Cross-entity
    /// copies forward only inheritable annotations; the self-copy idiom
    /// exists to re-declare the non-inheritable ones.
    pub inheritable: bool,
    pub payload: AnnotationPayload,
}

/// Per-mixin configuration from the declaration source.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MixinConfig {
    /// Declared dependency/ordering hints: types that must be supplied by
    /// the composition for this mixin to function.
    pub dependencies: Vec<TypeId>,
    /// Interfaces this mixin implements but explicitly does not introduce
    /// onto the target.
    pub suppressed_interfaces: Vec<TypeId>,
    /// Default visibility for members this mixin introduces.
    pub default_visibility: Visibility,
}

/// Per-target-class configuration from the declaration source.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TargetConfig {
    /// Attached mixins, in declaration order.
    pub mixins: Vec<TypeId>,
    /// Composed interfaces declared on the target; each produces a
    /// requirement with the target as requester.
    pub composed_interfaces: Vec<TypeId>,
}
