//! Declaration arena: owns every materialized declaration and hands out
//! typed integer ids.
//!
//! The arena is append-only. A declaration source populates it through the
//! `add_*`/`attach_*` methods, then passes it to the resolver read-only.
//! Ids index into the arena's own vectors, so back-references between
//! declarations never require shared ownership.

use crate::decl::{
    AnnotationDecl, AnnotationOwner, AnnotationPayload, CopySource, MemberDecl, MemberKind,
    MixinConfig, Signature, TargetConfig, TypeDecl, TypeKind, Visibility, member_flags,
};
use mixr_common::{Atom, Interner};
use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

/// Unique identifier for a declared type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
pub struct TypeId(pub u32);

/// Unique identifier for a declared member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
pub struct MemberId(pub u32);

/// Unique identifier for a declared annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
pub struct AnnotationId(pub u32);

/// Arena of materialized declarations for one composition model.
///
/// Each arena owns its own interner; atoms from one arena are meaningless
/// in another.
#[derive(Clone, Debug)]
pub struct DeclArena {
    interner: Interner,
    types: Vec<TypeDecl>,
    members: Vec<MemberDecl>,
    annotations: Vec<AnnotationDecl>,
    type_by_name: FxHashMap<Atom, TypeId>,
    mixin_configs: FxHashMap<TypeId, MixinConfig>,
    target_configs: FxHashMap<TypeId, TargetConfig>,
}

impl Default for DeclArena {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclArena {
    pub fn new() -> Self {
        Self {
            interner: Interner::new(),
            types: Vec::new(),
            members: Vec::new(),
            annotations: Vec::new(),
            type_by_name: FxHashMap::default(),
            mixin_configs: FxHashMap::default(),
            target_configs: FxHashMap::default(),
        }
    }

    // ===== Names =====

    /// Intern a name into this arena's pool.
    pub fn intern(&mut self, s: &str) -> Atom {
        self.interner.intern(s)
    }

    /// Resolve an atom back to its string.
    pub fn name(&self, atom: Atom) -> &str {
        self.interner.resolve(atom)
    }

    // ===== Type declarations =====

    fn add_type(&mut self, name: &str, kind: TypeKind) -> TypeId {
        let name = self.interner.intern(name);
        debug_assert!(
            !self.type_by_name.contains_key(&name),
            "type '{}' declared twice",
            self.interner.resolve(name)
        );
        let id = TypeId(self.types.len() as u32);
        self.types.push(TypeDecl {
            id,
            name,
            kind,
            members: Vec::new(),
            interfaces: Vec::new(),
            annotations: Vec::new(),
        });
        self.type_by_name.insert(name, id);
        id
    }

    /// Declare a class (usable as a composition target or a mixin).
    pub fn add_class(&mut self, name: &str) -> TypeId {
        self.add_type(name, TypeKind::Class)
    }

    /// Declare an interface.
    pub fn add_interface(&mut self, name: &str) -> TypeId {
        self.add_type(name, TypeKind::Interface)
    }

    /// Record that `ty` declares (implements or extends) `interface`.
    pub fn implement_interface(&mut self, ty: TypeId, interface: TypeId) {
        let decl = &mut self.types[ty.0 as usize];
        if !decl.interfaces.contains(&interface) {
            decl.interfaces.push(interface);
        }
    }

    /// Get a type declaration, if the id belongs to this arena.
    pub fn get_type(&self, id: TypeId) -> Option<&TypeDecl> {
        self.types.get(id.0 as usize)
    }

    /// Get a type declaration.
    ///
    /// # Panics
    ///
    /// Panics if the id was produced by a different arena.
    pub fn type_decl(&self, id: TypeId) -> &TypeDecl {
        &self.types[id.0 as usize]
    }

    /// Look up a declared type by name.
    pub fn type_named(&self, name: &str) -> Option<TypeId> {
        let atom = self.interner.lookup(name)?;
        self.type_by_name.get(&atom).copied()
    }

    /// The display name of a declared type.
    pub fn type_name(&self, id: TypeId) -> &str {
        self.interner.resolve(self.types[id.0 as usize].name)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.types.iter()
    }

    // ===== Member declarations =====

    fn add_member(
        &mut self,
        owner: TypeId,
        name: &str,
        kind: MemberKind,
        params: &[&str],
        value_type: &str,
    ) -> MemberId {
        let name = self.interner.intern(name);
        let params = params.iter().map(|p| self.interner.intern(p)).collect();
        let value_type = self.interner.intern(value_type);
        let id = MemberId(self.members.len() as u32);
        self.members.push(MemberDecl {
            id,
            owner,
            name,
            kind,
            signature: Signature { params, value_type },
            visibility: None,
            flags: 0,
            accessors: SmallVec::new(),
            annotations: Vec::new(),
        });
        self.types[owner.0 as usize].members.push(id);
        id
    }

    /// Declare a method on `owner`.
    pub fn add_method(
        &mut self,
        owner: TypeId,
        name: &str,
        params: &[&str],
        return_type: &str,
    ) -> MemberId {
        self.add_member(owner, name, MemberKind::Method, params, return_type)
    }

    /// Declare a property on `owner`.
    pub fn add_property(&mut self, owner: TypeId, name: &str, value_type: &str) -> MemberId {
        self.add_member(owner, name, MemberKind::Property, &[], value_type)
    }

    /// Declare an event on `owner`.
    pub fn add_event(&mut self, owner: TypeId, name: &str, handler_type: &str) -> MemberId {
        self.add_member(owner, name, MemberKind::Event, &[], handler_type)
    }

    /// Mark a member as declaring an override of a base member.
    pub fn mark_override(&mut self, member: MemberId) {
        self.members[member.0 as usize].flags |= member_flags::OVERRIDE;
    }

    /// Give a member an explicit visibility, overriding the owning mixin's
    /// default.
    pub fn set_visibility(&mut self, member: MemberId, visibility: Visibility) {
        self.members[member.0 as usize].visibility = Some(visibility);
    }

    /// Pair an accessor method with its property or event.
    pub fn add_accessor(&mut self, member: MemberId, accessor: MemberId) {
        debug_assert_eq!(
            self.members[accessor.0 as usize].kind,
            MemberKind::Method,
            "accessors must be methods"
        );
        self.members[member.0 as usize].accessors.push(accessor);
    }

    /// Get a member declaration, if the id belongs to this arena.
    pub fn get_member(&self, id: MemberId) -> Option<&MemberDecl> {
        self.members.get(id.0 as usize)
    }

    /// Get a member declaration.
    ///
    /// # Panics
    ///
    /// Panics if the id was produced by a different arena.
    pub fn member(&self, id: MemberId) -> &MemberDecl {
        &self.members[id.0 as usize]
    }

    /// The display name of a member.
    pub fn member_name(&self, id: MemberId) -> &str {
        self.interner.resolve(self.members[id.0 as usize].name)
    }

    /// Members declared directly on `ty`.
    pub fn members_of(&self, ty: TypeId) -> impl Iterator<Item = &MemberDecl> {
        self.types[ty.0 as usize]
            .members
            .iter()
            .map(|&id| &self.members[id.0 as usize])
    }

    /// Find a member of `ty` by name (first match in declaration order).
    pub fn member_named(&self, ty: TypeId, name: &str) -> Option<MemberId> {
        let atom = self.interner.lookup(name)?;
        self.members_of(ty).find(|m| m.name == atom).map(|m| m.id)
    }

    // ===== Annotations =====

    fn push_annotation(
        &mut self,
        owner: AnnotationOwner,
        kind: Atom,
        inheritable: bool,
        payload: AnnotationPayload,
    ) -> AnnotationId {
        let id = AnnotationId(self.annotations.len() as u32);
        self.annotations.push(AnnotationDecl {
            id,
            owner,
            kind,
            inheritable,
            payload,
        });
        match owner {
            AnnotationOwner::Type(ty) => self.types[ty.0 as usize].annotations.push(id),
            AnnotationOwner::Member(m) => self.members[m.0 as usize].annotations.push(id),
        }
        id
    }

    /// Declare an ordinary annotation on an entity.
    pub fn add_annotation(&mut self, owner: AnnotationOwner, kind: &str) -> AnnotationId {
        let kind = self.interner.intern(kind);
        self.push_annotation(owner, kind, true, AnnotationPayload::Plain)
    }

    /// Declare an ordinary annotation whose kind is not inheritable.
    pub fn add_non_inheritable_annotation(
        &mut self,
        owner: AnnotationOwner,
        kind: &str,
    ) -> AnnotationId {
        let kind = self.interner.intern(kind);
        self.push_annotation(owner, kind, false, AnnotationPayload::Plain)
    }

    /// Declare a copy-forwarding directive on an entity.
    pub fn add_copy_annotation(
        &mut self,
        owner: AnnotationOwner,
        source_type: &str,
        source_member: Option<&str>,
    ) -> AnnotationId {
        let type_name = self.interner.intern(source_type);
        let member_name = source_member.map(|m| self.interner.intern(m));
        let kind = self.interner.intern("copy");
        self.push_annotation(
            owner,
            kind,
            false,
            AnnotationPayload::CopyFrom(CopySource {
                type_name,
                member_name,
            }),
        )
    }

    /// Declare a suppression directive on an entity.
    pub fn add_suppress_annotation(
        &mut self,
        owner: AnnotationOwner,
        suppressed_kind: &str,
    ) -> AnnotationId {
        let suppressed = self.interner.intern(suppressed_kind);
        let kind = self.interner.intern("suppress");
        self.push_annotation(owner, kind, false, AnnotationPayload::Suppress(suppressed))
    }

    /// Get an annotation declaration.
    ///
    /// # Panics
    ///
    /// Panics if the id was produced by a different arena.
    pub fn annotation(&self, id: AnnotationId) -> &AnnotationDecl {
        &self.annotations[id.0 as usize]
    }

    /// Directly declared annotations of an entity.
    pub fn annotations_of(&self, owner: AnnotationOwner) -> &[AnnotationId] {
        match owner {
            AnnotationOwner::Type(ty) => &self.types[ty.0 as usize].annotations,
            AnnotationOwner::Member(m) => &self.members[m.0 as usize].annotations,
        }
    }

    // ===== Mixin / target configuration =====

    /// Attach `mixin` to `target`, in declaration order. Attaching the same
    /// mixin twice is a no-op.
    pub fn attach_mixin(&mut self, target: TypeId, mixin: TypeId) {
        let config = self.target_configs.entry(target).or_default();
        if !config.mixins.contains(&mixin) {
            config.mixins.push(mixin);
        }
        self.mixin_configs.entry(mixin).or_default();
    }

    /// Declare that `mixin` depends on `required` being supplied by the
    /// composition (by the target, another mixin, or a composed interface).
    pub fn add_mixin_dependency(&mut self, mixin: TypeId, required: TypeId) {
        self.mixin_configs
            .entry(mixin)
            .or_default()
            .dependencies
            .push(required);
    }

    /// Declare that `mixin` implements `interface` but never introduces it
    /// onto the target.
    pub fn suppress_introduction(&mut self, mixin: TypeId, interface: TypeId) {
        self.mixin_configs
            .entry(mixin)
            .or_default()
            .suppressed_interfaces
            .push(interface);
    }

    /// Set the default visibility for members `mixin` introduces.
    pub fn set_default_visibility(&mut self, mixin: TypeId, visibility: Visibility) {
        self.mixin_configs.entry(mixin).or_default().default_visibility = visibility;
    }

    /// Declare a composed interface on `target`.
    pub fn add_composed_interface(&mut self, target: TypeId, interface: TypeId) {
        self.target_configs
            .entry(target)
            .or_default()
            .composed_interfaces
            .push(interface);
    }

    pub fn target_config(&self, target: TypeId) -> Option<&TargetConfig> {
        self.target_configs.get(&target)
    }

    pub fn mixin_config(&self, mixin: TypeId) -> Option<&MixinConfig> {
        self.mixin_configs.get(&mixin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declares_types_and_looks_them_up_by_name() {
        let mut arena = DeclArena::new();
        let class = arena.add_class("Order");
        let iface = arena.add_interface("IAuditable");
        assert_eq!(arena.type_named("Order"), Some(class));
        assert_eq!(arena.type_named("IAuditable"), Some(iface));
        assert_eq!(arena.type_named("Missing"), None);
        assert_eq!(arena.type_decl(class).kind, TypeKind::Class);
        assert_eq!(arena.type_decl(iface).kind, TypeKind::Interface);
    }

    #[test]
    fn members_keep_declaration_order() {
        let mut arena = DeclArena::new();
        let class = arena.add_class("Order");
        let m1 = arena.add_method(class, "total", &[], "Money");
        let p1 = arena.add_property(class, "id", "Guid");
        let names: Vec<&str> = arena.members_of(class).map(|m| arena.name(m.name)).collect();
        assert_eq!(names, ["total", "id"]);
        assert_eq!(arena.member_named(class, "total"), Some(m1));
        assert_eq!(arena.member_named(class, "id"), Some(p1));
    }

    #[test]
    fn accessor_pairing_links_methods_to_their_property() {
        let mut arena = DeclArena::new();
        let class = arena.add_class("Order");
        let prop = arena.add_property(class, "total", "Money");
        let getter = arena.add_method(class, "get_total", &[], "Money");
        arena.add_accessor(prop, getter);
        assert_eq!(arena.member(prop).accessors.as_slice(), &[getter]);
    }

    #[test]
    fn mixin_attachment_is_ordered_and_idempotent() {
        let mut arena = DeclArena::new();
        let target = arena.add_class("Order");
        let x = arena.add_class("AuditMixin");
        let y = arena.add_class("LogMixin");
        arena.attach_mixin(target, x);
        arena.attach_mixin(target, y);
        arena.attach_mixin(target, x);
        let config = arena.target_config(target).unwrap();
        assert_eq!(config.mixins, vec![x, y]);
        assert!(arena.mixin_config(x).is_some());
    }

    #[test]
    fn annotations_attach_to_their_owner() {
        let mut arena = DeclArena::new();
        let class = arena.add_class("Order");
        let member = arena.add_method(class, "total", &[], "Money");
        let on_type = arena.add_annotation(AnnotationOwner::Type(class), "Serializable");
        let on_member =
            arena.add_non_inheritable_annotation(AnnotationOwner::Member(member), "Cached");
        assert_eq!(arena.annotations_of(AnnotationOwner::Type(class)), &[on_type]);
        assert_eq!(
            arena.annotations_of(AnnotationOwner::Member(member)),
            &[on_member]
        );
        assert!(arena.annotation(on_type).inheritable);
        assert!(!arena.annotation(on_member).inheritable);
    }
}
