//! The resolved composition graph.
//!
//! All nodes are created during a single build invocation and addressed by
//! typed indices into arena-owned collections (`DefId`, `RequirementId`,
//! `DependencyId`), so the graph's circular back-references (members point
//! to their overriders, overriders point back to base members) never
//! require shared mutable ownership. The graph is mutable while the
//! resolver passes run and frozen when the builder returns it.

use mixr_common::Atom;
use mixr_model::{AnnotationId, AnnotationOwner, MemberId, TypeId, Visibility};
use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

/// Zero-based ordinal of a mixin after ordering. Consistent with the
/// sorted mixin collection: `composition.mixins()[index.0]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
pub struct MixinIndex(pub u32);

/// Identifier of a composed member definition within one composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
pub struct DefId(pub u32);

/// Identifier of a requirement node within one composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
pub struct RequirementId(pub u32);

/// Identifier of a dependency edge within one composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
pub struct DependencyId(pub u32);

/// One member participating in the composition, owned by the target class
/// or by one mixin.
#[derive(Clone, Debug, Serialize)]
pub struct MemberDefinition {
    pub id: DefId,
    /// The underlying declaration.
    pub decl: MemberId,
    /// The declaring type (target class or mixin).
    pub owner: TypeId,
    /// The base member this member overrides, if it is an overrider.
    /// At most one direct base; the relation is acyclic.
    pub base: Option<DefId>,
    /// Members that override this member, ordered by mixin ordinal.
    pub overriders: SmallVec<[DefId; 1]>,
    /// Resolved annotation entries for this member.
    pub annotations: Vec<AnnotationEntry>,
}

/// Who asked for a requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Requester {
    /// A mixin's declared dependency.
    Mixin(TypeId),
    /// The target class, via one of its composed-interface declarations.
    ComposedInterface(TypeId),
}

/// One concrete declaration site that produced (or joined) a requirement.
#[derive(Clone, Debug, Serialize)]
pub struct Dependency {
    pub id: DependencyId,
    pub requester: Requester,
    pub requirement: RequirementId,
    /// The first edge recorded for the same requirement, preserving the
    /// causal chain for diagnostics. `None` on the edge that created the
    /// requirement.
    pub aggregator: Option<DependencyId>,
}

/// How one required interface member is satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RequiredMemberSource {
    /// The target class declares the interface and implements the member.
    TargetMember(DefId),
    /// A mixin introduces the interface; its implementing member is used.
    Introduced { mixin: TypeId, member: DefId },
    /// Structural (duck-typed) match against a target member.
    Structural(DefId),
}

/// One interface member a requirement must supply, paired with the member
/// that satisfies it. Never left unresolved in a successful build.
#[derive(Clone, Debug, Serialize)]
pub struct RequiredMember {
    /// The interface member declaration.
    pub decl: MemberId,
    pub source: RequiredMemberSource,
}

/// A declared need for some type to be supplied by the composition,
/// aggregating every dependency edge that asked for it.
#[derive(Clone, Debug, Serialize)]
pub struct Requirement {
    pub id: RequirementId,
    pub required_type: TypeId,
    /// All edges that asked for this type, in discovery order.
    pub edges: SmallVec<[DependencyId; 2]>,
    /// Per-member resolutions when the required type is an interface.
    pub required_members: Vec<RequiredMember>,
}

/// An introduced interface method and its implementing mixin member.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct MethodIntroduction {
    pub interface_member: MemberId,
    pub implementer: DefId,
    pub visibility: Visibility,
}

/// An introduced interface property and its implementing mixin member.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PropertyIntroduction {
    pub interface_member: MemberId,
    pub implementer: DefId,
    pub visibility: Visibility,
}

/// An introduced interface event and its implementing mixin member.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct EventIntroduction {
    pub interface_member: MemberId,
    pub implementer: DefId,
    pub visibility: Visibility,
}

/// An interface a mixin introduces onto the target class, with every
/// interface member resolved to its implementing mixin member.
#[derive(Clone, Debug, Serialize)]
pub struct InterfaceIntroduction {
    pub interface: TypeId,
    /// The introducing mixin. At most one mixin introduces a given
    /// interface per target class.
    pub mixin: TypeId,
    pub methods: Vec<MethodIntroduction>,
    pub properties: Vec<PropertyIntroduction>,
    pub events: Vec<EventIntroduction>,
}

impl InterfaceIntroduction {
    /// Find the implementing member for an interface member.
    pub fn implementer_of(&self, interface_member: MemberId) -> Option<DefId> {
        self.methods
            .iter()
            .find(|m| m.interface_member == interface_member)
            .map(|m| m.implementer)
            .or_else(|| {
                self.properties
                    .iter()
                    .find(|p| p.interface_member == interface_member)
                    .map(|p| p.implementer)
            })
            .or_else(|| {
                self.events
                    .iter()
                    .find(|e| e.interface_member == interface_member)
                    .map(|e| e.implementer)
            })
    }

    /// Total number of introduced members.
    pub fn member_count(&self) -> usize {
        self.methods.len() + self.properties.len() + self.events.len()
    }
}

/// Why an interface implemented by a mixin was not introduced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NonIntroductionReason {
    /// The mixin's own declaration suppresses the introduction, or the
    /// interface is one of the runtime's internal marker interfaces.
    ExplicitSuppression,
    /// The target class already implements the interface directly.
    AlreadyImplementedByTarget,
}

/// Records that an interface implemented by a mixin was deliberately not
/// introduced onto the target.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct NonInterfaceIntroduction {
    pub interface: TypeId,
    pub mixin: TypeId,
    pub reason: NonIntroductionReason,
}

/// One annotation instance in a resolved annotation set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AnnotationEntry {
    /// The underlying declared annotation.
    pub decl: AnnotationId,
    pub kind: Atom,
    /// The entity the annotation was declared on.
    pub origin: AnnotationOwner,
    /// True when the entry was produced by a copy-forwarding directive
    /// rather than declared directly. Copy templates are not themselves
    /// eligible to be copied onward.
    pub from_copy: bool,
}

/// One mixin attached to the target class.
#[derive(Clone, Debug, Serialize)]
pub struct MixinNode {
    pub mixin: TypeId,
    /// Assigned ordinal. `None` until the orderer runs; guaranteed `Some`
    /// in a frozen composition.
    pub index: Option<MixinIndex>,
    /// This mixin's member definitions.
    pub members: Vec<DefId>,
    /// Interfaces the mixin declares.
    pub interfaces: Vec<TypeId>,
    /// This mixin's own dependency edges, deduplicated per required type.
    pub dependencies: SmallVec<[DependencyId; 2]>,
    pub introductions: Vec<InterfaceIntroduction>,
    pub non_introductions: Vec<NonInterfaceIntroduction>,
    /// Resolved annotation entries for the mixin class itself.
    pub annotations: Vec<AnnotationEntry>,
}

impl MixinNode {
    pub(crate) fn new(mixin: TypeId) -> Self {
        MixinNode {
            mixin,
            index: None,
            members: Vec::new(),
            interfaces: Vec::new(),
            dependencies: SmallVec::new(),
            introductions: Vec::new(),
            non_introductions: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// The introduction record for an interface, if this mixin introduces it.
    pub fn introduction_for(&self, interface: TypeId) -> Option<&InterfaceIntroduction> {
        self.introductions.iter().find(|i| i.interface == interface)
    }
}

/// The root result for one target class.
///
/// Mutable while the resolver passes run; immutable once the builder
/// returns it. Owned exclusively by the caller; there is no shared global
/// registry and no caching across builds.
#[derive(Clone, Debug, Serialize)]
pub struct ClassComposition {
    pub(crate) target: TypeId,
    /// Mixins in sorted order; position equals the assigned ordinal.
    pub(crate) mixins: Vec<MixinNode>,
    /// Member-definition arena (target members first, then mixin members
    /// in declaration order).
    pub(crate) members: Vec<MemberDefinition>,
    /// The target class's own member definitions.
    pub(crate) target_members: Vec<DefId>,
    /// Requirement arena.
    pub(crate) requirements: Vec<Requirement>,
    /// Dependency-edge arena.
    pub(crate) dependencies: Vec<Dependency>,
    /// Dependency edges requested by the target via composed interfaces.
    pub(crate) target_dependencies: SmallVec<[DependencyId; 4]>,
    /// Merged class-level annotation set (target class plus all mixins).
    pub(crate) annotations: Vec<AnnotationEntry>,
    #[serde(skip)]
    pub(crate) requirement_by_type: FxHashMap<TypeId, RequirementId>,
    #[serde(skip)]
    pub(crate) def_by_decl: FxHashMap<MemberId, DefId>,
    /// Mixin type -> position in `mixins` (kept current across reordering).
    #[serde(skip)]
    pub(crate) mixin_by_type: FxHashMap<TypeId, usize>,
    /// Introduced interface -> position of the introducing mixin.
    #[serde(skip)]
    pub(crate) introduced_by: FxHashMap<TypeId, usize>,
}

impl ClassComposition {
    pub(crate) fn new(target: TypeId) -> Self {
        ClassComposition {
            target,
            mixins: Vec::new(),
            members: Vec::new(),
            target_members: Vec::new(),
            requirements: Vec::new(),
            dependencies: Vec::new(),
            target_dependencies: SmallVec::new(),
            annotations: Vec::new(),
            requirement_by_type: FxHashMap::default(),
            def_by_decl: FxHashMap::default(),
            mixin_by_type: FxHashMap::default(),
            introduced_by: FxHashMap::default(),
        }
    }

    pub(crate) fn alloc_member(&mut self, decl: MemberId, owner: TypeId) -> DefId {
        let id = DefId(self.members.len() as u32);
        self.members.push(MemberDefinition {
            id,
            decl,
            owner,
            base: None,
            overriders: SmallVec::new(),
            annotations: Vec::new(),
        });
        self.def_by_decl.insert(decl, id);
        id
    }

    // ===== Query API =====

    /// The target class this composition was built for.
    pub fn target(&self) -> TypeId {
        self.target
    }

    /// All mixins, in sorted order.
    pub fn mixins(&self) -> &[MixinNode] {
        &self.mixins
    }

    /// The mixin node for a mixin type.
    pub fn mixin_node(&self, mixin: TypeId) -> Option<&MixinNode> {
        self.mixin_by_type.get(&mixin).map(|&pos| &self.mixins[pos])
    }

    /// The mixin at an assigned ordinal.
    ///
    /// # Panics
    ///
    /// Panics if the ordinal is out of range.
    pub fn mixin_at(&self, index: MixinIndex) -> &MixinNode {
        &self.mixins[index.0 as usize]
    }

    /// A member definition by id.
    ///
    /// # Panics
    ///
    /// Panics if the id belongs to a different composition.
    pub fn member(&self, id: DefId) -> &MemberDefinition {
        &self.members[id.0 as usize]
    }

    /// All member definitions.
    pub fn members(&self) -> &[MemberDefinition] {
        &self.members
    }

    /// The target class's own member definitions.
    pub fn target_members(&self) -> &[DefId] {
        &self.target_members
    }

    /// The member definition created for a declaration, if it participates
    /// in this composition.
    pub fn def_for_decl(&self, decl: MemberId) -> Option<DefId> {
        self.def_by_decl.get(&decl).copied()
    }

    /// All requirements, in discovery order.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// The requirement node for a required type.
    pub fn requirement_for(&self, required_type: TypeId) -> Option<&Requirement> {
        self.requirement_by_type
            .get(&required_type)
            .map(|&id| &self.requirements[id.0 as usize])
    }

    /// A dependency edge by id.
    ///
    /// # Panics
    ///
    /// Panics if the id belongs to a different composition.
    pub fn dependency(&self, id: DependencyId) -> &Dependency {
        &self.dependencies[id.0 as usize]
    }

    /// Dependency edges requested by the target via composed interfaces.
    pub fn target_dependencies(&self) -> &[DependencyId] {
        &self.target_dependencies
    }

    /// The introduction record for an interface, if any mixin introduces it.
    pub fn introduction_for(&self, interface: TypeId) -> Option<&InterfaceIntroduction> {
        self.introduced_by
            .get(&interface)
            .and_then(|&pos| self.mixins[pos].introduction_for(interface))
    }

    /// Every interface introduction, grouped by mixin in sorted order.
    pub fn introductions(&self) -> impl Iterator<Item = &InterfaceIntroduction> {
        self.mixins.iter().flat_map(|n| n.introductions.iter())
    }

    /// Every deliberately-not-introduced interface, grouped by mixin in
    /// sorted order.
    pub fn non_introductions(&self) -> impl Iterator<Item = &NonInterfaceIntroduction> {
        self.mixins.iter().flat_map(|n| n.non_introductions.iter())
    }

    /// The merged class-level annotation set.
    pub fn annotations(&self) -> &[AnnotationEntry] {
        &self.annotations
    }

    /// The requesters behind a requirement, in edge discovery order.
    pub fn requesters_of(&self, requirement: &Requirement) -> Vec<Requester> {
        requirement
            .edges
            .iter()
            .map(|&edge| self.dependencies[edge.0 as usize].requester)
            .collect()
    }

    /// Walk a dependency's aggregator chain back to the edge that created
    /// its requirement. Bounded by `limits::MAX_DEPENDENCY_CHAIN`.
    pub fn dependency_chain(&self, id: DependencyId) -> Vec<DependencyId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.dependencies[current.0 as usize].aggregator {
            if chain.len() >= mixr_common::limits::MAX_DEPENDENCY_CHAIN {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }
}
