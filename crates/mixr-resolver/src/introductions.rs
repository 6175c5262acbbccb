//! Interface introduction analysis.
//!
//! For each mixin, in sorted order, every interface the mixin declares is
//! either introduced onto the target class (with each interface member
//! resolved to an implementing mixin member and a visibility), or recorded
//! as a `NonInterfaceIntroduction` with the reason. An interface may be
//! introduced by at most one mixin per target class; a second introducer
//! is a fatal composition error.

use crate::composition::{
    DefId, EventIntroduction, InterfaceIntroduction, MethodIntroduction, NonInterfaceIntroduction,
    NonIntroductionReason, PropertyIntroduction,
};
use crate::matching::members_match;
use crate::state::ResolverState;
use mixr_common::CompositionError;
use mixr_model::{MemberDecl, MemberId, MemberKind, TypeId, Visibility};
use rustc_hash::FxHashSet;
use tracing::debug;

impl ResolverState<'_> {
    pub(crate) fn analyze_introductions(&mut self) -> Result<(), CompositionError> {
        let arena = self.arena;
        let target_interfaces: FxHashSet<TypeId> =
            arena.type_decl(self.target).interfaces.iter().copied().collect();

        for pos in 0..self.comp.mixins.len() {
            let mixin = self.comp.mixins[pos].mixin;
            let interfaces = self.comp.mixins[pos].interfaces.clone();
            for interface in interfaces {
                if self.introduction_suppressed(mixin, interface) {
                    debug!(
                        mixin = self.type_name(mixin),
                        interface = self.type_name(interface),
                        "introduction suppressed"
                    );
                    self.comp.mixins[pos].non_introductions.push(NonInterfaceIntroduction {
                        interface,
                        mixin,
                        reason: NonIntroductionReason::ExplicitSuppression,
                    });
                    continue;
                }
                if target_interfaces.contains(&interface) {
                    self.comp.mixins[pos].non_introductions.push(NonInterfaceIntroduction {
                        interface,
                        mixin,
                        reason: NonIntroductionReason::AlreadyImplementedByTarget,
                    });
                    continue;
                }
                if let Some(&earlier_pos) = self.comp.introduced_by.get(&interface) {
                    let earlier = self.comp.mixins[earlier_pos].mixin;
                    return Err(self.interface_already_introduced_error(interface, earlier, mixin));
                }
                let introduction = self.build_introduction(pos, mixin, interface)?;
                debug!(
                    mixin = self.type_name(mixin),
                    interface = self.type_name(interface),
                    members = introduction.member_count(),
                    "introduced interface"
                );
                self.comp.introduced_by.insert(interface, pos);
                self.comp.mixins[pos].introductions.push(introduction);
            }
        }
        Ok(())
    }

    /// Whether the mixin's own declaration suppresses the interface, or
    /// the interface is one of the runtime's internal marker interfaces
    /// (never exposed on a target).
    fn introduction_suppressed(&self, mixin: TypeId, interface: TypeId) -> bool {
        let explicitly = self
            .arena
            .mixin_config(mixin)
            .is_some_and(|c| c.suppressed_interfaces.contains(&interface));
        explicitly
            || self
                .options
                .internal_interfaces
                .contains(self.arena.type_name(interface))
    }

    /// Resolve every property, event, and method of `interface` to its
    /// implementing member on the mixin. Methods already paired with a
    /// property or event are accessor methods and are skipped.
    fn build_introduction(
        &self,
        pos: usize,
        mixin: TypeId,
        interface: TypeId,
    ) -> Result<InterfaceIntroduction, CompositionError> {
        let arena = self.arena;
        let default_visibility = arena
            .mixin_config(mixin)
            .map(|c| c.default_visibility)
            .unwrap_or_default();
        let accessor_methods = interface_accessor_methods(arena, interface);

        let mut introduction = InterfaceIntroduction {
            interface,
            mixin,
            methods: Vec::new(),
            properties: Vec::new(),
            events: Vec::new(),
        };
        for interface_member in arena.members_of(interface) {
            if interface_member.kind == MemberKind::Method
                && accessor_methods.contains(&interface_member.id)
            {
                continue;
            }
            let Some(implementer) = self.find_mixin_implementer(pos, interface_member) else {
                return Err(self.interface_member_not_implemented_error(
                    mixin,
                    interface,
                    interface_member,
                ));
            };
            let visibility = self
                .member_decl(implementer)
                .visibility
                .unwrap_or(default_visibility);
            self.push_introduced_member(&mut introduction, interface_member, implementer, visibility);
        }
        Ok(introduction)
    }

    fn push_introduced_member(
        &self,
        introduction: &mut InterfaceIntroduction,
        interface_member: &MemberDecl,
        implementer: DefId,
        visibility: Visibility,
    ) {
        match interface_member.kind {
            MemberKind::Method => introduction.methods.push(MethodIntroduction {
                interface_member: interface_member.id,
                implementer,
                visibility,
            }),
            MemberKind::Property => introduction.properties.push(PropertyIntroduction {
                interface_member: interface_member.id,
                implementer,
                visibility,
            }),
            MemberKind::Event => introduction.events.push(EventIntroduction {
                interface_member: interface_member.id,
                implementer,
                visibility,
            }),
        }
    }

    /// Find the mixin member implementing an interface member, matched by
    /// name, kind, and signature.
    fn find_mixin_implementer(
        &self,
        pos: usize,
        interface_member: &MemberDecl,
    ) -> Option<DefId> {
        self.comp.mixins[pos]
            .members
            .iter()
            .copied()
            .find(|&def| members_match(self.member_decl(def), interface_member))
    }
}

/// The accessor methods paired with any property or event of `interface`.
pub(crate) fn interface_accessor_methods(
    arena: &mixr_model::DeclArena,
    interface: TypeId,
) -> FxHashSet<MemberId> {
    let mut accessors = FxHashSet::default();
    for member in arena.members_of(interface) {
        accessors.extend(member.accessors.iter().copied());
    }
    accessors
}
