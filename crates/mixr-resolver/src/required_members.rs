//! Required-member resolution.
//!
//! Runs after interface introduction. For each interface requirement,
//! every member of the required interface is resolved to the member that
//! will satisfy it by exactly one of three strategies: already implemented
//! by the target, provided by a mixin's introduction, or structural
//! (duck-typed) matching against target members. Class requirements carry
//! no members but must still be supplied by the composition.

use crate::composition::{DefId, RequiredMember, RequiredMemberSource};
use crate::introductions::interface_accessor_methods;
use crate::matching::members_match;
use crate::state::ResolverState;
use mixr_common::CompositionError;
use mixr_model::{MemberDecl, MemberKind, TypeId, TypeKind};
use rustc_hash::FxHashSet;
use tracing::debug;

impl ResolverState<'_> {
    pub(crate) fn resolve_required_members(&mut self) -> Result<(), CompositionError> {
        let arena = self.arena;
        let target_interfaces: FxHashSet<TypeId> =
            arena.type_decl(self.target).interfaces.iter().copied().collect();

        for req_idx in 0..self.comp.requirements.len() {
            let required_type = self.comp.requirements[req_idx].required_type;
            if arena.type_decl(required_type).kind == TypeKind::Class {
                // Class requirements express ordering and identity; the
                // type itself must participate in the composition.
                if required_type != self.target
                    && !self.comp.mixin_by_type.contains_key(&required_type)
                {
                    return Err(
                        self.required_type_not_supplied_error(&self.comp.requirements[req_idx])
                    );
                }
                continue;
            }

            let accessor_methods = interface_accessor_methods(arena, required_type);
            let mut resolved = Vec::new();
            for interface_member in arena.members_of(required_type) {
                if interface_member.kind == MemberKind::Method
                    && accessor_methods.contains(&interface_member.id)
                {
                    continue;
                }
                let source = self.resolve_required_member(
                    req_idx,
                    required_type,
                    interface_member,
                    &target_interfaces,
                )?;
                resolved.push(RequiredMember {
                    decl: interface_member.id,
                    source,
                });
            }
            debug!(
                required = self.type_name(required_type),
                members = resolved.len(),
                "resolved required interface members"
            );
            self.comp.requirements[req_idx].required_members = resolved;
        }
        Ok(())
    }

    fn resolve_required_member(
        &self,
        req_idx: usize,
        interface: TypeId,
        member: &MemberDecl,
        target_interfaces: &FxHashSet<TypeId>,
    ) -> Result<RequiredMemberSource, CompositionError> {
        // Already implemented: the target declares the interface itself.
        if target_interfaces.contains(&interface) {
            return match self.find_target_member_matching(member) {
                Some(def) => Ok(RequiredMemberSource::TargetMember(def)),
                None => Err(self.target_interface_member_missing_error(interface, member)),
            };
        }

        // Introduced: a mixin exposes the interface on the target.
        if let Some(&pos) = self.comp.introduced_by.get(&interface) {
            let node = &self.comp.mixins[pos];
            if let Some(introduction) = node.introduction_for(interface)
                && let Some(def) = introduction.implementer_of(member.id)
            {
                return Ok(RequiredMemberSource::Introduced {
                    mixin: node.mixin,
                    member: def,
                });
            }
        }

        // Structural: duck-typed match against the target's members.
        if let Some(def) = self.find_target_member_matching(member) {
            return Ok(RequiredMemberSource::Structural(def));
        }

        Err(self.unsatisfied_requirement_error(&self.comp.requirements[req_idx], member))
    }

    fn find_target_member_matching(&self, member: &MemberDecl) -> Option<DefId> {
        self.comp
            .target_members
            .iter()
            .copied()
            .find(|&def| members_match(self.member_decl(def), member))
    }
}
