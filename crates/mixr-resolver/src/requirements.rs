//! Requirement graph construction.
//!
//! Each declared dependency (a mixin's "must be supplied by the
//! composition" hint, or a composed-interface declaration on the target)
//! becomes a `Dependency` edge into a `Requirement` node keyed by the
//! required type. Requirements deduplicate by type; multiple declaration
//! sites aggregate into one node with a chain of edges. This stage never
//! rejects input, it only aggregates.

use crate::composition::{Dependency, DependencyId, Requester, Requirement, RequirementId};
use crate::state::ResolverState;
use mixr_model::TypeId;
use smallvec::SmallVec;
use tracing::trace;

impl ResolverState<'_> {
    /// Collect every declared dependency into the requirement graph, in
    /// declaration order: the target's composed interfaces first, then
    /// each mixin's dependency hints.
    pub(crate) fn collect_requirements(&mut self) {
        let arena = self.arena;
        let Some(config) = arena.target_config(self.target) else {
            return;
        };
        for &interface in &config.composed_interfaces {
            self.add_dependency(Requester::ComposedInterface(interface), interface);
        }
        for &mixin in &config.mixins {
            let Some(mixin_config) = arena.mixin_config(mixin) else {
                continue;
            };
            for &required in &mixin_config.dependencies {
                self.add_dependency(Requester::Mixin(mixin), required);
            }
        }
    }

    /// Record one declared dependency. Looks up (or creates) the
    /// `Requirement` for the required type and appends an edge from the
    /// requester, linked to the requirement's first edge as aggregator.
    /// Idempotent per (requester, required type): the edge is added to the
    /// requester's own collection only if no equal edge exists there.
    pub(crate) fn add_dependency(
        &mut self,
        requester: Requester,
        required: TypeId,
    ) -> DependencyId {
        let req_id = if let Some(&id) = self.comp.requirement_by_type.get(&required) {
            id
        } else {
            let id = RequirementId(self.comp.requirements.len() as u32);
            self.comp.requirements.push(Requirement {
                id,
                required_type: required,
                edges: SmallVec::new(),
                required_members: Vec::new(),
            });
            self.comp.requirement_by_type.insert(required, id);
            id
        };

        let existing = {
            let own: &[DependencyId] = match requester {
                Requester::Mixin(mixin) => {
                    let pos = self.comp.mixin_by_type[&mixin];
                    &self.comp.mixins[pos].dependencies
                }
                Requester::ComposedInterface(_) => &self.comp.target_dependencies,
            };
            own.iter()
                .copied()
                .find(|&d| self.comp.dependencies[d.0 as usize].requirement == req_id)
        };
        if let Some(existing) = existing {
            return existing;
        }

        let aggregator = self.comp.requirements[req_id.0 as usize].edges.first().copied();
        let dep_id = DependencyId(self.comp.dependencies.len() as u32);
        self.comp.dependencies.push(Dependency {
            id: dep_id,
            requester,
            requirement: req_id,
            aggregator,
        });
        self.comp.requirements[req_id.0 as usize].edges.push(dep_id);
        match requester {
            Requester::Mixin(mixin) => {
                let pos = self.comp.mixin_by_type[&mixin];
                self.comp.mixins[pos].dependencies.push(dep_id);
            }
            Requester::ComposedInterface(_) => self.comp.target_dependencies.push(dep_id),
        }
        trace!(
            required = self.arena.type_name(required),
            requester = %self.requester_display(requester),
            "recorded dependency edge"
        );
        dep_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ResolverOptions;
    use mixr_model::DeclArena;

    fn state_with_two_mixins(
        arena: &mut DeclArena,
    ) -> (TypeId, TypeId, TypeId) {
        let target = arena.add_class("Order");
        let x = arena.add_class("AuditMixin");
        let y = arena.add_class("LogMixin");
        arena.attach_mixin(target, x);
        arena.attach_mixin(target, y);
        (target, x, y)
    }

    #[test]
    fn same_requester_and_type_deduplicates_to_one_edge() {
        let mut arena = DeclArena::new();
        let (target, x, _) = state_with_two_mixins(&mut arena);
        let iface = arena.add_interface("IAudit");
        let options = ResolverOptions::default();
        let mut state = ResolverState::new(&arena, &options, target);
        state.seed();

        let first = state.add_dependency(Requester::Mixin(x), iface);
        let second = state.add_dependency(Requester::Mixin(x), iface);
        assert_eq!(first, second);
        let requirement = state.comp.requirement_for(iface).unwrap();
        assert_eq!(requirement.edges.len(), 1);
        assert_eq!(state.comp.mixin_node(x).unwrap().dependencies.len(), 1);
    }

    #[test]
    fn second_requester_aggregates_onto_the_first_edge() {
        let mut arena = DeclArena::new();
        let (target, x, y) = state_with_two_mixins(&mut arena);
        let iface = arena.add_interface("IAudit");
        let options = ResolverOptions::default();
        let mut state = ResolverState::new(&arena, &options, target);
        state.seed();

        let first = state.add_dependency(Requester::Mixin(x), iface);
        let second = state.add_dependency(Requester::Mixin(y), iface);
        assert_ne!(first, second);
        assert_eq!(state.comp.dependency(first).aggregator, None);
        assert_eq!(state.comp.dependency(second).aggregator, Some(first));
        let requirement = state.comp.requirement_for(iface).unwrap();
        assert_eq!(requirement.edges.as_slice(), &[first, second]);
        assert_eq!(state.comp.dependency_chain(second), vec![second, first]);
    }

    #[test]
    fn composed_interfaces_record_edges_on_the_target() {
        let mut arena = DeclArena::new();
        let (target, _, _) = state_with_two_mixins(&mut arena);
        let iface = arena.add_interface("IOrder");
        arena.add_composed_interface(target, iface);
        let options = ResolverOptions::default();
        let mut state = ResolverState::new(&arena, &options, target);
        state.seed();
        state.collect_requirements();

        assert_eq!(state.comp.target_dependencies().len(), 1);
        let requirement = state.comp.requirement_for(iface).unwrap();
        assert_eq!(
            state.comp.requesters_of(requirement),
            vec![Requester::ComposedInterface(iface)]
        );
    }
}
