//! Mixin ordering.
//!
//! A dependency edge whose required type is another mixin participating in
//! the same composition is a strict "required mixin comes first"
//! constraint. The orderer runs a stable topological sort over those
//! constraints - ties fall back to declaration order, so repeated builds
//! of identical input always produce the same ordinal sequence. A cycle is
//! a fatal composition error.

use crate::composition::{MixinIndex, MixinNode};
use crate::state::ResolverState;
use mixr_common::CompositionError;
use mixr_model::TypeId;
use tracing::debug;

impl ResolverState<'_> {
    /// Topologically sort the mixins, rebuild the mixin collection in
    /// sorted order, and assign each mixin its zero-based ordinal.
    pub(crate) fn order_mixins(&mut self) -> Result<(), CompositionError> {
        let n = self.comp.mixins.len();
        if n == 0 {
            return Ok(());
        }

        // Predecessor lists by declaration position: preds[i] holds the
        // positions that must be placed before mixin i.
        let mut preds: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (i, node) in self.comp.mixins.iter().enumerate() {
            for &edge in &node.dependencies {
                let requirement = self.comp.dependencies[edge.0 as usize].requirement;
                let required_type = self.comp.requirements[requirement.0 as usize].required_type;
                if let Some(&p) = self.comp.mixin_by_type.get(&required_type)
                    && p != i
                    && !preds[i].contains(&p)
                {
                    preds[i].push(p);
                }
            }
        }

        // Post-order DFS in declaration order: each mixin is emitted right
        // after its required predecessors, so mixins with no constraint
        // between them keep their declaration order.
        let mut placed = vec![false; n];
        let mut stack = Vec::new();
        let mut order = Vec::with_capacity(n);
        for i in 0..n {
            if !placed[i]
                && let Err(cycle) =
                    self.visit_topological(i, &preds, &mut placed, &mut stack, &mut order)
            {
                return Err(self.cyclic_dependency_error(&cycle));
            }
        }

        // Rebuild the mixin collection in sorted order.
        let mut nodes: Vec<Option<MixinNode>> = self.comp.mixins.drain(..).map(Some).collect();
        for (ordinal, &decl_pos) in order.iter().enumerate() {
            let mut node = nodes[decl_pos].take().unwrap();
            node.index = Some(MixinIndex(ordinal as u32));
            self.comp.mixin_by_type.insert(node.mixin, ordinal);
            self.comp.mixins.push(node);
        }
        debug!(
            target_class = self.arena.type_name(self.target),
            order = ?self
                .comp
                .mixins
                .iter()
                .map(|m| self.arena.type_name(m.mixin))
                .collect::<Vec<_>>(),
            "ordered mixins"
        );
        Ok(())
    }

    /// DFS helper for the stable topological sort. Emits `i` after all of
    /// its predecessors; a node already on the DFS stack is a cycle, which
    /// is returned as the offending path for diagnostics.
    fn visit_topological(
        &self,
        i: usize,
        preds: &[Vec<usize>],
        placed: &mut [bool],
        stack: &mut Vec<usize>,
        order: &mut Vec<usize>,
    ) -> Result<(), Vec<TypeId>> {
        if let Some(at) = stack.iter().position(|&p| p == i) {
            return Err(stack[at..]
                .iter()
                .map(|&p| self.comp.mixins[p].mixin)
                .collect());
        }
        if placed[i] {
            return Ok(());
        }
        stack.push(i);
        for &p in &preds[i] {
            self.visit_topological(p, preds, placed, stack, order)?;
        }
        stack.pop();
        placed[i] = true;
        order.push(i);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Requester;
    use crate::options::ResolverOptions;
    use mixr_common::diagnostics::diagnostic_codes;
    use mixr_model::DeclArena;

    fn ordered_names(state: &ResolverState<'_>) -> Vec<String> {
        state
            .comp
            .mixins()
            .iter()
            .map(|m| state.arena.type_name(m.mixin).to_string())
            .collect()
    }

    #[test]
    fn unconstrained_mixins_keep_declaration_order() {
        let mut arena = DeclArena::new();
        let target = arena.add_class("Order");
        for name in ["A", "B", "C"] {
            let mixin = arena.add_class(name);
            arena.attach_mixin(target, mixin);
        }
        let options = ResolverOptions::default();
        let mut state = ResolverState::new(&arena, &options, target);
        state.seed();
        state.collect_requirements();
        state.order_mixins().unwrap();
        assert_eq!(ordered_names(&state), ["A", "B", "C"]);
        let ordinals: Vec<u32> = state
            .comp
            .mixins()
            .iter()
            .map(|m| m.index.unwrap().0)
            .collect();
        assert_eq!(ordinals, [0, 1, 2]);
    }

    #[test]
    fn dependency_pulls_required_mixin_forward() {
        let mut arena = DeclArena::new();
        let target = arena.add_class("Order");
        let a = arena.add_class("A");
        let b = arena.add_class("B");
        arena.attach_mixin(target, a);
        arena.attach_mixin(target, b);
        // A depends on B, so B must be ordered first.
        arena.add_mixin_dependency(a, b);
        let options = ResolverOptions::default();
        let mut state = ResolverState::new(&arena, &options, target);
        state.seed();
        state.collect_requirements();
        state.order_mixins().unwrap();
        assert_eq!(ordered_names(&state), ["B", "A"]);
    }

    #[test]
    fn repeated_ordering_is_deterministic() {
        for _ in 0..8 {
            let mut arena = DeclArena::new();
            let target = arena.add_class("Order");
            let a = arena.add_class("A");
            let b = arena.add_class("B");
            let c = arena.add_class("C");
            let d = arena.add_class("D");
            arena.attach_mixin(target, a);
            arena.attach_mixin(target, b);
            arena.attach_mixin(target, c);
            arena.attach_mixin(target, d);
            arena.add_mixin_dependency(b, d);
            let options = ResolverOptions::default();
            let mut state = ResolverState::new(&arena, &options, target);
            state.seed();
            state.collect_requirements();
            state.order_mixins().unwrap();
            assert_eq!(ordered_names(&state), ["A", "D", "B", "C"]);
        }
    }

    #[test]
    fn dependency_cycle_is_a_composition_error() {
        let mut arena = DeclArena::new();
        let target = arena.add_class("Order");
        let a = arena.add_class("A");
        let b = arena.add_class("B");
        arena.attach_mixin(target, a);
        arena.attach_mixin(target, b);
        arena.add_mixin_dependency(a, b);
        arena.add_mixin_dependency(b, a);
        let options = ResolverOptions::default();
        let mut state = ResolverState::new(&arena, &options, target);
        state.seed();
        state.collect_requirements();
        let err = state.order_mixins().unwrap_err();
        assert_eq!(err.code, diagnostic_codes::CYCLIC_MIXIN_DEPENDENCY);
        assert!(err.message_text.contains("Order"));
        assert!(err.message_text.contains('A') && err.message_text.contains('B'));
    }

    #[test]
    fn non_mixin_requirements_do_not_constrain_order() {
        let mut arena = DeclArena::new();
        let target = arena.add_class("Order");
        let a = arena.add_class("A");
        let b = arena.add_class("B");
        arena.attach_mixin(target, a);
        arena.attach_mixin(target, b);
        let iface = arena.add_interface("IAudit");
        let options = ResolverOptions::default();
        let mut state = ResolverState::new(&arena, &options, target);
        state.seed();
        state.add_dependency(Requester::Mixin(a), iface);
        state.order_mixins().unwrap();
        assert_eq!(ordered_names(&state), ["A", "B"]);
    }
}
