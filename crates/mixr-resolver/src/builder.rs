//! Composition builder: the orchestrator for one target class.
//!
//! Validates the input contract, sequences the resolver passes over a
//! fresh graph, and returns the frozen `ClassComposition`. Each build is
//! independent: no state is shared or cached across invocations, so
//! independent builds may run concurrently on their own arenas.

use crate::composition::ClassComposition;
use crate::options::ResolverOptions;
use crate::state::ResolverState;
use mixr_common::CompositionError;
use mixr_common::diagnostics::diagnostic_messages;
use mixr_model::{DeclArena, TypeId, TypeKind};
use tracing::debug;

pub struct CompositionBuilder<'a> {
    arena: &'a DeclArena,
    options: &'a ResolverOptions,
}

impl<'a> CompositionBuilder<'a> {
    pub fn new(arena: &'a DeclArena, options: &'a ResolverOptions) -> Self {
        CompositionBuilder { arena, options }
    }

    /// Build the composition graph for `target`.
    ///
    /// Fails with a single `CompositionError` on the first detected
    /// contradiction; no partial composition is returned.
    pub fn build(&self, target: TypeId) -> Result<ClassComposition, CompositionError> {
        self.validate_input(target)?;
        debug!(
            target_class = self.arena.type_name(target),
            "building composition"
        );
        let mut state = ResolverState::new(self.arena, self.options, target);
        state.seed();
        state.collect_requirements();
        state.order_mixins()?;
        state.analyze_introductions()?;
        state.resolve_required_members()?;
        state.resolve_overrides()?;
        state.propagate_annotations()?;
        Ok(state.finish())
    }

    /// Check the input contract before touching the graph. These are
    /// programmer errors in the declaration source, not composition
    /// contradictions, and are reported without building anything.
    fn validate_input(&self, target: TypeId) -> Result<(), CompositionError> {
        let arena = self.arena;
        let Some(target_decl) = arena.get_type(target) else {
            return Err(CompositionError::new(
                &diagnostic_messages::UNKNOWN_TYPE,
                &[&format!("#{}", target.0)],
            ));
        };
        if target_decl.kind != TypeKind::Class {
            return Err(CompositionError::new(
                &diagnostic_messages::TARGET_NOT_CLASS,
                &[arena.type_name(target)],
            ));
        }
        let Some(config) = arena.target_config(target) else {
            return Ok(());
        };
        for &mixin in &config.mixins {
            let Some(mixin_decl) = arena.get_type(mixin) else {
                return Err(CompositionError::new(
                    &diagnostic_messages::UNKNOWN_TYPE,
                    &[&format!("#{}", mixin.0)],
                ));
            };
            if mixin_decl.kind != TypeKind::Class {
                return Err(CompositionError::new(
                    &diagnostic_messages::MIXIN_NOT_CLASS,
                    &[arena.type_name(mixin), arena.type_name(target)],
                ));
            }
            let Some(mixin_config) = arena.mixin_config(mixin) else {
                continue;
            };
            for &required in &mixin_config.dependencies {
                if arena.get_type(required).is_none() {
                    return Err(CompositionError::new(
                        &diagnostic_messages::UNKNOWN_TYPE,
                        &[&format!("#{}", required.0)],
                    )
                    .with_related(format!(
                        "declared as a dependency of mixin '{}'",
                        arena.type_name(mixin)
                    )));
                }
            }
        }
        for &interface in &config.composed_interfaces {
            let Some(interface_decl) = arena.get_type(interface) else {
                return Err(CompositionError::new(
                    &diagnostic_messages::UNKNOWN_TYPE,
                    &[&format!("#{}", interface.0)],
                ));
            };
            if interface_decl.kind != TypeKind::Interface {
                return Err(CompositionError::new(
                    &diagnostic_messages::COMPOSED_INTERFACE_NOT_INTERFACE,
                    &[arena.type_name(interface), arena.type_name(target)],
                ));
            }
        }
        Ok(())
    }
}
