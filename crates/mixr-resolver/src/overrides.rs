//! Override resolution.
//!
//! Runs once per member kind across the whole composition, after interface
//! introduction. Overriders are mixin members carrying the override flag;
//! the base pool for an overrider is every target-class member plus the
//! members of mixins ordered strictly before the overrider's mixin, so a
//! mixin member can itself be overridden by a later mixin. Each overrider
//! resolves to exactly one base member or the build fails.

use crate::composition::DefId;
use crate::matching::{KIND_MATCHERS, KindMatcher};
use crate::options::MultipleOverridePolicy;
use crate::state::ResolverState;
use mixr_common::CompositionError;
use tracing::debug;

impl ResolverState<'_> {
    pub(crate) fn resolve_overrides(&mut self) -> Result<(), CompositionError> {
        for matcher in &KIND_MATCHERS {
            self.resolve_overrides_of_kind(matcher)?;
        }
        Ok(())
    }

    fn resolve_overrides_of_kind(&mut self, matcher: &KindMatcher) -> Result<(), CompositionError> {
        for pos in 0..self.comp.mixins.len() {
            let overriders: Vec<DefId> = self.comp.mixins[pos]
                .members
                .iter()
                .copied()
                .filter(|&def| {
                    let decl = self.member_decl(def);
                    decl.kind == matcher.kind && decl.is_override()
                })
                .collect();
            for overrider in overriders {
                let Some(base) = self.find_override_base(pos, overrider, matcher) else {
                    return Err(self.override_base_not_found_error(overrider));
                };
                self.link_override(base, overrider)?;
            }
        }
        Ok(())
    }

    /// Resolve an overrider against the candidate base pool: target-class
    /// members first, then members of earlier-ordered mixins.
    fn find_override_base(
        &self,
        pos: usize,
        overrider: DefId,
        matcher: &KindMatcher,
    ) -> Option<DefId> {
        let overrider_decl = self.member_decl(overrider);
        let matches = |def: DefId| {
            let candidate = self.member_decl(def);
            candidate.kind == matcher.kind && (matcher.matches)(candidate, overrider_decl)
        };
        if let Some(&def) = self.comp.target_members.iter().find(|&&def| matches(def)) {
            return Some(def);
        }
        for earlier in 0..pos {
            if let Some(&def) = self.comp.mixins[earlier].members.iter().find(|&&def| matches(def))
            {
                return Some(def);
            }
        }
        None
    }

    /// Link an overrider to its base member, honoring the configured
    /// multiple-overrider policy. Because mixins are processed in sorted
    /// order, a base member's overrider list is ordered by mixin ordinal.
    fn link_override(&mut self, base: DefId, overrider: DefId) -> Result<(), CompositionError> {
        debug_assert_ne!(base, overrider, "a member cannot override itself");
        if self.options.multiple_overrides == MultipleOverridePolicy::Reject
            && let Some(&existing) = self.comp.members[base.0 as usize].overriders.first()
        {
            return Err(self.multiple_overrides_error(base, existing, overrider));
        }
        self.comp.members[overrider.0 as usize].base = Some(base);
        self.comp.members[base.0 as usize].overriders.push(overrider);
        debug!(
            member = self.arena.name(self.member_decl(base).name),
            base_owner = self.type_name(self.member_decl(base).owner),
            overrider_owner = self.type_name(self.member_decl(overrider).owner),
            "linked override"
        );
        Ok(())
    }
}
