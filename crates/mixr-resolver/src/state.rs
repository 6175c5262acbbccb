//! Resolver state shared by the composition passes.
//!
//! Each pass lives in its own module as an `impl ResolverState` block;
//! this module holds the state itself, graph seeding, shared display
//! helpers, and the freeze step.

use crate::composition::{ClassComposition, DefId, MixinNode, Requester};
use crate::options::ResolverOptions;
use mixr_model::{AnnotationOwner, DeclArena, MemberDecl, TypeId};
use tracing::debug;

pub(crate) struct ResolverState<'a> {
    pub(crate) arena: &'a DeclArena,
    pub(crate) options: &'a ResolverOptions,
    pub(crate) target: TypeId,
    pub(crate) comp: ClassComposition,
}

impl<'a> ResolverState<'a> {
    pub(crate) fn new(arena: &'a DeclArena, options: &'a ResolverOptions, target: TypeId) -> Self {
        ResolverState {
            arena,
            options,
            target,
            comp: ClassComposition::new(target),
        }
    }

    /// Create member definitions for the target class and a node (with
    /// member definitions) for every attached mixin, in declaration order.
    pub(crate) fn seed(&mut self) {
        let arena = self.arena;
        for member in arena.members_of(self.target) {
            let def = self.comp.alloc_member(member.id, self.target);
            self.comp.target_members.push(def);
        }
        let Some(config) = arena.target_config(self.target) else {
            debug!(target_class = self.arena.type_name(self.target), "no mixins attached");
            return;
        };
        for &mixin in &config.mixins {
            let mut node = MixinNode::new(mixin);
            node.interfaces = arena.type_decl(mixin).interfaces.clone();
            for member in arena.members_of(mixin) {
                node.members.push(self.comp.alloc_member(member.id, mixin));
            }
            self.comp.mixin_by_type.insert(mixin, self.comp.mixins.len());
            self.comp.mixins.push(node);
        }
        debug!(
            target_class = self.arena.type_name(self.target),
            mixins = self.comp.mixins.len(),
            members = self.comp.members.len(),
            "seeded composition graph"
        );
    }

    /// Freeze the composition and hand it to the caller.
    pub(crate) fn finish(self) -> ClassComposition {
        for node in &self.comp.mixins {
            debug_assert!(
                node.index.is_some(),
                "mixin '{}' was not assigned an ordinal",
                self.arena.type_name(node.mixin)
            );
        }
        for member in &self.comp.members {
            if let Some(base) = member.base {
                debug_assert!(
                    self.comp.members[base.0 as usize].overriders.contains(&member.id),
                    "override back-reference is not mirrored"
                );
            }
        }
        self.comp
    }

    // ===== Shared helpers =====

    /// The declaration behind a member definition. The returned reference
    /// borrows the arena, not the state, so it stays usable while the
    /// composition is mutated.
    pub(crate) fn member_decl(&self, def: DefId) -> &'a MemberDecl {
        self.arena.member(self.comp.members[def.0 as usize].decl)
    }

    pub(crate) fn type_name(&self, id: TypeId) -> &'a str {
        self.arena.type_name(id)
    }

    pub(crate) fn requester_display(&self, requester: Requester) -> String {
        match requester {
            Requester::Mixin(mixin) => format!("mixin '{}'", self.arena.type_name(mixin)),
            Requester::ComposedInterface(interface) => {
                format!("composed interface '{}'", self.arena.type_name(interface))
            }
        }
    }

    pub(crate) fn owner_display(&self, owner: AnnotationOwner) -> String {
        match owner {
            AnnotationOwner::Type(ty) => self.arena.type_name(ty).to_string(),
            AnnotationOwner::Member(member) => {
                let decl = self.arena.member(member);
                format!(
                    "{}.{}",
                    self.arena.type_name(decl.owner),
                    self.arena.name(decl.name)
                )
            }
        }
    }
}
