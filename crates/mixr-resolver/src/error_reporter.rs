//! Constructors for composition errors.
//!
//! Every pass reports failures through these helpers so messages stay
//! consistent: they always name the target class and the offending
//! mixins/members/interfaces, and attach the declaration sites behind a
//! requirement as related information.

use crate::composition::{DefId, Requirement};
use crate::state::ResolverState;
use mixr_common::CompositionError;
use mixr_common::diagnostics::diagnostic_messages;
use mixr_model::{AnnotationOwner, CopySource, MemberDecl, TypeId};

impl ResolverState<'_> {
    pub(crate) fn cyclic_dependency_error(&self, cycle: &[TypeId]) -> CompositionError {
        let mut names: Vec<&str> = cycle.iter().map(|&m| self.type_name(m)).collect();
        if let Some(&first) = names.first() {
            names.push(first);
        }
        CompositionError::new(
            &diagnostic_messages::CYCLIC_MIXIN_DEPENDENCY,
            &[self.type_name(self.target), &names.join(" -> ")],
        )
    }

    pub(crate) fn interface_already_introduced_error(
        &self,
        interface: TypeId,
        first: TypeId,
        second: TypeId,
    ) -> CompositionError {
        CompositionError::new(
            &diagnostic_messages::INTERFACE_ALREADY_INTRODUCED,
            &[
                self.type_name(interface),
                self.type_name(first),
                self.type_name(second),
                self.type_name(self.target),
            ],
        )
    }

    pub(crate) fn interface_member_not_implemented_error(
        &self,
        mixin: TypeId,
        interface: TypeId,
        member: &MemberDecl,
    ) -> CompositionError {
        CompositionError::new(
            &diagnostic_messages::INTERFACE_MEMBER_NOT_IMPLEMENTED,
            &[
                self.type_name(mixin),
                self.type_name(interface),
                self.arena.name(member.name),
            ],
        )
    }

    pub(crate) fn override_base_not_found_error(&self, overrider: DefId) -> CompositionError {
        let decl = self.member_decl(overrider);
        CompositionError::new(
            &diagnostic_messages::OVERRIDE_BASE_NOT_FOUND,
            &[
                self.arena.name(decl.name),
                self.type_name(decl.owner),
                self.type_name(self.target),
            ],
        )
    }

    pub(crate) fn multiple_overrides_error(
        &self,
        base: DefId,
        existing: DefId,
        incoming: DefId,
    ) -> CompositionError {
        let base_decl = self.member_decl(base);
        CompositionError::new(
            &diagnostic_messages::MULTIPLE_OVERRIDES,
            &[
                self.arena.name(base_decl.name),
                self.type_name(base_decl.owner),
                self.type_name(self.member_decl(existing).owner),
                self.type_name(self.member_decl(incoming).owner),
            ],
        )
    }

    pub(crate) fn unsatisfied_requirement_error(
        &self,
        requirement: &Requirement,
        member: &MemberDecl,
    ) -> CompositionError {
        let mut error = CompositionError::new(
            &diagnostic_messages::UNSATISFIED_REQUIREMENT,
            &[
                self.type_name(requirement.required_type),
                self.type_name(self.target),
                self.arena.name(member.name),
            ],
        );
        for requester in self.comp.requesters_of(requirement) {
            error = error.with_related(format!(
                "requested by {}",
                self.requester_display(requester)
            ));
        }
        error
    }

    pub(crate) fn target_interface_member_missing_error(
        &self,
        interface: TypeId,
        member: &MemberDecl,
    ) -> CompositionError {
        CompositionError::new(
            &diagnostic_messages::TARGET_INTERFACE_MEMBER_MISSING,
            &[
                self.type_name(self.target),
                self.type_name(interface),
                self.arena.name(member.name),
            ],
        )
    }

    pub(crate) fn required_type_not_supplied_error(
        &self,
        requirement: &Requirement,
    ) -> CompositionError {
        let mut error = CompositionError::new(
            &diagnostic_messages::REQUIRED_TYPE_NOT_SUPPLIED,
            &[
                self.type_name(requirement.required_type),
                self.type_name(self.target),
            ],
        );
        for requester in self.comp.requesters_of(requirement) {
            error = error.with_related(format!(
                "requested by {}",
                self.requester_display(requester)
            ));
        }
        error
    }

    pub(crate) fn copy_source_not_found_error(
        &self,
        source: &CopySource,
        declared_on: AnnotationOwner,
    ) -> CompositionError {
        let name = match source.member_name {
            Some(member) => format!(
                "{}.{}",
                self.arena.name(source.type_name),
                self.arena.name(member)
            ),
            None => self.arena.name(source.type_name).to_string(),
        };
        CompositionError::new(
            &diagnostic_messages::ANNOTATION_COPY_SOURCE_NOT_FOUND,
            &[&name, &self.owner_display(declared_on)],
        )
    }

    pub(crate) fn copy_incompatible_error(
        &self,
        resolved: AnnotationOwner,
        declared_on: AnnotationOwner,
    ) -> CompositionError {
        CompositionError::new(
            &diagnostic_messages::ANNOTATION_COPY_INCOMPATIBLE,
            &[&self.owner_display(resolved), &self.owner_display(declared_on)],
        )
    }

    pub(crate) fn copy_depth_exceeded_error(&self, start: AnnotationOwner) -> CompositionError {
        CompositionError::new(
            &diagnostic_messages::ANNOTATION_COPY_DEPTH_EXCEEDED,
            &[&self.owner_display(start)],
        )
    }
}
