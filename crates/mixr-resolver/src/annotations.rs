//! Annotation propagation.
//!
//! Computes resolved annotation sets: the merged class-level set (target
//! class plus every mixin, in sorted order), one set per mixin node, and
//! one set per member definition. Plain annotations propagate unless their
//! kind belongs to the resolver's internal control vocabulary. Copy
//! directives pull annotations in from a named source entity; suppression
//! directives remove matching annotations that originate from a different
//! entity than the one declaring the suppression.

use crate::composition::AnnotationEntry;
use crate::state::ResolverState;
use mixr_common::{Atom, CompositionError, limits};
use mixr_model::{AnnotationOwner, AnnotationPayload, CopySource};
use tracing::trace;

/// How the current entity's declarations are being walked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GatherMode {
    /// The entity is a direct source: every plain annotation is taken and
    /// directives are processed.
    Direct,
    /// The entity is the source of a cross-entity copy: only inheritable
    /// plain annotations are taken; nested copy directives are followed.
    CopyForeign,
    /// The entity is the source of a self-copy: only non-inheritable plain
    /// annotations are taken (re-declared onto the entity as copy
    /// templates) and no further directives are processed. This bounds the
    /// self-copy idiom to depth one.
    CopySelf,
}

impl ResolverState<'_> {
    pub(crate) fn propagate_annotations(&mut self) -> Result<(), CompositionError> {
        // Merged class-level set: the target class first, then every mixin
        // in sorted order.
        let mut class_sources = vec![AnnotationOwner::Type(self.target)];
        class_sources.extend(self.comp.mixins.iter().map(|n| AnnotationOwner::Type(n.mixin)));
        self.comp.annotations = self.gather_merged(&class_sources)?;

        for pos in 0..self.comp.mixins.len() {
            let mixin = self.comp.mixins[pos].mixin;
            self.comp.mixins[pos].annotations =
                self.gather_merged(&[AnnotationOwner::Type(mixin)])?;
        }

        for def in 0..self.comp.members.len() {
            let decl = self.comp.members[def].decl;
            self.comp.members[def].annotations =
                self.gather_merged(&[AnnotationOwner::Member(decl)])?;
        }
        Ok(())
    }

    /// Compute the resolved annotation set gathered from `sources`, in
    /// order, then apply suppression directives. Deterministic: the same
    /// declared annotation set always yields the same entry sequence.
    pub(crate) fn gather_merged(
        &self,
        sources: &[AnnotationOwner],
    ) -> Result<Vec<AnnotationEntry>, CompositionError> {
        let mut entries = Vec::new();
        let mut suppressors: Vec<(AnnotationOwner, Atom)> = Vec::new();
        for &source in sources {
            let mut chain = Vec::new();
            self.gather_from(source, GatherMode::Direct, &mut chain, &mut entries, &mut suppressors)?;
        }
        // A suppression declared on entity A only removes matching
        // annotations originating from entities other than A.
        entries.retain(|entry| {
            !suppressors
                .iter()
                .any(|&(owner, kind)| kind == entry.kind && entry.origin != owner)
        });
        Ok(entries)
    }

    fn gather_from(
        &self,
        entity: AnnotationOwner,
        mode: GatherMode,
        chain: &mut Vec<AnnotationOwner>,
        entries: &mut Vec<AnnotationEntry>,
        suppressors: &mut Vec<(AnnotationOwner, Atom)>,
    ) -> Result<(), CompositionError> {
        if chain.len() >= limits::MAX_ANNOTATION_COPY_DEPTH {
            let start = chain.first().copied().unwrap_or(entity);
            return Err(self.copy_depth_exceeded_error(start));
        }
        chain.push(entity);
        for &annotation_id in self.arena.annotations_of(entity) {
            let annotation = self.arena.annotation(annotation_id);
            match &annotation.payload {
                AnnotationPayload::Plain => {
                    let include = match mode {
                        GatherMode::Direct => true,
                        GatherMode::CopyForeign => annotation.inheritable,
                        GatherMode::CopySelf => !annotation.inheritable,
                    };
                    if include && !self.is_internal_annotation(annotation.kind) {
                        entries.push(AnnotationEntry {
                            decl: annotation_id,
                            kind: annotation.kind,
                            origin: entity,
                            from_copy: mode != GatherMode::Direct,
                        });
                    }
                }
                AnnotationPayload::Suppress(kind) => {
                    if mode != GatherMode::CopySelf {
                        suppressors.push((entity, *kind));
                    }
                }
                AnnotationPayload::CopyFrom(source) => {
                    if mode == GatherMode::CopySelf {
                        continue;
                    }
                    let resolved = self.resolve_copy_source(entity, source)?;
                    self.check_copy_compatible(entity, resolved)?;
                    if resolved == entity {
                        // Self-copy idiom: one bounded pass picking up the
                        // entity's own non-inheritable annotations.
                        self.gather_from(entity, GatherMode::CopySelf, chain, entries, suppressors)?;
                    } else if chain.contains(&resolved) {
                        trace!(
                            source = %self.owner_display(resolved),
                            "copy source already on the gather chain, skipping"
                        );
                    } else {
                        self.gather_from(
                            resolved,
                            GatherMode::CopyForeign,
                            chain,
                            entries,
                            suppressors,
                        )?;
                    }
                }
            }
        }
        chain.pop();
        Ok(())
    }

    fn is_internal_annotation(&self, kind: Atom) -> bool {
        let name = self.arena.name(kind);
        self.options
            .internal_annotation_namespaces
            .iter()
            .any(|ns| name.starts_with(ns.as_str()))
    }

    /// Resolve the named source entity of a copy directive.
    fn resolve_copy_source(
        &self,
        declared_on: AnnotationOwner,
        source: &CopySource,
    ) -> Result<AnnotationOwner, CompositionError> {
        let type_name = self.arena.name(source.type_name);
        let Some(ty) = self.arena.type_named(type_name) else {
            return Err(self.copy_source_not_found_error(source, declared_on));
        };
        match source.member_name {
            None => Ok(AnnotationOwner::Type(ty)),
            Some(member_name) => {
                let name = self.arena.name(member_name);
                match self.arena.member_named(ty, name) {
                    Some(member) => Ok(AnnotationOwner::Member(member)),
                    None => Err(self.copy_source_not_found_error(source, declared_on)),
                }
            }
        }
    }

    /// A copy source must have the same shape as the entity the directive
    /// is declared on: type-to-type, or member-to-member of the same kind.
    fn check_copy_compatible(
        &self,
        declared_on: AnnotationOwner,
        resolved: AnnotationOwner,
    ) -> Result<(), CompositionError> {
        let compatible = match (declared_on, resolved) {
            (AnnotationOwner::Type(_), AnnotationOwner::Type(_)) => true,
            (AnnotationOwner::Member(dest), AnnotationOwner::Member(src)) => {
                self.arena.member(dest).kind == self.arena.member(src).kind
            }
            _ => false,
        };
        if compatible {
            Ok(())
        } else {
            Err(self.copy_incompatible_error(resolved, declared_on))
        }
    }
}
