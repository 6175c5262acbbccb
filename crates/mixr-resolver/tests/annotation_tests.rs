//! Annotation propagation through the public builder API.

use mixr_common::diagnostics::diagnostic_codes;
use mixr_model::{AnnotationOwner, DeclArena, TypeId};
use mixr_resolver::{CompositionBuilder, ResolverOptions};

fn build(arena: &DeclArena, target: TypeId) -> mixr_resolver::ClassComposition {
    CompositionBuilder::new(arena, &ResolverOptions::default())
        .build(target)
        .unwrap()
}

fn kind_names<'a>(
    arena: &'a DeclArena,
    entries: &[mixr_resolver::AnnotationEntry],
) -> Vec<&'a str> {
    entries.iter().map(|e| arena.name(e.kind)).collect()
}

#[test]
fn class_level_set_merges_target_and_mixin_annotations() {
    let mut arena = DeclArena::new();
    let target = arena.add_class("Order");
    arena.add_annotation(AnnotationOwner::Type(target), "Entity");
    let x = arena.add_class("AuditMixin");
    arena.add_annotation(AnnotationOwner::Type(x), "Audited");
    arena.attach_mixin(target, x);

    let composition = build(&arena, target);
    assert_eq!(kind_names(&arena, composition.annotations()), ["Entity", "Audited"]);
}

#[test]
fn propagation_is_idempotent_across_builds() {
    let make = || {
        let mut arena = DeclArena::new();
        let target = arena.add_class("Order");
        arena.add_annotation(AnnotationOwner::Type(target), "Entity");
        arena.add_non_inheritable_annotation(AnnotationOwner::Type(target), "Cached");
        let x = arena.add_class("AuditMixin");
        arena.add_annotation(AnnotationOwner::Type(x), "Audited");
        arena.attach_mixin(target, x);
        (arena, target)
    };
    let (arena_a, target_a) = make();
    let (arena_b, target_b) = make();
    let first = build(&arena_a, target_a);
    let second = build(&arena_b, target_b);
    assert_eq!(first.annotations(), second.annotations());
}

#[test]
fn suppression_exempts_annotations_declared_on_the_suppressing_entity() {
    let mut arena = DeclArena::new();
    let target = arena.add_class("Order");
    // The target both declares "Audited" and suppresses it; only composed
    // occurrences from other entities are removed.
    arena.add_annotation(AnnotationOwner::Type(target), "Audited");
    arena.add_suppress_annotation(AnnotationOwner::Type(target), "Audited");
    let x = arena.add_class("AuditMixin");
    arena.add_annotation(AnnotationOwner::Type(x), "Audited");
    arena.attach_mixin(target, x);

    let composition = build(&arena, target);
    let audited: Vec<_> = composition
        .annotations()
        .iter()
        .filter(|e| arena.name(e.kind) == "Audited")
        .collect();
    assert_eq!(audited.len(), 1);
    assert_eq!(audited[0].origin, AnnotationOwner::Type(target));
}

#[test]
fn cross_entity_copy_forwards_only_inheritable_annotations() {
    let mut arena = DeclArena::new();
    let template = arena.add_class("Template");
    arena.add_annotation(AnnotationOwner::Type(template), "Serializable");
    arena.add_non_inheritable_annotation(AnnotationOwner::Type(template), "Cached");
    let target = arena.add_class("Order");
    arena.add_copy_annotation(AnnotationOwner::Type(target), "Template", None);

    let composition = build(&arena, target);
    assert_eq!(kind_names(&arena, composition.annotations()), ["Serializable"]);
    assert!(composition.annotations()[0].from_copy);
    assert_eq!(
        composition.annotations()[0].origin,
        AnnotationOwner::Type(template)
    );
}

#[test]
fn nested_copy_directives_are_followed() {
    let mut arena = DeclArena::new();
    let base = arena.add_class("Base");
    arena.add_annotation(AnnotationOwner::Type(base), "Serializable");
    let middle = arena.add_class("Middle");
    arena.add_copy_annotation(AnnotationOwner::Type(middle), "Base", None);
    arena.add_annotation(AnnotationOwner::Type(middle), "Versioned");
    let target = arena.add_class("Order");
    arena.add_copy_annotation(AnnotationOwner::Type(target), "Middle", None);

    let composition = build(&arena, target);
    let mut kinds = kind_names(&arena, composition.annotations());
    kinds.sort_unstable();
    assert_eq!(kinds, ["Serializable", "Versioned"]);
}

#[test]
fn self_copy_redeclares_non_inheritable_annotations_as_copy_templates() {
    let mut arena = DeclArena::new();
    let target = arena.add_class("Order");
    let member = arena.add_method(target, "total", &[], "Money");
    arena.add_annotation(AnnotationOwner::Member(member), "Logged");
    arena.add_non_inheritable_annotation(AnnotationOwner::Member(member), "Cached");
    arena.add_copy_annotation(AnnotationOwner::Member(member), "Order", Some("total"));

    let composition = build(&arena, target);
    let def = composition.def_for_decl(member).unwrap();
    let entries = &composition.member(def).annotations;
    let direct: Vec<&str> = entries
        .iter()
        .filter(|e| !e.from_copy)
        .map(|e| arena.name(e.kind))
        .collect();
    let templates: Vec<&str> = entries
        .iter()
        .filter(|e| e.from_copy)
        .map(|e| arena.name(e.kind))
        .collect();
    assert_eq!(direct, ["Logged", "Cached"]);
    // Only the non-inheritable annotation is re-declared, exactly once.
    assert_eq!(templates, ["Cached"]);
}

#[test]
fn unresolvable_copy_source_is_an_error() {
    let mut arena = DeclArena::new();
    let target = arena.add_class("Order");
    arena.add_copy_annotation(AnnotationOwner::Type(target), "Nowhere", None);

    let err = CompositionBuilder::new(&arena, &ResolverOptions::default())
        .build(target)
        .unwrap_err();
    assert_eq!(err.code, diagnostic_codes::ANNOTATION_COPY_SOURCE_NOT_FOUND);
    assert!(err.message_text.contains("Nowhere"));
}

#[test]
fn copying_from_an_incompatible_member_kind_is_an_error() {
    let mut arena = DeclArena::new();
    let target = arena.add_class("Order");
    let method = arena.add_method(target, "total", &[], "Money");
    arena.add_property(target, "id", "Guid");
    arena.add_copy_annotation(AnnotationOwner::Member(method), "Order", Some("id"));

    let err = CompositionBuilder::new(&arena, &ResolverOptions::default())
        .build(target)
        .unwrap_err();
    assert_eq!(err.code, diagnostic_codes::ANNOTATION_COPY_INCOMPATIBLE);
}

#[test]
fn copying_from_a_type_onto_a_member_is_an_error() {
    let mut arena = DeclArena::new();
    let template = arena.add_class("Template");
    arena.add_annotation(AnnotationOwner::Type(template), "Serializable");
    let target = arena.add_class("Order");
    let method = arena.add_method(target, "total", &[], "Money");
    arena.add_copy_annotation(AnnotationOwner::Member(method), "Template", None);

    let err = CompositionBuilder::new(&arena, &ResolverOptions::default())
        .build(target)
        .unwrap_err();
    assert_eq!(err.code, diagnostic_codes::ANNOTATION_COPY_INCOMPATIBLE);
}

#[test]
fn internal_control_annotations_never_propagate() {
    let mut arena = DeclArena::new();
    let target = arena.add_class("Order");
    arena.add_annotation(AnnotationOwner::Type(target), "mixr.internal.Marker");
    arena.add_annotation(AnnotationOwner::Type(target), "Entity");

    let composition = build(&arena, target);
    assert_eq!(kind_names(&arena, composition.annotations()), ["Entity"]);
}

#[test]
fn mutually_copying_entities_resolve_without_recursing_forever() {
    let mut arena = DeclArena::new();
    let target = arena.add_class("Order");
    arena.add_annotation(AnnotationOwner::Type(target), "Entity");
    arena.add_copy_annotation(AnnotationOwner::Type(target), "Mirror", None);
    let mirror = arena.add_class("Mirror");
    arena.add_annotation(AnnotationOwner::Type(mirror), "Reflected");
    arena.add_copy_annotation(AnnotationOwner::Type(mirror), "Order", None);

    let composition = build(&arena, target);
    let mut kinds = kind_names(&arena, composition.annotations());
    kinds.sort_unstable();
    assert_eq!(kinds, ["Entity", "Reflected"]);
}

#[test]
fn mixin_nodes_carry_their_own_resolved_annotations() {
    let mut arena = DeclArena::new();
    let target = arena.add_class("Order");
    let x = arena.add_class("AuditMixin");
    arena.add_annotation(AnnotationOwner::Type(x), "Audited");
    arena.attach_mixin(target, x);

    let composition = build(&arena, target);
    let node = composition.mixin_node(x).unwrap();
    assert_eq!(kind_names(&arena, &node.annotations), ["Audited"]);
}
