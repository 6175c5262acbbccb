//! End-to-end composition scenarios through the public builder API.

use mixr_common::{CompositionError, ErrorCategory};
use mixr_model::{DeclArena, TypeId};
use mixr_resolver::{ClassComposition, CompositionBuilder, MixinIndex, ResolverOptions};

fn build(arena: &DeclArena, target: TypeId) -> Result<ClassComposition, CompositionError> {
    CompositionBuilder::new(arena, &ResolverOptions::default()).build(target)
}

#[test]
fn override_plus_introduction_scenario_resolves_fully() {
    let mut arena = DeclArena::new();
    let target = arena.add_class("T");
    let m1 = arena.add_method(target, "m1", &[], "void");
    let _m2 = arena.add_method(target, "m2", &[], "void");

    let ifoo = arena.add_interface("IFoo");
    let p1 = arena.add_property(ifoo, "p1", "i32");

    let x = arena.add_class("X");
    let x_m1 = arena.add_method(x, "m1", &[], "void");
    arena.mark_override(x_m1);
    let x_p1 = arena.add_property(x, "p1", "i32");
    arena.implement_interface(x, ifoo);

    let y = arena.add_class("Y");

    arena.attach_mixin(target, x);
    arena.attach_mixin(target, y);
    arena.add_mixin_dependency(y, x);

    let composition = build(&arena, target).unwrap();

    let order: Vec<&str> = composition
        .mixins()
        .iter()
        .map(|n| arena.type_name(n.mixin))
        .collect();
    assert_eq!(order, ["X", "Y"]);

    let m1_def = composition.def_for_decl(m1).unwrap();
    let x_m1_def = composition.def_for_decl(x_m1).unwrap();
    assert_eq!(composition.member(m1_def).overriders.as_slice(), &[x_m1_def]);
    assert_eq!(composition.member(x_m1_def).base, Some(m1_def));

    let introduction = composition.introduction_for(ifoo).unwrap();
    assert_eq!(introduction.mixin, x);
    let x_p1_def = composition.def_for_decl(x_p1).unwrap();
    assert_eq!(introduction.implementer_of(p1), Some(x_p1_def));
}

#[test]
fn every_mixin_receives_an_ordinal_consistent_with_its_position() {
    let mut arena = DeclArena::new();
    let target = arena.add_class("Order");
    for name in ["A", "B", "C"] {
        let mixin = arena.add_class(name);
        arena.attach_mixin(target, mixin);
    }
    let composition = build(&arena, target).unwrap();
    for (pos, node) in composition.mixins().iter().enumerate() {
        assert_eq!(node.index, Some(MixinIndex(pos as u32)));
        assert_eq!(composition.mixin_at(MixinIndex(pos as u32)).mixin, node.mixin);
    }
}

#[test]
fn repeated_builds_of_identical_input_are_identical() {
    let make_arena = || {
        let mut arena = DeclArena::new();
        let target = arena.add_class("Order");
        let audit = arena.add_class("AuditMixin");
        let log = arena.add_class("LogMixin");
        let iface = arena.add_interface("IAudit");
        arena.add_property(iface, "log", "String");
        arena.add_property(audit, "log", "String");
        arena.implement_interface(audit, iface);
        arena.attach_mixin(target, audit);
        arena.attach_mixin(target, log);
        arena.add_mixin_dependency(log, audit);
        (arena, target)
    };
    let (arena_a, target_a) = make_arena();
    let (arena_b, target_b) = make_arena();
    let first = serde_json::to_string(&build(&arena_a, target_a).unwrap()).unwrap();
    let second = serde_json::to_string(&build(&arena_b, target_b).unwrap()).unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn target_must_be_a_declared_class() {
    let mut arena = DeclArena::new();
    let iface = arena.add_interface("IFoo");
    let err = build(&arena, iface).unwrap_err();
    assert_eq!(err.category, ErrorCategory::InvalidInput);
    assert!(err.message_text.contains("IFoo"));

    let err = build(&arena, TypeId(99)).unwrap_err();
    assert_eq!(err.category, ErrorCategory::InvalidInput);
}

#[test]
fn dangling_dependency_type_is_an_input_error() {
    let mut arena = DeclArena::new();
    let target = arena.add_class("Order");
    let mixin = arena.add_class("AuditMixin");
    arena.attach_mixin(target, mixin);
    arena.add_mixin_dependency(mixin, TypeId(1234));
    let err = build(&arena, target).unwrap_err();
    assert_eq!(err.category, ErrorCategory::InvalidInput);
    assert!(
        err.related_information
            .iter()
            .any(|line| line.contains("AuditMixin"))
    );
}

#[test]
fn composition_errors_use_the_composition_category() {
    let mut arena = DeclArena::new();
    let target = arena.add_class("Order");
    let a = arena.add_class("A");
    let b = arena.add_class("B");
    arena.attach_mixin(target, a);
    arena.attach_mixin(target, b);
    arena.add_mixin_dependency(a, b);
    arena.add_mixin_dependency(b, a);
    let err = build(&arena, target).unwrap_err();
    assert_eq!(err.category, ErrorCategory::Composition);
}
