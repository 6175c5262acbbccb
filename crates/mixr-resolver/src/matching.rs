//! Per-kind member matching.
//!
//! Introduction analysis, required-member resolution, and override
//! resolution all answer the same question - does member A satisfy member
//! B's declared shape - but the answer differs per member kind. One
//! matcher table parameterizes the shared algorithms instead of three
//! near-duplicate code paths.

use mixr_model::{MemberDecl, MemberKind};

pub(crate) struct KindMatcher {
    pub(crate) kind: MemberKind,
    /// Whether two member declarations of this kind have the same shape.
    pub(crate) matches: fn(&MemberDecl, &MemberDecl) -> bool,
}

fn method_matches(a: &MemberDecl, b: &MemberDecl) -> bool {
    a.name == b.name
        && a.signature.params == b.signature.params
        && a.signature.value_type == b.signature.value_type
}

fn value_member_matches(a: &MemberDecl, b: &MemberDecl) -> bool {
    a.name == b.name && a.signature.value_type == b.signature.value_type
}

/// One matcher per member kind, in analysis order.
pub(crate) const KIND_MATCHERS: [KindMatcher; 3] = [
    KindMatcher {
        kind: MemberKind::Method,
        matches: method_matches,
    },
    KindMatcher {
        kind: MemberKind::Property,
        matches: value_member_matches,
    },
    KindMatcher {
        kind: MemberKind::Event,
        matches: value_member_matches,
    },
];

/// Whether two member declarations have the same kind and shape.
pub(crate) fn members_match(a: &MemberDecl, b: &MemberDecl) -> bool {
    a.kind == b.kind
        && KIND_MATCHERS
            .iter()
            .find(|m| m.kind == a.kind)
            .is_some_and(|m| (m.matches)(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mixr_model::DeclArena;

    #[test]
    fn methods_match_on_name_and_full_signature() {
        let mut arena = DeclArena::new();
        let a = arena.add_class("A");
        let b = arena.add_class("B");
        let m1 = arena.add_method(a, "run", &["i32"], "bool");
        let m2 = arena.add_method(b, "run", &["i32"], "bool");
        let m3 = arena.add_method(b, "run", &["i64"], "bool");
        let m4 = arena.add_method(b, "walk", &["i32"], "bool");
        assert!(members_match(arena.member(m1), arena.member(m2)));
        assert!(!members_match(arena.member(m1), arena.member(m3)));
        assert!(!members_match(arena.member(m1), arena.member(m4)));
    }

    #[test]
    fn properties_match_on_name_and_value_type() {
        let mut arena = DeclArena::new();
        let a = arena.add_class("A");
        let b = arena.add_class("B");
        let p1 = arena.add_property(a, "total", "Money");
        let p2 = arena.add_property(b, "total", "Money");
        let p3 = arena.add_property(b, "total", "i32");
        assert!(members_match(arena.member(p1), arena.member(p2)));
        assert!(!members_match(arena.member(p1), arena.member(p3)));
    }

    #[test]
    fn kinds_never_match_across() {
        let mut arena = DeclArena::new();
        let a = arena.add_class("A");
        let b = arena.add_class("B");
        let method = arena.add_method(a, "total", &[], "Money");
        let property = arena.add_property(b, "total", "Money");
        assert!(!members_match(arena.member(method), arena.member(property)));
    }
}
