//! String interner for declaration names.
//!
//! Type, member, and annotation names are interned into a per-arena pool and
//! passed around as u32 indices (Atoms). Comparisons become integer
//! comparisons (atom_a == atom_b) instead of string comparisons, and the
//! resolver's matching passes compare names heavily.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// An interned string identifier.
///
/// Atoms are cheap to copy (just a u32) and can be compared with == in O(1).
/// To get the actual string, use `Interner::resolve(atom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// A sentinel value representing no atom / empty string.
    pub const NONE: Atom = Atom(0);

    /// Check if this is the empty/none atom.
    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Get the raw index value.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// A string interner.
///
/// Unlike a global pool, every declaration arena owns its own interner, so
/// independent compositions never contend on shared state.
#[derive(Clone, Debug, Default)]
pub struct Interner {
    map: FxHashMap<String, u32>,
    strings: Vec<String>,
}

impl Interner {
    /// Create a new interner with the empty string pre-interned as `Atom::NONE`.
    pub fn new() -> Self {
        let mut interner = Interner {
            map: FxHashMap::default(),
            strings: Vec::new(),
        };
        interner.intern("");
        interner
    }

    /// Intern a string, returning its atom. Repeated calls with the same
    /// string return the same atom.
    pub fn intern(&mut self, s: &str) -> Atom {
        if let Some(&idx) = self.map.get(s) {
            return Atom(idx);
        }
        let idx = self.strings.len() as u32;
        self.strings.push(s.to_string());
        self.map.insert(s.to_string(), idx);
        Atom(idx)
    }

    /// Look up a string without interning it.
    pub fn lookup(&self, s: &str) -> Option<Atom> {
        self.map.get(s).map(|&idx| Atom(idx))
    }

    /// Resolve an atom back to its string.
    ///
    /// # Panics
    ///
    /// Panics if the atom was produced by a different interner.
    pub fn resolve(&self, atom: Atom) -> &str {
        &self.strings[atom.0 as usize]
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_deduplicates() {
        let mut interner = Interner::new();
        let a = interner.intern("IFoo");
        let b = interner.intern("IFoo");
        let c = interner.intern("IBar");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "IFoo");
        assert_eq!(interner.resolve(c), "IBar");
    }

    #[test]
    fn empty_string_is_none() {
        let mut interner = Interner::new();
        assert_eq!(interner.intern(""), Atom::NONE);
        assert!(Atom::NONE.is_none());
        assert_eq!(interner.resolve(Atom::NONE), "");
    }

    #[test]
    fn lookup_does_not_intern() {
        let mut interner = Interner::new();
        assert_eq!(interner.lookup("Missing"), None);
        let atom = interner.intern("Present");
        assert_eq!(interner.lookup("Present"), Some(atom));
    }
}
