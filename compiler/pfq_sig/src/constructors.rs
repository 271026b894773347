//! The closed set of single-argument type constructors.
//!
//! The grammar has no general type application: only the names in a
//! [`ConstructorSet`] may be applied to an argument (`Maybe CInt`). Any
//! other identifier followed by a type is juxtaposition and is rejected.

/// Names accepted as single-argument type constructors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstructorSet<'c> {
    names: &'c [&'c str],
}

impl ConstructorSet<'static> {
    /// The constructors of pfq-lang: `Maybe` and `Action`.
    pub const DEFAULT: ConstructorSet<'static> = ConstructorSet {
        names: &["Maybe", "Action"],
    };
}

impl<'c> ConstructorSet<'c> {
    /// A set holding exactly `names`.
    pub const fn new(names: &'c [&'c str]) -> Self {
        ConstructorSet { names }
    }

    /// Returns `true` if `name` is a constructor. Case-sensitive.
    pub fn contains(&self, name: &[u8]) -> bool {
        self.names.iter().any(|n| n.as_bytes() == name)
    }

    /// The constructor names, in declaration order.
    pub fn names(&self) -> &'c [&'c str] {
        self.names
    }
}

impl Default for ConstructorSet<'static> {
    fn default() -> Self {
        Self::DEFAULT
    }
}
