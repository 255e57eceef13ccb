//! Deterministic symbol identity.
//!
//! [`SymbolHash`] is a 64-bit hash of a symbol name mixed with a domain
//! marker, so that a function, a global and a type sharing a name never
//! collide in the package's symbol table.

use std::fmt;

use xxhash_rust::xxh64::xxh64;

/// Domain-specific mixing constants.
pub mod hash_constants {
    /// Domain marker for function symbols.
    pub const FUNCTION: u64 = 0x5ea77ffbcdf5f302;

    /// Domain marker for global variable symbols.
    pub const GLOBAL: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for named type symbols.
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;
}

/// Hash identifying a symbol of a given kind by name.
///
/// # Examples
///
/// ```
/// use llgo_ir::SymbolHash;
///
/// assert_eq!(SymbolHash::function("main.main"), SymbolHash::function("main.main"));
/// assert_ne!(SymbolHash::function("main.x"), SymbolHash::global("main.x"));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SymbolHash(pub u64);

impl SymbolHash {
    #[inline]
    fn with_domain(domain: u64, name: &str) -> Self {
        SymbolHash(xxh64(name.as_bytes(), domain))
    }

    pub fn function(name: &str) -> Self {
        Self::with_domain(hash_constants::FUNCTION, name)
    }

    pub fn global(name: &str) -> Self {
        Self::with_domain(hash_constants::GLOBAL, name)
    }

    pub fn type_name(name: &str) -> Self {
        Self::with_domain(hash_constants::TYPE, name)
    }
}

impl fmt::Debug for SymbolHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolHash({:#018x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domains_do_not_collide() {
        let name = "main.value";
        let f = SymbolHash::function(name);
        let g = SymbolHash::global(name);
        let t = SymbolHash::type_name(name);
        assert_ne!(f, g);
        assert_ne!(g, t);
        assert_ne!(f, t);
    }

    #[test]
    fn deterministic() {
        assert_eq!(SymbolHash::global("a.b"), SymbolHash::global("a.b"));
        assert_ne!(SymbolHash::global("a.b"), SymbolHash::global("a.c"));
    }
}
