use std::fmt;

use crate::symbol::sym;

/// Unique identifier for an interned symbol.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

/// Index into the cons-cell arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PairId(pub u32);

/// Index into the arena's lambda records.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LambdaId(pub u32);

/// Index into the arena's closure records.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClosureId(pub u32);

/// Index into the machine's native function table.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeId(pub u32);

/// Index into the machine's special form table.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecialId(pub u32);

/// A Lisp value. Copy semantics: the data behind pairs, lambdas and closures
/// lives in the arena, and native/special bodies live in the machine's tables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Handle {
    /// Never a legal value at evaluation time.
    #[default]
    Null,
    Pair(PairId),
    Symbol(SymbolId),
    Native(NativeId),
    Special(SpecialId),
    Lambda(LambdaId),
    Closure(ClosureId),
}

impl Handle {
    pub const NIL: Handle = Handle::Symbol(sym::NIL);
    pub const T: Handle = Handle::Symbol(sym::T);

    /// True for the `nil` symbol, the list terminator and only false value.
    pub fn is_nil(self) -> bool {
        self == Handle::NIL
    }

    pub fn is_pair(self) -> bool {
        matches!(self, Handle::Pair(_))
    }

    /// Anything that is not a pair.
    pub fn is_atom(self) -> bool {
        !self.is_pair()
    }

    pub fn as_pair(self) -> Option<PairId> {
        match self {
            Handle::Pair(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_symbol(self) -> Option<SymbolId> {
        match self {
            Handle::Symbol(id) => Some(id),
            _ => None,
        }
    }

    /// `t` for true, `nil` for false.
    pub fn from_bool(b: bool) -> Handle {
        if b {
            Handle::T
        } else {
            Handle::NIL
        }
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handle::Null => write!(f, "Null"),
            Handle::Pair(id) => write!(f, "Pair({})", id.0),
            Handle::Symbol(id) => write!(f, "Sym({})", id.0),
            Handle::Native(id) => write!(f, "Native({})", id.0),
            Handle::Special(id) => write!(f, "Special({})", id.0),
            Handle::Lambda(id) => write!(f, "Lambda({})", id.0),
            Handle::Closure(id) => write!(f, "Closure({})", id.0),
        }
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

impl fmt::Debug for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PairId({})", self.0)
    }
}

impl fmt::Debug for LambdaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LambdaId({})", self.0)
    }
}

impl fmt::Debug for ClosureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClosureId({})", self.0)
    }
}

impl fmt::Debug for NativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeId({})", self.0)
    }
}

impl fmt::Debug for SpecialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SpecialId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_handle_is_null() {
        assert_eq!(Handle::default(), Handle::Null);
        assert!(!Handle::Null.is_nil());
    }

    #[test]
    fn nil_is_the_nil_symbol() {
        assert!(Handle::NIL.is_nil());
        assert!(Handle::NIL.is_atom());
        assert!(!Handle::T.is_nil());
        assert_eq!(Handle::from_bool(false), Handle::NIL);
        assert_eq!(Handle::from_bool(true), Handle::T);
    }
}
