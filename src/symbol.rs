use rustc_hash::FxHashMap;

use crate::value::{Handle, SymbolId};

/// One interned symbol: its printable name and its shallow-binding stack,
/// most recent binding last.
pub struct Symbol {
    pub name: String,
    /// Integer-looking names evaluate to themselves when unbound.
    numeral: bool,
    bindings: Vec<Handle>,
}

fn is_numeral(name: &str) -> bool {
    let digits = name.strip_prefix(['-', '+']).unwrap_or(name);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Interned symbol table. Each unique symbol name maps to a unique SymbolId,
/// so `eq` on symbols is id comparison.
pub struct SymbolTable {
    name_to_id: FxHashMap<String, SymbolId>,
    symbols: Vec<Symbol>,
}

/// Well-known symbol IDs, pre-interned at startup.
/// These must match the order of interning in SymbolTable::new().
pub mod sym {
    use crate::value::SymbolId;

    pub const NIL: SymbolId = SymbolId(0);
    pub const T: SymbolId = SymbolId(1);
    pub const QUOTE: SymbolId = SymbolId(2);
    pub const DEF: SymbolId = SymbolId(3);
    pub const PROGN: SymbolId = SymbolId(4);
    pub const COND: SymbolId = SymbolId(5);
    pub const LAMBDA: SymbolId = SymbolId(6);
    pub const LET: SymbolId = SymbolId(7);
    pub const CLOSURE: SymbolId = SymbolId(8);
    pub const LABEL: SymbolId = SymbolId(9);
    pub const QUIT: SymbolId = SymbolId(10);
}

impl SymbolTable {
    /// Create a new symbol table with all well-known symbols pre-interned.
    /// The order MUST match the constants in the `sym` module above.
    pub fn new() -> Self {
        let names = [
            "nil", "t", "quote", "def", "progn", "cond", "lambda", "let", "closure", "label",
            "quit",
        ];

        let mut table = SymbolTable {
            name_to_id: FxHashMap::default(),
            symbols: Vec::with_capacity(256),
        };
        for name in names {
            table.intern(name);
        }
        table
    }

    /// Intern a symbol name. Returns the existing ID if already interned,
    /// or creates a new, unbound one.
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = SymbolId(self.symbols.len() as u32);
        self.name_to_id.insert(name.to_string(), id);
        self.symbols.push(Symbol {
            name: name.to_string(),
            numeral: is_numeral(name),
            bindings: Vec::new(),
        });
        id
    }

    /// Look up a symbol name by its ID.
    pub fn name(&self, id: SymbolId) -> &str {
        &self.symbols[id.0 as usize].name
    }

    /// Look up a symbol ID by name, without interning.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.name_to_id.get(name).copied()
    }

    /// Total number of interned symbols.
    pub fn count(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_numeral(&self, id: SymbolId) -> bool {
        self.symbols[id.0 as usize].numeral
    }

    /// The innermost binding, or None if the symbol is unbound.
    pub fn binding(&self, id: SymbolId) -> Option<Handle> {
        self.symbols[id.0 as usize].bindings.last().copied()
    }

    #[cfg(test)]
    pub(crate) fn is_bound(&self, id: SymbolId) -> bool {
        !self.symbols[id.0 as usize].bindings.is_empty()
    }

    /// Number of stacked bindings for a symbol.
    #[cfg(test)]
    pub(crate) fn binding_depth(&self, id: SymbolId) -> usize {
        self.symbols[id.0 as usize].bindings.len()
    }

    pub fn push_binding(&mut self, id: SymbolId, value: Handle) {
        self.symbols[id.0 as usize].bindings.push(value);
    }

    pub fn pop_binding(&mut self, id: SymbolId) -> Option<Handle> {
        self.symbols[id.0 as usize].bindings.pop()
    }

    /// Overwrite the outermost binding, which belongs to the global frame.
    /// Returns false if the symbol has no bindings at all.
    pub fn replace_global_binding(&mut self, id: SymbolId, value: Handle) -> bool {
        match self.symbols[id.0 as usize].bindings.first_mut() {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Slide a new outermost binding underneath any active local ones.
    pub fn insert_global_binding(&mut self, id: SymbolId, value: Handle) {
        self.symbols[id.0 as usize].bindings.insert(0, value);
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_idempotent() {
        let mut table = SymbolTable::new();
        let a = table.intern("foo");
        let b = table.intern("foo");
        let c = table.intern("bar");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(table.name(a), "foo");
    }

    #[test]
    fn well_known_symbols_match_their_names() {
        let table = SymbolTable::new();
        assert_eq!(table.lookup("nil"), Some(sym::NIL));
        assert_eq!(table.lookup("t"), Some(sym::T));
        assert_eq!(table.lookup("quote"), Some(sym::QUOTE));
        assert_eq!(table.lookup("label"), Some(sym::LABEL));
        assert_eq!(table.lookup("quit"), Some(sym::QUIT));
        assert_eq!(table.lookup("nonexistent"), None);
    }

    #[test]
    fn new_symbols_start_unbound() {
        let mut table = SymbolTable::new();
        let x = table.intern("x");
        assert!(!table.is_bound(x));
        assert_eq!(table.binding(x), None);
    }

    #[test]
    fn numerals_are_flagged() {
        let mut table = SymbolTable::new();
        for name in ["0", "42", "-7", "+3"] {
            let id = table.intern(name);
            assert!(table.is_numeral(id), "{}", name);
        }
        for name in ["-", "+", "4a", "x1", ""] {
            let id = table.intern(name);
            assert!(!table.is_numeral(id), "{:?}", name);
        }
    }

    #[test]
    fn global_binding_goes_underneath_locals() {
        let mut table = SymbolTable::new();
        let x = table.intern("x");
        table.push_binding(x, Handle::T);
        table.insert_global_binding(x, Handle::NIL);
        assert_eq!(table.binding(x), Some(Handle::T));
        table.pop_binding(x);
        assert_eq!(table.binding(x), Some(Handle::NIL));
        assert!(table.replace_global_binding(x, Handle::T));
        assert_eq!(table.binding(x), Some(Handle::T));
    }
}
