use log::debug;
use rustc_hash::FxHashSet;

use crate::symbol::SymbolTable;
use crate::value::{Handle, SymbolId};

/// One lexical scope: the symbols it pushed a binding onto.
#[derive(Default)]
struct Frame {
    bound: Vec<SymbolId>,
}

/// The execution stack of binding frames.
///
/// Values live on each symbol's own binding stack (shallow binding); a frame
/// only remembers which symbols it pushed so that popping it can undo them.
/// Frames are strictly LIFO. Frame 0, once pushed, is the global frame.
#[derive(Default)]
pub struct ExecStack {
    frames: Vec<Frame>,
    globals: FxHashSet<SymbolId>,
}

impl ExecStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Frame::default());
        debug!("push frame {}", self.frames.len() - 1);
    }

    /// Bind `symbol` to `value` in the top frame.
    ///
    /// Panics if no frame is active.
    pub fn bind(&mut self, symbols: &mut SymbolTable, symbol: SymbolId, value: Handle) {
        let top = self
            .frames
            .last_mut()
            .unwrap_or_else(|| panic!("bind of '{}' with no active frame", symbols.name(symbol)));
        top.bound.push(symbol);
        symbols.push_binding(symbol, value);
        if self.frames.len() == 1 {
            self.globals.insert(symbol);
        }
    }

    /// Pop the top frame, undoing every binding it made.
    ///
    /// Panics if no frame is active.
    pub fn pop_frame(&mut self, symbols: &mut SymbolTable) {
        let frame = match self.frames.pop() {
            Some(frame) => frame,
            None => panic!("pop_frame on an empty execution stack"),
        };
        for &symbol in frame.bound.iter().rev() {
            symbols.pop_binding(symbol);
        }
        if self.frames.is_empty() {
            self.globals.clear();
        }
        debug!("pop frame {} ({} bindings)", self.frames.len(), frame.bound.len());
    }

    /// Bind `symbol` in the global frame, whatever frames are active above it.
    /// An existing global binding is overwritten; local bindings keep
    /// shadowing it until their frames are popped.
    ///
    /// Panics if no frame is active.
    pub fn define_global(&mut self, symbols: &mut SymbolTable, symbol: SymbolId, value: Handle) {
        assert!(!self.frames.is_empty(), "define_global with no global frame");
        if self.globals.contains(&symbol) && symbols.replace_global_binding(symbol, value) {
            return;
        }
        symbols.insert_global_binding(symbol, value);
        self.frames[0].bound.push(symbol);
        self.globals.insert(symbol);
    }

    /// Number of active frames, the global one included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Every symbol bound by a frame above the global one, innermost last,
    /// without duplicates.
    pub fn local_symbols(&self) -> Vec<SymbolId> {
        let mut seen = FxHashSet::default();
        self.frames
            .iter()
            .skip(1)
            .flat_map(|f| f.bound.iter().copied())
            .filter(|s| seen.insert(*s))
            .collect()
    }
}
