use crate::error::LispResult;
use crate::eval::Machine;
use crate::primitives;
use crate::symbol::sym;
use crate::value::{Handle, NativeId, SpecialId, SymbolId};

/// A native function: receives the freshly built list of evaluated arguments.
pub type NativeFn = fn(&mut Machine, Handle) -> LispResult<Handle>;

/// A special form: receives the unevaluated argument list and decides itself
/// what to evaluate.
pub type SpecialFn = fn(&mut Machine, Handle) -> LispResult<Handle>;

pub struct NativeEntry {
    pub name: SymbolId,
    pub func: NativeFn,
}

pub struct SpecialEntry {
    pub name: SymbolId,
    pub func: SpecialFn,
}

/// Tables behind `Handle::Native` and `Handle::Special`.
#[derive(Default)]
pub struct Builtins {
    natives: Vec<NativeEntry>,
    specials: Vec<SpecialEntry>,
}

impl Builtins {
    pub fn add_native(&mut self, name: SymbolId, func: NativeFn) -> NativeId {
        let id = NativeId(self.natives.len() as u32);
        self.natives.push(NativeEntry { name, func });
        id
    }

    pub fn add_special(&mut self, name: SymbolId, func: SpecialFn) -> SpecialId {
        let id = SpecialId(self.specials.len() as u32);
        self.specials.push(SpecialEntry { name, func });
        id
    }

    pub fn native(&self, id: NativeId) -> &NativeEntry {
        &self.natives[id.0 as usize]
    }

    pub fn special(&self, id: SpecialId) -> &SpecialEntry {
        &self.specials[id.0 as usize]
    }
}

/// Populate the global frame of a fresh machine:
///   - nil = nil, t = t
///   - the special forms quote, def, progn, cond, lambda, let, closure, label
///   - the native functions from `primitives`
pub fn install(machine: &mut Machine) {
    machine.define_global(sym::NIL, Handle::NIL);
    machine.define_global(sym::T, Handle::T);

    let forms: [(SymbolId, SpecialFn); 8] = [
        (sym::QUOTE, Machine::form_quote),
        (sym::DEF, Machine::form_def),
        (sym::PROGN, Machine::form_progn),
        (sym::COND, Machine::form_cond),
        (sym::LAMBDA, Machine::form_lambda),
        (sym::LET, Machine::form_let),
        (sym::CLOSURE, Machine::form_closure),
        (sym::LABEL, Machine::form_label),
    ];
    for (name, func) in forms {
        let id = machine.builtins.add_special(name, func);
        machine.define_global(name, Handle::Special(id));
    }

    for &(name, func) in primitives::NATIVES {
        machine.define_native(name, func);
    }
}
