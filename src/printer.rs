use std::io;

use crate::globals::Builtins;
use crate::heap::Heap;
use crate::symbol::SymbolTable;
use crate::value::{Handle, SymbolId};

struct Printer<'a> {
    heap: &'a Heap,
    symbols: &'a SymbolTable,
    builtins: Option<&'a Builtins>,
}

/// Print a value to a string. Natives and special forms print without their
/// names; use `print_with_builtins` when the tables are at hand.
pub fn print_val(val: Handle, heap: &Heap, symbols: &SymbolTable) -> String {
    let printer = Printer {
        heap,
        symbols,
        builtins: None,
    };
    let mut out = String::new();
    printer.print_inner(val, &mut out, 0);
    out
}

/// Print a value to a string, naming natives and special forms.
pub fn print_with_builtins(val: Handle, heap: &Heap, symbols: &SymbolTable, builtins: &Builtins) -> String {
    let printer = Printer {
        heap,
        symbols,
        builtins: Some(builtins),
    };
    let mut out = String::new();
    printer.print_inner(val, &mut out, 0);
    out
}

/// Print a value onto an output stream.
pub fn write_val(
    val: Handle,
    heap: &Heap,
    symbols: &SymbolTable,
    builtins: &Builtins,
    w: &mut impl io::Write,
) -> io::Result<()> {
    w.write_all(print_with_builtins(val, heap, symbols, builtins).as_bytes())
}

impl Printer<'_> {
    fn print_inner(&self, val: Handle, out: &mut String, depth: usize) {
        if depth > 1000 {
            out.push_str("...");
            return;
        }

        match val {
            Handle::Null => out.push_str("#<null>"),
            Handle::Symbol(id) => out.push_str(self.symbols.name(id)),
            Handle::Native(id) => {
                out.push_str("#<native");
                if let Some(b) = self.builtins {
                    out.push(' ');
                    out.push_str(self.symbols.name(b.native(id).name));
                }
                out.push('>');
            }
            Handle::Special(id) => {
                out.push_str("#<special");
                if let Some(b) = self.builtins {
                    out.push(' ');
                    out.push_str(self.symbols.name(b.special(id).name));
                }
                out.push('>');
            }
            Handle::Lambda(id) => {
                out.push_str("#<lambda ");
                self.print_params(&self.heap.lambda(id).params, out);
                out.push('>');
            }
            Handle::Closure(id) => {
                let lambda = self.heap.closure(id).lambda;
                out.push_str("#<closure ");
                self.print_params(&self.heap.lambda(lambda).params, out);
                out.push('>');
            }
            Handle::Pair(id) => {
                out.push('(');
                self.print_inner(self.heap.car(id), out, depth + 1);

                let mut current = self.heap.cdr(id);
                while let Handle::Pair(pid) = current {
                    out.push(' ');
                    self.print_inner(self.heap.car(pid), out, depth + 1);
                    current = self.heap.cdr(pid);
                }
                if !current.is_nil() {
                    out.push_str(" . ");
                    self.print_inner(current, out, depth + 1);
                }
                out.push(')');
            }
        }
    }

    fn print_params(&self, params: &[SymbolId], out: &mut String) {
        out.push('(');
        for (i, &p) in params.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(self.symbols.name(p));
        }
        out.push(')');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::Lambda;

    #[test]
    fn prints_proper_and_dotted_lists() {
        let mut heap = Heap::default();
        let mut symbols = SymbolTable::new();
        let a = Handle::Symbol(symbols.intern("a"));
        let b = Handle::Symbol(symbols.intern("b"));

        let proper = heap.list(&[a, b]).unwrap();
        assert_eq!(print_val(proper, &heap, &symbols), "(a b)");

        let dotted = heap.cons(a, b).unwrap();
        assert_eq!(print_val(dotted, &heap, &symbols), "(a . b)");

        let nested = heap.list_with_tail(&[proper, a], b).unwrap();
        assert_eq!(print_val(nested, &heap, &symbols), "((a b) a . b)");

        assert_eq!(print_val(Handle::NIL, &heap, &symbols), "nil");
    }

    #[test]
    fn prints_lambdas_by_parameters() {
        let mut heap = Heap::default();
        let mut symbols = SymbolTable::new();
        let x = symbols.intern("x");
        let y = symbols.intern("y");
        let id = heap
            .alloc_lambda(Lambda {
                params: vec![x, y],
                body: Handle::NIL,
            })
            .unwrap();
        assert_eq!(print_val(Handle::Lambda(id), &heap, &symbols), "#<lambda (x y)>");
        assert_eq!(print_val(Handle::Null, &heap, &symbols), "#<null>");
    }
}
