//! Printing a value and reading it back gives the same structure.

use ironlisp::heap::Heap;
use ironlisp::printer::print_val;
use ironlisp::reader::read_str;
use ironlisp::symbol::SymbolTable;
use ironlisp::Handle;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Shape {
    Atom(String),
    List(Vec<Shape>, Option<String>),
}

fn symbol_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9*+!?<>=-]{0,6}"
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = symbol_name().prop_map(Shape::Atom);
    leaf.prop_recursive(4, 32, 5, |inner| {
        (
            prop::collection::vec(inner, 0..5),
            prop::option::of(symbol_name()),
        )
            .prop_map(|(items, tail)| match tail {
                // A dotted tail needs at least one element before it.
                Some(t) if !items.is_empty() && t != "nil" => Shape::List(items, Some(t)),
                _ => Shape::List(items, None),
            })
    })
}

fn build(shape: &Shape, heap: &mut Heap, symbols: &mut SymbolTable) -> Handle {
    match shape {
        Shape::Atom(name) => Handle::Symbol(symbols.intern(name)),
        Shape::List(items, tail) => {
            let values: Vec<Handle> = items.iter().map(|s| build(s, heap, symbols)).collect();
            let tail = match tail {
                Some(name) => Handle::Symbol(symbols.intern(name)),
                None => Handle::NIL,
            };
            heap.list_with_tail(&values, tail).unwrap()
        }
    }
}

/// Structural equality across two separately allocated values.
fn same_shape(heap: &Heap, a: Handle, b: Handle) -> bool {
    match (a, b) {
        (Handle::Pair(x), Handle::Pair(y)) => {
            same_shape(heap, heap.car(x), heap.car(y)) && same_shape(heap, heap.cdr(x), heap.cdr(y))
        }
        (Handle::Symbol(x), Handle::Symbol(y)) => x == y,
        _ => false,
    }
}

proptest! {
    #[test]
    fn print_then_read_preserves_structure(s in shape()) {
        let mut heap = Heap::default();
        let mut symbols = SymbolTable::new();
        let original = build(&s, &mut heap, &mut symbols);
        let text = print_val(original, &heap, &symbols);
        let reread = read_str(&text, &mut heap, &mut symbols).unwrap();
        prop_assert!(same_shape(&heap, original, reread), "{}", text);
        prop_assert_eq!(print_val(reread, &heap, &symbols), text);
    }
}

#[test]
fn dotted_pairs_print_with_a_dot() {
    let mut heap = Heap::default();
    let mut symbols = SymbolTable::new();
    let val = read_str("(a b . c)", &mut heap, &mut symbols).unwrap();
    assert_eq!(print_val(val, &heap, &symbols), "(a b . c)");
    let val = read_str("(a . (b . nil))", &mut heap, &mut symbols).unwrap();
    assert_eq!(print_val(val, &heap, &symbols), "(a b)");
}
