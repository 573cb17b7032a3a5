use crate::error::{LispError, LispResult};
use crate::eval::Machine;
use crate::globals::NativeFn;
use crate::value::Handle;

/// The native functions installed in every machine, by global name.
///
/// Arguments arrive already evaluated, as a fresh proper list.
pub const NATIVES: &[(&str, NativeFn)] = &[
    ("car", prim_car),
    ("cdr", prim_cdr),
    ("cons", prim_cons),
    ("atom", prim_atom),
    ("eq", prim_eq),
    ("null", prim_null),
    ("list", prim_list),
    ("apply", prim_apply),
    ("eval", prim_eval),
];

/// (car x) -- car of pair, nil of nil.
fn prim_car(m: &mut Machine, args: Handle) -> LispResult<Handle> {
    let [x] = m.expect_args("car", args)?;
    m.heap
        .car_of(x)
        .map_err(|_| LispError::NotAPair(format!("car of {}", m.print(x))))
}

/// (cdr x) -- cdr of pair, nil of nil.
fn prim_cdr(m: &mut Machine, args: Handle) -> LispResult<Handle> {
    let [x] = m.expect_args("cdr", args)?;
    m.heap
        .cdr_of(x)
        .map_err(|_| LispError::NotAPair(format!("cdr of {}", m.print(x))))
}

/// (cons a b) -- a new cell.
fn prim_cons(m: &mut Machine, args: Handle) -> LispResult<Handle> {
    let [a, b] = m.expect_args("cons", args)?;
    m.heap.cons(a, b)
}

/// (atom x) -- t unless x is a pair.
fn prim_atom(m: &mut Machine, args: Handle) -> LispResult<Handle> {
    let [x] = m.expect_args("atom", args)?;
    Ok(Handle::from_bool(x.is_atom()))
}

/// (eq a b) -- identity: same symbol, same cell, same function.
fn prim_eq(m: &mut Machine, args: Handle) -> LispResult<Handle> {
    let [a, b] = m.expect_args("eq", args)?;
    Ok(Handle::from_bool(a == b))
}

/// (null x) -- t if x is nil.
fn prim_null(m: &mut Machine, args: Handle) -> LispResult<Handle> {
    let [x] = m.expect_args("null", args)?;
    Ok(Handle::from_bool(x.is_nil()))
}

/// (list a b ...) -- the argument list is already a fresh list.
fn prim_list(_m: &mut Machine, args: Handle) -> LispResult<Handle> {
    Ok(args)
}

/// (apply f args) -- call f with the elements of args, unevaluated.
fn prim_apply(m: &mut Machine, args: Handle) -> LispResult<Handle> {
    let [f, arg_list] = m.expect_args("apply", args)?;
    if !m.heap.is_proper_list(arg_list) {
        return Err(LispError::Malformed(format!(
            "apply: argument list {}",
            m.print(arg_list)
        )));
    }
    m.apply(f, arg_list)
}

/// (eval x) -- evaluate x in the current bindings.
fn prim_eval(m: &mut Machine, args: Handle) -> LispResult<Handle> {
    let [x] = m.expect_args("eval", args)?;
    m.evaluate(x)
}
