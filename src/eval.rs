use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};

use crate::error::{LispError, LispResult};
use crate::globals::{self, Builtins, NativeFn};
use crate::heap::{Closure, Heap, Lambda, DEFAULT_CAPACITY};
use crate::printer;
use crate::reader::Reader;
use crate::stack::ExecStack;
use crate::symbol::{sym, SymbolTable};
use crate::value::{Handle, LambdaId, SymbolId};

/// Default bound on nested `evaluate` calls. Sized so a full-depth recursion
/// fits a 2 MiB thread stack in an unoptimized build.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Construction parameters for a [`Machine`].
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Arena entries available for cons cells, lambdas and closures.
    pub heap_capacity: usize,
    /// Deepest allowed nesting of `evaluate`; deeper gives `RecursionLimit`.
    pub max_depth: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            heap_capacity: DEFAULT_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// The evaluation machine.
/// All interpreter state lives here; one thread owns it at a time.
pub struct Machine {
    pub heap: Heap,
    pub symbols: SymbolTable,
    pub stack: ExecStack,
    pub builtins: Builtins,

    max_depth: usize,
    depth: usize,
}

impl Machine {
    pub fn new(config: MachineConfig) -> Self {
        let mut m = Machine {
            heap: Heap::new(config.heap_capacity),
            symbols: SymbolTable::new(),
            stack: ExecStack::new(),
            builtins: Builtins::default(),
            max_depth: config.max_depth,
            depth: 0,
        };

        // Frame 0 is the global frame; it lives as long as the machine.
        m.stack.push_frame();
        globals::install(&mut m);
        m
    }

    pub fn intern(&mut self, name: &str) -> SymbolId {
        self.symbols.intern(name)
    }

    /// Bind a symbol in the global frame.
    pub fn define_global(&mut self, name: SymbolId, val: Handle) {
        debug!("def {}", self.symbols.name(name));
        self.stack.define_global(&mut self.symbols, name, val);
    }

    /// Register a native function under a global name and return its handle.
    pub fn define_native(&mut self, name: &str, func: NativeFn) -> Handle {
        let name = self.symbols.intern(name);
        let id = self.builtins.add_native(name, func);
        self.define_global(name, Handle::Native(id));
        Handle::Native(id)
    }

    /// Bind in the innermost frame.
    pub fn bind(&mut self, name: SymbolId, val: Handle) {
        self.stack.bind(&mut self.symbols, name, val);
    }

    /// Run `f` inside a fresh frame. The frame is popped on every exit path,
    /// so bindings made inside never outlive `f`, even when it fails.
    pub fn with_frame<T>(&mut self, f: impl FnOnce(&mut Machine) -> LispResult<T>) -> LispResult<T> {
        self.stack.push_frame();
        let result = f(self);
        self.stack.pop_frame(&mut self.symbols);
        result
    }

    /// Render a value, naming natives and special forms.
    pub fn print(&self, val: Handle) -> String {
        printer::print_with_builtins(val, &self.heap, &self.symbols, &self.builtins)
    }

    /// Current value of a symbol, if bound.
    pub fn lookup(&self, name: &str) -> Option<Handle> {
        let id = self.symbols.lookup(name)?;
        self.symbols.binding(id)
    }

    /// Destructure a native's argument list into exactly N values.
    pub fn expect_args<const N: usize>(&self, name: &str, args: Handle) -> LispResult<[Handle; N]> {
        let values = self
            .heap
            .list_to_vec(args)
            .ok_or_else(|| LispError::Malformed(format!("{}: argument list", name)))?;
        let got = values.len();
        values.try_into().map_err(|_| LispError::Arity {
            name: name.to_string(),
            expected: N,
            got,
        })
    }

    // ========================================================================
    // Core evaluation
    // ========================================================================

    /// Evaluate an expression against the current bindings.
    pub fn evaluate(&mut self, expr: Handle) -> LispResult<Handle> {
        if self.depth >= self.max_depth {
            return Err(LispError::RecursionLimit(self.max_depth));
        }
        self.depth += 1;
        let result = self.eval_inner(expr);
        self.depth -= 1;
        result
    }

    fn eval_inner(&mut self, expr: Handle) -> LispResult<Handle> {
        match expr {
            Handle::Symbol(id) => match self.symbols.binding(id) {
                Some(val) => Ok(val),
                None if self.symbols.is_numeral(id) => Ok(expr),
                None => Err(LispError::UnboundSymbol(self.symbols.name(id).to_string())),
            },
            Handle::Pair(id) => {
                let head = self.evaluate(self.heap.car(id))?;
                let args = self.heap.cdr(id);
                trace!("eval {}", self.print(expr));

                match head {
                    Handle::Special(sid) => {
                        let func = self.builtins.special(sid).func;
                        func(self, args)
                    }
                    Handle::Native(_) | Handle::Lambda(_) | Handle::Closure(_) => {
                        let evaluated = self.evaluate_args(args)?;
                        self.apply(head, evaluated)
                    }
                    other => Err(LispError::NotCallable(self.print(other))),
                }
            }
            Handle::Native(_) | Handle::Special(_) | Handle::Lambda(_) | Handle::Closure(_) => {
                Ok(expr)
            }
            Handle::Null => Err(LispError::Internal("null handle evaluated".into())),
        }
    }

    /// Evaluate each argument left to right into a fresh list.
    fn evaluate_args(&mut self, args: Handle) -> LispResult<Handle> {
        let exprs = self
            .heap
            .list_to_vec(args)
            .ok_or_else(|| LispError::Malformed(format!("call with dotted argument list {}", self.print(args))))?;
        let mut values = Vec::with_capacity(exprs.len());
        for e in exprs {
            values.push(self.evaluate(e)?);
        }
        self.heap.list(&values)
    }

    /// Apply a function to an already-evaluated, proper argument list.
    pub fn apply(&mut self, f: Handle, args: Handle) -> LispResult<Handle> {
        trace!("apply {} to {}", self.print(f), self.print(args));
        match f {
            Handle::Native(nid) => {
                let func = self.builtins.native(nid).func;
                func(self, args)
            }
            Handle::Lambda(lid) => self.apply_lambda(f, lid, &[], args),
            Handle::Closure(cid) => {
                let Closure { lambda, captured } = self.heap.closure(cid).clone();
                self.apply_lambda(f, lambda, &captured, args)
            }
            Handle::Special(_) => Err(LispError::NotCallable(format!(
                "{} (special forms cannot be applied)",
                self.print(f)
            ))),
            other => Err(LispError::NotCallable(self.print(other))),
        }
    }

    /// Bind captured values, then parameters, in one frame and evaluate the body.
    fn apply_lambda(
        &mut self,
        f: Handle,
        lid: LambdaId,
        captured: &[(SymbolId, Handle)],
        args: Handle,
    ) -> LispResult<Handle> {
        let Lambda { params, body } = self.heap.lambda(lid).clone();
        let values = self
            .heap
            .list_to_vec(args)
            .ok_or_else(|| LispError::Malformed(format!("argument list {}", self.print(args))))?;

        if values.len() != params.len() {
            return Err(LispError::Arity {
                name: self.print(f),
                expected: params.len(),
                got: values.len(),
            });
        }

        self.with_frame(|m| {
            for &(name, val) in captured {
                m.bind(name, val);
            }
            for (&name, &val) in params.iter().zip(values.iter()) {
                m.bind(name, val);
            }
            m.evaluate(body)
        })
    }

    // ========================================================================
    // Special forms
    // ========================================================================

    /// Split a special form's argument list, which must be proper.
    fn form_args(&self, form: &str, args: Handle) -> LispResult<Vec<Handle>> {
        self.heap
            .list_to_vec(args)
            .ok_or_else(|| LispError::Malformed(format!("{}: dotted argument list", form)))
    }

    /// The symbol a form may bind. `nil` and `t` are constants and never
    /// rebindable, since truth tests depend on them evaluating to themselves.
    fn binding_target(&self, form: &str, target: Handle) -> LispResult<SymbolId> {
        match target {
            Handle::Symbol(id) if id == sym::NIL || id == sym::T => Err(LispError::Malformed(format!(
                "{}: cannot rebind constant {}",
                form,
                self.symbols.name(id)
            ))),
            Handle::Symbol(id) => Ok(id),
            other => Err(LispError::Malformed(format!("{}: {} is not a symbol", form, self.print(other)))),
        }
    }

    /// (quote x) -> x, unevaluated
    pub(crate) fn form_quote(&mut self, args: Handle) -> LispResult<Handle> {
        match self.form_args("quote", args)?.as_slice() {
            [x] => Ok(*x),
            other => Err(LispError::Arity {
                name: "quote".into(),
                expected: 1,
                got: other.len(),
            }),
        }
    }

    /// (def name expr) -> binds name globally to the value of expr
    pub(crate) fn form_def(&mut self, args: Handle) -> LispResult<Handle> {
        let (name, expr) = match self.form_args("def", args)?.as_slice() {
            [name, expr] => (*name, *expr),
            other => {
                return Err(LispError::Arity {
                    name: "def".into(),
                    expected: 2,
                    got: other.len(),
                })
            }
        };
        let name = self.binding_target("def", name)?;
        let val = self.evaluate(expr)?;
        self.define_global(name, val);
        Ok(val)
    }

    /// (progn e1 e2 ...) -> value of the last expression, nil if none
    pub(crate) fn form_progn(&mut self, args: Handle) -> LispResult<Handle> {
        let mut result = Handle::NIL;
        for e in self.form_args("progn", args)? {
            result = self.evaluate(e)?;
        }
        Ok(result)
    }

    /// (cond (test body...) ...) -> body of the first clause whose test is non-nil
    pub(crate) fn form_cond(&mut self, args: Handle) -> LispResult<Handle> {
        let mut current = args;
        while let Handle::Pair(id) = current {
            let clause = self.heap.car(id);
            let clause_id = clause
                .as_pair()
                .ok_or_else(|| LispError::Malformed(format!("cond clause {}", self.print(clause))))?;
            let test = self.evaluate(self.heap.car(clause_id))?;
            if !test.is_nil() {
                let body = self.heap.cdr(clause_id);
                if body.is_nil() {
                    return Ok(test);
                }
                return self.form_progn(body);
            }
            current = self.heap.cdr(id);
        }
        // No clause matched: the list's terminating atom, normally nil.
        Ok(current)
    }

    /// (lambda (params...) body...) -> a Lambda; no environment is captured
    pub(crate) fn form_lambda(&mut self, args: Handle) -> LispResult<Handle> {
        let lid = self.make_lambda("lambda", args)?;
        Ok(Handle::Lambda(lid))
    }

    /// (closure (params...) body...) -> a Closure over every local binding
    /// visible at this point
    pub(crate) fn form_closure(&mut self, args: Handle) -> LispResult<Handle> {
        let lambda = self.make_lambda("closure", args)?;
        let captured = self
            .stack
            .local_symbols()
            .into_iter()
            .filter_map(|s| self.symbols.binding(s).map(|v| (s, v)))
            .collect();
        let cid = self.heap.alloc_closure(Closure { lambda, captured })?;
        Ok(Handle::Closure(cid))
    }

    /// (label name fn) -> fn as a Closure that sees `name` bound to itself
    pub(crate) fn form_label(&mut self, args: Handle) -> LispResult<Handle> {
        let (name, expr) = match self.form_args("label", args)?.as_slice() {
            [name, expr] => (*name, *expr),
            other => {
                return Err(LispError::Arity {
                    name: "label".into(),
                    expected: 2,
                    got: other.len(),
                })
            }
        };
        let name = self.binding_target("label", name)?;

        let (lambda, mut captured) = match self.evaluate(expr)? {
            Handle::Lambda(lid) => (lid, Vec::new()),
            Handle::Closure(cid) => {
                let c = self.heap.closure(cid);
                (c.lambda, c.captured.clone())
            }
            other => {
                return Err(LispError::Malformed(format!(
                    "label: {} is not a lambda",
                    self.print(other)
                )))
            }
        };

        let cid = self.heap.alloc_closure(Closure {
            lambda,
            captured: Vec::new(),
        })?;
        captured.push((name, Handle::Closure(cid)));
        self.heap.closure_mut(cid).captured = captured;
        Ok(Handle::Closure(cid))
    }

    /// (let ((name expr)...) body...) -> body evaluated with the names bound
    /// in one new frame. Every expr is evaluated before any name is bound.
    pub(crate) fn form_let(&mut self, args: Handle) -> LispResult<Handle> {
        let (bindings, body) = match args {
            Handle::Pair(id) => (self.heap.car(id), self.heap.cdr(id)),
            _ => return Err(LispError::Malformed("let: missing binding list".into())),
        };
        let specs = self.form_args("let", bindings)?;

        let mut pairs = Vec::with_capacity(specs.len());
        for spec in specs {
            match spec {
                Handle::Symbol(_) => pairs.push((self.binding_target("let", spec)?, Handle::NIL)),
                Handle::Pair(_) => {
                    let parts = self.form_args("let", spec)?;
                    let (name, expr) = match parts.as_slice() {
                        [name @ Handle::Symbol(_), expr] => (self.binding_target("let", *name)?, *expr),
                        _ => {
                            return Err(LispError::Malformed(format!(
                                "let binding {}",
                                self.print(spec)
                            )))
                        }
                    };
                    let val = self.evaluate(expr)?;
                    pairs.push((name, val));
                }
                other => {
                    return Err(LispError::Malformed(format!(
                        "let binding {}",
                        self.print(other)
                    )))
                }
            }
        }

        self.with_frame(|m| {
            for (name, val) in pairs {
                m.bind(name, val);
            }
            m.form_progn(body)
        })
    }

    /// Build a Lambda record from `((params...) body...)`.
    fn make_lambda(&mut self, form: &str, args: Handle) -> LispResult<LambdaId> {
        let (param_list, body_list) = match args {
            Handle::Pair(id) => (self.heap.car(id), self.heap.cdr(id)),
            _ => return Err(LispError::Malformed(format!("{}: missing parameter list", form))),
        };

        let params = self
            .form_args(form, param_list)?
            .into_iter()
            .map(|p| self.binding_target(form, p))
            .collect::<LispResult<Vec<_>>>()?;

        let body = match self.form_args(form, body_list)?.as_slice() {
            [] => Handle::NIL,
            [single] => *single,
            _ => self.heap.cons(Handle::Symbol(sym::PROGN), body_list)?,
        };

        self.heap.alloc_lambda(Lambda { params, body })
    }

    // ========================================================================
    // Host entry points
    // ========================================================================

    /// Read a single expression from a string.
    pub fn read_str(&mut self, input: &str) -> LispResult<Handle> {
        crate::reader::read_str(input, &mut self.heap, &mut self.symbols)
    }

    /// Read and evaluate every expression in a string, in order.
    /// Returns the last value, or nil for empty input.
    pub fn eval_str(&mut self, input: &str) -> LispResult<Handle> {
        let mut reader = Reader::new(input.as_bytes());
        let mut last = Handle::NIL;
        while let Some(expr) = reader.read(&mut self.heap, &mut self.symbols)? {
            last = self.evaluate(expr)?;
        }
        Ok(last)
    }

    /// Evaluate every top-level expression of a stream, discarding the values.
    /// Stops at the first read or evaluation error. Returns how many
    /// expressions were evaluated.
    pub fn load<R: BufRead>(&mut self, input: R) -> LispResult<usize> {
        let mut reader = Reader::new(input);
        let mut count = 0;
        while let Some(expr) = reader.read(&mut self.heap, &mut self.symbols)? {
            self.evaluate(expr)?;
            count += 1;
        }
        Ok(count)
    }

    /// Load a source file, as `load`.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> LispResult<usize> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| LispError::Io(format!("cannot open '{}': {}", path.display(), e)))?;
        let count = self.load(BufReader::new(file))?;
        debug!("loaded {} expressions from {}", count, path.display());
        Ok(count)
    }
}

impl Default for Machine {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(m: &mut Machine, src: &str) -> String {
        let val = m.eval_str(src).unwrap();
        m.print(val)
    }

    #[test]
    fn nil_and_t_are_self_bound() {
        let mut m = Machine::default();
        assert_eq!(eval(&mut m, "nil"), "nil");
        assert_eq!(eval(&mut m, "t"), "t");
        assert_eq!(m.symbols.binding(sym::NIL), Some(Handle::NIL));
    }

    #[test]
    fn numerals_evaluate_to_themselves() {
        let mut m = Machine::default();
        assert_eq!(eval(&mut m, "42"), "42");
        assert_eq!(eval(&mut m, "-3"), "-3");
    }

    #[test]
    fn quote_returns_structure_unevaluated() {
        let mut m = Machine::default();
        assert_eq!(eval(&mut m, "(quote (a b c))"), "(a b c)");
        assert_eq!(eval(&mut m, "'undefined-symbol"), "undefined-symbol");
        assert!(matches!(
            m.eval_str("(quote a b)"),
            Err(LispError::Arity { expected: 1, got: 2, .. })
        ));
    }

    #[test]
    fn cond_takes_first_true_clause() {
        let mut m = Machine::default();
        assert_eq!(eval(&mut m, "(cond (nil 1) (t 2) (t 3))"), "2");
        assert_eq!(eval(&mut m, "(cond (nil 1))"), "nil");
        assert_eq!(eval(&mut m, "(cond ('x))"), "x");
        assert_eq!(eval(&mut m, "(cond (nil 1) . end)"), "end");
        assert_eq!(eval(&mut m, "(cond (t 'a 'b))"), "b");
    }

    #[test]
    fn cond_does_not_evaluate_later_clauses() {
        let mut m = Machine::default();
        assert_eq!(eval(&mut m, "(cond (t 1) ((undefined) 2))"), "1");
    }

    #[test]
    fn progn_returns_last() {
        let mut m = Machine::default();
        assert_eq!(eval(&mut m, "(progn 'a 'b 'c)"), "c");
        assert_eq!(eval(&mut m, "(progn)"), "nil");
    }

    #[test]
    fn def_binds_globally_and_returns_value() {
        let mut m = Machine::default();
        assert_eq!(eval(&mut m, "(def a 'x)"), "x");
        assert_eq!(eval(&mut m, "a"), "x");
        assert_eq!(eval(&mut m, "(def a 'y)"), "y");
        assert_eq!(eval(&mut m, "a"), "y");
    }

    #[test]
    fn def_inside_a_call_is_global() {
        let mut m = Machine::default();
        eval(&mut m, "(def f (lambda (x) (def g x)))");
        eval(&mut m, "(f 'inner)");
        assert_eq!(eval(&mut m, "g"), "inner");
        assert_eq!(m.lookup("x"), None);
    }

    #[test]
    fn unbound_symbol_is_an_error() {
        let mut m = Machine::default();
        assert_eq!(
            m.eval_str("nope"),
            Err(LispError::UnboundSymbol("nope".into()))
        );
    }

    #[test]
    fn lambda_binds_only_for_its_body() {
        let mut m = Machine::default();
        eval(&mut m, "(def pair (lambda (x y) (cons x y)))");
        assert_eq!(eval(&mut m, "(pair 'a 'b)"), "(a . b)");
        assert_eq!(m.lookup("x"), None);
        assert_eq!(m.lookup("y"), None);
        assert_eq!(m.stack.depth(), 1);
    }

    #[test]
    fn lambda_with_several_body_forms() {
        let mut m = Machine::default();
        eval(&mut m, "(def f (lambda (x) (def seen x) (cons x x)))");
        assert_eq!(eval(&mut m, "(f 'q)"), "(q . q)");
        assert_eq!(eval(&mut m, "seen"), "q");
    }

    #[test]
    fn lambdas_are_dynamically_scoped() {
        let mut m = Machine::default();
        eval(&mut m, "(def get-x (lambda () x))");
        eval(&mut m, "(def call-with-x (lambda (x) (get-x)))");
        assert_eq!(eval(&mut m, "(call-with-x 'dyn)"), "dyn");
    }

    #[test]
    fn arity_mismatch() {
        let mut m = Machine::default();
        eval(&mut m, "(def id (lambda (x) x))");
        assert!(matches!(
            m.eval_str("(id 'a 'b)"),
            Err(LispError::Arity { expected: 1, got: 2, .. })
        ));
        assert!(matches!(
            m.eval_str("(id)"),
            Err(LispError::Arity { expected: 1, got: 0, .. })
        ));
        assert_eq!(m.stack.depth(), 1);
    }

    #[test]
    fn frames_unwind_when_the_body_fails() {
        let mut m = Machine::default();
        eval(&mut m, "(def bad (lambda (x) (car 'x-is-not-a-pair)))");
        assert!(matches!(m.eval_str("(bad 'v)"), Err(LispError::NotAPair(_))));
        assert_eq!(m.lookup("x"), None);
        assert_eq!(m.stack.depth(), 1);
    }

    #[test]
    fn non_callable_head() {
        let mut m = Machine::default();
        assert!(matches!(m.eval_str("('a 'b)"), Err(LispError::NotCallable(_))));
        assert!(matches!(m.eval_str("(t)"), Err(LispError::NotCallable(_))));
    }

    #[test]
    fn dotted_call_is_malformed() {
        let mut m = Machine::default();
        assert!(matches!(m.eval_str("(cons 'a . b)"), Err(LispError::Malformed(_))));
    }

    #[test]
    fn null_handle_cannot_be_evaluated() {
        let mut m = Machine::default();
        assert!(matches!(m.evaluate(Handle::Null), Err(LispError::Internal(_))));
    }

    #[test]
    fn let_binds_in_parallel_and_unwinds() {
        let mut m = Machine::default();
        eval(&mut m, "(def x 'outer)");
        assert_eq!(eval(&mut m, "(let ((x 'inner) (y x)) (cons x y))"), "(inner . outer)");
        assert_eq!(eval(&mut m, "x"), "outer");
        assert_eq!(m.lookup("y"), None);
        assert_eq!(eval(&mut m, "(let (z) z)"), "nil");
    }

    #[test]
    fn closure_captures_local_bindings() {
        let mut m = Machine::default();
        eval(&mut m, "(def make-k (lambda (v) (closure () v)))");
        eval(&mut m, "(def k (make-k 'kept))");
        assert_eq!(m.lookup("v"), None);
        assert_eq!(eval(&mut m, "(k)"), "kept");
    }

    #[test]
    fn label_allows_self_reference() {
        let mut m = Machine::default();
        eval(
            &mut m,
            "(def last (label last (lambda (l) (cond ((null (cdr l)) (car l)) (t (last (cdr l)))))))",
        );
        eval(&mut m, "(def f (label self (lambda (l) (cond ((null l) 'done) (t (self (cdr l)))))))");
        assert_eq!(eval(&mut m, "(f '(a b c))"), "done");
        assert_eq!(m.lookup("self"), None);
    }

    #[test]
    fn nil_and_t_cannot_be_rebound() {
        let mut m = Machine::default();
        for src in [
            "(def nil 'x)",
            "(def t nil)",
            "(let ((nil 'x)) nil)",
            "(let (t) t)",
            "(lambda (a nil) a)",
            "(closure (t) t)",
            "(label nil (lambda () nil))",
        ] {
            assert!(
                matches!(m.eval_str(src), Err(LispError::Malformed(_))),
                "{}",
                src
            );
        }
        assert_eq!(eval(&mut m, "nil"), "nil");
        assert_eq!(eval(&mut m, "t"), "t");
        assert_eq!(eval(&mut m, "(cond (nil 'taken))"), "nil");
        assert_eq!(m.stack.depth(), 1);
    }

    #[test]
    fn default_depth_limit_fits_a_spawned_thread() {
        let result = std::thread::spawn(|| {
            let mut m = Machine::default();
            m.eval_str("(def loop (lambda () (loop)))").unwrap();
            m.eval_str("(loop)")
        })
        .join()
        .unwrap();
        assert_eq!(result, Err(LispError::RecursionLimit(DEFAULT_MAX_DEPTH)));
    }

    #[test]
    fn recursion_limit_is_an_error() {
        let mut m = Machine::new(MachineConfig {
            max_depth: 64,
            ..MachineConfig::default()
        });
        eval(&mut m, "(def loop (lambda () (loop)))");
        assert_eq!(m.eval_str("(loop)"), Err(LispError::RecursionLimit(64)));
        assert_eq!(m.stack.depth(), 1);
        assert_eq!(eval(&mut m, "'still-alive"), "still-alive");
    }

    #[test]
    fn special_forms_cannot_be_applied() {
        let mut m = Machine::default();
        assert!(matches!(
            m.eval_str("(apply quote '(a))"),
            Err(LispError::NotCallable(_))
        ));
    }

    #[test]
    fn builtins_print_by_name() {
        let mut m = Machine::default();
        assert_eq!(eval(&mut m, "car"), "#<native car>");
        assert_eq!(eval(&mut m, "cond"), "#<special cond>");
        assert_eq!(eval(&mut m, "(lambda (a b) a)"), "#<lambda (a b)>");
    }
}
