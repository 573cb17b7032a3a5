use log::error;

use crate::error::{LispError, LispResult};
use crate::value::{ClosureId, Handle, LambdaId, PairId, SymbolId};

/// Default number of arena entries (cons cells plus records).
pub const DEFAULT_CAPACITY: usize = 65_536;

/// A single cons cell in the arena.
pub struct ConsCell {
    pub car: Handle,
    pub cdr: Handle,
}

/// A user function: parameter symbols and one body expression.
/// Multi-form bodies are wrapped in `(progn ...)` when the lambda is built.
#[derive(Debug, Clone)]
pub struct Lambda {
    pub params: Vec<SymbolId>,
    pub body: Handle,
}

/// A lambda together with the bindings it captured when it was created.
#[derive(Debug, Clone)]
pub struct Closure {
    pub lambda: LambdaId,
    pub captured: Vec<(SymbolId, Handle)>,
}

/// The node arena. Pairs, lambdas and closures are bump-allocated here and
/// share one capacity. Nothing is ever freed: every id handed out stays valid
/// for the life of the heap.
pub struct Heap {
    cells: Vec<ConsCell>,
    lambdas: Vec<Lambda>,
    closures: Vec<Closure>,
    capacity: usize,
}

impl Heap {
    pub fn new(capacity: usize) -> Self {
        Heap {
            cells: Vec::with_capacity(capacity.min(1024)),
            lambdas: Vec::new(),
            closures: Vec::new(),
            capacity,
        }
    }

    fn reserve_entry(&self) -> LispResult<()> {
        if self.used() >= self.capacity {
            error!("node arena exhausted ({} entries)", self.capacity);
            return Err(LispError::OutOfMemory {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    /// Allocate a new cons cell. Returns a PairId.
    /// Returns Err(OutOfMemory) if capacity is exceeded.
    pub fn alloc(&mut self, car: Handle, cdr: Handle) -> LispResult<PairId> {
        self.reserve_entry()?;
        let id = PairId(self.cells.len() as u32);
        self.cells.push(ConsCell { car, cdr });
        Ok(id)
    }

    /// Allocate a cons cell and return it as a handle.
    pub fn cons(&mut self, car: Handle, cdr: Handle) -> LispResult<Handle> {
        Ok(Handle::Pair(self.alloc(car, cdr)?))
    }

    pub fn alloc_lambda(&mut self, lambda: Lambda) -> LispResult<LambdaId> {
        self.reserve_entry()?;
        let id = LambdaId(self.lambdas.len() as u32);
        self.lambdas.push(lambda);
        Ok(id)
    }

    pub fn alloc_closure(&mut self, closure: Closure) -> LispResult<ClosureId> {
        self.reserve_entry()?;
        let id = ClosureId(self.closures.len() as u32);
        self.closures.push(closure);
        Ok(id)
    }

    /// Get the car of a pair.
    #[inline]
    pub fn car(&self, id: PairId) -> Handle {
        self.cells[id.0 as usize].car
    }

    /// Get the cdr of a pair.
    #[inline]
    pub fn cdr(&self, id: PairId) -> Handle {
        self.cells[id.0 as usize].cdr
    }

    pub fn lambda(&self, id: LambdaId) -> &Lambda {
        &self.lambdas[id.0 as usize]
    }

    pub fn closure(&self, id: ClosureId) -> &Closure {
        &self.closures[id.0 as usize]
    }

    /// Closures are filled in after allocation by `label`, which needs the
    /// closure's own id inside its captured environment.
    pub fn closure_mut(&mut self, id: ClosureId) -> &mut Closure {
        &mut self.closures[id.0 as usize]
    }

    /// Car of a handle if it's a pair, nil if it's nil.
    pub fn car_of(&self, val: Handle) -> LispResult<Handle> {
        match val {
            Handle::Pair(id) => Ok(self.car(id)),
            v if v.is_nil() => Ok(Handle::NIL),
            _ => Err(LispError::NotAPair("car of a non-nil atom".into())),
        }
    }

    /// Cdr of a handle if it's a pair, nil if it's nil.
    pub fn cdr_of(&self, val: Handle) -> LispResult<Handle> {
        match val {
            Handle::Pair(id) => Ok(self.cdr(id)),
            v if v.is_nil() => Ok(Handle::NIL),
            _ => Err(LispError::NotAPair("cdr of a non-nil atom".into())),
        }
    }

    /// Build a proper list from a slice of values.
    pub fn list(&mut self, values: &[Handle]) -> LispResult<Handle> {
        self.list_with_tail(values, Handle::NIL)
    }

    /// Build a list from a slice of values ending in `tail` instead of nil.
    pub fn list_with_tail(&mut self, values: &[Handle], tail: Handle) -> LispResult<Handle> {
        let mut result = tail;
        for &val in values.iter().rev() {
            result = self.cons(val, result)?;
        }
        Ok(result)
    }

    /// Returns true if this value is a proper list.
    pub fn is_proper_list(&self, val: Handle) -> bool {
        let mut current = val;
        loop {
            match current {
                Handle::Pair(id) => current = self.cdr(id),
                v => return v.is_nil(),
            }
        }
    }

    /// Collect a proper list into a Vec. Returns None if not a proper list.
    pub fn list_to_vec(&self, val: Handle) -> Option<Vec<Handle>> {
        let mut result = Vec::new();
        let mut current = val;
        loop {
            match current {
                Handle::Pair(id) => {
                    result.push(self.car(id));
                    current = self.cdr(id);
                }
                v if v.is_nil() => return Some(result),
                _ => return None,
            }
        }
    }

    /// Number of arena entries handed out so far, of every kind.
    pub fn used(&self) -> usize {
        self.cells.len() + self.lambdas.len() + self.closures.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
