//! A small Lisp interpreter built on shallow binding.
//!
//! Every value is a [`Handle`] into an append-only node arena or into the
//! symbol table. Each symbol carries its own stack of bindings, and the
//! execution stack records which symbols each frame bound so the bindings
//! can be undone when the frame is popped.

pub mod error;
pub mod eval;
pub mod globals;
pub mod heap;
pub mod primitives;
pub mod printer;
pub mod reader;
pub mod repl;
pub mod stack;
pub mod stream;
pub mod symbol;
pub mod value;

pub use error::{LispError, LispResult};
pub use eval::{Machine, MachineConfig};
pub use repl::ReplOptions;
pub use value::Handle;
