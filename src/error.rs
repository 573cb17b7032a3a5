use thiserror::Error;

/// Errors raised while reading or evaluating Lisp code.
///
/// Every variant is recoverable at the REPL boundary. Frame-stack invariant
/// violations panic instead of producing one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LispError {
    /// The node arena has no room left for another cons cell or record.
    #[error("out of memory: node arena capacity of {capacity} entries exhausted")]
    OutOfMemory { capacity: usize },

    /// A symbol with an empty binding stack was evaluated.
    #[error("unbound symbol '{0}'")]
    UnboundSymbol(String),

    /// The head of a call did not evaluate to a function.
    #[error("expected function, got {0}")]
    NotCallable(String),

    /// A function was called with the wrong number of arguments.
    #[error("{name}: expected {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },

    /// car/cdr of something that is not a pair.
    #[error("not a pair: {0}")]
    NotAPair(String),

    /// A special form or call was structurally wrong.
    #[error("malformed {0}")]
    Malformed(String),

    /// A token that cannot start an expression.
    #[error("unexpected '{0}'")]
    UnexpectedToken(String),

    /// Bad dotted-list syntax and similar.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// The stream ended in the middle of an expression.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// Evaluation nested deeper than the configured limit.
    #[error("recursion limit of {0} exceeded")]
    RecursionLimit(usize),

    /// I/O error from the input or output stream.
    #[error("I/O error: {0}")]
    Io(String),

    /// Internal interpreter error (should not happen in correct code).
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for LispError {
    fn from(e: std::io::Error) -> Self {
        LispError::Io(e.to_string())
    }
}

pub type LispResult<T> = Result<T, LispError>;

impl LispError {
    /// Errors produced while tokenizing or parsing, after which the rest of
    /// the current input line is unreliable.
    pub fn is_read_error(&self) -> bool {
        matches!(
            self,
            LispError::UnexpectedToken(_) | LispError::Syntax(_) | LispError::UnexpectedEndOfInput
        )
    }
}
