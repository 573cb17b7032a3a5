use std::fmt;
use std::io::BufRead;

use crate::error::{LispError, LispResult};
use crate::heap::Heap;
use crate::stream::CharStream;
use crate::symbol::{sym, SymbolTable};
use crate::value::Handle;

/// One lexical token of the surface syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open,
    Close,
    Dot,
    Quote,
    Symbol(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            Token::Dot => write!(f, "."),
            Token::Quote => write!(f, "'"),
            Token::Symbol(name) => write!(f, "{}", name),
        }
    }
}

/// Deepest list or quote nesting accepted in one expression.
pub const MAX_NESTING: usize = 256;

fn is_whitespace(ch: char) -> bool {
    ch == ' ' || ch == '\t' || ch == '\n' || ch == '\r'
}

/// Characters that are a token on their own, whatever surrounds them.
fn is_special(ch: char) -> bool {
    ch == '(' || ch == ')' || ch == '.' || ch == '\''
}

fn is_delimiter(ch: char) -> bool {
    is_whitespace(ch) || is_special(ch) || ch == ';'
}

/// Reads S-expressions from a character stream into arena handles.
///
/// The reader keeps its own position between calls, so one instance can
/// serve a whole REPL session; the heap and symbol table are lent per call.
pub struct Reader<R> {
    stream: CharStream<R>,
    peeked: Option<Token>,
}

impl<R: BufRead> Reader<R> {
    pub fn new(input: R) -> Self {
        Reader {
            stream: CharStream::new(input),
            peeked: None,
        }
    }

    /// Produce the next token, or None at end of input.
    pub fn read_token(&mut self) -> LispResult<Option<Token>> {
        if let Some(tok) = self.peeked.take() {
            return Ok(Some(tok));
        }
        self.lex_token()
    }

    /// Look at the next token without consuming it.
    pub fn peek_token(&mut self) -> LispResult<Option<&Token>> {
        if self.peeked.is_none() {
            self.peeked = self.lex_token()?;
        }
        Ok(self.peeked.as_ref())
    }

    /// Forget the rest of the current input line, including any peeked token.
    /// Used to resynchronise after a syntax error.
    pub fn discard_line(&mut self) {
        self.peeked = None;
        self.stream.discard_line();
    }

    /// Current input line, for diagnostics.
    pub fn line_no(&self) -> usize {
        self.stream.line_no()
    }

    fn skip_whitespace_and_comments(&mut self) -> LispResult<()> {
        while let Some(ch) = self.stream.peek()? {
            if is_whitespace(ch) {
                self.stream.advance()?;
            } else if ch == ';' {
                while let Some(c) = self.stream.advance()? {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn lex_token(&mut self) -> LispResult<Option<Token>> {
        self.skip_whitespace_and_comments()?;

        let ch = match self.stream.advance()? {
            Some(ch) => ch,
            None => return Ok(None),
        };

        let tok = match ch {
            '(' => Token::Open,
            ')' => Token::Close,
            '.' => Token::Dot,
            '\'' => Token::Quote,
            first => {
                let mut name = String::new();
                name.push(first);
                while let Some(c) = self.stream.peek()? {
                    if is_delimiter(c) {
                        break;
                    }
                    name.push(c);
                    self.stream.advance()?;
                }
                Token::Symbol(name)
            }
        };
        Ok(Some(tok))
    }

    /// Read one expression. Returns None at end of input.
    pub fn read(&mut self, heap: &mut Heap, symbols: &mut SymbolTable) -> LispResult<Option<Handle>> {
        match self.read_token()? {
            Some(tok) => self.read_expr(tok, 0, heap, symbols).map(Some),
            None => Ok(None),
        }
    }

    fn next_required(&mut self) -> LispResult<Token> {
        self.read_token()?.ok_or(LispError::UnexpectedEndOfInput)
    }

    /// `depth` counts the lists and quotes already open around `tok`.
    fn read_expr(
        &mut self,
        tok: Token,
        depth: usize,
        heap: &mut Heap,
        symbols: &mut SymbolTable,
    ) -> LispResult<Handle> {
        match tok {
            Token::Open | Token::Quote if depth >= MAX_NESTING => Err(LispError::Syntax(format!(
                "expression nested deeper than {} levels",
                MAX_NESTING
            ))),
            Token::Open => self.read_list(depth + 1, heap, symbols),
            Token::Quote => self.read_quote(depth + 1, heap, symbols),
            Token::Symbol(name) => Ok(Handle::Symbol(symbols.intern(&name))),
            Token::Close | Token::Dot => Err(LispError::UnexpectedToken(tok.to_string())),
        }
    }

    /// Read the rest of a list after its '(': (a b c), (a . b) or (a b . c)
    fn read_list(&mut self, depth: usize, heap: &mut Heap, symbols: &mut SymbolTable) -> LispResult<Handle> {
        let mut elements = Vec::new();
        let mut tail = Handle::NIL;

        loop {
            match self.next_required()? {
                Token::Close => break,
                Token::Dot => {
                    if elements.is_empty() {
                        return Err(LispError::Syntax("'.' with nothing before it".into()));
                    }
                    let tok = self.next_required()?;
                    if tok == Token::Close {
                        return Err(LispError::Syntax("'.' with nothing after it".into()));
                    }
                    tail = self.read_expr(tok, depth, heap, symbols)?;
                    if self.next_required()? != Token::Close {
                        return Err(LispError::Syntax("expected ')' after dotted tail".into()));
                    }
                    break;
                }
                tok => elements.push(self.read_expr(tok, depth, heap, symbols)?),
            }
        }

        heap.list_with_tail(&elements, tail)
    }

    /// Read quote: 'expr -> (quote expr)
    fn read_quote(&mut self, depth: usize, heap: &mut Heap, symbols: &mut SymbolTable) -> LispResult<Handle> {
        let tok = self.next_required()?;
        let expr = self.read_expr(tok, depth, heap, symbols)?;
        heap.list(&[Handle::Symbol(sym::QUOTE), expr])
    }
}

/// Read a single expression from a string.
pub fn read_str(input: &str, heap: &mut Heap, symbols: &mut SymbolTable) -> LispResult<Handle> {
    let mut reader = Reader::new(input.as_bytes());
    reader.read(heap, symbols)?.ok_or(LispError::UnexpectedEndOfInput)
}
