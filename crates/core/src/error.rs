//! Evaluation errors
//!
//! The language has no exception-handling construct: any error aborts the
//! whole top-level evaluation. An [`EvalError`] carries the failing word and
//! the chain of user words and combinators that were active when it happened
//! (innermost first), so the host can print a useful diagnostic.

use std::fmt;

/// What went wrong
#[derive(Debug)]
pub enum ErrorKind {
    /// An operation needs more operands than the stack holds
    StackUnderflow { needed: usize, available: usize },
    /// A word has no dictionary binding
    UnknownWord(String),
    /// An operand had the wrong variant
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    DivisionByZero,
    /// `fold1` (or a word built on it) received an empty sequence
    EmptySequence,
    /// A combinator body left the stack in the wrong shape
    ArityError { expected: usize, found: usize },
    /// Unbalanced delimiters, malformed literals, unreadable input
    ParseError(String),
    /// `stdin` ran out of input
    UnexpectedEndOfInput,
    /// Quotation nesting went deeper than the configured limit
    RecursionLimit(usize),
    /// Reading input or writing output failed
    Io(std::io::Error),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::StackUnderflow { needed, available } => write!(
                f,
                "stack underflow: needed {} value(s), found {}",
                needed, available
            ),
            ErrorKind::UnknownWord(name) => write!(f, "unknown word '{}'", name),
            ErrorKind::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected {}, got {}", expected, found)
            }
            ErrorKind::DivisionByZero => write!(f, "division by zero"),
            ErrorKind::EmptySequence => write!(f, "empty sequence"),
            ErrorKind::ArityError { expected, found } => write!(
                f,
                "quotation must leave exactly {} value(s) on the stack, left {}",
                expected, found
            ),
            ErrorKind::ParseError(msg) => write!(f, "parse error: {}", msg),
            ErrorKind::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
            ErrorKind::RecursionLimit(limit) => {
                write!(f, "nesting depth exceeded the limit of {}", limit)
            }
            ErrorKind::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

/// A fatal evaluation error with diagnostic context
#[derive(Debug)]
pub struct EvalError {
    pub kind: ErrorKind,
    /// The word being executed when the error was raised
    pub word: Option<String>,
    /// Active user words and combinators, innermost first
    pub trace: Vec<String>,
}

impl EvalError {
    pub fn new(kind: ErrorKind) -> Self {
        EvalError {
            kind,
            word: None,
            trace: Vec::new(),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        EvalError::new(ErrorKind::ParseError(msg.into()))
    }

    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        EvalError::new(ErrorKind::TypeMismatch { expected, found })
    }

    /// Record the failing word; the innermost caller wins
    pub(crate) fn at_word(mut self, name: &str) -> Self {
        if self.word.is_none() {
            self.word = Some(name.to_string());
        }
        self
    }

    /// Append an enclosing frame while the error unwinds
    pub(crate) fn in_frame(mut self, name: &str) -> Self {
        self.trace.push(name.to_string());
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(word) = &self.word {
            // UnknownWord already names it
            if !matches!(self.kind, ErrorKind::UnknownWord(_)) {
                write!(f, " in '{}'", word)?;
            }
        }
        if !self.trace.is_empty() {
            write!(f, " (called from {})", self.trace.join(" <- "))?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ErrorKind> for EvalError {
    fn from(kind: ErrorKind) -> Self {
        EvalError::new(kind)
    }
}

impl From<std::io::Error> for EvalError {
    fn from(e: std::io::Error) -> Self {
        EvalError::new(ErrorKind::Io(e))
    }
}

pub type EvalResult<T> = Result<T, EvalError>;
