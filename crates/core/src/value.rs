//! Value: what the language talks about
//!
//! Values are pure data. A quotation holds tokens rather than values, so no
//! value can ever reference itself. Sequences and quotations sit behind `Rc`
//! so `dup` and friends clone in O(1); they are never mutated after creation.

use crate::reader::Token;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Signed floating-point scalar
    Number(f64),
    /// Immutable ordered list built by `[ ... ]` or a combinator
    Sequence(Rc<[Value]>),
    /// Unevaluated token sequence captured by `{ ... }`
    Quotation(Rc<[Token]>),
    /// A word name pushed by `,name`
    WordRef(String),
}

impl Value {
    pub fn sequence(values: Vec<Value>) -> Self {
        Value::Sequence(values.into())
    }

    pub fn quotation(tokens: Vec<Token>) -> Self {
        Value::Quotation(tokens.into())
    }

    /// Variant name used in type-mismatch diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Sequence(_) => "sequence",
            Value::Quotation(_) => "quotation",
            Value::WordRef(_) => "word reference",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Non-zero numbers are true; everything else is false
    pub fn is_truthy(&self) -> bool {
        matches!(self, Value::Number(n) if *n != 0.0)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Quotation(tokens) => {
                write!(f, "{{")?;
                for token in tokens.iter() {
                    write!(f, " {}", token)?;
                }
                write!(f, " }}")
            }
            Value::WordRef(name) => write!(f, ",{}", name),
        }
    }
}
