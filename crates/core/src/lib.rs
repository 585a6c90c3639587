//! calc: a small postfix, concatenative stack language
//!
//! Source text is a flat sequence of whitespace-separated tokens evaluated
//! left to right against a single data stack. Numbers push themselves,
//! `,name` pushes a word reference, `{ ... }` pushes an unevaluated
//! quotation, and `[ ... ]` evaluates its body on a fresh stack and pushes
//! the result as a sequence. Every other token names a word in the session's
//! dictionary: a native primitive or a user definition made with `def`.
//!
//! # Modules
//!
//! - `reader`: tokenizer and delimiter balance check
//! - `value`: the `Value` enum (numbers, sequences, quotations, word references)
//! - `stack`: the data stack and its typed pop helpers
//! - `dictionary`: name to definition bindings, with alias tracking
//! - `primitives`: the native word library
//! - `session`: evaluation context owning stack, dictionary and streams
//! - `prelude`: the embedded standard word library
//! - `config`: engine configuration (TOML)
//! - `error`: evaluation errors with word and call trace
//! - `syntax`: lexical constants for editor tooling

pub mod config;
pub mod dictionary;
pub mod error;
mod eval;
pub mod prelude;
pub mod primitives;
pub mod reader;
pub mod session;
pub mod stack;
pub mod syntax;
pub mod value;

pub use config::{ConfigError, DEFAULT_MAX_DEPTH, EngineConfig};
pub use dictionary::{Definition, Dictionary};
pub use error::{ErrorKind, EvalError, EvalResult};
pub use primitives::Primitive;
pub use reader::{Token, TokenKind, tokenize};
pub use session::Session;
pub use stack::Stack;
pub use value::Value;
