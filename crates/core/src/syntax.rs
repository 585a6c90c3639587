//! Lexical facts for editors and highlighters
//!
//! Tools that colour or complete calc source read these instead of
//! duplicating the reader's rules.

/// Primitive names a highlighter marks as builtins
pub const PRIMITIVE_NAMES: &[&str] = &[
    "add", "alias", "sub", "mul", "div", "mod", "swap", "dup", "print", "stdin", "map", "fold",
    "repeat", "pop", "def", "roll3", "len", "sum",
];

/// Starts a comment that runs to the end of the line
pub const COMMENT_PREFIX: &str = "#";

/// Prefix that turns a name into a word reference (`,name`)
pub const QUOTE_MARKER: &str = ",";

/// Open and close of a quotation
pub const QUOTATION_DELIMITERS: (&str, &str) = ("{", "}");

/// Open and close of an array scope
pub const ARRAY_DELIMITERS: (&str, &str) = ("[", "]");
