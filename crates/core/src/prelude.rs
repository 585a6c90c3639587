//! Embedded prelude
//!
//! The standard word library is ordinary calc source compiled into the
//! binary, so sessions never depend on files at runtime.

/// Source of the standard word library
pub static PRELUDE: &str = include_str!("../prelude/prelude.calc");
