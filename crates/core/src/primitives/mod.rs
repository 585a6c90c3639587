//! Native primitives
//!
//! Every primitive is a plain function over the session. The dictionary is
//! pre-populated with all of them before any prelude loads, and user code
//! may shadow any of them with `def`.
//!
//! Operand order follows postfix reading: for `a b op`, `a` was pushed
//! first and `b` is on top.

mod arithmetic;
mod combinators;
mod io;
mod sequences;
mod shuffle;
mod words;

use crate::error::EvalResult;
use crate::session::Session;

/// Define the `Primitive` enum together with its source names
macro_rules! primitives {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// A native operation, identified by its dictionary name
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Primitive {
            $($variant),*
        }

        impl Primitive {
            /// Every primitive, in registration order
            pub const ALL: &'static [Primitive] = &[$(Primitive::$variant),*];

            /// The name the primitive is bound to at session start
            pub fn name(self) -> &'static str {
                match self {
                    $(Primitive::$variant => $name),*
                }
            }

            pub fn from_name(name: &str) -> Option<Primitive> {
                match name {
                    $($name => Some(Primitive::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

primitives! {
    // Arithmetic
    Add => "add",
    Sub => "sub",
    Mul => "mul",
    Div => "div",
    Mod => "mod",
    Pow => "pow",
    Log => "log",
    Max => "max",
    Min => "min",
    Cmp => "cmp",

    // Stack manipulation
    Dup => "dup",
    Swap => "swap",
    Pop => "pop",
    Over => "over",
    Roll3 => "roll3",

    // Words
    Def => "def",
    Alias => "alias",

    // Combinators
    Map => "map",
    Fold => "fold",
    Fold1 => "fold1",
    Filter => "filter",
    Repeat => "repeat",
    If => "if",
    Apply => "apply",

    // Sequences
    Len => "len",
    Sum => "sum",
    Arg => "arg",

    // IO
    Stdin => "stdin",
    Print => "print",
}

impl Primitive {
    pub(crate) fn invoke(self, session: &mut Session) -> EvalResult<()> {
        match self {
            Primitive::Add => arithmetic::binary(session, |a, b| a + b),
            Primitive::Sub => arithmetic::binary(session, |a, b| a - b),
            Primitive::Mul => arithmetic::binary(session, |a, b| a * b),
            Primitive::Div => arithmetic::div(session),
            Primitive::Mod => arithmetic::modulo(session),
            Primitive::Pow => arithmetic::binary(session, f64::powf),
            Primitive::Log => arithmetic::binary(session, f64::log),
            Primitive::Max => arithmetic::binary(session, f64::max),
            Primitive::Min => arithmetic::binary(session, f64::min),
            Primitive::Cmp => arithmetic::cmp(session),

            Primitive::Dup => shuffle::dup(session),
            Primitive::Swap => shuffle::swap(session),
            Primitive::Pop => shuffle::pop(session),
            Primitive::Over => shuffle::over(session),
            Primitive::Roll3 => shuffle::roll3(session),

            Primitive::Def => words::def(session),
            Primitive::Alias => words::alias(session),

            Primitive::Map => combinators::map(session),
            Primitive::Fold => combinators::fold(session),
            Primitive::Fold1 => combinators::fold1(session),
            Primitive::Filter => combinators::filter(session),
            Primitive::Repeat => combinators::repeat(session),
            Primitive::If => combinators::if_else(session),
            Primitive::Apply => combinators::apply(session),

            Primitive::Len => sequences::len(session),
            Primitive::Sum => sequences::sum(session),
            Primitive::Arg => sequences::arg(session),

            Primitive::Stdin => io::stdin(session),
            Primitive::Print => io::print(session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for &prim in Primitive::ALL {
            assert_eq!(Primitive::from_name(prim.name()), Some(prim));
        }
        assert_eq!(Primitive::from_name("frobnicate"), None);
    }

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = Primitive::ALL.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Primitive::ALL.len());
    }
}
