//! Arithmetic and comparison
//!
//! All numbers are `f64`. Only `div` and `mod` can fail on their values;
//! everything else follows IEEE semantics (`0 log` is `-inf`, and so on).

use crate::error::{ErrorKind, EvalResult};
use crate::session::Session;
use crate::value::Value;
use std::cmp::Ordering;

/// Stack effect: ( a b -- f(a, b) )
pub(super) fn binary(session: &mut Session, f: impl Fn(f64, f64) -> f64) -> EvalResult<()> {
    let (a, b) = session.stack.pop_numbers()?;
    session.stack.push(Value::Number(f(a, b)));
    Ok(())
}

/// Stack effect: ( a b -- a/b )
pub(super) fn div(session: &mut Session) -> EvalResult<()> {
    let (a, b) = session.stack.pop_numbers()?;
    if b == 0.0 {
        return Err(ErrorKind::DivisionByZero.into());
    }
    session.stack.push(Value::Number(a / b));
    Ok(())
}

/// Remainder with the sign of the dividend
///
/// Stack effect: ( a b -- a%b )
pub(super) fn modulo(session: &mut Session) -> EvalResult<()> {
    let (a, b) = session.stack.pop_numbers()?;
    if b == 0.0 {
        return Err(ErrorKind::DivisionByZero.into());
    }
    session.stack.push(Value::Number(a % b));
    Ok(())
}

/// Stack effect: ( a b -- -1|0|1 )
pub(super) fn cmp(session: &mut Session) -> EvalResult<()> {
    let (a, b) = session.stack.pop_numbers()?;
    // NaN compares equal to everything; there is no unordered result
    let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
    let result = match ordering {
        Ordering::Less => -1.0,
        Ordering::Equal => 0.0,
        Ordering::Greater => 1.0,
    };
    session.stack.push(Value::Number(result));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::session::Session;
    use crate::value::Value;

    fn eval(source: &str) -> Vec<Value> {
        let mut session = Session::bare();
        session.evaluate_line(source).unwrap().to_vec()
    }

    fn top(source: &str) -> f64 {
        eval(source).last().and_then(Value::as_number).unwrap()
    }

    #[test]
    fn test_basic_ops() {
        assert_eq!(top("3 4 add"), 7.0);
        assert_eq!(top("3 4 sub"), -1.0);
        assert_eq!(top("3 4 mul"), 12.0);
        assert_eq!(top("3 4 div"), 0.75);
        assert_eq!(top("7 3 mod"), 1.0);
        assert_eq!(top("-7 3 mod"), -1.0);
        assert_eq!(top("2 10 pow"), 1024.0);
        assert!((top("8 2 log") - 3.0).abs() < 1e-12);
        assert_eq!(top("3 4 max"), 4.0);
        assert_eq!(top("3 4 min"), 3.0);
    }

    #[test]
    fn test_cmp() {
        assert_eq!(top("1 2 cmp"), -1.0);
        assert_eq!(top("2 2 cmp"), 0.0);
        assert_eq!(top("3 2 cmp"), 1.0);
    }

    #[test]
    fn test_division_by_zero() {
        let mut session = Session::bare();
        let err = session.evaluate_line("1 0 div").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DivisionByZero));
        assert_eq!(err.word.as_deref(), Some("div"));

        let err = session.evaluate_line("1 0 mod").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DivisionByZero));
    }

    #[test]
    fn test_non_number_operand() {
        let mut session = Session::bare();
        let err = session.evaluate_line("{ 1 } 2 add").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::TypeMismatch {
                expected: "number",
                found: "quotation"
            }
        ));
    }

    #[test]
    fn test_underflow() {
        let mut session = Session::bare();
        let err = session.evaluate_line("1 add").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::StackUnderflow { .. }));
    }
}
