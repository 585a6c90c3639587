//! Stack shuffling
//!
//! Pure rearrangement, no numeric interpretation. Each operation checks its
//! arity up front so an underflow never leaves a half-shuffled stack, and
//! works in place so copying a value never counts as consuming it.

use crate::error::EvalResult;
use crate::session::Session;

/// Stack effect: ( a -- a a )
pub(super) fn dup(session: &mut Session) -> EvalResult<()> {
    session.stack.copy_from_top(0)
}

/// Stack effect: ( a b -- b a )
pub(super) fn swap(session: &mut Session) -> EvalResult<()> {
    session.stack.rotate(2)
}

/// Stack effect: ( a -- )
pub(super) fn pop(session: &mut Session) -> EvalResult<()> {
    session.stack.pop()?;
    Ok(())
}

/// Stack effect: ( a b -- a b a )
pub(super) fn over(session: &mut Session) -> EvalResult<()> {
    session.stack.copy_from_top(1)
}

/// Third-from-top becomes top
///
/// Stack effect: ( a b c -- b c a )
pub(super) fn roll3(session: &mut Session) -> EvalResult<()> {
    session.stack.rotate(3)
}

#[cfg(test)]
mod tests {
    use crate::error::ErrorKind;
    use crate::session::Session;

    fn render(source: &str) -> String {
        let mut session = Session::bare();
        let stack = session.evaluate_line(source).unwrap();
        stack
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_shuffles() {
        assert_eq!(render("1 dup"), "1 1");
        assert_eq!(render("1 2 swap"), "2 1");
        assert_eq!(render("1 2 pop"), "1");
        assert_eq!(render("1 2 over"), "1 2 1");
        assert_eq!(render("1 2 3 roll3"), "2 3 1");
        assert_eq!(render("1 2 3 roll3 roll3 roll3"), "1 2 3");
    }

    #[test]
    fn test_shuffles_any_variant() {
        assert_eq!(render("[1 2] { x } swap"), "{ x } [1, 2]");
        assert_eq!(render(",name dup"), ",name ,name");
    }

    #[test]
    fn test_roll3_underflow_keeps_stack() {
        let mut session = Session::bare();
        let err = session.evaluate_line("1 2 roll3").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::StackUnderflow {
                needed: 3,
                available: 2
            }
        ));
        assert_eq!(session.stack().len(), 2);
    }

    #[test]
    fn test_pop_empty() {
        let mut session = Session::bare();
        assert!(session.evaluate_line("pop").is_err());
    }
}
