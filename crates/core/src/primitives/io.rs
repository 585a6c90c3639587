//! Input and output
//!
//! `stdin` and `print` talk to the session's reader and writer, which are the
//! process streams unless the host supplies others.

use crate::error::{ErrorKind, EvalError, EvalResult};
use crate::reader::parse_number;
use crate::session::Session;
use crate::value::Value;
use std::io::{BufRead, Write};

/// Read one line and push it as a number; blocks until a line is available
///
/// Stack effect: ( -- n )
pub(super) fn stdin(session: &mut Session) -> EvalResult<()> {
    let mut line = String::new();
    let read = session.input.read_line(&mut line)?;
    if read == 0 {
        return Err(ErrorKind::UnexpectedEndOfInput.into());
    }
    let text = line.trim();
    let n = parse_number(text)
        .ok_or_else(|| EvalError::parse(format!("expected a number on input, got '{}'", text)))?;
    session.stack.push(Value::Number(n));
    Ok(())
}

/// Stack effect: ( v -- )
pub(super) fn print(session: &mut Session) -> EvalResult<()> {
    let value = session.stack.pop()?;
    writeln!(session.output, "{}", value)?;
    session.output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::error::ErrorKind;
    use crate::session::Session;
    use crate::value::Value;
    use std::io::Cursor;

    fn with_input(input: &str) -> Session {
        Session::with_io(
            EngineConfig::default().with_prelude(false),
            Cursor::new(input.to_string()),
            std::io::sink(),
        )
        .unwrap()
    }

    #[test]
    fn test_stdin_reads_one_line_at_a_time() {
        let mut session = with_input("3\n  4.5  \n");
        let stack = session.evaluate_line("stdin stdin add").unwrap();
        assert_eq!(stack, &[Value::Number(7.5)]);
    }

    #[test]
    fn test_stdin_end_of_input() {
        let mut session = with_input("1\n");
        let err = session.evaluate_line("stdin stdin").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnexpectedEndOfInput));
        assert_eq!(err.word.as_deref(), Some("stdin"));
        assert_eq!(session.stack(), &[Value::Number(1.0)]);
    }

    #[test]
    fn test_stdin_rejects_non_numbers() {
        let mut session = with_input("hello\n");
        let err = session.evaluate_line("stdin").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ParseError(_)));
    }

    #[test]
    fn test_stdin_uses_literal_number_grammar() {
        for line in ["nan", "inf", "-inf", "1e5"] {
            let mut session = with_input(&format!("{}\n", line));
            let err = session.evaluate_line("stdin").unwrap_err();
            assert!(matches!(err.kind, ErrorKind::ParseError(_)), "{}", line);
            assert!(session.stack().is_empty());
        }
        let mut session = with_input("-2.5\n");
        assert_eq!(session.evaluate_line("stdin").unwrap(), &[Value::Number(-2.5)]);
    }

    #[test]
    fn test_print_consumes_value() {
        let mut session = with_input("");
        let stack = session.evaluate_line("1 2 print").unwrap();
        assert_eq!(stack, &[Value::Number(1.0)]);
    }
}
