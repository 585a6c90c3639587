//! The evaluator
//!
//! Executes a token sequence strictly left to right against the session
//! stack:
//!
//! - number literal: push it
//! - `,name`: push a word reference without looking it up
//! - `{ ... }`: push the enclosed tokens as a quotation, unevaluated
//! - `[ ... ]`: evaluate the enclosed tokens on a fresh stack and push what
//!   they leave as one sequence (see [`Session::build_array`])
//! - any other word: look it up; run primitives natively and user words by
//!   evaluating their tokens on the *same* stack
//!
//! Combinators re-enter the evaluator through [`Session::call`], which
//! tracks nesting depth and records the frame name on errors as they unwind.

use crate::dictionary::Definition;
use crate::error::{ErrorKind, EvalError, EvalResult};
use crate::reader::{Token, TokenKind, find_closing};
use crate::session::Session;
use crate::value::Value;
use tracing::trace;

impl Session {
    pub(crate) fn run(&mut self, tokens: &[Token]) -> EvalResult<()> {
        let mut pos = 0;
        while pos < tokens.len() {
            let token = &tokens[pos];
            match &token.kind {
                TokenKind::Number(n) => self.stack.push(Value::Number(*n)),
                TokenKind::QuotedWord(name) => self.stack.push(Value::WordRef(name.clone())),
                TokenKind::OpenQuote => {
                    let close = closing(tokens, pos)?;
                    self.stack
                        .push(Value::quotation(tokens[pos + 1..close].to_vec()));
                    pos = close;
                }
                TokenKind::OpenArray => {
                    let close = closing(tokens, pos)?;
                    self.build_array(&tokens[pos + 1..close])?;
                    pos = close;
                }
                TokenKind::CloseQuote | TokenKind::CloseArray => {
                    return Err(EvalError::parse(format!(
                        "unexpected '{}' at line {}, column {}",
                        token, token.line, token.column
                    )));
                }
                TokenKind::Word(name) => self.execute_word(name)?,
            }
            pos += 1;
        }
        Ok(())
    }

    /// Look up a word and execute it
    pub(crate) fn execute_word(&mut self, name: &str) -> EvalResult<()> {
        trace!(word = name, stack = self.stack.len(), "execute");
        let definition = self.dict.lookup(name).cloned().ok_or_else(|| {
            EvalError::new(ErrorKind::UnknownWord(name.to_string())).at_word(name)
        })?;
        match definition {
            Definition::Primitive(prim) => prim.invoke(self).map_err(|e| e.at_word(name)),
            Definition::User(body) => self.call(&body, name),
        }
    }

    /// Evaluate a quotation body one level deeper, on the shared stack
    pub(crate) fn call(&mut self, body: &[Token], frame: &str) -> EvalResult<()> {
        if self.depth >= self.config.max_depth {
            return Err(EvalError::new(ErrorKind::RecursionLimit(self.config.max_depth))
                .at_word(frame));
        }
        self.depth += 1;
        let result = self.run(body);
        self.depth -= 1;
        result.map_err(|e| e.in_frame(frame))
    }

    /// Evaluate `body` against a fresh stack and push the values it leaves,
    /// bottom to top, as one sequence.
    ///
    /// The current stack is set aside as the enclosing stack while the body
    /// runs; `arg` moves values from it into the scope. The enclosing stack
    /// is restored even when the body fails.
    fn build_array(&mut self, body: &[Token]) -> EvalResult<()> {
        trace!(scopes = self.enclosing.len() + 1, "array scope");
        let outer = std::mem::take(&mut self.stack);
        self.enclosing.push(outer);
        let result = self.run(body);
        let outer = self.enclosing.pop().unwrap_or_default();
        let inner = std::mem::replace(&mut self.stack, outer);
        result?;
        self.stack.push(Value::sequence(inner.into()));
        Ok(())
    }
}

fn closing(tokens: &[Token], open: usize) -> EvalResult<usize> {
    find_closing(tokens, open).ok_or_else(|| {
        let token = &tokens[open];
        EvalError::parse(format!(
            "unclosed '{}' at line {}, column {}",
            token, token.line, token.column
        ))
    })
}

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::error::ErrorKind;
    use crate::session::Session;
    use crate::value::Value;
    use std::io;

    fn render(session: &mut Session, source: &str) -> String {
        let stack = session.evaluate_line(source).unwrap();
        stack
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_literals() {
        let mut session = Session::bare();
        assert_eq!(render(&mut session, "1 -2.5 ,foo"), "1 -2.5 ,foo");
    }

    #[test]
    fn test_quotation_is_not_evaluated() {
        let mut session = Session::bare();
        assert_eq!(
            render(&mut session, "{ nope { 1 2 } [ 3 ] }"),
            "{ nope { 1 2 } [ 3 ] }"
        );
    }

    #[test]
    fn test_quoted_word_is_not_looked_up() {
        let mut session = Session::bare();
        let stack = session.evaluate_line(",undefined").unwrap();
        assert_eq!(stack, &[Value::WordRef("undefined".to_string())]);
    }

    #[test]
    fn test_unknown_word() {
        let mut session = Session::bare();
        let err = session.evaluate_line("1 frobnicate").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnknownWord(ref w) if w == "frobnicate"));
        assert_eq!(err.word.as_deref(), Some("frobnicate"));
        assert!(err.trace.is_empty());
    }

    #[test]
    fn test_user_words_share_the_stack() {
        let mut session = Session::bare();
        session.load(",addall { add add } def").unwrap();
        assert_eq!(render(&mut session, "1 2 3 addall"), "6");
    }

    #[test]
    fn test_error_trace_is_innermost_first() {
        let mut session = Session::bare();
        session
            .load(",inner { 0 div } def ,middle { inner } def ,outer { { middle } 1 repeat } def")
            .unwrap();
        let err = session.evaluate_line("1 outer").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::DivisionByZero));
        assert_eq!(err.word.as_deref(), Some("div"));
        assert_eq!(err.trace, vec!["inner", "middle", "repeat", "outer"]);
    }

    #[test]
    fn test_recursion_limit() {
        let config = EngineConfig::default()
            .with_prelude(false)
            .with_max_depth(16);
        let mut session = Session::with_io(config, io::empty(), io::sink()).unwrap();
        session.load(",forever { forever } def").unwrap();
        let err = session.evaluate_line("forever").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::RecursionLimit(16)));
        assert_eq!(err.trace.len(), 16);

        // depth resets for the next top-level evaluation
        assert_eq!(render(&mut session, "1 2 add"), "3");
    }

    #[test]
    fn test_recursion_through_if_terminates() {
        let mut session = Session::bare();
        session
            .load(",countdown { dup 0 cmp { 1 sub countdown } { } if } def")
            .unwrap();
        assert_eq!(render(&mut session, "10 countdown"), "0");
    }
}
