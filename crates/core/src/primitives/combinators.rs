//! Combinators: primitives that take quotations and decide how and when they
//! run.
//!
//! Quotation bodies run on the shared session stack, so a body can read
//! values that sit below its own operands (`10 [1 2] { over add } map`).
//! The per-element combinators (`map`, `fold`, `fold1`, `filter`) require
//! the body to leave exactly one value above what the stack held before the
//! combinator pushed its operands, and never to pop below that point;
//! anything else is an `ArityError`.

use crate::error::{ErrorKind, EvalError, EvalResult};
use crate::reader::Token;
use crate::session::Session;
use crate::value::Value;

/// Run `body` and pop the single value it left above `depth`
fn single_result(
    session: &mut Session,
    body: &[Token],
    frame: &str,
    depth: usize,
) -> EvalResult<Value> {
    let outer = session.stack.watch_low_water();
    let result = session.call(body, frame);
    let low = session.stack.take_low_water(outer);
    result?;
    let left = session.stack.len().saturating_sub(low.min(depth));
    if low < depth || session.stack.len() != depth + 1 {
        return Err(ErrorKind::ArityError {
            expected: 1,
            found: left,
        }
        .into());
    }
    session.stack.pop()
}

/// Stack effect: ( seq quot -- seq' )
pub(super) fn map(session: &mut Session) -> EvalResult<()> {
    session.stack.require(2)?;
    let body = session.stack.pop_quotation()?;
    let items = session.stack.pop_sequence()?;
    let depth = session.stack.len();

    let mut results = Vec::with_capacity(items.len());
    for item in items.iter() {
        session.stack.push(item.clone());
        results.push(single_result(session, &body, "map", depth)?);
    }
    session.stack.push(Value::sequence(results));
    Ok(())
}

/// Left-to-right reduction from an explicit initial accumulator
///
/// Stack effect: ( seq init quot -- acc )
pub(super) fn fold(session: &mut Session) -> EvalResult<()> {
    session.stack.require(3)?;
    let body = session.stack.pop_quotation()?;
    let init = session.stack.pop()?;
    let items = session.stack.pop_sequence()?;
    let acc = reduce(session, &body, "fold", init, &items)?;
    session.stack.push(acc);
    Ok(())
}

/// Reduction seeded with the first element
///
/// Stack effect: ( seq quot -- acc )
pub(super) fn fold1(session: &mut Session) -> EvalResult<()> {
    session.stack.require(2)?;
    let body = session.stack.pop_quotation()?;
    let items = session.stack.pop_sequence()?;
    let (first, rest) = items
        .split_first()
        .ok_or_else(|| EvalError::new(ErrorKind::EmptySequence))?;
    let acc = reduce(session, &body, "fold1", first.clone(), rest)?;
    session.stack.push(acc);
    Ok(())
}

fn reduce(
    session: &mut Session,
    body: &[Token],
    frame: &str,
    init: Value,
    items: &[Value],
) -> EvalResult<Value> {
    let depth = session.stack.len();
    let mut acc = init;
    for item in items {
        session.stack.push(acc);
        session.stack.push(item.clone());
        acc = single_result(session, body, frame, depth)?;
    }
    Ok(acc)
}

/// Keep the elements for which the quotation leaves a non-zero number
///
/// Stack effect: ( seq quot -- seq' )
pub(super) fn filter(session: &mut Session) -> EvalResult<()> {
    session.stack.require(2)?;
    let body = session.stack.pop_quotation()?;
    let items = session.stack.pop_sequence()?;
    let depth = session.stack.len();

    let mut kept = Vec::new();
    for item in items.iter() {
        session.stack.push(item.clone());
        if single_result(session, &body, "filter", depth)?.is_truthy() {
            kept.push(item.clone());
        }
    }
    session.stack.push(Value::sequence(kept));
    Ok(())
}

/// Run a quotation `n` times, threading the stack through each run
///
/// Stack effect: ( quot n -- ... )
pub(super) fn repeat(session: &mut Session) -> EvalResult<()> {
    session.stack.require(2)?;
    let count = session.stack.pop_count()?;
    let body = session.stack.pop_quotation()?;
    for _ in 0..count {
        session.call(&body, "repeat")?;
    }
    Ok(())
}

/// Run `then` when the condition is non-zero, `else` otherwise.
///
/// A branch that is not a quotation is pushed as a plain value, so
/// `x 0 gt 1 -1 if` works without wrapping the constants.
///
/// Stack effect: ( cond then else -- ... )
pub(super) fn if_else(session: &mut Session) -> EvalResult<()> {
    session.stack.require(3)?;
    let else_branch = session.stack.pop()?;
    let then_branch = session.stack.pop()?;
    let condition = session.stack.pop_number()?;
    let branch = if condition != 0.0 {
        then_branch
    } else {
        else_branch
    };
    match branch {
        Value::Quotation(body) => session.call(&body, "if"),
        value => {
            session.stack.push(value);
            Ok(())
        }
    }
}

/// Run a quotation, or execute the word a word reference names
///
/// Stack effect: ( quot|,word -- ... )
pub(super) fn apply(session: &mut Session) -> EvalResult<()> {
    match session.stack.pop()? {
        Value::Quotation(body) => session.call(&body, "apply"),
        Value::WordRef(name) => session.execute_word(&name),
        other => Err(EvalError::type_mismatch(
            "quotation or word reference",
            other.type_name(),
        )),
    }
}
