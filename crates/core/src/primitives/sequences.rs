//! Sequence primitives and the `arg` hook of `[ ... ]` scopes

use crate::error::{EvalError, EvalResult};
use crate::session::Session;
use crate::value::Value;

/// Stack effect: ( seq -- n )
pub(super) fn len(session: &mut Session) -> EvalResult<()> {
    let items = session.stack.pop_sequence()?;
    session.stack.push(Value::Number(items.len() as f64));
    Ok(())
}

/// Stack effect: ( seq -- total )
pub(super) fn sum(session: &mut Session) -> EvalResult<()> {
    let items = session.stack.pop_sequence()?;
    let mut total = 0.0;
    for item in items.iter() {
        total += item
            .as_number()
            .ok_or_else(|| EvalError::type_mismatch("number", item.type_name()))?;
    }
    session.stack.push(Value::Number(total));
    Ok(())
}

/// Move the top of the enclosing stack into the current `[ ... ]` scope.
///
/// Outside any array scope there is nothing to draw from and `arg` does
/// nothing.
pub(super) fn arg(session: &mut Session) -> EvalResult<()> {
    if let Some(outer) = session.enclosing.last_mut() {
        let value = outer.pop()?;
        session.stack.push(value);
    }
    Ok(())
}
