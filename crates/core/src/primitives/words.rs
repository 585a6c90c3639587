//! Binding words: `def` and `alias`

use crate::dictionary::Definition;
use crate::error::EvalResult;
use crate::session::Session;

/// Bind a name to a quotation
///
/// Stack effect: ( ,name quot -- )
pub(super) fn def(session: &mut Session) -> EvalResult<()> {
    session.stack.require(2)?;
    let body = session.stack.pop_quotation()?;
    let name = session.stack.pop_word()?;
    session.dict.define(name, Definition::User(body));
    Ok(())
}

/// Bind a new name to a copy of an existing word's current definition
///
/// Stack effect: ( ,new ,existing -- )
pub(super) fn alias(session: &mut Session) -> EvalResult<()> {
    session.stack.require(2)?;
    let existing = session.stack.pop_word()?;
    let new_name = session.stack.pop_word()?;
    session.dict.alias(new_name, &existing)
}
