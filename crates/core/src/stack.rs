//! The data stack
//!
//! A plain `Vec<Value>` that grows and shrinks only at its top. The typed
//! pop helpers turn a wrong variant into a `TypeMismatch` and an empty stack
//! into a `StackUnderflow`, so primitives can be written with `?`.

use crate::error::{ErrorKind, EvalError, EvalResult};
use crate::reader::Token;
use crate::value::Value;
use std::rc::Rc;

#[derive(Debug, Default, Clone)]
pub struct Stack {
    values: Vec<Value>,
    /// Lowest index popped or rewritten since the last `watch_low_water`;
    /// everything below it is untouched
    low_water: usize,
}

impl PartialEq for Stack {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Stack {
    pub fn new() -> Self {
        Stack::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Contents from bottom to top
    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    pub fn top(&self) -> Option<&Value> {
        self.values.last()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.low_water = 0;
    }

    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn pop(&mut self) -> EvalResult<Value> {
        let value = self.values.pop().ok_or_else(|| self.underflow(1))?;
        self.low_water = self.low_water.min(self.values.len());
        Ok(value)
    }

    /// Push a copy of the value `n` places below the top (0 is the top)
    pub fn copy_from_top(&mut self, n: usize) -> EvalResult<()> {
        self.require(n + 1)?;
        let value = self.values[self.values.len() - 1 - n].clone();
        self.values.push(value);
        Ok(())
    }

    /// Move the value `n - 1` places below the top up to the top, in place
    ///
    /// Stack effect for n = 3: ( a b c -- b c a )
    pub fn rotate(&mut self, n: usize) -> EvalResult<()> {
        self.require(n)?;
        let start = self.values.len() - n;
        self.values[start..].rotate_left(1);
        self.low_water = self.low_water.min(start);
        Ok(())
    }

    /// Start tracking the lowest touched index from the current length.
    ///
    /// Returns the mark being replaced, to hand back to `take_low_water`
    /// so an enclosing watch still sees what happened meanwhile.
    pub(crate) fn watch_low_water(&mut self) -> usize {
        std::mem::replace(&mut self.low_water, self.values.len())
    }

    /// Lowest touched index since the matching `watch_low_water`
    pub(crate) fn take_low_water(&mut self, outer: usize) -> usize {
        let low = self.low_water;
        self.low_water = outer.min(low);
        low
    }

    /// Fail with `StackUnderflow` unless at least `n` values are present
    pub fn require(&self, n: usize) -> EvalResult<()> {
        if self.values.len() < n {
            Err(self.underflow(n))
        } else {
            Ok(())
        }
    }

    /// Pop two values, returning `(a, b)` where b was on top
    ///
    /// Stack effect: ( a b -- )
    pub fn pop_two(&mut self) -> EvalResult<(Value, Value)> {
        self.require(2)?;
        let b = self.pop()?;
        let a = self.pop()?;
        Ok((a, b))
    }

    pub fn pop_number(&mut self) -> EvalResult<f64> {
        match self.pop()? {
            Value::Number(n) => Ok(n),
            other => Err(EvalError::type_mismatch("number", other.type_name())),
        }
    }

    /// Pop two numbers, returning `(a, b)` where b was on top
    pub fn pop_numbers(&mut self) -> EvalResult<(f64, f64)> {
        self.require(2)?;
        let b = self.pop_number()?;
        let a = self.pop_number()?;
        Ok((a, b))
    }

    pub fn pop_sequence(&mut self) -> EvalResult<Rc<[Value]>> {
        match self.pop()? {
            Value::Sequence(items) => Ok(items),
            other => Err(EvalError::type_mismatch("sequence", other.type_name())),
        }
    }

    pub fn pop_quotation(&mut self) -> EvalResult<Rc<[Token]>> {
        match self.pop()? {
            Value::Quotation(tokens) => Ok(tokens),
            other => Err(EvalError::type_mismatch("quotation", other.type_name())),
        }
    }

    pub fn pop_word(&mut self) -> EvalResult<String> {
        match self.pop()? {
            Value::WordRef(name) => Ok(name),
            other => Err(EvalError::type_mismatch(
                "word reference",
                other.type_name(),
            )),
        }
    }

    /// Pop a count for `repeat`: a non-negative integral number
    pub fn pop_count(&mut self) -> EvalResult<usize> {
        let n = self.pop_number()?;
        if n < 0.0 || n.fract() != 0.0 || !n.is_finite() {
            return Err(EvalError::type_mismatch("non-negative integer", "number"));
        }
        Ok(n as usize)
    }

    fn underflow(&self, needed: usize) -> EvalError {
        EvalError::new(ErrorKind::StackUnderflow {
            needed,
            available: self.values.len(),
        })
    }
}

impl From<Vec<Value>> for Stack {
    fn from(values: Vec<Value>) -> Self {
        Stack {
            values,
            low_water: 0,
        }
    }
}

impl From<Stack> for Vec<Value> {
    fn from(stack: Stack) -> Self {
        stack.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_two_order() {
        let mut stack = Stack::from(vec![Value::Number(1.0), Value::Number(2.0)]);
        let (a, b) = stack.pop_numbers().unwrap();
        assert_eq!((a, b), (1.0, 2.0));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_underflow_leaves_stack_untouched() {
        let mut stack = Stack::from(vec![Value::Number(1.0)]);
        let err = stack.pop_two().unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::StackUnderflow {
                needed: 2,
                available: 1
            }
        ));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_type_mismatch() {
        let mut stack = Stack::from(vec![Value::WordRef("x".to_string())]);
        let err = stack.pop_number().unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::TypeMismatch {
                expected: "number",
                found: "word reference"
            }
        ));
    }

    #[test]
    fn test_pop_count_rejects_fractions_and_negatives() {
        let mut stack = Stack::from(vec![Value::Number(2.5)]);
        assert!(stack.pop_count().is_err());
        let mut stack = Stack::from(vec![Value::Number(-1.0)]);
        assert!(stack.pop_count().is_err());
        let mut stack = Stack::from(vec![Value::Number(3.0)]);
        assert_eq!(stack.pop_count().unwrap(), 3);
    }

    #[test]
    fn test_copy_and_rotate() {
        let mut stack = Stack::from(vec![1.0.into(), 2.0.into(), 3.0.into()]);
        stack.copy_from_top(2).unwrap();
        stack.rotate(2).unwrap();
        assert_eq!(
            stack.as_slice(),
            &[
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(1.0),
                Value::Number(3.0)
            ]
        );
        assert!(stack.rotate(5).is_err());
        assert!(stack.copy_from_top(4).is_err());
        assert_eq!(stack.len(), 4);
    }

    #[test]
    fn test_rotate_lowers_the_mark() {
        let mut stack = Stack::from(vec![1.0.into(), 2.0.into(), 3.0.into()]);
        let outer = stack.watch_low_water();
        stack.copy_from_top(1).unwrap();
        assert_eq!(stack.take_low_water(outer), 3);
        let outer = stack.watch_low_water();
        stack.rotate(3).unwrap();
        assert_eq!(stack.take_low_water(outer), 1);
    }

    #[test]
    fn test_low_water_mark() {
        let mut stack = Stack::from(vec![1.0.into(), 2.0.into(), 3.0.into()]);
        let outer = stack.watch_low_water();
        stack.pop().unwrap();
        stack.pop().unwrap();
        stack.push(4.0.into());
        stack.push(5.0.into());
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.take_low_water(outer), 1);
    }

    #[test]
    fn test_nested_low_water_reaches_outer_watch() {
        let mut stack = Stack::from(vec![1.0.into(), 2.0.into()]);
        let outer = stack.watch_low_water();
        stack.push(3.0.into());
        let inner = stack.watch_low_water();
        stack.pop().unwrap();
        stack.pop().unwrap();
        assert_eq!(stack.take_low_water(inner), 1);
        stack.push(2.0.into());
        assert_eq!(stack.take_low_water(outer), 1);
    }
}
