use std::{fmt};

use crate::{Call, Message, Result, Value, refuse};

/// An immutable variable: a value and the guard it was bound with.
///
/// Verbs:
/// - `get()` returns the value.
/// - `getGuard()` returns the guard.
///
/// There is no `put`. Whoever binds the slot decides whether to coerce the
/// value first.
pub struct FinalSlot {
    value: Value,
    guard: Value,
}

impl FinalSlot {
    pub fn new(value: Value, guard: Value) -> Self { Self {value, guard} }
}

impl fmt::Debug for FinalSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<FinalSlot({:?})>", self.value)
    }
}

impl Call for FinalSlot {
    fn call(&self, message: &Message) -> Result<Value> {
        match (message.verb(), message.args()) {
            ("get", []) => Ok(self.value.clone()),
            ("getGuard", []) => Ok(self.guard.clone()),
            _ => refuse(self, message),
        }
    }
}

// ----------------------------------------------------------------------------
