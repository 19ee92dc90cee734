use std::{fmt};

use crate::{Call, Message, Result, Value, Error, refuse};

/// One of the two boolean objects. Its meaning is its identity; it
/// understands no verbs.
struct Boolean(bool);

impl fmt::Debug for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(if self.0 { "true" } else { "false" })
    }
}

impl Call for Boolean {
    fn call(&self, message: &Message) -> Result<Value> { refuse(self, message) }
}

thread_local! {
    static TRUE: Value = Value::object(Boolean(true));
    static FALSE: Value = Value::object(Boolean(false));
}

/// The `true` object.
pub fn true_object() -> Value { TRUE.with(Value::clone) }

/// The `false` object.
pub fn false_object() -> Value { FALSE.with(Value::clone) }

/// Selects `true_object()` or `false_object()`.
pub fn wrap_bool(b: bool) -> Value {
    if b { true_object() } else { false_object() }
}

/// Returns `true` if `candidate` is the `true` object and `false` if it is
/// the `false` object. Anything else, however boolean it looks, does not
/// conform to `Bool`.
pub fn is_true(candidate: &Value) -> Result<bool> {
    if TRUE.with(|t| candidate.same(t)) { return Ok(true); }
    if FALSE.with(|f| candidate.same(f)) { return Ok(false); }
    Err(Error::wrong_type(candidate, "Bool"))
}

// ----------------------------------------------------------------------------
