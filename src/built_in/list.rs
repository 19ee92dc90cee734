use std::{fmt};
use std::rc::{Rc};

use crate::{Call, Message, Result, Value, Error, refuse};
use super::{Guard, guard_call};

/// An immutable list.
///
/// Verbs:
/// - `size()` returns the number of elements.
pub struct ConstList {
    items: Rc<[Value]>,
}

impl ConstList {
    pub fn new(items: impl Into<Rc<[Value]>>) -> Self { Self {items: items.into()} }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl fmt::Debug for ConstList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl Call for ConstList {
    fn call(&self, message: &Message) -> Result<Value> {
        match (message.verb(), message.args()) {
            ("size", []) => Ok(Value::Int(self.items.len() as i64)),
            _ => refuse(self, message),
        }
    }
}

/// The elements of `value`, if it is a [`Value::Tuple`] or a [`ConstList`].
fn elements(value: &Value) -> Option<Rc<[Value]>> {
    match value {
        Value::Tuple(items) => Some(items.clone()),
        _ => value.downcast_ref::<ConstList>().map(|list| list.items.clone()),
    }
}

// ----------------------------------------------------------------------------

/// The guard `List`, which admits [`ConstList`]s and converts
/// [`Value::Tuple`]s into them.
#[derive(Default, Copy, Clone)]
pub struct ListGuard;

impl fmt::Debug for ListGuard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str("List") }
}

impl Guard for ListGuard {
    fn name(&self) -> &str { "List" }

    fn admit(&self, specimen: &Value) -> Option<Value> {
        match specimen {
            Value::Tuple(items) => Some(Value::object(ConstList::new(items.clone()))),
            _ if specimen.downcast_ref::<ConstList>().is_some() => Some(specimen.clone()),
            _ => None,
        }
    }
}

impl Call for ListGuard {
    fn call(&self, message: &Message) -> Result<Value> { guard_call(self, message) }
}

// ----------------------------------------------------------------------------

/// The list constructor.
///
/// Verbs:
/// - `run(sequence)` returns a new [`ConstList`] with the elements of
///   `sequence`, which must be a tuple or a list.
#[derive(Default, Copy, Clone)]
pub struct MakeList;

impl fmt::Debug for MakeList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str("_makeList") }
}

impl Call for MakeList {
    fn call(&self, message: &Message) -> Result<Value> {
        match (message.verb(), message.args()) {
            ("run", [sequence]) => {
                let items = elements(sequence)
                    .ok_or_else(|| Error::wrong_type(sequence, ListGuard.name()))?;
                Ok(Value::object(ConstList::new(items)))
            },
            _ => refuse(self, message),
        }
    }
}

/// Returns the list constructor.
pub fn make_list() -> Value { Value::object(MakeList) }

// ----------------------------------------------------------------------------
