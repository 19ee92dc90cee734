use std::{fmt};
use std::rc::{Rc};

use crate::call::{Call};

/// A runtime value.
///
/// Cloning a `Value` shares it; nothing in this crate mutates a `Value` it
/// has been given.
#[derive(Clone)]
pub enum Value {
    /// An exact 64-bit integer.
    Int(i64),

    /// A string, e.g. the payload of an ejector.
    Str(Rc<str>),

    /// A raw sequence of [`Value`]s, e.g. the argument list an evaluator
    /// collected for a list literal.
    Tuple(Rc<[Value]>),

    /// Anything with behaviour of its own.
    Object(Rc<dyn Call>),
}

impl Value {
    /// Wraps `object` as a fresh `Value` with a new identity.
    pub fn object(object: impl Call + 'static) -> Self { Self::Object(Rc::new(object)) }

    /// Returns `true` if `self` and `other` are the same value.
    ///
    /// Shared values are compared by identity, not structure. Two `Int`s are
    /// the same if they are equal.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => Rc::ptr_eq(a, b),
            (Self::Tuple(a), Self::Tuple(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => {
                Rc::as_ptr(a).cast::<()>() == Rc::as_ptr(b).cast::<()>()
            },
            _ => false,
        }
    }

    /// Returns the object in `self` if it is a `T`.
    pub fn downcast_ref<T: Call + 'static>(&self) -> Option<&T> {
        let Self::Object(object) = self else { return None; };
        (**object).as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Int(i) => fmt::Debug::fmt(i, f),
            Self::Str(string) => fmt::Debug::fmt(string, f),
            Self::Tuple(values) => f.debug_list().entries(values.iter()).finish(),
            Self::Object(object) => fmt::Debug::fmt(&**object, f),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self { Self::Int(value) }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self { Self::Str(value.into()) }
}

impl From<String> for Value {
    fn from(value: String) -> Self { Self::Str(value.into()) }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self { Self::Tuple(values.into()) }
}

impl<const N: usize> From<[Value; N]> for Value {
    fn from(fields: [Value; N]) -> Self { Self::Tuple(Rc::new(fields)) }
}

// ----------------------------------------------------------------------------
