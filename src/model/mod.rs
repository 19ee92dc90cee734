use std::{fmt};
use std::rc::{Rc};

/// Represents the name of the operation requested by a [`Message`].
///
/// Verbs are case-sensitive and compared by exact equality. There is no
/// overloading by arity at this level; a handler inspects the arguments
/// itself.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Verb(Rc<str>);

impl Verb {
    /// Returns `None` if `name` is empty.
    pub fn new(name: &str) -> Option<Self> {
        if name.is_empty() { None } else { Some(Self(name.into())) }
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl std::borrow::Borrow<str> for Verb {
    fn borrow(&self) -> &str { &self.0 }
}

impl fmt::Debug for Verb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt::Debug::fmt(&*self.0, f) }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(&self.0) }
}

/// Represents the name of a named argument.
pub type Name = Rc<str>;

/// Represents a map from `Name` to `T`.
///
/// Ordered by name, so that anything printed from it is deterministic.
pub type Map<T> = std::collections::BTreeMap<Name, T>;

// ----------------------------------------------------------------------------

mod repr;
pub use repr::{Value};

// ----------------------------------------------------------------------------

/// The payload of every call: a verb, positional arguments and named
/// arguments.
///
/// A `Message` is built by the caller and lent to the callee; it has no
/// mutating methods once built.
#[derive(Debug, Clone)]
pub struct Message {
    verb: Verb,
    args: Box<[Value]>,
    named: Map<Value>,
}

impl Message {
    /// Constructs a `Message` with no named arguments.
    pub fn new(verb: Verb, args: Vec<Value>) -> Self {
        Self {verb, args: args.into_boxed_slice(), named: Map::new()}
    }

    /// Adds a named argument. A later value for the same `name` replaces an
    /// earlier one.
    pub fn with_named(mut self, name: &str, value: Value) -> Self {
        self.named.insert(name.into(), value);
        self
    }

    pub fn verb(&self) -> &str { self.verb.as_str() }

    pub fn args(&self) -> &[Value] { &self.args }

    pub fn named(&self) -> &Map<Value> { &self.named }

    /// The number of positional arguments.
    pub fn arity(&self) -> usize { self.args.len() }
}

// ----------------------------------------------------------------------------
