use std::any::{Any};
use std::{fmt};

use tracing::{debug, trace};

use super::error::{Error, Refusal, Result};
use super::model::{Message, Value, Verb};

/// Exposes a concrete type as [`Any`], so that a [`Value`] can be downcast.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any { self }
}

/// The call protocol: the only way to interact with an object.
///
/// An implementation matches the verb and arguments of `message` against a
/// fixed list of cases, first match wins, and must end with a case that
/// [`refuse`]s everything else.
///
/// The `Debug` rendering of an object is how it is named in errors.
pub trait Call: AsAny + fmt::Debug {
    fn call(&self, message: &Message) -> Result<Value>;
}

/// Fails with a [`Refusal`](crate::Refusal) naming `target` and `message`.
pub fn refuse<T>(target: &(impl fmt::Debug + ?Sized), message: &Message) -> Result<T> {
    Err(Error::refused(target, message))
}

// ----------------------------------------------------------------------------

/// Describes a call for an error trail.
fn frame(target: &Value, message: &Message) -> String {
    let args: Vec<String> = message.args().iter().map(|arg| format!("{:?}", arg)).collect();
    format!("In {:?}.{}/{} [{}]:", target, message.verb(), message.arity(), args.join(", "))
}

impl Value {
    /// Deliver `message` to `self`.
    ///
    /// `Int`, `Str` and `Tuple` values understand no verbs. A `Refused` or
    /// `WrongType` error passing out of this call records it in its trail.
    /// The failure is logged once, by the call where it started.
    pub fn call(&self, message: &Message) -> Result<Value> {
        trace!(receiver = ?self, verb = message.verb(), arity = message.arity(), "call");
        let result = match self {
            Value::Object(object) => object.call(message),
            _ => refuse(self, message),
        };
        result.map_err(|mut error| {
            if error.trail().map_or(false, |trail| trail.is_empty()) {
                debug!(receiver = ?self, verb = message.verb(), %error, "call failed");
            }
            if let Some(trail) = error.trail_mut() { trail.push(frame(self, message)); }
            error
        })
    }

    /// Deliver a message with no named arguments.
    ///
    /// Nothing understands the empty verb, so it is refused.
    pub fn send(&self, verb: &str, args: Vec<Value>) -> Result<Value> {
        match Verb::new(verb) {
            Some(verb) => self.call(&Message::new(verb, args)),
            None => Err(Refusal::new(self, verb, &args).into()),
        }
    }
}

// ----------------------------------------------------------------------------
