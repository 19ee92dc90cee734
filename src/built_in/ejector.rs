use std::cell::{Cell};
use std::{fmt};
use std::rc::{Rc};

use tracing::{debug};

use crate::{Call, Message, Result, Value, Error, WrongType, InertFiring, refuse};

/// Distinguishes the [`Ejector`]s created on one thread.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub struct EjectorId(u64);

impl EjectorId {
    fn fresh() -> Self {
        thread_local! { static NEXT: Cell<u64> = Cell::new(0); }
        NEXT.with(|next| {
            let id = next.get();
            next.set(id + 1);
            Self(id)
        })
    }
}

/// A one-shot escape back to the [`escape`] that created it.
///
/// Firing an `Ejector` ends the `escape` body early with a payload. An
/// `Ejector` fires at most once, and not at all once its `escape` has
/// returned.
///
/// Verbs:
/// - `run()` fires with an empty payload.
/// - `run(payload)` fires with `payload`.
pub struct Ejector {
    id: EjectorId,
    active: Cell<bool>,
}

impl Ejector {
    fn new() -> Self { Self {id: EjectorId::fresh(), active: Cell::new(true)} }

    pub fn id(&self) -> EjectorId { self.id }

    pub fn is_active(&self) -> bool { self.active.get() }

    /// Make `self` inert, and return the error that carries `payload` back to
    /// the `escape`.
    pub fn fire(&self, payload: Value) -> Error {
        if self.active.replace(false) {
            debug!(ejector = ?self.id, ?payload, "ejector fired");
            Error::Ejecting {ejector: self.id, payload}
        } else {
            debug!(ejector = ?self.id, ?payload, "inert ejector fired");
            InertFiring::new(self, payload).into()
        }
    }
}

impl fmt::Debug for Ejector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(if self.is_active() { "<ejector>" } else { "<ejector (inert)>" })
    }
}

impl Call for Ejector {
    fn call(&self, message: &Message) -> Result<Value> {
        match (message.verb(), message.args()) {
            ("run", []) => Err(self.fire(Value::from(""))),
            ("run", [payload]) => Err(self.fire(payload.clone())),
            _ => refuse(self, message),
        }
    }
}

// ----------------------------------------------------------------------------

/// Runs `body`, passing it a fresh ejector.
///
/// Returns `Ok(Ok(value))` if `body` returns `value`, and `Ok(Err(payload))`
/// if the ejector fired with `payload`. Any other error, including the
/// firing of some other ejector, is passed on. The ejector is inert after
/// this returns.
pub fn escape(body: impl FnOnce(&Value) -> Result<Value>)
-> Result<std::result::Result<Value, Value>> {
    let ejector = Rc::new(Ejector::new());
    let id = ejector.id;
    let result = body(&Value::Object(ejector.clone()));
    ejector.active.set(false);
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(Error::Ejecting {ejector, payload}) if ejector == id => Ok(Err(payload)),
        Err(error) => Err(error),
    }
}

/// Fires `ejector` with `payload`, and returns the resulting error.
///
/// `ejector` can be any object; it is sent `run(payload)`. If it returns
/// normally instead of escaping, that is an error in its own right.
pub fn throw(ejector: &Value, payload: Value) -> Error {
    match ejector.send("run", vec![payload]) {
        Err(error) => error,
        Ok(_) => WrongType::other(ejector, "Ejector", "Ejector did not exit").into(),
    }
}

// ----------------------------------------------------------------------------
