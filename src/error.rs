//! The ways a call can fail to return a value.
//!
//! A [`Refusal`] means the target does not understand the verb. A
//! [`WrongType`] means a value did not satisfy a guard or the truth
//! predicate. An ejection is not a failure: it carries a payload back to the
//! [`escape`](crate::escape) that created the ejector.

use std::{fmt};
use std::rc::{Rc};

use arrayvec::{ArrayVec};
use thiserror::{Error};

use super::model::{Message, Value};
use super::built_in::{EjectorId};

/// The maximum number of call frames recorded in a [`Trail`].
pub const TRAIL_DEPTH: usize = 16;

/// The call frames an error has propagated through, innermost first.
///
/// Frames beyond [`TRAIL_DEPTH`] are counted but not stored.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    frames: ArrayVec<Rc<str>, TRAIL_DEPTH>,
    elided: usize,
}

impl Trail {
    /// Record that the error passed out of another call.
    pub fn push(&mut self, frame: impl Into<Rc<str>>) {
        if self.frames.try_push(frame.into()).is_err() { self.elided += 1; }
    }

    /// The recorded frames, innermost first.
    pub fn frames(&self) -> impl Iterator<Item=&str> { self.frames.iter().map(|frame| &**frame) }

    /// The number of frames that were not recorded.
    pub fn elided(&self) -> usize { self.elided }

    pub fn len(&self) -> usize { self.frames.len() + self.elided }

    pub fn is_empty(&self) -> bool { self.len() == 0 }
}

// ----------------------------------------------------------------------------

/// An object was sent a message it does not understand.
#[derive(Debug, Clone)]
pub struct Refusal {
    /// A description of the object that refused.
    pub target: String,

    /// The verb that was not understood. Empty if the caller supplied an
    /// empty verb.
    pub verb: String,

    /// Descriptions of the positional arguments.
    pub args: Vec<String>,

    pub trail: Trail,
}

impl Refusal {
    pub fn new(target: &(impl fmt::Debug + ?Sized), verb: &str, args: &[Value]) -> Self {
        Self {
            target: format!("{:?}", target),
            verb: verb.into(),
            args: args.iter().map(|arg| format!("{:?}", arg)).collect(),
            trail: Trail::default(),
        }
    }
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Message refused: ({}, {}, [{}])", self.target, self.verb, self.args.join(", "))
    }
}

/// A value did not conform to a constraint.
#[derive(Debug, Clone)]
pub struct WrongType {
    /// A description of the offending value.
    pub specimen: String,

    /// The name of the constraint, e.g. a guard name.
    pub constraint: String,

    /// What went wrong.
    pub reason: String,

    pub trail: Trail,
}

impl WrongType {
    /// `specimen` does not conform to the constraint called `constraint`.
    pub fn conform(specimen: &Value, constraint: &str) -> Self {
        let specimen = format!("{:?}", specimen);
        let reason = format!("{} does not conform to {}", specimen, constraint);
        Self {specimen, constraint: constraint.into(), reason, trail: Trail::default()}
    }

    /// A failure about `specimen` that is not a simple non-conformance.
    pub fn other(specimen: &Value, constraint: &str, reason: impl Into<String>) -> Self {
        Self {
            specimen: format!("{:?}", specimen),
            constraint: constraint.into(),
            reason: reason.into(),
            trail: Trail::default(),
        }
    }
}

impl fmt::Display for WrongType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Object was wrong type: {}", self.reason)
    }
}

/// An ejector fired after it had already fired or after its `escape`
/// returned.
#[derive(Debug, Clone)]
pub struct InertFiring {
    /// A description of the ejector.
    pub ejector: String,

    /// What it was fired with. For a guard failure, the reason the specimen
    /// was rejected.
    pub payload: Value,

    pub trail: Trail,
}

impl InertFiring {
    pub fn new(ejector: &(impl fmt::Debug + ?Sized), payload: Value) -> Self {
        Self {ejector: format!("{:?}", ejector), payload, trail: Trail::default()}
    }
}

impl fmt::Display for InertFiring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} fired outside its extent with payload {:?}", self.ejector, self.payload)
    }
}

// ----------------------------------------------------------------------------

/// The reasons a call did not return a value.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Refused(Box<Refusal>),

    #[error("{0}")]
    WrongType(Box<WrongType>),

    /// An ejector fired, and control is returning to its `escape`.
    #[error("Ejector fired with payload {payload:?}")]
    Ejecting { ejector: EjectorId, payload: Value },

    #[error("{0}")]
    InertEjector(Box<InertFiring>),
}

impl Error {
    /// `target` does not understand `message`.
    pub fn refused(target: &(impl fmt::Debug + ?Sized), message: &Message) -> Self {
        Refusal::new(target, message.verb(), message.args()).into()
    }

    /// `specimen` does not conform to the constraint called `constraint`.
    pub fn wrong_type(specimen: &Value, constraint: &str) -> Self {
        WrongType::conform(specimen, constraint).into()
    }

    pub fn is_refusal(&self) -> bool { matches!(self, Self::Refused(_)) }

    pub fn is_wrong_type(&self) -> bool { matches!(self, Self::WrongType(_)) }

    /// The trail of any error except an ejection in flight.
    pub fn trail(&self) -> Option<&Trail> {
        match self {
            Self::Refused(refusal) => Some(&refusal.trail),
            Self::WrongType(wrong_type) => Some(&wrong_type.trail),
            Self::InertEjector(firing) => Some(&firing.trail),
            Self::Ejecting {..} => None,
        }
    }

    pub fn trail_mut(&mut self) -> Option<&mut Trail> {
        match self {
            Self::Refused(refusal) => Some(&mut refusal.trail),
            Self::WrongType(wrong_type) => Some(&mut wrong_type.trail),
            Self::InertEjector(firing) => Some(&mut firing.trail),
            Self::Ejecting {..} => None,
        }
    }

    /// Renders `self` for a user, outermost call first and the error last.
    pub fn report(&self) -> String {
        let mut lines = vec![String::from("Exception in user code:")];
        if let Some(trail) = self.trail() {
            if trail.elided() > 0 {
                lines.push(format!("({} outer frames not shown)", trail.elided()));
            }
            let mut frames: Vec<&str> = trail.frames().collect();
            frames.reverse();
            lines.extend(frames.into_iter().map(String::from));
        }
        lines.push(format!("Error: {}", self));
        lines.join("\n")
    }
}

impl From<Refusal> for Error {
    fn from(refusal: Refusal) -> Self { Self::Refused(Box::new(refusal)) }
}

impl From<WrongType> for Error {
    fn from(wrong_type: WrongType) -> Self { Self::WrongType(Box::new(wrong_type)) }
}

impl From<InertFiring> for Error {
    fn from(firing: InertFiring) -> Self { Self::InertEjector(Box::new(firing)) }
}

/// A `T` or an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

// ----------------------------------------------------------------------------
