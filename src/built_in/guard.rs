use std::{fmt};
use std::rc::{Rc};

use tracing::{debug};

use crate::{Call, Message, Result, Value, WrongType, refuse};
use super::{is_true, throw};

/// A constraint on values, such as a type.
///
/// Every guard answers the same verbs, via [`guard_call()`]:
/// - `coerce(specimen)` returns the admitted specimen or fails with a
///   `WrongType` error.
/// - `coerce(specimen, ejector)` returns the admitted specimen or fires
///   `ejector`.
pub trait Guard: Call {
    /// The name of the constraint, used in errors.
    fn name(&self) -> &str;

    /// Returns `specimen`, or a conversion of it, if it satisfies `self`.
    fn admit(&self, specimen: &Value) -> Option<Value>;
}

/// Checks `specimen` against `guard`.
///
/// If `specimen` is not admitted, fires `ejector` if there is one, and
/// otherwise fails with a `WrongType` error.
pub fn coerce(
    guard: &(impl Guard + ?Sized),
    specimen: &Value,
    ejector: Option<&Value>,
) -> Result<Value> {
    if let Some(admitted) = guard.admit(specimen) { return Ok(admitted); }
    debug!(guard = guard.name(), ?specimen, "coercion failed");
    let failure = WrongType::conform(specimen, guard.name());
    Err(match ejector {
        Some(ejector) => throw(ejector, Value::from(failure.reason)),
        None => failure.into(),
    })
}

/// Implements [`Call`] for a [`Guard`].
pub fn guard_call(guard: &(impl Guard + ?Sized), message: &Message) -> Result<Value> {
    match (message.verb(), message.args()) {
        ("coerce", [specimen]) => coerce(guard, specimen, None),
        ("coerce", [specimen, ejector]) => coerce(guard, specimen, Some(ejector)),
        _ => refuse(guard, message),
    }
}

// ----------------------------------------------------------------------------

/// The guard that admits everything unchanged.
#[derive(Default, Copy, Clone)]
pub struct AnyGuard;

impl fmt::Debug for AnyGuard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str("Any") }
}

impl Guard for AnyGuard {
    fn name(&self) -> &str { "Any" }

    fn admit(&self, specimen: &Value) -> Option<Value> { Some(specimen.clone()) }
}

impl Call for AnyGuard {
    fn call(&self, message: &Message) -> Result<Value> { guard_call(self, message) }
}

// ----------------------------------------------------------------------------

/// A guard that admits, unchanged, the specimens that satisfy a predicate.
#[derive(Clone)]
pub struct PredicateGuard {
    name: Rc<str>,
    predicate: fn(&Value) -> bool,
}

impl PredicateGuard {
    pub fn new(name: &str, predicate: fn(&Value) -> bool) -> Self {
        Self {name: name.into(), predicate}
    }
}

impl fmt::Debug for PredicateGuard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { f.write_str(&self.name) }
}

impl Guard for PredicateGuard {
    fn name(&self) -> &str { &self.name }

    fn admit(&self, specimen: &Value) -> Option<Value> {
        if (self.predicate)(specimen) { Some(specimen.clone()) } else { None }
    }
}

impl Call for PredicateGuard {
    fn call(&self, message: &Message) -> Result<Value> { guard_call(self, message) }
}

/// The guard `Int`, which admits exactly the [`Value::Int`]s.
pub fn int_guard() -> PredicateGuard {
    PredicateGuard::new("Int", |specimen| matches!(specimen, Value::Int(_)))
}

/// The guard `Bool`, which admits exactly the two boolean objects.
pub fn bool_guard() -> PredicateGuard {
    PredicateGuard::new("Bool", |specimen| is_true(specimen).is_ok())
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, escape, true_object, false_object, FinalSlot, ConstList};

    #[test]
    fn any_guard_admits_everything() {
        let guard = Value::object(AnyGuard);
        let specimens = [
            Value::Int(-1),
            Value::from("s"),
            true_object(),
            Value::object(ConstList::new(vec![Value::Int(1)])),
            Value::object(FinalSlot::new(Value::Int(2), guard.clone())),
        ];
        for specimen in specimens {
            let coerced = guard.send("coerce", vec![specimen.clone()]).expect("coerce");
            assert!(coerced.same(&specimen));
        }
    }

    #[test]
    fn int_guard_checks() {
        let guard = Value::object(int_guard());
        let coerced = guard.send("coerce", vec![Value::Int(7)]).expect("Int");
        assert!(coerced.same(&Value::Int(7)));
        for specimen in [Value::from("7"), Value::from(vec![Value::Int(7)]), false_object()] {
            let Err(Error::WrongType(wrong_type)) = guard.send("coerce", vec![specimen]) else {
                panic!("Int admitted a non-integer");
            };
            assert_eq!(wrong_type.constraint, "Int");
        }
    }

    #[test]
    fn bool_guard_checks_identity() {
        let guard = bool_guard();
        assert!(coerce(&guard, &true_object(), None).is_ok());
        assert!(coerce(&guard, &false_object(), None).is_ok());
        assert!(coerce(&guard, &Value::Int(1), None).is_err());
    }

    #[test]
    fn failure_fires_ejector() {
        let guard = Value::object(int_guard());
        let result = escape(|ej| {
            guard.send("coerce", vec![Value::from("nope"), ej.clone()])
        }).expect("no error");
        let payload = result.expect_err("ejected");
        assert_eq!(format!("{:?}", payload), "\"\\\"nope\\\" does not conform to Int\"");
    }

    #[test]
    fn spent_ejector_reports_the_rejection() {
        let guard = Value::object(int_guard());
        let error = escape(|ej| {
            let first = guard.send("coerce", vec![Value::from("a"), ej.clone()]).expect_err("a");
            assert!(matches!(first, Error::Ejecting {..}));
            guard.send("coerce", vec![Value::from("b"), ej.clone()])
        }).expect_err("inert");
        let Error::InertEjector(firing) = &error else { panic!("Not an InertEjector") };
        assert_eq!(format!("{:?}", firing.payload), "\"\\\"b\\\" does not conform to Int\"");
        let frames: Vec<&str> = error.trail().expect("trail").frames().collect();
        assert_eq!(frames.len(), 2);
        assert!(frames[0].starts_with("In <ejector (inert)>.run/1"));
        assert!(frames[1].starts_with("In Int.coerce/2 [\"b\", "));
        assert!(error.report().ends_with("with payload \"\\\"b\\\" does not conform to Int\""));
    }

    #[test]
    fn success_ignores_ejector() {
        let guard = Value::object(int_guard());
        let result = escape(|ej| {
            guard.send("coerce", vec![Value::Int(3), ej.clone()])
        }).expect("no error");
        assert!(result.expect("not ejected").same(&Value::Int(3)));
    }

    /// Answers `run` without escaping.
    #[derive(Debug)]
    struct Shrug;

    impl Call for Shrug {
        fn call(&self, message: &Message) -> Result<Value> {
            match message.verb() {
                "run" => Ok(Value::Int(0)),
                _ => refuse(self, message),
            }
        }
    }

    #[test]
    fn ejector_that_returns() {
        let shrug = Value::object(Shrug);
        let error = coerce(&int_guard(), &Value::from("x"), Some(&shrug)).expect_err("fails");
        let Error::WrongType(wrong_type) = error else { panic!("Not a WrongType") };
        assert_eq!(wrong_type.reason, "Ejector did not exit");
    }

    #[test]
    fn ejector_that_refuses() {
        let error = coerce(&int_guard(), &Value::from("x"), Some(&Value::Int(0)))
            .expect_err("fails");
        assert!(error.is_refusal());
    }

    #[test]
    fn guards_only_understand_coerce() {
        for guard in [Value::object(AnyGuard), Value::object(int_guard())] {
            assert!(guard.send("get", vec![]).expect_err("get").is_refusal());
            assert!(guard.send("coerce", vec![]).expect_err("coerce/0").is_refusal());
        }
    }
}
