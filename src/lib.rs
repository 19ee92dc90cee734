pub mod model;
pub use model::{Verb, Name, Map, Value, Message};

pub mod error;
pub use error::{Error, Result, Refusal, WrongType, InertFiring, Trail};

mod call;
pub use call::{AsAny, Call, refuse};

pub mod built_in;
pub use built_in::{
    true_object, false_object, wrap_bool, is_true,
    EjectorId, Ejector, escape, throw,
    Guard, coerce, guard_call, AnyGuard, PredicateGuard, int_guard, bool_guard,
    FinalSlot,
    ConstList, ListGuard, MakeList, make_list,
};
