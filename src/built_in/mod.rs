//! The objects every runtime starts with.

mod boolean;
pub use boolean::{true_object, false_object, wrap_bool, is_true};

mod ejector;
pub use ejector::{EjectorId, Ejector, escape, throw};

mod guard;
pub use guard::{Guard, coerce, guard_call, AnyGuard, PredicateGuard, int_guard, bool_guard};

mod slot;
pub use slot::{FinalSlot};

mod list;
pub use list::{ConstList, ListGuard, MakeList, make_list};
