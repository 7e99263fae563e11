#![doc = include_str!("../readme.md")]
#![allow(clippy::collapsible_else_if)]

pub mod deferred;
pub mod formatter;
pub mod number;
pub mod number_field;
pub mod tip;

pub use pure_rust_locales::Locale;
pub use rat_text::HasScreenCursor;

pub mod event {
    //! Event-handler traits and outcomes.
    pub use crate::number_field::event::NumberFieldOutcome;
    pub use rat_event::*;
    pub use rat_text::event::{ReadOnly, TextOutcome};
}

pub mod focus {
    //! Focus handling.
    pub use rat_focus::{handle_focus, Focus, FocusBuilder, FocusFlag, HasFocus};
}

use std::cell::Cell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// The bound value of a number field.
///
/// This is the shared, caller-owned `Option<f64>` the field writes on
/// every keystroke. Cloning the binding clones the handle, not the value,
/// so the parent keeps one clone and hands another to the field.
///
/// `None` covers both an empty field and text that doesn't parse.
#[derive(Clone, Default)]
pub struct Binding(Rc<Cell<Option<f64>>>);

impl Binding {
    /// New binding with an initial value.
    pub fn new(value: Option<f64>) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> Option<f64> {
        self.0.get()
    }

    /// Replace the value.
    #[inline]
    pub fn set(&self, value: Option<f64>) {
        self.0.set(value);
    }

    /// Is this the same binding?
    #[inline]
    pub fn ptr_eq(&self, other: &Binding) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Binding").field(&self.0.get()).finish()
    }
}

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
