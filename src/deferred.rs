//!
//! Queue for work that runs on the next turn of the event loop.
//!
//! The run loop drains the queue at the start of each turn, before it
//! waits for the next event. Each [Deferred] carries a weak liveness token
//! of its target and the generation at scheduling time. The target bumps
//! its generation whenever a pending task becomes obsolete, and dropping
//! the target kills the token. Such tasks are discarded instead of applied.
//!

use log::debug;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};

/// Liveness and generation of a target of deferred tasks.
///
/// Owned by the target. Not cloneable, the only strong reference
/// lives as long as the target.
#[derive(Default)]
pub struct LiveToken(Rc<Cell<u64>>);

impl LiveToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.0.get()
    }

    /// Invalidates all tasks scheduled so far.
    #[inline]
    pub fn bump(&self) {
        self.0.set(self.0.get().wrapping_add(1));
    }

    /// Create a task for the current generation.
    pub fn schedule(&self, text: String) -> Deferred {
        Deferred {
            token: Rc::downgrade(&self.0),
            generation: self.0.get(),
            text,
        }
    }
}

impl Debug for LiveToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LiveToken").field(&self.0.get()).finish()
    }
}

/// A pending display update.
#[derive(Clone)]
pub struct Deferred {
    token: Weak<Cell<u64>>,
    generation: u64,
    text: String,
}

impl Debug for Deferred {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("live", &self.is_live())
            .field("generation", &self.generation)
            .field("text", &self.text)
            .finish()
    }
}

impl Deferred {
    /// The target still exists.
    #[inline]
    pub fn is_live(&self) -> bool {
        self.token.strong_count() > 0
    }

    /// The target exists and nothing has invalidated this task.
    pub fn is_current(&self) -> bool {
        match self.token.upgrade() {
            Some(v) => v.get() == self.generation,
            None => false,
        }
    }

    /// Created by this token.
    #[inline]
    pub fn is_from(&self, token: &LiveToken) -> bool {
        Weak::as_ptr(&self.token) == Rc::as_ptr(&token.0)
    }

    /// Generation at scheduling time.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Text to show.
    #[inline]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }
}

/// Queue of deferred tasks.
///
/// Cloning gives another handle to the same queue.
#[derive(Debug, Default, Clone)]
pub struct DeferredQueue {
    queue: Rc<RefCell<VecDeque<Deferred>>>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// is empty
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// take the first task.
    pub fn take(&self) -> Option<Deferred> {
        self.queue.borrow_mut().pop_front()
    }

    /// push a new task to the queue.
    pub fn push(&self, task: Deferred) {
        debug!("deferred push {:?}", task);
        self.queue.borrow_mut().push_back(task);
    }

    /// Remove all tasks that can't be applied anymore.
    /// Returns the number of removed tasks.
    pub fn discard_dead(&self) -> usize {
        let mut queue = self.queue.borrow_mut();
        let before = queue.len();
        queue.retain(|v| {
            if v.is_current() {
                true
            } else {
                debug!("deferred discard {:?}", v);
                false
            }
        });
        before - queue.len()
    }
}
