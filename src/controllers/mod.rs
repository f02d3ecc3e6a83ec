//! Page controllers.
//!
//! A controller feeds actions into a page's state, then runs the effects the
//! transition returned: timers through a [`Scheduler`](crate::core::scheduler::Scheduler),
//! dialogs and FFmpeg work through a host trait. Components own a controller
//! bound to their signals; tests bind one to plain cells and a fake clock.

mod editor;
mod upload;

pub use editor::*;
pub use upload::*;

use dioxus::prelude::*;

/// Shared mutable page state.
pub trait StateCell<T>: Clone + 'static {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R;
}

impl<T: 'static> StateCell<T> for Signal<T> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut signal = *self;
        signal.with_mut(f)
    }

    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.with(f)
    }
}

#[cfg(test)]
impl<T: 'static> StateCell<T> for std::rc::Rc<std::cell::RefCell<T>> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.borrow_mut())
    }

    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.borrow())
    }
}
