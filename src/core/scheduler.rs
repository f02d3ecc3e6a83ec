//! Deferred work for the page controllers.
//!
//! Controllers never sleep themselves. They hand a closure and a delay to a
//! [`Scheduler`]: the desktop app runs it on a Dioxus task, tests run it on a
//! manual clock.

use std::time::Duration;

pub type Task = Box<dyn FnOnce() + 'static>;

pub trait Scheduler {
    /// Run `task` once `delay` has elapsed.
    fn schedule_after(&self, delay: Duration, task: Task);
}

/// Runs tasks on the Dioxus runtime after a `tokio::time::sleep`.
/// Must be used from inside a component or a task spawned by one.
#[derive(Clone, Copy, Debug, Default)]
pub struct TaskScheduler;

impl Scheduler for TaskScheduler {
    fn schedule_after(&self, delay: Duration, task: Task) {
        dioxus::prelude::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            task();
        });
    }
}

/// Like [`TaskScheduler`], but the task belongs to the root scope and keeps
/// running after the component that scheduled it unmounts.
#[derive(Clone, Copy, Debug, Default)]
pub struct RootScheduler;

impl Scheduler for RootScheduler {
    fn schedule_after(&self, delay: Duration, task: Task) {
        let _ = dioxus::core::spawn_forever(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            task();
        });
    }
}

#[cfg(test)]
pub use manual::ManualScheduler;

#[cfg(test)]
mod manual {
    use super::{Scheduler, Task};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    struct Pending {
        deadline: Duration,
        seq: u64,
        task: Task,
    }

    #[derive(Default)]
    struct Clock {
        now: Duration,
        next_seq: u64,
        pending: Vec<Pending>,
    }

    /// Fake clock. Nothing runs until [`ManualScheduler::advance`].
    #[derive(Clone, Default)]
    pub struct ManualScheduler {
        clock: Rc<RefCell<Clock>>,
    }

    impl ManualScheduler {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn now(&self) -> Duration {
            self.clock.borrow().now
        }

        pub fn pending(&self) -> usize {
            self.clock.borrow().pending.len()
        }

        /// Move time forward, running due tasks in deadline order (ties in
        /// scheduling order). Tasks scheduled while advancing run too if
        /// they fall inside the window.
        pub fn advance(&self, by: Duration) {
            let target = self.now() + by;
            loop {
                let next = {
                    let mut clock = self.clock.borrow_mut();
                    let due = clock
                        .pending
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| p.deadline <= target)
                        .min_by_key(|(_, p)| (p.deadline, p.seq))
                        .map(|(index, _)| index);
                    match due {
                        Some(index) => {
                            let pending = clock.pending.swap_remove(index);
                            clock.now = pending.deadline;
                            Some(pending.task)
                        }
                        None => None,
                    }
                };
                match next {
                    Some(task) => task(),
                    None => break,
                }
            }
            self.clock.borrow_mut().now = target;
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule_after(&self, delay: Duration, task: Task) {
            let mut clock = self.clock.borrow_mut();
            let deadline = clock.now + delay;
            let seq = clock.next_seq;
            clock.next_seq += 1;
            clock.pending.push(Pending {
                deadline,
                seq,
                task,
            });
        }
    }
}
