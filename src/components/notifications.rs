use dioxus::prelude::*;
use std::time::Duration;

use uuid::Uuid;

use crate::constants::*;
use crate::controllers::StateCell;
use crate::core::scheduler::{RootScheduler, Scheduler};
use crate::state::{Notice, NoticeLevel, NotificationQueue};

/// Pushes toasts and expires them after `ttl`.
#[derive(Clone, Copy, PartialEq)]
pub struct Notifier {
    pub queue: Signal<NotificationQueue>,
    pub ttl: Duration,
}

impl Notifier {
    pub fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::warn!("notice: {}", notice.message),
            _ => tracing::info!("notice: {}", notice.message),
        }
        // Pages raise notices but the toast stack outlives them.
        post_notice(&self.queue, &RootScheduler, self.ttl, notice);
    }
}

/// Push `notice` and schedule its dismissal after `ttl`.
fn post_notice<C, S>(queue: &C, scheduler: &S, ttl: Duration, notice: Notice) -> Uuid
where
    C: StateCell<NotificationQueue>,
    S: Scheduler,
{
    let id = queue.update(|queue| queue.push(notice));
    let expire = queue.clone();
    scheduler.schedule_after(ttl, Box::new(move || expire.update(|queue| queue.dismiss(id))));
    id
}

#[component]
pub fn Toasts(queue: Signal<NotificationQueue>) -> Element {
    let mut queue = queue;
    let items = queue.read().items().to_vec();

    rsx! {
        div {
            style: "
                position: fixed; top: 52px; right: 16px; z-index: 1000;
                display: flex; flex-direction: column; gap: 8px;
                width: {TOAST_WIDTH}px; pointer-events: none;
            ",
            for item in items {
                {
                    let accent = match item.notice.level {
                        NoticeLevel::Info => BORDER_STRONG,
                        NoticeLevel::Success => ACCENT,
                        NoticeLevel::Error => ERROR,
                    };
                    let id = item.id;
                    rsx! {
                        div {
                            key: "{id}",
                            style: "
                                pointer-events: auto; cursor: pointer;
                                padding: 10px 14px; border-radius: 8px;
                                background-color: {BG_ELEVATED}; color: {TEXT_PRIMARY};
                                border: 1px solid {BORDER_DEFAULT}; border-left: 3px solid {accent};
                                font-size: 12px; box-shadow: 0 8px 24px rgba(0,0,0,0.4);
                            ",
                            onclick: move |_| queue.write().dismiss(id),
                            "{item.notice.message}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheduler::ManualScheduler;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notice_expires_after_ttl() {
        let queue = Rc::new(RefCell::new(NotificationQueue::default()));
        let scheduler = ManualScheduler::new();
        let ttl = Duration::from_millis(3000);

        post_notice(&queue, &scheduler, ttl, Notice::info("Frame 1 selected"));
        scheduler.advance(Duration::from_millis(1000));
        post_notice(&queue, &scheduler, ttl, Notice::success("Video download started!"));
        assert_eq!(queue.borrow().items().len(), 2);

        scheduler.advance(Duration::from_millis(2000));
        let remaining: Vec<String> = queue
            .borrow()
            .items()
            .iter()
            .map(|item| item.notice.message.clone())
            .collect();
        assert_eq!(remaining, vec!["Video download started!".to_string()]);

        scheduler.advance(Duration::from_millis(1000));
        assert!(queue.borrow().items().is_empty());
        assert_eq!(scheduler.pending(), 0);
    }
}
