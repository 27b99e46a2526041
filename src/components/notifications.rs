//! Notifications Component
//!
//! Non-blocking toasts for transport failures and short confirmations.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Info => "carify-toast info",
            NoticeKind::Error => "carify-toast error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub text: String,
}

/// Visible toasts in arrival order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeQueue {
    notices: Vec<Notice>,
    next_id: u32,
}

impl NoticeQueue {
    /// Append a toast; returns its id
    pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.push(Notice { id, kind, text: text.into() });
        id
    }

    /// Remove the toast with `id`; returns whether it was still shown
    pub fn dismiss(&mut self, id: u32) -> bool {
        let before = self.notices.len();
        self.notices.retain(|notice| notice.id != id);
        self.notices.len() != before
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

/// Handle for pushing toasts
#[derive(Clone, Copy)]
pub struct Notifier {
    queue: RwSignal<NoticeQueue>,
    timeout_ms: u32,
}

impl Notifier {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            queue: RwSignal::new(NoticeQueue::default()),
            timeout_ms,
        }
    }

    pub fn push(&self, kind: NoticeKind, text: impl Into<String>) {
        let text = text.into();
        let Some(id) = self.queue.try_update(|q| q.push(kind, text)) else {
            return;
        };
        let this = *self;
        Timeout::new(self.timeout_ms, move || this.dismiss(id)).forget();
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeKind::Error, text);
    }

    pub fn dismiss(&self, id: u32) {
        self.queue.update(|q| {
            q.dismiss(id);
        });
    }
}

/// Toast stack; click a toast to dismiss it early
#[component]
pub fn Notifications(notifier: Notifier) -> impl IntoView {
    view! {
        <div class="carify-toasts" aria-live="polite">
            <For
                each=move || notifier.queue.with(|q| q.notices().to_vec())
                key=|notice| notice.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.kind.class() role="status" on:click=move |_| notifier.dismiss(id)>
                            {notice.text}
                        </div>
                    }
                }
            />
        </div>
    }
}
