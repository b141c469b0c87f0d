use leptos::*;

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

/// Snackbar state shared by the form and screen view models. The shell
/// renders `current` and calls `dismiss` when the toast times out.
#[derive(Clone, Copy)]
pub struct NotificationState {
    pub current: RwSignal<Option<Notification>>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self {
            current: create_rw_signal(None),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Error);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(message, NotificationKind::Info);
    }

    pub fn dismiss(&self) {
        self.current.set(None);
    }

    fn show(&self, message: impl Into<String>, kind: NotificationKind) {
        self.current.set(Some(Notification {
            message: message.into(),
            kind,
        }));
    }
}

impl Default for NotificationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::with_runtime;

    #[test]
    fn latest_notification_wins_and_dismiss_clears() {
        with_runtime(|| {
            let notify = NotificationState::new();
            assert_eq!(notify.current.get_untracked(), None);

            notify.success("Пользователь успешно создан");
            notify.error("Ошибка");
            let current = notify.current.get_untracked().unwrap();
            assert_eq!(current.kind, NotificationKind::Error);
            assert_eq!(current.message, "Ошибка");

            notify.dismiss();
            assert_eq!(notify.current.get_untracked(), None);
        });
    }
}
