use folio_models::notification::{
    ActiveNotification, NotificationId, NotificationKind, NotificationOptions,
};

/// Presents transient, stacked status notifications to the user.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NotificationService: Send + Sync + 'static {
    /// Queue a notification for display. Never blocks and never fails.
    fn notify(
        &self,
        kind: NotificationKind,
        text: String,
        options: NotificationOptions,
    ) -> NotificationId;

    /// Close a notification before it expires.
    ///
    /// Returns `false` if the notification is unknown, already gone or not
    /// dismissible.
    fn dismiss(&self, id: NotificationId) -> bool;

    /// Suspend the countdown of a notification (pointer entered it).
    fn pause(&self, id: NotificationId);

    /// Resume the countdown of a notification (pointer left it).
    fn resume(&self, id: NotificationId);

    /// Suspend every countdown (the window lost focus).
    fn pause_all(&self);

    /// Resume every countdown (the window regained focus).
    fn resume_all(&self);

    /// Currently visible notifications, oldest first.
    fn visible(&self) -> Vec<ActiveNotification>;
}

#[cfg(feature = "mock")]
impl MockNotificationService {
    pub fn with_notify(
        mut self,
        event: folio_models::notification::NotificationEvent,
        options: NotificationOptions,
        id: NotificationId,
    ) -> Self {
        self.expect_notify()
            .once()
            .with(
                mockall::predicate::eq(event.kind()),
                mockall::predicate::eq(event.into_text()),
                mockall::predicate::eq(options),
            )
            .return_const(id);
        self
    }

    pub fn with_visible(mut self, visible: Vec<ActiveNotification>) -> Self {
        self.expect_visible().once().return_const(visible);
        self
    }
}
