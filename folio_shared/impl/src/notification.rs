use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use chrono::{DateTime, TimeDelta, Utc};
use folio_models::notification::{
    ActiveNotification, NotificationId, NotificationKind, NotificationOptions,
};
use folio_shared_contracts::{notification::NotificationService, time::TimeService};
use folio_utils::trace_instrument;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct NotificationServiceImpl<Time> {
    time: Time,
    stack: Arc<Mutex<NotificationStack>>,
}

#[derive(Debug, Clone, Copy)]
pub struct NotificationServiceConfig {
    /// Maximum number of simultaneously visible notifications. A value of 0
    /// is treated as 1.
    pub limit: usize,
}

impl<Time> NotificationServiceImpl<Time> {
    pub fn new(time: Time, config: NotificationServiceConfig) -> Self {
        Self {
            time,
            stack: Arc::new(Mutex::new(NotificationStack::new(config.limit))),
        }
    }

    fn stack(&self) -> MutexGuard<'_, NotificationStack> {
        self.stack.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<Time> NotificationService for NotificationServiceImpl<Time>
where
    Time: TimeService,
{
    #[trace_instrument(skip(self, options))]
    fn notify(
        &self,
        kind: NotificationKind,
        text: String,
        options: NotificationOptions,
    ) -> NotificationId {
        let now = self.time.now();
        self.stack().push(now, kind, text, options)
    }

    #[trace_instrument(skip(self))]
    fn dismiss(&self, id: NotificationId) -> bool {
        let now = self.time.now();
        self.stack().dismiss(now, id)
    }

    fn pause(&self, id: NotificationId) {
        let now = self.time.now();
        self.stack().pause(now, id);
    }

    fn resume(&self, id: NotificationId) {
        let now = self.time.now();
        self.stack().resume(now, id);
    }

    fn pause_all(&self) {
        let now = self.time.now();
        self.stack().pause_all(now);
    }

    fn resume_all(&self) {
        let now = self.time.now();
        self.stack().resume_all(now);
    }

    fn visible(&self) -> Vec<ActiveNotification> {
        let now = self.time.now();
        self.stack().visible(now)
    }
}

/// Time driven stack of notifications.
///
/// Notifications are appended below the existing ones. At most `limit` are
/// visible at once; the rest wait in FIFO order and their countdown only
/// starts once they become visible.
#[derive(Debug)]
pub struct NotificationStack {
    limit: usize,
    next_id: u64,
    visible: Vec<Toast>,
    queued: VecDeque<Toast>,
}

#[derive(Debug, Clone)]
struct Toast {
    id: NotificationId,
    kind: NotificationKind,
    text: String,
    options: NotificationOptions,
    countdown: Countdown,
}

#[derive(Debug, Clone, Copy)]
enum Countdown {
    Queued,
    Running { deadline: DateTime<Utc> },
    Paused { remaining: Duration },
}

impl NotificationStack {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            next_id: 1,
            visible: Vec::new(),
            queued: VecDeque::new(),
        }
    }

    pub fn push(
        &mut self,
        now: DateTime<Utc>,
        kind: NotificationKind,
        text: String,
        options: NotificationOptions,
    ) -> NotificationId {
        self.expire(now);

        let id = NotificationId(self.next_id);
        self.next_id += 1;

        info!(%id, %kind, text = %text, "notification");

        self.queued.push_back(Toast {
            id,
            kind,
            text,
            options,
            countdown: Countdown::Queued,
        });
        self.promote(now);
        debug!(%id, queued = self.queued_len(), "notification pushed");

        id
    }

    pub fn dismiss(&mut self, now: DateTime<Utc>, id: NotificationId) -> bool {
        self.expire(now);

        let Some(index) = self
            .visible
            .iter()
            .position(|toast| toast.id == id && toast.options.dismissible)
        else {
            return false;
        };

        self.visible.remove(index);
        debug!(%id, "notification dismissed");
        self.promote(now);
        true
    }

    pub fn pause(&mut self, now: DateTime<Utc>, id: NotificationId) {
        self.expire(now);
        if let Some(toast) = self.visible_mut(id) {
            if toast.options.pause_on_hover {
                toast.pause(now);
            }
        }
    }

    pub fn resume(&mut self, now: DateTime<Utc>, id: NotificationId) {
        self.expire(now);
        if let Some(toast) = self.visible_mut(id) {
            toast.resume(now);
        }
    }

    pub fn pause_all(&mut self, now: DateTime<Utc>) {
        self.expire(now);
        self.visible.iter_mut().for_each(|toast| toast.pause(now));
    }

    pub fn resume_all(&mut self, now: DateTime<Utc>) {
        self.expire(now);
        self.visible.iter_mut().for_each(|toast| toast.resume(now));
    }

    pub fn visible(&mut self, now: DateTime<Utc>) -> Vec<ActiveNotification> {
        self.expire(now);
        self.visible
            .iter()
            .map(|toast| ActiveNotification {
                id: toast.id,
                kind: toast.kind,
                text: toast.text.clone(),
                position: toast.options.position,
                auto_close: toast.options.auto_close,
                remaining: toast.remaining(now),
                paused: matches!(toast.countdown, Countdown::Paused { .. }),
            })
            .collect()
    }

    pub fn queued_len(&self) -> usize {
        self.queued.len()
    }

    /// Removes expired notifications in deadline order. A queued notification
    /// that takes over a freed slot starts its countdown at the deadline of the
    /// notification it replaces.
    fn expire(&mut self, now: DateTime<Utc>) {
        loop {
            let next = self
                .visible
                .iter()
                .enumerate()
                .filter_map(|(index, toast)| match toast.countdown {
                    Countdown::Running { deadline } if deadline <= now => Some((index, deadline)),
                    _ => None,
                })
                .min_by_key(|&(_, deadline)| deadline);

            let Some((index, deadline)) = next else {
                break;
            };

            let toast = self.visible.remove(index);
            debug!(id = %toast.id, "notification expired");
            self.promote(deadline);
        }
    }

    fn promote(&mut self, started_at: DateTime<Utc>) {
        while self.visible.len() < self.limit {
            let Some(mut toast) = self.queued.pop_front() else {
                break;
            };
            toast.countdown = Countdown::Running {
                deadline: add(started_at, toast.options.auto_close),
            };
            self.visible.push(toast);
        }
    }

    fn visible_mut(&mut self, id: NotificationId) -> Option<&mut Toast> {
        self.visible.iter_mut().find(|toast| toast.id == id)
    }
}

impl Toast {
    fn remaining(&self, now: DateTime<Utc>) -> Duration {
        match self.countdown {
            Countdown::Queued => self.options.auto_close,
            Countdown::Running { deadline } => (deadline - now).to_std().unwrap_or_default(),
            Countdown::Paused { remaining } => remaining,
        }
    }

    fn pause(&mut self, now: DateTime<Utc>) {
        if let Countdown::Running { .. } = self.countdown {
            self.countdown = Countdown::Paused {
                remaining: self.remaining(now),
            };
        }
    }

    fn resume(&mut self, now: DateTime<Utc>) {
        if let Countdown::Paused { remaining } = self.countdown {
            self.countdown = Countdown::Running {
                deadline: add(now, remaining),
            };
        }
    }
}

fn add(time: DateTime<Utc>, duration: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(duration)
        .ok()
        .and_then(|delta| time.checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
