// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for user feedback.
//!
//! The `Manager` handles queuing, display timing, and dismissal. At most
//! `MAX_VISIBLE` toasts are shown; the rest wait in a queue. Success and
//! info toasts auto-dismiss, errors stay until dismissed.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{radius, shadow, sizing, spacing, typography};
use iced::widget::{button, container, Column, Row, Text};
use iced::{Background, Border, Color, Element, Length};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Maximum number of notifications visible at once.
const MAX_VISIBLE: usize = 3;

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    fn next() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Severity level determines display duration and visual styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    fn color(self) -> Color {
        use crate::ui::design_tokens::palette;
        match self {
            Severity::Success => palette::SUCCESS_500,
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Auto-dismiss duration; `None` means manual dismiss (errors).
    fn auto_dismiss_duration(self) -> Option<Duration> {
        match self {
            Severity::Success | Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

/// A notification to be displayed to the user.
///
/// Carries an i18n key resolved at render time, so toasts pushed before a
/// locale switch still render in the active language.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    created_at: Instant,
}

impl Notification {
    #[must_use]
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::next(),
            severity,
            message_key: message_key.into(),
            created_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn success(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Success, message_key)
    }

    #[must_use]
    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    #[must_use]
    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    fn should_auto_dismiss(&self) -> bool {
        self.severity
            .auto_dismiss_duration()
            .is_some_and(|d| self.created_at.elapsed() >= d)
    }
}

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// Tick for checking auto-dismiss timers.
    Tick,
}

/// Manages the notification queue and visible notifications.
#[derive(Debug, Default)]
pub struct Manager {
    /// Currently visible notifications (newest first).
    visible: VecDeque<Notification>,
    /// Queued notifications waiting to be displayed.
    queue: VecDeque<Notification>,
}

impl Manager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.queue.is_empty()
    }

    #[must_use]
    pub fn visible(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    /// Pushes a new notification, displaying it immediately if there is
    /// room and queueing it otherwise.
    pub fn push(&mut self, notification: Notification) {
        if self.visible.len() < MAX_VISIBLE {
            self.visible.push_front(notification);
        } else {
            self.queue.push_back(notification);
        }
    }

    /// Dismisses a notification by its ID. Returns `true` if it was found.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        if let Some(pos) = self.visible.iter().position(|n| n.id() == id) {
            self.visible.remove(pos);
            self.promote_from_queue();
            return true;
        }
        if let Some(pos) = self.queue.iter().position(|n| n.id() == id) {
            self.queue.remove(pos);
            return true;
        }
        false
    }

    /// Dismisses expired notifications. Driven by a periodic subscription
    /// tick while any notification is alive.
    pub fn tick(&mut self) {
        let to_dismiss: Vec<NotificationId> = self
            .visible
            .iter()
            .filter(|n| n.should_auto_dismiss())
            .map(Notification::id)
            .collect();

        for id in to_dismiss {
            self.dismiss(id);
        }
    }

    pub fn handle(&mut self, message: Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(id);
            }
            Message::Tick => self.tick(),
        }
    }

    fn promote_from_queue(&mut self) {
        while self.visible.len() < MAX_VISIBLE {
            let Some(next) = self.queue.pop_front() else {
                break;
            };
            self.visible.push_front(next);
        }
    }

    /// Renders the visible toasts as a stacked column.
    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let mut column = Column::new().spacing(spacing::XS);

        for notification in &self.visible {
            let accent = notification.severity().color();
            let text = Text::new(i18n.tr(notification.message_key())).size(typography::BODY);
            let dismiss = button(Text::new("×").size(typography::BODY_LG))
                .on_press(Message::Dismiss(notification.id()))
                .padding(spacing::XXS);

            let row = Row::new()
                .push(container(text).width(Length::Fill).padding(spacing::XS))
                .push(dismiss)
                .align_y(iced::Alignment::Center);

            let toast = container(row)
                .width(sizing::TOAST_WIDTH)
                .padding(spacing::XS)
                .style(move |theme: &iced::Theme| {
                    let scheme = crate::ui::theming::ColorScheme::for_theme(theme);
                    container::Style {
                        background: Some(Background::Color(scheme.surface_secondary)),
                        border: Border {
                            color: accent,
                            width: 2.0,
                            radius: radius::MD.into(),
                        },
                        shadow: shadow::MD,
                        ..Default::default()
                    }
                });

            column = column.push(toast);
        }

        column.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_displays_up_to_max_then_queues() {
        let mut manager = Manager::new();
        for _ in 0..MAX_VISIBLE + 2 {
            manager.push(Notification::success("notification-post-created"));
        }
        assert_eq!(manager.visible().count(), MAX_VISIBLE);
        assert!(!manager.is_empty());
    }

    #[test]
    fn dismiss_promotes_from_queue() {
        let mut manager = Manager::new();
        let mut ids = Vec::new();
        for _ in 0..MAX_VISIBLE + 1 {
            let n = Notification::success("notification-post-created");
            ids.push(n.id());
            manager.push(n);
        }

        assert!(manager.dismiss(ids[0]));
        assert_eq!(manager.visible().count(), MAX_VISIBLE);
    }

    #[test]
    fn dismiss_unknown_id_is_false() {
        let mut manager = Manager::new();
        let n = Notification::success("notification-post-created");
        let id = n.id();
        manager.push(n);
        assert!(manager.dismiss(id));
        assert!(!manager.dismiss(id));
    }

    #[test]
    fn errors_do_not_auto_dismiss() {
        let mut manager = Manager::new();
        manager.push(Notification::error("error-network"));
        manager.tick();
        assert_eq!(manager.visible().count(), 1);
    }
}
