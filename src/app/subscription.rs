// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Both subscriptions are conditional: global pointer events are routed
//! to the search panel only while it is open, and the notification timer
//! only runs while a toast is alive. When neither condition holds the
//! application sleeps with no subscriptions at all.

use super::Message;
use crate::ui::{notifications, search};
use iced::{event, mouse, time, Subscription};
use std::time::Duration;

pub fn subscription(search_open: bool, notifications_alive: bool) -> Subscription<Message> {
    let mut subscriptions = Vec::new();

    if search_open {
        subscriptions.push(event::listen_with(|event, _status, _window| match event {
            event::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                Some(Message::Search(search::Message::CursorMoved(position)))
            }
            event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                Some(Message::Search(search::Message::PointerPressed))
            }
            _ => None,
        }));
    }

    if notifications_alive {
        subscriptions.push(
            time::every(Duration::from_millis(500))
                .map(|_| Message::Notification(notifications::Message::Tick)),
        );
    }

    Subscription::batch(subscriptions)
}
