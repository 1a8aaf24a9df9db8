// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the feed, composer,
//! search, and notification components.
//!
//! The `App` struct wires the domains together and translates component
//! events into side effects like network requests or persistence. Policy
//! decisions (window sizing, persistence format, locale switching) stay
//! close to the main update loop so user-facing behavior is easy to
//! audit.

pub mod config;
mod message;
pub mod paths;
pub mod persisted_state;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::api::Client;
use crate::feed::FeedStore;
use crate::i18n::fluent::I18n;
use crate::media::AvatarCache;
use crate::ui::theming::ThemeMode;
use crate::ui::{composer, notifications, post_card, search};
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 700;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 480;

/// Root Iced application state bridging UI components, localization, and
/// persisted preferences.
pub struct App {
    pub i18n: I18n,
    client: Client,
    config: config::Config,
    /// Persisted session: credential and last media-picker directory.
    session: persisted_state::SessionState,
    feed: FeedStore,
    composer: composer::State,
    search: search::State,
    interactions: post_card::Interactions,
    /// Fetched avatar images, shared by the feed and the search panel.
    avatars: AvatarCache,
    theme_mode: ThemeMode,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("feed_state", &self.feed.load_state())
            .field("post_count", &self.feed.posts().len())
            .finish()
    }
}

fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait bound
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            i18n: I18n::default(),
            client: Client::new(crate::api::DEFAULT_API_BASE_URL),
            config: config::Config::default(),
            session: persisted_state::SessionState::default(),
            feed: FeedStore::new(),
            composer: composer::State::new(),
            search: search::State::new(),
            interactions: post_card::Interactions::new(),
            avatars: AvatarCache::new(),
            theme_mode: ThemeMode::System,
            notifications: notifications::Manager::new(),
        }
    }
}

impl App {
    /// Initializes application state from config and persisted session,
    /// then kicks off the initial feed fetch.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), &config);

        let base_url = flags
            .api_url
            .unwrap_or_else(|| config.network.api_base_url.clone());

        let mut app = App {
            i18n,
            client: Client::new(base_url),
            theme_mode: config.general.theme_mode,
            config,
            ..Self::default()
        };

        let (session, state_warning) = persisted_state::SessionState::load();
        app.session = session;

        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(key));
        }
        if let Some(key) = state_warning {
            app.notifications
                .push(notifications::Notification::warning(key));
        }

        let task = update::fetch_feed(&app.client);
        (app, task)
    }

    fn title(&self) -> String {
        self.i18n.tr("app-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.iced_theme()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(
            update::UpdateContext {
                i18n: &self.i18n,
                client: &self.client,
                config: &mut self.config,
                session: &mut self.session,
                feed: &mut self.feed,
                composer: &mut self.composer,
                search: &mut self.search,
                interactions: &mut self.interactions,
                avatars: &mut self.avatars,
                theme_mode: &mut self.theme_mode,
                notifications: &mut self.notifications,
            },
            message,
        )
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            client: &self.client,
            feed: &self.feed,
            composer: &self.composer,
            search: &self.search,
            interactions: &self.interactions,
            avatars: &self.avatars,
            theme_mode: self.theme_mode,
            notifications: &self.notifications,
        })
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::subscription(self.search.is_open(), !self.notifications.is_empty())
    }
}
