// SPDX-License-Identifier: MPL-2.0
//! Update logic for the application.
//!
//! Component updates return events; this module translates events into
//! side effects (network tasks, store mutations, persistence) and toast
//! notifications. The feed store is only ever mutated here, from
//! server-confirmed outcomes.

use super::{config, persisted_state::SessionState, Message};
use crate::api::Client;
use crate::feed::FeedStore;
use crate::i18n::fluent::I18n;
use crate::media::AvatarCache;
use crate::ui::theming::ThemeMode;
use crate::ui::{composer, navbar, notifications, post_card, search};
use iced::Task;
use std::path::PathBuf;

/// Mutable application state handed to the update loop.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub client: &'a Client,
    pub config: &'a mut config::Config,
    pub session: &'a mut SessionState,
    pub feed: &'a mut FeedStore,
    pub composer: &'a mut composer::State,
    pub search: &'a mut search::State,
    pub interactions: &'a mut post_card::Interactions,
    pub avatars: &'a mut AvatarCache,
    pub theme_mode: &'a mut ThemeMode,
    pub notifications: &'a mut notifications::Manager,
}

pub fn update(ctx: UpdateContext<'_>, message: Message) -> Task<Message> {
    match message {
        Message::Composer(msg) => update_composer(ctx, msg),
        Message::Search(msg) => update_search(ctx, msg),
        Message::PostCard(msg) => update_post_card(ctx, msg),
        Message::Navbar(msg) => update_navbar(ctx, msg),
        Message::Notification(msg) => {
            ctx.notifications.handle(msg);
            Task::none()
        }
        Message::FeedLoaded(result) => match result {
            Ok(posts) => {
                let fetches = fetch_avatars(
                    ctx.avatars,
                    ctx.client,
                    posts.iter().filter_map(|post| post.author.avatar.as_deref()),
                );
                ctx.feed.set_loaded(posts);
                fetches
            }
            Err(err) => {
                eprintln!("feed: {err}");
                ctx.feed.set_unavailable();
                Task::none()
            }
        },
        Message::RetryFeedPressed => {
            ctx.feed.set_loading();
            fetch_feed(ctx.client)
        }
        Message::AvatarFetched { path, result } => {
            match result {
                Ok(bytes) => ctx.avatars.insert(path, bytes),
                Err(err) => {
                    eprintln!("avatar: {err}");
                    ctx.avatars.mark_failed(&path);
                }
            }
            Task::none()
        }
    }
}

/// Queues one fetch task per avatar path not yet cached or in flight.
fn fetch_avatars<'a>(
    avatars: &mut AvatarCache,
    client: &Client,
    paths: impl IntoIterator<Item = &'a str>,
) -> Task<Message> {
    Task::batch(avatars.request(paths).into_iter().map(|path| {
        let client = client.clone();
        let request_path = path.clone();
        Task::perform(
            async move { client.fetch_asset(request_path).await },
            move |result| Message::AvatarFetched {
                path: path.clone(),
                result,
            },
        )
    }))
}

/// Initial and retried feed fetch.
pub fn fetch_feed(client: &Client) -> Task<Message> {
    let client = client.clone();
    Task::perform(
        async move { client.fetch_feed().await },
        Message::FeedLoaded,
    )
}

fn update_composer(ctx: UpdateContext<'_>, msg: composer::Message) -> Task<Message> {
    // Remember the directory of picked files for the next dialog.
    if let composer::Message::FilesPicked(Some(paths)) = &msg {
        if let Some(dir) = paths.first().and_then(|p| p.parent()) {
            ctx.session.last_media_directory = Some(dir.to_path_buf());
            if let Some(key) = ctx.session.save() {
                ctx.notifications
                    .push(notifications::Notification::warning(key));
            }
        }
    }

    match ctx.composer.update(msg) {
        composer::Event::None => Task::none(),
        composer::Event::PickFiles => pick_files(ctx.session.last_media_directory.clone()),
        composer::Event::Submit { content, media } => {
            let client = ctx.client.clone();
            Task::perform(
                async move { client.create_post(content, media).await },
                |result| Message::Composer(composer::Message::SubmitResolved(result)),
            )
        }
        composer::Event::Posted(post) => {
            let fetches = fetch_avatars(ctx.avatars, ctx.client, post.author.avatar.as_deref());
            if let Err(err) = ctx.feed.prepend(*post) {
                eprintln!("feed: {err}");
            }
            ctx.notifications
                .push(notifications::Notification::success(
                    "notification-post-created",
                ));
            fetches
        }
        composer::Event::Failed(err) => {
            ctx.notifications
                .push(notifications::Notification::error(err.i18n_key()));
            Task::none()
        }
    }
}

fn pick_files(start_dir: Option<PathBuf>) -> Task<Message> {
    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new().add_filter(
                "Media",
                &[
                    "png", "jpg", "jpeg", "gif", "webp", "bmp", "mp4", "mov", "avi", "mkv",
                    "webm", "m4v",
                ],
            );
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            dialog.pick_files().await.map(|files| {
                files
                    .into_iter()
                    .map(|file| file.path().to_path_buf())
                    .collect()
            })
        },
        |paths| Message::Composer(composer::Message::FilesPicked(paths)),
    )
}

fn update_search(ctx: UpdateContext<'_>, msg: search::Message) -> Task<Message> {
    let results_resolved = matches!(msg, search::Message::ResultsReceived { .. });
    match ctx.search.update(msg) {
        // A resolved response may carry authors whose avatars are not
        // cached yet.
        search::Event::None if results_resolved => fetch_avatars(
            ctx.avatars,
            ctx.client,
            ctx.search
                .results()
                .iter()
                .filter_map(|result| result.avatar.as_deref()),
        ),
        search::Event::None => Task::none(),
        search::Event::Search { generation, query } => {
            let client = ctx.client.clone();
            let token = ctx.session.auth_token.clone();
            Task::perform(
                async move { client.search_users(query, token).await },
                move |result| {
                    Message::Search(search::Message::ResultsReceived { generation, result })
                },
            )
        }
        search::Event::ResultChosen(id) => {
            // Profile navigation is not part of this client yet.
            eprintln!("search: chose user {id}");
            Task::none()
        }
    }
}

fn update_post_card(ctx: UpdateContext<'_>, msg: post_card::Message) -> Task<Message> {
    match ctx.interactions.update(msg) {
        post_card::Event::None => Task::none(),
        post_card::Event::Like(id) => {
            let client = ctx.client.clone();
            let request_id = id.clone();
            Task::perform(
                async move { client.like_post(request_id).await },
                move |result| Message::PostCard(post_card::Message::LikeResolved(id.clone(), result)),
            )
        }
        post_card::Event::Delete(id) => {
            let client = ctx.client.clone();
            let request_id = id.clone();
            Task::perform(
                async move { client.delete_post(request_id).await },
                move |result| {
                    Message::PostCard(post_card::Message::DeleteResolved(id.clone(), result))
                },
            )
        }
        post_card::Event::Liked {
            id,
            liked,
            like_count,
        } => {
            // A post deleted while the like was in flight is a no-op.
            ctx.feed.apply_like_update(&id, liked, like_count);
            Task::none()
        }
        post_card::Event::Deleted(id) => {
            if let Err(err) = ctx.feed.remove_by_id(&id) {
                eprintln!("feed: {err}");
            } else {
                ctx.notifications
                    .push(notifications::Notification::success(
                        "notification-post-deleted",
                    ));
            }
            Task::none()
        }
        post_card::Event::Failed(err) => {
            ctx.notifications
                .push(notifications::Notification::error(err.i18n_key()));
            Task::none()
        }
    }
}

fn update_navbar(ctx: UpdateContext<'_>, msg: navbar::Message) -> Task<Message> {
    match msg {
        navbar::Message::SearchToggled => {
            ctx.search.update(search::Message::Toggle);
            Task::none()
        }
        navbar::Message::ThemeToggled => {
            *ctx.theme_mode = ctx.theme_mode.toggled();
            ctx.config.general.theme_mode = *ctx.theme_mode;
            if let Err(err) = config::save(ctx.config) {
                eprintln!("config: {err}");
                ctx.notifications
                    .push(notifications::Notification::warning(
                        "notification-config-save-error",
                    ));
            }
            Task::none()
        }
        navbar::Message::LogoutPressed => {
            ctx.session.auth_token = None;
            if let Some(key) = ctx.session.save() {
                ctx.notifications
                    .push(notifications::Notification::warning(key));
            }
            ctx.search.close();
            Task::none()
        }
    }
}
