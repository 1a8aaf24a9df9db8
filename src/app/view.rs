// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The layout is a navbar over a single centered feed column (composer on
//! top, then the posts). The search panel and toast notifications are
//! stacked overlays; the search panel's on-screen position matches the
//! region used for outside-press dismissal.

use super::Message;
use crate::api::Client;
use crate::feed::{FeedStore, LoadState};
use crate::i18n::fluent::I18n;
use crate::media::AvatarCache;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::theming::ThemeMode;
use crate::ui::{composer, navbar, notifications, post_card, search, styles};
use iced::widget::{button, container, scrollable, Column, Stack, Text};
use iced::{Element, Length, Padding};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub client: &'a Client,
    pub feed: &'a FeedStore,
    pub composer: &'a composer::State,
    pub search: &'a search::State,
    pub interactions: &'a post_card::Interactions,
    pub avatars: &'a AvatarCache,
    pub theme_mode: ThemeMode,
    pub notifications: &'a notifications::Manager,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let navbar = navbar::view(ctx.i18n, ctx.theme_mode, ctx.search.is_open()).map(Message::Navbar);

    let feed_column = Column::new()
        .push(ctx.composer.view(ctx.i18n).map(Message::Composer))
        .push(view_feed(&ctx))
        .spacing(spacing::MD)
        .max_width(sizing::FEED_COLUMN_WIDTH);

    let content = container(scrollable(
        container(feed_column)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(spacing::MD),
    ))
    .width(Length::Fill)
    .height(Length::Fill);

    let base = Column::new().push(navbar).push(content);

    let mut layers = Stack::new().push(base);

    if ctx.search.is_open() {
        let panel = container(ctx.search.view(ctx.avatars, ctx.i18n).map(Message::Search))
            .align_left(Length::Fill)
            .padding(Padding {
                top: sizing::NAVBAR_HEIGHT,
                right: 0.0,
                bottom: 0.0,
                left: spacing::MD,
            });
        layers = layers.push(panel);
    }

    if !ctx.notifications.is_empty() {
        let toasts = container(ctx.notifications.view(ctx.i18n).map(Message::Notification))
            .align_right(Length::Fill)
            .padding(Padding {
                top: sizing::NAVBAR_HEIGHT + spacing::SM,
                right: spacing::MD,
                bottom: 0.0,
                left: 0.0,
            });
        layers = layers.push(toasts);
    }

    layers.width(Length::Fill).height(Length::Fill).into()
}

fn view_feed<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    match ctx.feed.load_state() {
        LoadState::Loading => placeholder(
            Text::new(ctx.i18n.tr("feed-loading")).size(typography::BODY),
            None,
        ),
        LoadState::Unavailable => {
            let retry = button(Text::new(ctx.i18n.tr("feed-retry-button")).size(typography::BODY))
                .on_press(Message::RetryFeedPressed)
                .style(styles::button::primary)
                .padding([spacing::XXS, spacing::MD]);

            placeholder(
                Text::new(ctx.i18n.tr("feed-unavailable-title")).size(typography::TITLE_SM),
                Some(
                    Column::new()
                        .push(
                            Text::new(ctx.i18n.tr("feed-unavailable-hint"))
                                .size(typography::BODY_SM),
                        )
                        .push(retry)
                        .spacing(spacing::SM)
                        .align_x(iced::Alignment::Center)
                        .into(),
                ),
            )
        }
        LoadState::Loaded if ctx.feed.posts().is_empty() => placeholder(
            Text::new(ctx.i18n.tr("feed-empty-title")).size(typography::TITLE_SM),
            Some(
                Text::new(ctx.i18n.tr("feed-empty-hint"))
                    .size(typography::BODY_SM)
                    .into(),
            ),
        ),
        LoadState::Loaded => {
            let mut posts = Column::new().spacing(spacing::MD);
            for post in ctx.feed.posts() {
                posts = posts.push(
                    post_card::view(post, ctx.interactions, ctx.avatars, ctx.client, ctx.i18n)
                        .map(Message::PostCard),
                );
            }
            posts.into()
        }
    }
}

fn placeholder<'a>(
    title: Text<'a>,
    detail: Option<Element<'a, Message>>,
) -> Element<'a, Message> {
    let mut column = Column::new()
        .push(title)
        .spacing(spacing::SM)
        .align_x(iced::Alignment::Center);
    if let Some(detail) = detail {
        column = column.push(detail);
    }

    container(column)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .padding(spacing::XL)
        .into()
}
