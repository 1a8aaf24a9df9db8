// SPDX-License-Identifier: MPL-2.0
//! Feed post cards and their like/delete interactions.
//!
//! `Interactions` tracks which posts have an unresolved like or delete
//! request, so a card's action buttons disable while its own request is
//! in flight without blocking the rest of the feed. Confirmed outcomes
//! are reported as events; the feed store applies them.

use crate::api::{Client, LikeOutcome};
use crate::domain::{MediaKind, Post, PostId};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::media::AvatarCache;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, image, Column, Row, Text};
use iced::{Element, Length};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub enum Message {
    LikePressed(PostId),
    DeletePressed(PostId),
    LikeResolved(PostId, Result<LikeOutcome, Error>),
    DeleteResolved(PostId, Result<(), Error>),
}

/// Side effects and confirmed outcomes for the application to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Issue the like/unlike request for this post.
    Like(PostId),
    /// Issue the delete request for this post.
    Delete(PostId),
    /// Server-confirmed like state; apply to the store.
    Liked {
        id: PostId,
        liked: bool,
        like_count: u32,
    },
    /// Server-confirmed deletion; remove from the store.
    Deleted(PostId),
    Failed(Error),
}

/// In-flight like/delete requests, keyed by post.
#[derive(Debug, Default)]
pub struct Interactions {
    liking: HashSet<PostId>,
    deleting: HashSet<PostId>,
}

impl Interactions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The post has an unresolved request of either kind.
    #[must_use]
    pub fn is_busy(&self, id: &PostId) -> bool {
        self.liking.contains(id) || self.deleting.contains(id)
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::LikePressed(id) => {
                if self.is_busy(&id) {
                    return Event::None;
                }
                self.liking.insert(id.clone());
                Event::Like(id)
            }
            Message::DeletePressed(id) => {
                if self.is_busy(&id) {
                    return Event::None;
                }
                self.deleting.insert(id.clone());
                Event::Delete(id)
            }
            Message::LikeResolved(id, result) => {
                self.liking.remove(&id);
                match result {
                    Ok(outcome) => Event::Liked {
                        id,
                        liked: outcome.liked_by_current_user,
                        like_count: outcome.like_count,
                    },
                    Err(err) => Event::Failed(err),
                }
            }
            Message::DeleteResolved(id, result) => {
                self.deleting.remove(&id);
                match result {
                    Ok(()) => Event::Deleted(id),
                    Err(err) => Event::Failed(err),
                }
            }
        }
    }
}

/// Renders one feed post as a card.
pub fn view<'a>(
    post: &'a Post,
    interactions: &Interactions,
    avatars: &AvatarCache,
    client: &Client,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let busy = interactions.is_busy(&post.id);

    // Fetched avatar image when available, placeholder initial until then.
    let avatar: Element<'a, Message> = match post
        .author
        .avatar
        .as_deref()
        .and_then(|path| avatars.handle(path))
    {
        Some(handle) => image(handle.clone())
            .width(sizing::AVATAR_MD)
            .height(sizing::AVATAR_MD)
            .into(),
        None => container(Text::new(post.author.initial()).size(typography::BODY))
            .width(sizing::AVATAR_MD)
            .height(sizing::AVATAR_MD)
            .center_x(sizing::AVATAR_MD)
            .center_y(sizing::AVATAR_MD)
            .style(styles::container::panel)
            .into(),
    };

    let header = Row::new()
        .push(avatar)
        .push(
            Column::new()
                .push(Text::new(post.author.username.clone()).size(typography::BODY))
                .push(
                    Text::new(post.created_at.format("%Y-%m-%d %H:%M").to_string())
                        .size(typography::CAPTION),
                )
                .spacing(spacing::XXS),
        )
        .spacing(spacing::XS)
        .align_y(iced::Alignment::Center);

    let mut column = Column::new().push(header).spacing(spacing::SM);

    if !post.content.trim().is_empty() {
        column = column.push(Text::new(post.content.clone()).size(typography::BODY));
    }

    if !post.media.is_empty() {
        let mut tiles = Row::new().spacing(spacing::XS);
        for attachment in &post.media {
            let label = match attachment.kind() {
                MediaKind::Video => i18n.tr("post-media-video"),
                MediaKind::Image => client.asset_url(attachment.path()),
            };
            tiles = tiles.push(
                container(Text::new(label).size(typography::CAPTION))
                    .padding(spacing::XS)
                    .style(styles::container::panel),
            );
        }
        column = column.push(tiles);
    }

    column = column.push(actions(post, busy, i18n));

    container(column)
        .width(Length::Fill)
        .padding(spacing::MD)
        .style(styles::container::card)
        .into()
}

fn actions<'a>(post: &'a Post, busy: bool, i18n: &'a I18n) -> Element<'a, Message> {
    let like_key = if post.liked_by_current_user {
        "post-unlike-button"
    } else {
        "post-like-button"
    };
    let like_label = Text::new(i18n.tr(like_key)).size(typography::BODY_SM);
    let mut like = button(like_label)
        .style(styles::button::text_action)
        .padding(spacing::XS);
    if !busy {
        like = like.on_press(Message::LikePressed(post.id.clone()));
    }

    let count = Text::new(i18n.tr_with_args(
        "post-like-count",
        &[("count", &post.like_count.to_string())],
    ))
    .size(typography::CAPTION);

    let mut delete = button(Text::new(i18n.tr("post-delete-button")).size(typography::BODY_SM))
        .style(styles::button::destructive)
        .padding(spacing::XS);
    if !busy {
        delete = delete.on_press(Message::DeletePressed(post.id.clone()));
    }

    Row::new()
        .push(like)
        .push(count)
        .push(iced::widget::space::horizontal())
        .push(delete)
        .spacing(spacing::XS)
        .align_y(iced::Alignment::Center)
        .width(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> PostId {
        PostId::from(s)
    }

    #[test]
    fn like_press_issues_request_and_marks_busy() {
        let mut interactions = Interactions::new();
        let event = interactions.update(Message::LikePressed(id("p1")));
        assert_eq!(event, Event::Like(id("p1")));
        assert!(interactions.is_busy(&id("p1")));
        assert!(!interactions.is_busy(&id("p2")));
    }

    #[test]
    fn second_press_while_busy_is_ignored() {
        let mut interactions = Interactions::new();
        interactions.update(Message::LikePressed(id("p1")));
        let event = interactions.update(Message::LikePressed(id("p1")));
        assert_eq!(event, Event::None);
    }

    #[test]
    fn delete_is_blocked_while_a_like_is_unresolved() {
        let mut interactions = Interactions::new();
        interactions.update(Message::LikePressed(id("p1")));
        let event = interactions.update(Message::DeletePressed(id("p1")));
        assert_eq!(event, Event::None);
    }

    #[test]
    fn like_resolution_clears_busy_and_reports_confirmed_state() {
        let mut interactions = Interactions::new();
        interactions.update(Message::LikePressed(id("p1")));

        let event = interactions.update(Message::LikeResolved(
            id("p1"),
            Ok(LikeOutcome {
                liked_by_current_user: true,
                like_count: 3,
            }),
        ));

        assert_eq!(
            event,
            Event::Liked {
                id: id("p1"),
                liked: true,
                like_count: 3,
            }
        );
        assert!(!interactions.is_busy(&id("p1")));
    }

    #[test]
    fn failed_like_clears_busy_and_surfaces_the_error() {
        let mut interactions = Interactions::new();
        interactions.update(Message::LikePressed(id("p1")));

        let event = interactions.update(Message::LikeResolved(
            id("p1"),
            Err(Error::Network("down".into())),
        ));

        assert_eq!(event, Event::Failed(Error::Network("down".into())));
        assert!(!interactions.is_busy(&id("p1")));
    }

    #[test]
    fn confirmed_delete_reports_removal() {
        let mut interactions = Interactions::new();
        interactions.update(Message::DeletePressed(id("p1")));
        let event = interactions.update(Message::DeleteResolved(id("p1"), Ok(())));
        assert_eq!(event, Event::Deleted(id("p1")));
        assert!(!interactions.is_busy(&id("p1")));
    }
}
