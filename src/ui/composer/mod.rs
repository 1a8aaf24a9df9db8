// SPDX-License-Identifier: MPL-2.0
//! Post composer: draft text and media, and the submission state machine.
//!
//! The composer exclusively owns its uncommitted draft state. Submission
//! follows `Idle -> Submitting -> Idle`; at most one submission is in
//! flight, and a failed submission preserves content and media drafts
//! exactly. On success, ownership of the resulting post transfers to the
//! feed store via [`Event::Posted`].

use crate::domain::Post;
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::media::DraftManager;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, image, text_input, tooltip, Column, Row, Text};
use iced::{Element, Length};
use std::path::PathBuf;


/// Quick-insert emoji offered by the picker row.
const EMOJI_CHOICES: &[&str] = &["😀", "😂", "😍", "🤔", "👍", "🎉", "❤️", "🔥"];

/// Submission phase of the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

/// Messages emitted by composer widgets.
#[derive(Debug, Clone)]
pub enum Message {
    ContentChanged(String),
    AttachPressed,
    /// Result of the media file dialog; `None` when cancelled.
    FilesPicked(Option<Vec<PathBuf>>),
    RemoveDraft(usize),
    EmojiTogglePressed,
    /// One of the picker emoji; appended to the draft text.
    EmojiPicked(&'static str),
    SubmitPressed,
    SubmitResolved(Result<Post, Error>),
}

/// Side effects the application performs after handling a composer message.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Open the media file dialog.
    PickFiles,
    /// Issue the creation request with this content and these raw files.
    Submit { content: String, media: Vec<PathBuf> },
    /// The server committed the post; prepend it to the feed.
    Posted(Box<Post>),
    /// Submission failed; surface it to the user.
    Failed(Error),
}

/// Composer state: draft text, media drafts, and the submission phase.
#[derive(Debug, Default)]
pub struct State {
    content: String,
    drafts: DraftManager,
    phase: Phase,
    emoji_open: bool,
    error: Option<Error>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn drafts(&self) -> &DraftManager {
        &self.drafts
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// A post needs non-blank content or at least one media draft.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.content.trim().is_empty() || !self.drafts.is_empty()
    }

    #[must_use]
    pub fn is_emoji_open(&self) -> bool {
        self.emoji_open
    }

    /// Discards all draft state, releasing previews.
    pub fn cancel(&mut self) {
        self.content.clear();
        self.drafts.clear();
        self.emoji_open = false;
        self.error = None;
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::ContentChanged(content) => {
                // Edits are allowed while a submission is in flight; they
                // compose the next submission.
                self.content = content;
                self.error = None;
                Event::None
            }
            Message::AttachPressed => {
                if self.phase == Phase::Submitting {
                    return Event::None;
                }
                Event::PickFiles
            }
            Message::FilesPicked(paths) => {
                if let Some(paths) = paths {
                    self.drafts.add_files(paths);
                    self.error = None;
                }
                Event::None
            }
            Message::RemoveDraft(index) => {
                if let Err(err) = self.drafts.remove_at(index) {
                    eprintln!("composer: {err}");
                }
                Event::None
            }
            Message::EmojiTogglePressed => {
                if self.phase != Phase::Submitting {
                    self.emoji_open = !self.emoji_open;
                }
                Event::None
            }
            Message::EmojiPicked(emoji) => {
                if self.phase != Phase::Submitting {
                    self.content.push_str(emoji);
                    self.error = None;
                }
                Event::None
            }
            Message::SubmitPressed => self.submit(),
            Message::SubmitResolved(result) => self.resolve(result),
        }
    }

    /// Validates and starts a submission. No network call is issued for an
    /// empty post or while a previous submission is unresolved.
    fn submit(&mut self) -> Event {
        if self.phase == Phase::Submitting {
            self.error = Some(Error::AlreadySubmitting);
            return Event::None;
        }
        if !self.can_submit() {
            self.error = Some(Error::EmptyPost);
            return Event::None;
        }

        self.phase = Phase::Submitting;
        self.error = None;
        Event::Submit {
            content: self.content.clone(),
            media: self.drafts.paths(),
        }
    }

    fn resolve(&mut self, result: Result<Post, Error>) -> Event {
        self.phase = Phase::Idle;
        match result {
            Ok(post) => {
                self.content.clear();
                self.drafts.clear();
                self.emoji_open = false;
                self.error = None;
                Event::Posted(Box::new(post))
            }
            Err(err) => {
                // Content and drafts stay exactly as they were.
                self.error = Some(err.clone());
                Event::Failed(err)
            }
        }
    }

    /// Renders the composer card.
    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let submitting = self.phase == Phase::Submitting;

        let heading = Text::new(i18n.tr("composer-heading")).size(typography::TITLE_SM);

        let mut input = text_input(&i18n.tr("composer-placeholder"), &self.content)
            .size(typography::BODY)
            .padding(spacing::XS);
        if !submitting {
            input = input.on_input(Message::ContentChanged);
        }

        let mut column = Column::new()
            .spacing(spacing::SM)
            .push(heading)
            .push(input);

        if self.emoji_open {
            column = column.push(emoji_row());
        }

        if !self.drafts.is_empty() {
            column = column.push(self.draft_tiles(i18n, submitting));
        }

        if let Some(err) = &self.error {
            column = column.push(
                Text::new(i18n.tr(err.i18n_key()))
                    .size(typography::BODY_SM)
                    .color(crate::ui::design_tokens::palette::ERROR_500),
            );
        }

        column = column.push(self.footer(i18n, submitting));

        container(column)
            .width(Length::Fill)
            .padding(spacing::MD)
            .style(styles::container::card)
            .into()
    }

    fn draft_tiles<'a>(&'a self, i18n: &'a I18n, submitting: bool) -> Element<'a, Message> {
        let mut row = Row::new().spacing(spacing::XS);

        for (index, draft) in self.drafts.drafts().iter().enumerate() {
            let preview: Element<'a, Message> = match draft.preview().handle() {
                Some(handle) => image(handle.clone())
                    .width(sizing::DRAFT_TILE_WIDTH)
                    .height(sizing::DRAFT_TILE_HEIGHT)
                    .into(),
                None => container(
                    Text::new(format!("{} ({})", draft.file_name(), i18n.tr("post-media-video")))
                        .size(typography::CAPTION),
                )
                .width(sizing::DRAFT_TILE_WIDTH)
                .height(sizing::DRAFT_TILE_HEIGHT)
                .padding(spacing::XS)
                .style(styles::container::panel)
                .into(),
            };

            let mut remove = button(Text::new("×").size(typography::BODY)).padding(spacing::XXS);
            if !submitting {
                remove = remove.on_press(Message::RemoveDraft(index));
            }
            let remove = tooltip(
                remove,
                container(
                    Text::new(i18n.tr("composer-remove-media-tooltip")).size(typography::CAPTION),
                )
                .padding(spacing::XXS)
                .style(styles::container::panel),
                tooltip::Position::Bottom,
            );

            row = row.push(Column::new().push(preview).push(remove).spacing(spacing::XXS));
        }

        row.into()
    }

    fn footer<'a>(&'a self, i18n: &'a I18n, submitting: bool) -> Element<'a, Message> {
        let mut attach =
            button(Text::new(i18n.tr("composer-attach-tooltip")).size(typography::BODY_SM))
                .style(styles::button::text_action)
                .padding(spacing::XS);
        if !submitting {
            attach = attach.on_press(Message::AttachPressed);
        }

        let mut emoji = button(Text::new("🙂").size(typography::BODY_SM))
            .style(styles::button::text_action)
            .padding(spacing::XS);
        if !submitting {
            emoji = emoji.on_press(Message::EmojiTogglePressed);
        }
        let emoji = tooltip(
            emoji,
            container(Text::new(i18n.tr("composer-emoji-tooltip")).size(typography::CAPTION))
                .padding(spacing::XXS)
                .style(styles::container::panel),
            tooltip::Position::Bottom,
        );

        let submit_label = if submitting {
            i18n.tr("composer-submitting-button")
        } else {
            i18n.tr("composer-submit-button")
        };
        let submit_text = Text::new(submit_label).size(typography::BODY);
        let submit = if submitting || !self.can_submit() {
            button(submit_text).style(styles::button::disabled())
        } else {
            button(submit_text)
                .style(styles::button::primary)
                .on_press(Message::SubmitPressed)
        };

        Row::new()
            .push(attach)
            .push(emoji)
            .push(iced::widget::space::horizontal())
            .push(submit.padding([spacing::XXS, spacing::MD]))
            .align_y(iced::Alignment::Center)
            .width(Length::Fill)
            .into()
    }
}

fn emoji_row<'a>() -> Element<'a, Message> {
    let mut row = Row::new().spacing(spacing::XXS);
    for emoji in EMOJI_CHOICES {
        row = row.push(
            button(Text::new(*emoji).size(typography::BODY))
                .on_press(Message::EmojiPicked(*emoji))
                .style(styles::button::text_action)
                .padding(spacing::XXS),
        );
    }
    row.into()
}
