// SPDX-License-Identifier: MPL-2.0
//! Live user-directory search with an outside-press dismissal lifecycle.
//!
//! The session is fully transient: query, results, and visibility are
//! reset wholesale on dismissal. Every query change issues a request
//! tagged with a monotonically increasing generation; a response whose
//! generation is no longer current is discarded, so out-of-order replies
//! can never show results for a query the user has already left.
//!
//! While the panel is open the application routes global pointer events
//! here (see `app::subscription`); a press outside the panel region
//! closes it. The routing exists only while `is_open()` is true, so the
//! listener can neither dangle nor double-register across open/close
//! cycles.

use crate::domain::SearchResult;
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::media::AvatarCache;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, container, image, scrollable, text_input, tooltip, Column, Row, Text};
use iced::{Element, Length, Point, Rectangle, Size};

#[cfg(test)]
mod tests;

/// Messages emitted by search widgets and routed pointer events.
#[derive(Debug, Clone)]
pub enum Message {
    /// Navbar search button: open when closed, close when open.
    Toggle,
    ClosePressed,
    QueryChanged(String),
    /// Resolved search request, tagged with the generation that issued it.
    ResultsReceived {
        generation: u64,
        result: Result<Vec<SearchResult>, Error>,
    },
    /// Cursor tracking while the panel is open.
    CursorMoved(Point),
    /// A pointer press anywhere in the window while the panel is open.
    PointerPressed,
    /// A result row was activated.
    ResultActivated(String),
}

/// Side effects the application performs after handling a search message.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Issue a directory search for this query, tagged with `generation`.
    Search { generation: u64, query: String },
    /// The user chose a directory entry; navigation is the caller's
    /// concern.
    ResultChosen(String),
}

/// Transient search session state.
#[derive(Debug, Default)]
pub struct State {
    open: bool,
    query: String,
    results: Vec<SearchResult>,
    /// Generation of the most recent request; responses from older
    /// generations are stale and dropped.
    generation: u64,
    /// Last known cursor position, used to resolve presses against the
    /// panel region.
    cursor: Point,
    /// A request is unresolved for the current generation.
    searching: bool,
    error: Option<Error>,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Opens the panel without touching the (empty) session.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the panel and destroys the session: query, results, and
    /// error are reset; any in-flight response is orphaned by the
    /// generation bump.
    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
        self.results.clear();
        self.error = None;
        self.searching = false;
        self.generation += 1;
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Toggle => {
                if self.open {
                    self.close();
                } else {
                    self.open();
                }
                Event::None
            }
            Message::ClosePressed => {
                self.close();
                Event::None
            }
            Message::QueryChanged(query) => self.query_changed(query),
            Message::ResultsReceived { generation, result } => {
                self.results_received(generation, result);
                Event::None
            }
            Message::CursorMoved(position) => {
                self.cursor = position;
                Event::None
            }
            Message::PointerPressed => {
                // Presses on the navbar strip are left to the toggle
                // button, otherwise a close here would be undone by the
                // toggle firing right after.
                let in_navbar = self.cursor.y < sizing::NAVBAR_HEIGHT;
                if self.open && !in_navbar && !self.panel_bounds().contains(self.cursor) {
                    self.close();
                }
                Event::None
            }
            Message::ResultActivated(id) => {
                self.close();
                Event::ResultChosen(id)
            }
        }
    }

    /// Sets the query. A blank query clears results locally; anything
    /// else supersedes the previous request and issues a fresh one.
    fn query_changed(&mut self, query: String) -> Event {
        self.query = query;
        self.error = None;
        self.generation += 1;

        if self.query.trim().is_empty() {
            self.results.clear();
            self.searching = false;
            return Event::None;
        }

        self.searching = true;
        Event::Search {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    fn results_received(&mut self, generation: u64, result: Result<Vec<SearchResult>, Error>) {
        // Superseded or post-dismissal responses are stale.
        if generation != self.generation || !self.open {
            return;
        }
        self.searching = false;
        match result {
            Ok(results) => {
                self.results = results;
            }
            Err(err) => {
                // Degrade to "no change", with a diagnostic and an inline
                // note; the previous results stay visible.
                eprintln!("search: {err}");
                self.error = Some(err);
            }
        }
    }

    /// Region occupied by the open panel, in window coordinates. The
    /// panel is anchored below the navbar at the left edge; its height
    /// tracks the result rows up to a cap.
    #[must_use]
    pub fn panel_bounds(&self) -> Rectangle {
        let rows = self.results.len() as f32;
        let header = sizing::INPUT_HEIGHT + 2.0 * spacing::SM;
        let body = (rows * sizing::SEARCH_ROW_HEIGHT).min(sizing::SEARCH_PANEL_MAX_HEIGHT);

        Rectangle::new(
            Point::new(spacing::MD, sizing::NAVBAR_HEIGHT),
            Size::new(sizing::SEARCH_PANEL_WIDTH, header + body + spacing::SM),
        )
    }

    /// Renders the dropdown panel. The caller only invokes this while
    /// `is_open()` is true.
    pub fn view<'a>(&'a self, avatars: &AvatarCache, i18n: &'a I18n) -> Element<'a, Message> {
        let input = text_input(&i18n.tr("search-placeholder"), &self.query)
            .on_input(Message::QueryChanged)
            .size(typography::BODY)
            .padding(spacing::XS);

        let close = tooltip(
            button(Text::new("×").size(typography::BODY_LG))
                .on_press(Message::ClosePressed)
                .style(styles::button::text_action)
                .padding(spacing::XXS),
            container(Text::new(i18n.tr("search-close-button")).size(typography::CAPTION))
                .padding(spacing::XXS)
                .style(styles::container::panel),
            tooltip::Position::Bottom,
        );

        let header = Row::new()
            .push(input)
            .push(close)
            .spacing(spacing::XS)
            .align_y(iced::Alignment::Center);

        let mut column = Column::new().push(header).spacing(spacing::SM);

        if let Some(err) = &self.error {
            column = column.push(
                Text::new(i18n.tr(err.i18n_key()))
                    .size(typography::BODY_SM)
                    .color(palette::ERROR_500),
            );
        }

        if !self.results.is_empty() {
            let mut rows = Column::new().spacing(spacing::XXS);
            for result in &self.results {
                rows = rows.push(result_row(result, avatars, i18n));
            }
            column = column.push(
                scrollable(rows).height(Length::Shrink).width(Length::Fill),
            );
            column = column.push(
                Text::new(i18n.tr_with_args(
                    "search-result-count",
                    &[("count", &self.results.len().to_string())],
                ))
                .size(typography::CAPTION),
            );
        } else if !self.query.trim().is_empty() && !self.searching {
            column = column.push(Text::new(i18n.tr("search-no-results")).size(typography::BODY_SM));
        }

        container(column)
            .width(sizing::SEARCH_PANEL_WIDTH)
            .padding(spacing::SM)
            .style(styles::container::dropdown)
            .into()
    }
}

fn result_row<'a>(
    result: &'a SearchResult,
    avatars: &AvatarCache,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let avatar: Element<'a, Message> = match result
        .avatar
        .as_deref()
        .and_then(|path| avatars.handle(path))
    {
        Some(handle) => image(handle.clone())
            .width(sizing::AVATAR_SM)
            .height(sizing::AVATAR_SM)
            .into(),
        None => container(Text::new(result.initial()).size(typography::BODY))
            .width(sizing::AVATAR_SM)
            .height(sizing::AVATAR_SM)
            .center_x(sizing::AVATAR_SM)
            .center_y(sizing::AVATAR_SM)
            .style(styles::container::panel)
            .into(),
    };

    let bio = result
        .bio
        .clone()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or_else(|| i18n.tr("search-no-bio"));

    let identity = Column::new()
        .push(Text::new(result.display_name.clone()).size(typography::BODY))
        .push(Text::new(bio).size(typography::CAPTION))
        .spacing(spacing::XXS);

    button(
        Row::new()
            .push(avatar)
            .push(identity)
            .spacing(spacing::XS)
            .align_y(iced::Alignment::Center),
    )
    .on_press(Message::ResultActivated(result.id.clone()))
    .style(styles::button::text_action)
    .width(Length::Fill)
    .padding(spacing::XXS)
    .into()
}
