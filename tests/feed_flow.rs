// SPDX-License-Identifier: MPL-2.0
//! End-to-end flows through the public crate API: feed lifecycle,
//! composer-to-feed handoff, and configuration round-trips.

use chrono::{TimeZone, Utc};
use driftline::app::config::{self, Config};
use driftline::app::persisted_state::SessionState;
use driftline::domain::{Author, Post, PostId};
use driftline::error::Error;
use driftline::feed::{FeedStore, LoadState};
use driftline::i18n::fluent::I18n;
use driftline::ui::composer;
use driftline::ui::theming::ThemeMode;
use std::path::PathBuf;
use tempfile::tempdir;

fn post(id: &str, like_count: u32) -> Post {
    Post {
        id: PostId::from(id),
        author: Author {
            id: "u1".into(),
            username: "mira".into(),
            avatar: None,
        },
        content: format!("post {id}"),
        media: Vec::new(),
        liked_by_current_user: false,
        like_count,
        created_at: Utc.with_ymd_and_hms(2025, 11, 3, 10, 0, 0).unwrap(),
    }
}

#[test]
fn feed_lifecycle_from_load_to_empty() {
    let mut feed = FeedStore::new();
    assert_eq!(feed.load_state(), LoadState::Loading);

    // Initial load commits one post with two likes.
    feed.set_loaded(vec![post("p1", 2)]);
    assert_eq!(feed.load_state(), LoadState::Loaded);

    // The server confirms a like; the count is taken verbatim.
    let applied = feed.apply_like_update(&PostId::from("p1"), true, 3);
    assert!(applied);
    let p1 = feed.get(&PostId::from("p1")).unwrap();
    assert!(p1.liked_by_current_user);
    assert_eq!(p1.like_count, 3);

    // The server confirms deletion; the feed becomes empty but stays
    // Loaded, which renders the empty placeholder rather than the
    // unavailable view.
    feed.remove_by_id(&PostId::from("p1")).unwrap();
    assert_eq!(feed.load_state(), LoadState::Loaded);
    assert!(feed.posts().is_empty());

    // A like resolving after the deletion is a silent no-op.
    assert!(!feed.apply_like_update(&PostId::from("p1"), false, 2));
}

#[test]
fn failed_fetch_is_distinguishable_from_an_empty_feed() {
    let mut unavailable = FeedStore::new();
    unavailable.set_unavailable();

    let mut empty = FeedStore::new();
    empty.set_loaded(Vec::new());

    assert_eq!(unavailable.load_state(), LoadState::Unavailable);
    assert_eq!(empty.load_state(), LoadState::Loaded);
    assert!(unavailable.posts().is_empty());
    assert!(empty.posts().is_empty());
}

#[test]
fn committed_post_lands_at_the_head_of_the_feed() {
    let mut feed = FeedStore::new();
    feed.set_loaded(vec![post("p1", 0), post("p2", 0)]);

    let mut state = composer::State::new();
    state.update(composer::Message::ContentChanged("hello".into()));
    let event = state.update(composer::Message::SubmitPressed);
    assert!(matches!(event, composer::Event::Submit { .. }));

    let resolved = state.update(composer::Message::SubmitResolved(Ok(post("p3", 0))));
    let composer::Event::Posted(committed) = resolved else {
        panic!("expected Posted, got {resolved:?}");
    };

    feed.prepend(*committed).unwrap();
    let ids: Vec<&PostId> = feed.posts().iter().map(|p| &p.id).collect();
    assert_eq!(
        ids,
        [&PostId::from("p3"), &PostId::from("p1"), &PostId::from("p2")]
    );
}

#[test]
fn duplicate_prepend_is_rejected_without_corrupting_order() {
    let mut feed = FeedStore::new();
    feed.set_loaded(vec![post("p1", 0)]);

    let err = feed.prepend(post("p1", 5)).unwrap_err();
    assert_eq!(err, Error::DuplicateId(PostId::from("p1")));
    assert_eq!(feed.posts().len(), 1);
    assert_eq!(feed.posts()[0].like_count, 0);
}

#[test]
fn language_change_via_config() {
    let dir = tempdir().expect("failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.general.language = Some("en-US".to_string());
    config::save_to_path(&config, &config_path).expect("failed to write config");

    let loaded = config::load_from_path(&config_path).expect("failed to load config");
    let i18n_en = I18n::new(None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    config.general.language = Some("fr".to_string());
    config::save_to_path(&config, &config_path).expect("failed to write config");

    let loaded = config::load_from_path(&config_path).expect("failed to load config");
    let i18n_fr = I18n::new(None, &loaded);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
}

#[test]
fn theme_mode_round_trips_through_config() {
    let dir = tempdir().expect("failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.general.theme_mode = ThemeMode::Dark;
    config::save_to_path(&config, &config_path).expect("failed to write config");

    let loaded = config::load_from_path(&config_path).expect("failed to load config");
    assert_eq!(loaded.general.theme_mode, ThemeMode::Dark);
}

#[test]
fn session_state_round_trips_through_cbor() {
    let dir = tempdir().expect("failed to create temporary directory");

    let session = SessionState {
        auth_token: Some("secret-token".into()),
        last_media_directory: Some(PathBuf::from("/home/mira/pictures")),
    };
    assert!(session.save_to(Some(dir.path().to_path_buf())).is_none());

    let (loaded, warning) = SessionState::load_from(Some(dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(loaded, session);
}

#[test]
fn logout_clears_the_persisted_credential() {
    let dir = tempdir().expect("failed to create temporary directory");

    let mut session = SessionState {
        auth_token: Some("secret-token".into()),
        last_media_directory: None,
    };
    session.save_to(Some(dir.path().to_path_buf()));

    session.auth_token = None;
    session.save_to(Some(dir.path().to_path_buf()));

    let (loaded, _) = SessionState::load_from(Some(dir.path().to_path_buf()));
    assert!(loaded.auth_token.is_none());
}
