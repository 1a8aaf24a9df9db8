// SPDX-License-Identifier: MPL-2.0

use super::*;
use crate::domain::SearchResult;
use iced::Point;

fn result(id: &str, name: &str) -> SearchResult {
    SearchResult {
        id: id.into(),
        display_name: name.into(),
        avatar: None,
        bio: None,
    }
}

#[test]
fn toggle_opens_then_closes() {
    let mut state = State::new();
    state.update(Message::Toggle);
    assert!(state.is_open());
    state.update(Message::Toggle);
    assert!(!state.is_open());
}

#[test]
fn query_change_issues_request_with_fresh_generation() {
    let mut state = State::new();
    state.open();

    let first = state.update(Message::QueryChanged("a".into()));
    let second = state.update(Message::QueryChanged("ab".into()));

    let Event::Search { generation: g1, query: q1 } = first else {
        panic!("expected Search, got {first:?}");
    };
    let Event::Search { generation: g2, query: q2 } = second else {
        panic!("expected Search, got {second:?}");
    };
    assert_eq!(q1, "a");
    assert_eq!(q2, "ab");
    assert!(g2 > g1);
}

#[test]
fn stale_response_is_discarded() {
    let mut state = State::new();
    state.open();

    let Event::Search { generation: stale, .. } =
        state.update(Message::QueryChanged("a".into()))
    else {
        panic!("expected Search");
    };
    let Event::Search { generation: current, .. } =
        state.update(Message::QueryChanged("ab".into()))
    else {
        panic!("expected Search");
    };

    // Responses arrive out of order: the newer query resolves first.
    state.update(Message::ResultsReceived {
        generation: current,
        result: Ok(vec![result("u2", "abigail")]),
    });
    state.update(Message::ResultsReceived {
        generation: stale,
        result: Ok(vec![result("u1", "aaron")]),
    });

    assert_eq!(state.results().len(), 1);
    assert_eq!(state.results()[0].id, "u2");
}

#[test]
fn blank_query_clears_results_without_a_request() {
    let mut state = State::new();
    state.open();

    let Event::Search { generation, .. } = state.update(Message::QueryChanged("mira".into()))
    else {
        panic!("expected Search");
    };
    state.update(Message::ResultsReceived {
        generation,
        result: Ok(vec![result("u1", "mira")]),
    });
    assert_eq!(state.results().len(), 1);

    let event = state.update(Message::QueryChanged("   ".into()));
    assert_eq!(event, Event::None);
    assert!(state.results().is_empty());
    assert!(!state.is_searching());
}

#[test]
fn response_after_blanking_the_query_is_discarded() {
    let mut state = State::new();
    state.open();

    let Event::Search { generation, .. } = state.update(Message::QueryChanged("m".into()))
    else {
        panic!("expected Search");
    };
    state.update(Message::QueryChanged(String::new()));

    state.update(Message::ResultsReceived {
        generation,
        result: Ok(vec![result("u1", "mira")]),
    });
    assert!(state.results().is_empty());
}

#[test]
fn close_resets_the_session() {
    let mut state = State::new();
    state.open();
    let Event::Search { generation, .. } = state.update(Message::QueryChanged("mira".into()))
    else {
        panic!("expected Search");
    };
    state.update(Message::ResultsReceived {
        generation,
        result: Ok(vec![result("u1", "mira")]),
    });

    state.update(Message::ClosePressed);
    assert!(!state.is_open());
    assert_eq!(state.query(), "");
    assert!(state.results().is_empty());
}

#[test]
fn response_resolving_after_dismissal_does_not_resurface() {
    let mut state = State::new();
    state.open();
    let Event::Search { generation, .. } = state.update(Message::QueryChanged("mira".into()))
    else {
        panic!("expected Search");
    };

    state.update(Message::ClosePressed);
    state.update(Message::ResultsReceived {
        generation,
        result: Ok(vec![result("u1", "mira")]),
    });

    assert!(state.results().is_empty());
    assert!(!state.is_open());
}

#[test]
fn failed_search_keeps_previous_results() {
    let mut state = State::new();
    state.open();
    let Event::Search { generation, .. } = state.update(Message::QueryChanged("mi".into()))
    else {
        panic!("expected Search");
    };
    state.update(Message::ResultsReceived {
        generation,
        result: Ok(vec![result("u1", "mira")]),
    });

    let Event::Search { generation, .. } = state.update(Message::QueryChanged("mir".into()))
    else {
        panic!("expected Search");
    };
    state.update(Message::ResultsReceived {
        generation,
        result: Err(Error::Network("timed out".into())),
    });

    assert_eq!(state.results().len(), 1);
    assert!(!state.is_searching());
}

#[test]
fn press_outside_the_panel_closes_it() {
    let mut state = State::new();
    state.open();

    let bounds = state.panel_bounds();
    let outside = Point::new(bounds.x + bounds.width + 50.0, bounds.y + 10.0);
    state.update(Message::CursorMoved(outside));
    state.update(Message::PointerPressed);

    assert!(!state.is_open());
}

#[test]
fn press_inside_the_panel_keeps_it_open() {
    let mut state = State::new();
    state.open();

    let bounds = state.panel_bounds();
    let inside = Point::new(bounds.x + 5.0, bounds.y + 5.0);
    state.update(Message::CursorMoved(inside));
    state.update(Message::PointerPressed);

    assert!(state.is_open());
}

#[test]
fn press_on_the_navbar_strip_is_left_to_the_toggle() {
    let mut state = State::new();
    state.open();

    state.update(Message::CursorMoved(Point::new(600.0, 10.0)));
    state.update(Message::PointerPressed);

    assert!(state.is_open());
}

#[test]
fn activating_a_result_closes_and_reports_the_choice() {
    let mut state = State::new();
    state.open();

    let event = state.update(Message::ResultActivated("u7".into()));
    assert_eq!(event, Event::ResultChosen("u7".into()));
    assert!(!state.is_open());
}
