use glam::Vec2;
use minigames::error::ConfigError;
use minigames::events::{Feedback, FeedbackKind, ScoreReport};
use minigames::games::dots::{DotsGame, DotsInput, Puzzle, Waypoint};
use minigames::session::{Outcome, Session, Status};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;
use common::*;

fn square(points: u32) -> Puzzle {
    Puzzle {
        name: "Square".into(),
        points,
        waypoints: vec![
            Waypoint::new(1, 100.0, 100.0),
            Waypoint::new(2, 300.0, 100.0),
            Waypoint::new(3, 300.0, 300.0),
            Waypoint::new(4, 100.0, 300.0),
        ],
    }
}

fn at(session: &Session<DotsGame>, label: u32) -> Vec2 {
    session.game().puzzle().and_then(|p| p.waypoint(label)).unwrap().position
}

fn connect(session: &mut Session<DotsGame>, from: u32, to: u32) {
    let (a, b) = (at(session, from), at(session, to));
    session.input(DotsInput::Press(a));
    session.input(DotsInput::Drag(a.lerp(b, 0.5)));
    session.input(DotsInput::Release(b));
}

#[test]
fn test_out_of_order_press_then_first_connection() {
    let (mut session, recorder) = recorded(DotsGame::new(dots_config(vec![triangle(30), square(40)])));
    session.start().unwrap();

    session.input(DotsInput::Press(at(&session, 2)));
    assert_that(&session.game().drawing()).is_none();
    assert_that(&session.game().completed_paths().len()).is_equal_to(0);
    assert_eq!(
        recorder.last_feedback(),
        Some(Feedback::new(FeedbackKind::Warning, "Start from dot 1"))
    );

    let (one, two) = (at(&session, 1), at(&session, 2));
    session.input(DotsInput::Press(one + Vec2::new(5.0, -5.0)));
    session.input(DotsInput::Drag(Vec2::new(200.0, 110.0)));
    session.input(DotsInput::Release(two + Vec2::new(-10.0, 3.0)));

    let game = session.game();
    assert_that(&game.completed_paths().len()).is_equal_to(1);
    assert_eq!(game.completed_paths()[0], vec![one, Vec2::new(200.0, 110.0), two]);
    assert_eq!(game.expected_next(), 2);
    assert_eq!(game.next_target(), 3);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_expected_next_with_two_connections_pending() {
    let (mut session, _) = recorded(DotsGame::new(dots_config(vec![square(40)])));
    session.start().unwrap();

    connect(&mut session, 1, 2);
    connect(&mut session, 2, 3);
    assert_eq!(session.game().expected_next(), 3);
    assert_eq!(session.game().next_target(), 4);
    assert_eq!(session.game().completed_paths().len(), 2);
    assert_that(&session.game().drawing()).is_none();
}

#[test]
fn test_wrong_release_discards_the_drawing() {
    let (mut session, recorder) = recorded(DotsGame::new(dots_config(vec![triangle(30)])));
    session.start().unwrap();

    session.input(DotsInput::Press(at(&session, 1)));
    session.input(DotsInput::Drag(Vec2::new(150.0, 200.0)));
    session.input(DotsInput::Release(at(&session, 3)));

    assert_that(&session.game().drawing()).is_none();
    assert_that(&session.game().completed_paths().len()).is_equal_to(0);
    assert_eq!(
        recorder.last_feedback(),
        Some(Feedback::new(FeedbackKind::Error, "Connect dot 1 to dot 2"))
    );

    // Releasing on empty canvas is rejected the same way.
    session.input(DotsInput::Press(at(&session, 1)));
    session.input(DotsInput::Release(Vec2::new(600.0, 600.0)));
    assert_eq!(session.game().completed_paths().len(), 0);
    assert_eq!(recorder.count(FeedbackKind::Error), 2);
}

#[test]
fn test_drag_without_press_is_ignored() {
    let (mut session, recorder) = recorded(DotsGame::new(dots_config(vec![triangle(30)])));
    session.start().unwrap();

    session.input(DotsInput::Drag(Vec2::new(10.0, 10.0)));
    session.input(DotsInput::Release(at(&session, 2)));

    assert_that(&session.game().drawing()).is_none();
    assert_eq!(session.game().completed_paths().len(), 0);
    assert_that(&recorder.feedback()).is_empty();
}

#[test]
fn test_expected_next_tracks_completed_paths() {
    let (mut session, _) = recorded(DotsGame::new(dots_config(vec![square(40), triangle(30)])));
    session.start().unwrap();

    let attempts = [(2, 3), (1, 3), (1, 2), (1, 2), (3, 4), (2, 3), (4, 1), (3, 4)];
    for (from, to) in attempts {
        connect(&mut session, from, to);
        let game = session.game();
        let needed = game.puzzle().map_or(0, Puzzle::connections);
        assert!(game.completed_paths().len() <= needed);
        if !game.is_cooling_down() {
            assert_eq!(game.expected_next() as usize, game.completed_paths().len() + 1);
        }
    }

    assert!(session.game().is_cooling_down());
    assert_eq!(session.score(), 40);
}

#[test]
fn test_next_puzzle_follows_the_cool_down() {
    let (mut session, recorder) = recorded(DotsGame::new(dots_config(vec![triangle(30), square(40)])));
    session.start().unwrap();

    connect(&mut session, 1, 2);
    connect(&mut session, 2, 3);
    assert_eq!(session.score(), 30);
    assert!(session.game().is_cooling_down());
    assert_eq!(session.pending_timers(), 1);
    assert_eq!(
        recorder.last_feedback(),
        Some(Feedback::new(FeedbackKind::Success, "Triangle complete! +30"))
    );

    // Input is ignored while the solved puzzle is still showing.
    session.input(DotsInput::Press(at(&session, 1)));
    assert_that(&session.game().drawing()).is_none();

    session.advance(millis(1499));
    assert_eq!(session.game().puzzle_index(), 0);
    session.advance(millis(1));
    assert_eq!(session.game().puzzle_index(), 1);
    assert_eq!(session.game().expected_next(), 1);
    assert_that(&session.game().completed_paths().len()).is_equal_to(0);
    assert!(!session.game().is_cooling_down());
}

#[test]
fn test_final_puzzle_wins_immediately() {
    let (mut session, recorder) = recorded(DotsGame::new(dots_config(vec![triangle(30)])));
    session.start().unwrap();
    session.advance(secs(4));

    connect(&mut session, 1, 2);
    connect(&mut session, 2, 3);

    assert_eq!(session.status(), Status::Ended(Outcome::Won));
    assert_eq!(session.pending_timers(), 0);
    assert_eq!(
        recorder.reports(),
        vec![ScoreReport {
            score: 30,
            time_used: 4,
            success: true
        }]
    );
}

#[test]
fn test_reset_cancels_the_puzzle_advance() {
    let (mut session, _) = recorded(DotsGame::new(dots_config(vec![triangle(30), square(40)])));
    session.start().unwrap();
    connect(&mut session, 1, 2);
    connect(&mut session, 2, 3);
    assert_eq!(session.pending_timers(), 1);

    session.reset();
    assert_eq!(session.pending_timers(), 0);
    session.start().unwrap();
    session.advance(secs(3));

    assert_eq!(session.game().puzzle_index(), 0);
    assert_eq!(session.game().solved(), 0);
    assert!(!session.game().is_cooling_down());
}

#[test]
fn test_running_out_of_time_loses() {
    let mut config = dots_config(vec![square(40)]);
    config.time_budget_secs = 5;
    let (mut session, recorder) = recorded(DotsGame::new(config));
    session.start().unwrap();

    connect(&mut session, 1, 2);
    session.advance(secs(5));

    assert_eq!(session.status(), Status::Ended(Outcome::Lost));
    assert_eq!(
        recorder.reports(),
        vec![ScoreReport {
            score: 0,
            time_used: 5,
            success: false
        }]
    );
}

#[test]
fn test_empty_catalog_is_a_config_error() {
    let (mut session, _) = recorded(DotsGame::new(dots_config(Vec::new())));
    assert!(session.config_error().is_some());
    assert!(session.start().is_err());
    assert_eq!(session.status(), Status::Idle);
}

#[test]
fn test_snap_radius_must_be_positive() {
    let mut config = dots_config(vec![triangle(30)]);
    config.snap_radius = -1.0;
    let (mut session, _) = recorded(DotsGame::new(config));
    assert_eq!(
        session.config_error(),
        Some(&ConfigError::InvalidSize {
            name: "Snap radius",
            value: -1.0
        })
    );
    assert!(session.start().is_err());

    let mut config = dots_config(vec![triangle(30)]);
    config.snap_radius = f32::NAN;
    let session = Session::new(DotsGame::new(config));
    assert!(session.config_error().is_some());
}
