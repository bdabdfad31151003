#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use minigames::events::{Feedback, FeedbackKind, ScoreReport};
use minigames::games::dots::{DotsConfig, Puzzle, Waypoint};
use minigames::games::maze::{Direction, MazeConfig, MazeInput};
use minigames::games::waste::{Category, WasteConfig, WasteItem};
use minigames::session::{Game, Session};

/// Everything a session handed to its host.
#[derive(Clone, Default)]
pub struct Recorder {
    reports: Rc<RefCell<Vec<ScoreReport>>>,
    feedback: Rc<RefCell<Vec<Feedback>>>,
}

impl Recorder {
    pub fn reports(&self) -> Vec<ScoreReport> {
        self.reports.borrow().clone()
    }

    pub fn feedback(&self) -> Vec<Feedback> {
        self.feedback.borrow().clone()
    }

    pub fn last_feedback(&self) -> Option<Feedback> {
        self.feedback.borrow().last().cloned()
    }

    pub fn count(&self, kind: FeedbackKind) -> usize {
        self.feedback.borrow().iter().filter(|f| f.kind == kind).count()
    }
}

/// Wraps `game` in a session whose reports and feedback are recorded.
pub fn recorded<G: Game>(game: G) -> (Session<G>, Recorder) {
    let recorder = Recorder::default();
    let reports = Rc::clone(&recorder.reports);
    let feedback = Rc::clone(&recorder.feedback);

    let session = Session::new(game)
        .on_score_submit(move |report| reports.borrow_mut().push(report))
        .on_feedback(move |item| feedback.borrow_mut().push(item));
    (session, recorder)
}

pub fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

pub fn millis(n: u64) -> Duration {
    Duration::from_millis(n)
}

pub fn maze_config(rows: &[&str]) -> MazeConfig {
    MazeConfig {
        board: rows.iter().map(|row| row.to_string()).collect(),
        ..MazeConfig::default()
    }
}

/// Requests `count` moves in `direction`.
pub fn walk<G: Game<Input = MazeInput>>(session: &mut Session<G>, direction: Direction, count: usize) {
    for _ in 0..count {
        session.input(MazeInput::Move(direction));
    }
}

/// Waypoints 1, 2, 3 laid out on a wide triangle.
pub fn triangle(points: u32) -> Puzzle {
    Puzzle {
        name: "Triangle".into(),
        points,
        waypoints: vec![
            Waypoint::new(1, 100.0, 100.0),
            Waypoint::new(2, 300.0, 100.0),
            Waypoint::new(3, 200.0, 300.0),
        ],
    }
}

pub fn dots_config(puzzles: Vec<Puzzle>) -> DotsConfig {
    DotsConfig {
        puzzles,
        ..DotsConfig::default()
    }
}

pub fn battery() -> WasteItem {
    WasteItem::new("Battery", "🔋", Category::Hazardous, 20)
}

pub fn waste_config(catalog: Vec<WasteItem>) -> WasteConfig {
    WasteConfig {
        catalog,
        seed: Some(1),
        ..WasteConfig::default()
    }
}
