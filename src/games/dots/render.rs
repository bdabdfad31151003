use glam::Vec2;

use crate::render::{Color, Primitive, HUD_HEIGHT};

use super::DotsGame;

const DOT_RADIUS: f32 = 6.0;
const LABEL_SIZE: f32 = 14.0;
const STROKE_WIDTH: f32 = 3.0;

pub(super) fn scene(game: &DotsGame) -> Vec<Primitive> {
    let Some(puzzle) = game.puzzle() else {
        return Vec::new();
    };

    let mut primitives = vec![Primitive::text(
        Vec2::new(8.0, HUD_HEIGHT),
        puzzle.name.as_str(),
        LABEL_SIZE,
        Color::MUTED,
    )];

    let done = if game.is_cooling_down() { Color::SUCCESS } else { Color::WHITE };
    primitives.extend(game.completed_paths().iter().map(|path| Primitive::Stroke {
        points: path.clone(),
        width: STROKE_WIDTH,
        color: done,
    }));

    if let Some(path) = game.drawing() {
        primitives.push(Primitive::Stroke {
            points: path.to_vec(),
            width: STROKE_WIDTH,
            color: Color::WARNING,
        });
    }

    let expected = game.expected_next();
    for waypoint in &puzzle.waypoints {
        let color = if waypoint.label < expected {
            Color::SUCCESS
        } else if waypoint.label == expected && !game.is_cooling_down() {
            Color::WARNING
        } else {
            Color::WHITE
        };
        primitives.push(Primitive::Circle {
            center: waypoint.position,
            radius: DOT_RADIUS,
            color,
        });
        primitives.push(Primitive::text(
            waypoint.position + Vec2::new(DOT_RADIUS + 2.0, -LABEL_SIZE),
            waypoint.label.to_string(),
            LABEL_SIZE,
            Color::WHITE,
        ));
    }

    primitives
}
