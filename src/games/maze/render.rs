use glam::Vec2;

use crate::constants::maze::CELL_SIZE;
use crate::render::{Color, Primitive};

use super::collision::Effect;
use super::grid::CellKind;
use super::MazeGame;

/// Walls, remaining entities, then the actor on top.
pub(super) fn scene(game: &MazeGame) -> Vec<Primitive> {
    let cell = Vec2::splat(CELL_SIZE as f32);
    let mut primitives = vec![Primitive::Rect {
        origin: Vec2::ZERO,
        size: game.grid().pixel_size(),
        color: Color::PATH,
    }];

    primitives.extend(
        game.grid()
            .cells()
            .filter(|(_, kind)| *kind == CellKind::Wall)
            .map(|(position, _)| Primitive::Rect {
                origin: position.as_vec2() * cell,
                size: cell,
                color: Color::WALL,
            }),
    );

    primitives.extend(
        game.entities()
            .iter()
            .filter(|entity| !entity.is_consumed())
            .map(|entity| Primitive::Circle {
                center: entity.position,
                radius: entity.size / 2.0,
                color: match entity.effect {
                    Effect::Points(_) => Color::COLLECTIBLE,
                    Effect::LoseLife => Color::OBSTACLE,
                },
            }),
    );

    let actor = game.actor();
    let radius = game.config().actor_size / 2.0;
    primitives.push(Primitive::Circle {
        center: actor.position,
        radius,
        color: Color::ACTOR,
    });
    primitives.push(Primitive::Stroke {
        points: vec![actor.position, actor.position + actor.facing.as_vec2() * radius],
        width: 2.0,
        color: Color::BLACK,
    });

    primitives
}
