use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn as_ivec2(&self) -> IVec2 {
        (*self).into()
    }

    pub fn as_vec2(&self) -> Vec2 {
        self.as_ivec2().as_vec2()
    }

    /// The direction leading from one cell to an adjacent one.
    pub fn between(from: IVec2, to: IVec2) -> Option<Direction> {
        DIRECTIONS.into_iter().find(|dir| from + dir.as_ivec2() == to)
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}

pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

/// The player-controlled runner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    /// Center of the actor, in pixels.
    pub position: Vec2,
    pub facing: Direction,
    pub step: f32,
}

impl Actor {
    pub fn new(position: Vec2, step: f32) -> Self {
        Self {
            position,
            facing: Direction::Right,
            step,
        }
    }

    /// Where one step in `direction` would land.
    pub fn target(&self, direction: Direction) -> Vec2 {
        self.position + direction.as_vec2() * self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_as_ivec2() {
        assert_eq!(Direction::Up.as_ivec2(), -IVec2::Y);
        assert_eq!(Direction::Down.as_ivec2(), IVec2::Y);
        assert_eq!(Direction::Left.as_ivec2(), -IVec2::X);
        assert_eq!(Direction::Right.as_ivec2(), IVec2::X);
    }

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between(IVec2::new(2, 2), IVec2::new(2, 1)), Some(Direction::Up));
        assert_eq!(Direction::between(IVec2::new(2, 2), IVec2::new(3, 2)), Some(Direction::Right));
        assert_eq!(Direction::between(IVec2::new(2, 2), IVec2::new(4, 2)), None);
    }

    #[test]
    fn test_actor_target() {
        let actor = Actor::new(Vec2::new(16.0, 16.0), 8.0);
        assert_eq!(actor.target(Direction::Left), Vec2::new(8.0, 16.0));
        assert_eq!(actor.target(Direction::Down), Vec2::new(16.0, 24.0));
    }
}
