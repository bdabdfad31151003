//! Route hints through the maze.

use std::collections::HashSet;

use glam::IVec2;
use pathfinding::prelude::bfs;
use smallvec::SmallVec;

use super::actor::{Direction, DIRECTIONS};
use super::collision::{Effect, StaticEntity};
use super::grid::Grid;

/// Finds the shortest cell-by-cell route from `from` to the nearest unconsumed
/// collectible, walking around walls and obstacle cells.
///
/// Returns an empty route when `from` already holds a collectible, and `None`
/// when nothing is reachable.
pub fn route_to_nearest_collectible(grid: &Grid, entities: &[StaticEntity], from: IVec2) -> Option<Vec<Direction>> {
    let targets: HashSet<IVec2> = entities
        .iter()
        .filter(|entity| entity.is_collectible() && !entity.is_consumed())
        .map(|entity| entity.cell.as_ivec2())
        .collect();
    if targets.is_empty() {
        return None;
    }

    let blocked: HashSet<IVec2> = entities
        .iter()
        .filter(|entity| entity.effect == Effect::LoseLife)
        .map(|entity| entity.cell.as_ivec2())
        .collect();

    let path = bfs(
        &from,
        |cell| {
            DIRECTIONS
                .iter()
                .map(|dir| *cell + dir.as_ivec2())
                .filter(|next| grid.is_walkable(*next) && !blocked.contains(next))
                .collect::<SmallVec<[IVec2; 4]>>()
        },
        |cell| targets.contains(cell),
    )?;

    Some(path.windows(2).filter_map(|pair| Direction::between(pair[0], pair[1])).collect())
}
