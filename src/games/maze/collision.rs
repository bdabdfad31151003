//! Static maze entities and the proximity test against the actor.

use glam::{UVec2, Vec2};

use super::grid::{CellKind, Grid};

/// What touching an entity does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Points(u32),
    LoseLife,
}

/// A collectible or obstacle placed from the grid at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticEntity {
    pub cell: UVec2,
    pub position: Vec2,
    /// Full extent; half of it is used as the collision radius.
    pub size: f32,
    pub effect: Effect,
    consumed: bool,
}

impl StaticEntity {
    pub fn new(cell: UVec2, size: f32, effect: Effect) -> Self {
        Self {
            cell,
            position: Grid::cell_center(cell),
            size,
            effect,
            consumed: false,
        }
    }

    pub fn is_collectible(&self) -> bool {
        matches!(self.effect, Effect::Points(_))
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    /// Marks the entity consumed. Returns `false` if it already was.
    pub fn consume(&mut self) -> bool {
        !std::mem::replace(&mut self.consumed, true)
    }

    /// Whether an actor of `size` centered at `center` overlaps this entity.
    pub fn collides_with(&self, center: Vec2, size: f32) -> bool {
        !self.consumed && self.position.distance(center) < (self.size + size) / 2.0
    }
}

/// Entity sizes and values used when placing entities from a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub collectible_size: f32,
    pub collectible_points: u32,
    pub obstacle_size: f32,
}

/// Creates one entity per collectible and obstacle cell, in row-major order.
pub fn place_entities(grid: &Grid, placement: Placement) -> Vec<StaticEntity> {
    grid.cells()
        .filter_map(|(cell, kind)| match kind {
            CellKind::Collectible => Some(StaticEntity::new(
                cell,
                placement.collectible_size,
                Effect::Points(placement.collectible_points),
            )),
            CellKind::Obstacle => Some(StaticEntity::new(cell, placement.obstacle_size, Effect::LoseLife)),
            CellKind::Wall | CellKind::Path => None,
        })
        .collect()
}

/// What a single collision pass found.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Contacts {
    /// Points from collectibles consumed during this pass.
    pub collected: Vec<u32>,
    /// Index of the first obstacle touched, in placement order.
    pub obstacle: Option<usize>,
}

/// Consumes every touched collectible and reports the first touched obstacle.
pub fn resolve_contacts(entities: &mut [StaticEntity], center: Vec2, size: f32) -> Contacts {
    let mut contacts = Contacts::default();

    for (index, entity) in entities.iter_mut().enumerate() {
        if !entity.collides_with(center, size) {
            continue;
        }
        match entity.effect {
            Effect::Points(points) => {
                if entity.consume() {
                    contacts.collected.push(points);
                }
            }
            Effect::LoseLife => {
                contacts.obstacle.get_or_insert(index);
            }
        }
    }

    contacts
}
