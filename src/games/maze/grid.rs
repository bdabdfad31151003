//! Grid parsing and cell lookup for the maze.

use glam::{IVec2, UVec2, Vec2};

use crate::constants::maze::CELL_SIZE;
use crate::error::ParseError;

/// An enum representing the different kinds of cells on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Wall,
    Path,
    /// A walkable cell holding a collectible at load time.
    Collectible,
    /// A walkable cell holding an obstacle.
    Obstacle,
}

impl CellKind {
    pub fn is_walkable(self) -> bool {
        self != CellKind::Wall
    }
}

/// The immutable maze layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: UVec2,
    /// Row-major cells.
    cells: Vec<CellKind>,
    spawn: UVec2,
}

/// Parser for converting raw board rows into a [`Grid`].
pub struct GridParser;

impl GridParser {
    /// Parses a single character into a cell kind.
    ///
    /// `S` marks the spawn point and is walkable path.
    pub fn parse_character(c: char) -> Result<CellKind, ParseError> {
        match c {
            '#' => Ok(CellKind::Wall),
            '.' | ' ' | 'S' => Ok(CellKind::Path),
            'o' => Ok(CellKind::Collectible),
            'X' => Ok(CellKind::Obstacle),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into a grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty, rows differ in length, a character
    /// is unknown, or the board does not contain exactly one `S`.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Grid, ParseError> {
        let width = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        if width == 0 {
            return Err(ParseError::EmptyBoard);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        let mut spawns = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(ParseError::RaggedRow {
                    row: y,
                    expected: width,
                    found,
                });
            }

            for (x, character) in row.chars().enumerate() {
                cells.push(Self::parse_character(character)?);
                if character == 'S' {
                    spawns.push(UVec2::new(x as u32, y as u32));
                }
            }
        }

        let [spawn] = spawns[..] else {
            return Err(ParseError::InvalidSpawnCount(spawns.len()));
        };

        Ok(Grid {
            size: UVec2::new(width as u32, rows.len() as u32),
            cells,
            spawn,
        })
    }
}

impl Grid {
    /// The grid size, in cells.
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// The grid size, in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        (self.size * CELL_SIZE).as_vec2()
    }

    pub fn spawn(&self) -> UVec2 {
        self.spawn
    }

    /// Returns the cell kind, or `None` outside the grid.
    pub fn get(&self, cell: IVec2) -> Option<CellKind> {
        if cell.x < 0 || cell.y < 0 || cell.x >= self.size.x as i32 || cell.y >= self.size.y as i32 {
            return None;
        }
        self.cells.get(cell.y as usize * self.size.x as usize + cell.x as usize).copied()
    }

    pub fn is_walkable(&self, cell: IVec2) -> bool {
        self.get(cell).is_some_and(CellKind::is_walkable)
    }

    /// The cell containing a pixel coordinate, by flooring division by the cell size.
    pub fn cell_at(point: Vec2) -> IVec2 {
        (point / CELL_SIZE as f32).floor().as_ivec2()
    }

    /// The pixel coordinate at the center of a cell.
    pub fn cell_center(cell: UVec2) -> Vec2 {
        (cell * CELL_SIZE).as_vec2() + Vec2::splat(CELL_SIZE as f32 / 2.0)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (UVec2, CellKind)> + '_ {
        let width = self.size.x;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, kind)| (UVec2::new(index as u32 % width, index as u32 / width), *kind))
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|cell| **cell == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MAZE_BOARD;

    #[test]
    fn test_parse_character() {
        assert!(matches!(GridParser::parse_character('#').unwrap(), CellKind::Wall));
        assert!(matches!(GridParser::parse_character('.').unwrap(), CellKind::Path));
        assert!(matches!(GridParser::parse_character(' ').unwrap(), CellKind::Path));
        assert!(matches!(GridParser::parse_character('S').unwrap(), CellKind::Path));
        assert!(matches!(GridParser::parse_character('o').unwrap(), CellKind::Collectible));
        assert!(matches!(GridParser::parse_character('X').unwrap(), CellKind::Obstacle));

        // Test invalid character
        assert!(GridParser::parse_character('Z').is_err());
    }

    #[test]
    fn test_parse_builtin_board() {
        let grid = GridParser::parse(&MAZE_BOARD).unwrap();

        assert_eq!(grid.size().y as usize, MAZE_BOARD.len());
        assert_eq!(grid.size().x as usize, MAZE_BOARD[0].len());
        assert!(grid.count(CellKind::Collectible) > 0);
        assert!(grid.is_walkable(grid.spawn().as_ivec2()));
    }

    #[test]
    fn test_parse_board_invalid_character() {
        let result = GridParser::parse(&["###", "#SZ", "###"]);
        assert!(matches!(result.unwrap_err(), ParseError::UnknownCharacter('Z')));
    }

    #[test]
    fn test_cell_at_floors_negative_coordinates() {
        assert_eq!(Grid::cell_at(Vec2::new(-1.0, 5.0)), IVec2::new(-1, 0));
        assert_eq!(Grid::cell_at(Vec2::new(CELL_SIZE as f32, 0.0)), IVec2::new(1, 0));
    }

    #[test]
    fn test_get_outside_bounds() {
        let grid = GridParser::parse(&["S.", ".o"]).unwrap();
        assert_eq!(grid.get(IVec2::new(-1, 0)), None);
        assert_eq!(grid.get(IVec2::new(2, 0)), None);
        assert_eq!(grid.get(IVec2::new(1, 1)), Some(CellKind::Collectible));
    }
}
