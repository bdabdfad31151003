//! Built-in content: the default maze board, puzzle set and waste items.

use crate::games::dots::{Puzzle, Waypoint};
use crate::games::waste::{Category, WasteItem};

/// The default maze board.
///
/// `#` wall, `.` path, `o` collectible, `X` obstacle, `S` spawn.
pub const MAZE_BOARD: [&str; 9] = [
    "###############",
    "#o....#.....o.#",
    "#.###.#.###.#.#",
    "#.#o......#...#",
    "#.#.##X##.#.###",
    "#...#S..#....o#",
    "###.#.#.#.##..#",
    "#o....#.....X.#",
    "###############",
];

fn puzzle(name: &str, points: u32, dots: &[(f32, f32)]) -> Puzzle {
    Puzzle {
        name: name.to_string(),
        points,
        waypoints: dots
            .iter()
            .zip(1..)
            .map(|(&(x, y), label)| Waypoint::new(label, x, y))
            .collect(),
    }
}

/// Puzzles in play order.
pub fn puzzles() -> Vec<Puzzle> {
    vec![
        puzzle("Triangle", 30, &[(320.0, 80.0), (480.0, 360.0), (160.0, 360.0)]),
        puzzle(
            "House",
            50,
            &[(200.0, 380.0), (200.0, 220.0), (320.0, 100.0), (440.0, 220.0), (440.0, 380.0)],
        ),
        puzzle(
            "Star",
            80,
            &[
                (320.0, 60.0),
                (380.0, 200.0),
                (530.0, 200.0),
                (410.0, 290.0),
                (460.0, 430.0),
                (320.0, 340.0),
                (180.0, 430.0),
                (230.0, 290.0),
                (110.0, 200.0),
                (260.0, 200.0),
            ],
        ),
    ]
}

pub fn waste_items() -> Vec<WasteItem> {
    vec![
        WasteItem::new("Plastic Bottle", "🧴", Category::Recyclable, 10),
        WasteItem::new("Newspaper", "📰", Category::Recyclable, 10),
        WasteItem::new("Glass Jar", "🫙", Category::Recyclable, 10),
        WasteItem::new("Tin Can", "🥫", Category::Recyclable, 10),
        WasteItem::new("Banana Peel", "🍌", Category::Organic, 10),
        WasteItem::new("Apple Core", "🍎", Category::Organic, 10),
        WasteItem::new("Eggshells", "🥚", Category::Organic, 10),
        WasteItem::new("Battery", "🔋", Category::Hazardous, 20),
        WasteItem::new("Paint Can", "🎨", Category::Hazardous, 20),
        WasteItem::new("Light Bulb", "💡", Category::Hazardous, 20),
        WasteItem::new("Chip Bag", "🍟", Category::General, 10),
        WasteItem::new("Broken Toy", "🧸", Category::General, 10),
    ]
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_board_is_rectangular() {
        let width = MAZE_BOARD[0].len();
        assert!(MAZE_BOARD.iter().all(|row| row.len() == width));
        assert_eq!(MAZE_BOARD.iter().flat_map(|row| row.chars()).filter(|&c| c == 'S').count(), 1);
    }

    #[test]
    fn test_puzzles_are_valid() {
        for puzzle in puzzles() {
            assert!(puzzle.validate().is_ok(), "{} is invalid", puzzle.name);
        }
    }

    #[test]
    fn test_every_category_is_stocked() {
        let items = waste_items();
        for category in Category::iter() {
            assert!(items.iter().any(|item| item.category == category), "no {category} items");
        }
        assert!(items.iter().all(|item| item.points > 0));
    }
}
