//! The render contract: game state in, draw primitives out.
//!
//! Projections are pure. The same snapshot always yields the same primitive
//! sequence, so scenes can be compared in tests without a drawing surface.

use bitflags::bitflags;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const WALL: Color = Color::rgb(33, 33, 222);
    pub const PATH: Color = Color::rgb(18, 18, 30);
    pub const ACTOR: Color = Color::rgb(255, 255, 0);
    pub const COLLECTIBLE: Color = Color::rgb(255, 184, 151);
    pub const OBSTACLE: Color = Color::rgb(255, 0, 0);
    pub const SUCCESS: Color = Color::rgb(46, 204, 113);
    pub const WARNING: Color = Color::rgb(241, 196, 15);
    pub const MUTED: Color = Color::rgb(127, 140, 141);
}

/// A single drawing instruction in engine-local pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect { origin: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    /// An open polyline through `points`.
    Stroke { points: Vec<Vec2>, width: f32, color: Color },
    Text { position: Vec2, text: String, size: f32, color: Color },
}

impl Primitive {
    pub fn text(position: Vec2, text: impl Into<String>, size: f32, color: Color) -> Self {
        Primitive::Text {
            position,
            text: text.into(),
            size,
            color,
        }
    }
}

bitflags! {
    /// Which parts of the picture changed since the last frame.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Dirty: u8 {
        const SCENE = 1 << 0;
        const ACTOR = 1 << 1;
        const ENTITIES = 1 << 2;
        const PATHS = 1 << 3;
        const QUEUE = 1 << 4;
        const BINS = 1 << 5;
        const HUD = 1 << 6;
    }
}

/// Height of the strip above the playfield reserved for the HUD.
pub const HUD_HEIGHT: f32 = 28.0;
const HUD_TEXT_SIZE: f32 = 16.0;

/// Projects the session-level overlay: score, time and any extra counters.
pub fn hud(score: u32, time: &str, banner: Option<&str>, extras: &[(&str, String)]) -> Vec<Primitive> {
    let mut primitives = vec![
        Primitive::text(Vec2::new(8.0, 6.0), format!("SCORE {score}"), HUD_TEXT_SIZE, Color::WHITE),
        Primitive::text(Vec2::new(160.0, 6.0), format!("TIME {time}"), HUD_TEXT_SIZE, Color::WHITE),
    ];

    for (index, (label, value)) in extras.iter().enumerate() {
        primitives.push(Primitive::text(
            Vec2::new(280.0 + index as f32 * 110.0, 6.0),
            format!("{label} {value}"),
            HUD_TEXT_SIZE,
            Color::WHITE,
        ));
    }

    if let Some(banner) = banner {
        primitives.push(Primitive::text(
            Vec2::new(8.0, HUD_HEIGHT + 8.0),
            banner,
            HUD_TEXT_SIZE * 2.0,
            Color::WARNING,
        ));
    }

    primitives
}

/// Formats whole seconds as `m:ss`.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(59), "0:59");
        assert_eq!(format_clock(125), "2:05");
    }

    #[test]
    fn test_hud_banner_is_last() {
        let primitives = hud(10, "0:30", Some("PAUSED"), &[("LIVES", "3".to_string())]);
        assert_eq!(primitives.len(), 4);
        assert!(matches!(&primitives[3], Primitive::Text { text, .. } if text == "PAUSED"));
    }
}
