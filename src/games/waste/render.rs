use glam::Vec2;

use crate::render::{Color, Primitive, HUD_HEIGHT};

use super::{Category, WasteGame};

const BIN_SIZE: Vec2 = Vec2::new(140.0, 110.0);
const BIN_GAP: f32 = 16.0;
const BIN_TOP: f32 = 300.0;
const ITEM_CENTER: Vec2 = Vec2::new(320.0, HUD_HEIGHT + 120.0);
const GLYPH_SIZE: f32 = 48.0;
const LABEL_SIZE: f32 = 14.0;

fn bin_color(category: Category) -> Color {
    match category {
        Category::Recyclable => Color::rgb(52, 120, 246),
        Category::Organic => Color::rgb(76, 175, 80),
        Category::Hazardous => Color::rgb(229, 57, 53),
        Category::General => Color::rgb(120, 120, 120),
    }
}

pub(super) fn scene(game: &WasteGame) -> Vec<Primitive> {
    let mut primitives = Vec::new();

    if let Some(item) = game.current() {
        // Dim the item once it has been sorted and is waiting to be replaced.
        let color = if game.is_awaiting_next() { Color::MUTED } else { Color::WHITE };
        primitives.push(Primitive::text(
            ITEM_CENTER - Vec2::new(GLYPH_SIZE / 2.0, GLYPH_SIZE / 2.0),
            item.glyph.as_str(),
            GLYPH_SIZE,
            color,
        ));
        primitives.push(Primitive::text(
            ITEM_CENTER + Vec2::new(-GLYPH_SIZE / 2.0, GLYPH_SIZE / 2.0 + 4.0),
            item.name.as_str(),
            LABEL_SIZE,
            color,
        ));
    }

    for (slot, item) in game.upcoming().enumerate() {
        let origin = ITEM_CENTER + Vec2::new(120.0 + slot as f32 * 48.0, -12.0);
        primitives.push(Primitive::text(origin, item.glyph.as_str(), 24.0, Color::MUTED));
    }

    for (index, bin) in game.bins().iter().enumerate() {
        let origin = Vec2::new(BIN_GAP + index as f32 * (BIN_SIZE.x + BIN_GAP), BIN_TOP);
        primitives.push(Primitive::Rect {
            origin,
            size: BIN_SIZE,
            color: bin_color(bin.category),
        });
        primitives.push(Primitive::text(
            origin + Vec2::new(8.0, 8.0),
            bin.category.as_ref().to_uppercase(),
            LABEL_SIZE,
            Color::WHITE,
        ));
        primitives.push(Primitive::text(
            origin + Vec2::new(8.0, BIN_SIZE.y - LABEL_SIZE - 8.0),
            format!("{}/{}", bin.correct, bin.items.len()),
            LABEL_SIZE,
            Color::WHITE,
        ));
    }

    primitives
}
