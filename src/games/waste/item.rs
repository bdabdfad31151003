use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter};

/// Ground-truth waste categories, one bin each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Recyclable,
    Organic,
    Hazardous,
    General,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WasteItem {
    pub name: String,
    /// Short symbol shown in place of artwork.
    pub glyph: String,
    pub category: Category,
    pub points: u32,
}

impl WasteItem {
    pub fn new(name: &str, glyph: &str, category: Category, points: u32) -> Self {
        Self {
            name: name.to_string(),
            glyph: glyph.to_string(),
            category,
            points,
        }
    }
}

/// A bin and everything the player has put in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bin {
    pub category: Category,
    pub items: Vec<WasteItem>,
    pub correct: u32,
}

impl Bin {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            items: Vec::new(),
            correct: 0,
        }
    }

    /// Accepts `item` and returns whether it belonged here.
    pub fn receive(&mut self, item: WasteItem) -> bool {
        let correct = item.category == self.category;
        if correct {
            self.correct += 1;
        }
        self.items.push(item);
        correct
    }
}
