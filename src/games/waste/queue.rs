//! The current item plus a fixed lookahead of upcoming ones.

use circular_buffer::CircularBuffer;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::constants::waste::LOOKAHEAD;

use super::item::WasteItem;

pub struct ClassificationQueue {
    current: Option<WasteItem>,
    upcoming: CircularBuffer<LOOKAHEAD, WasteItem>,
    rng: SmallRng,
}

impl ClassificationQueue {
    /// A queue drawing from `seed`, or from OS entropy when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        Self {
            current: None,
            upcoming: CircularBuffer::new(),
            rng,
        }
    }

    /// Discards everything and draws a fresh current item and lookahead.
    pub fn refill(&mut self, catalog: &[WasteItem]) {
        self.upcoming.clear();
        self.current = self.draw(catalog);
        while !self.upcoming.is_full() {
            let Some(item) = self.draw(catalog) else {
                break;
            };
            self.upcoming.push_back(item);
        }
    }

    /// Promotes the first upcoming item and draws a replacement for the tail.
    pub fn advance(&mut self, catalog: &[WasteItem]) -> Option<&WasteItem> {
        self.current = self.upcoming.pop_front();
        if let Some(item) = self.draw(catalog) {
            self.upcoming.push_back(item);
        }
        self.current.as_ref()
    }

    pub fn current(&self) -> Option<&WasteItem> {
        self.current.as_ref()
    }

    pub fn upcoming(&self) -> impl Iterator<Item = &WasteItem> + '_ {
        self.upcoming.iter()
    }

    /// Uniform draw with replacement.
    fn draw(&mut self, catalog: &[WasteItem]) -> Option<WasteItem> {
        if catalog.is_empty() {
            return None;
        }
        let item = catalog[self.rng.random_range(0..catalog.len())].clone();
        trace!(item = %item.name, "Drew item");
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::super::item::Category;
    use super::*;

    fn catalog() -> Vec<WasteItem> {
        vec![
            WasteItem::new("Banana Peel", "🍌", Category::Organic, 10),
            WasteItem::new("Battery", "🔋", Category::Hazardous, 20),
            WasteItem::new("Newspaper", "📰", Category::Recyclable, 10),
        ]
    }

    #[test]
    fn test_refill_fills_lookahead() {
        let mut queue = ClassificationQueue::new(Some(7));
        queue.refill(&catalog());
        assert!(queue.current().is_some());
        assert_eq!(queue.upcoming().count(), LOOKAHEAD);
    }

    #[test]
    fn test_advance_promotes_head() {
        let catalog = catalog();
        let mut queue = ClassificationQueue::new(Some(7));
        queue.refill(&catalog);

        let next = queue.upcoming().next().cloned();
        assert_eq!(queue.advance(&catalog).cloned(), next);
        assert_eq!(queue.upcoming().count(), LOOKAHEAD);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let catalog = catalog();
        let mut a = ClassificationQueue::new(Some(42));
        let mut b = ClassificationQueue::new(Some(42));
        a.refill(&catalog);
        b.refill(&catalog);

        for _ in 0..10 {
            assert_eq!(a.advance(&catalog).cloned(), b.advance(&catalog).cloned());
        }
    }

    #[test]
    fn test_empty_catalog_draws_nothing() {
        let mut queue = ClassificationQueue::new(Some(1));
        queue.refill(&[]);
        assert!(queue.current().is_none());
        assert_eq!(queue.upcoming().count(), 0);
    }
}
