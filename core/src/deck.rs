//! Page navigator: a clamped index over the fixed deck of card pages.

use billet_types::{Classification, PageKind, TurnDirection};

/// One page slot with its rendered classification and stacking order.
///
/// Classification and stacking are recomputed from the current index on
/// every successful turn, never mutated piecemeal.
#[derive(Debug, Clone, Copy)]
pub struct PageSlot {
    pub kind: PageKind,
    pub classification: Classification,
    /// Paint order: the front of the deck stacks highest.
    pub stacking: usize,
}

/// Holds the current position in the ordered page sequence.
///
/// `turn` clamps at both ends: turning past the last page or before the
/// first is a silent no-op, not an error.
#[derive(Debug)]
pub struct Deck {
    current: usize,
    slots: Vec<PageSlot>,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        let total = PageKind::ALL.len();
        let slots = PageKind::ALL
            .iter()
            .enumerate()
            .map(|(position, kind)| PageSlot {
                kind: *kind,
                classification: Classification::of(position, 0),
                stacking: total - position,
            })
            .collect();
        Self { current: 0, slots }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn active_page(&self) -> PageKind {
        self.slots[self.current].kind
    }

    #[must_use]
    pub fn slots(&self) -> &[PageSlot] {
        &self.slots
    }

    /// Move one page in `direction`. Returns whether the index changed.
    ///
    /// On a successful transition every slot's classification and stacking
    /// order are recomputed from the new index. Callers are responsible for
    /// resetting page-scoped transients (the evader) when this returns true.
    pub fn turn(&mut self, direction: TurnDirection) -> bool {
        let moved = match direction {
            TurnDirection::Next if self.current + 1 < self.slots.len() => {
                self.current += 1;
                true
            }
            TurnDirection::Prev if self.current > 0 => {
                self.current -= 1;
                true
            }
            TurnDirection::Next | TurnDirection::Prev => false,
        };
        if moved {
            self.apply_classes();
        }
        moved
    }

    fn apply_classes(&mut self) {
        let total = self.slots.len();
        let current = self.current;
        for (position, slot) in self.slots.iter_mut().enumerate() {
            slot.classification = Classification::of(position, current);
            slot.stacking = total - position;
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
