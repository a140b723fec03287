use crate::foundation::core::{Rect, Size};

/// Card footprint inside the sheet.
pub const CARD_SIZE: Size = Size::new(380, 120);

pub const GRID_LEFT: u32 = 45;
pub const GRID_RIGHT: u32 = 2045;
pub const COLUMN_STRIDE: u32 = 400;
pub const ROW_STRIDE: u32 = 125;

/// Cards per row before the cursor wraps back to [`GRID_LEFT`].
pub const GRID_COLUMNS: u32 = (GRID_RIGHT - GRID_LEFT) / COLUMN_STRIDE;

/// The two best-score groups, each with its own grid origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SheetSection {
    Standard,
    Deluxe,
}

impl SheetSection {
    pub const ALL: [SheetSection; 2] = [SheetSection::Standard, SheetSection::Deluxe];

    pub fn origin(self) -> (u32, u32) {
        match self {
            SheetSection::Standard => (GRID_LEFT, 285),
            SheetSection::Deluxe => (GRID_LEFT, 1225),
        }
    }

    /// Rows reserved for this group on the sheet (35 Standard, 15 Deluxe cards).
    pub fn design_rows(self) -> u32 {
        match self {
            SheetSection::Standard => 7,
            SheetSection::Deluxe => 3,
        }
    }
}

/// Position of one card: its group and its 0-based place in that group's input order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSlot {
    pub section: SheetSection,
    pub index: usize,
}

impl GridSlot {
    pub fn new(section: SheetSection, index: usize) -> Self {
        Self { section, index }
    }

    /// Rank shown on the card (`#1` for the first entry of a group).
    pub fn display_rank(self) -> usize {
        self.index + 1
    }

    /// Top-left pixel of the slot.
    ///
    /// Equivalent to walking a cursor from the group origin in row-major order: advance by
    /// [`COLUMN_STRIDE`], and on reaching [`GRID_RIGHT`] return to [`GRID_LEFT`] one
    /// [`ROW_STRIDE`] lower.
    pub fn position(self) -> (u32, u32) {
        let (x0, y0) = self.section.origin();
        let cols = GRID_COLUMNS as usize;
        let col = (self.index % cols) as u32;
        let row = (self.index / cols) as u32;
        (x0 + col * COLUMN_STRIDE, y0 + row * ROW_STRIDE)
    }

    pub fn rect(self) -> Rect {
        let (x, y) = self.position();
        let (x, y) = (f64::from(x), f64::from(y));
        Rect::new(
            x,
            y,
            x + f64::from(CARD_SIZE.width),
            y + f64::from(CARD_SIZE.height),
        )
    }
}

/// Slots for `len` entries of `section`, in input order.
pub fn section_slots(section: SheetSection, len: usize) -> impl Iterator<Item = GridSlot> {
    (0..len).map(move |index| GridSlot::new(section, index))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
