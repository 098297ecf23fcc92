use crate::food::Food;
use crate::snake::{Direction, Snake};
use crate::Cell;

// Identity tags for occupied cells. Mapping a tag to a glyph (or a color)
// is the presentation layer's job, not part of the game state.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tint {
    Head(Direction),
    Body,
    Food,
    Blank,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Patch {
    pub cell: Cell,
    pub tint: Tint,
}

impl Patch {
    pub fn new(cell: Cell, tint: Tint) -> Self {
        Patch { cell, tint }
    }
}

// Each drawable game entity reports the cells it occupies, tagged
pub trait Drawable {
    fn push_patches(&self, out: &mut Vec<Patch>);
}

impl Drawable for Snake {
    fn push_patches(&self, out: &mut Vec<Patch>) {
        let mut cells = self.body().iter();

        if let Some(&head) = cells.next() {
            out.push(Patch::new(head, Tint::Head(self.direction())));
        }
        for &cell in cells {
            out.push(Patch::new(cell, Tint::Body));
        }
    }
}

impl Drawable for Food {
    fn push_patches(&self, out: &mut Vec<Patch>) {
        out.push(Patch::new(self.cell(), Tint::Food));
    }
}
