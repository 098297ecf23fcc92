use rand::Rng;

use crate::snake::Direction;
use crate::{Cell, GridInt};

pub struct Grid {
    width: GridInt,
    height: GridInt,
}

impl Grid {
    pub fn new(width: GridInt, height: GridInt) -> Self {
        Grid { width, height }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn center(&self) -> Cell {
        (self.width / 2, self.height / 2)
    }

    // The playfield is a torus: both axes wrap, coordinates never leave the grid
    pub fn wrap(&self, cell: Cell, delta: (i32, i32)) -> Cell {
        let col = (cell.0 as i32 + delta.0).rem_euclid(self.width as i32);
        let row = (cell.1 as i32 + delta.1).rem_euclid(self.height as i32);
        (col as GridInt, row as GridInt)
    }

    pub fn step(&self, cell: Cell, direction: Direction) -> Cell {
        self.wrap(cell, direction.delta())
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        (rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| (col, row)))
    }
}
