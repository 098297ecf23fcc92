use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::Grid;
use crate::snake::Snake;
use crate::Cell;

pub struct Food {
    cell: Cell,
}

impl Food {
    // None only when the snake already covers the whole grid
    pub fn spawn<R: Rng>(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Food> {
        pick_free_cell(grid, snake, rng).map(|cell| Food { cell })
    }

    #[cfg(test)]
    pub fn at(cell: Cell) -> Food {
        Food { cell }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn relocate<R: Rng>(&mut self, grid: &Grid, snake: &Snake, rng: &mut R) -> bool {
        match pick_free_cell(grid, snake, rng) {
            Some(cell) => {
                self.cell = cell;
                true
            }
            None => false,
        }
    }
}

// Rejection sampling with a bounded number of attempts, then a uniform draw
// among the explicitly enumerated free cells
fn pick_free_cell<R: Rng>(grid: &Grid, snake: &Snake, rng: &mut R) -> Option<Cell> {
    for _ in 0..grid.area() {
        let cell = grid.random_cell(rng);
        if !snake.body().contains(&cell) {
            return Some(cell);
        }
    }

    debug!("food sampling ran out of attempts, drawing from the free cells");
    let free: Vec<Cell> = grid.cells().filter(|cell| !snake.body().contains(cell)).collect();
    free.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::snake::Direction;

    #[test]
    fn relocation_avoids_the_snake_body() {
        let grid = Grid::new(4, 3);
        let mut rng = StdRng::seed_from_u64(7);

        // Snake covering the whole middle row
        let mut snake = Snake::new((0, 1), Direction::Right);
        for _ in 0..3 {
            snake.grow();
            snake.advance(&grid);
        }
        assert_eq!(snake.len(), 4);

        let mut food = Food::spawn(&grid, &snake, &mut rng).unwrap();
        for _ in 0..100 {
            assert!(food.relocate(&grid, &snake, &mut rng));
            let (col, row) = food.cell();
            assert!(!snake.body().contains(&food.cell()));
            assert!(col < 4 && row < 3);
        }
    }

    #[test]
    fn spawn_fails_only_on_a_full_board() {
        let grid = Grid::new(1, 1);
        let mut rng = StdRng::seed_from_u64(1);
        let snake = Snake::new(grid.center(), Direction::Right);

        assert!(Food::spawn(&grid, &snake, &mut rng).is_none());
    }

    #[test]
    fn initial_placement_avoids_the_snake() {
        let grid = Grid::new(2, 1);
        let snake = Snake::new(grid.center(), Direction::Right);

        // Any seed must land on the single free cell
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let food = Food::spawn(&grid, &snake, &mut rng).unwrap();
            assert_eq!(food.cell(), (0, 0));
        }
    }
}
