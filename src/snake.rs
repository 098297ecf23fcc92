use std::collections::VecDeque;

use crate::grid::Grid;
use crate::Cell;
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum MoveResult {
    Moved { new_head: Cell, old_head: Cell, vacated: Option<Cell> },
    SelfCollision
}

pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending: Option<Direction>,
    target_len: usize,
}

impl Snake {
    pub fn new(pos: Cell, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(pos);
        Snake { body, direction, pending: None, target_len: 1 }
    }

    pub fn head(&self) -> Cell {
        *self.body.front().unwrap()
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn queue_direction(&mut self, new_direction: Direction) {
        match (new_direction, self.direction) {
            (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right) => {},
            _ => self.pending = Some(new_direction),
        };
    }

    pub fn apply_pending_direction(&mut self) {
        if let Some(direction) = self.pending.take() {
            self.direction = direction;
        }
    }

    pub fn advance(&mut self, grid: &Grid) -> MoveResult {
        let old_head = self.head();
        let new_head = grid.step(old_head, self.direction);

        // The tail cell is fair game when it gets vacated by this very move
        let drops_tail = self.body.len() >= self.target_len;
        let checked = if drops_tail { self.body.len() - 1 } else { self.body.len() };

        if self.body.iter().take(checked).any(|&cell| cell == new_head) {
            return SelfCollision;
        }

        self.body.push_front(new_head);

        let vacated = if self.body.len() > self.target_len {
            self.body.pop_back()
        } else {
            None
        };

        Moved { new_head, old_head, vacated }
    }

    pub fn grow(&mut self) {
        self.target_len += 1;
    }

    pub fn reset(&mut self, grid: &Grid) {
        self.body.clear();
        self.body.push_front(grid.center());
        self.direction = Right;
        self.pending = None;
        self.target_len = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake_of_len(grid: &Grid, len: usize) -> Snake {
        let mut snake = Snake::new((2, 5), Right);
        for _ in 1..len {
            snake.grow();
            snake.advance(grid);
        }
        snake
    }

    #[test]
    fn advance_moves_the_head_and_keeps_the_length() {
        let grid = Grid::new(10, 10);
        let mut snake = snake_of_len(&grid, 3);
        let old_tail = *snake.body().back().unwrap();

        let result = snake.advance(&grid);

        assert_eq!(result, Moved { new_head: (5, 5), old_head: (4, 5), vacated: Some(old_tail) });
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), (5, 5));
    }

    #[test]
    fn grow_defers_the_tail_drop_by_one_advance() {
        let grid = Grid::new(10, 10);
        let mut snake = snake_of_len(&grid, 2);
        snake.grow();

        let result = snake.advance(&grid);

        assert_eq!(result, Moved { new_head: (4, 5), old_head: (3, 5), vacated: None });
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn advance_wraps_at_the_grid_edge() {
        let grid = Grid::new(32, 24);
        let mut snake = Snake::new((31, 12), Right);

        snake.advance(&grid);

        assert_eq!(snake.head(), (0, 12));
    }

    #[test]
    fn reversal_is_silently_ignored() {
        let grid = Grid::new(10, 10);
        let mut snake = Snake::new((5, 5), Right);

        snake.queue_direction(Left);
        snake.apply_pending_direction();

        assert_eq!(snake.direction(), Right);
        snake.advance(&grid);
        assert_eq!(snake.head(), (6, 5));
    }

    #[test]
    fn reversal_does_not_clobber_an_earlier_pending_turn() {
        let mut snake = Snake::new((5, 5), Right);

        snake.queue_direction(Up);
        snake.queue_direction(Left);
        snake.apply_pending_direction();

        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn last_queued_direction_wins() {
        let mut snake = Snake::new((5, 5), Right);

        snake.queue_direction(Up);
        snake.queue_direction(Down);
        snake.apply_pending_direction();

        assert_eq!(snake.direction(), Down);
    }

    #[test]
    fn tail_chasing_is_allowed() {
        let grid = Grid::new(10, 10);
        let mut snake = snake_of_len(&grid, 4);

        snake.queue_direction(Down);
        snake.apply_pending_direction();
        snake.advance(&grid);
        snake.queue_direction(Left);
        snake.apply_pending_direction();
        snake.advance(&grid);
        snake.queue_direction(Up);
        snake.apply_pending_direction();

        // The head enters the cell the tail is leaving this same move
        let result = snake.advance(&grid);

        assert_eq!(result, Moved { new_head: (4, 5), old_head: (4, 6), vacated: Some((4, 5)) });
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn self_collision_leaves_the_state_unchanged() {
        let grid = Grid::new(10, 10);
        let mut snake = snake_of_len(&grid, 5);

        snake.queue_direction(Down);
        snake.apply_pending_direction();
        snake.advance(&grid);
        snake.queue_direction(Left);
        snake.apply_pending_direction();
        snake.advance(&grid);
        snake.queue_direction(Up);
        snake.apply_pending_direction();

        let before: Vec<Cell> = snake.body().iter().copied().collect();
        let result = snake.advance(&grid);

        assert_eq!(result, SelfCollision);
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), before);
        assert_eq!(snake.len(), 5);

        snake.reset(&grid);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), grid.center());
        assert_eq!(snake.direction(), Right);
    }
}
