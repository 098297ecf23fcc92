use std::{cmp::max, process::exit, thread::sleep, time::Duration};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::food::Food;
use crate::grid::Grid;
use crate::render::{Drawable, Patch, Tint};
use crate::snake::{Direction::{self, *}, MoveResult, Snake};
use crate::term::TermManager;
use crate::{Cell, GridInt};

const POLL_INTERVAL_MS: u64 = 5;

#[derive(Copy, Clone)]
pub struct GameConfig {
    pub grid_width: GridInt,
    pub grid_height: GridInt,
    pub ticks_per_second: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { grid_width: 32, grid_height: 24, ticks_per_second: 15 }
    }
}

pub enum TickOutcome {
    Stepped { new_head: Cell, old_head: Cell, vacated: Option<Cell>, new_food: Option<Cell> },
    Crashed,
    Filled,
}

// The per-tick state machine: grid, snake, food and the food RNG.
// Knows nothing about the terminal.
pub struct World {
    grid: Grid,
    snake: Snake,
    food: Food,
    rng: StdRng,
}

impl World {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    fn with_rng(config: &GameConfig, mut rng: StdRng) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        let snake = Snake::new(grid.center(), Right);
        let food = Food::spawn(&grid, &snake, &mut rng).expect("No free cell to place the food.");
        World { grid, snake, food, rng }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn tick(&mut self, intent: Option<Direction>) -> TickOutcome {
        if let Some(direction) = intent {
            self.snake.queue_direction(direction);
        }
        self.snake.apply_pending_direction();

        let mut new_food = None;
        if self.snake.head() == self.food.cell() {
            self.snake.grow();
            if !self.food.relocate(&self.grid, &self.snake, &mut self.rng) {
                info!("board filled at length {}", self.snake.len());
                self.start_over();
                return TickOutcome::Filled;
            }
            new_food = Some(self.food.cell());
        }

        match self.snake.advance(&self.grid) {
            MoveResult::SelfCollision => {
                info!("snake bit itself at length {}", self.snake.len());
                self.start_over();
                TickOutcome::Crashed
            }
            MoveResult::Moved { new_head, old_head, vacated } => {
                TickOutcome::Stepped { new_head, old_head, vacated, new_food }
            }
        }
    }

    // The reset drops the snake back onto the center cell; move the food
    // away if it happens to sit there, it must never overlap the body
    fn start_over(&mut self) {
        self.snake.reset(&self.grid);
        if self.food.cell() == self.snake.head() {
            self.food.relocate(&self.grid, &self.snake, &mut self.rng);
        }
    }
}

pub struct SnakeGame {
    config: GameConfig,
    paused: bool,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: GameConfig) -> Self {
        SnakeGame { config, paused: false, term: TermManager::new() }
    }

    pub fn initialize(&mut self) {
        self.term.setup(self.config.grid_width, self.config.grid_height);
    }

    pub fn show_intro(&mut self) {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines);

        if is_ctrl_c(&self.term.read_key_blocking()) {
            self.clean_exit()
        }

        self.term.hide_message();
    }

    pub fn play(&mut self) {
        let mut world = World::new(&self.config);
        let tick_ms = 1000 / max(1, self.config.ticks_per_second);
        let polls_per_step = max(1, tick_ms / POLL_INTERVAL_MS);
        let mut polls_until_step = polls_per_step;
        let mut intent: Option<Direction> = None;

        self.term.draw_border();
        self.repaint(&world);

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue() {
                match &key_ev {
                    ev if is_ctrl_c(ev) => self.clean_exit(),
                    KeyEvent { code, modifiers: _ } => match code {
                        KeyCode::Char('w') | KeyCode::Up => intent = Some(Up),
                        KeyCode::Char('a') | KeyCode::Left => intent = Some(Left),
                        KeyCode::Char('s') | KeyCode::Down => intent = Some(Down),
                        KeyCode::Char('d') | KeyCode::Right => intent = Some(Right),
                        KeyCode::Esc => self.toggle_pause(),
                        _ => {}
                    }
                }
            }

            if self.paused { continue; }

            // Not paused, count down til the next game step
            polls_until_step -= 1;
            if polls_until_step > 0 { continue; }
            polls_until_step = polls_per_step;

            match world.tick(intent.take()) {
                TickOutcome::Stepped { new_head, old_head, vacated, new_food } => {
                    self.paint_step(&world, new_head, old_head, vacated, new_food);
                }
                TickOutcome::Crashed => self.repaint(&world),
                TickOutcome::Filled => {
                    self.term.show_message(&[
                        "You won!",
                        "",
                        "Press any key to play again,",
                        "or CTRL+C to quit."
                    ]);

                    if is_ctrl_c(&self.term.read_key_blocking()) {
                        self.clean_exit()
                    }

                    self.term.hide_message();
                    self.repaint(&world);
                }
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn repaint(&mut self, world: &World) {
        self.term.clear_playfield();

        let mut patches = vec![];
        world.snake().push_patches(&mut patches);
        world.food().push_patches(&mut patches);

        for patch in &patches {
            self.term.paint(patch);
        }
        self.term.flush();
    }

    fn paint_step(
        &mut self,
        world: &World,
        new_head: Cell,
        old_head: Cell,
        vacated: Option<Cell>,
        new_food: Option<Cell>,
    ) {
        // Clear the vacated cell first, the head may be entering it
        if let Some(cell) = vacated {
            self.term.paint(&Patch::new(cell, Tint::Blank));
        }
        if world.snake().len() > 1 {
            self.term.paint(&Patch::new(old_head, Tint::Body));
        }
        self.term.paint(&Patch::new(new_head, Tint::Head(world.snake().direction())));

        if let Some(cell) = new_food {
            self.term.paint(&Patch::new(cell, Tint::Food));
        }
        self.term.flush();
    }

    fn toggle_pause(&mut self) {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"]);
        } else {
            self.term.hide_message();
        }

        self.paused = !self.paused;
    }

    fn clean_exit(&mut self) {
        self.term.restore();
        exit(0);
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
