mod game;
mod term;
mod grid;
mod snake;
mod food;
mod render;

use std::fs::File;

use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::game::{GameConfig, SnakeGame};

pub type GridInt = u16;
pub type Cell = (GridInt, GridInt);

fn main() {
    // Stdout belongs to the game screen, so the log goes to a file
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create("wrapsnake.log").expect("Error creating log file."),
    )
    .expect("Error initializing logger.");

    let config = GameConfig::default();
    info!(
        "starting on a {}x{} grid at {} ticks/s",
        config.grid_width, config.grid_height, config.ticks_per_second
    );

    let mut game = SnakeGame::new(config);
    game.initialize();
    game.show_intro();

    // Runs until the player quits with CTRL+C
    game.play();
}
