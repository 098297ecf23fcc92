use std::{io::{stdout, Stdout, Write}, time::Duration};

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::render::{Patch, Tint};
use crate::snake::Direction;
use crate::{Cell, GridInt};

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';

// Grid cells map to screen cells at a fixed offset, inside the border
const FIELD_OFFSET: GridInt = 1;

pub struct TermManager {
    term_width: GridInt,
    term_height: GridInt,
    grid_width: GridInt,
    grid_height: GridInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Cell,
    width: GridInt,
    height: GridInt,
}

impl TermManager {
    pub fn new() -> Self {
        let (term_width, term_height) = terminal::size().expect("Error reading size.");
        let screen = vec![' '; term_width as usize * term_height as usize];
        TermManager {
            term_width,
            term_height,
            grid_width: 0,
            grid_height: 0,
            stdout: stdout(),
            screen,
            current_msg: None,
        }
    }

    pub fn setup(&mut self, grid_width: GridInt, grid_height: GridInt) {
        assert!(
            self.term_width >= grid_width + 2 && self.term_height >= grid_height + 2,
            "Terminal too small: the playfield needs {}x{} cells.",
            grid_width + 2,
            grid_height + 2
        );
        self.grid_width = grid_width;
        self.grid_height = grid_height;

        execute!(self.stdout, EnterAlternateScreen).expect("Error entering alt screen");
        self.set_raw_mode(true);
        self.set_cursor_visibility(false);
        self.set_cursor_blink(false);
        execute!(self.stdout, terminal::Clear(ClearType::All)).expect("Error clearing.");
    }

    pub fn restore(&mut self) {
        self.set_raw_mode(false);
        self.set_cursor_visibility(true);
        self.set_cursor_blink(true);
        execute!(self.stdout, LeaveAlternateScreen).expect("Error leaving alt screen");
    }

    pub fn read_key_blocking(&self) -> KeyEvent {
        loop {
            if let Event::Key(ev) = read().unwrap() {
                return ev;
            }
        }
    }

    pub fn read_key_events_queue(&self) -> Vec<KeyEvent> {
        let mut events = vec![];

        while poll(Duration::from_millis(1)).unwrap() {
            if let Event::Key(ev) = read().unwrap() {
                events.push(ev);
            }
        }

        events
    }

    pub fn draw_border(&mut self) {
        let end_x = self.grid_width + 2 * FIELD_OFFSET - 1;
        let end_y = self.grid_height + 2 * FIELD_OFFSET - 1;

        for x in 0..=end_x {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), ch);
            self.print_at((x, end_y), ch);
        }

        for y in 1..end_y {
            self.print_at((0, y), '|');
            self.print_at((end_x, y), '|');
        }

        self.flush();
    }

    pub fn paint(&mut self, patch: &Patch) {
        let glyph = match patch.tint {
            Tint::Head(Direction::Up) => '^',
            Tint::Head(Direction::Down) => 'v',
            Tint::Head(Direction::Left) => '<',
            Tint::Head(Direction::Right) => '>',
            Tint::Body => SNAKE_BODY_CHAR,
            Tint::Food => FOOD_CHAR,
            Tint::Blank => ' ',
        };
        self.print_at(to_screen(patch.cell), glyph);
    }

    pub fn clear_playfield(&mut self) {
        for y in 0..self.grid_height {
            for x in 0..self.grid_width {
                self.print_at(to_screen((x, y)), ' ');
            }
        }
    }

    pub fn show_message(&mut self, lines: &[&str]) {
        if self.has_message() {
            self.hide_message();
        }

        let msg_height = (lines.len() + 2) as GridInt;
        let msg_width = (lines.iter().map(|x| x.len()).max().unwrap() + 2) as GridInt;
        let center = ((self.grid_width + 2) / 2, (self.grid_height + 2) / 2);
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);

        // Print the top and bottom empty lines
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, *y), ' ');
            }
        }

        // Print the message lines
        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as GridInt + 1;
            for (x_diff, ch) in padded_line.char_indices() {
                self.print_at_no_save((top_left.0 + x_diff as GridInt, y), ch);
            }
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush();
    }

    pub fn hide_message(&mut self) {
        if !self.has_message() {
            return;
        }

        let msg = self.current_msg.take().unwrap(); // take() sets current_msg to None
        let top_left = msg.top_left;

        // Restore the content from the screen buffer
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (top_left.0 + x_diff, top_left.1 + y_diff);
                let ch = self.screen[self.term_width as usize * y as usize + x as usize];
                self.print_at_no_save((x, y), ch);
            }
        }

        self.flush();
    }

    pub fn flush(&mut self) {
        self.stdout.flush().expect("Error flushing.");
    }

    pub fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: Cell, ch: char) {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)).unwrap();
        self.screen[self.term_width as usize * pos.1 as usize + pos.0 as usize] = ch;
    }

    fn print_at_no_save(&mut self, pos: Cell, ch: char) {
        // To be used for printing messages, where we don't wanna overwrite our
        // local buffer to restore it when the message is hidden
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch)).unwrap();
    }

    fn set_raw_mode(&self, option: bool) {
        let res = if option {
            terminal::enable_raw_mode()
        } else {
            terminal::disable_raw_mode()
        };

        res.expect("Error setting raw mode.");
    }

    fn set_cursor_blink(&mut self, option: bool) {
        let res = if option {
            execute!(self.stdout, cursor::EnableBlinking)
        } else {
            execute!(self.stdout, cursor::DisableBlinking)
        };

        res.expect("Error setting cursor blink.");
    }

    fn set_cursor_visibility(&mut self, option: bool) {
        let res = if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        };

        res.expect("Error setting cursor visibility.");
    }
}

fn to_screen(cell: Cell) -> Cell {
    (cell.0 + FIELD_OFFSET, cell.1 + FIELD_OFFSET)
}
