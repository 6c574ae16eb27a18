//! terminal shell around the controller: translates terminal events into
//! commands and draws frames.

use std::{
    io::{self, stdin, stdout, Stdout, Write},
    sync::mpsc,
    thread,
};

use termion::{
    event::{Event, Key, MouseButton, MouseEvent},
    input::{MouseTerminal, TermRead},
    raw::{IntoRawMode, RawTerminal},
    screen::AlternateScreen,
};
use tracing::{debug, warn};

use crate::{pos, Command, Frame, Grid, RunMode, World};

pub use canvas::Canvas;
mod canvas;

const TITLE: &str = "Conway's Game of Life";
const LEGEND: &str = "[space] play/pause  [c] clear  [r] random  [p] pattern  [click] toggle  [q] quit";

type Screen = AlternateScreen<MouseTerminal<RawTerminal<Stdout>>>;

pub struct View {
    screen: Screen,
}

impl View {
    /// puts the terminal in raw mode on the alternate screen, with mouse
    /// reporting, until dropped.
    pub fn open() -> io::Result<Self> {
        let raw = stdout().into_raw_mode()?;
        let mut screen = AlternateScreen::from(MouseTerminal::from(raw));
        write!(screen, "{}{}", termion::cursor::Hide, termion::clear::All)?;
        screen.flush()?;
        Ok(Self { screen })
    }

    pub fn draw<W>(&mut self, frame: &Frame<'_, W>) -> io::Result<()>
    where
        W: World,
    {
        let (width, height) = termion::terminal_size()?;
        let canvas = render(frame, width as usize, height as usize);
        canvas.display(&mut self.screen)
    }
}

impl Drop for View {
    fn drop(&mut self) {
        let restored = write!(self.screen, "{}", termion::cursor::Show).and_then(|_| self.screen.flush());
        if let Err(err) = restored {
            warn!(%err, "failed to restore the cursor");
        }
    }
}

/// draws the grid from the top left corner and the status bar on the last line.
pub fn render<W>(frame: &Frame<'_, W>, width: usize, height: usize) -> Canvas
where
    W: World,
{
    let mut canvas = Canvas::new(width, height);
    let Some(status_line) = height.checked_sub(1) else {
        return canvas;
    };
    let world = frame.world;
    canvas.layer(|pos| ((pos.y as usize) < status_line && world.is_alive(pos)).then_some('#'));
    canvas.text(status_line, &status(frame.mode, frame.generation));
    canvas
}

pub fn status(mode: RunMode, generation: u64) -> String {
    match mode {
        RunMode::Playing => format!("{TITLE} - Playing - Iteration {generation}  {LEGEND}"),
        RunMode::Paused => format!("{TITLE} - Paused  {LEGEND}"),
    }
}

/// maps a terminal event to a command.
///
/// clicks outside of the grid, or on the status bar of a `screen_height` lines
/// tall terminal, are dropped.
pub fn translate(event: &Event, grid: Grid, screen_height: u16) -> Option<Command> {
    match event {
        Event::Key(Key::Char(' ')) => Some(Command::TogglePlay),
        Event::Key(Key::Char('c')) => Some(Command::Clear),
        Event::Key(Key::Char('r')) => Some(Command::Randomize),
        Event::Key(Key::Char('p')) => Some(Command::SeedPattern),
        Event::Key(Key::Char('q') | Key::Esc | Key::Ctrl('c')) => Some(Command::Quit),
        Event::Mouse(MouseEvent::Press(MouseButton::Left, x, y)) => {
            // terminal coordinates start at 1
            let pos = pos!(i32::from(*x) - 1, i32::from(*y) - 1);
            let status_line = i32::from(screen_height) - 1;
            if grid.contains(pos) && pos.y < status_line {
                Some(Command::ToggleCell(pos))
            } else {
                debug!(?pos, "click outside of the grid");
                None
            }
        }
        _ => None,
    }
}

/// reads terminal events on a dedicated thread and forwards them as commands.
pub fn spawn_input(grid: Grid) -> mpsc::Receiver<Command> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || input_loop(sender, grid));
    receiver
}

fn input_loop(sender: mpsc::Sender<Command>, grid: Grid) {
    for event in stdin().events() {
        let event = match event {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, "failed to read terminal input");
                break;
            }
        };
        let screen_height = termion::terminal_size().map_or(u16::MAX, |(_, height)| height);
        let Some(command) = translate(&event, grid, screen_height) else {
            continue;
        };
        let quit = command == Command::Quit;
        if sender.send(command).is_err() || quit {
            break;
        }
    }
}
