use std::io::{self, Write};

use crate::{pos, Pos};

/// a character buffer the size of the screen, drawn in layers.
#[derive(Debug, Clone)]
pub struct Canvas {
    lines: Vec<Vec<char>>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        let lines = vec![vec![' '; width]; height];
        Self { lines }
    }

    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        for (y, line) in self.lines.iter_mut().enumerate() {
            for (x, slot) in line.iter_mut().enumerate() {
                if let Some(char) = f(pos!(x as i32, y as i32)) {
                    *slot = char;
                }
            }
        }
    }

    /// writes `text` at the start of line `y`, truncated to the canvas width.
    pub fn text(&mut self, y: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(y) {
            for (slot, char) in line.iter_mut().zip(text.chars()) {
                *slot = char;
            }
        }
    }

    #[cfg(test)]
    pub fn line(&self, y: usize) -> Option<String> {
        self.lines.get(y).map(|line| line.iter().collect())
    }

    pub fn display(&self, out: &mut impl Write) -> io::Result<()> {
        for (index, line) in self.lines.iter().enumerate() {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            let line: String = line.iter().collect();
            write!(out, "{goto}{line}")?;
        }
        out.flush()
    }
}
