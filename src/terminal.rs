//! Raw-mode terminal that redraws a list of text lines each frame.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{cursor, style::Print, terminal, QueueableCommand};

pub struct Terminal {
    stdout: io::Stdout,
    buf: Vec<u8>,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(8 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Redraw from the top-left corner, clearing the rest of each line.
    pub fn draw(&mut self, lines: &[String]) -> Result<()> {
        self.buf.clear();
        for (y, line) in lines.iter().enumerate() {
            self.buf.queue(cursor::MoveTo(0, y as u16))?;
            self.buf.queue(Print(line))?;
            self.buf
                .queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        }
        self.buf
            .queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}
