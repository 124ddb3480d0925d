/// Terminal display backed by crossterm.
///
/// Opening the display switches to the alternate screen in raw mode; dropping
/// it restores the cursor, line wrap and the normal screen, including when the
/// frame loop unwinds from a panic.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::frame_loop::{Display, Key, DEFAULT_SIZE};

pub struct TerminalDisplay<W: Write = Stdout> {
    out: W,
    raw: bool,
}

impl TerminalDisplay {
    pub fn open() -> io::Result<Self> {
        Self::start(io::stdout(), terminal::enable_raw_mode)
    }
}

impl<W: Write> TerminalDisplay<W> {
    /// The value exists before the first escape sequence is written, so a
    /// failure at any later step still runs `Drop` and restores the screen.
    fn start(out: W, enable_raw_mode: impl FnOnce() -> io::Result<()>) -> io::Result<Self> {
        let mut display = Self { out, raw: false };
        execute!(display.out, EnterAlternateScreen, DisableLineWrap)?;
        enable_raw_mode()?;
        display.raw = true;
        Ok(display)
    }
}

impl<W: Write> Drop for TerminalDisplay<W> {
    fn drop(&mut self) {
        if self.raw {
            terminal::disable_raw_mode().ok();
        }
        execute!(self.out, cursor::Show, EnableLineWrap, LeaveAlternateScreen).ok();
    }
}

fn map_key(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Key::Interrupt)
        }
        KeyCode::Char(c) => Some(Key::Char(c)),
        _ => Some(Key::Other),
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    fn size(&mut self) -> (usize, usize) {
        match terminal::size() {
            Ok((w, h)) if w > 0 && h > 0 => (w as usize, h as usize),
            _ => DEFAULT_SIZE,
        }
    }

    fn present(&mut self, glyphs: &[char], origin: (u16, u16), width: usize, height: usize) -> io::Result<()> {
        if width == 0 {
            return Ok(());
        }
        let mut line = String::with_capacity(width);
        for (row, cells) in glyphs.chunks(width).take(height).enumerate() {
            line.clear();
            line.extend(cells.iter());
            let y = origin.1.saturating_add(u16::try_from(row).unwrap_or(u16::MAX));
            queue!(self.out, cursor::MoveTo(origin.0, y), Print(&line))?;
        }
        self.out.flush()
    }

    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => Ok(map_key(key)),
            _ => Ok(None),
        }
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        execute!(self.out, cursor::Hide)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        execute!(self.out, cursor::Show)
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), cursor::MoveTo(0, 0))
    }
}
