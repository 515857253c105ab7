//! Render backends - where frames go.
//!
//! The panel engine renders into a [`Backend`]. When the caller supplies
//! one (`PanelOptions::mount`), the engine writes frames into it and clears
//! it on destroy but never tears it down. When none is supplied, the engine
//! creates its own [`TerminalBackend`] and restores the terminal when the
//! panel is destroyed (or the backend dropped).
//!
//! [`BufferBackend`] captures frames in memory for tests and headless use.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crossterm::cursor::{Hide, MoveTo, MoveToColumn, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};

use crate::render::surface::{Attr, Span, Surface};
use crate::types::Error;

/// A render target for panel frames.
pub trait Backend {
    /// Replace the displayed content with `frame`.
    fn present(&mut self, frame: &Surface) -> Result<(), Error>;

    /// Remove all displayed content.
    fn clear(&mut self) -> Result<(), Error>;
}

// =============================================================================
// Terminal Backend
// =============================================================================

/// Crossterm-backed target: raw mode + alternate screen, restored on drop.
pub struct TerminalBackend {
    out: io::Stdout,
    active: bool,
}

impl TerminalBackend {
    pub fn new() -> Result<Self, Error> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        queue!(out, EnterAlternateScreen, Hide)?;
        out.flush()?;
        Ok(Self { out, active: true })
    }

    fn write_span(&mut self, span: &Span) -> Result<(), Error> {
        if let Some(fg) = span.style.fg {
            queue!(self.out, SetForegroundColor(fg))?;
        }
        if let Some(bg) = span.style.bg {
            queue!(self.out, SetBackgroundColor(bg))?;
        }
        let attrs = span.style.attrs;
        if attrs.contains(Attr::BOLD) {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if attrs.contains(Attr::DIM) {
            queue!(self.out, SetAttribute(Attribute::Dim))?;
        }
        if attrs.contains(Attr::ITALIC) {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        if attrs.contains(Attr::UNDERLINE) {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        if attrs.contains(Attr::REVERSE) {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        queue!(self.out, Print(&span.text))?;
        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        Ok(())
    }

    fn teardown(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = queue!(self.out, Show, LeaveAlternateScreen);
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
    }
}

impl Backend for TerminalBackend {
    fn present(&mut self, frame: &Surface) -> Result<(), Error> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        for (row, line) in frame.lines.iter().enumerate() {
            queue!(self.out, MoveTo(0, row as u16))?;
            for span in &line.spans {
                self.write_span(span)?;
            }
            queue!(self.out, MoveToColumn(0))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Error> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// Buffer Backend
// =============================================================================

/// What a [`BufferBackend`] has seen so far.
#[derive(Debug, Default)]
pub struct Captured {
    pub presents: usize,
    pub clears: usize,
    pub last: Surface,
}

/// In-memory target capturing every frame. Clone the handle from
/// [`BufferBackend::captured`] before handing the backend to the panel.
#[derive(Clone, Default)]
pub struct BufferBackend {
    captured: Rc<RefCell<Captured>>,
}

impl BufferBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured(&self) -> Rc<RefCell<Captured>> {
        Rc::clone(&self.captured)
    }
}

impl Backend for BufferBackend {
    fn present(&mut self, frame: &Surface) -> Result<(), Error> {
        let mut captured = self.captured.borrow_mut();
        captured.presents += 1;
        captured.last = frame.clone();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Error> {
        let mut captured = self.captured.borrow_mut();
        captured.clears += 1;
        captured.last = Surface::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::Line;

    #[test]
    fn buffer_backend_counts_presents_and_clears() {
        let mut backend = BufferBackend::new();
        let captured = backend.captured();

        backend
            .present(&Surface::new(vec![Line::plain("hi")]))
            .unwrap();
        assert_eq!(captured.borrow().presents, 1);
        assert_eq!(captured.borrow().last.text(), "hi");

        backend.clear().unwrap();
        assert_eq!(captured.borrow().clears, 1);
        assert!(captured.borrow().last.is_empty());
    }
}
