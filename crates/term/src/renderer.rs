//! Terminal backend for the game screen.
//!
//! [`TerminalRenderer::enter`] switches the terminal to raw mode, the
//! alternate screen and left-button mouse reporting; `exit` (or dropping the
//! renderer) undoes all three. It also tracks the viewport so the host lays
//! out and hit-tests against the size the last frame was drawn for.
//!
//! A frame goes out in full after entering, after a resize and whenever its
//! size differs from the one on screen. Otherwise only the runs of cells that
//! changed in each row are written.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

/// Used when the terminal cannot report its size.
pub const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 80,
    height: 24,
};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Frame currently on screen; `None` forces a full redraw.
    shown: Option<FrameBuffer>,
    viewport: Viewport,
    bytes: Vec<u8>,
    active: bool,
}

impl TerminalRenderer {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut renderer = Self {
            stdout: io::stdout(),
            shown: None,
            viewport: query_viewport(),
            bytes: Vec::with_capacity(64 * 1024),
            active: true,
        };
        queue_enter(&mut renderer.bytes)?;
        renderer.flush()?;
        Ok(renderer)
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.bytes.clear();
        queue_exit(&mut self.bytes)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Record a terminal resize. The next frame is drawn in full.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height);
        self.shown = None;
    }

    /// Put `frame` on screen.
    ///
    /// The frame becomes the reference for the next diff, and `frame` gets
    /// the previously shown buffer back so the host can render into it again.
    pub fn present(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        encode_frame(self.shown.as_ref(), frame, &mut self.bytes)?;
        self.flush()?;

        let mut shown = self
            .shown
            .take()
            .unwrap_or_else(|| FrameBuffer::new(frame.width(), frame.height()));
        std::mem::swap(&mut shown, frame);
        self.shown = Some(shown);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.bytes)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Best-effort restore for paths that cannot reach the renderer.
pub fn restore_terminal() {
    let mut bytes = Vec::new();
    let _ = queue_exit(&mut bytes);
    let mut stdout = io::stdout();
    let _ = stdout.write_all(&bytes);
    let _ = stdout.flush();
    let _ = terminal::disable_raw_mode();
}

/// Restore the terminal before the default panic report is printed.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}

fn query_viewport() -> Viewport {
    terminal::size()
        .map(|(width, height)| Viewport::new(width, height))
        .unwrap_or(FALLBACK_VIEWPORT)
}

fn queue_enter(out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::EnterAlternateScreen)?;
    out.queue(cursor::Hide)?;
    out.queue(terminal::DisableLineWrap)?;
    out.queue(EnableMouseCapture)?;
    Ok(())
}

fn queue_exit(out: &mut Vec<u8>) -> Result<()> {
    out.queue(DisableMouseCapture)?;
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(terminal::EnableLineWrap)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Encode the bytes that turn the screen showing `shown` into `next`.
///
/// Without a previous frame of the same size the screen is cleared and
/// every row is written. Identical frames encode to nothing.
pub fn encode_frame(shown: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let width = next.width() as usize;
    if width == 0 {
        return Ok(());
    }

    let mut pen = Pen::default();
    match shown {
        Some(prev) if prev.width() == next.width() && prev.height() == next.height() => {
            let rows = prev.cells().chunks(width).zip(next.cells().chunks(width));
            for (y, (old, new)) in rows.enumerate() {
                for (x, run) in changed_runs(old, new) {
                    out.queue(cursor::MoveTo(x as u16, y as u16))?;
                    pen.print(out, run)?;
                }
            }
        }
        _ => {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            for (y, row) in next.cells().chunks(width).enumerate() {
                out.queue(cursor::MoveTo(0, y as u16))?;
                pen.print(out, row)?;
            }
        }
    }
    pen.finish(out)
}

/// Runs of differing cells in one row, as (start column, new cells).
fn changed_runs<'a>(old: &'a [Cell], new: &'a [Cell]) -> impl Iterator<Item = (usize, &'a [Cell])> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < new.len() && old[x] == new[x] {
            x += 1;
        }
        if x >= new.len() {
            return None;
        }
        let start = x;
        while x < new.len() && old[x] != new[x] {
            x += 1;
        }
        Some((start, &new[start..x]))
    })
}

/// Remembers the last style sent so consecutive cells only switch when needed.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cells: &[Cell]) -> Result<()> {
        for cell in cells {
            if self.style != Some(cell.style) {
                apply_style(out, cell.style)?;
                self.style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn finish(self, out: &mut Vec<u8>) -> Result<()> {
        if self.style.is_some() {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn apply_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    // SGR reset also drops colors, so it goes first.
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
