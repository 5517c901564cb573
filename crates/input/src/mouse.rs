//! Mouse mapping: left-button press, drag and release in terminal cells.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// A left-button gesture at a terminal (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Press { x: u16, y: u16 },
    Drag { x: u16, y: u16 },
    Release { x: u16, y: u16 },
}

pub fn handle_mouse_event(mouse: MouseEvent) -> Option<Gesture> {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Gesture::Press { x, y }),
        MouseEventKind::Drag(MouseButton::Left) => Some(Gesture::Drag { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(Gesture::Release { x, y }),
        _ => None,
    }
}
