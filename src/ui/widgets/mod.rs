//! Dialog widgets

pub mod help;
pub mod host;

use ratatui::layout::Rect;

/// Area of `width` x `height` centered over `owner`, clipped to it
pub fn centered(owner: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(owner.width);
    let height = height.min(owner.height);
    let x = owner.x + (owner.width - width) / 2;
    let y = owner.y + (owner.height - height) / 2;
    Rect::new(x, y, width, height)
}
