//! TUI widgets for hornero.

mod delete_confirm;
mod detail;
mod form;
mod header;
mod help;
mod login;
mod quit_confirm;
mod table;

pub use delete_confirm::render_delete_confirm;
pub use detail::render_detail;
pub use form::render_form;
pub use header::{render_header, render_status};
pub use help::render_help;
pub use login::render_login;
pub use quit_confirm::render_quit_confirm;
pub use table::{TableCursor, render_table};

use ratatui::layout::Rect;

/// Centers a popup of `width` x `height` inside `area`, shrinking to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 40, 10), Rect::new(30, 15, 40, 10));
        assert_eq!(centered(Rect::new(2, 1, 20, 5), 40, 10), Rect::new(2, 1, 20, 5));
    }
}
