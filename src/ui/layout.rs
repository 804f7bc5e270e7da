//! Screen geometry shared by rendering and mouse hit-testing, so a click lands
//! on exactly the button that was drawn.

use kitty_match::gesture::Offset;
use kitty_match::runtime::CellSize;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use unicode_width::UnicodeWidthStr;

pub const NOPE_LABEL: &str = " ✕  Nope ";
pub const LIKE_LABEL: &str = " ❤  Like ";
pub const RESTART_LABEL: &str = " ↺  Try Again ";
pub const SWIPE_HINT: &str = "drag left or right";

const MAX_CARD_WIDTH: u16 = 44;
const HORIZONTAL_MARGIN: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeLayout {
    pub header: Rect,
    /// Region the dragged card may move within
    pub stack: Rect,
    /// Resting position of the current card
    pub card: Rect,
    pub nope_button: Rect,
    pub like_button: Rect,
    pub hint: Rect,
    pub footer: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLayout {
    pub title: Rect,
    pub grid: Rect,
    pub restart_button: Rect,
    pub footer: Rect,
}

/// Buttons are bordered, so two columns/rows wider than their label
fn button_width(label: &str) -> u16 {
    label.width() as u16 + 2
}

fn centered(width: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

pub fn swipe_layout(area: Rect) -> SwipeLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(4), // title, tagline, progress
            Constraint::Min(6),    // card stack
            Constraint::Length(3), // buttons
            Constraint::Length(1), // keys
        ])
        .split(area);

    let stack = rows[1];
    let card = centered(MAX_CARD_WIDTH, stack);
    // Leave two rows under the card for the shadow cards.
    let card = Rect {
        height: card.height.saturating_sub(2),
        ..card
    };

    let nope_w = button_width(NOPE_LABEL);
    let like_w = button_width(LIKE_LABEL);
    let hint_w = SWIPE_HINT.width() as u16 + 4;
    let buttons = centered(nope_w + hint_w + like_w, rows[2]);
    let nope_button = Rect {
        width: nope_w.min(buttons.width),
        ..buttons
    };
    let hint = Rect {
        x: nope_button.right(),
        width: hint_w.min(buttons.width.saturating_sub(nope_button.width)),
        ..buttons
    };
    let like_button = Rect {
        x: hint.right(),
        width: like_w.min(buttons.right().saturating_sub(hint.right())),
        ..buttons
    };

    SwipeLayout {
        header: rows[0],
        stack,
        card,
        nope_button,
        like_button,
        hint,
        footer: rows[3],
    }
}

pub fn summary_layout(area: Rect) -> SummaryLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(4), // badge, heading, count
            Constraint::Min(3),    // liked grid
            Constraint::Length(3), // try again
            Constraint::Length(1), // keys
        ])
        .split(area);

    SummaryLayout {
        title: rows[0],
        grid: rows[1],
        restart_button: centered(button_width(RESTART_LABEL), rows[2]),
        footer: rows[3],
    }
}

/// Where the current card is drawn: the resting rect moved by the drag
/// offset, shrunk by `scale` around its center, and kept inside `bounds`.
pub fn displaced_card(card: Rect, bounds: Rect, offset: Offset, scale: f64, cell: CellSize) -> Rect {
    let width = ((card.width as f64 * scale).round() as u16).clamp(1, bounds.width.max(1));
    let height = ((card.height as f64 * scale).round() as u16).clamp(1, bounds.height.max(1));

    let dx = (offset.x / cell.width).round() as i32;
    let dy = (offset.y / cell.height).round() as i32;

    let x = card.x as i32 + (card.width as i32 - width as i32) / 2 + dx;
    let y = card.y as i32 + (card.height as i32 - height as i32) / 2 + dy;

    let max_x = (bounds.right() as i32 - width as i32).max(bounds.x as i32);
    let max_y = (bounds.bottom() as i32 - height as i32).max(bounds.y as i32);

    Rect {
        x: x.clamp(bounds.x as i32, max_x) as u16,
        y: y.clamp(bounds.y as i32, max_y) as u16,
        width,
        height,
    }
}

/// Shadow card `depth` levels behind the current one: narrower and peeking
/// out underneath.
pub fn shadow_card(card: Rect, depth: u16) -> Rect {
    let inset = depth * 2;
    Rect {
        x: card.x + inset.min(card.width / 2),
        y: card.y + depth,
        width: card.width.saturating_sub(inset * 2),
        height: card.height,
    }
}

pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    rect.contains(Position::new(column, row))
}
