use itertools::Itertools;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::{
    ui::{
        button,
        layout::{summary_layout, RESTART_LABEL},
        PINK,
    },
    App,
};

const TILE_WIDTH: u16 = 14;
const TILE_HEIGHT: u16 = 4;

/// How many tiles fit in one row of the grid
pub fn grid_columns(grid_width: u16) -> usize {
    (grid_width / TILE_WIDTH).max(1) as usize
}

/// How many of `total` tiles the grid can show. When they don't all fit, one
/// row of height is given up for the "+N more" line.
pub fn visible_tiles(grid: Rect, total: usize) -> usize {
    let columns = grid_columns(grid.width);
    let rows = (grid.height / TILE_HEIGHT) as usize;
    if total <= rows * columns {
        return total;
    }
    let rows = (grid.height.saturating_sub(1) / TILE_HEIGHT) as usize;
    rows * columns
}

pub fn render_summary(app: &App, f: &mut Frame) {
    let snap = app.session.snapshot();
    let layout = summary_layout(f.area());
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            " Results ",
            bold_style.fg(Color::White).bg(PINK),
        )),
        Line::from(Span::styled("Your Matches! 🐱", bold_style)),
        Line::from(""),
        Line::from(vec![
            Span::raw("You liked "),
            Span::styled(snap.liked.len().to_string(), bold_style.fg(PINK)),
            Span::raw(" out of "),
            Span::styled(snap.deck.len().to_string(), bold_style),
            Span::raw(" kitties"),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, layout.title);

    if snap.liked.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No matches yet 😿",
                Style::default().add_modifier(Modifier::DIM | Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Try being less picky next time!",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));
        f.render_widget(empty, layout.grid);
    } else {
        render_grid(app, layout.grid, f);
    }

    f.render_widget(button(RESTART_LABEL, PINK), layout.restart_button);

    let footer = match &app.info {
        Some(info) => Line::from(Span::styled(info.as_str(), Style::default().fg(Color::Yellow))),
        None => Line::from(Span::styled(
            "enter/r try again   o open last match   ? help   q quit",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    f.render_widget(
        Paragraph::new(footer).alignment(Alignment::Center),
        layout.footer,
    );
}

fn render_grid(app: &App, area: Rect, f: &mut Frame) {
    let snap = app.session.snapshot();
    let columns = grid_columns(area.width);
    let shown = visible_tiles(area, snap.liked.len());
    let hidden = snap.liked.len() - shown;

    let [tiles_area, more_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(if hidden > 0 { 1 } else { 0 }),
    ])
    .areas(area);

    let rows = snap.liked.iter().take(shown).chunks(columns);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(TILE_HEIGHT); shown.div_ceil(columns)])
        .split(tiles_area);

    for (row_area, row) in row_areas.iter().zip(&rows) {
        let tiles: Vec<_> = row.collect();
        let tile_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(TILE_WIDTH); columns])
            .flex(ratatui::layout::Flex::Center)
            .split(*row_area);

        for (tile_area, candidate) in tile_areas.iter().zip(tiles) {
            let tile = Paragraph::new(vec![
                Line::from(Span::styled("❤", Style::default().fg(PINK))).right_aligned(),
                Line::from(format!("🐱 Cat {}", candidate.id)).centered(),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(PINK)),
            );
            f.render_widget(tile, *tile_area);
        }
    }

    if hidden > 0 {
        let more = Line::from(vec![
            Span::styled(format!("+{hidden} more"), Style::default().fg(PINK).add_modifier(Modifier::BOLD)),
            Span::styled(
                " (enlarge the terminal to see every match)",
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]);
        f.render_widget(Paragraph::new(more).alignment(Alignment::Center), more_area);
    }
}
