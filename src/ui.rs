pub mod help;
pub mod layout;
pub mod screen;
pub mod summary;

use kitty_match::session::Direction;
use kitty_match::swipe::SwipeSnapshot;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::{
    ui::layout::{displaced_card, shadow_card, swipe_layout, LIKE_LABEL, NOPE_LABEL, SWIPE_HINT},
    App,
};

pub const PINK: Color = Color::Rgb(236, 72, 153);

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.session.snapshot();
        let layout = swipe_layout(area);
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);

        let (current, total) = snap.progress();
        Paragraph::new(vec![
            Line::from(Span::styled("✨ Kitty Match ✨", bold_style.fg(PINK))),
            Line::from(Span::styled("Swipe to find your purr-fect match", dim_style)),
            Line::from(""),
            Line::from(vec![
                Span::styled(current.to_string(), bold_style.fg(PINK)),
                Span::styled(" / ", dim_style),
                Span::styled(total.to_string(), bold_style),
            ]),
        ])
        .alignment(Alignment::Center)
        .render(layout.header, buf);

        // Back to front: deepest shadow first, current card last.
        for depth in (1..=snap.remaining_behind() as u16).rev() {
            let shadow = shadow_card(layout.card, depth);
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(dim_style)
                .render(shadow, buf);
        }

        let card = displaced_card(layout.card, layout.stack, snap.offset, snap.scale, self.cell);
        Clear.render(card, buf);
        render_card(&snap, card, buf);

        button(NOPE_LABEL, Color::Red).render(layout.nope_button, buf);
        Paragraph::new(vec![Line::from(""), Line::from(Span::styled(SWIPE_HINT, dim_style))])
            .alignment(Alignment::Center)
            .render(layout.hint, buf);
        button(LIKE_LABEL, PINK).render(layout.like_button, buf);

        let footer = match &self.info {
            Some(info) => Line::from(Span::styled(info.as_str(), Style::default().fg(Color::Yellow))),
            None => Line::from(Span::styled(
                "←/h nope   →/l like   r restart   o open   ? help   q quit",
                dim_style,
            )),
        };
        Paragraph::new(footer)
            .alignment(Alignment::Center)
            .render(layout.footer, buf);
    }
}

pub fn button(label: &str, color: Color) -> Paragraph<'_> {
    Paragraph::new(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color)),
    )
}

fn render_card(snap: &SwipeSnapshot<'_>, area: Rect, buf: &mut Buffer) {
    let Some(candidate) = snap.current else {
        return;
    };

    let border_color = match snap.preview.map(|p| p.direction) {
        Some(Direction::Like) => Color::Green,
        Some(Direction::Dislike) => Color::Red,
        None => Color::White,
    };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(format!(" Cat {} ", candidate.id));
    if snap.dragging && snap.rotation.abs() >= 1.0 {
        block = block.title_top(Line::from(format!(" ↻ {:+.0}° ", snap.rotation)).right_aligned());
    }
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = vec![Line::from("")];
    if let Some(preview) = snap.preview {
        let (text, color, alignment) = match preview.direction {
            Direction::Like => ("❤ LIKE", Color::Green, Alignment::Right),
            Direction::Dislike => ("✕ NOPE", Color::Red, Alignment::Left),
        };
        let mut style = Style::default().fg(color);
        style = if preview.opacity < 0.5 {
            style.add_modifier(Modifier::DIM)
        } else {
            style.add_modifier(Modifier::BOLD)
        };
        if preview.scale > 1.2 {
            style = style.add_modifier(Modifier::REVERSED);
        }
        lines[0] = Line::from(Span::styled(format!(" {text} "), style)).alignment(alignment);
    }

    let middle = inner.height.saturating_sub(4) / 2;
    lines.extend(std::iter::repeat(Line::from("")).take(middle as usize));
    if snap.image_ready {
        lines.push(Line::from(Span::styled("🐱", Style::default().add_modifier(Modifier::BOLD))).centered());
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                candidate.locator.as_str(),
                Style::default().fg(Color::Cyan),
            ))
            .centered(),
        );
    } else {
        lines.push(Line::from("🐱").centered());
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                "fetching a kitty…",
                Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
            ))
            .centered(),
        );
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .render(inner, buf);
}
