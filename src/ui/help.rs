use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

fn keybind(key: &'static str, pad: usize, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(" ".repeat(pad)),
        Span::raw(action),
    ])
}

pub fn help_lines() -> Vec<Line<'static>> {
    vec![
        Line::from("Mouse:"),
        Line::from("  Drag the card right to like it, left to pass."),
        Line::from("  Let go before the card has travelled far enough and it springs back."),
        Line::from("  Click the Nope / Like buttons to decide without dragging."),
        Line::from(""),
        Line::from("Keybinds:"),
        keybind("←/h", 9, "Nope"),
        keybind("→/l", 9, "Like"),
        keybind("r", 11, "Restart with a fresh deck"),
        keybind("enter", 7, "Try again (results screen)"),
        keybind("o", 11, "Open the picture in your browser"),
        keybind("?", 11, "Toggle this help"),
        keybind("q/esc", 7, "Quit"),
    ]
}

pub fn render_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(help_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Help"),
    );
    f.render_widget(p, area);
}
