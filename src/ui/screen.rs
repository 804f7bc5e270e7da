use ratatui::Frame;

use crate::{ui::help::render_help, ui::summary::render_summary, App, AppState};

/// A UI Screen boundary: responsible for rendering one app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

/// Card stack with the current candidate
pub struct SwipingScreen;

impl Screen for SwipingScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        f.render_widget(app, f.area());
    }
}

/// Liked grid shown once the deck is exhausted
pub struct SummaryScreen;

impl Screen for SummaryScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        render_summary(app, f);
    }
}

pub struct HelpScreen;

impl Screen for HelpScreen {
    fn render(&self, _app: &App, f: &mut Frame) {
        render_help(f.area(), f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: AppState) -> Box<dyn Screen> {
    match state {
        AppState::Swiping => Box::new(SwipingScreen),
        AppState::Summary => Box::new(SummaryScreen),
        AppState::Help => Box::new(HelpScreen),
    }
}
