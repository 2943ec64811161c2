use ratatui::Frame;

use letter_twins::Phase;

use crate::{
    ui::{render_board, render_loading, render_menu},
    App,
};

/// Renders one game phase. Input is handled by `App`, which owns the session.
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Tier selection
pub struct MenuScreen;

impl Screen for MenuScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let area = f.area();
        render_menu(app, area, f.buffer_mut());
    }
}

/// Spinner shown between rounds
pub struct LoadingScreen;

impl Screen for LoadingScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let area = f.area();
        render_loading(app, area, f.buffer_mut());
    }
}

/// The two circles, plus the correct overlay once resolved
pub struct BoardScreen;

impl Screen for BoardScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        let area = f.area();
        render_board(app, area, f.buffer_mut());
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::MenuSelection => Box::new(MenuScreen),
        Phase::RoundLoading => Box::new(LoadingScreen),
        Phase::RoundActive | Phase::RoundResolvedCorrect => Box::new(BoardScreen),
    }
}
