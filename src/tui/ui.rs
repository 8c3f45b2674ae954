use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ConsentModal, MessageList, TitleBar};

/// Title bar, transcript, input box; the consent modal on top when visible.
///
/// A reopened (already acknowledged) disclaimer covers only the transcript so
/// the input box stays usable.
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let gate = app.gate();
    tui.input_box.busy = app.is_busy();
    tui.input_box.focused = !gate.blocks_input();

    let input_height = tui.input_box.calculate_height(frame.area().width);
    let layout = Layout::vertical([Length(1), Min(0), Length(input_height)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    MessageList::new(
        &mut tui.message_list,
        app.log().all(),
        app.is_busy(),
        spinner_frame,
    )
    .render(frame, main_area);

    let mut title_bar = TitleBar::new(
        app.session_id().short().to_string(),
        app.status_message.clone(),
        tui.message_list.has_unseen_content,
    );
    if app.is_busy() {
        title_bar = title_bar.busy(spinner_frame);
    }
    title_bar.render(frame, title_area);

    tui.input_box.render(frame, input_area);

    if gate.is_visible() {
        let review = gate.is_acknowledged();
        let modal_area = if review { main_area } else { frame.area() };
        ConsentModal::new(review).render(frame, modal_area);
    }
}
