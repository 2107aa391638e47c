//! Search form and result area. Both only read controller state; all
//! transitions go through [`SearchController`].

use eframe::egui;
use shared::domain::SearchState;

use crate::controller::reducer::SearchController;

pub const INPUT_PLACEHOLDER: &str = "예: 핀테크, 양적완화...";
pub const SUBMIT_LABEL: &str = "정의 찾기";
pub const SUBMIT_BUSY_LABEL: &str = "검색 중...";
pub const BUSY_TEXT: &str = "AI가 용어를 분석하고 있습니다...";
pub const ERROR_TITLE: &str = "오류 발생";
pub const IDLE_TITLE: &str = "궁금한 금융 용어를 검색해보세요.";
pub const IDLE_SUBTITLE: &str = "AI가 최신 정보를 바탕으로 알기 쉽게 설명해드립니다.";

const ACCENT: egui::Color32 = egui::Color32::from_rgb(34, 211, 238);
const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);

/// The single thing the result area shows for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultView<'a> {
    Placeholder,
    Busy,
    Error(&'a str),
    Definition(&'a str),
}

impl<'a> ResultView<'a> {
    pub fn for_state(state: &'a SearchState) -> Self {
        match state {
            SearchState::Idle => ResultView::Placeholder,
            SearchState::Loading => ResultView::Busy,
            SearchState::Failed(message) => ResultView::Error(message),
            SearchState::Success(text) => ResultView::Definition(text),
        }
    }
}

pub fn submit_label(busy: bool) -> &'static str {
    if busy {
        SUBMIT_BUSY_LABEL
    } else {
        SUBMIT_LABEL
    }
}

/// What the input row drew this frame.
pub struct SearchForm {
    pub field: egui::Response,
    pub button: egui::Response,
    pub button_label: &'static str,
    /// Set when the user asked to submit, either with the button or by
    /// pressing Enter in the field.
    pub submit_requested: bool,
}

pub fn search_form(
    ui: &mut egui::Ui,
    draft: &mut String,
    controller: &SearchController,
) -> SearchForm {
    let busy = controller.is_busy();
    let button_label = submit_label(busy);

    ui.horizontal(|ui| {
        let button_width = 110.0;
        let field_width = (ui.available_width() - button_width - 12.0).max(120.0);
        let field = ui.add_enabled(
            !busy,
            egui::TextEdit::singleline(draft)
                .hint_text(INPUT_PLACEHOLDER)
                .desired_width(field_width),
        );
        let entered = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let button = ui.add_enabled(
            controller.can_submit(draft),
            egui::Button::new(egui::RichText::new(button_label).strong())
                .min_size(egui::vec2(button_width, 0.0)),
        );
        let submit_requested = button.clicked() || (entered && controller.can_submit(draft));

        SearchForm {
            field,
            button,
            button_label,
            submit_requested,
        }
    })
    .inner
}

/// Draws the result card. Returns `true` when the copy action was clicked.
pub fn result_area(ui: &mut egui::Ui, state: &SearchState) -> bool {
    let mut copy_requested = false;

    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(12.0)
        .stroke(egui::Stroke::new(
            1.0,
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        ))
        .inner_margin(egui::Margin::symmetric(24, 20))
        .show(ui, |ui| {
            ui.set_min_height(300.0);
            ui.set_width(ui.available_width());

            match ResultView::for_state(state) {
                ResultView::Busy => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(80.0);
                        ui.add(egui::Spinner::new().size(48.0).color(ACCENT));
                        ui.add_space(12.0);
                        ui.label(egui::RichText::new(BUSY_TEXT).size(18.0).weak());
                    });
                }
                ResultView::Error(message) => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(80.0);
                        ui.label(
                            egui::RichText::new(ERROR_TITLE)
                                .size(20.0)
                                .strong()
                                .color(ERROR_COLOR),
                        );
                        ui.add_space(6.0);
                        ui.label(egui::RichText::new(message).color(ERROR_COLOR));
                    });
                }
                ResultView::Definition(text) => {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.add(egui::Label::new(text).wrap().selectable(true));
                    });
                    ui.add_space(8.0);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                        if ui.small_button("복사").clicked() {
                            copy_requested = true;
                        }
                    });
                }
                ResultView::Placeholder => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(80.0);
                        ui.label(egui::RichText::new("📖").size(48.0).color(ACCENT));
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new(IDLE_TITLE).size(20.0).strong());
                        ui.weak(IDLE_SUBTITLE);
                    });
                }
            }
        });

    copy_requested
}
