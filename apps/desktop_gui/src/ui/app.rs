use std::time::Duration;

use arboard::Clipboard;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, reducer::SearchController};
use crate::ui::widgets;

pub const APP_TITLE: &str = "AI 금융 용어 사전";
const INTRO_TEXT: &str =
    "최신 금융 단어를 입력하면 AI가 의미, 사용 예시, 그리고 쉬운 비유를 통해 자세히 설명해 드립니다.";
const FOOTER_TEXT: &str = "Powered by Google Gemini";
const CONTENT_MAX_WIDTH: f32 = 760.0;

pub struct GlossaryApp {
    controller: SearchController,
    ui_rx: Receiver<UiEvent>,
    draft: String,
    notice: Option<String>,
}

impl GlossaryApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            controller: SearchController::new(cmd_tx),
            ui_rx,
            draft: String::new(),
            notice: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.handle_event(event);
        }
    }

    fn submit_draft(&mut self) {
        self.notice = None;
        self.controller.submit(&self.draft);
    }

    fn copy_definition(&mut self) {
        let Some(text) = self.controller.state().definition() else {
            return;
        };
        let copied = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_owned()));
        self.notice = Some(match copied {
            Ok(()) => "정의를 클립보드에 복사했습니다.".to_string(),
            Err(err) => {
                tracing::warn!(%err, "clipboard copy failed");
                "클립보드에 복사하지 못했습니다.".to_string()
            }
        });
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new(format!("📖 {APP_TITLE}")).strong().size(26.0));
            });
            ui.add_space(10.0);
        });
    }

    fn show_footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.weak(FOOTER_TEXT);
                if !self.controller.status().is_empty() {
                    ui.small(self.controller.status());
                }
            });
            ui.add_space(6.0);
        });
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(CONTENT_MAX_WIDTH);
                ui.add_space(24.0);
                ui.label(egui::RichText::new(INTRO_TEXT).size(16.0));
                ui.add_space(24.0);

                if widgets::search_form(ui, &mut self.draft, &self.controller).submit_requested {
                    self.submit_draft();
                }
                ui.add_space(24.0);

                if widgets::result_area(ui, self.controller.state()) {
                    self.copy_definition();
                }
                if let Some(notice) = &self.notice {
                    ui.add_space(6.0);
                    ui.weak(notice.as_str());
                }
            });
        });
    }
}

impl eframe::App for GlossaryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_footer(ctx);
        self.show_main(ctx);

        if self.controller.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
