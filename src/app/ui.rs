use super::{Curvetopia, Page, PreviewView, PREVIEW_PLACEHOLDER};
use crate::dispatch::Operation;
use crate::utils::file_size::format_size;
use eframe::egui::{self, Align, Color32, RichText, Sense, Stroke};
use std::time::Instant;

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
const CARD_HEIGHT: f32 = 320.0;

impl Curvetopia {
    pub fn render(&mut self, ctx: &egui::Context) {
        if self.shell.splash_visible(Instant::now()) {
            egui::CentralPanel::default().show(ctx, |ui| self.render_splash(ui));
            return;
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.shell.page() {
            Page::Home => self.render_home(ui),
            Page::Explore => self.render_explore(ui),
        });
    }

    fn render_splash(&self, ui: &mut egui::Ui) {
        const ROWS: usize = 4;
        const DOT_SPACING: f32 = 28.0;
        const DOT_RADIUS: f32 = 6.0;

        let time = ui.input(|i| i.time) as f32;
        let center = ui.max_rect().center();
        let offset = (ROWS as f32 - 1.0) * DOT_SPACING / 2.0;
        let painter = ui.painter();

        for row in 0..ROWS {
            for col in 0..ROWS {
                let wave = ((time * 4.0) - (row + col) as f32 * 0.6).sin() * 0.5 + 0.5;
                let pos = egui::pos2(
                    center.x - offset + col as f32 * DOT_SPACING,
                    center.y - offset + row as f32 * DOT_SPACING,
                );
                painter.circle_filled(
                    pos,
                    DOT_RADIUS * (0.6 + 0.4 * wave),
                    ACCENT.gamma_multiply(0.3 + 0.7 * wave),
                );
            }
        }
    }

    fn render_home(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.3);
            ui.label(RichText::new("Adobe Gensolve").size(48.0).strong());
            ui.add_space(8.0);
            ui.label(
                RichText::new("Curvetopia - A Journey into the World of Curves")
                    .size(18.0)
                    .color(ui.visuals().text_color().gamma_multiply(0.7)),
            );
            ui.add_space(30.0);

            let button = egui::Button::new(RichText::new("Explore").size(18.0))
                .min_size(egui::vec2(160.0, 40.0));
            if ui.add(button).clicked() {
                self.shell.navigate(Page::Explore);
            }
        });
    }

    fn render_explore(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("⬅ Go Back").clicked() {
                self.explore.reset();
                // Generations restart with the new workflow.
                self.preview_texture = None;
                self.shell.navigate(Page::Home);
            }
        });

        ui.vertical_centered(|ui| {
            ui.heading("Curvetopia - Adobe Gensolve");
            ui.add_space(5.0);
            ui.label(
                RichText::new(
                    "Explore the features of Curvetopia, a journey into the world of curves.",
                )
                .color(ui.visuals().text_color().gamma_multiply(0.7)),
            );
        });

        ui.add_space(20.0);
        ui.vertical_centered(|ui| self.render_selector(ui));
        ui.add_space(20.0);

        ui.columns(2, |columns| {
            self.render_upload_card(&mut columns[0]);
            self.render_preview_card(&mut columns[1]);
        });

        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("Send").size(18.0))
                .min_size(egui::vec2(200.0, 40.0));
            if ui.add(button).clicked() {
                self.explore.on_send();
            }

            if let Some(error) = self.explore.workflow.error() {
                ui.add_space(8.0);
                ui.colored_label(ERROR, error);
            }
        });
    }

    fn render_selector(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(self.explore.selector.button_label())
            .min_size(egui::vec2(260.0, 32.0));
        let button_response = ui.add(button);
        if button_response.clicked() {
            self.explore.selector.toggle_open();
        }

        let mut bounds = button_response.rect;

        if self.explore.selector.is_open() {
            let mut chosen = None;
            let menu = egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(260.0);
                for operation in Operation::ALL {
                    let is_selected = self.explore.selector.selected() == Some(operation);
                    if ui.selectable_label(is_selected, operation.label()).clicked() {
                        chosen = Some(operation);
                    }
                }
            });
            bounds = bounds.union(menu.response.rect);

            if let Some(operation) = chosen {
                self.explore.on_select(operation);
            }
        }

        let press = ui.input(|i| {
            if i.pointer.any_pressed() {
                i.pointer.press_origin()
            } else {
                None
            }
        });
        if let Some(position) = press {
            self.explore.selector.handle_pointer_press(position, bounds);
        }
    }

    fn render_upload_card(&mut self, ui: &mut egui::Ui) {
        let hovering = ui.input(|i| !i.raw.hovered_files.is_empty());
        let stroke = if hovering {
            Stroke::new(2.0, ACCENT)
        } else {
            ui.visuals().widgets.noninteractive.bg_stroke
        };

        egui::Frame::group(ui.style()).stroke(stroke).show(ui, |ui| {
            ui.set_min_height(CARD_HEIGHT);
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);
                ui.label(RichText::new("Upload file").strong());
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Drag or drop a CSV, PNG or JPEG file here or click to upload")
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
                ui.add_space(16.0);

                if ui.button("📁 Select File").clicked() {
                    self.pick_file();
                }

                ui.add_space(16.0);

                let mut remove = false;
                if let Some(file) = self.explore.upload.file() {
                    egui::Frame::none()
                        .fill(ui.style().visuals.extreme_bg_color)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&file.name).strong());
                                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                                    if ui.button("🗑 Remove").clicked() {
                                        remove = true;
                                    }
                                    ui.label(format_size(file.size()));
                                });
                            });
                            ui.label(
                                RichText::new(file.mime.as_str())
                                    .color(ui.visuals().text_color().gamma_multiply(0.7)),
                            );
                        });
                }
                if remove {
                    self.explore.on_remove_file();
                }
            });
        });
    }

    fn render_preview_card(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        let view = self.explore.preview_view();
        let texture = self.preview_texture(&ctx);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_height(CARD_HEIGHT);
            ui.vertical_centered(|ui| match (view, texture) {
                (PreviewView::Spinner, _) => {
                    ui.add_space(CARD_HEIGHT / 2.0 - 20.0);
                    ui.add(egui::Spinner::new().size(40.0).color(ACCENT));
                }
                (PreviewView::Image, Some(texture)) => {
                    let max = egui::vec2(ui.available_width(), CARD_HEIGHT - 40.0);
                    ui.add(
                        egui::Image::from_texture(&texture)
                            .max_size(max)
                            .maintain_aspect_ratio(true),
                    );
                    if ui.button("💾 Save Image").clicked() {
                        self.save_preview();
                    }
                }
                _ => {
                    let (rect, _) = ui.allocate_exact_size(
                        egui::vec2(ui.available_width(), CARD_HEIGHT - 20.0),
                        Sense::hover(),
                    );
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        PREVIEW_PLACEHOLDER,
                        egui::FontId::proportional(16.0),
                        ui.visuals().text_color().gamma_multiply(0.6),
                    );
                }
            });
        });
    }
}
