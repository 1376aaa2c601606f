mod selector;
mod shell;
mod state;
mod ui;

use crate::config::Config;
use crate::dispatch::MlClient;
use crate::upload::{candidate_from_path, candidates_from_dropped, PICKER_EXTENSIONS};
use eframe::egui::{self, TextureHandle, TextureOptions};
use eframe::App;
use std::fs;
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub use shell::{Page, PageShell};
pub use state::{ExploreState, PreviewView, PREVIEW_PLACEHOLDER};

/// How often to poll for a settled request while one is running.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct Curvetopia {
    shell: PageShell,
    explore: ExploreState,
    preview_texture: Option<(u64, TextureHandle)>,
}

impl Curvetopia {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        info!("Initializing Curvetopia, ML service at {}", config.ml_url);
        Self {
            shell: PageShell::new(Instant::now()),
            explore: ExploreState::new(MlClient::new(config.ml_url)),
            preview_texture: None,
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.explore.workflow.poll() {
            ctx.request_repaint();
        }
        if self.explore.workflow.has_outstanding() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }

        if self.shell.splash_visible(Instant::now()) {
            // Splash dots are animated.
            ctx.request_repaint();
            return;
        }

        if self.shell.page() == Page::Explore {
            let dropped = ctx.input(|i| i.raw.dropped_files.clone());
            if !dropped.is_empty() {
                info!("{} file(s) dropped on the window", dropped.len());
                self.explore.on_files(candidates_from_dropped(&dropped));
            }
        }
    }

    pub fn pick_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV or image", &PICKER_EXTENSIONS)
            .pick_file()
        else {
            return;
        };

        match candidate_from_path(&path) {
            Ok(candidate) => self.explore.on_files(vec![candidate]),
            Err(e) => warn!("Could not load {}: {}", path.display(), e),
        }
    }

    pub fn save_preview(&self) {
        let Some(preview) = self.explore.workflow.preview() else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name("curvetopia.png")
            .save_file()
        else {
            return;
        };

        match fs::write(&path, &preview.bytes) {
            Ok(()) => info!("Saved preview image to {}", path.display()),
            Err(e) => warn!("Failed to save preview image to {}: {}", path.display(), e),
        }
    }

    /// Texture for the current preview image, rebuilt when a newer image
    /// arrived and dropped when the preview was cleared.
    fn preview_texture(&mut self, ctx: &egui::Context) -> Option<TextureHandle> {
        let Some(preview) = self.explore.workflow.preview() else {
            self.preview_texture = None;
            return None;
        };

        let stale = self
            .preview_texture
            .as_ref()
            .map_or(true, |(generation, _)| *generation != preview.generation);

        if stale {
            let image = egui::ColorImage::from_rgba_unmultiplied(preview.size, &preview.rgba);
            let texture = ctx.load_texture("preview_image", image, TextureOptions::LINEAR);
            self.preview_texture = Some((preview.generation, texture));
        }

        self.preview_texture.as_ref().map(|(_, texture)| texture.clone())
    }
}

impl App for Curvetopia {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
