use crate::errors::{CloudError, Result};
use egui::{self, Color32, ColorImage, Rect, TextureHandle, TextureOptions, Vec2};
use image::RgbImage;

/// One blocking window showing `image`. Any key press closes it.
struct ComparisonViewer {
    title: String,
    pending: Option<ColorImage>,
    texture: Option<TextureHandle>,
}

impl ComparisonViewer {
    fn new(title: &str, image: &RgbImage) -> Self {
        let size = [image.width() as usize, image.height() as usize];
        Self {
            title: title.to_string(),
            pending: Some(ColorImage::from_rgb(size, image.as_raw())),
            texture: None,
        }
    }
}

impl eframe::App for ComparisonViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(image) = self.pending.take() {
            self.texture = Some(ctx.load_texture(&self.title, image, TextureOptions::LINEAR));
        }

        let key_pressed = ctx.input(|i| {
            i.events
                .iter()
                .any(|event| matches!(event, egui::Event::Key { pressed: true, .. }))
        });
        if key_pressed {
            log::debug!("Key pressed, closing {}", self.title);
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(Color32::BLACK))
            .show(ctx, |ui| {
                let Some(texture) = &self.texture else {
                    return;
                };
                let available = ui.available_rect_before_wrap();
                let size = fit_size(texture.size_vec2(), available.size());
                let rect = Rect::from_center_size(available.center(), size);
                ui.painter().image(
                    texture.id(),
                    rect,
                    Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            });
    }
}

/// Largest size with the image's aspect ratio that fits `available`, never above 1:1.
pub fn fit_size(image: Vec2, available: Vec2) -> Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (available.x / image.x).min(available.y / image.y).min(1.0).max(0.0);
    image * scale
}

/// Opens a window titled `title` and blocks until it is closed.
pub fn show(title: &str, image: &RgbImage) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([image.width().max(1) as f32, image.height().max(1) as f32])
            .with_min_inner_size([200.0, 150.0]),
        ..Default::default()
    };

    let viewer = ComparisonViewer::new(title, image);
    eframe::run_native(
        "cloudmask",
        native_options,
        Box::new(move |_cc| Ok(Box::new(viewer))),
    )
    .map_err(|e| CloudError::DisplayError {
        message: e.to_string(),
    })
}
