use eframe::egui::{self, Color32, Rect, TextureHandle, TextureOptions};

use crate::canvas::ColoringCanvas;

/// Gold used for the outline glow
pub const GLOW_COLOR: Color32 = Color32::from_rgb(255, 200, 0);

const FULL_UV: Rect = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));

/// Uploads the canvas buffers to textures and paints them
#[derive(Default)]
pub struct CanvasRenderer {
    canvas_texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    glow_texture: Option<TextureHandle>,
    glow_template: Option<String>,
}

// Custom Debug implementation since TextureHandle doesn't implement Debug
impl std::fmt::Debug for CanvasRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasRenderer")
            .field("uploaded_revision", &self.uploaded_revision)
            .field("glow_template", &self.glow_template)
            .finish()
    }
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint the canvas into `rect`: white paper, the visible buffer on top
    /// and, while a warning is active, the glowing outline.
    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect, canvas: &ColoringCanvas, now: f64) {
        painter.rect_filled(rect, 0.0, Color32::WHITE);

        let Some(visible) = canvas.visible() else {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Pick a picture to color!",
                egui::FontId::proportional(24.0),
                Color32::GRAY,
            );
            return;
        };

        if self.uploaded_revision != Some(canvas.revision()) {
            let image = visible.to_color_image();
            match &mut self.canvas_texture {
                Some(texture) => texture.set(image, TextureOptions::NEAREST),
                None => {
                    self.canvas_texture = Some(ctx.load_texture("coloring_canvas", image, TextureOptions::NEAREST));
                }
            }
            self.uploaded_revision = Some(canvas.revision());
        }
        if let Some(texture) = &self.canvas_texture {
            painter.image(texture.id(), rect, FULL_UV, Color32::WHITE);
        }

        if canvas.cue().is_glowing() {
            self.render_glow(ctx, painter, rect, canvas, now);
            // Keep animating until the glow clears
            ctx.request_repaint();
        }
    }

    fn render_glow(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect, canvas: &ColoringCanvas, now: f64) {
        let (Some(mask), Some(template_id)) = (canvas.mask(), canvas.template_id()) else {
            return;
        };
        if self.glow_template.as_deref() != Some(template_id) {
            log::debug!("Building outline glow for {}", template_id);
            let image = mask.glow_image(GLOW_COLOR);
            self.glow_texture = Some(ctx.load_texture("outline_glow", image, TextureOptions::LINEAR));
            self.glow_template = Some(template_id.to_owned());
        }
        if let Some(texture) = &self.glow_texture {
            let tint = Color32::WHITE.gamma_multiply(canvas.cue().intensity(now));
            painter.image(texture.id(), rect, FULL_UV, tint);
        }
    }
}
