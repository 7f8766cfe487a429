use eframe::egui;

use crate::template::Template;

/// Turns line-art images dropped onto the window into new templates
#[derive(Debug, Default)]
pub struct FileHandler {
    processed_files: Vec<String>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect this frame's dropped files and import the images among them
    pub fn take_dropped_templates(&mut self, ctx: &egui::Context) -> Vec<Template> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let mut templates = Vec::new();

        for file in &dropped {
            let file_name = if let Some(path) = &file.path {
                path.display().to_string()
            } else if !file.name.is_empty() {
                file.name.clone()
            } else {
                "unknown".to_owned()
            };

            // Skip if we've already processed this file
            if self.processed_files.contains(&file_name) {
                continue;
            }

            if !is_image_file(file) {
                log::warn!("Dropped file is not a supported type: {}", file_name);
                continue;
            }

            let Some(bytes) = read_bytes(file, &file_name) else {
                continue;
            };

            let id = uuid::Uuid::new_v4().to_string();
            match Template::from_encoded(id, display_name_for(file, &file_name), bytes) {
                Ok(template) => {
                    log::info!("Imported line art {} as {}", file_name, template.id);
                    templates.push(template);
                    self.processed_files.push(file_name);
                }
                Err(err) => log::error!("Failed to import {}: {}", file_name, err),
            }
        }

        templates
    }

    /// Overlay shown while files hover over the window
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop line art to add a new picture",
            egui::FontId::proportional(28.0),
            Color32::WHITE,
        );
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        file.mime.starts_with("image/")
    } else if let Some(ext) = file.path.as_ref().and_then(|p| p.extension()) {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(ext.as_str(), "png" | "jpg" | "jpeg")
    } else {
        false
    }
}

fn read_bytes(file: &egui::DroppedFile, file_name: &str) -> Option<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Some(bytes.to_vec());
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        return match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::error!("Failed to read image file: {}: {}", path.display(), err);
                None
            }
        };
    }

    log::warn!("Dropped file has no accessible data: {}", file_name);
    None
}

/// File stem as a friendly name, "My Picture" when there is none
fn display_name_for(file: &egui::DroppedFile, file_name: &str) -> String {
    file.path
        .as_ref()
        .and_then(|p| p.file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .or_else(|| {
            std::path::Path::new(file_name)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .filter(|name| !name.is_empty() && name != "unknown")
        .unwrap_or_else(|| "My Picture".to_owned())
}
