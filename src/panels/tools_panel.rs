use egui::{Color32, RichText};

use crate::components::ToolButton;
use crate::pixels;
use crate::tool::ToolKind;
use crate::ColoringApp;

/// Always offered next to the picture's own palette
const BASIC_COLORS: [Color32; 6] = [
    Color32::from_rgb(0, 0, 0),
    Color32::from_rgb(255, 255, 255),
    Color32::from_rgb(128, 128, 128),
    Color32::from_rgb(139, 69, 19),
    Color32::from_rgb(0, 100, 0),
    Color32::from_rgb(0, 0, 139),
];

pub fn tools_panel(app: &mut ColoringApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.canvas().tool_kind();
            ui.horizontal(|ui| {
                for kind in ToolKind::ALL {
                    if ToolButton::new(kind, active == kind).show(ui).clicked() {
                        log::info!("Tool selected from UI: {}", kind.label());
                        app.canvas_mut().select_tool(kind);
                    }
                }
            });
            ui.label(format!("{} ({})", active.label(), app.canvas().tool_state_name()));
            ui.separator();

            if active != ToolKind::Fill {
                let mut width = app.canvas().brush_width();
                let range = app.canvas().config().min_brush_width..=app.canvas().config().max_brush_width;
                ui.label("Brush size");
                if ui.add(egui::Slider::new(&mut width, range)).changed() {
                    app.canvas_mut().set_brush_width(width);
                }
            }

            palette(app, ui);

            let mut help = app.canvas().boundary_help();
            if ui.checkbox(&mut help, "Stay-in-the-lines helper").changed() {
                app.canvas_mut().set_boundary_help(help);
            }
            ui.separator();

            ui.horizontal(|ui| {
                let can_undo = app.canvas().can_undo();
                let can_redo = app.canvas().can_redo();
                if ui.add_enabled(can_undo, egui::Button::new("↶ Undo")).clicked() {
                    app.canvas_mut().undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("↷ Redo")).clicked() {
                    app.canvas_mut().redo();
                }
            });
            ui.horizontal(|ui| {
                let mounted = app.canvas().is_mounted();
                if ui.add_enabled(mounted, egui::Button::new("🗑 Start over")).clicked() {
                    app.canvas_mut().clear();
                }
                if ui.add_enabled(mounted, egui::Button::new("💾 Save")).clicked() {
                    app.save_artwork();
                }
            });
            ui.separator();

            progress(app, ui);

            if let Some(warning) = app.canvas().cue().active_warning() {
                ui.label(RichText::new(warning.message()).color(Color32::from_rgb(230, 126, 34)).strong());
            }
            if let Some(status) = app.status() {
                ui.label(status);
            }

            fun_fact(app, ui);
        });
}

fn palette(app: &mut ColoringApp, ui: &mut egui::Ui) {
    ui.label("Colors");

    let suggested: Vec<Color32> = app
        .selected_template()
        .and_then(|id| app.templates().get(id).ok())
        .map(|t| t.suggested_palette.iter().copied().map(pixels::to_color32).collect())
        .unwrap_or_default();
    let current = pixels::to_color32(app.canvas().color());

    ui.horizontal_wrapped(|ui| {
        for color in suggested.into_iter().chain(BASIC_COLORS) {
            let stroke = if color == current {
                egui::Stroke::new(3.0, Color32::from_rgb(33, 150, 243))
            } else {
                egui::Stroke::new(1.0, Color32::DARK_GRAY)
            };
            let swatch = egui::Button::new("")
                .fill(color)
                .stroke(stroke)
                .min_size(egui::vec2(28.0, 28.0));
            if ui.add(swatch).clicked() {
                app.canvas_mut().set_color(pixels::from_color32(color));
            }
        }
    });

    let mut custom = current;
    ui.horizontal(|ui| {
        ui.label("Any color:");
        if egui::color_picker::color_edit_button_srgba(ui, &mut custom, egui::color_picker::Alpha::Opaque).changed() {
            app.canvas_mut().set_color(pixels::from_color32(custom));
        }
    });
}

fn progress(app: &ColoringApp, ui: &mut egui::Ui) {
    let canvas = app.canvas();
    if !canvas.is_mounted() {
        return;
    }
    let percent = canvas.progress_percent();
    ui.add(egui::ProgressBar::new(percent / 100.0).text(format!("{:.0}% colored", percent.floor())));
    if canvas.progress().is_complete() {
        ui.label(RichText::new("🎉 Amazing work!").strong());
    }
    if let Some((color, _)) = canvas.progress().favorite_color() {
        ui.horizontal(|ui| {
            ui.label("Favorite color:");
            let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
            ui.painter().rect_filled(rect, 3.0, pixels::to_color32(color));
        });
    }
}

fn fun_fact(app: &ColoringApp, ui: &mut egui::Ui) {
    let Some(template) = app.selected_template().and_then(|id| app.templates().get(id).ok()) else {
        return;
    };
    ui.separator();
    ui.group(|ui| {
        ui.label(RichText::new("Did you know?").strong());
        ui.label(&template.fun_fact);
    });
}
