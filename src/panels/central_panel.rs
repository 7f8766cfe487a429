use crate::input::fit_canvas_rect;
use crate::ColoringApp;

pub fn central_panel(app: &mut ColoringApp, ctx: &egui::Context, now: f64) {
    egui::CentralPanel::default()
        .frame(egui::Frame::central_panel(&ctx.style()).fill(egui::Color32::from_rgb(250, 243, 224)))
        .show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
            let buffer_size = app.canvas.buffer_size();
            let canvas_rect = fit_canvas_rect(response.rect.shrink(8.0), buffer_size);

            for pointer in app.input.process(ui, &response, canvas_rect, buffer_size) {
                app.canvas.handle(pointer);
            }

            app.renderer.render(ctx, &painter, canvas_rect, &app.canvas, now);
        });
}
