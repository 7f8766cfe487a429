use crate::ColoringApp;

pub fn template_panel(app: &mut ColoringApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("template_panel").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.heading("Pick a picture:");

            let entries: Vec<(String, String)> = app
                .templates()
                .iter()
                .map(|t| (t.id.clone(), t.display_name.clone()))
                .collect();

            for (id, name) in entries {
                let selected = app.selected_template() == Some(id.as_str());
                let label = if app.has_saved_artwork(&id) {
                    format!("{} ⭐", name)
                } else {
                    name
                };
                if ui.selectable_label(selected, label).clicked() && !selected {
                    log::info!("Template selected from UI: {}", id);
                    app.select_template(&id);
                }
            }
        });
        ui.small("Tip: drop a PNG of your own line art here to color it.");
    });
}
