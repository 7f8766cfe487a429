use crate::canvas::ColoringCanvas;
use crate::config::ColoringConfig;
use crate::event::CanvasEvent;
use crate::export::{self, DownloadTarget};
use crate::file_handler::FileHandler;
use crate::input::CanvasInput;
use crate::panels;
use crate::renderer::CanvasRenderer;
use crate::state::ArtworkShelf;
use crate::template::TemplateStore;
use crate::tool::ToolKind;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct ColoringApp {
    config: ColoringConfig,
    artworks: ArtworkShelf,
    selected_template: Option<String>,
    tool: ToolKind,
    brush_width: f32,
    boundary_help: bool,

    #[serde(skip)]
    pub(crate) canvas: ColoringCanvas,
    #[serde(skip)]
    pub(crate) templates: TemplateStore,
    #[serde(skip)]
    pub(crate) renderer: CanvasRenderer,
    #[serde(skip)]
    pub(crate) input: CanvasInput,
    #[serde(skip)]
    file_handler: FileHandler,
    /// Last save or resume message shown under the tools
    #[serde(skip)]
    status: Option<String>,
}

impl Default for ColoringApp {
    fn default() -> Self {
        let config = ColoringConfig::default();
        Self {
            canvas: ColoringCanvas::new(config.clone()),
            artworks: ArtworkShelf::with_quota(config.storage_quota_bytes),
            config,
            selected_template: None,
            tool: ToolKind::Brush,
            brush_width: 10.0,
            boundary_help: true,
            templates: TemplateStore::builtin(),
            renderer: CanvasRenderer::new(),
            input: CanvasInput::new(),
            file_handler: FileHandler::new(),
            status: None,
        }
    }
}

impl ColoringApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        if let Some(config) = ColoringConfig::from_env() {
            app.config = config;
        }
        if let Err(err) = app.config.validate() {
            log::warn!("Stored config is unusable ({}), using defaults", err);
            app.config = ColoringConfig::default();
        }
        app.artworks.set_quota(app.config.storage_quota_bytes);

        app.templates = TemplateStore::builtin();
        // Imported line art only lives for one session, drop what it left behind
        let templates = &app.templates;
        app.artworks.retain(|id| templates.get(id).is_ok());
        app.canvas = ColoringCanvas::new(app.config.clone());
        app.canvas.select_tool(app.tool);
        app.canvas.set_brush_width(app.brush_width);
        app.canvas.set_boundary_help(app.boundary_help);
        if let Some(id) = app.selected_template.clone() {
            app.select_template(&id);
        }
        app
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn canvas(&self) -> &ColoringCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut ColoringCanvas {
        &mut self.canvas
    }

    pub fn selected_template(&self) -> Option<&str> {
        self.selected_template.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn has_saved_artwork(&self, template_id: &str) -> bool {
        self.artworks.get(template_id).is_some()
    }

    /// Load a template, resuming saved artwork for it when there is some
    pub fn select_template(&mut self, id: &str) {
        let template = match self.templates.get(id) {
            Ok(template) => template.clone(),
            Err(err) => {
                log::warn!("{}", err);
                self.selected_template = None;
                return;
            }
        };

        let saved = self.artworks.get(id).and_then(|data_url| match export::decode_artwork(data_url) {
            Ok(image) => Some(image),
            Err(err) => {
                log::warn!("Discarding unreadable saved artwork for {}: {}", id, err);
                None
            }
        });

        match self.canvas.load_template(&template, saved) {
            Ok(()) => {
                self.selected_template = Some(id.to_owned());
                if let Some(first) = template.suggested_palette.first() {
                    self.canvas.set_color(*first);
                }
                self.status = None;
            }
            Err(err) => {
                log::error!("Failed to load template {}: {}", id, err);
                self.status = Some(format!("Could not open {}", template.display_name));
            }
        }
    }

    /// Keep the artwork in local storage and produce the PNG download
    pub fn save_artwork(&mut self) {
        let target = DownloadTarget::for_platform(&self.config.export_dir);

        match self.canvas.save(&mut self.artworks, target) {
            Ok(Some(report)) => {
                self.status = Some(match (&report.download, report.stored) {
                    (Some(download), true) => format!("Saved! ({})", download),
                    (Some(download), false) => format!("Downloaded {}, but there was no room to keep a copy", download),
                    (None, true) => "Saved!".to_owned(),
                    (None, false) => "There was no room to save your picture".to_owned(),
                });
            }
            Ok(None) => {}
            Err(err) => {
                log::error!("Failed to save artwork: {}", err);
                self.status = Some("Saving failed".to_owned());
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::{Key, Modifiers};
        if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)) {
            self.canvas.redo();
        } else if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Z)) {
            self.canvas.undo();
        } else if ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Y)) {
            self.canvas.redo();
        }
    }

    fn handle_canvas_events(&mut self) {
        for event in self.canvas.drain_events() {
            match event {
                CanvasEvent::FillCompleted { truncated: true, .. } => {
                    log::info!("Fill stopped early, tap again to keep filling");
                }
                CanvasEvent::TemplateLoaded { resumed: true, template_id } => {
                    self.status = Some("Welcome back! Here is your saved picture.".to_owned());
                    log::info!("Resumed saved artwork for {}", template_id);
                }
                _ => {}
            }
        }
    }

    fn import_dropped_files(&mut self, ctx: &egui::Context) {
        let imported = self.file_handler.take_dropped_templates(ctx);
        let mut last_id = None;
        for template in imported {
            last_id = Some(template.id.clone());
            self.templates.add(template);
        }
        if let Some(id) = last_id {
            self.select_template(&id);
        }
        self.file_handler.preview_files_being_dropped(ctx);
    }
}

impl eframe::App for ColoringApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.tool = self.canvas.tool_kind();
        self.brush_width = self.canvas.brush_width();
        self.boundary_help = self.canvas.boundary_help();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.canvas.tick(now);

        self.import_dropped_files(ctx);
        self.handle_shortcuts(ctx);

        panels::template_panel(self, ctx);
        panels::tools_panel(self, ctx);
        panels::central_panel(self, ctx, now);

        self.handle_canvas_events();
    }
}
