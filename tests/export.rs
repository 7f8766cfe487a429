use std::fs;
use std::path::PathBuf;

use coloring_book::canvas::ColoringCanvas;
use coloring_book::config::ColoringConfig;
use coloring_book::event::CanvasEvent;
use coloring_book::export::{self, Download, DownloadTarget, download_file_name};
use coloring_book::state::{ArtworkShelf, storage_key};
use coloring_book::template::{OutlineArt, Shape, Template};
use coloring_book::tool::ToolKind;
use egui::Pos2;
use image::Rgba;

const GREEN: Rgba<u8> = Rgba([0, 200, 0, 255]);

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("coloring_book_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn template() -> Template {
    Template {
        id: "kite".to_owned(),
        display_name: "Flying Kite".to_owned(),
        outline: OutlineArt::Shapes(vec![Shape::Polygon(vec![(0.5, 0.1), (0.9, 0.5), (0.5, 0.9), (0.1, 0.5)])]),
        suggested_palette: vec![GREEN],
        fun_fact: String::new(),
    }
}

fn colored_canvas() -> ColoringCanvas {
    let config = ColoringConfig {
        canvas_width: 64,
        canvas_height: 64,
        ..Default::default()
    };
    let mut canvas = ColoringCanvas::new(config);
    canvas.load_template(&template(), None).unwrap();
    canvas.set_color(GREEN);
    canvas.select_tool(ToolKind::Fill);
    canvas.pointer_down(Pos2::new(32.0, 32.0));
    canvas.pointer_up();
    canvas.drain_events();
    canvas
}

#[test]
fn test_download_file_name() {
    assert_eq!(download_file_name("Flying Kite"), "Flying Kite_coloring.png");
    assert_eq!(download_file_name("a/b\\c:d"), "a_b_c_d_coloring.png");
}

#[test]
fn test_save_stores_and_downloads() {
    let canvas = colored_canvas();
    let mut shelf = ArtworkShelf::default();
    let dir = scratch_dir("save");

    let report = canvas.save(&mut shelf, DownloadTarget::Directory(&dir)).unwrap().unwrap();

    assert!(report.stored);
    let path = match report.download.clone() {
        Some(Download::File(path)) => path,
        other => panic!("expected a file download, got {:?}", other),
    };
    assert_eq!(path, dir.join("Flying Kite_coloring.png"));

    let downloaded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(&downloaded, canvas.visible().unwrap().as_image());

    let data_url = shelf.get("kite").unwrap();
    assert!(data_url.starts_with("data:image/png;base64,"));
    assert_eq!(&export::decode_artwork(data_url).unwrap(), canvas.visible().unwrap().as_image());

    assert_eq!(
        canvas.drain_events(),
        vec![CanvasEvent::ArtworkSaved {
            template_id: "kite".to_owned(),
            stored: true,
            download: Some(Download::File(path)),
        }]
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_quota_failure_still_downloads() {
    let canvas = colored_canvas();
    let mut shelf = ArtworkShelf::with_quota(16);
    let dir = scratch_dir("quota");

    let report = canvas.save(&mut shelf, DownloadTarget::Directory(&dir)).unwrap().unwrap();

    assert!(!report.stored);
    assert!(shelf.is_empty());
    assert!(matches!(&report.download, Some(Download::File(path)) if path.exists()));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_save_replaces_earlier_artwork() {
    let canvas = colored_canvas();
    let mut shelf = ArtworkShelf::default();

    canvas.save(&mut shelf, DownloadTarget::Skip).unwrap();
    let first = shelf.used_bytes();
    canvas.save(&mut shelf, DownloadTarget::Skip).unwrap();

    assert_eq!(shelf.len(), 1);
    assert_eq!(shelf.used_bytes(), first);
    assert_eq!(storage_key("kite"), "coloring_kite");
}

#[test]
fn test_saved_artwork_resumes() {
    let canvas = colored_canvas();
    let mut shelf = ArtworkShelf::default();
    canvas.save(&mut shelf, DownloadTarget::Skip).unwrap();
    let colored = canvas.progress().colored_pixels();
    assert!(colored > 0);

    let saved = export::decode_artwork(shelf.get("kite").unwrap()).unwrap();
    let mut resumed = ColoringCanvas::new(canvas.config().clone());
    resumed.load_template(&template(), Some(saved)).unwrap();

    assert_eq!(resumed.visible(), canvas.visible());
    assert_eq!(resumed.progress().colored_pixels(), colored);
    assert_eq!(
        resumed.drain_events(),
        vec![CanvasEvent::TemplateLoaded {
            template_id: "kite".to_owned(),
            resumed: true
        }]
    );
}

#[test]
fn test_mismatched_saved_artwork_is_ignored() {
    let mut canvas = ColoringCanvas::new(ColoringConfig {
        canvas_width: 64,
        canvas_height: 64,
        ..Default::default()
    });

    canvas
        .load_template(&template(), Some(image::RgbaImage::from_pixel(10, 10, GREEN)))
        .unwrap();

    assert_eq!(canvas.visible().unwrap().count(GREEN), 0);
    assert_eq!(canvas.progress().colored_pixels(), 0);
}

#[test]
fn test_garbage_data_url_is_rejected() {
    assert!(export::decode_artwork("hello").is_err());
    assert!(export::decode_artwork("data:image/png;base64,!!!").is_err());
}

#[test]
fn test_download_target_for_platform() {
    let dir = PathBuf::from("exports");
    #[cfg(not(target_arch = "wasm32"))]
    assert_eq!(DownloadTarget::for_platform(&dir), DownloadTarget::Directory(&dir));
    #[cfg(target_arch = "wasm32")]
    assert_eq!(DownloadTarget::for_platform(&dir), DownloadTarget::Browser);
}

#[test]
fn test_skip_target_only_stores() {
    let canvas = colored_canvas();
    let mut shelf = ArtworkShelf::default();

    let report = canvas.save(&mut shelf, DownloadTarget::Skip).unwrap().unwrap();

    assert!(report.stored);
    assert_eq!(report.download, None);
}

#[cfg(not(target_arch = "wasm32"))]
#[test]
fn test_browser_target_without_a_browser_still_stores() {
    let canvas = colored_canvas();
    let mut shelf = ArtworkShelf::default();

    let report = canvas.save(&mut shelf, DownloadTarget::Browser).unwrap().unwrap();

    assert!(report.stored);
    assert_eq!(report.download, None);
}

#[test]
fn test_download_display() {
    assert_eq!(
        Download::Browser("Flying Kite_coloring.png".to_owned()).to_string(),
        "Flying Kite_coloring.png"
    );
    assert_eq!(
        Download::File(PathBuf::from("out").join("Sun_coloring.png")).to_string(),
        PathBuf::from("out").join("Sun_coloring.png").display().to_string()
    );
}
