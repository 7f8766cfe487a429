use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use std::fmt;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::pixels::PixelBuffer;
use crate::state::{ArtworkShelf, StorageError, StorageResult};

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Encode the canvas as PNG
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    buffer.as_image().write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn to_data_url(png: &[u8]) -> String {
    format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png))
}

/// PNG bytes from a `data:image/png;base64,` URL
pub fn decode_data_url(data_url: &str) -> StorageResult<Vec<u8>> {
    let payload = data_url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or(StorageError::NotADataUrl)?;
    Ok(STANDARD.decode(payload)?)
}

/// Decode previously saved artwork back into an image
pub fn decode_artwork(data_url: &str) -> Result<RgbaImage> {
    let png = decode_data_url(data_url)?;
    Ok(image::load_from_memory_with_format(&png, ImageFormat::Png)?.to_rgba8())
}

/// `{TemplateName}_coloring.png`, with path separators made harmless
pub fn download_file_name(display_name: &str) -> String {
    let name: String = display_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("{}_coloring.png", name)
}

/// Where the PNG download goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadTarget<'a> {
    /// Keep the artwork in storage only
    Skip,
    /// Write `{TemplateName}_coloring.png` into a directory
    Directory(&'a Path),
    /// Hand the file to the browser's download manager (web builds)
    Browser,
}

impl DownloadTarget<'_> {
    /// `export_dir` on native builds, the browser on the web
    pub fn for_platform(export_dir: &Path) -> DownloadTarget<'_> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            DownloadTarget::Directory(export_dir)
        }
        #[cfg(target_arch = "wasm32")]
        {
            let _ = export_dir;
            DownloadTarget::Browser
        }
    }
}

/// A download that was produced by a save
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Download {
    /// Written to this path
    File(PathBuf),
    /// Offered to the browser under this file name
    Browser(String),
}

impl fmt::Display for Download {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Browser(file_name) => write!(f, "{}", file_name),
        }
    }
}

/// Result of a save: the download is produced even when storing fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub stored: bool,
    pub download: Option<Download>,
}

/// Store the artwork under the template id and produce the PNG download.
///
/// A storage failure (quota) is logged and reported, not returned.
pub fn save_artwork(
    buffer: &PixelBuffer,
    template_id: &str,
    display_name: &str,
    shelf: &mut ArtworkShelf,
    target: DownloadTarget<'_>,
) -> Result<SaveReport> {
    let png = encode_png(buffer)?;

    let stored = match shelf.put(template_id, to_data_url(&png)) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Could not keep artwork for {}: {}", template_id, err);
            false
        }
    };

    let file_name = download_file_name(display_name);
    let download = match target {
        DownloadTarget::Skip => None,
        DownloadTarget::Directory(dir) => {
            fs::create_dir_all(dir)?;
            let path = dir.join(&file_name);
            fs::write(&path, &png)?;
            log::info!("Saved {} ({} bytes)", path.display(), png.len());
            Some(Download::File(path))
        }
        DownloadTarget::Browser => offer_browser_download(&png, &file_name)?,
    };

    Ok(SaveReport { stored, download })
}

/// Click a temporary `<a download>` pointing at a PNG blob
#[cfg(target_arch = "wasm32")]
fn offer_browser_download(png: &[u8], file_name: &str) -> Result<Option<Download>> {
    use crate::error::ColoringError;
    use eframe::wasm_bindgen::{JsCast as _, JsValue};
    use web_sys::js_sys::{Array, Uint8Array};

    let js_error = |err: JsValue| ColoringError::Download(format!("{:?}", err));

    let parts = Array::of1(&Uint8Array::from(png));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_error)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ColoringError::Download("no document to attach the download to".to_owned()))?;
    let anchor = document
        .create_element("a")
        .map_err(js_error)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ColoringError::Download("created element is not an anchor".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(js_error)?;

    log::info!("Offered {} ({} bytes) for download", file_name, png.len());
    Ok(Some(Download::Browser(file_name.to_owned())))
}

#[cfg(not(target_arch = "wasm32"))]
fn offer_browser_download(_png: &[u8], file_name: &str) -> Result<Option<Download>> {
    log::warn!("No browser to hand {} to, skipping the download", file_name);
    Ok(None)
}
