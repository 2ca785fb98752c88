// Preview module - the uploaded image, held in memory only
//
// `SelectedFile` is what the picker hands to the upload interaction.
// `DocumentPreview` is decoded from the same bytes off the UI task while the
// request is in flight, and is dropped on reset; nothing is ever written to
// disk.

use super::AnalysisRequest;
use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::RgbImage;
use std::path::Path;
use std::sync::{Arc, Mutex};

const FALLBACK_MIME: &str = "application/octet-stream";

/// Longest side of the pixels kept for drawing; far above any terminal grid
const MAX_PREVIEW_SIDE: u32 = 256;

/// A file chosen in the picker, read fully into memory
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedFile {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::from_bytes(name, bytes))
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = sniff_mime(&bytes, &name);
        Self {
            name,
            mime,
            bytes: bytes.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when the content (not just the extension) looks like an image
    pub fn is_image(&self) -> bool {
        infer::get(&self.bytes).is_some_and(|kind| kind.mime_type().starts_with("image/"))
    }
}

/// Magic bytes first, extension second
fn sniff_mime(bytes: &[u8], name: &str) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }
    let ext = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => FALLBACK_MIME,
    };
    mime.to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Document preview
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct DocumentPreview {
    pub file_name: String,
    pub mime: String,
    pub size_bytes: usize,
    /// Pixel dimensions, None when the bytes could not be decoded
    pub dimensions: Option<(u32, u32)>,
    /// Shrunk copy, at most `MAX_PREVIEW_SIDE` on either side
    pixels: Option<Arc<RgbImage>>,
    /// Last thumbnail drawn, keyed on its cell area
    cache: Arc<Mutex<Option<((u16, u16), Arc<HalfBlockImage>)>>>,
}

impl DocumentPreview {
    pub fn from_request(request: &AnalysisRequest) -> Self {
        Self::from_file(&SelectedFile {
            name: request.file_name.clone(),
            mime: request.mime.clone(),
            bytes: Arc::clone(&request.bytes),
        })
    }

    /// Decode and shrink. Blocking; full-size photos take a while.
    pub fn from_file(file: &SelectedFile) -> Self {
        let (dimensions, pixels) = match image::load_from_memory(&file.bytes) {
            Ok(img) => {
                let dimensions = (img.width(), img.height());
                let shrunk = if img.width() > MAX_PREVIEW_SIDE || img.height() > MAX_PREVIEW_SIDE {
                    img.thumbnail(MAX_PREVIEW_SIDE, MAX_PREVIEW_SIDE)
                } else {
                    img
                };
                (Some(dimensions), Some(Arc::new(shrunk.to_rgb8())))
            }
            Err(e) => {
                tracing::debug!(file = %file.name, error = %e, "Preview decode failed");
                (None, None)
            }
        };

        Self {
            file_name: file.name.clone(),
            mime: file.mime.clone(),
            size_bytes: file.bytes.len(),
            dimensions,
            pixels,
            cache: Arc::default(),
        }
    }

    pub fn is_decoded(&self) -> bool {
        self.pixels.is_some()
    }

    /// One-line description: "scan.png · image/png · 12.3 KB · 800×600"
    pub fn describe(&self) -> String {
        let mut parts = vec![
            self.file_name.clone(),
            self.mime.clone(),
            format_size(self.size_bytes),
        ];
        if let Some((w, h)) = self.dimensions {
            parts.push(format!("{}×{}", w, h));
        }
        parts.join(" · ")
    }

    /// Downscale into at most `cols` × `rows` terminal cells.
    ///
    /// Each cell shows two vertical pixels (upper half block), so the pixel
    /// grid is `cols` wide and `rows * 2` tall. Aspect ratio is preserved and
    /// images are never upscaled. Redraws at the same size reuse the last grid.
    pub fn thumbnail(&self, cols: u16, rows: u16) -> Option<Arc<HalfBlockImage>> {
        let pixels = self.pixels.as_ref()?;
        if cols == 0 || rows == 0 {
            return None;
        }

        let mut cache = self.cache.lock().ok();
        if let Some(Some((size, image))) = cache.as_deref() {
            if *size == (cols, rows) {
                return Some(Arc::clone(image));
            }
        }

        let image = Arc::new(half_blocks(pixels, cols, rows)?);
        if let Some(slot) = cache.as_deref_mut() {
            *slot = Some(((cols, rows), Arc::clone(&image)));
        }
        Some(image)
    }
}

fn half_blocks(pixels: &RgbImage, cols: u16, rows: u16) -> Option<HalfBlockImage> {
    let (w, h) = pixels.dimensions();
    if w == 0 || h == 0 {
        return None;
    }
    let max_w = cols as f64;
    let max_h = rows as f64 * 2.0;
    let scale = (max_w / w as f64).min(max_h / h as f64).min(1.0);
    let tw = ((w as f64 * scale).round() as u32).max(1);
    let th = ((h as f64 * scale).round() as u32).max(1);

    let resized = image::imageops::resize(pixels, tw, th, FilterType::Triangle);

    let cell_rows = th.div_ceil(2);
    let mut cells = Vec::with_capacity((tw * cell_rows) as usize);
    for row in 0..cell_rows {
        for x in 0..tw {
            let top = resized.get_pixel(x, row * 2).0;
            let bottom_y = row * 2 + 1;
            let bottom = (bottom_y < th).then(|| resized.get_pixel(x, bottom_y).0);
            cells.push(HalfBlock { top, bottom });
        }
    }

    Some(HalfBlockImage {
        width: tw as u16,
        height: cell_rows as u16,
        cells,
    })
}

/// Two stacked pixels in one terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfBlock {
    pub top: [u8; 3],
    /// None on the last row of an odd-height image
    pub bottom: Option<[u8; 3]>,
}

/// Row-major grid of half blocks
#[derive(Debug, Clone)]
pub struct HalfBlockImage {
    pub width: u16,
    pub height: u16,
    cells: Vec<HalfBlock>,
}

impl HalfBlockImage {
    pub fn row(&self, y: u16) -> &[HalfBlock] {
        let start = y as usize * self.width as usize;
        let end = (start + self.width as usize).min(self.cells.len());
        self.cells.get(start..end).unwrap_or(&[])
    }
}

pub fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode png");
        out.into_inner()
    }

    #[test]
    fn sniffs_png_regardless_of_extension() {
        let file = SelectedFile::from_bytes("scan.dat", png(4, 4));
        assert_eq!(file.mime, "image/png");
        assert!(file.is_image());
    }

    #[test]
    fn falls_back_to_extension_then_octet_stream() {
        let file = SelectedFile::from_bytes("scan.jpg", b"not really".to_vec());
        assert_eq!(file.mime, "image/jpeg");
        assert!(!file.is_image());

        let file = SelectedFile::from_bytes("notes", b"hello".to_vec());
        assert_eq!(file.mime, FALLBACK_MIME);
    }

    #[test]
    fn preview_reads_dimensions() {
        let file = SelectedFile::from_bytes("bill.png", png(40, 20));
        let preview = DocumentPreview::from_file(&file);
        assert_eq!(preview.dimensions, Some((40, 20)));
        assert!(preview.describe().contains("40×20"));
    }

    #[test]
    fn undecodable_preview_has_no_thumbnail() {
        let file = SelectedFile::from_bytes("bill.png", b"garbage".to_vec());
        let preview = DocumentPreview::from_file(&file);
        assert!(!preview.is_decoded());
        assert!(preview.thumbnail(10, 10).is_none());
    }

    #[test]
    fn thumbnail_fits_area_and_keeps_aspect() {
        let file = SelectedFile::from_bytes("wide.png", png(200, 100));
        let preview = DocumentPreview::from_file(&file);

        let thumb = preview.thumbnail(20, 20).expect("thumbnail");
        // 200x100 into 20x40 pixels: width bound, 20x10 pixels, 5 cell rows
        assert_eq!(thumb.width, 20);
        assert_eq!(thumb.height, 5);
        assert_eq!(thumb.row(0).len(), 20);
        assert!(thumb.row(0)[0].top[0] > 190);
    }

    #[test]
    fn thumbnail_never_upscales() {
        let file = SelectedFile::from_bytes("tiny.png", png(3, 3));
        let preview = DocumentPreview::from_file(&file);

        let thumb = preview.thumbnail(80, 40).expect("thumbnail");
        assert_eq!(thumb.width, 3);
        assert_eq!(thumb.height, 2);
        assert_eq!(thumb.row(1)[0].bottom, None);
    }

    #[test]
    fn large_images_keep_a_shrunk_copy() {
        let file = SelectedFile::from_bytes("photo.png", png(1200, 600));
        let preview = DocumentPreview::from_file(&file);

        assert_eq!(preview.dimensions, Some((1200, 600)));
        let pixels = preview.pixels.as_ref().expect("decoded");
        assert_eq!(pixels.dimensions(), (MAX_PREVIEW_SIDE, MAX_PREVIEW_SIDE / 2));

        let thumb = preview.thumbnail(40, 40).expect("thumbnail");
        assert_eq!(thumb.width, 40);
        assert_eq!(thumb.height, 10);
    }

    #[test]
    fn redraw_at_same_size_reuses_thumbnail() {
        let file = SelectedFile::from_bytes("scan.png", png(100, 100));
        let preview = DocumentPreview::from_file(&file);

        let first = preview.thumbnail(30, 10).expect("thumbnail");
        let again = preview.thumbnail(30, 10).expect("thumbnail");
        assert!(Arc::ptr_eq(&first, &again));

        let resized = preview.thumbnail(20, 10).expect("thumbnail");
        assert!(!Arc::ptr_eq(&first, &resized));
        assert_eq!(resized.width, 20);
    }

    #[test]
    fn request_preview_matches_file_preview() {
        use crate::analysis::{Category, Language};

        let file = SelectedFile::from_bytes("bill.png", png(8, 6));
        let request = AnalysisRequest::new(Category::MedicalBill, Language::English, &file);
        let preview = DocumentPreview::from_request(&request);
        assert_eq!(preview.file_name, "bill.png");
        assert_eq!(preview.mime, "image/png");
        assert_eq!(preview.dimensions, Some((8, 6)));
    }

    #[test]
    fn sizes_are_human_readable() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}
