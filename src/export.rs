use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use base64::Engine as Base64Engine;
use image::RgbaImage;
use tracing::debug;

use crate::error::{BoothError, BoothResult};

/// Default artifact name when the caller supplies none.
pub const DEFAULT_FILENAME: &str = "one2kie-photobooth.png";

/// Lossless PNG encoding of the surface. PNG has no quality knob, so there is
/// nothing to negotiate.
pub fn encode_png(surface: &RgbaImage) -> BoothResult<Vec<u8>> {
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(surface.clone())
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| BoothError::export(format!("png encode failed: {e}")))?;
    Ok(bytes)
}

/// Encode the surface as a `data:image/png;base64,` URL for inline preview.
pub fn preview_data_url(surface: &RgbaImage) -> BoothResult<String> {
    let png = encode_png(surface)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&png);
    Ok(format!("data:image/png;base64,{b64}"))
}

/// Download filename for the edit screen: brand prefix plus the current unix
/// epoch in milliseconds.
pub fn timestamped_filename() -> String {
    format!(
        "One2Kie-PhotoBooth-{}.png",
        chrono::Utc::now().timestamp_millis()
    )
}

/// Removes the transient `.part` file unless disarmed. Runs exactly once on
/// every exit path, including when the final rename fails.
struct PartFileGuard {
    path: PathBuf,
    armed: bool,
}

impl PartFileGuard {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for PartFileGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

/// Save the surface as a PNG at `path`. The bytes land in a transient sibling
/// `.part` file first and are renamed into place, so `path` is never left
/// half-written and the transient file is always released.
pub fn save_png(surface: &RgbaImage, path: impl AsRef<Path>) -> BoothResult<()> {
    let path = path.as_ref();
    let png = encode_png(surface)?;

    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    // Armed before the write: a write that dies halfway still leaves the
    // transient file, and it must be released on that path too.
    let mut guard = PartFileGuard::new(part.clone());
    std::fs::write(&part, &png)
        .with_context(|| format!("write transient file '{}'", part.display()))?;

    std::fs::rename(&part, path)
        .with_context(|| format!("move '{}' into '{}'", part.display(), path.display()))?;
    guard.disarm();

    debug!(path = %path.display(), bytes = png.len(), "saved png");
    Ok(())
}
