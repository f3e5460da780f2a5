//! Image intake — user-supplied photographs decoded into embeddable payloads.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::ImageFormat;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Default cap on a single photograph's raw size.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("file exceeds {limit} bytes (got {actual})")]
    TooLarge { limit: usize, actual: usize },
    #[error("not a recognizable image")]
    UnsupportedFormat,
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One of the three fixed photography viewpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Angle {
    Frontal,
    Oblique,
    Side,
}

impl Angle {
    /// Request order: frontal, oblique, side.
    pub const ALL: [Angle; 3] = [Angle::Frontal, Angle::Oblique, Angle::Side];
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Angle::Frontal => "frontal",
            Angle::Oblique => "oblique",
            Angle::Side => "side",
        };
        f.write_str(name)
    }
}

/// Self-describing embeddable image payload: a declared MIME type plus
/// the base64-encoded file bytes, with no data-URI prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Base64 of the raw file bytes.
    pub data: String,
}

impl EncodedImage {
    /// Render as a `data:` URI for embedding in presentation surfaces.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// The three labeled photograph slots, each independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiAngleImages {
    pub frontal: Option<EncodedImage>,
    pub oblique: Option<EncodedImage>,
    pub side: Option<EncodedImage>,
}

impl MultiAngleImages {
    pub fn get(&self, angle: Angle) -> Option<&EncodedImage> {
        match angle {
            Angle::Frontal => self.frontal.as_ref(),
            Angle::Oblique => self.oblique.as_ref(),
            Angle::Side => self.side.as_ref(),
        }
    }

    /// Replace one slot, leaving the other angles untouched.
    pub fn set(&mut self, angle: Angle, image: EncodedImage) {
        let slot = match angle {
            Angle::Frontal => &mut self.frontal,
            Angle::Oblique => &mut self.oblique,
            Angle::Side => &mut self.side,
        };
        *slot = Some(image);
    }

    /// True iff all three angle slots are populated.
    pub fn is_complete(&self) -> bool {
        self.frontal.is_some() && self.oblique.is_some() && self.side.is_some()
    }
}

/// Decode raw file bytes into an embeddable payload.
///
/// Guards: a size cap and a raster-format sniff restricted to the
/// formats the remote model accepts. The bytes are embedded as-is;
/// no resizing or re-encoding happens here.
pub fn decode_image(bytes: &[u8], max_bytes: usize) -> Result<EncodedImage, IntakeError> {
    if bytes.len() > max_bytes {
        return Err(IntakeError::TooLarge {
            limit: max_bytes,
            actual: bytes.len(),
        });
    }

    let format = image::guess_format(bytes).map_err(|_| IntakeError::UnsupportedFormat)?;
    let mime_type = mime_for(format).ok_or(IntakeError::UnsupportedFormat)?;

    Ok(EncodedImage {
        mime_type: mime_type.to_string(),
        data: BASE64.encode(bytes),
    })
}

/// Read a photograph from disk and decode it.
pub fn load_image(path: &Path, max_bytes: usize) -> Result<EncodedImage, IntakeError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes, max_bytes)
}

/// MIME types the remote model accepts as inline image data.
fn mime_for(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = ImageBuffer::from_pixel(2, 2, Rgb::<u8>([120, 90, 200]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .expect("encode test png");
        out.into_inner()
    }

    #[test]
    fn test_decode_png_declares_mime() {
        let bytes = png_bytes();
        let image = decode_image(&bytes, DEFAULT_MAX_IMAGE_BYTES).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, BASE64.encode(&bytes));
    }

    #[test]
    fn test_data_uri_self_describing() {
        let image = decode_image(&png_bytes(), DEFAULT_MAX_IMAGE_BYTES).unwrap();
        let uri = image.data_uri();
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uri.ends_with(&image.data));
    }

    #[test]
    fn test_decode_rejects_non_image() {
        let err = decode_image(b"definitely not an image", DEFAULT_MAX_IMAGE_BYTES).unwrap_err();
        assert!(matches!(err, IntakeError::UnsupportedFormat));
    }

    #[test]
    fn test_decode_rejects_oversize() {
        let bytes = png_bytes();
        let err = decode_image(&bytes, 4).unwrap_err();
        match err {
            IntakeError::TooLarge { limit, actual } => {
                assert_eq!(limit, 4);
                assert_eq!(actual, bytes.len());
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_set_touches_single_slot() {
        let mut images = MultiAngleImages::default();
        let payload = EncodedImage {
            mime_type: "image/jpeg".into(),
            data: "AAAA".into(),
        };
        images.set(Angle::Oblique, payload.clone());
        assert_eq!(images.get(Angle::Oblique), Some(&payload));
        assert!(images.frontal.is_none());
        assert!(images.side.is_none());
        assert!(!images.is_complete());
    }

    #[test]
    fn test_complete_requires_all_angles() {
        let mut images = MultiAngleImages::default();
        let payload = EncodedImage {
            mime_type: "image/jpeg".into(),
            data: "AAAA".into(),
        };
        for angle in Angle::ALL {
            assert!(!images.is_complete());
            images.set(angle, payload.clone());
        }
        assert!(images.is_complete());
    }
}
