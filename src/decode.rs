use image::RgbaImage;
use rayon::prelude::*;

use crate::capture::CapturedPhoto;
use crate::error::{BoothError, BoothResult};

/// Decode one captured photo into an RGBA bitmap at its native resolution.
pub fn decode_photo(photo: &CapturedPhoto) -> Result<RgbaImage, image::ImageError> {
    let dyn_img = image::load_from_memory(photo.bytes())?;
    Ok(dyn_img.to_rgba8())
}

/// Decode every photo in parallel, preserving input order. The join is
/// all-or-nothing: a single malformed photo fails the whole batch, naming the
/// offending index.
pub fn decode_batch(photos: &[CapturedPhoto]) -> BoothResult<Vec<RgbaImage>> {
    if photos.is_empty() {
        return Err(BoothError::EmptyInput);
    }

    photos
        .par_iter()
        .enumerate()
        .map(|(index, photo)| {
            decode_photo(photo).map_err(|e| BoothError::decode(index, e.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::Rgba;

    use super::*;

    fn png_photo(w: u32, h: u32, px: Rgba<u8>) -> CapturedPhoto {
        let img = RgbaImage::from_pixel(w, h, px);
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        CapturedPhoto::from_bytes(buf)
    }

    #[test]
    fn decode_keeps_native_dimensions() {
        let photo = png_photo(7, 11, Rgba([9, 8, 7, 255]));
        let img = decode_photo(&photo).unwrap();
        assert_eq!(img.dimensions(), (7, 11));
        assert_eq!(*img.get_pixel(3, 5), Rgba([9, 8, 7, 255]));
    }

    #[test]
    fn batch_preserves_order() {
        let photos: Vec<_> = (1u8..=4)
            .map(|i| png_photo(2, 2, Rgba([i * 10, 0, 0, 255])))
            .collect();
        let images = decode_batch(&photos).unwrap();
        assert_eq!(images.len(), 4);
        for (i, img) in images.iter().enumerate() {
            assert_eq!(img.get_pixel(0, 0)[0], (i as u8 + 1) * 10);
        }
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(matches!(decode_batch(&[]), Err(BoothError::EmptyInput)));
    }

    #[test]
    fn malformed_photo_fails_batch_with_its_index() {
        let photos = vec![
            png_photo(2, 2, Rgba([1, 2, 3, 255])),
            CapturedPhoto::from_bytes(vec![0xDE, 0xAD, 0xBE, 0xEF]),
        ];
        let err = decode_batch(&photos).unwrap_err();
        match err {
            BoothError::Decode { index, .. } => assert_eq!(index, 1),
            other => panic!("expected decode error, got {other}"),
        }
    }
}
