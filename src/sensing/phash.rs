use anyhow::Result;
use image_hasher::{HashAlg, HasherConfig, ImageHash};

/// Perceptual hash of an encoded webcam frame, used to skip classifier
/// invocations while the scene is static.
pub fn frame_hash(encoded: &[u8]) -> Result<ImageHash> {
    let img = image::load_from_memory(encoded)?;
    let hasher = HasherConfig::new()
        .hash_alg(HashAlg::DoubleGradient)
        .hash_size(8, 8)
        .to_hasher();
    Ok(hasher.hash_image(&img))
}

pub fn hamming_distance(lhs: &ImageHash, rhs: &ImageHash) -> u32 {
    lhs.dist(rhs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;

    fn encoded_frame(pixel: impl Fn(u32, u32) -> [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_fn(32, 32, |x, y| image::Rgb(pixel(x, y)));
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn identical_frames_hash_identically() {
        let frame = encoded_frame(|x, y| [(x * 8) as u8, (y * 8) as u8, 0]);
        let a = frame_hash(&frame).unwrap();
        let b = frame_hash(&frame).unwrap();
        assert_eq!(hamming_distance(&a, &b), 0);
    }

    #[test]
    fn different_frames_hash_apart() {
        let a = frame_hash(&encoded_frame(|x, _| [(x * 8) as u8, 0, 0])).unwrap();
        let b = frame_hash(&encoded_frame(|_, y| [0, (y * 8) as u8, 255])).unwrap();
        assert!(hamming_distance(&a, &b) > 0);
    }

    #[test]
    fn garbage_bytes_are_an_error() {
        assert!(frame_hash(b"not an image").is_err());
    }
}
