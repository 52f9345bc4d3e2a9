//! Raster helpers around the symbolic codec
//!
//! Rendering a finished matrix to a grayscale image and reading a clean,
//! axis-aligned render back into a module grid. Photographs (perspective,
//! rotation, noise) are not handled here.

use crate::codec::Codec;
use crate::config::RenderOptions;
use crate::detector::finder::is_qr_code;
use crate::error::{QrError, QrResult};
use crate::models::{Matrix, Module, QRCode, Version};
use crate::utils::binarization::{otsu_binarize, otsu_threshold};
use image::{GrayImage, Luma};
use std::path::Path;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Draw the matrix with `module_px` pixels per module inside a light quiet zone
pub fn render(matrix: &Matrix, options: &RenderOptions) -> QrResult<GrayImage> {
    matrix.ensure_complete()?;
    let side = options.image_side(matrix.size());
    let mut image = GrayImage::from_pixel(side, side, LIGHT);

    let module_px = options.module_px;
    let offset = options.quiet_zone * module_px;
    for row in 0..matrix.size() {
        for col in 0..matrix.size() {
            if matrix.get(row, col) != Module::Black {
                continue;
            }
            let x0 = offset + col as u32 * module_px;
            let y0 = offset + row as u32 * module_px;
            for y in y0..y0 + module_px {
                for x in x0..x0 + module_px {
                    image.put_pixel(x, y, DARK);
                }
            }
        }
    }
    Ok(image)
}

/// Write the image as PNG
pub fn save_png<P: AsRef<Path>>(image: &GrayImage, path: P) -> QrResult<()> {
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Load any supported image file as 8-bit grayscale
pub fn load_gray<P: AsRef<Path>>(path: P) -> QrResult<GrayImage> {
    Ok(image::open(path)?.to_luma8())
}

/// Crop to the bounding box of dark pixels, dropping the quiet zone.
///
/// Returns `None` when the image has no dark pixels.
pub fn crop_to_symbol(gray: &GrayImage) -> Option<GrayImage> {
    let (width, height) = gray.dimensions();
    let binary = otsu_binarize(gray.as_raw(), width as usize, height as usize);

    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..height {
        for x in 0..width {
            if !binary.get(x as usize, y as usize) {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            });
        }
    }

    let (x0, y0, x1, y1) = bounds?;
    Some(image::imageops::crop_imm(gray, x0, y0, x1 - x0 + 1, y1 - y0 + 1).to_image())
}

/// Sample a cropped symbol at module centres as a `size` x `size` grid
/// (`true` = light)
pub fn sample_grid(symbol: &GrayImage, size: usize) -> Vec<Vec<bool>> {
    let threshold = otsu_threshold(symbol.as_raw());
    let (width, height) = symbol.dimensions();
    let center = |index: usize, extent: u32| -> u32 {
        let pos = (index as f64 + 0.5) * extent as f64 / size as f64;
        (pos as u32).min(extent.saturating_sub(1))
    };

    (0..size)
        .map(|row| {
            let y = center(row, height);
            (0..size)
                .map(|col| symbol.get_pixel(center(col, width), y).0[0] >= threshold)
                .collect()
        })
        .collect()
}

/// Try grid sizes 21, 25 and 29 and keep the first one with valid finder patterns
pub fn detect_version(gray: &GrayImage) -> QrResult<(Version, Vec<Vec<bool>>)> {
    let symbol = crop_to_symbol(gray).ok_or(QrError::VersionNotDetected)?;
    for version in Version::ALL {
        let grid = sample_grid(&symbol, version.size());
        let matrix = Matrix::from_light_grid(&grid)?;
        if is_qr_code(&matrix) {
            tracing::debug!(version = version.number(), "grid size detected");
            return Ok((version, grid));
        }
    }
    Err(QrError::VersionNotDetected)
}

/// Decode a rendered symbol image
pub fn decode_image(gray: &GrayImage) -> QrResult<QRCode> {
    let (_, grid) = detect_version(gray)?;
    Codec::shared().decoder().decode_light_grid(&grid)
}

/// Load and decode an image file
pub fn decode_file<P: AsRef<Path>>(path: P) -> QrResult<QRCode> {
    decode_image(&load_gray(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(text: &str) -> QRCode {
        Codec::shared().encoder().encode(text).unwrap()
    }

    #[test]
    fn test_render_geometry() {
        let code = encoded("render");
        let options = RenderOptions::new().with_module_px(3).with_quiet_zone(2);
        let image = render(&code.modules, &options).unwrap();
        assert_eq!(image.dimensions(), (75, 75));
        // Quiet zone is light, the finder corner is dark
        assert_eq!(image.get_pixel(5, 5).0[0], 255);
        assert_eq!(image.get_pixel(6, 6).0[0], 0);
    }

    #[test]
    fn test_render_rejects_unfinished_matrix() {
        assert!(matches!(
            render(&Matrix::new(21), &RenderOptions::default()),
            Err(QrError::UnassignedModule { row: 0, col: 0 })
        ));
    }

    #[test]
    fn test_crop_and_sample() {
        let code = encoded("SAMPLE");
        let image = render(&code.modules, &RenderOptions::default()).unwrap();
        let symbol = crop_to_symbol(&image).unwrap();
        assert_eq!(symbol.dimensions(), (210, 210));
        let grid = sample_grid(&symbol, 21);
        assert_eq!(grid, code.modules.to_light_grid().unwrap());
    }

    #[test]
    fn test_detect_version_per_size() {
        for (text, version) in [
            ("v1", Version::V1),
            ("a message for version two", Version::V2),
            ("a rather longer message for version three", Version::V3),
        ] {
            let code = encoded(text);
            assert_eq!(code.version, version);
            let image = render(&code.modules, &RenderOptions::new().with_module_px(4)).unwrap();
            let (detected, _) = detect_version(&image).unwrap();
            assert_eq!(detected, version);
            assert_eq!(decode_image(&image).unwrap().content, text);
        }
    }

    #[test]
    fn test_blank_image() {
        let blank = GrayImage::from_pixel(50, 50, LIGHT);
        assert!(crop_to_symbol(&blank).is_none());
        assert!(matches!(
            detect_version(&blank),
            Err(QrError::VersionNotDetected)
        ));
    }
}
