use crate::models::BitMatrix;

/// Convert a grayscale raster to binary using Otsu's threshold.
/// Returns a BitMatrix where true = dark
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    let threshold = otsu_threshold(gray);
    let mut binary = BitMatrix::new(width, height);

    for (idx, &pixel) in gray.iter().enumerate().take(width * height) {
        binary.set(idx % width, idx / width, pixel < threshold);
    }

    binary
}

/// Threshold maximising the between-class variance; pixels below it are dark.
///
/// A single-intensity image has no split and gets the midpoint 128.
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &count)| i as f64 * count as f64)
        .sum();

    let mut dark_pixels = 0.0;
    let mut dark_sum = 0.0;
    let mut max_variance = 0.0;
    let mut optimal = 128u8;

    // Threshold t puts intensities 0..t in the dark class
    for threshold in 1..=255usize {
        let count = histogram[threshold - 1] as f64;
        dark_pixels += count;
        dark_sum += (threshold - 1) as f64 * count;

        let light_pixels = total - dark_pixels;
        if dark_pixels == 0.0 || light_pixels == 0.0 {
            continue;
        }

        let dark_mean = dark_sum / dark_pixels;
        let light_mean = (total_sum - dark_sum) / light_pixels;
        let variance =
            (dark_pixels / total) * (light_pixels / total) * (dark_mean - light_mean).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal = threshold as u8;
        }
    }

    optimal
}
