//! Égalisation d'histogramme par canal (R, G, B indépendants).

use ts_core::{DecodedFrame, PipelineError, RasterBuffer};

use crate::expand::expand_unchecked;

/// Histogrammes des trois canaux, 256 classes chacun.
pub type ChannelHistograms = [[u64; 256]; 3];

/// Tables de correspondance valeur → valeur égalisée, une par canal.
pub type ChannelCdfs = [[u8; 256]; 3];

/// Compte les occurrences de chaque valeur, par canal, sur la frame d'origine.
///
/// # Errors
/// Returns `PipelineError::InvalidPixelData` if the frame fails validation.
///
/// # Example
/// ```
/// use ts_core::DecodedFrame;
/// use ts_filter::equalize::histograms;
/// let frame = DecodedFrame::new(2, 1, vec![7, 0, 0, 7, 0, 9]);
/// let h = histograms(&frame).unwrap();
/// assert_eq!(h[0][7], 2);
/// assert_eq!(h[2][9], 1);
/// ```
pub fn histograms(frame: &DecodedFrame) -> Result<ChannelHistograms, PipelineError> {
    frame.validate()?;
    Ok(histograms_unchecked(&frame.rgb))
}

fn histograms_unchecked(rgb: &[u8]) -> ChannelHistograms {
    let mut hist = [[0u64; 256]; 3];
    for px in rgb.chunks_exact(3) {
        hist[0][px[0] as usize] += 1;
        hist[1][px[1] as usize] += 1;
        hist[2][px[2] as usize] += 1;
    }
    hist
}

/// CDF normalisée : `cdf[v] = (Σ hist[0..=v] / pixel_count) * 255`.
///
/// Entries are truncated into the byte table, unlike the other transforms
/// which go through the rounding store. A zero pixel count yields an
/// all-zero table.
///
/// # Example
/// ```
/// use ts_filter::equalize::cdf_table;
/// let mut hist = [0u64; 256];
/// hist[10] = 1;
/// hist[20] = 1;
/// let cdf = cdf_table(&hist, 2);
/// assert_eq!(cdf[10], 127); // 1/2 * 255 = 127.5
/// assert_eq!(cdf[20], 255);
/// ```
#[must_use]
pub fn cdf_table(hist: &[u64; 256], pixel_count: u64) -> [u8; 256] {
    let mut table = [0u8; 256];
    if pixel_count == 0 {
        return table;
    }
    let total = pixel_count as f64;
    let mut cumulative = 0u64;
    for (v, slot) in table.iter_mut().enumerate() {
        cumulative += hist[v];
        *slot = ((cumulative as f64 / total) * 255.0).clamp(0.0, 255.0) as u8;
    }
    table
}

/// Calcule les trois CDF d'une frame.
///
/// # Errors
/// Returns `PipelineError::InvalidPixelData` if the frame fails validation.
///
/// # Example
/// ```
/// use ts_core::DecodedFrame;
/// use ts_filter::equalize::channel_cdfs;
/// let frame = DecodedFrame::solid(4, 4, (12, 34, 56));
/// let cdfs = channel_cdfs(&frame).unwrap();
/// assert_eq!(cdfs[0][11], 0);
/// assert_eq!(cdfs[0][12], 255);
/// ```
pub fn channel_cdfs(frame: &DecodedFrame) -> Result<ChannelCdfs, PipelineError> {
    let hist = histograms(frame)?;
    Ok(cdfs_from(&hist, frame.rgb.len() as u64 / 3))
}

fn cdfs_from(hist: &ChannelHistograms, pixel_count: u64) -> ChannelCdfs {
    [
        cdf_table(&hist[0], pixel_count),
        cdf_table(&hist[1], pixel_count),
        cdf_table(&hist[2], pixel_count),
    ]
}

/// Égalise chaque canal via sa CDF puis étend en RGBA.
///
/// # Errors
/// Returns `PipelineError::InvalidPixelData` if the frame fails validation.
pub fn equalize(frame: &DecodedFrame) -> Result<RasterBuffer, PipelineError> {
    frame.validate()?;
    let hist = histograms_unchecked(&frame.rgb);
    let cdfs = cdfs_from(&hist, frame.rgb.len() as u64 / 3);

    let remapped: Vec<u8> = frame
        .rgb
        .chunks_exact(3)
        .flat_map(|px| {
            [
                cdfs[0][px[0] as usize],
                cdfs[1][px[1] as usize],
                cdfs[2][px[2] as usize],
            ]
        })
        .collect();

    Ok(expand_unchecked(frame.width, frame.height, &remapped))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn gradient_frame() -> DecodedFrame {
        let rgb = (0..=255u8).flat_map(|v| [v, v, 255 - v]).collect();
        DecodedFrame::new(256, 1, rgb)
    }

    #[test]
    fn cdfs_are_monotonic() {
        let rgb: Vec<u8> = (0..300u32)
            .flat_map(|i| [(i * 7 % 256) as u8, (i * i % 97) as u8, (i / 3) as u8])
            .collect();
        let frame = DecodedFrame::new(30, 10, rgb);
        for cdf in channel_cdfs(&frame).unwrap() {
            assert!(cdf.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(cdf[255], 255);
        }
    }

    #[test]
    fn minimum_value_maps_to_its_share() {
        // Red channel: 10, 10, 20, 30.
        let frame = DecodedFrame::new(
            2,
            2,
            vec![10, 0, 0, 10, 0, 0, 20, 0, 0, 30, 0, 0],
        );
        let cdfs = channel_cdfs(&frame).unwrap();
        assert_eq!(cdfs[0][9], 0);
        assert_eq!(cdfs[0][10], 127); // 2/4 * 255 = 127.5
        assert_eq!(cdfs[0][20], 191); // 3/4 * 255 = 191.25
        assert_eq!(cdfs[0][30], 255);

        let out = equalize(&frame).unwrap();
        let reds: Vec<u8> = out.rgba.chunks_exact(4).map(|px| px[0]).collect();
        assert_eq!(reds, vec![127, 127, 191, 255]);
    }

    #[test]
    fn channels_are_equalized_independently() {
        let out = equalize(&gradient_frame()).unwrap();
        // Red rises with x, blue falls: their remapped values mirror each other.
        let first = out.pixel(0, 0);
        let last = out.pixel(255, 0);
        assert!(first.0 < last.0);
        assert!(first.2 > last.2);
        assert_eq!(first.0, first.1);
        assert!(out.is_opaque());
    }

    #[test]
    fn equalizing_twice_is_nearly_idempotent() {
        let once = equalize(&gradient_frame()).unwrap();
        let rgb: Vec<u8> = once
            .rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        let twice = equalize(&DecodedFrame::new(256, 1, rgb)).unwrap();
        for (a, b) in once.rgba.iter().zip(&twice.rgba) {
            assert!((i16::from(*a) - i16::from(*b)).abs() <= 2, "{a} vs {b}");
        }
    }

    #[test]
    fn empty_frame_yields_empty_raster() {
        let out = equalize(&DecodedFrame::new(0, 0, Vec::new())).unwrap();
        assert!(out.is_empty());
        assert_eq!(cdf_table(&[0; 256], 0), [0u8; 256]);
    }

    #[test]
    fn invalid_frame_is_rejected() {
        let frame = DecodedFrame::new(2, 2, vec![0; 13]);
        assert!(matches!(
            equalize(&frame),
            Err(PipelineError::InvalidPixelData { .. })
        ));
        assert!(histograms(&frame).is_err());
    }
}
