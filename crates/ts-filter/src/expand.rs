use ts_core::{DecodedFrame, PipelineError, RasterBuffer};

/// Copie RGB → RGBA en ajoutant un alpha opaque.
///
/// # Errors
/// Returns `PipelineError::InvalidPixelData` if `rgb.len() != 3 * width * height`.
///
/// # Example
/// ```
/// use ts_core::DecodedFrame;
/// use ts_filter::expand::expand_rgba;
/// let frame = DecodedFrame::new(1, 1, vec![1, 2, 3]);
/// assert_eq!(expand_rgba(&frame).unwrap().rgba, vec![1, 2, 3, 255]);
/// ```
pub fn expand_rgba(frame: &DecodedFrame) -> Result<RasterBuffer, PipelineError> {
    frame.validate()?;
    Ok(expand_unchecked(frame.width, frame.height, &frame.rgb))
}

/// Expansion sans validation, pour les transforms qui ont déjà vérifié la frame.
pub(crate) fn expand_unchecked(width: u32, height: u32, rgb: &[u8]) -> RasterBuffer {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for px in rgb.chunks_exact(3) {
        rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
    }
    RasterBuffer {
        width,
        height,
        rgba,
    }
}

/// Build an opaque grey raster from one value per pixel.
pub(crate) fn grey_raster(
    frame: &DecodedFrame,
    mut value_at: impl FnMut(u32, u32, (u8, u8, u8)) -> u8,
) -> RasterBuffer {
    let mut rgba = Vec::with_capacity(frame.rgb.len() / 3 * 4);
    for y in 0..frame.height {
        for x in 0..frame.width {
            let v = value_at(x, y, frame.rgb_at(x, y));
            rgba.extend_from_slice(&[v, v, v, 255]);
        }
    }
    RasterBuffer {
        width: frame.width,
        height: frame.height,
        rgba,
    }
}
