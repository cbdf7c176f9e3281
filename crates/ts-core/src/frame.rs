use crate::error::PipelineError;

/// Première page décodée d'un conteneur : RGB entrelacé, 3 octets par pixel.
///
/// Produced by a `PageDecoder`, read-only for the transform pipeline.
///
/// # Example
/// ```
/// use ts_core::frame::DecodedFrame;
/// let frame = DecodedFrame::new(2, 1, vec![255, 0, 0, 0, 0, 255]);
/// assert!(frame.validate().is_ok());
/// assert_eq!(frame.rgb_at(1, 0), (0, 0, 255));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixels RGB, row-major, 3 octets par pixel.
    pub rgb: Vec<u8>,
}

impl DecodedFrame {
    /// Wrap decoded samples. The length invariant is checked lazily by
    /// [`DecodedFrame::validate`], not here.
    #[must_use]
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Self {
        Self { width, height, rgb }
    }

    /// Frame d'une couleur unie, pratique pour les tests et benchmarks.
    ///
    /// # Example
    /// ```
    /// use ts_core::frame::DecodedFrame;
    /// let frame = DecodedFrame::solid(3, 2, (10, 20, 30));
    /// assert_eq!(frame.rgb.len(), 18);
    /// ```
    #[must_use]
    pub fn solid(width: u32, height: u32, color: (u8, u8, u8)) -> Self {
        let count = width as usize * height as usize;
        let mut rgb = Vec::with_capacity(count * 3);
        for _ in 0..count {
            rgb.extend_from_slice(&[color.0, color.1, color.2]);
        }
        Self { width, height, rgb }
    }

    /// `width * height`, or `None` on overflow.
    #[must_use]
    pub fn pixel_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// `3 * width * height`, or `None` on overflow.
    #[must_use]
    pub fn expected_rgb_len(&self) -> Option<usize> {
        self.pixel_count().and_then(|n| n.checked_mul(3))
    }

    /// Vérifie `rgb.len() == 3 * width * height`.
    ///
    /// # Errors
    /// Returns `PipelineError::InvalidPixelData` on mismatch.
    ///
    /// # Example
    /// ```
    /// use ts_core::frame::DecodedFrame;
    /// use ts_core::PipelineError;
    /// let frame = DecodedFrame::new(2, 2, vec![0; 11]);
    /// assert_eq!(
    ///     frame.validate(),
    ///     Err(PipelineError::InvalidPixelData { expected: Some(12), actual: 11 })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), PipelineError> {
        let expected = self.expected_rgb_len();
        if expected == Some(self.rgb.len()) {
            Ok(())
        } else {
            Err(PipelineError::InvalidPixelData {
                expected,
                actual: self.rgb.len(),
            })
        }
    }

    /// Accès au pixel (x, y) → (r, g, b). Caller must have validated the frame.
    #[inline(always)]
    #[must_use]
    pub fn rgb_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        (self.rgb[idx], self.rgb[idx + 1], self.rgb[idx + 2])
    }
}

/// Buffer RGBA prêt à être présenté, 4 octets par pixel, alpha toujours opaque.
///
/// # Example
/// ```
/// use ts_core::frame::RasterBuffer;
/// let raster = RasterBuffer::new(10, 10);
/// assert_eq!(raster.rgba.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixels RGBA, row-major, 4 octets par pixel.
    pub rgba: Vec<u8>,
}

impl RasterBuffer {
    /// Crée un buffer opaque noir aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use ts_core::frame::RasterBuffer;
    /// let raster = RasterBuffer::new(1, 1);
    /// assert_eq!(raster.pixel(0, 0), (0, 0, 0, 255));
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut rgba = vec![0u8; width as usize * height as usize * 4];
        for px in rgba.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        if idx + 3 >= self.rgba.len() {
            return (0, 0, 0, 0);
        }
        (
            self.rgba[idx],
            self.rgba[idx + 1],
            self.rgba[idx + 2],
            self.rgba[idx + 3],
        )
    }

    /// True when every 4th byte is 255.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.rgba.chunks_exact(4).all(|px| px[3] == 255)
    }

    /// True when no pixel is stored (zero width or height).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rgba.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_exact_length() {
        let frame = DecodedFrame::solid(4, 3, (1, 2, 3));
        assert_eq!(frame.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_extra_bytes() {
        let mut frame = DecodedFrame::solid(2, 2, (0, 0, 0));
        frame.rgb.push(7);
        assert_eq!(
            frame.validate(),
            Err(PipelineError::InvalidPixelData {
                expected: Some(12),
                actual: 13
            })
        );
    }

    #[test]
    fn zero_sized_frame_is_valid() {
        let frame = DecodedFrame::new(0, 5, Vec::new());
        assert_eq!(frame.validate(), Ok(()));
    }

    #[test]
    fn raster_new_is_opaque() {
        let raster = RasterBuffer::new(3, 2);
        assert!(raster.is_opaque());
        assert_eq!(raster.pixel(2, 1), (0, 0, 0, 255));
    }
}
