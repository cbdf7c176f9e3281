use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};
use ts_core::RasterBuffer;
use ts_core::config::ResizeFilter;

/// Resizer réutilisable wrappant fast_image_resize.
///
/// Garde le resizer et un buffer source entre deux appels.
///
/// # Example
/// ```
/// use ts_core::config::ResizeFilter;
/// use ts_source::resize::Resizer;
/// let r = Resizer::new(ResizeFilter::Nearest);
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch copy of the source (fast_image_resize wants `&mut` on it).
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a resizer using `filter`.
    #[must_use]
    pub fn new(filter: ResizeFilter) -> Self {
        let alg = match filter {
            ResizeFilter::Nearest => ResizeAlg::Nearest,
            ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        };
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(alg),
            src_buf: Vec::new(),
        }
    }

    /// Redimensionne `src` en `width`×`height`. Alpha stays opaque since every
    /// source pixel is opaque.
    ///
    /// # Errors
    /// Returns an error if either size is zero or the resize fails.
    ///
    /// # Example
    /// ```
    /// use ts_core::RasterBuffer;
    /// use ts_core::config::ResizeFilter;
    /// use ts_source::resize::Resizer;
    /// let mut r = Resizer::new(ResizeFilter::Bilinear);
    /// let out = r.resize(&RasterBuffer::new(100, 100), 50, 25).unwrap();
    /// assert_eq!(out.rgba.len(), 50 * 25 * 4);
    /// ```
    pub fn resize(&mut self, src: &RasterBuffer, width: u32, height: u32) -> Result<RasterBuffer> {
        if width == 0 || height == 0 || src.is_empty() {
            anyhow::bail!(
                "Resize impossible : {}×{} → {width}×{height}",
                src.width,
                src.height
            );
        }
        if src.width == width && src.height == height {
            return Ok(src.clone());
        }

        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.rgba);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x4)
                .context("Dimensions source invalides")?;

        let mut dst = vec![0u8; width as usize * height as usize * 4];
        let mut dst_image = Image::from_slice_u8(width, height, &mut dst, PixelType::U8x4)
            .context("Dimensions destination invalides")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Resize failed")?;

        Ok(RasterBuffer {
            width,
            height,
            rgba: dst,
        })
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new(ResizeFilter::default())
    }
}
