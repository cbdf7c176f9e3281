//! Décodeur TIFF multi-pages → frames RGB 8 bits.

use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use ts_core::traits::PageDecoder;
use ts_core::{DecodedFrame, PipelineError};

/// Décodeur TIFF basé sur la crate `tiff`.
///
/// Chaque IFD devient une page. Samples are normalised to interleaved 8-bit
/// RGB: grey is replicated, alpha is dropped, 16-bit samples keep their high
/// byte.
///
/// # Example
/// ```
/// use ts_core::traits::PageDecoder;
/// use ts_source::decoder::TiffDecoder;
/// assert!(TiffDecoder::default().decode_pages(&[]).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct TiffDecoder {
    /// Taille maximale d'un buffer décodé, en octets.
    pub max_buffer_size: usize,
}

impl Default for TiffDecoder {
    fn default() -> Self {
        Self {
            // Large scans: up to 1 GiB uncompressed.
            max_buffer_size: 1024 * 1024 * 1024,
        }
    }
}

impl TiffDecoder {
    fn open<'a>(&self, bytes: &'a [u8]) -> Result<Decoder<Cursor<&'a [u8]>>, PipelineError> {
        if first_ifd_offset(bytes) == Some(0) {
            return Err(PipelineError::NoPagesFound);
        }

        let mut limits = Limits::default();
        limits.decoding_buffer_size = self.max_buffer_size;
        limits.ifd_value_size = self.max_buffer_size;
        limits.intermediate_buffer_size = self.max_buffer_size;

        Decoder::new(Cursor::new(bytes))
            .map(|d| d.with_limits(limits))
            .map_err(|e| PipelineError::Decode(format!("En-tête TIFF invalide : {e}")))
    }
}

impl PageDecoder for TiffDecoder {
    fn decode_pages(&self, bytes: &[u8]) -> Result<Vec<DecodedFrame>, PipelineError> {
        let mut decoder = self.open(bytes)?;
        let mut pages = vec![read_page(&mut decoder)?];
        while decoder.more_images() {
            decoder
                .next_image()
                .map_err(|e| PipelineError::Decode(format!("IFD suivant illisible : {e}")))?;
            pages.push(read_page(&mut decoder)?);
        }
        log::debug!("{} page(s) TIFF décodée(s)", pages.len());
        Ok(pages)
    }

    fn decode_first(&self, bytes: &[u8]) -> Result<DecodedFrame, PipelineError> {
        let mut decoder = self.open(bytes)?;
        read_page(&mut decoder)
    }
}

/// Offset du premier IFD lu dans l'en-tête (classic ou BigTIFF).
///
/// `None` when the header is not recognised; the `tiff` decoder then reports
/// the real error. An offset of 0 means the container holds no page.
fn first_ifd_offset(bytes: &[u8]) -> Option<u64> {
    let little = match bytes.get(..2)? {
        b"II" => true,
        b"MM" => false,
        _ => return None,
    };
    let u16_at = |at: usize| -> Option<u16> {
        let raw: [u8; 2] = bytes.get(at..at + 2)?.try_into().ok()?;
        Some(if little { u16::from_le_bytes(raw) } else { u16::from_be_bytes(raw) })
    };
    match u16_at(2)? {
        42 => {
            let raw: [u8; 4] = bytes.get(4..8)?.try_into().ok()?;
            let offset = if little { u32::from_le_bytes(raw) } else { u32::from_be_bytes(raw) };
            Some(u64::from(offset))
        }
        43 => {
            let raw: [u8; 8] = bytes.get(8..16)?.try_into().ok()?;
            Some(if little { u64::from_le_bytes(raw) } else { u64::from_be_bytes(raw) })
        }
        _ => None,
    }
}

fn read_page(decoder: &mut Decoder<Cursor<&[u8]>>) -> Result<DecodedFrame, PipelineError> {
    let (width, height) = decoder
        .dimensions()
        .map_err(|e| PipelineError::Decode(format!("Dimensions TIFF illisibles : {e}")))?;
    let color_type = decoder
        .colortype()
        .map_err(|e| PipelineError::Decode(format!("Type de couleur TIFF illisible : {e}")))?;
    let data = decoder
        .read_image()
        .map_err(|e| PipelineError::Decode(format!("Données TIFF illisibles : {e}")))?;

    let (samples, depth): (Vec<u8>, u8) = match data {
        DecodingResult::U8(buf) => (buf, 8),
        DecodingResult::U16(buf) => (buf.iter().map(|&v| (v >> 8) as u8).collect(), 16),
        _ => {
            return Err(PipelineError::Decode(format!(
                "Format d'échantillon non supporté ({color_type:?})"
            )));
        }
    };

    let channels = match color_type {
        ColorType::Gray(bits) if bits == depth => 1,
        ColorType::GrayA(bits) if bits == depth => 2,
        ColorType::RGB(bits) if bits == depth => 3,
        ColorType::RGBA(bits) if bits == depth => 4,
        other => {
            return Err(PipelineError::Decode(format!(
                "Type de couleur non supporté : {other:?}"
            )));
        }
    };

    Ok(DecodedFrame::new(width, height, to_rgb(&samples, channels)))
}

/// Réduit des échantillons entrelacés à 1..=4 canaux en RGB.
///
/// A truncated trailing pixel is dropped; the frame validator then reports
/// the length mismatch.
fn to_rgb(samples: &[u8], channels: usize) -> Vec<u8> {
    if channels == 3 {
        return samples.to_vec();
    }
    let mut rgb = Vec::with_capacity(samples.len() / channels * 3);
    for px in samples.chunks_exact(channels) {
        match channels {
            1 | 2 => rgb.extend_from_slice(&[px[0], px[0], px[0]]),
            _ => rgb.extend_from_slice(&px[..3]),
        }
    }
    rgb
}
