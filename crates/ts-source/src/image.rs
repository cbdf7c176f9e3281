use std::path::Path;

use ts_core::traits::PageDecoder;
use ts_core::{DecodedFrame, PipelineError};

use crate::decoder::TiffDecoder;

/// Lit un fichier TIFF et renvoie sa première page en RGB 8 bits.
///
/// # Errors
/// Returns `PipelineError::Decode` if the file cannot be read or parsed,
/// `PipelineError::NoPagesFound` if the container holds no page.
///
/// # Example
/// ```no_run
/// use ts_source::image::load_first_page;
/// let frame = load_first_page("scan.tif").unwrap();
/// println!("{}×{}", frame.width, frame.height);
/// ```
pub fn load_first_page(path: impl AsRef<Path>) -> Result<DecodedFrame, PipelineError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        PipelineError::Decode(format!("Impossible de lire {} : {e}", path.display()))
    })?;
    let frame = TiffDecoder::default().decode_first(&bytes)?;
    log::info!(
        "{} chargé : {}×{}",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// True si l'extension est `tif` ou `tiff` (insensible à la casse).
///
/// # Example
/// ```
/// use ts_source::image::is_tiff;
/// assert!(is_tiff("scan.TIF"));
/// assert!(!is_tiff("photo.png"));
/// ```
#[must_use]
pub fn is_tiff(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("tif") || e.eq_ignore_ascii_case("tiff"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::decoder::tests::encode_rgb8;

    #[test]
    fn loads_first_page_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two.tif");
        std::fs::write(&path, encode_rgb8(&[(2, 1, &[1, 2, 3, 4, 5, 6])])).unwrap();
        let frame = load_first_page(&path).unwrap();
        assert_eq!(frame, DecodedFrame::new(2, 1, vec![1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_first_page(dir.path().join("absent.tif")).unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }

    #[test]
    fn not_a_tiff_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.tif");
        std::fs::write(&path, b"definitely not a tiff").unwrap();
        assert!(matches!(
            load_first_page(&path),
            Err(PipelineError::Decode(_))
        ));
    }

    #[test]
    fn empty_container_has_no_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.tif");
        std::fs::write(&path, b"II*\0\0\0\0\0").unwrap();
        assert_eq!(load_first_page(&path), Err(PipelineError::NoPagesFound));
    }

    #[test]
    fn extension_check() {
        assert!(is_tiff("a/b/c.tiff"));
        assert!(!is_tiff("noext"));
    }
}
