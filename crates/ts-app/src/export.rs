use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use rayon::prelude::*;
use ts_core::config::ExportFormat;
use ts_core::{DecodedFrame, Transform};

/// Rend chaque transformation et écrit `<stem>_<nom>.<ext>` dans `dir`.
///
/// Transforms run in parallel; they only read `frame`.
///
/// # Errors
/// Returns the first transform error, or an I/O / encoding error with the
/// offending path.
pub fn export_all(
    frame: &DecodedFrame,
    transforms: &[Transform],
    dir: &Path,
    format: ExportFormat,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Impossible de créer {}", dir.display()))?;

    let image_format = match format {
        ExportFormat::Png => ImageFormat::Png,
        ExportFormat::Bmp => ImageFormat::Bmp,
    };

    transforms
        .par_iter()
        .map(|&t| -> Result<PathBuf> {
            let raster = ts_filter::apply(frame, t)?;
            let img = RgbaImage::from_raw(raster.width, raster.height, raster.rgba)
                .with_context(|| format!("Buffer {t} incohérent"))?;
            let path = dir.join(format!("{stem}_{}.{}", t.name(), format.extension()));
            img.save_with_format(&path, image_format)
                .with_context(|| format!("Écriture impossible : {}", path.display()))?;
            log::info!("Exporté : {}", path.display());
            Ok(path)
        })
        .collect()
}

/// Exporte toutes les images de la ligne de commande.
///
/// A failing image is logged and skipped; the others are still exported.
///
/// # Errors
/// Returns an error if at least one image could not be exported.
pub fn run_export(
    images: &[PathBuf],
    transforms: &[Transform],
    dir: &Path,
    format: ExportFormat,
) -> Result<()> {
    let mut failures = 0usize;
    for path in images {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        let result = ts_source::load_first_page(path)
            .map_err(anyhow::Error::from)
            .and_then(|frame| export_all(&frame, transforms, dir, format, stem));
        match result {
            Ok(paths) => println!("{} → {} fichier(s)", path.display(), paths.len()),
            Err(e) => {
                log::error!("Export de {} impossible : {e:#}", path.display());
                failures += 1;
            }
        }
    }
    if failures > 0 {
        anyhow::bail!("{failures} image(s) sur {} en échec", images.len());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_file_per_transform() {
        let dir = tempfile::tempdir().unwrap();
        let frame = DecodedFrame::solid(4, 3, (200, 100, 50));
        let paths = export_all(
            &frame,
            &Transform::ALL,
            dir.path(),
            ExportFormat::Png,
            "scan",
        )
        .unwrap();
        assert_eq!(paths.len(), Transform::ALL.len());
        assert!(dir.path().join("scan_dither.png").exists());

        let half = image::open(dir.path().join("scan_brightness.png"))
            .unwrap()
            .to_rgba8();
        assert_eq!(half.dimensions(), (4, 3));
        assert_eq!(half.get_pixel(0, 0).0, [100, 50, 25, 255]);
    }

    #[test]
    fn bmp_extension_follows_format() {
        let dir = tempfile::tempdir().unwrap();
        let frame = DecodedFrame::solid(2, 2, (1, 2, 3));
        let paths = export_all(
            &frame,
            &[Transform::Luminance],
            dir.path(),
            ExportFormat::Bmp,
            "x",
        )
        .unwrap();
        assert_eq!(paths, vec![dir.path().join("x_luminance.bmp")]);
    }

    #[test]
    fn invalid_frame_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let frame = DecodedFrame::new(2, 2, vec![0; 5]);
        let err = export_all(
            &frame,
            &[Transform::Identity],
            dir.path(),
            ExportFormat::Png,
            "bad",
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalides"));
        assert!(!dir.path().join("bad_identity.png").exists());
    }

    #[test]
    fn run_export_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.tif");
        assert!(run_export(&[missing], &Transform::ALL, dir.path(), ExportFormat::Png).is_err());
    }

    #[test]
    fn run_export_reads_tiff_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("page.tif");
        let mut file = std::fs::File::create(&src).unwrap();
        {
            let mut encoder = tiff::encoder::TiffEncoder::new(&mut file).unwrap();
            encoder
                .write_image::<tiff::encoder::colortype::RGB8>(2, 1, &[0, 0, 0, 255, 255, 255])
                .unwrap();
        }
        let out = dir.path().join("out");
        run_export(&[src], &[Transform::Equalize], &out, ExportFormat::Png).unwrap();
        assert!(out.join("page_equalize.png").exists());
    }
}
