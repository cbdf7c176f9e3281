use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ts_core::RasterBuffer;

/// Dimensions en pixels disponibles dans une zone de cellules.
///
/// Each cell holds two vertical pixels (half-block rendering).
///
/// # Example
/// ```
/// use ratatui::layout::Rect;
/// use ts_render::canvas::pane_pixel_size;
/// assert_eq!(pane_pixel_size(Rect::new(0, 0, 40, 10)), (40, 20));
/// ```
#[must_use]
pub fn pane_pixel_size(area: Rect) -> (u32, u32) {
    (u32::from(area.width), u32::from(area.height) * 2)
}

/// Plus grande taille de même ratio que `src` tenant dans `max`.
///
/// Never upscales and never returns a zero dimension for a non-empty source.
///
/// # Example
/// ```
/// use ts_render::canvas::fit_within;
/// assert_eq!(fit_within(400, 200, 100, 100), (100, 50));
/// assert_eq!(fit_within(10, 10, 100, 100), (10, 10));
/// ```
#[must_use]
pub fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 || max_w == 0 || max_h == 0 {
        return (0, 0);
    }
    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }
    let scale = (f64::from(max_w) / f64::from(src_w)).min(f64::from(max_h) / f64::from(src_h));
    let w = (f64::from(src_w) * scale).floor().clamp(1.0, f64::from(max_w)) as u32;
    let h = (f64::from(src_h) * scale).floor().clamp(1.0, f64::from(max_h)) as u32;
    (w, h)
}

/// Écrit un `RasterBuffer` dans un `ratatui::Buffer`, centré dans `area`.
///
/// Chaque cellule couvre 2 pixels verticaux : pixel du haut en bg, pixel du
/// bas en fg, caractère '▄'. The raster is expected to be fitted beforehand;
/// whatever exceeds `area` is clipped.
pub fn render_raster(buf: &mut Buffer, area: Rect, raster: &RasterBuffer) {
    if raster.is_empty() || area.is_empty() {
        log::debug!(
            "Raster {}×{} non dessiné dans {}×{}",
            raster.width,
            raster.height,
            area.width,
            area.height
        );
        return;
    }
    let (area_w, area_h) = pane_pixel_size(area);
    if raster.width > area_w || raster.height > area_h {
        log::debug!(
            "Raster {}×{} rogné à {area_w}×{area_h}",
            raster.width,
            raster.height
        );
    }
    let off_x = area_w.saturating_sub(raster.width) / 2;
    // Offset in whole cells so pixel pairs stay aligned.
    let off_cy = area_h.saturating_sub(raster.height) / 4;

    for cy in 0..area.height {
        let Some(row) = (u32::from(cy)).checked_sub(off_cy) else {
            continue;
        };
        let py_top = row * 2;
        if py_top >= raster.height {
            break;
        }
        let py_bot = py_top + 1;

        for cx in 0..area.width {
            let Some(px) = (u32::from(cx)).checked_sub(off_x) else {
                continue;
            };
            if px >= raster.width {
                break;
            }
            let Some(cell) = buf.cell_mut((area.x + cx, area.y + cy)) else {
                continue;
            };

            let (tr, tg, tb, _) = raster.pixel(px, py_top);
            if py_bot < raster.height {
                let (br, bg, bb, _) = raster.pixel(px, py_bot);
                cell.set_char('▄')
                    .set_fg(Color::Rgb(br, bg, bb)) // Bottom pixel = fg
                    .set_bg(Color::Rgb(tr, tg, tb)); // Top pixel = bg
            } else {
                // Dernière ligne impaire : seul le pixel du haut existe.
                cell.set_char('▀')
                    .set_fg(Color::Rgb(tr, tg, tb))
                    .set_bg(Color::Reset);
            }
        }
    }
}
