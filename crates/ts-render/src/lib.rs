/// Rendu TUI pour tiffstep.
///
/// Half-block raster drawing and the two-pane carousel layout.
pub mod canvas;
pub mod ui;

pub use canvas::{fit_within, pane_pixel_size, render_raster};
pub use ui::{CarouselView, PaneState, draw, pane_areas};
