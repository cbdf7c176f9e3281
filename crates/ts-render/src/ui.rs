use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ts_core::{Carousel, RasterBuffer};

use crate::canvas;

/// Contenu d'un panneau du carrousel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PaneState {
    /// Frame en cours de décodage ou de transformation.
    #[default]
    Loading,
    /// Raster already fitted to the pane.
    Ready(RasterBuffer),
    /// Rendu échoué : panneau vide avec le message.
    Failed(String),
}

/// Tout ce que `draw` doit savoir pour une frame d'affichage.
pub struct CarouselView<'a> {
    /// Étape courante (titres des panneaux, libellé).
    pub carousel: &'a Carousel,
    /// Gauche, droite.
    pub panes: &'a [PaneState; 2],
    /// Nom du fichier affiché.
    pub image_name: Option<&'a str>,
    /// (index 0-based, nombre d'images).
    pub image_position: (usize, usize),
    /// Ligne de statut visible.
    pub show_status: bool,
}

/// Zones intérieures (sans bordure) des deux panneaux pour une zone écran.
///
/// The app uses this to size rasters before `draw` runs.
///
/// # Example
/// ```
/// use ratatui::layout::Rect;
/// use ts_render::ui::pane_areas;
/// let [left, right] = pane_areas(Rect::new(0, 0, 100, 30), true);
/// assert_eq!(left.width, right.width);
/// assert_eq!(left.height, 27);
/// ```
#[must_use]
pub fn pane_areas(area: Rect, show_status: bool) -> [Rect; 2] {
    let [left, right] = outer_pane_areas(area, show_status);
    [pane_block().inner(left), pane_block().inner(right)]
}

fn outer_pane_areas(area: Rect, show_status: bool) -> [Rect; 2] {
    let status_h = u16::from(show_status);
    let [panes, _] = Layout::vertical([Constraint::Min(3), Constraint::Length(status_h)]).areas(area);
    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(panes)
}

fn pane_block() -> Block<'static> {
    Block::bordered().border_style(Style::default().fg(Color::DarkGray))
}

/// Draw the full UI: two panes side by side + status line.
pub fn draw(frame: &mut Frame, view: &CarouselView) {
    let area = frame.area();
    let outer = outer_pane_areas(area, view.show_status);
    let transforms = view.carousel.panes();

    for ((rect, state), transform) in outer.iter().zip(view.panes.iter()).zip(transforms) {
        let block = pane_block().title(Span::styled(
            format!(" {} ", transform.label()),
            Style::default().fg(Color::Cyan),
        ));
        let inner = block.inner(*rect);
        frame.render_widget(block, *rect);
        draw_pane(frame, inner, state);
    }

    if view.show_status {
        let status_area = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
        draw_status(frame, status_area, view);
    }
}

fn draw_pane(frame: &mut Frame, area: Rect, state: &PaneState) {
    match state {
        PaneState::Ready(raster) => canvas::render_raster(frame.buffer_mut(), area, raster),
        PaneState::Loading => {
            let msg = Paragraph::new("Loading...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(msg, centered_line(area));
        }
        PaneState::Failed(err) => {
            let msg = Paragraph::new(err.as_str())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::Red));
            frame.render_widget(msg, centered_line(area));
        }
    }
}

fn centered_line(area: Rect) -> Rect {
    let y = area.y + area.height / 2;
    Rect::new(area.x, y, area.width, area.bottom().saturating_sub(y).min(3))
}

fn draw_status(frame: &mut Frame, area: Rect, view: &CarouselView) {
    let (idx, count) = view.image_position;
    let name = view.image_name.unwrap_or("—");
    let key = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", view.carousel.label()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(format!("  {name} ({}/{count})  ", idx + 1)),
        Span::styled("n", key),
        Span::raw(" next  "),
        Span::styled("p", key),
        Span::raw(" prev  "),
        Span::styled("Tab", key),
        Span::raw(" image  "),
        Span::styled("q", key),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
