use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use ratatui::layout::Rect;
use ts_core::{Carousel, DecodedFrame, RasterBuffer, Transform, ViewerConfig};
use ts_render::{CarouselView, PaneState};
use ts_source::resize::Resizer;

use crate::loader::{self, LoadResult};

/// Application state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppState {
    /// L'application est en cours d'exécution normale.
    Running,
    /// Fermeture de l'application. Doit se terminer au prochain tour de boucle.
    Quitting,
}

/// Main application struct holding all state.
pub struct App {
    /// Current application state.
    pub state: AppState,
    /// Config chargée au démarrage.
    pub config: ViewerConfig,
    /// Étape courante du carrousel.
    pub carousel: Carousel,
    /// Images passées en ligne de commande.
    pub images: Vec<PathBuf>,
    /// Index de l'image affichée.
    pub current: usize,
    /// Première page décodée de l'image courante (None pendant le chargement).
    pub frame: Option<Arc<DecodedFrame>>,
    /// Gauche, droite.
    pub panes: [PaneState; 2],
    /// Un resizer par panneau, pour les rendre en parallèle.
    resizers: [Resizer; 2],
    load_tx: flume::Sender<LoadResult>,
    load_rx: flume::Receiver<LoadResult>,
    /// Flag : l'utilisateur a changé d'image, relancer un décodage.
    load_requested: bool,
    /// Flag : étape, frame ou taille changée, re-rendre les panneaux.
    panes_dirty: bool,
    /// Dernière taille de terminal connue (pour détecter les resize).
    last_area: Rect,
}

impl App {
    /// Create a new App instance. Nothing is decoded until `run`.
    #[must_use]
    pub fn new(config: ViewerConfig, images: Vec<PathBuf>) -> Self {
        let (load_tx, load_rx) = flume::unbounded();
        Self {
            state: AppState::Running,
            carousel: Carousel::new(config.initial_step),
            resizers: [
                Resizer::new(config.resize_filter),
                Resizer::new(config.resize_filter),
            ],
            config,
            images,
            current: 0,
            frame: None,
            panes: [PaneState::Loading, PaneState::Loading],
            load_tx,
            load_rx,
            load_requested: true,
            panes_dirty: true,
            last_area: Rect::default(),
        }
    }

    /// Boucle principale : événements, chargements, rendu.
    ///
    /// # Errors
    /// Returns an error on terminal I/O failure or if the loader thread
    /// cannot be spawned. Decode and transform errors are shown in the panes.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut last_frame = Instant::now();

        loop {
            // === Sortie si quitting ===
            if self.state == AppState::Quitting {
                break;
            }

            let frame_duration = Duration::from_secs_f64(1.0 / f64::from(self.config.target_fps));
            let elapsed = last_frame.elapsed();
            if elapsed < frame_duration {
                // Dormir le temps restant, mais rester réactif aux événements
                if event::poll(frame_duration.saturating_sub(elapsed))? {
                    self.handle_event(&event::read()?);
                }
                continue;
            }
            last_frame = Instant::now();

            // === Polling événements non-bloquant ===
            while event::poll(Duration::ZERO)? {
                self.handle_event(&event::read()?);
            }

            if self.load_requested {
                self.load_requested = false;
                self.request_load()?;
            }
            self.receive_loads();

            // === Vérifier resize terminal ===
            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);
            if area != self.last_area {
                self.last_area = area;
                self.panes_dirty = true;
            }

            if self.panes_dirty {
                self.render_panes(area);
            }

            let view = CarouselView {
                carousel: &self.carousel,
                panes: &self.panes,
                image_name: self.image_name(),
                image_position: (self.current, self.images.len()),
                show_status: self.config.show_status,
            };
            terminal.draw(|f| ts_render::draw(f, &view))?;
        }

        Ok(())
    }

    /// Nom de fichier de l'image courante.
    #[must_use]
    pub fn image_name(&self) -> Option<&str> {
        self.images
            .get(self.current)
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
    }

    /// Lance le décodage de l'image courante sur un thread.
    fn request_load(&mut self) -> Result<()> {
        let Some(path) = self.images.get(self.current) else {
            return Ok(());
        };
        log::info!("Chargement de {}", path.display());
        self.frame = None;
        self.panes = [PaneState::Loading, PaneState::Loading];
        loader::spawn_loader(path.clone(), self.current, self.load_tx.clone())
    }

    /// Récupère les décodages terminés. Results for an image the user has
    /// already left are dropped.
    fn receive_loads(&mut self) {
        while let Ok(result) = self.load_rx.try_recv() {
            if result.index != self.current {
                log::debug!("Décodage obsolète ignoré (image {})", result.index);
                continue;
            }
            match result.frame {
                Ok(frame) => {
                    self.frame = Some(frame);
                    self.panes_dirty = true;
                }
                Err(e) => {
                    self.frame = None;
                    let msg = e.to_string();
                    self.panes = [PaneState::Failed(msg.clone()), PaneState::Failed(msg)];
                }
            }
        }
    }

    /// Rend les deux panneaux de l'étape courante en parallèle.
    fn render_panes(&mut self, area: Rect) {
        let Some(frame) = self.frame.as_deref() else {
            return;
        };
        let [left_area, right_area] = ts_render::pane_areas(area, self.config.show_status);
        let [left_t, right_t] = self.carousel.panes();
        let [left_r, right_r] = &mut self.resizers;

        let (left, right) = rayon::join(
            || render_pane(frame, left_t, ts_render::pane_pixel_size(left_area), left_r),
            || render_pane(frame, right_t, ts_render::pane_pixel_size(right_area), right_r),
        );
        self.panes = [left, right];
        self.panes_dirty = false;
    }

    fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            self.handle_key(*key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.state = AppState::Quitting,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state = AppState::Quitting;
            }
            KeyCode::Char('n' | ' ') | KeyCode::Right => {
                self.carousel.next();
                self.panes_dirty = true;
            }
            KeyCode::Char('p') | KeyCode::Left => {
                self.carousel.previous();
                self.panes_dirty = true;
            }
            KeyCode::Tab => self.select_image(1),
            KeyCode::BackTab => self.select_image(self.images.len().saturating_sub(1)),
            _ => {}
        }
    }

    /// Avance de `offset` images (modulo le nombre d'images).
    fn select_image(&mut self, offset: usize) {
        if self.images.len() < 2 {
            return;
        }
        self.current = (self.current + offset) % self.images.len();
        self.load_requested = true;
    }
}

/// Transforme puis ajuste une frame à la taille d'un panneau.
fn render_pane(
    frame: &DecodedFrame,
    transform: Transform,
    (max_w, max_h): (u32, u32),
    resizer: &mut Resizer,
) -> PaneState {
    let raster = match ts_filter::apply(frame, transform) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Erreur de rendu {transform} : {e}");
            return PaneState::Failed(e.to_string());
        }
    };
    let (w, h) = ts_render::fit_within(raster.width, raster.height, max_w, max_h);
    if w == 0 || h == 0 {
        return PaneState::Ready(RasterBuffer::new(0, 0));
    }
    match resizer.resize(&raster, w, h) {
        Ok(fitted) => PaneState::Ready(fitted),
        Err(e) => {
            log::error!("Erreur de resize {transform} : {e:#}");
            PaneState::Failed(format!("{e:#}"))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ts_core::PipelineError;

    #[test]
    fn new_app_is_running_and_waits_for_first_load() {
        let app = app_with(&["a.tif"]);
        assert_eq!(app.state, AppState::Running);
        assert!(app.load_requested);
        assert!(app.frame.is_none());
    }

    fn app_with(images: &[&str]) -> App {
        App::new(
            ViewerConfig::default(),
            images.iter().map(PathBuf::from).collect(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn keys_page_the_carousel() {
        let mut app = app_with(&["a.tif"]);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.carousel.step().get(), 2);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.carousel.step().get(), 4);
    }

    #[test]
    fn tab_cycles_images_and_requests_load() {
        let mut app = app_with(&["a.tif", "b.tif", "c.tif"]);
        app.load_requested = false;
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current, 1);
        assert!(app.load_requested);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.current, 2);
        assert_eq!(app.image_name(), Some("c.tif"));
    }

    #[test]
    fn tab_with_single_image_does_nothing() {
        let mut app = app_with(&["a.tif"]);
        app.load_requested = false;
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current, 0);
        assert!(!app.load_requested);
    }

    #[test]
    fn quit_keys() {
        let mut app = app_with(&["a.tif"]);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Quitting);

        let mut app = app_with(&["a.tif"]);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn stale_loads_are_ignored() {
        let mut app = app_with(&["a.tif", "b.tif"]);
        app.current = 1;
        app.load_tx
            .send(LoadResult {
                index: 0,
                frame: Ok(Arc::new(DecodedFrame::solid(2, 2, (0, 0, 0)))),
            })
            .unwrap();
        app.receive_loads();
        assert!(app.frame.is_none());
    }

    #[test]
    fn failed_load_shows_error_in_both_panes() {
        let mut app = app_with(&["a.tif"]);
        app.load_tx
            .send(LoadResult {
                index: 0,
                frame: Err(PipelineError::NoPagesFound),
            })
            .unwrap();
        app.receive_loads();
        for pane in &app.panes {
            assert!(matches!(pane, PaneState::Failed(msg) if msg.contains("Aucune page")));
        }
    }

    #[test]
    fn loaded_frame_renders_fitted_panes() {
        let mut app = app_with(&["a.tif"]);
        app.load_tx
            .send(LoadResult {
                index: 0,
                frame: Ok(Arc::new(DecodedFrame::solid(400, 200, (90, 60, 30)))),
            })
            .unwrap();
        app.receive_loads();
        app.render_panes(Rect::new(0, 0, 82, 31));

        let [left_area, _] = ts_render::pane_areas(Rect::new(0, 0, 82, 31), true);
        let (max_w, max_h) = ts_render::pane_pixel_size(left_area);
        for pane in &app.panes {
            let PaneState::Ready(raster) = pane else {
                panic!("pane not ready: {pane:?}");
            };
            assert!(raster.width <= max_w && raster.height <= max_h);
            assert!(raster.is_opaque());
        }
        assert!(!app.panes_dirty);
    }

    #[test]
    fn invalid_frame_fails_both_panes_without_panicking() {
        let mut app = app_with(&["a.tif"]);
        app.frame = Some(Arc::new(DecodedFrame::new(4, 4, vec![0; 10])));
        app.render_panes(Rect::new(0, 0, 80, 24));
        for pane in &app.panes {
            assert!(matches!(pane, PaneState::Failed(_)));
        }
    }
}
