//! GUI module for the application.
//!
//! Provides a graphical interface using egui/eframe for user interaction.

pub mod render;
pub mod state;

use std::sync::mpsc::{self, TryRecvError};
use std::time::Duration;

use eframe::egui::{self, Vec2};

use crate::automation::{get_config, ColorApplier, SendInputApplier};
use crate::calibration::{global_confirm_keys, ConfirmKeys, CursorPointer};
use crate::palette::{CatalogSource, FavoritesStore, RemoteCatalog};
use crate::session::ApplicationSession;
use crate::storage::KeyValueFile;

use render::FavoriteAction;
use state::{Controls, GuiState};

/// Main GUI application struct.
pub struct GuiApp {
    session: ApplicationSession,
    /// Application state.
    state: GuiState,
    store: KeyValueFile,
    applier: SendInputApplier,
}

impl GuiApp {
    /// Create a new GUI application instance.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let config = get_config();
        let store = KeyValueFile::new(crate::paths::get_store_path());
        crate::log(&format!("Using store at {}", store.path().display()));

        let favorites = FavoritesStore::load(Box::new(store.clone()));
        let mut session = ApplicationSession::new(favorites, config.hue_direction);
        session.restore_calibration(&store);

        let mut app = Self {
            session,
            state: GuiState::default(),
            store,
            applier: SendInputApplier::new(config.clone()),
        };
        app.spawn_catalog_load();
        app
    }

    /// Loads the palette catalog on a worker thread.
    fn spawn_catalog_load(&mut self) {
        let catalog = RemoteCatalog::new(
            get_config().catalog_url.clone(),
            crate::paths::get_catalog_cache_path(),
        );
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let _ = tx.send(catalog.load_catalog());
        });
        self.state.catalog_rx = Some(rx);
    }

    /// Collect results from worker threads.
    fn poll_background(&mut self) {
        if let Some(rx) = &self.state.catalog_rx {
            match rx.try_recv() {
                Ok(result) => {
                    let _ = self.session.set_catalog(result);
                    self.state.catalog_rx = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    let _ = self
                        .session
                        .set_catalog(Err(anyhow::anyhow!("catalog loader stopped")));
                    self.state.catalog_rx = None;
                }
            }
        }

        if let Some(rx) = &self.state.apply_rx {
            match rx.try_recv() {
                Ok((pending, result)) => {
                    let _ = self.session.finish_apply(pending, result);
                    self.state.apply_rx = None;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    crate::log("GUI: apply worker exited without reporting");
                    self.state.apply_rx = None;
                }
            }
        }
    }

    /// Feed Enter/Escape to a running calibration.
    fn poll_calibration_keys(&mut self, ctx: &egui::Context) {
        if !self.session.is_calibrating() {
            return;
        }

        let held = global_confirm_keys().unwrap_or_else(|| {
            ctx.input(|i| ConfirmKeys {
                confirm: i.key_down(egui::Key::Enter),
                cancel: i.key_down(egui::Key::Escape),
            })
        });
        let pressed = self.state.key_edges.update(held);

        if pressed.cancel {
            self.session.cancel_calibration();
        } else if pressed.confirm {
            let _ = self
                .session
                .confirm_calibration_step(&CursorPointer, &self.store);
        }
    }

    /// Handle calibrate button click.
    fn handle_calibrate(&mut self) {
        // A key already held when the run starts must not count as a press
        self.state
            .key_edges
            .update(global_confirm_keys().unwrap_or_default());
        self.session.start_calibration();
        crate::log("GUI: Calibration started");
    }

    /// Handle a swatch click: claim the apply and run the clicks on a worker thread.
    fn handle_apply(&mut self, index: usize) {
        let Ok(pending) = self.session.begin_apply(index) else {
            return;
        };

        let applier = self.applier.clone();
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let result = applier.apply_color(&pending.request);
            let _ = tx.send((pending, result));
        });
        self.state.apply_rx = Some(rx);
    }

    fn handle_favorite_action(&mut self, action: FavoriteAction) {
        let _ = match action {
            FavoriteAction::Select(index) => self.session.select_favorite(index),
            FavoriteAction::Remove(index) => self.session.remove_favorite_at(index),
        };
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background();
        self.poll_calibration_keys(ctx);

        // Keep polling while the window may not receive input events
        if self.session.is_calibrating() {
            ctx.request_repaint_after(Duration::from_millis(30));
        } else if self.state.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let controls = Controls::from_session(&self.session, &self.state);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            render::render_status(ui, self.session.status(), self.session.calibration_step());
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Wheel Palette");
            ui.add_space(8.0);

            let action = render::render_toolbar(ui, &controls, self.state.show_favorites);
            if action.generate {
                let _ = self.session.next_palette();
            }
            if action.calibrate {
                self.handle_calibrate();
            }
            if action.toggle_favorites {
                self.state.show_favorites = !self.state.show_favorites;
            }

            ui.add_space(16.0);
            ui.separator();
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                let session = &self.session;
                let (clicked, star_clicked) = render::render_palette(
                    ui,
                    session.active_palette(),
                    |i| session.is_applied(i),
                    session.is_active_favorite(),
                    &controls,
                );

                if let Some(index) = clicked {
                    self.handle_apply(index);
                }
                if star_clicked {
                    let _ = self.session.toggle_favorite();
                }

                if self.state.show_favorites {
                    if let Some(action) = render::render_favorites(ui, self.session.favorites().list()) {
                        self.handle_favorite_action(action);
                    }
                }
            });
        });
    }
}

/// Run the GUI application.
/// This function blocks until the window is closed.
pub fn run_gui() -> eframe::Result<()> {
    crate::log("GUI: Creating native options...");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(Vec2::new(620.0, 520.0))
            .with_min_inner_size(Vec2::new(560.0, 360.0))
            .with_title("Wheel Palette")
            .with_always_on_top(),
        ..Default::default()
    };

    eframe::run_native(
        "Wheel Palette",
        options,
        Box::new(|cc| {
            crate::log("GUI: Creating GuiApp instance...");
            Ok(Box::new(GuiApp::new(cc)))
        }),
    )
}
