//! Application session: the active calibration, the active palette and which of
//! its colors have been applied.
//!
//! Every public operation records a human-readable status line, including on failure.

use std::collections::BTreeSet;

use crate::automation::input::{ApplyRequest, ColorApplier};
use crate::calibration::{CalibrationModel, CalibrationStep, CalibrationWizard, PointerSource, WizardEvent};
use crate::color::{hsv_to_screen_point_with, HueDirection};
use crate::error::{AppError, AppResult};
use crate::log;
use crate::palette::{CatalogSource, FavoritesStore, Palette, PaletteCycler, PALETTE_SIZE};
use crate::storage::CalibrationStore;

/// An apply claimed by [`ApplicationSession::begin_apply`] and not yet finished.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingApply {
    pub index: usize,
    pub request: ApplyRequest,
    generation: u64,
}

#[derive(Debug)]
pub struct ApplicationSession {
    calibration: Option<CalibrationModel>,
    calibration_run: Option<CalibrationWizard>,
    active: Option<Palette>,
    applied: BTreeSet<usize>,
    /// Bumped on every palette selection so late apply results can be recognized.
    generation: u64,
    apply_in_flight: bool,
    catalog: Vec<Palette>,
    cycler: PaletteCycler,
    favorites: FavoritesStore,
    hue_direction: HueDirection,
    status: String,
}

impl ApplicationSession {
    pub fn new(favorites: FavoritesStore, hue_direction: HueDirection) -> Self {
        Self {
            calibration: None,
            calibration_run: None,
            active: None,
            applied: BTreeSet::new(),
            generation: 0,
            apply_in_flight: false,
            catalog: Vec::new(),
            cycler: PaletteCycler::new(),
            favorites,
            hue_direction,
            status: "Loading palettes...".to_string(),
        }
    }

    /// Replaces the cycler, e.g. with a seeded one.
    pub fn with_cycler(mut self, cycler: PaletteCycler) -> Self {
        self.cycler = cycler;
        self
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn calibration(&self) -> Option<&CalibrationModel> {
        self.calibration.as_ref()
    }

    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_some()
    }

    pub fn active_palette(&self) -> Option<&Palette> {
        self.active.as_ref()
    }

    pub fn is_applied(&self, index: usize) -> bool {
        self.applied.contains(&index)
    }

    pub fn applied_count(&self) -> usize {
        self.applied.len()
    }

    pub fn is_apply_in_flight(&self) -> bool {
        self.apply_in_flight
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn is_active_favorite(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|p| self.favorites.contains(&p.name))
    }

    fn fail<T>(&mut self, err: AppError) -> AppResult<T> {
        self.status = format!("Error: {}", err);
        log(&self.status);
        Err(err)
    }

    // ---- Catalog and palette selection ----

    /// Replaces the catalog. On failure the catalog is left empty.
    pub fn load_catalog(&mut self, source: &dyn CatalogSource) -> AppResult<usize> {
        let result = source.load_catalog();
        self.set_catalog(result)
    }

    /// Installs a catalog loaded elsewhere (e.g. on a background thread).
    pub fn set_catalog(&mut self, result: anyhow::Result<Vec<Palette>>) -> AppResult<usize> {
        self.cycler.reset();
        match result {
            Ok(palettes) => {
                self.catalog = palettes;
                self.status = if self.is_calibrated() {
                    "Ready to generate palettes".to_string()
                } else {
                    "Ready to calibrate".to_string()
                };
                log(&format!("Catalog loaded: {} palettes", self.catalog.len()));
                Ok(self.catalog.len())
            }
            Err(e) => {
                self.catalog.clear();
                self.fail(AppError::CatalogUnavailable(format!("{:#}", e)))
            }
        }
    }

    /// Makes `palette` active and forgets which colors were applied, even when the
    /// same palette is selected again.
    pub fn select_palette(&mut self, palette: Palette) {
        self.status = format!("Selected {}", palette.name);
        self.active = Some(palette);
        self.applied.clear();
        self.generation += 1;
    }

    /// Selects a random catalog palette not yet shown in the current cycle.
    pub fn next_palette(&mut self) -> AppResult<&Palette> {
        let index = match self.cycler.next(self.catalog.len()) {
            Ok(index) => index,
            Err(e) => return self.fail(e),
        };
        let palette = self.catalog[index].clone();
        self.select_palette(palette);
        self.status = format!(
            "Palette {}/{}",
            self.cycler.shown_count(),
            self.catalog.len()
        );
        self.active.as_ref().ok_or(AppError::NoActivePalette)
    }

    // ---- Calibration ----

    /// Loads the previously persisted calibration, if any.
    pub fn restore_calibration(&mut self, store: &dyn CalibrationStore) {
        match store.load_calibration() {
            Ok(Some(model)) => match model.validate() {
                Ok(()) => {
                    log(&format!("Restored calibration: {:?}", model));
                    self.calibration = Some(model);
                }
                Err(e) => log(&format!("Ignoring stored calibration: {}", e)),
            },
            Ok(None) => log("No stored calibration"),
            Err(e) => log(&format!("Failed to load calibration: {:#}", e)),
        }
    }

    /// Validates and persists `model`, then makes it active.
    ///
    /// On any failure the previously active model stays in place.
    pub fn install_calibration(
        &mut self,
        model: CalibrationModel,
        store: &dyn CalibrationStore,
    ) -> AppResult<()> {
        if let Err(e) = model.validate() {
            return self.fail(e);
        }
        if let Err(e) = store.persist_calibration(&model) {
            return self.fail(AppError::persistence(&e));
        }
        self.calibration = Some(model);
        self.status = "Calibration complete! Ready to generate palettes".to_string();
        log(&format!("Calibration saved: {:?}", model));
        Ok(())
    }

    pub fn is_calibrating(&self) -> bool {
        self.calibration_run.is_some()
    }

    pub fn calibration_step(&self) -> Option<CalibrationStep> {
        self.calibration_run.as_ref().map(|w| w.step())
    }

    /// Starts a calibration run. Does nothing if one is already in progress.
    pub fn start_calibration(&mut self) {
        if self.calibration_run.is_some() {
            log("Calibration already in progress.");
            return;
        }
        let wizard = CalibrationWizard::new();
        self.status = wizard.status_text();
        self.calibration_run = Some(wizard);
    }

    /// Feeds one confirmation event to the running calibration.
    ///
    /// Returns `Ok(true)` when this event finished the run and the new model is
    /// active. Events without a run in progress are ignored.
    pub fn confirm_calibration_step(
        &mut self,
        pointer: &dyn PointerSource,
        store: &dyn CalibrationStore,
    ) -> AppResult<bool> {
        let Some(wizard) = self.calibration_run.as_mut() else {
            return Ok(false);
        };

        match wizard.confirm(pointer) {
            WizardEvent::Ignored => Ok(false),
            WizardEvent::Advanced(_) => {
                self.status = wizard.status_text();
                Ok(false)
            }
            WizardEvent::Completed(model) => {
                let degraded = !wizard.degraded_steps().is_empty();
                self.calibration_run = None;
                self.install_calibration(model, store)?;
                if degraded {
                    self.status
                        .push_str(" (some points could not be read and were set to 0,0)");
                }
                Ok(true)
            }
        }
    }

    /// Cancels the running calibration; the saved calibration is untouched.
    pub fn cancel_calibration(&mut self) {
        if let Some(mut wizard) = self.calibration_run.take() {
            wizard.abort();
            self.status = wizard.status_text();
        }
    }

    // ---- Applying colors ----

    /// Validates an apply of color `index` and claims the session for it.
    pub fn begin_apply(&mut self, index: usize) -> AppResult<PendingApply> {
        let Some(model) = self.calibration else {
            return self.fail(AppError::NotCalibrated);
        };
        let Some(palette) = self.active.as_ref() else {
            return self.fail(AppError::NoActivePalette);
        };
        let Some(color) = palette.color(index) else {
            return self.fail(AppError::IndexOutOfRange {
                index,
                len: PALETTE_SIZE,
            });
        };
        if !color.is_normalized() {
            return self.fail(AppError::ApplyFailed(
                "Invalid HSV values. Must be between 0 and 1".to_string(),
            ));
        }
        if self.apply_in_flight {
            return self.fail(AppError::ApplyInProgress);
        }

        let request = ApplyRequest {
            color,
            target: hsv_to_screen_point_with(color, &model, self.hue_direction),
            slider_grab: (model.brightness_x_end, model.brightness_y),
        };
        self.apply_in_flight = true;
        self.status = format!("Applying Color {}...", index + 1);

        Ok(PendingApply {
            index,
            request,
            generation: self.generation,
        })
    }

    /// Records the outcome of a claimed apply and returns the applied count.
    ///
    /// A success for a palette that has since been replaced marks nothing.
    pub fn finish_apply(
        &mut self,
        pending: PendingApply,
        result: anyhow::Result<()>,
    ) -> AppResult<usize> {
        self.apply_in_flight = false;

        if let Err(e) = result {
            return self.fail(AppError::ApplyFailed(format!("{:#}", e)));
        }

        if pending.generation != self.generation {
            log("Apply finished after the palette changed; not marking it.");
            return Ok(self.applied.len());
        }

        self.applied.insert(pending.index);
        let count = self.applied.len();
        self.status = if count >= PALETTE_SIZE {
            "All colors applied! You can generate a new palette or re-apply colors".to_string()
        } else {
            format!(
                "Color {} applied successfully! ({}/{})",
                pending.index + 1,
                count,
                PALETTE_SIZE
            )
        };
        Ok(count)
    }

    /// Applies color `index` of the active palette through `applier`, blocking until done.
    pub fn apply_color(&mut self, index: usize, applier: &dyn ColorApplier) -> AppResult<usize> {
        let pending = self.begin_apply(index)?;
        let result = applier.apply_color(&pending.request);
        self.finish_apply(pending, result)
    }

    // ---- Favorites ----

    /// Saves the active palette as a favorite, or removes it if a favorite with the
    /// same name exists. Returns whether the palette is a favorite afterwards.
    pub fn toggle_favorite(&mut self) -> AppResult<bool> {
        let Some(palette) = self.active.clone() else {
            return self.fail(AppError::NoActivePalette);
        };

        let result = if self.favorites.contains(&palette.name) {
            self.favorites.remove(&palette.name).map(|_| false)
        } else {
            self.favorites.add(palette.clone()).map(|_| true)
        };

        match result {
            Ok(is_favorite) => {
                log(&format!(
                    "Favorite {}: {}",
                    if is_favorite { "added" } else { "removed" },
                    palette.name
                ));
                self.status = if is_favorite {
                    "Added to favorites".to_string()
                } else {
                    "Removed from favorites".to_string()
                };
                Ok(is_favorite)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Makes the favorite at `index` the active palette.
    pub fn select_favorite(&mut self, index: usize) -> AppResult<()> {
        let Some(palette) = self.favorites.list().get(index).cloned() else {
            let len = self.favorites.len();
            return self.fail(AppError::IndexOutOfRange { index, len });
        };
        self.select_palette(palette);
        Ok(())
    }

    /// Deletes the favorite at `index`.
    pub fn remove_favorite_at(&mut self, index: usize) -> AppResult<()> {
        match self.favorites.remove_at(index) {
            Ok(palette) => {
                self.status = format!("Removed {} from favorites", palette.name);
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hsv_to_screen_point;
    use crate::palette::ColorTriple;
    use crate::storage::FavoritesBackend;
    use anyhow::{anyhow, Result};
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct MemoryFavorites {
        fail: Rc<Cell<bool>>,
    }

    impl FavoritesBackend for MemoryFavorites {
        fn save(&self, _favorites: &[Palette]) -> Result<()> {
            if self.fail.get() {
                return Err(anyhow!("storage offline"));
            }
            Ok(())
        }

        fn load(&self) -> Result<Vec<Palette>> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct MemoryCalibration {
        saved: RefCell<Option<CalibrationModel>>,
        fail: bool,
    }

    impl CalibrationStore for MemoryCalibration {
        fn persist_calibration(&self, model: &CalibrationModel) -> Result<()> {
            if self.fail {
                return Err(anyhow!("read-only"));
            }
            *self.saved.borrow_mut() = Some(*model);
            Ok(())
        }

        fn load_calibration(&self) -> Result<Option<CalibrationModel>> {
            Ok(*self.saved.borrow())
        }
    }

    struct ScriptedPointer(RefCell<VecDeque<(i32, i32)>>);

    impl ScriptedPointer {
        fn new(points: &[(i32, i32)]) -> Self {
            Self(RefCell::new(points.iter().copied().collect()))
        }
    }

    impl PointerSource for ScriptedPointer {
        fn pointer_position(&self) -> Result<(i32, i32)> {
            self.0
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| anyhow!("no pointer"))
        }
    }

    #[derive(Default)]
    struct RecordingApplier {
        calls: RefCell<Vec<ApplyRequest>>,
        fail: bool,
    }

    impl ColorApplier for RecordingApplier {
        fn apply_color(&self, request: &ApplyRequest) -> Result<()> {
            self.calls.borrow_mut().push(*request);
            if self.fail {
                return Err(anyhow!("window not found"));
            }
            Ok(())
        }
    }

    struct FixedCatalog(Option<Vec<Palette>>);

    impl CatalogSource for FixedCatalog {
        fn load_catalog(&self) -> Result<Vec<Palette>> {
            self.0.clone().ok_or_else(|| anyhow!("offline"))
        }
    }

    fn palette(name: &str, hue: f64) -> Palette {
        Palette::new(
            name,
            [
                ColorTriple::new(hue, 1.0, 1.0),
                ColorTriple::new(hue, 0.5, 0.5),
                ColorTriple::new(hue, 0.0, 1.0),
                ColorTriple::new(hue, 1.0, 0.0),
                ColorTriple::new(hue, 0.25, 0.75),
            ],
        )
    }

    fn model() -> CalibrationModel {
        CalibrationModel {
            center_x: 0,
            center_y: 0,
            radius: 10,
            brightness_x_start: 0,
            brightness_x_end: 10,
            brightness_y: 0,
        }
    }

    fn session() -> ApplicationSession {
        ApplicationSession::new(
            FavoritesStore::load(Box::new(MemoryFavorites::default())),
            HueDirection::Clockwise,
        )
        .with_cycler(PaletteCycler::with_seed(11))
    }

    fn calibrated_session() -> ApplicationSession {
        let mut s = session();
        s.install_calibration(model(), &MemoryCalibration::default())
            .unwrap();
        s
    }

    #[test]
    fn test_not_calibrated_regardless_of_palette() {
        let applier = RecordingApplier::default();
        let mut s = session();
        assert_eq!(s.apply_color(0, &applier), Err(AppError::NotCalibrated));

        s.select_palette(palette("p", 0.0));
        assert_eq!(s.apply_color(0, &applier), Err(AppError::NotCalibrated));
        assert!(applier.calls.borrow().is_empty());
        assert!(s.status().starts_with("Error: not calibrated"));
    }

    #[test]
    fn test_no_active_palette() {
        let mut s = calibrated_session();
        assert_eq!(
            s.apply_color(0, &RecordingApplier::default()),
            Err(AppError::NoActivePalette)
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let mut s = calibrated_session();
        s.select_palette(palette("p", 0.0));
        assert_eq!(
            s.apply_color(5, &RecordingApplier::default()),
            Err(AppError::IndexOutOfRange { index: 5, len: 5 })
        );
    }

    #[test]
    fn test_reselect_resets_applied() {
        let applier = RecordingApplier::default();
        let mut s = calibrated_session();
        let p = palette("p", 0.0);
        s.select_palette(p.clone());

        assert_eq!(s.apply_color(0, &applier), Ok(1));
        assert_eq!(s.apply_color(0, &applier), Ok(1));
        assert_eq!(s.apply_color(3, &applier), Ok(2));

        s.select_palette(p);
        assert_eq!(s.applied_count(), 0);
        assert!(!s.is_applied(0));
    }

    #[test]
    fn test_apply_failure_marks_nothing() {
        let applier = RecordingApplier {
            fail: true,
            ..Default::default()
        };
        let mut s = calibrated_session();
        s.select_palette(palette("p", 0.0));

        let err = s.apply_color(2, &applier).unwrap_err();
        assert_eq!(err, AppError::ApplyFailed("window not found".to_string()));
        assert_eq!(s.applied_count(), 0);
        assert!(!s.is_apply_in_flight());
    }

    #[test]
    fn test_out_of_range_color_is_never_clicked() {
        let applier = RecordingApplier::default();
        let mut s = calibrated_session();
        let mut wild = palette("wild", 0.0);
        wild.colors[0] = ColorTriple::new(0.0, 3.0, 2.5);
        wild.colors[1] = ColorTriple::new(-0.1, 0.5, 0.5);
        s.select_palette(wild);

        for index in [0, 1] {
            assert_eq!(
                s.apply_color(index, &applier),
                Err(AppError::ApplyFailed(
                    "Invalid HSV values. Must be between 0 and 1".to_string()
                ))
            );
        }
        assert!(applier.calls.borrow().is_empty());
        assert_eq!(s.applied_count(), 0);
        assert!(!s.is_apply_in_flight());

        // In-range colors of the same palette still apply.
        assert_eq!(s.apply_color(2, &applier), Ok(1));
    }

    #[test]
    fn test_calibration_step_tracks_run() {
        let store = MemoryCalibration::default();
        let pointer = ScriptedPointer::new(&[(0, 0)]);
        let mut s = session();
        assert_eq!(s.calibration_step(), None);

        s.start_calibration();
        assert_eq!(s.calibration_step(), Some(CalibrationStep::AwaitCenter));
        s.confirm_calibration_step(&pointer, &store).unwrap();
        assert_eq!(s.calibration_step(), Some(CalibrationStep::AwaitEdge));

        s.cancel_calibration();
        assert_eq!(s.calibration_step(), None);
    }

    #[test]
    fn test_overlapping_apply_rejected() {
        let mut s = calibrated_session();
        s.select_palette(palette("p", 0.0));

        let pending = s.begin_apply(0).unwrap();
        assert_eq!(s.begin_apply(1), Err(AppError::ApplyInProgress));

        assert_eq!(s.finish_apply(pending, Ok(())), Ok(1));
        assert!(s.begin_apply(1).is_ok());
    }

    #[test]
    fn test_late_apply_after_palette_change_is_not_marked() {
        let mut s = calibrated_session();
        s.select_palette(palette("a", 0.0));
        let pending = s.begin_apply(0).unwrap();

        s.select_palette(palette("b", 0.5));
        assert_eq!(s.finish_apply(pending, Ok(())), Ok(0));
        assert!(!s.is_applied(0));
    }

    #[test]
    fn test_all_colors_applied_status() {
        let applier = RecordingApplier::default();
        let mut s = calibrated_session();
        s.select_palette(palette("p", 0.0));
        for i in 0..PALETTE_SIZE {
            s.apply_color(i, &applier).unwrap();
        }
        assert!(s.status().starts_with("All colors applied!"));
    }

    #[test]
    fn test_catalog_unavailable_leaves_catalog_empty() {
        let mut s = session();
        s.load_catalog(&FixedCatalog(Some(vec![palette("a", 0.0)])))
            .unwrap();
        assert_eq!(s.catalog_len(), 1);

        let err = s.load_catalog(&FixedCatalog(None)).unwrap_err();
        assert_eq!(err, AppError::CatalogUnavailable("offline".to_string()));
        assert_eq!(s.catalog_len(), 0);
        assert_eq!(s.next_palette().unwrap_err(), AppError::EmptyCatalog);
    }

    #[test]
    fn test_next_palette_cycles_catalog() {
        let mut s = session();
        s.load_catalog(&FixedCatalog(Some(vec![
            palette("a", 0.0),
            palette("b", 0.3),
            palette("c", 0.6),
        ])))
        .unwrap();

        let mut names: Vec<String> = (0..3)
            .map(|_| s.next_palette().unwrap().name.clone())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(s.status(), "Palette 3/3");
    }

    #[test]
    fn test_invalid_calibration_keeps_previous() {
        let store = MemoryCalibration::default();
        let mut s = calibrated_session();

        let flat = CalibrationModel {
            radius: 0,
            ..model()
        };
        assert_eq!(
            s.install_calibration(flat, &store),
            Err(AppError::InvalidGeometry { radius: 0 })
        );
        assert_eq!(s.calibration(), Some(&model()));
        assert_eq!(*store.saved.borrow(), None);
    }

    #[test]
    fn test_persist_failure_keeps_previous() {
        let store = MemoryCalibration {
            fail: true,
            ..Default::default()
        };
        let mut s = calibrated_session();
        let wider = CalibrationModel {
            radius: 99,
            ..model()
        };

        let err = s.install_calibration(wider, &store).unwrap_err();
        assert!(matches!(err, AppError::PersistenceError(_)));
        assert_eq!(s.calibration(), Some(&model()));
    }

    #[test]
    fn test_cancel_calibration_keeps_saved_model() {
        let store = MemoryCalibration::default();
        let pointer = ScriptedPointer::new(&[(5, 5), (50, 5)]);
        let mut s = calibrated_session();

        s.start_calibration();
        s.confirm_calibration_step(&pointer, &store).unwrap();
        s.confirm_calibration_step(&pointer, &store).unwrap();
        s.cancel_calibration();

        assert!(!s.is_calibrating());
        assert_eq!(s.calibration(), Some(&model()));
        assert_eq!(*store.saved.borrow(), None);
        assert_eq!(s.status(), "Calibration cancelled");
    }

    #[test]
    fn test_restore_calibration() {
        let store = MemoryCalibration::default();
        store.persist_calibration(&model()).unwrap();

        let mut s = session();
        s.restore_calibration(&store);
        assert_eq!(s.calibration(), Some(&model()));
    }

    #[test]
    fn test_toggle_favorite_by_name() {
        let mut s = session();
        assert_eq!(s.toggle_favorite(), Err(AppError::NoActivePalette));

        s.select_palette(palette("Palette 7", 0.1));
        assert_eq!(s.toggle_favorite(), Ok(true));
        assert!(s.is_active_favorite());

        // Same name, different colors: still counts as the same favorite.
        s.select_palette(palette("Palette 7", 0.9));
        assert_eq!(s.toggle_favorite(), Ok(false));
        assert!(s.favorites().is_empty());
    }

    #[test]
    fn test_toggle_favorite_persist_failure() {
        let backend = MemoryFavorites::default();
        let fail = backend.fail.clone();
        let mut s = ApplicationSession::new(
            FavoritesStore::load(Box::new(backend)),
            HueDirection::Clockwise,
        );
        s.select_palette(palette("p", 0.0));

        fail.set(true);
        assert!(matches!(
            s.toggle_favorite(),
            Err(AppError::PersistenceError(_))
        ));
        assert!(!s.is_active_favorite());
        assert!(s.status().starts_with("Error: failed to persist"));
    }

    #[test]
    fn test_select_and_remove_favorite() {
        let mut s = session();
        s.select_palette(palette("fav", 0.2));
        s.toggle_favorite().unwrap();
        s.select_palette(palette("other", 0.4));

        s.select_favorite(0).unwrap();
        assert_eq!(s.active_palette().map(|p| p.name.as_str()), Some("fav"));

        s.remove_favorite_at(0).unwrap();
        assert!(s.favorites().is_empty());
        assert!(s.select_favorite(0).is_err());
    }

    #[test]
    fn test_end_to_end() {
        let store = MemoryCalibration::default();
        let applier = RecordingApplier::default();
        let pointer = ScriptedPointer::new(&[(0, 0), (10, 0), (0, 0), (10, 0)]);
        let catalog = vec![palette("first", 0.25), palette("second", 0.75)];

        let mut s = session();
        s.load_catalog(&FixedCatalog(Some(catalog.clone())))
            .unwrap();

        s.start_calibration();
        let mut finished = false;
        for _ in 0..4 {
            finished = s.confirm_calibration_step(&pointer, &store).unwrap();
        }
        assert!(finished);
        assert_eq!(s.calibration(), Some(&model()));
        assert_eq!(*store.saved.borrow(), Some(model()));

        s.select_palette(catalog[0].clone());
        assert_eq!(s.apply_color(0, &applier), Ok(1));

        let calls = applier.calls.borrow();
        assert_eq!(calls.len(), 1);
        let expected = hsv_to_screen_point(catalog[0].colors[0], &model());
        assert_eq!(calls[0].target, expected);
        // h = 0.25, s = 1 on a radius-10 wheel at the origin; v = 1 at the bar end.
        assert_eq!(expected.wheel, (0, 10));
        assert_eq!(expected.brightness, (10, 0));
        assert_eq!(calls[0].slider_grab, (10, 0));
    }
}
