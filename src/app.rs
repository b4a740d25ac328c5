//! Application controller
//!
//! `App` owns the in-memory catalog, the painted display state, the tick
//! scheduler and the import state. Every user action and every tick goes
//! through it, one at a time, so catalog, selection and display never
//! disagree for longer than a single handler.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::error::{CountdownError, Result};
use crate::export;
use crate::import::{self, ConversionRequest, Converter, ImportPipeline, ImportSource};
use crate::models::{ExamRecord, Selection};
use crate::renderer::{self, DisplayState, Notice, RenderSurface, TickOutcome};
use crate::scheduler::{SchedulerState, Tick, TimerScheduler};
use crate::selection::SelectionPrompt;
use crate::store::{ExamStore, KeyValueStore};

/// What start-up found in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Startup {
    /// Nothing imported yet
    NoSchedule,
    /// A schedule was imported but holds no exams
    EmptyCatalog,
    /// A schedule exists but the user never chose exams from it
    NeedsSelection(SelectionPrompt),
    /// Countdowns are painted and ticking
    Ready,
}

/// Result of a successful import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub source: ImportSource,
    pub count: usize,
    /// Checklist for the new schedule, to be shown right away
    pub prompt: SelectionPrompt,
}

pub struct App<S: KeyValueStore, R: RenderSurface> {
    store: ExamStore<S>,
    surface: R,
    catalog: Vec<ExamRecord>,
    display: DisplayState,
    scheduler: TimerScheduler,
    imports: ImportPipeline,
}

impl<S: KeyValueStore, R: RenderSurface> App<S, R> {
    pub fn new(store: ExamStore<S>, surface: R, tick_interval: Duration) -> Self {
        Self {
            store,
            surface,
            catalog: Vec::new(),
            display: DisplayState::default(),
            scheduler: TimerScheduler::new(tick_interval),
            imports: ImportPipeline::new(),
        }
    }

    pub fn catalog(&self) -> &[ExamRecord] {
        &self.catalog
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    #[cfg(test)]
    pub fn selection(&self) -> Result<Option<Selection>> {
        self.store.load_selection()
    }

    /// Load the stored schedule and bring the display up to date
    pub fn initialize(&mut self, now: DateTime<Local>) -> Result<Startup> {
        if !self.load()? {
            info!("no schedule stored");
            self.show_notice(Notice::NoSchedule);
            return Ok(Startup::NoSchedule);
        }

        if self.catalog.is_empty() {
            self.show_notice(Notice::EmptyCatalog);
            return Ok(Startup::EmptyCatalog);
        }

        match self.store.load_selection()? {
            None => Ok(Startup::NeedsSelection(SelectionPrompt::new(
                &self.catalog,
                None,
            ))),
            Some(_) => {
                self.render(now)?;
                self.start_timer(now)?;
                Ok(Startup::Ready)
            }
        }
    }

    /// Read the stored schedule into memory without painting anything.
    ///
    /// Returns false when no schedule has been imported.
    pub fn load(&mut self) -> Result<bool> {
        match self.store.load_catalog()? {
            Some(catalog) => {
                debug!(count = catalog.len(), "loaded schedule");
                self.catalog = catalog;
                Ok(true)
            }
            None => {
                self.catalog.clear();
                Ok(false)
            }
        }
    }

    /// Import a JSON file as the new schedule
    pub fn import_file(&mut self, path: &Path) -> Result<ImportOutcome> {
        self.imports.ensure_idle()?;
        let text = fs::read_to_string(path).map_err(|e| {
            CountdownError::Read(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        self.import_file_text(&text)
    }

    /// Import the text of a JSON file as the new schedule
    pub fn import_file_text(&mut self, text: &str) -> Result<ImportOutcome> {
        self.imports.ensure_idle()?;
        let exams = import::parse_file_text(text)?;
        self.commit_import(exams, ImportSource::File)
    }

    /// Import pasted text, tolerating code fences around the JSON
    pub fn import_pasted(&mut self, text: &str) -> Result<ImportOutcome> {
        self.imports.ensure_idle()?;
        let exams = import::parse_pasted(text)?;
        self.commit_import(exams, ImportSource::Paste)
    }

    /// Send a schedule document through `converter` and import the answer
    pub fn import_remote<C>(&mut self, converter: &C, path: &Path) -> Result<ImportOutcome>
    where
        C: Converter + ?Sized,
    {
        self.imports.ensure_idle()?;
        let mime = import::detect_mime(path)?;
        let bytes = fs::read(path).map_err(|e| {
            CountdownError::Read(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        let request = self.begin_remote_import(&bytes, mime)?;
        let response = converter.convert(&request);
        self.finish_remote_import(response)
    }

    /// First half of a remote import: build the request and mark the import busy
    pub fn begin_remote_import(&mut self, bytes: &[u8], mime: &str) -> Result<ConversionRequest> {
        self.imports.begin_remote(bytes, mime)
    }

    /// Second half of a remote import: validate and commit the service's answer
    pub fn finish_remote_import(&mut self, response: Result<String>) -> Result<ImportOutcome> {
        let exams = self.imports.finish_remote(response)?;
        self.commit_import(exams, ImportSource::Remote)
    }

    fn commit_import(&mut self, exams: Vec<ExamRecord>, source: ImportSource) -> Result<ImportOutcome> {
        // Only a persisted catalog replaces the one in memory
        let previous = self.store.catalog_snapshot()?;
        self.store.save_catalog(&exams)?;
        if let Err(e) = self.store.remove_selection() {
            warn!(error = %e, "could not drop the old selection, keeping the previous schedule");
            self.store.restore_catalog(previous.as_deref())?;
            return Err(e);
        }
        self.catalog = exams;
        self.scheduler.stop();

        info!(count = self.catalog.len(), %source, "imported schedule");
        Ok(ImportOutcome {
            source,
            count: self.catalog.len(),
            prompt: SelectionPrompt::new(&self.catalog, None),
        })
    }

    /// Checklist for the current schedule, pre-checked from the stored selection
    pub fn present_selection(&self) -> Result<SelectionPrompt> {
        let current = self.store.load_selection()?;
        Ok(SelectionPrompt::new(&self.catalog, current.as_ref()))
    }

    /// Persist the chosen exams, repaint, and restart the countdowns
    pub fn commit_selection(&mut self, selection: &Selection, now: DateTime<Local>) -> Result<()> {
        self.store.save_selection(selection)?;
        info!(count = selection.len(), "saved selection");
        self.render(now)?;
        self.start_timer(now)
    }

    /// Repaint every selected exam from scratch
    pub fn render(&mut self, now: DateTime<Local>) -> Result<()> {
        let selection = self.store.load_selection()?;
        self.display =
            renderer::render_countdowns(&self.catalog, selection.as_ref(), now, &mut self.surface);
        self.surface.flush();
        Ok(())
    }

    /// Stop any running ticker; start a new one when exams are selected
    fn start_timer(&mut self, now: DateTime<Local>) -> Result<()> {
        self.scheduler.stop();
        let selection = self.store.load_selection()?;
        match selection {
            Some(selection) if !selection.is_empty() => {
                self.refresh(&selection, now);
                self.scheduler.start();
            }
            _ => debug!("nothing selected, countdowns stay idle"),
        }
        Ok(())
    }

    /// Wait up to `timeout` for the next tick
    pub fn next_tick(&self, timeout: Duration) -> Option<Tick> {
        self.scheduler.ticks().recv_timeout(timeout).ok()
    }

    /// Update countdowns for one tick; ticks from a stopped ticker are ignored
    pub fn handle_tick(&mut self, tick: Tick, now: DateTime<Local>) -> Result<Option<TickOutcome>> {
        if !self.scheduler.is_current(tick) {
            debug!(generation = tick.generation, "dropping tick from stopped ticker");
            return Ok(None);
        }
        let Some(selection) = self.store.load_selection()? else {
            return Ok(None);
        };
        Ok(Some(self.refresh(&selection, now)))
    }

    fn refresh(&mut self, selection: &Selection, now: DateTime<Local>) -> TickOutcome {
        let outcome = renderer::refresh_countdowns(
            &self.catalog,
            selection,
            &mut self.display,
            now,
            &mut self.surface,
        );
        self.surface.flush();
        outcome
    }

    /// Forget the schedule and the selection
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear_all()?;
        self.scheduler.stop();
        self.catalog.clear();
        self.display = DisplayState::default();
        self.show_notice(Notice::NoSchedule);
        info!("schedule cleared");
        Ok(())
    }

    /// Calendar CSV for the selected exams
    pub fn export_csv(&self) -> Result<String> {
        let selection = match self.store.load_selection()? {
            Some(selection) if !selection.is_empty() => selection,
            _ => {
                return Err(CountdownError::Export(
                    "No exams selected to export".to_string(),
                ))
            }
        };

        let exams = renderer::selected_exams(&self.catalog, &selection);
        if exams.is_empty() {
            warn!("selection matches no exam in the schedule");
            return Err(CountdownError::Export(
                "Your selection does not match the current schedule".to_string(),
            ));
        }
        export::export_csv(&exams)
    }

    fn show_notice(&mut self, notice: Notice) {
        self.surface.clear();
        self.surface.show_notice(notice);
        self.surface.flush();
    }
}
