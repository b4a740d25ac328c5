//! Terminal implementation of the render surface

use tracing::debug;

use crate::display::formatter::{notice_markdown, print_markdown, records_markdown};
use crate::display::terminal::{clear_screen, is_interactive};
use crate::renderer::{Notice, RecordFields, RenderSurface};

/// How the surface reaches the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceMode {
    /// Paint only when [`TerminalSurface::present`] is called
    Snapshot,
    /// Repaint on every flush, clearing the screen first on a TTY
    Live,
}

#[derive(Debug)]
pub struct TerminalSurface {
    mode: SurfaceMode,
    notice: Option<Notice>,
    records: Vec<RecordFields>,
    dirty: bool,
}

impl TerminalSurface {
    pub fn new(mode: SurfaceMode) -> Self {
        Self {
            mode,
            notice: None,
            records: Vec::new(),
            dirty: false,
        }
    }

    /// Current contents as markdown
    pub fn to_markdown(&self) -> String {
        match self.notice {
            Some(notice) => notice_markdown(notice).to_string(),
            None => records_markdown(&self.records),
        }
    }

    /// Print the current contents
    pub fn present(&self) {
        print_markdown(&self.to_markdown());
    }

    fn record_mut(&mut self, id: &str) -> Option<&mut RecordFields> {
        self.records.iter_mut().find(|record| record.id == id)
    }
}

impl RenderSurface for TerminalSurface {
    fn clear(&mut self) {
        self.notice = None;
        self.records.clear();
        self.dirty = true;
    }

    fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.records.clear();
        self.dirty = true;
    }

    fn append_record(&mut self, fields: RecordFields) {
        self.notice = None;
        self.records.push(fields);
        self.dirty = true;
    }

    fn update_record_text(&mut self, id: &str, text: &str) {
        if let Some(record) = self.record_mut(id) {
            if record.countdown != text {
                record.countdown = text.to_string();
                self.dirty = true;
            }
        }
    }

    fn mark_record_passed(&mut self, id: &str) {
        if let Some(record) = self.record_mut(id) {
            record.passed = true;
            self.dirty = true;
        }
    }

    fn flush(&mut self) {
        if self.mode != SurfaceMode::Live || !self.dirty {
            return;
        }
        if is_interactive() {
            if let Err(e) = clear_screen() {
                debug!(error = %e, "could not clear the screen");
            }
        } else {
            println!();
        }
        self.present();
        self.dirty = false;
    }
}
