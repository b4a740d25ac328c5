//! In-memory surface for tests

use std::collections::HashMap;

use super::{Notice, RecordFields, RenderSurface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceContent {
    Notice(Notice),
    Records(Vec<RecordFields>),
}

impl Default for SurfaceContent {
    fn default() -> Self {
        SurfaceContent::Records(Vec::new())
    }
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    content: SurfaceContent,
    passed_marks: HashMap<String, usize>,
    pub clears: usize,
    pub flushes: usize,
}

impl MemorySurface {
    pub fn content(&self) -> &SurfaceContent {
        &self.content
    }

    pub fn records(&self) -> &[RecordFields] {
        match &self.content {
            SurfaceContent::Records(records) => records,
            SurfaceContent::Notice(_) => &[],
        }
    }

    pub fn record(&self, id: &str) -> Option<&RecordFields> {
        self.records().iter().find(|record| record.id == id)
    }

    pub fn notice(&self) -> Option<Notice> {
        match self.content {
            SurfaceContent::Notice(notice) => Some(notice),
            SurfaceContent::Records(_) => None,
        }
    }

    /// How many times `mark_record_passed` hit this record
    pub fn passed_marks(&self, id: &str) -> usize {
        self.passed_marks.get(id).copied().unwrap_or(0)
    }

    fn record_mut(&mut self, id: &str) -> Option<&mut RecordFields> {
        match &mut self.content {
            SurfaceContent::Records(records) => records.iter_mut().find(|record| record.id == id),
            SurfaceContent::Notice(_) => None,
        }
    }
}

impl RenderSurface for MemorySurface {
    fn clear(&mut self) {
        self.content = SurfaceContent::default();
        self.passed_marks.clear();
        self.clears += 1;
    }

    fn show_notice(&mut self, notice: Notice) {
        self.content = SurfaceContent::Notice(notice);
    }

    fn append_record(&mut self, fields: RecordFields) {
        if let SurfaceContent::Records(records) = &mut self.content {
            records.push(fields);
            return;
        }
        self.content = SurfaceContent::Records(vec![fields]);
    }

    fn update_record_text(&mut self, id: &str, text: &str) {
        if let Some(record) = self.record_mut(id) {
            record.countdown = text.to_string();
        }
    }

    fn mark_record_passed(&mut self, id: &str) {
        if let Some(record) = self.record_mut(id) {
            record.passed = true;
        }
        *self.passed_marks.entry(id.to_string()).or_insert(0) += 1;
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
