use std::collections::HashSet;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::error::SubmitError;
use crate::models::{Notice, Report, Selection};

/// All state behind the upload-and-report view.
///
/// Mutated only through the methods below, from the UI thread.
#[derive(Debug, Default)]
pub struct ReportView {
    pub selection: Option<Selection>,
    pub report: Option<Report>,
    revealed: HashSet<usize>,
    pub is_submitting: bool,
    pub is_dragging: bool,
    pub notice: Option<Notice>,
    pub generated_at: Option<DateTime<Local>>,
    pub quiz_cursor: usize,
    pub expanded: Option<usize>,
    pub scroll: u16,
}

impl ReportView {
    pub fn new(selection: Option<Selection>) -> Self {
        Self { selection, ..Self::default() }
    }

    pub fn select_file(&mut self, selection: Selection) {
        info!(file = %selection.path.display(), size = selection.size, "file selected");
        self.selection = Some(selection);
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.is_dragging = dragging;
    }

    /// The trigger is live only with a selection and nothing in flight.
    pub fn can_submit(&self) -> bool {
        self.selection.is_some() && !self.is_submitting
    }

    /// First half of a submission: clears revealed answers, checks the
    /// selection and raises the submitting flag.
    ///
    /// Does not refuse a second call while a request is outstanding; the
    /// disabled trigger is the only guard against that.
    pub fn begin_submit(&mut self) -> Result<Selection, SubmitError> {
        self.revealed.clear();
        let Some(selection) = self.selection.clone() else {
            let err = SubmitError::NoFileSelected;
            warn!("submit without a selection");
            self.notice = Some(Notice::info(err.to_string()));
            return Err(err);
        };
        self.is_submitting = true;
        info!(file = %selection.name, "submission started");
        Ok(selection)
    }

    /// Second half of a submission. Always lowers the submitting flag.
    pub fn finish_submit(&mut self, outcome: Result<Report, SubmitError>) {
        self.is_submitting = false;
        match outcome {
            Ok(report) => {
                info!(
                    key_points = report.key_points.len(),
                    questions = report.quiz.len(),
                    "submission succeeded"
                );
                self.report = Some(report);
                self.generated_at = Some(Local::now());
                self.quiz_cursor = 0;
                self.expanded = None;
                self.scroll = 0;
            }
            Err(e) => {
                warn!(error = %e, "submission failed");
                self.notice = Some(Notice::error(format!("Failed to process the file: {}", e)));
            }
        }
    }

    pub fn reveal_answer(&mut self, index: usize) {
        self.revealed.insert(index);
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    pub fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn quiz_len(&self) -> usize {
        self.report.as_ref().map(|r| r.quiz.len()).unwrap_or(0)
    }

    pub fn cursor_up(&mut self) {
        if self.quiz_cursor > 0 {
            self.quiz_cursor -= 1;
        }
    }

    pub fn cursor_down(&mut self) {
        if self.quiz_cursor + 1 < self.quiz_len() {
            self.quiz_cursor += 1;
        }
    }

    /// Accordion behaviour: one entry open at a time, and it can be closed.
    pub fn toggle_expanded(&mut self) {
        if self.quiz_len() == 0 {
            return;
        }
        self.expanded = if self.expanded == Some(self.quiz_cursor) {
            None
        } else {
            Some(self.quiz_cursor)
        };
    }

    /// Reveals the open entry's answer. The control only exists when an
    /// entry is expanded.
    pub fn reveal_expanded(&mut self) {
        if let Some(index) = self.expanded {
            self.reveal_answer(index);
        }
    }

    pub fn scroll_up(&mut self, by: u16) {
        self.scroll = self.scroll.saturating_sub(by);
    }

    pub fn scroll_down(&mut self, by: u16, max: u16) {
        self.scroll = self.scroll.saturating_add(by).min(max);
    }

    /// Moves the scroll offset so rows `top..bottom` fit in a viewport of
    /// `height` rows. The top row wins when the range is taller than that.
    pub fn scroll_into_view(&mut self, top: u16, bottom: u16, height: u16) {
        if top < self.scroll {
            self.scroll = top;
        } else if bottom > self.scroll.saturating_add(height) {
            self.scroll = bottom.saturating_sub(height).min(top);
        }
    }
}
