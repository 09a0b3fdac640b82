use std::path::Path;

use anyhow::Result;
use arboard::Clipboard;
use ratatui::layout::Rect;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::Settings;
use crate::error::SubmitError;
use crate::markdown::report_markdown;
use crate::models::{InputMode, Notice, Report, Selection};
use crate::network::UploadClient;
use crate::state::ReportView;
use crate::theme::Theme;
use crate::ui::{cursor_rows, max_scroll, results_text_area};

type Upload = JoinHandle<Result<Report, SubmitError>>;

/// Owns the view state and drives the one asynchronous operation.
pub struct App {
    pub view: ReportView,
    pub mode: InputMode,
    pub path_input: String,
    pub settings: Settings,
    pub theme: Theme,
    /// Size of the last drawn frame.
    pub screen: Rect,
    client: UploadClient,
    rt: Runtime,
    pending: Option<Upload>,
}

impl App {
    pub fn new(settings: Settings, selection: Option<Selection>) -> Result<Self> {
        let client = UploadClient::new(&settings.endpoint, settings.timeout())?;
        Ok(Self {
            view: ReportView::new(selection),
            mode: InputMode::Normal,
            path_input: String::new(),
            settings,
            theme: Theme::default(),
            screen: Rect::new(0, 0, 80, 24),
            client,
            rt: Runtime::new()?,
            pending: None,
        })
    }

    /// Starts a submission. Without a selection this only raises the notice.
    pub fn submit(&mut self) {
        let Ok(selection) = self.view.begin_submit() else {
            return;
        };
        let client = self.client.clone();
        debug!(endpoint = client.endpoint(), "spawning upload");
        let handle = self.rt.spawn(async move { client.upload(&selection).await });
        self.track(handle);
    }

    fn track(&mut self, handle: Upload) {
        if self.pending.is_some() {
            warn!("replacing an upload that is still in flight");
        }
        self.pending = Some(handle);
    }

    /// Applies the outcome of a finished upload. Called on every UI tick.
    pub fn poll_pending(&mut self) {
        if !self.pending.as_ref().is_some_and(|h| h.is_finished()) {
            return;
        }
        if let Some(handle) = self.pending.take() {
            let outcome = match self.rt.block_on(handle) {
                Ok(outcome) => outcome,
                Err(e) => Err(SubmitError::from(e)),
            };
            self.view.finish_submit(outcome);
        }
    }

    pub fn select_path(&mut self, path: &Path) {
        match Selection::from_path(path) {
            Ok(selection) => self.view.select_file(selection),
            Err(e) => {
                warn!(error = %e, "selection rejected");
                self.view.show_notice(Notice::error(e.to_string()));
            }
        }
    }

    pub fn open_prompt(&mut self) {
        self.mode = InputMode::PathPrompt;
        self.path_input.clear();
        self.view.set_dragging(true);
    }

    pub fn close_prompt(&mut self) {
        self.mode = InputMode::Normal;
        self.path_input.clear();
        self.view.set_dragging(false);
    }

    pub fn max_scroll(&self) -> u16 {
        max_scroll(&self.view, &self.theme, self.screen)
    }

    /// Scrolls the results so the quiz entry under the cursor is on screen.
    pub fn follow_cursor(&mut self) {
        let text = results_text_area(self.screen);
        if let Some((top, bottom)) = cursor_rows(&self.view, &self.theme, text.width) {
            self.view.scroll_into_view(top, bottom, text.height);
        }
        self.view.scroll = self.view.scroll.min(self.max_scroll());
    }

    pub fn copy_report(&mut self) {
        let Some(report) = &self.view.report else {
            return;
        };
        let text = report_markdown(report, self.view.selection.as_ref().map(|s| s.name.as_str()));
        let copied = Clipboard::new().and_then(|mut cb| cb.set_text(text));
        match copied {
            Ok(()) => self.view.show_notice(Notice::info("Report copied to clipboard")),
            Err(e) => self.view.show_notice(Notice::error(format!("Clipboard unavailable: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::thread::sleep;
    use std::time::Duration;

    const SAMPLE: &str = r#"{"summary":"S","key_points":["A","B"],"quiz":[{"question":"Q1","options":["X","Y"],"answer":"Y"}]}"#;

    fn settings(endpoint: String) -> Settings {
        Settings {
            endpoint,
            timeout_secs: Some(10),
            accepted_extensions: vec!["pdf".into(), "txt".into()],
            log_level: "info".into(),
            log_dir: None,
        }
    }

    fn write_file(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"some lecture text").unwrap();
        path
    }

    fn settle(app: &mut App) {
        for _ in 0..500 {
            app.poll_pending();
            if !app.view.is_submitting {
                return;
            }
            sleep(Duration::from_millis(10));
        }
        panic!("submission never settled");
    }

    #[test]
    fn test_submit_without_selection_makes_no_request() {
        let mut server = mockito::Server::new();
        let mock = server.mock("POST", "/api/upload").expect(0).create();

        let mut app = App::new(settings(format!("{}/api/upload", server.url())), None).unwrap();
        app.submit();

        assert!(!app.view.is_submitting);
        assert!(app.pending.is_none());
        assert_eq!(app.view.notice.as_ref().unwrap().message, "Please upload a file first!");
        mock.assert();
    }

    #[test]
    fn test_successful_submission_scenario() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/upload")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SAMPLE)
            .create();

        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(settings(format!("{}/api/upload", server.url())), None).unwrap();
        app.select_path(&write_file(&dir, "notes.pdf"));
        app.submit();
        assert!(app.view.is_submitting);
        settle(&mut app);

        mock.assert();
        let expected: Report = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(app.view.report, Some(expected));
        assert_eq!(app.view.revealed_count(), 0);
        assert!(app.view.notice.is_none());
        assert!(!app.view.is_revealed(0));
        app.view.reveal_answer(0);
        assert!(app.view.is_revealed(0));
    }

    #[test]
    fn test_server_error_keeps_report_absent() {
        let mut server = mockito::Server::new();
        let _mock = server.mock("POST", "/api/upload").with_status(500).create();

        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(settings(format!("{}/api/upload", server.url())), None).unwrap();
        app.select_path(&write_file(&dir, "notes.pdf"));
        app.submit();
        settle(&mut app);

        assert!(app.view.report.is_none());
        assert!(!app.view.is_submitting);
        assert!(app.view.notice.as_ref().unwrap().message.contains("Internal Server Error"));
    }

    #[test]
    fn test_unreachable_endpoint_clears_submitting() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(settings("http://127.0.0.1:9/api/upload".into()), None).unwrap();
        app.select_path(&write_file(&dir, "notes.txt"));
        app.submit();
        settle(&mut app);

        assert!(!app.view.is_submitting);
        assert!(app.view.notice.as_ref().unwrap().message.starts_with("Failed to process the file: Request failed"));
    }

    #[test]
    fn test_panicked_task_clears_submitting() {
        let mut app = App::new(settings("http://127.0.0.1:9/api/upload".into()), None).unwrap();
        app.view.select_file(Selection {
            path: "notes.pdf".into(),
            name: "notes.pdf".into(),
            size: 1,
        });
        app.view.begin_submit().unwrap();
        #[allow(unreachable_code)]
        let handle: Upload = app.rt.spawn(async {
            let outcome: Result<Report, SubmitError> = panic!("upload task blew up");
            outcome
        });
        app.track(handle);
        settle(&mut app);

        assert!(!app.view.is_submitting);
        assert!(app.view.notice.as_ref().unwrap().message.contains("Upload task stopped"));
    }

    #[test]
    fn test_select_missing_path_keeps_previous_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(settings("http://127.0.0.1:9/api/upload".into()), None).unwrap();
        let good = write_file(&dir, "notes.pdf");
        app.select_path(&good);
        app.select_path(&dir.path().join("missing.pdf"));

        assert_eq!(app.view.selection.as_ref().unwrap().path, good);
        assert!(app.view.notice.is_some());
    }

    #[test]
    fn test_prompt_arms_drop_zone() {
        let mut app = App::new(settings("http://127.0.0.1:9/api/upload".into()), None).unwrap();
        app.open_prompt();
        assert_eq!(app.mode, InputMode::PathPrompt);
        assert!(app.view.is_dragging);
        app.close_prompt();
        assert_eq!(app.mode, InputMode::Normal);
        assert!(!app.view.is_dragging);
    }
}
