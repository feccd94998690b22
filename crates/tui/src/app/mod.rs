mod dashboard;
mod entry;
mod history;
mod palette;

use std::{
    path::Path,
    time::{Duration, Instant},
};

use chrono::{NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use engine::{
    Record, RecordStore, SubmitError,
    export::{self, ExportFormat},
};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{self, AppAction},
    },
};

pub use dashboard::DashboardState;
pub use entry::{EntryField, EntryState};
pub use history::HistoryState;
pub use palette::{ExportPrompt, PaletteCommand, PaletteState};

const TOAST_TTL: Duration = Duration::from_secs(4);
const ERROR_TOAST_TTL: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Entry,
    History,
    Dashboard,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Entry, Section::History, Section::Dashboard];

    pub fn label(self) -> &'static str {
        match self {
            Self::Entry => "Add Record",
            Self::History => "History",
            Self::Dashboard => "Dashboard",
        }
    }

    pub fn shortcut(self) -> &'static str {
        match self {
            Self::Entry => "F1",
            Self::History => "F2",
            Self::Dashboard => "F3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

/// The working dataset of a running instance.
///
/// Owned by [`App`] and lent to each view; nothing else holds records.
#[derive(Debug)]
pub struct Session {
    store: RecordStore,
}

impl Session {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    pub fn data_path(&self) -> &Path {
        self.store.path()
    }

    pub fn store_mut(&mut self) -> &mut RecordStore {
        &mut self.store
    }
}

#[derive(Debug)]
pub struct AppState {
    pub session: Session,
    pub section: Section,
    pub entry: EntryState,
    pub history: HistoryState,
    pub dashboard: DashboardState,
    pub palette: PaletteState,
    pub export: Option<ExportPrompt>,
    pub toast: Option<ToastState>,
}

pub struct App {
    config: AppConfig,
    timezone: Tz,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig, store: RecordStore) -> Result<Self> {
        let timezone: Tz = config
            .timezone
            .parse()
            .map_err(|_| AppError::Timezone(config.timezone.clone()))?;

        let session = Session::new(store);
        let mut history = HistoryState::default();
        history.refresh(&session);

        let state = AppState {
            session,
            section: Section::Entry,
            entry: EntryState::default(),
            history,
            dashboard: DashboardState::default(),
            palette: PaletteState::default(),
            export: None,
            toast: None,
        };

        Ok(Self {
            config,
            timezone,
            state,
            should_quit: false,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.handle_key(key);
            }
            self.expire_toast(Instant::now());
        }

        tracing::info!("quitting");
        Ok(())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Routes one key press. Overlays take precedence over the active view.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let action = keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        if self.state.export.is_some() {
            self.handle_export_prompt(action);
            return;
        }
        if self.state.palette.active {
            self.handle_palette(action);
            return;
        }

        match action {
            AppAction::TogglePalette => self.state.palette.open(),
            AppAction::Goto(section) => self.activate(section),
            _ => match self.state.section {
                Section::Entry => self.handle_entry(action),
                Section::History => self.handle_history(action),
                Section::Dashboard => self.handle_dashboard(action),
            },
        }
    }

    /// Switches view and refreshes it from the current session.
    pub fn activate(&mut self, section: Section) {
        self.state.section = section;
        match section {
            Section::Entry => {}
            Section::History => self.state.history.refresh(&self.state.session),
            Section::Dashboard => {
                let errors = self.state.dashboard.refresh(&self.state.session);
                if !errors.is_empty() {
                    let joined = errors
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; ");
                    self.notify(ToastLevel::Error, format!("Chart error: {joined}"));
                }
            }
        }
    }

    fn handle_entry(&mut self, action: AppAction) {
        let entry = &mut self.state.entry;
        match action {
            AppAction::Submit => self.save_entry(),
            AppAction::NextField => entry.focus_next(),
            AppAction::PrevField => entry.focus_prev(),
            AppAction::Backspace => entry.backspace(),
            AppAction::Left => entry.step(-1),
            AppAction::Right => entry.step(1),
            AppAction::Up => {
                if entry.focus == EntryField::Category {
                    entry.step(-1);
                } else {
                    entry.focus_prev();
                }
            }
            AppAction::Down => {
                if entry.focus == EntryField::Category {
                    entry.step(1);
                } else {
                    entry.focus_next();
                }
            }
            AppAction::Input(ch) => {
                if entry.focus.is_text() {
                    entry.input(ch);
                } else if ch == ' ' {
                    entry.step(1);
                } else if ch == 'q' {
                    self.should_quit = true;
                }
            }
            _ => {}
        }
    }

    fn save_entry(&mut self) {
        let now = self.now();
        let AppState { session, entry, .. } = &mut self.state;
        match entry.draft.submit(session.store_mut(), now) {
            Ok(record) => {
                tracing::info!("saved record: {record}");
                entry.error = None;
                self.notify(ToastLevel::Success, "Record saved successfully!");
            }
            Err(SubmitError::Validation(err)) => {
                tracing::debug!("validation failed: {err}");
                entry.error = Some(err.to_string());
                self.notify(ToastLevel::Error, format!("Validation Error: {err}"));
            }
            Err(SubmitError::Store(err)) => {
                tracing::error!("failed to save record: {err}");
                let message = format!("An error occurred while saving the file: {err}");
                entry.error = Some(message.clone());
                self.notify(ToastLevel::Error, message);
            }
        }
    }

    fn handle_history(&mut self, action: AppAction) {
        let AppState {
            session, history, ..
        } = &mut self.state;
        match action {
            AppAction::Up => history.select_prev(),
            AppAction::Down => history.select_next(),
            AppAction::Submit => {
                history.apply(session);
                let shown = history.rows.len();
                self.notify(ToastLevel::Info, format!("Showing {shown} records"));
            }
            AppAction::Input(ch) => match ch {
                'k' => history.select_prev(),
                'j' => history.select_next(),
                't' => history.cycle_kind(),
                'c' => history.cycle_category(),
                'x' => history.reset(session),
                'r' => history.refresh(session),
                'q' => self.should_quit = true,
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_dashboard(&mut self, action: AppAction) {
        match action {
            AppAction::Input('r') => self.activate(Section::Dashboard),
            AppAction::Input('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_palette(&mut self, action: AppAction) {
        let palette = &mut self.state.palette;
        match action {
            AppAction::Cancel | AppAction::TogglePalette => palette.close(),
            AppAction::Up => palette.select_prev(),
            AppAction::Down => palette.select_next(),
            AppAction::Backspace => palette.pop(),
            AppAction::Input(ch) => palette.push(ch),
            AppAction::Submit => {
                let command = palette.selected_command();
                palette.close();
                if let Some(command) = command {
                    self.run_command(command);
                }
            }
            _ => {}
        }
    }

    fn run_command(&mut self, command: PaletteCommand) {
        match command {
            PaletteCommand::Goto(section) => self.activate(section),
            PaletteCommand::Export(format) => self.open_export(format),
            PaletteCommand::Quit => self.should_quit = true,
        }
    }

    fn open_export(&mut self, format: ExportFormat) {
        if !format.is_available() {
            let err = format.unavailable();
            tracing::warn!("{err}");
            self.notify(ToastLevel::Error, format!("Library Missing: {err}"));
            return;
        }
        self.state.export = Some(ExportPrompt::new(format, &self.config.export_dir));
    }

    fn handle_export_prompt(&mut self, action: AppAction) {
        let Some(prompt) = self.state.export.as_mut() else {
            return;
        };
        match action {
            AppAction::Cancel => self.state.export = None,
            AppAction::Backspace => {
                prompt.path.pop();
            }
            AppAction::Input(ch) => prompt.path.push(ch),
            AppAction::Submit => self.run_export(),
            _ => {}
        }
    }

    fn run_export(&mut self) {
        let Some(prompt) = self.state.export.take() else {
            return;
        };
        let path = prompt.path.trim();
        if path.is_empty() {
            self.notify(ToastLevel::Error, "Choose a file name to export to.");
            self.state.export = Some(prompt);
            return;
        }

        let records = self.state.session.records();
        match export::export(prompt.format, records, Path::new(path)) {
            Ok(resolved) => {
                self.notify(
                    ToastLevel::Success,
                    format!("Data exported to {}", resolved.display()),
                );
            }
            Err(err) if err.is_unavailable() => {
                tracing::warn!("{err}");
                self.notify(ToastLevel::Error, format!("Library Missing: {err}"));
            }
            Err(err) => {
                tracing::error!("{} export failed: {err}", prompt.format.label());
                self.notify(
                    ToastLevel::Error,
                    format!(
                        "An error occurred during {} export: {err}",
                        prompt.format.label()
                    ),
                );
            }
        }
    }

    fn notify(&mut self, level: ToastLevel, message: impl Into<String>) {
        let ttl = match level {
            ToastLevel::Error => ERROR_TOAST_TTL,
            ToastLevel::Info | ToastLevel::Success => TOAST_TTL,
        };
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + ttl,
        });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self
            .state
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.state.toast = None;
        }
    }

    /// Wall-clock time in the configured timezone, to the second.
    fn now(&self) -> NaiveDateTime {
        let now = Utc::now().with_timezone(&self.timezone).naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crossterm::event::{KeyCode, KeyModifiers};
    use engine::{CategoryFilter, DashboardReport, KindFilter, RecordKind};
    use tempfile::TempDir;

    use super::*;

    fn app_in(dir: &TempDir) -> App {
        let config = AppConfig {
            data_file: dir.path().join("finance_tracker.csv"),
            export_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };
        let store = RecordStore::load(&config.data_file).unwrap();
        App::new(config, store).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, ch: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    /// Fills the form with the `n`-th category of `kind` and saves it.
    fn add_record(app: &mut App, kind: RecordKind, n: usize, amount: &str) {
        app.activate(Section::Entry);
        let entry = &mut app.state.entry;
        entry.draft.set_kind(kind);
        let category = kind.categories()[n];
        assert!(entry.draft.select_category(category));
        entry.draft.amount = amount.to_string();
        press(app, KeyCode::Enter);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            timezone: "Mars/Olympus".to_string(),
            ..AppConfig::default()
        };
        let store = RecordStore::load(dir.path().join("t.csv")).unwrap();
        assert!(matches!(
            App::new(config, store),
            Err(AppError::Timezone(_))
        ));
    }

    #[test]
    fn saving_from_the_form_persists_and_clears_it() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "12.5");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "lunch");
        press(&mut app, KeyCode::Enter);

        let records = app.state.session.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category, "Food");
        assert_eq!(records[0].amount.to_string(), "12.50");
        assert_eq!(records[0].description.as_deref(), Some("lunch"));
        assert!(app.state.entry.draft.amount.is_empty());
        assert_eq!(app.state.entry.draft.category(), None);
        assert_eq!(
            app.state.toast.as_ref().map(|t| t.level),
            Some(ToastLevel::Success)
        );

        let on_disk = fs::read_to_string(app.state.session.data_path()).unwrap();
        assert_eq!(on_disk.lines().count(), 2);
    }

    #[test]
    fn invalid_form_keeps_input_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "5");
        press(&mut app, KeyCode::Enter);

        assert!(app.state.session.records().is_empty());
        assert!(!app.state.session.data_path().exists());
        assert_eq!(app.state.entry.draft.amount, "5");
        assert_eq!(
            app.state.entry.error.as_deref(),
            Some("Please select a category.")
        );
        assert_eq!(
            app.state.toast.as_ref().map(|t| t.level),
            Some(ToastLevel::Error)
        );
    }

    #[test]
    fn q_types_into_text_fields_but_quits_elsewhere() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        app.state.entry.focus = EntryField::Description;
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit());
        assert_eq!(app.state.entry.draft.description, "q");

        app.state.entry.focus = EntryField::Kind;
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        ctrl(&mut app, 'p');
        assert!(app.state.palette.active);
        ctrl(&mut app, 'c');
        assert!(app.should_quit());
    }

    #[test]
    fn history_filter_waits_for_apply() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        add_record(&mut app, RecordKind::Expense, 0, "10");
        add_record(&mut app, RecordKind::Income, 0, "1000");
        add_record(&mut app, RecordKind::Expense, 1, "5");

        press(&mut app, KeyCode::F(2));
        assert_eq!(app.state.section, Section::History);
        assert_eq!(app.state.history.rows, vec![0, 1, 2]);

        // All -> Income -> Expense
        type_text(&mut app, "tt");
        assert_eq!(
            app.state.history.pending.kind,
            KindFilter::Only(RecordKind::Expense)
        );
        assert!(app.state.history.is_dirty());
        assert_eq!(app.state.history.rows, vec![0, 1, 2]);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.history.rows, vec![0, 2]);

        type_text(&mut app, "c");
        assert_eq!(
            app.state.history.pending.category,
            CategoryFilter::Only("Food".to_string())
        );
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.history.rows, vec![0]);

        type_text(&mut app, "x");
        assert_eq!(app.state.history.rows, vec![0, 1, 2]);
        assert!(app.state.history.applied.is_all());
    }

    #[test]
    fn reopening_history_keeps_applied_filter_and_sees_new_rows() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        add_record(&mut app, RecordKind::Income, 0, "1000");

        press(&mut app, KeyCode::F(2));
        type_text(&mut app, "t");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.history.rows, vec![0]);

        add_record(&mut app, RecordKind::Income, 1, "200");
        add_record(&mut app, RecordKind::Expense, 0, "3");
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.state.history.rows, vec![0, 1]);
    }

    #[test]
    fn dashboard_is_rebuilt_on_every_visit() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);

        press(&mut app, KeyCode::F(3));
        assert_eq!(app.state.dashboard.report, Some(DashboardReport::Empty));

        add_record(&mut app, RecordKind::Expense, 0, "20");
        press(&mut app, KeyCode::F(3));
        let Some(DashboardReport::Charts { by_category, .. }) = &app.state.dashboard.report
        else {
            panic!("expected charts");
        };
        let breakdown = by_category.as_ref().unwrap().as_ref().unwrap();
        assert_eq!(breakdown.get("Food"), Some(engine::Amount::new(2000)));
    }

    #[test]
    fn dashboard_toast_lists_every_failed_chart() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("finance_tracker.csv"),
            "date,type,category,amount,description\n\
             2024-01-05 08:00:00,Expense,Food,5e28,\n\
             oops,Expense,Food,5e28,\n",
        )
        .unwrap();
        let mut app = app_in(&dir);

        press(&mut app, KeyCode::F(3));

        let toast = app.state.toast.as_ref().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert_eq!(
            toast.message,
            "Chart error: Food total overflows; malformed date \"oops\""
        );
    }

    #[test]
    fn palette_export_writes_to_the_prefilled_path() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        add_record(&mut app, RecordKind::Expense, 0, "20");

        ctrl(&mut app, 'p');
        type_text(&mut app, "excel");
        press(&mut app, KeyCode::Enter);
        assert!(!app.state.palette.active);

        if !ExportFormat::Spreadsheet.is_available() {
            assert!(app.state.export.is_none());
            assert_eq!(
                app.state.toast.as_ref().map(|t| t.level),
                Some(ToastLevel::Error)
            );
            return;
        }

        let prompt = app.state.export.as_ref().unwrap();
        let expected = dir.path().join("finance_export.xlsx");
        assert_eq!(prompt.path, expected.display().to_string());

        press(&mut app, KeyCode::Enter);
        assert!(app.state.export.is_none());
        assert!(expected.exists());
        assert_eq!(
            app.state.toast.as_ref().map(|t| t.level),
            Some(ToastLevel::Success)
        );
    }

    #[test]
    fn escape_cancels_export_prompt() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.state.export = Some(ExportPrompt::new(ExportFormat::Document, dir.path()));

        press(&mut app, KeyCode::Esc);
        assert!(app.state.export.is_none());
        assert!(!dir.path().join("finance_export.pdf").exists());
    }

    #[test]
    fn expired_toast_is_dropped() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.notify(ToastLevel::Info, "hello");
        app.expire_toast(Instant::now());
        assert!(app.state.toast.is_some());
        app.expire_toast(Instant::now() + ERROR_TOAST_TTL);
        assert!(app.state.toast.is_none());
    }
}
