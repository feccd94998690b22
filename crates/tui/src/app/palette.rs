use std::path::Path;

use engine::export::ExportFormat;

use super::Section;

const EXPORT_STEM: &str = "finance_export";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteCommand {
    Goto(Section),
    Export(ExportFormat),
    Quit,
}

impl PaletteCommand {
    pub fn all() -> Vec<PaletteCommand> {
        let mut commands: Vec<_> = Section::ALL.into_iter().map(Self::Goto).collect();
        commands.push(Self::Export(ExportFormat::Spreadsheet));
        commands.push(Self::Export(ExportFormat::Document));
        commands.push(Self::Quit);
        commands
    }

    pub fn label(self) -> String {
        match self {
            Self::Goto(section) => format!("Go to {}", section.label()),
            Self::Export(format) => format!("Export to {}", format.label()),
            Self::Quit => "Quit".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PaletteState {
    pub active: bool,
    pub query: String,
    pub selected: usize,
}

impl PaletteState {
    pub fn open(&mut self) {
        self.active = true;
        self.query.clear();
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    pub fn push(&mut self, ch: char) {
        self.query.push(ch);
        self.selected = 0;
    }

    pub fn pop(&mut self) {
        self.query.pop();
        self.selected = 0;
    }

    /// Commands whose label contains the query, case-insensitively.
    pub fn filtered(&self) -> Vec<PaletteCommand> {
        let query = self.query.trim().to_lowercase();
        let all = PaletteCommand::all();
        if query.is_empty() {
            return all;
        }
        all.into_iter()
            .filter(|cmd| cmd.label().to_lowercase().contains(&query))
            .collect()
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.filtered().len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_command(&self) -> Option<PaletteCommand> {
        self.filtered().get(self.selected).copied()
    }
}

/// Destination picker shown before an export runs.
#[derive(Debug, Clone)]
pub struct ExportPrompt {
    pub format: ExportFormat,
    pub path: String,
}

impl ExportPrompt {
    pub fn new(format: ExportFormat, export_dir: &Path) -> Self {
        let file = format!("{EXPORT_STEM}.{}", format.extension());
        Self {
            format,
            path: export_dir.join(file).display().to_string(),
        }
    }
}
