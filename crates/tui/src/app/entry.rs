use engine::EntryDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryField {
    #[default]
    Kind,
    Category,
    Amount,
    Description,
}

impl EntryField {
    pub const ALL: [EntryField; 4] = [
        EntryField::Kind,
        EntryField::Category,
        EntryField::Amount,
        EntryField::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Kind => "Type",
            Self::Category => "Category",
            Self::Amount => "Amount",
            Self::Description => "Description",
        }
    }

    /// Fields that accept typed characters.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Amount | Self::Description)
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|field| *field == self).unwrap_or(0)
    }
}

#[derive(Debug, Default)]
pub struct EntryState {
    pub draft: EntryDraft,
    pub focus: EntryField,
    /// Inline message from the last failed save.
    pub error: Option<String>,
}

impl EntryState {
    pub fn focus_next(&mut self) {
        let next = (self.focus.index() + 1) % EntryField::ALL.len();
        self.focus = EntryField::ALL[next];
    }

    pub fn focus_prev(&mut self) {
        let len = EntryField::ALL.len();
        let prev = (self.focus.index() + len - 1) % len;
        self.focus = EntryField::ALL[prev];
    }

    /// Moves the selector under focus: flips the type or walks the category list.
    pub fn step(&mut self, step: isize) {
        match self.focus {
            EntryField::Kind => {
                let kind = self.draft.kind().toggled();
                self.draft.set_kind(kind);
            }
            EntryField::Category => self.draft.cycle_category(step),
            EntryField::Amount | EntryField::Description => {}
        }
    }

    pub fn input(&mut self, ch: char) {
        match self.focus {
            EntryField::Amount => {
                if ch.is_ascii_digit() || matches!(ch, '.' | ',' | '-' | '+' | 'e' | 'E') {
                    self.draft.amount.push(ch);
                }
            }
            EntryField::Description => self.draft.description.push(ch),
            EntryField::Kind | EntryField::Category => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            EntryField::Amount => {
                self.draft.amount.pop();
            }
            EntryField::Description => {
                self.draft.description.pop();
            }
            EntryField::Kind | EntryField::Category => {}
        }
    }
}
