//! Control model of the host dialog
//!
//! Controls are plain values owned by the dialog: edit boxes, lists with a
//! per-entry tag, and an enabled/disabled set keyed by control id.

use std::collections::BTreeSet;

/// Every control of the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlId {
    TcpIp,
    HostNameLabel,
    HostName,
    Telnet,
    TcpPortLabel,
    TcpPort,
    ProtocolLabel,
    Protocol,
    Serial,
    ComLabel,
    Com,
    Ok,
    Cancel,
    Help,
}

/// How a control takes input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Label,
    Radio,
    CheckBox,
    /// Edit box
    Edit,
    /// Edit box with a drop-down list (host history)
    ComboEdit,
    /// Drop-down list only
    ComboList,
    Button,
}

impl ControlKind {
    pub fn is_editable(self) -> bool {
        matches!(self, ControlKind::Edit | ControlKind::ComboEdit)
    }
}

/// Controls enabled only on the TCP/IP side
pub const TCPIP_GROUP: [ControlId; 7] = [
    ControlId::HostNameLabel,
    ControlId::HostName,
    ControlId::Telnet,
    ControlId::TcpPortLabel,
    ControlId::TcpPort,
    ControlId::ProtocolLabel,
    ControlId::Protocol,
];

/// Controls enabled only on the serial side
pub const SERIAL_GROUP: [ControlId; 2] = [ControlId::ComLabel, ControlId::Com];

impl ControlId {
    /// Focus order
    pub const TAB_ORDER: [ControlId; 10] = [
        ControlId::TcpIp,
        ControlId::HostName,
        ControlId::Telnet,
        ControlId::TcpPort,
        ControlId::Protocol,
        ControlId::Serial,
        ControlId::Com,
        ControlId::Ok,
        ControlId::Cancel,
        ControlId::Help,
    ];

    pub fn kind(self) -> ControlKind {
        match self {
            ControlId::HostNameLabel
            | ControlId::TcpPortLabel
            | ControlId::ProtocolLabel
            | ControlId::ComLabel => ControlKind::Label,
            ControlId::TcpIp | ControlId::Serial => ControlKind::Radio,
            ControlId::Telnet => ControlKind::CheckBox,
            ControlId::TcpPort => ControlKind::Edit,
            ControlId::HostName => ControlKind::ComboEdit,
            ControlId::Protocol | ControlId::Com => ControlKind::ComboList,
            ControlId::Ok | ControlId::Cancel | ControlId::Help => ControlKind::Button,
        }
    }
}

// =============================================================================
// Actions
// =============================================================================

/// Editing operation on an edit box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAction {
    Insert(char),
    Paste(String),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    KillToEnd,
    KillToStart,
}

/// Selection change in a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAction {
    Next,
    Prev,
    Index(usize),
}

// =============================================================================
// Edit box
// =============================================================================

/// Single-line edit box with a character limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    text: String,
    /// Cursor position in characters
    cursor: usize,
    max_chars: usize,
}

impl TextField {
    pub fn new(max_chars: usize) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            max_chars,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Replace the whole text, cut to the limit; cursor goes to the end
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().take(self.max_chars).collect();
        self.cursor = self.len();
    }

    fn insert(&mut self, c: char) -> bool {
        if c.is_control() || self.len() >= self.max_chars {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
        true
    }

    pub fn apply(&mut self, action: &EditAction) {
        match action {
            EditAction::Insert(c) => {
                self.insert(*c);
            }
            EditAction::Paste(s) => {
                for c in s.chars().filter(|c| !c.is_control()) {
                    if !self.insert(c) {
                        break;
                    }
                }
            }
            EditAction::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.text.remove(at);
                }
            }
            EditAction::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_index(self.cursor);
                    self.text.remove(at);
                }
            }
            EditAction::Left => self.cursor = self.cursor.saturating_sub(1),
            EditAction::Right => self.cursor = (self.cursor + 1).min(self.len()),
            EditAction::Home => self.cursor = 0,
            EditAction::End => self.cursor = self.len(),
            EditAction::KillToEnd => {
                let at = self.byte_index(self.cursor);
                self.text.truncate(at);
            }
            EditAction::KillToStart => {
                let at = self.byte_index(self.cursor);
                self.text.replace_range(..at, "");
                self.cursor = 0;
            }
        }
    }
}

// =============================================================================
// List
// =============================================================================

/// List entry; `tag` points back into the owner's data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboItem {
    pub label: String,
    pub tag: usize,
}

/// Drop-down list with a single selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboBox {
    items: Vec<ComboItem>,
    selected: Option<usize>,
}

impl ComboBox {
    /// Append an entry, returning its position
    pub fn add(&mut self, label: impl Into<String>, tag: usize) -> usize {
        self.items.push(ComboItem {
            label: label.into(),
            tag,
        });
        self.items.len() - 1
    }

    pub fn items(&self) -> &[ComboItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&ComboItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn selected_tag(&self) -> Option<usize> {
        self.selected_item().map(|item| item.tag)
    }

    /// Select the entry at `index`; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Position of the first entry whose tag matches
    pub fn position_by_tag(&self, mut pred: impl FnMut(usize) -> bool) -> Option<usize> {
        self.items.iter().position(|item| pred(item.tag))
    }

    /// Apply a selection change; returns true when the selection moved
    pub fn apply(&mut self, action: SelectAction) -> bool {
        if self.items.is_empty() {
            return false;
        }
        let last = self.items.len() - 1;
        let next = match (action, self.selected) {
            (SelectAction::Index(i), _) => i,
            (SelectAction::Next, None) | (SelectAction::Prev, None) => 0,
            (SelectAction::Next, Some(i)) => (i + 1).min(last),
            (SelectAction::Prev, Some(i)) => i.saturating_sub(1),
        };
        let before = self.selected;
        self.select(next) && before != self.selected
    }
}

// =============================================================================
// Enabled state
// =============================================================================

/// Set of disabled controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enablement {
    disabled: BTreeSet<ControlId>,
}

impl Enablement {
    pub fn is_enabled(&self, id: ControlId) -> bool {
        !self.disabled.contains(&id)
    }

    pub fn enable(&mut self, ids: &[ControlId]) {
        for id in ids {
            self.disabled.remove(id);
        }
    }

    pub fn disable(&mut self, ids: &[ControlId]) {
        self.disabled.extend(ids.iter().copied());
    }
}
