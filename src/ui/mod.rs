//! Terminal UI using ratatui
//!
//! Thin layer responsible only for terminal I/O. It hosts the modal dialog:
//! reads keys, hands dialog events to the controller and draws its state.

pub mod theme;
pub mod widgets;

use crate::constants::FRAME_DURATION_MS;
use crate::dialog::input::translate_key;
use crate::dialog::{
    DialogOwner, DialogResult, EditAction, Event as DialogEvent, Flow, HelpTopic, HostDialog,
    ModalHost,
};
use crate::error::{DialogError, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{debug, info, warn};
use widgets::{help::HelpPopup, host::HostDialogWidget};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Map io::Error to DialogError::Terminal
fn map_io_err(e: io::Error) -> DialogError {
    DialogError::Terminal { source: e }
}

/// Modal host drawing the dialog in the terminal
#[derive(Default)]
pub struct TerminalHost {
    help: Option<HelpTopic>,
    clipboard: Option<arboard::Clipboard>,
}

impl TerminalHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn setup() -> Result<Tui> {
        enable_raw_mode().map_err(map_io_err)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(map_io_err)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(map_io_err)
    }

    fn restore(terminal: &mut Tui) -> Result<()> {
        disable_raw_mode().map_err(map_io_err)?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(map_io_err)?;
        terminal.show_cursor().map_err(map_io_err)?;
        Ok(())
    }

    fn event_loop(&mut self, terminal: &mut Tui, dialog: &mut HostDialog<'_>) -> Result<DialogResult> {
        loop {
            let help = self.help;
            terminal
                .draw(|f| draw(f, &*dialog, help))
                .map_err(map_io_err)?;

            if !event::poll(Duration::from_millis(FRAME_DURATION_MS)).map_err(map_io_err)? {
                continue;
            }
            let key = match event::read().map_err(map_io_err)? {
                Event::Key(key) if key.kind == KeyEventKind::Press => key,
                _ => continue,
            };

            // Any key closes the help overlay
            if self.help.take().is_some() {
                continue;
            }

            let Some(event) = self.translate(key, dialog) else {
                continue;
            };
            if let Flow::End(result) = dialog.handle(event, self) {
                return Ok(result);
            }
        }
    }

    fn translate(&mut self, key: KeyEvent, dialog: &HostDialog<'_>) -> Option<DialogEvent> {
        let focus = dialog.focus();
        let paste = key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('v'))
            && focus.kind().is_editable();
        if paste {
            return self
                .clipboard_text()
                .map(|text| DialogEvent::Edit(focus, EditAction::Paste(text)));
        }
        translate_key(key, focus)
    }

    fn clipboard_text(&mut self) -> Option<String> {
        if self.clipboard.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    warn!("Clipboard unavailable: {}", e);
                    return None;
                }
            }
        }
        let clipboard = self.clipboard.as_mut()?;
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("Nothing to paste: {}", e);
                None
            }
        }
    }
}

impl DialogOwner for TerminalHost {
    fn post_help(&mut self, topic: HelpTopic) {
        info!("Help requested: {:?}", topic);
        self.help = Some(topic);
    }
}

impl ModalHost for TerminalHost {
    fn run_modal(&mut self, dialog: &mut HostDialog<'_>) -> Result<DialogResult> {
        let mut terminal = Self::setup()?;
        let result = self.event_loop(&mut terminal, dialog);
        // Restore even when the loop failed
        let restored = Self::restore(&mut terminal);
        let result = result?;
        restored?;
        Ok(result)
    }
}

fn draw(frame: &mut Frame, dialog: &HostDialog<'_>, help: Option<HelpTopic>) {
    let area = frame.area();
    frame.render_widget(HostDialogWidget::new(dialog), area);

    // Help overlay (rendered on top)
    if let Some(topic) = help {
        frame.render_widget(HelpPopup::new(topic), area);
    }
}
