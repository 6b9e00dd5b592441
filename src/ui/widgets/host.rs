//! Host dialog popup widget
//!
//! Renders the dialog centered over the owner area:
//! - TCP/IP radio with host, Telnet, port and protocol fields
//! - Serial radio with the port list
//! - OK / Cancel / Help buttons

use super::centered;
use crate::constants::{DIALOG_HEIGHT, DIALOG_WIDTH, EDIT_BOX_WIDTH};
use crate::dialog::{ComboBox, ConnectionKind, ControlId, HostDialog, TextField};
use crate::ui::theme::{
    style_cursor, style_focus, style_title, COLOR_BORDER, STYLE_BRIGHT, STYLE_DISABLED,
    STYLE_KEY, STYLE_LABEL, STYLE_MUTED, STYLE_VALUE, SYMBOL_CHECK_OFF, SYMBOL_CHECK_ON,
    SYMBOL_FOCUS, SYMBOL_LIST_NEXT, SYMBOL_LIST_PREV, SYMBOL_NO_FOCUS, SYMBOL_RADIO_OFF,
    SYMBOL_RADIO_ON,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

const LABEL_WIDTH: usize = 12;
const INDENT: &str = "      ";

/// Host dialog popup
pub struct HostDialogWidget<'a, 'd> {
    dialog: &'a HostDialog<'d>,
}

impl<'a, 'd> HostDialogWidget<'a, 'd> {
    pub fn new(dialog: &'a HostDialog<'d>) -> Self {
        Self { dialog }
    }

    /// Popup area centered over the owner area
    pub fn area(owner: Rect) -> Rect {
        centered(owner, DIALOG_WIDTH, DIALOG_HEIGHT)
    }

    fn focused(&self, id: ControlId) -> bool {
        self.dialog.focus() == id
    }

    fn style_for(&self, id: ControlId, base: Style) -> Style {
        if !self.dialog.is_enabled(id) {
            STYLE_DISABLED
        } else if self.focused(id) {
            style_focus()
        } else {
            base
        }
    }

    fn marker(&self, id: ControlId) -> Span<'static> {
        if self.focused(id) {
            Span::styled(SYMBOL_FOCUS, style_focus())
        } else {
            Span::raw(SYMBOL_NO_FOCUS)
        }
    }

    fn label(&self, id: ControlId) -> Span<'static> {
        let text = format!("{:<width$}", self.dialog.texts().label(id), width = LABEL_WIDTH);
        Span::styled(text, self.style_for(id, STYLE_LABEL))
    }

    fn radio_line(&self, id: ControlId, kind: ConnectionKind) -> Line<'static> {
        let symbol = if self.dialog.connection() == kind {
            SYMBOL_RADIO_ON
        } else {
            SYMBOL_RADIO_OFF
        };
        Line::from(vec![
            self.marker(id),
            Span::styled(
                format!("{} {}", symbol, self.dialog.texts().label(id)),
                self.style_for(id, STYLE_BRIGHT),
            ),
        ])
    }

    fn edit_line(&self, label: ControlId, id: ControlId, field: &TextField) -> Line<'static> {
        let mut spans = vec![
            self.marker(id),
            Span::raw(INDENT),
            self.label(label),
        ];
        spans.extend(edit_spans(
            field,
            self.focused(id),
            self.dialog.is_enabled(id),
        ));
        Line::from(spans)
    }

    fn list_line(&self, label: ControlId, id: ControlId, list: &ComboBox) -> Line<'static> {
        let value = list
            .selected_item()
            .map(|item| item.label.clone())
            .unwrap_or_default();
        let style = self.style_for(id, STYLE_VALUE);
        Line::from(vec![
            self.marker(id),
            Span::raw(INDENT),
            self.label(label),
            Span::styled(SYMBOL_LIST_PREV, style),
            Span::styled(value, style),
            Span::styled(SYMBOL_LIST_NEXT, style),
        ])
    }

    fn telnet_line(&self) -> Line<'static> {
        let symbol = if self.dialog.telnet() {
            SYMBOL_CHECK_ON
        } else {
            SYMBOL_CHECK_OFF
        };
        Line::from(vec![
            self.marker(ControlId::Telnet),
            Span::raw(INDENT),
            Span::raw(" ".repeat(LABEL_WIDTH)),
            Span::styled(
                format!("{} {}", symbol, self.dialog.texts().label(ControlId::Telnet)),
                self.style_for(ControlId::Telnet, STYLE_VALUE),
            ),
        ])
    }

    fn button_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw("       ")];
        for id in [ControlId::Ok, ControlId::Cancel, ControlId::Help] {
            spans.push(Span::styled(
                format!("[ {} ]", self.dialog.texts().label(id)),
                self.style_for(id, STYLE_BRIGHT),
            ));
            spans.push(Span::raw("   "));
        }
        Line::from(spans)
    }
}

/// Visible part of an edit box, scrolled to keep the cursor in view
fn edit_spans(field: &TextField, focused: bool, enabled: bool) -> Vec<Span<'static>> {
    let width = EDIT_BOX_WIDTH.min(field.max_chars() + 1);
    let chars: Vec<char> = field.text().chars().collect();
    let cursor = field.cursor().min(chars.len());
    let start = if focused {
        (cursor + 1).saturating_sub(width)
    } else {
        0
    };
    let end = (start + width).min(chars.len());
    let style = if enabled { STYLE_VALUE } else { STYLE_DISABLED };

    let mut spans = vec![Span::styled("[", STYLE_MUTED)];
    if focused && enabled {
        let before: String = chars[start..cursor].iter().collect();
        let under = chars.get(cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".into());
        let after: String = chars[(cursor + 1).min(end)..end].iter().collect();
        let used = before.chars().count() + 1 + after.chars().count();
        spans.push(Span::styled(before, STYLE_BRIGHT));
        spans.push(Span::styled(under, style_cursor()));
        spans.push(Span::styled(after, STYLE_BRIGHT));
        spans.push(Span::raw(" ".repeat(width.saturating_sub(used))));
    } else {
        let visible: String = chars[start..end].iter().collect();
        let pad = width.saturating_sub(end - start);
        spans.push(Span::styled(visible, style));
        spans.push(Span::raw(" ".repeat(pad)));
    }
    spans.push(Span::styled("]", STYLE_MUTED));
    spans
}

impl Widget for HostDialogWidget<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = Self::area(area);
        Clear.render(popup_area, buf);

        let hint = Line::from(vec![
            Span::styled("  Tab", STYLE_KEY),
            Span::styled(" move  ", STYLE_MUTED),
            Span::styled("Space", STYLE_KEY),
            Span::styled(" select  ", STYLE_MUTED),
            Span::styled("Enter", STYLE_KEY),
            Span::styled(" OK  ", STYLE_MUTED),
            Span::styled("Esc", STYLE_KEY),
            Span::styled(" cancel  ", STYLE_MUTED),
            Span::styled("F1", STYLE_KEY),
            Span::styled(" help", STYLE_MUTED),
        ]);

        let content = vec![
            Line::from(""),
            self.radio_line(ControlId::TcpIp, ConnectionKind::TcpIp),
            self.edit_line(
                ControlId::HostNameLabel,
                ControlId::HostName,
                self.dialog.host_name(),
            ),
            self.telnet_line(),
            self.edit_line(
                ControlId::TcpPortLabel,
                ControlId::TcpPort,
                self.dialog.tcp_port(),
            ),
            self.list_line(
                ControlId::ProtocolLabel,
                ControlId::Protocol,
                self.dialog.protocol(),
            ),
            Line::from(""),
            self.radio_line(ControlId::Serial, ConnectionKind::Serial),
            self.list_line(ControlId::ComLabel, ControlId::Com, self.dialog.com()),
            Line::from(""),
            self.button_line(),
            hint,
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::new().fg(COLOR_BORDER))
            .title(Span::styled(
                format!(" {} ", self.dialog.texts().title()),
                style_title(),
            ))
            .title_alignment(Alignment::Center);

        Paragraph::new(content).block(block).render(popup_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{DialogServices, EditAction};
    use crate::error::Result;
    use crate::history::{HistorySource, HostHistory};
    use crate::i18n::LanguageFile;
    use crate::request::HostConnectionRequest;
    use crate::serial::{PortEnumerator, PortUsage, SerialPortDescriptor};
    use crate::ui::theme::{COLOR_BRIGHT, COLOR_DISABLED};

    struct NoPorts;

    impl PortEnumerator for NoPorts {
        fn enumerate(&self) -> Result<Vec<SerialPortDescriptor>> {
            Ok(Vec::new())
        }
    }

    struct Idle;

    impl PortUsage for Idle {
        fn is_in_use(&self, _port_number: u32) -> bool {
            false
        }
    }

    struct NoHistory;

    impl HostHistory for NoHistory {
        fn load(&self, _source: &HistorySource) -> Vec<String> {
            Vec::new()
        }
    }

    /// Row containing `needle` and the column where it starts
    fn find(buf: &Buffer, needle: &str) -> (u16, u16) {
        let area = buf.area;
        let width = needle.chars().count();
        for y in area.top()..area.bottom() {
            let symbols: Vec<&str> = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            for start in 0..symbols.len().saturating_sub(width - 1) {
                if symbols[start..start + width].concat() == needle {
                    return (area.left() + start as u16, y);
                }
            }
        }
        panic!("{:?} not rendered", needle);
    }

    fn row(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.left()..area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_render_without_ports_dims_serial_side() {
        let (ports, usage, history) = (NoPorts, Idle, NoHistory);
        let language = LanguageFile::builtin();
        let services = DialogServices {
            ports: &ports,
            usage: &usage,
            history: &history,
            language: &language,
        };
        let mut request = HostConnectionRequest {
            host_name: "example.com".into(),
            ..Default::default()
        };
        let dialog = HostDialog::initialize(&mut request, &services);

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        HostDialogWidget::new(&dialog).render(area, &mut buf);

        let (x, y) = find(&buf, "Serial");
        assert_eq!(buf[(x, y)].fg, COLOR_DISABLED);
        assert!(!row(&buf, y).contains(SYMBOL_FOCUS));

        let (x, y) = find(&buf, "Port:");
        assert_eq!(buf[(x, y)].fg, COLOR_DISABLED);

        let (x, y) = find(&buf, "TCP/IP");
        assert_eq!(buf[(x, y)].fg, COLOR_BRIGHT);

        let (_, y) = find(&buf, "Host:");
        let host_row = row(&buf, y);
        assert!(host_row.contains(SYMBOL_FOCUS));
        assert!(host_row.contains("example.com"));
    }

    fn rendered(spans: &[Span<'_>]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_edit_spans_pads_short_text() {
        let mut field = TextField::new(5);
        field.set_text("22");
        let text = rendered(&edit_spans(&field, false, true));
        assert_eq!(text, "[22    ]");
    }

    #[test]
    fn test_edit_spans_focused_shows_cursor_cell() {
        let mut field = TextField::new(5);
        field.set_text("22");
        field.apply(&EditAction::Home);
        let spans = edit_spans(&field, true, true);
        assert_eq!(rendered(&spans), "[22    ]");
        assert_eq!(spans[2].content, "2");
    }

    #[test]
    fn test_edit_spans_scrolls_long_text() {
        let mut field = TextField::new(100);
        field.set_text(&"x".repeat(50));
        let text = rendered(&edit_spans(&field, true, true));
        // box width stays fixed while the cursor is at the end
        assert_eq!(text.chars().count(), EDIT_BOX_WIDTH + 2);
    }
}
