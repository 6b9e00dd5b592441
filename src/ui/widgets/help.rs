//! Help overlay shown when the dialog posts a help request

use super::centered;
use crate::dialog::HelpTopic;
use crate::ui::theme::{style_title, COLOR_BORDER, STYLE_KEY, STYLE_MUTED, STYLE_VALUE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

const KEYS: [(&str, &str); 8] = [
    ("Tab / S-Tab", "next / previous control"),
    ("Space", "select radio, toggle Telnet, press button"),
    ("Up / Down", "host history, protocol and port lists"),
    ("C-a C-e", "start / end of line"),
    ("C-k C-u", "delete to end / start of line"),
    ("C-v", "paste"),
    ("Enter", "OK"),
    ("Esc", "Cancel"),
];

pub struct HelpPopup {
    topic: HelpTopic,
}

impl HelpPopup {
    pub fn new(topic: HelpTopic) -> Self {
        Self { topic }
    }

    fn intro(&self) -> &'static str {
        match self.topic {
            HelpTopic::NewConnection => {
                "Choose TCP/IP to connect to a host, or Serial to open a local port. \
                 Ports already used by another session are not listed. With Telnet \
                 checked the port is reset to the Telnet default."
            }
        }
    }
}

impl Widget for HelpPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered(area, 60, 17);
        Clear.render(popup_area, buf);

        let mut content = vec![
            Line::from(Span::styled(self.intro(), STYLE_VALUE)),
            Line::from(""),
        ];
        for (key, action) in KEYS {
            content.push(Line::from(vec![
                Span::styled(format!("  {:<13}", key), STYLE_KEY),
                Span::styled(action, STYLE_MUTED),
            ]));
        }
        content.push(Line::from(""));
        content.push(Line::from(Span::styled("  Press any key", STYLE_MUTED)));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::new().fg(COLOR_BORDER))
            .title(Span::styled(" Help: New connection ", style_title()))
            .title_alignment(Alignment::Center);

        Paragraph::new(content)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(popup_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_renders_title_and_keys() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        HelpPopup::new(HelpTopic::NewConnection).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Help: New connection"));
        assert!(text.contains("Esc"));
    }
}
