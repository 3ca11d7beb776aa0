use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::clock::{WorldClock, ZONES};
use crate::theme;

pub struct WorldClockView;

impl WorldClockView {
    pub fn render(frame: &mut Frame, area: Rect, clock: &WorldClock, zone_index: usize) {
        let theme = theme::current();

        let block = Block::default()
            .title(" World Clock ")
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from("")];

        for (i, (label, _)) in ZONES.iter().enumerate() {
            let marker = if i == zone_index { "\u{25b8} " } else { "  " };
            let style = if i == zone_index {
                theme.header
            } else {
                theme.dim
            };
            lines.push(Line::from(Span::styled(
                format!("  {}{}", marker, label),
                style,
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", clock.time_display()),
            theme.clock,
        )));
        lines.push(Line::from(Span::raw(format!(
            "  {}",
            clock.offset_display()
        ))));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Tab / Shift-Tab: switch timezone",
            theme.dim,
        )));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
