use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::theme;

pub struct IntroView;

impl IntroView {
    pub fn render(frame: &mut Frame, area: Rect) {
        let theme = theme::current();

        let block = Block::default()
            .title(" dday-tui ")
            .title_style(theme.header)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  A calendar and the time that remains.",
                theme.header,
            )),
            Line::from(""),
            Line::from("  Keep per-day to-do counts on a month calendar, count"),
            Line::from("  down to a chosen date, and follow the clock in other"),
            Line::from("  timezones."),
            Line::from(""),
            Line::from(vec![
                Span::styled("  2", theme.clock),
                Span::raw("  Calendar"),
            ]),
            Line::from(vec![
                Span::styled("  3", theme.clock),
                Span::raw("  D-day countdown and world clock"),
            ]),
            Line::from(""),
            Line::from(Span::styled("  Press ? for all keybindings.", theme.dim)),
        ];

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
