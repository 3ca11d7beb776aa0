use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::countdown::{Countdown, CountdownState};
use crate::theme;

pub struct CountdownView;

impl CountdownView {
    pub fn render(frame: &mut Frame, area: Rect, countdown: &Countdown, input: Option<&str>) {
        let theme = theme::current();

        let state_label = match countdown.state() {
            CountdownState::Idle => "idle",
            CountdownState::Running => "running",
            CountdownState::Expired => "expired",
            CountdownState::Stopped => "stopped",
        };

        let block = Block::default()
            .title(" D-day ")
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(
                format!(" {} ", state_label),
                theme.dim,
            )))
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines = vec![Line::from("")];

        match countdown.target() {
            Some(target) => lines.push(Line::from(vec![
                Span::styled("  Target  ", theme.dim),
                Span::raw(target.format("%Y-%m-%d %H:%M").to_string()),
            ])),
            None => lines.push(Line::from(Span::styled("  No target set", theme.dim))),
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", countdown.display()),
            theme.clock,
        )));
        lines.push(Line::from(""));

        if let Some(buffer) = input {
            lines.push(Line::from(vec![
                Span::styled("  Date: ", theme.header),
                Span::raw(buffer.to_string()),
                Span::styled("_", theme.header),
            ]));
            lines.push(Line::from(Span::styled(
                "  YYYY-MM-DD or YYYY-MM-DD HH:MM, Enter to start",
                theme.dim,
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "  e: set target   s: stop",
                theme.dim,
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
