use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::date::{date_key, month_grid};
use crate::theme;
use crate::todo::TodoMap;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 7;

pub struct MonthView;

impl MonthView {
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        year: i32,
        month: u32,
        cursor_day: u32,
        selected_key: Option<&str>,
        today: NaiveDate,
        todos: &TodoMap,
    ) {
        let theme = theme::current();

        let month_label = NaiveDate::from_ymd_opt(year, month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default();

        let footer = match selected_key {
            Some(key) => {
                let count = todos.get(key).map_or(0, Vec::len);
                format!(" Selected {}: {} to-do(s) ", key, count)
            }
            None => " No day selected ".to_string(),
        };

        let block = Block::default()
            .title(format!(" {} ", month_label))
            .title_style(theme.header)
            .title_bottom(Line::from(Span::styled(footer, theme.dim)))
            .borders(Borders::ALL)
            .border_style(theme.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Header row
        let header_cells: Vec<Span> = DAY_NAMES
            .iter()
            .map(|d| Span::styled(format!("{:^w$}", d, w = CELL_WIDTH), theme.header))
            .collect();
        let header = Line::from(header_cells);

        // Week rows from the flat cell sequence
        let cells = month_grid(year, month);
        let mut weeks: Vec<Line> = Vec::new();
        for chunk in cells.chunks(7) {
            let mut spans: Vec<Span> = Vec::new();
            for cell in chunk {
                match cell {
                    None => spans.push(Span::raw(" ".repeat(CELL_WIDTH))),
                    Some(day) => {
                        let day = *day;
                        let key = date_key(year, month, day);
                        let count = todos.get(&key).map_or(0, Vec::len);
                        let is_selected = selected_key == Some(key.as_str());
                        let is_today = today.year() == year
                            && today.month() == month
                            && today.day() == day;

                        let day_style = if is_selected {
                            theme.selected
                        } else if is_today {
                            theme.today
                        } else if day == cursor_day {
                            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                        } else {
                            Style::default()
                        };

                        spans.push(Span::styled(format!(" {:>2}", day), day_style));
                        if count > 0 {
                            spans.push(Span::styled(
                                format!("{:<4}", format!("({})", count)),
                                theme.badge,
                            ));
                        } else {
                            spans.push(Span::raw("    "));
                        }
                    }
                }
            }
            weeks.push(Line::from(spans));
        }

        // Layout: header + week rows
        let mut constraints = vec![Constraint::Length(1)];
        for _ in &weeks {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in weeks.iter().enumerate() {
            frame.render_widget(Paragraph::new(week.clone()), rows[i + 1]);
        }
    }
}
