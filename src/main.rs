mod app;
mod clock;
mod components;
mod countdown;
mod date;
mod event;
mod theme;
mod todo;
mod tui;

use std::time::Duration;

use app::{App, InputMode, Route};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let mut app = App::new()?;

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app);
    tui::restore()?;
    result
}

/// Logs go to a file in the data directory; stdout belongs to the TUI.
fn init_tracing() {
    let Some(dir) = dirs::data_dir().map(|d| d.join("dday-tui")) else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(dir.join("dday-tui.log")) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
}

fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.on_tick();

        terminal.draw(|frame| {
            let area = frame.area();

            let layout = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

            let content_area = layout[0];

            match app.route {
                Route::Intro => components::IntroView::render(frame, content_area),
                Route::Calendar => components::MonthView::render(
                    frame,
                    content_area,
                    app.year,
                    app.month,
                    app.cursor_day,
                    app.selected_key.as_deref(),
                    app.today,
                    &app.todos,
                ),
                Route::Dday => render_dday_layout(frame, content_area, app),
            }

            if app.show_help {
                render_help(frame, area);
            }

            render_status_bar(frame, layout[1], app);
        })?;

        if let Some(key) = event::next_key_event(Duration::from_millis(100))? {
            // Clear status message on any key
            app.status_message = None;

            // Help overlay takes priority
            if app.show_help {
                if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                    app.show_help = false;
                }
                continue;
            }

            match app.input_mode {
                InputMode::Normal => handle_normal_input(app, key.code, key.modifiers),
                _ => handle_line_input(app, key.code),
            }
        }
    }

    Ok(())
}

fn handle_normal_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        (KeyCode::Char('1'), _) => {
            app.open_route(Route::Intro);
            return;
        }
        (KeyCode::Char('2'), _) => {
            app.open_route(Route::Calendar);
            return;
        }
        (KeyCode::Char('3'), _) => {
            app.open_route(Route::Dday);
            return;
        }
        (KeyCode::Char('?'), _) => {
            app.show_help = true;
            return;
        }
        _ => {}
    }

    match app.route {
        Route::Intro => {}
        Route::Calendar => handle_calendar_input(app, code),
        Route::Dday => handle_dday_input(app, code),
    }
}

fn handle_calendar_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-7),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(7),
        KeyCode::Char('[') => app.change_month(-1),
        KeyCode::Char(']') => app.change_month(1),
        KeyCode::Char('t') => app.go_to_today(),
        KeyCode::Char('m') => enter_input(app, InputMode::MonthSelect),
        KeyCode::Enter | KeyCode::Char(' ') => app.select_cursor_day(),
        KeyCode::Char('a') => enter_input(app, InputMode::TodoInput),
        KeyCode::Char('x') => app.remove_last_todo(),
        _ => {}
    }
}

fn handle_dday_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('e') => enter_input(app, InputMode::TargetInput),
        KeyCode::Char('s') => app.stop_countdown(),
        KeyCode::Tab => app.cycle_zone(1),
        KeyCode::BackTab => app.cycle_zone(-1),
        _ => {}
    }
}

fn enter_input(app: &mut App, mode: InputMode) {
    app.input_mode = mode;
    app.input_buffer.clear();
}

fn handle_line_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.input_buffer.clear();
        }
        KeyCode::Enter => {
            let buffer = std::mem::take(&mut app.input_buffer);
            let mode = app.input_mode;
            app.input_mode = InputMode::Normal;
            match mode {
                InputMode::MonthSelect => {
                    if let Ok(month) = buffer.trim().parse::<u32>() {
                        app.set_month(month);
                    }
                }
                InputMode::TargetInput => app.submit_target(&buffer),
                InputMode::TodoInput => app.add_todo(&buffer),
                InputMode::Normal => {}
            }
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            // The month prompt only ever needs two digits.
            if app.input_mode == InputMode::MonthSelect
                && (!c.is_ascii_digit() || app.input_buffer.len() >= 2)
            {
                return;
            }
            app.input_buffer.push(c);
        }
        _ => {}
    }
}

fn render_dday_layout(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let target_input = if app.input_mode == InputMode::TargetInput {
        Some(app.input_buffer.as_str())
    } else {
        None
    };

    if area.width < 60 {
        let rows = Layout::vertical([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(area);
        components::CountdownView::render(frame, rows[0], &app.countdown, target_input);
        components::WorldClockView::render(frame, rows[1], &app.clock, app.zone_index);
    } else {
        let cols = Layout::horizontal([
            Constraint::Percentage(55),
            Constraint::Percentage(45),
        ])
        .split(area);
        components::CountdownView::render(frame, cols[0], &app.countdown, target_input);
        components::WorldClockView::render(frame, cols[1], &app.clock, app.zone_index);
    }
}

fn render_status_bar(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    use ratatui::text::{Line, Span};
    use ratatui::widgets::Paragraph;

    let theme = theme::current();
    let w = area.width as usize;

    let route_str = match app.route {
        Route::Intro => "[1]Intro",
        Route::Calendar => "[2]Calendar",
        Route::Dday => "[3]D-day",
    };

    let input_indicator = match app.input_mode {
        InputMode::Normal => String::new(),
        InputMode::MonthSelect => format!(" Month: {}_", app.input_buffer),
        InputMode::TargetInput => " [Target]".to_string(),
        InputMode::TodoInput => format!(" To-do: {}_", app.input_buffer),
    };

    // Show status message if present, otherwise show context-aware hints
    let right_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        match app.route {
            Route::Calendar if w >= 80 => {
                " hjkl:Nav [/]:Mon m:Goto t:Today Enter:Select a:Add x:Del ?:Help q:Quit"
                    .to_string()
            }
            Route::Calendar if w >= 50 => " arrows:Nav Enter:Select a:Add q:Quit".to_string(),
            Route::Dday if w >= 60 => {
                " e:Target s:Stop Tab:Zone ?:Help q:Quit".to_string()
            }
            _ => " ?:Help q:Quit".to_string(),
        }
    };

    let left = format!(" {}{} ", route_str, input_indicator);
    let padding_len = w.saturating_sub(left.len() + right_text.len());
    let padding = " ".repeat(padding_len);

    let line = Line::from(vec![
        Span::styled(left, theme.status),
        Span::styled(padding, theme.status),
        Span::styled(right_text, theme.status),
    ]);

    let bar = Paragraph::new(line).style(theme.status);
    frame.render_widget(bar, area);
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let theme = theme::current();

    let popup_w = area.width.min(50).max(30);
    let popup_h = area.height.min(20).max(12);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let lines = vec![
        Line::from(Span::styled("Pages", section_style)),
        Line::from(vec![
            Span::styled("  1/2/3     ", key_style),
            Span::raw("Intro / Calendar / D-day"),
        ]),
        Line::from(""),
        Line::from(Span::styled("Calendar", section_style)),
        Line::from(vec![
            Span::styled("  hjkl      ", key_style),
            Span::raw("Move the day cursor"),
        ]),
        Line::from(vec![
            Span::styled("  [/]       ", key_style),
            Span::raw("Previous/next month"),
        ]),
        Line::from(vec![
            Span::styled("  m         ", key_style),
            Span::raw("Jump to month (1-12)"),
        ]),
        Line::from(vec![
            Span::styled("  t         ", key_style),
            Span::raw("Jump to today"),
        ]),
        Line::from(vec![
            Span::styled("  Enter     ", key_style),
            Span::raw("Select the cursor day"),
        ]),
        Line::from(vec![
            Span::styled("  a / x     ", key_style),
            Span::raw("Add / remove a to-do"),
        ]),
        Line::from(""),
        Line::from(Span::styled("D-day", section_style)),
        Line::from(vec![
            Span::styled("  e         ", key_style),
            Span::raw("Set the countdown target"),
        ]),
        Line::from(vec![
            Span::styled("  s         ", key_style),
            Span::raw("Stop the countdown"),
        ]),
        Line::from(vec![
            Span::styled("  Tab       ", key_style),
            Span::raw("Switch world-clock timezone"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", theme.dim),
            Span::styled("Esc     ", key_style),
            Span::raw("Quit / close popup"),
        ]),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
