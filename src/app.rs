use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate, Utc};
use color_eyre::Result;

use crate::clock::{WorldClock, DEFAULT_ZONE, ZONES};
use crate::countdown::Countdown;
use crate::date::{self, date_key};
use crate::event::Ticker;
use crate::todo::{TodoEntry, TodoMap, TodoStore};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// The three navigable pages. Calendar carries its `(year, month)` parameters
/// in `App::year` / `App::month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Intro,
    Calendar,
    Dday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a month number 1-12.
    MonthSelect,
    /// Typing a countdown target date.
    TargetInput,
    /// Typing a new to-do for the cursor day.
    TodoInput,
}

pub struct App {
    pub running: bool,
    pub route: Route,
    pub year: i32,
    pub month: u32,
    /// Day the calendar cursor is on, always 1..=days_in_month.
    pub cursor_day: u32,
    pub selected_key: Option<String>,
    pub today: NaiveDate,
    pub todos: TodoMap,
    pub countdown: Countdown,
    pub clock: WorldClock,
    pub zone_index: usize,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub status_message: Option<String>,
    pub show_help: bool,
    store: TodoStore,
    clock_ticker: Option<Ticker>,
    countdown_ticker: Option<Ticker>,
}

impl App {
    pub fn new() -> Result<Self> {
        Ok(Self::with_store(TodoStore::new()?))
    }

    pub fn with_store(store: TodoStore) -> Self {
        let today = Local::now().date_naive();
        let todos = store.load();
        let zone_index = ZONES
            .iter()
            .position(|(_, id)| *id == DEFAULT_ZONE)
            .unwrap_or(0);

        Self {
            running: true,
            route: Route::Intro,
            year: today.year(),
            month: today.month(),
            cursor_day: today.day(),
            selected_key: None,
            today,
            todos,
            countdown: Countdown::new(),
            clock: WorldClock::new(),
            zone_index,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            status_message: None,
            show_help: false,
            store,
            clock_ticker: None,
            countdown_ticker: None,
        }
    }

    /// Navigate. Entering the D-day page acquires its tickers; leaving it
    /// drops them, which cancels the periodic recompute outright.
    pub fn open_route(&mut self, route: Route) {
        if self.route == route {
            return;
        }
        self.route = route;
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();

        if route == Route::Dday {
            self.clock_ticker = Some(Ticker::every(TICK_PERIOD));
            if self.countdown.is_ticking() {
                self.countdown_ticker = Some(Ticker::every(TICK_PERIOD));
            }
        } else {
            self.clock_ticker = None;
            self.countdown_ticker = None;
        }
    }

    /// Drive whichever periodic tasks are live. Called every pass of the
    /// event loop; the tickers gate the actual 1 s recomputes.
    pub fn on_tick(&mut self) {
        if let Some(ticker) = self.clock_ticker.as_mut() {
            if ticker.poll() {
                self.clock.tick(Utc::now());
            }
        }
        if let Some(ticker) = self.countdown_ticker.as_mut() {
            if ticker.poll() {
                self.countdown.tick(Local::now());
                if !self.countdown.is_ticking() {
                    self.countdown_ticker = None;
                }
            }
        }
    }

    // ── Calendar ──

    pub fn select_day(&mut self, day: u32) {
        self.selected_key = Some(date_key(self.year, self.month, day));
    }

    pub fn select_cursor_day(&mut self) {
        self.select_day(self.cursor_day);
    }

    pub fn cursor_key(&self) -> String {
        date_key(self.year, self.month, self.cursor_day)
    }

    pub fn change_month(&mut self, delta: i32) {
        let (year, month) = date::shift_month(self.year, self.month, delta);
        self.year = year;
        self.month = month;
        self.cursor_day = self.cursor_day.min(date::days_in_month(year, month));
    }

    /// The month-select input: out-of-range numbers are ignored.
    pub fn set_month(&mut self, month: u32) {
        if (1..=12).contains(&month) {
            self.month = month;
            self.cursor_day = self.cursor_day.min(date::days_in_month(self.year, month));
        }
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let days = date::days_in_month(self.year, self.month) as i32;
        let day = (self.cursor_day as i32 + delta).clamp(1, days);
        self.cursor_day = day as u32;
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.year = self.today.year();
        self.month = self.today.month();
        self.cursor_day = self.today.day();
    }

    pub fn count_for(&self, day: u32) -> usize {
        self.todos
            .get(&date_key(self.year, self.month, day))
            .map_or(0, Vec::len)
    }

    // ── To-do mutation ──

    pub fn add_todo(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.todos
            .entry(self.cursor_key())
            .or_default()
            .push(TodoEntry::new(text));
        self.persist();
    }

    pub fn remove_last_todo(&mut self) {
        let key = self.cursor_key();
        let emptied = match self.todos.get_mut(&key) {
            Some(entries) => {
                entries.pop();
                entries.is_empty()
            }
            None => return,
        };
        if emptied {
            self.todos.remove(&key);
        }
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(err) = self.store.save(&self.todos) {
            tracing::error!(error = %err, "failed to persist todos");
            self.status_message = Some("Could not save to-dos".to_string());
        }
    }

    // ── D-day ──

    pub fn submit_target(&mut self, input: &str) {
        self.countdown.set_target(input);
        if self.countdown.is_ticking() {
            self.countdown_ticker = Some(Ticker::every(TICK_PERIOD));
        }
    }

    pub fn stop_countdown(&mut self) {
        self.countdown.stop();
        self.countdown_ticker = None;
    }

    pub fn cycle_zone(&mut self, delta: i32) {
        let len = ZONES.len() as i32;
        self.zone_index = (self.zone_index as i32 + delta).rem_euclid(len) as usize;
        self.clock.set_zone(ZONES[self.zone_index].1);
        tracing::debug!(zone = self.clock.zone_id(), "world clock zone switched");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(dir: &tempfile::TempDir) -> App {
        App::with_store(TodoStore::with_path(dir.path().join("todos.json")))
    }

    #[test]
    fn change_month_is_an_inverse_pair() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(&dir);
        app.year = 2024;
        app.month = 12;
        app.cursor_day = 15;

        app.change_month(1);
        assert_eq!((app.year, app.month), (2025, 1));
        app.change_month(-1);
        assert_eq!((app.year, app.month), (2024, 12));

        app.change_month(-12);
        assert_eq!((app.year, app.month), (2023, 12));
        app.change_month(12);
        assert_eq!((app.year, app.month), (2024, 12));
    }

    #[test]
    fn change_month_clamps_cursor_to_shorter_month() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(&dir);
        app.year = 2024;
        app.month = 1;
        app.cursor_day = 31;

        app.change_month(1);
        assert_eq!(app.cursor_day, 29);
    }

    #[test]
    fn selecting_a_day_twice_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(&dir);
        app.year = 2024;
        app.month = 10;

        app.select_day(3);
        assert_eq!(app.selected_key.as_deref(), Some("2024-10-3"));
        app.select_day(3);
        assert_eq!(app.selected_key.as_deref(), Some("2024-10-3"));
    }

    #[test]
    fn set_month_rejects_out_of_range() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(&dir);
        app.month = 7;

        app.set_month(0);
        assert_eq!(app.month, 7);
        app.set_month(13);
        assert_eq!(app.month, 7);
        app.set_month(2);
        assert_eq!(app.month, 2);
    }

    #[test]
    fn add_todo_persists_and_reloads() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(&dir);
        app.year = 2024;
        app.month = 10;
        app.cursor_day = 3;

        app.add_todo("water plants");
        app.add_todo("  ");
        assert_eq!(app.count_for(3), 1);

        let reloaded = test_app(&dir);
        assert_eq!(reloaded.todos.get("2024-10-3").map(Vec::len), Some(1));
    }

    #[test]
    fn remove_last_todo_drops_empty_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(&dir);
        app.year = 2024;
        app.month = 10;
        app.cursor_day = 3;

        app.add_todo("one");
        app.remove_last_todo();
        assert!(app.todos.is_empty());

        // Removing from a day with no entries is a no-op.
        app.remove_last_todo();
        assert!(app.todos.is_empty());
    }

    #[test]
    fn count_uses_the_canonical_key() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(&dir);
        app.year = 2024;
        app.month = 3;
        app.cursor_day = 7;

        app.add_todo("entry");
        // A zero-padded variant of the same date must not create a second key.
        assert!(app.todos.contains_key("2024-3-7"));
        assert!(!app.todos.contains_key("2024-03-07"));
        assert_eq!(app.count_for(7), 1);
    }

    #[test]
    fn cycle_zone_wraps_both_ways() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(&dir);
        let start = app.zone_index;

        for _ in 0..ZONES.len() {
            app.cycle_zone(1);
        }
        assert_eq!(app.zone_index, start);

        app.cycle_zone(-1);
        assert_eq!(app.clock.zone_id(), ZONES[app.zone_index].1);
    }

    #[test]
    fn leaving_dday_cancels_tickers() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(&dir);

        app.open_route(Route::Dday);
        assert!(app.clock_ticker.is_some());
        app.submit_target("2099-01-01");
        assert!(app.countdown_ticker.is_some());

        app.open_route(Route::Calendar);
        assert!(app.clock_ticker.is_none());
        assert!(app.countdown_ticker.is_none());

        // Coming back re-acquires both; the countdown is still running.
        app.open_route(Route::Dday);
        assert!(app.clock_ticker.is_some());
        assert!(app.countdown_ticker.is_some());
    }

    #[test]
    fn stop_releases_the_countdown_ticker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = test_app(&dir);

        app.open_route(Route::Dday);
        app.submit_target("2099-01-01");
        app.stop_countdown();
        assert!(app.countdown_ticker.is_none());
        assert!(!app.countdown.is_ticking());
    }
}
