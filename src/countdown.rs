use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};

pub const MSG_IDLE: &str = "Pick a target date.";
pub const MSG_EXPIRED: &str = "The selected date has passed.";
pub const MSG_STOPPED: &str = "Countdown stopped.";

/// Accepted spellings for the target instant, tried in order.
const TARGET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Idle,
    Running,
    Expired,
    Stopped,
}

/// D-day countdown. Recomputed once per tick while `Running`; every other
/// state ignores ticks entirely, so a stopped or expired countdown can never
/// change again until a new target is set.
pub struct Countdown {
    state: CountdownState,
    target: Option<DateTime<Local>>,
    display: String,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            state: CountdownState::Idle,
            target: None,
            display: MSG_IDLE.to_string(),
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn target(&self) -> Option<DateTime<Local>> {
        self.target
    }

    pub fn is_ticking(&self) -> bool {
        self.state == CountdownState::Running
    }

    /// Parse a target and start running. Unparseable input leaves the current
    /// state untouched; the caller surfaces nothing.
    pub fn set_target(&mut self, input: &str) {
        match parse_target(input) {
            Some(target) => {
                self.target = Some(target);
                self.state = CountdownState::Running;
            }
            None => {
                tracing::debug!(input, "ignoring unparseable countdown target");
            }
        }
    }

    pub fn tick(&mut self, now: DateTime<Local>) {
        if self.state != CountdownState::Running {
            return;
        }
        let target = match self.target {
            Some(target) => target,
            None => return,
        };
        let remaining = target.signed_duration_since(now);
        if remaining <= Duration::zero() {
            self.state = CountdownState::Expired;
            self.display = MSG_EXPIRED.to_string();
        } else {
            let (days, hours, minutes, seconds) = decompose(remaining);
            self.display = format!("D- {}d {}h {}m {}s", days, hours, minutes, seconds);
        }
    }

    pub fn stop(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Stopped;
            self.display = MSG_STOPPED.to_string();
        }
    }
}

fn parse_target(input: &str) -> Option<DateTime<Local>> {
    let token = input.trim();
    if token.is_empty() {
        return None;
    }

    let naive: NaiveDateTime = TARGET_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(token, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(token, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    // Ambiguous local times (DST fall-back) resolve to the earlier reading.
    Local.from_local_datetime(&naive).earliest()
}

/// Floor-decompose a positive duration into whole days, hours within the day,
/// minutes within the hour, and seconds within the minute.
pub fn decompose(remaining: Duration) -> (i64, i64, i64, i64) {
    let ms = remaining.num_milliseconds();
    let days = ms / 86_400_000;
    let hours = ms % 86_400_000 / 3_600_000;
    let minutes = ms % 3_600_000 / 60_000;
    let seconds = ms % 60_000 / 1_000;
    (days, hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .single()
            .expect("valid local datetime")
    }

    #[test]
    fn decomposes_one_of_each_unit() {
        // 90_061_000 ms is exactly 1 day, 1 hour, 1 minute, 1 second.
        let remaining = Duration::milliseconds(90_061_000);
        assert_eq!(decompose(remaining), (1, 1, 1, 1));
    }

    #[test]
    fn decompose_floors_fractional_seconds() {
        assert_eq!(decompose(Duration::milliseconds(999)), (0, 0, 0, 0));
        assert_eq!(decompose(Duration::milliseconds(1_000)), (0, 0, 0, 1));
    }

    #[test]
    fn running_countdown_renders_remaining() {
        // Mid-June: no host timezone has a DST transition inside the span,
        // so the remaining duration is the same wherever the test runs.
        let mut countdown = Countdown::new();
        countdown.set_target("2030-06-10 12:00");
        assert_eq!(countdown.state(), CountdownState::Running);

        countdown.tick(local(2030, 6, 9, 10, 58, 59));
        assert_eq!(countdown.display(), "D- 1d 1h 1m 1s");
    }

    #[test]
    fn past_target_expires_on_first_tick() {
        let mut countdown = Countdown::new();
        countdown.set_target("2020-01-01");
        assert_eq!(countdown.state(), CountdownState::Running);

        countdown.tick(local(2024, 6, 1, 0, 0, 0));
        assert_eq!(countdown.state(), CountdownState::Expired);
        assert_eq!(countdown.display(), MSG_EXPIRED);

        // Further ticks change nothing.
        countdown.tick(local(2025, 6, 1, 0, 0, 0));
        assert_eq!(countdown.display(), MSG_EXPIRED);
    }

    #[test]
    fn invalid_target_is_ignored() {
        let mut countdown = Countdown::new();
        countdown.set_target("not a date");
        assert_eq!(countdown.state(), CountdownState::Idle);
        assert_eq!(countdown.display(), MSG_IDLE);

        countdown.set_target("2030-13-40");
        assert_eq!(countdown.state(), CountdownState::Idle);
    }

    #[test]
    fn invalid_target_keeps_running_countdown() {
        let mut countdown = Countdown::new();
        countdown.set_target("2030-03-10");
        countdown.tick(local(2030, 3, 9, 0, 0, 0));
        let before = countdown.display().to_string();

        countdown.set_target("garbage");
        assert_eq!(countdown.state(), CountdownState::Running);
        assert_eq!(countdown.display(), before);
    }

    #[test]
    fn stop_halts_further_ticking() {
        let mut countdown = Countdown::new();
        countdown.set_target("2030-03-10");
        countdown.tick(local(2030, 3, 1, 0, 0, 0));

        countdown.stop();
        assert_eq!(countdown.state(), CountdownState::Stopped);
        assert_eq!(countdown.display(), MSG_STOPPED);
        assert!(!countdown.is_ticking());

        // Time keeps advancing past the target; nothing changes.
        countdown.tick(local(2031, 1, 1, 0, 0, 0));
        assert_eq!(countdown.state(), CountdownState::Stopped);
        assert_eq!(countdown.display(), MSG_STOPPED);
    }

    #[test]
    fn stop_is_noop_outside_running() {
        let mut countdown = Countdown::new();
        countdown.stop();
        assert_eq!(countdown.state(), CountdownState::Idle);

        countdown.set_target("2020-01-01");
        countdown.tick(local(2024, 1, 1, 0, 0, 0));
        countdown.stop();
        assert_eq!(countdown.state(), CountdownState::Expired);
    }

    #[test]
    fn accepts_datetime_targets() {
        let mut countdown = Countdown::new();
        countdown.set_target("2030-03-10T06:30");
        assert_eq!(
            countdown.target(),
            Some(local(2030, 3, 10, 6, 30, 0))
        );

        countdown.set_target("2030-03-10 06:30");
        assert_eq!(
            countdown.target(),
            Some(local(2030, 3, 10, 6, 30, 0))
        );
    }
}
