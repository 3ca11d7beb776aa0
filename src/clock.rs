use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Zones offered in the picker, label first.
pub const ZONES: [(&str, &str); 7] = [
    ("Seoul", "Asia/Seoul"),
    ("New York", "America/New_York"),
    ("London", "Europe/London"),
    ("Paris", "Europe/Paris"),
    ("Sydney", "Australia/Sydney"),
    ("Dubai", "Asia/Dubai"),
    ("Tokyo", "Asia/Tokyo"),
];

pub const DEFAULT_ZONE: &str = "America/New_York";

/// All offsets are reported relative to Seoul time.
pub const REFERENCE_ZONE: Tz = chrono_tz::Asia::Seoul;

/// Live wall clock for one selected zone. Holds the last rendered strings so
/// a failing tick can leave the previous reading on screen.
pub struct WorldClock {
    zone_id: String,
    time_display: String,
    offset_display: String,
}

impl WorldClock {
    pub fn new() -> Self {
        Self {
            zone_id: DEFAULT_ZONE.to_string(),
            time_display: String::new(),
            offset_display: String::new(),
        }
    }

    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    pub fn time_display(&self) -> &str {
        &self.time_display
    }

    pub fn offset_display(&self) -> &str {
        &self.offset_display
    }

    /// Switch the selected zone. The display catches up on the next tick.
    pub fn set_zone(&mut self, id: &str) {
        self.zone_id = id.to_string();
    }

    /// Re-render both readouts for `now`. A zone id that does not parse skips
    /// the update and leaves the previous readings in place.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        let zone: Tz = match self.zone_id.parse() {
            Ok(zone) => zone,
            Err(err) => {
                tracing::warn!(zone = %self.zone_id, error = %err, "skipping clock tick");
                return;
            }
        };

        self.time_display = now.with_timezone(&zone).format("%I:%M:%S %p").to_string();
        self.offset_display = format!("{} h from Seoul", offset_label(zone, now));
    }
}

/// Signed fractional-hour difference between `zone` and the reference zone at
/// `now`, formatted to one decimal with an explicit `+` when non-negative.
pub fn offset_label(zone: Tz, now: DateTime<Utc>) -> String {
    let diff = zone_offset_hours(zone, now) - zone_offset_hours(REFERENCE_ZONE, now);
    let sign = if diff >= 0.0 { "+" } else { "" };
    format!("{}{:.1}", sign, diff)
}

fn zone_offset_hours(zone: Tz, now: DateTime<Utc>) -> f64 {
    let offset = zone.offset_from_utc_datetime(&now.naive_utc()).fix();
    f64::from(offset.local_minus_utc()) / 3600.0
}
