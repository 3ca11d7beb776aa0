use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Wait up to `timeout` for a key press. Non-key events (resize, mouse) are
/// drained and ignored.
pub fn next_key_event(timeout: Duration) -> color_eyre::Result<Option<KeyEvent>> {
    loop {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(key)),
            _ => continue,
        }
    }
}

/// A cancellable periodic deadline, polled from the event loop. Owning views
/// hold one while active and drop it on deactivation, which is all the
/// cancellation there is.
pub struct Ticker {
    period: Duration,
    next: Instant,
}

impl Ticker {
    /// Fires immediately on the first poll, then once per period.
    pub fn every(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now(),
        }
    }

    pub fn poll(&mut self) -> bool {
        let now = Instant::now();
        if now >= self.next {
            self.next = now + self.period;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_fires_immediately_then_waits() {
        let mut ticker = Ticker::every(Duration::from_secs(60));
        assert!(ticker.poll());
        assert!(!ticker.poll());
    }

    #[test]
    fn ticker_fires_after_period_elapses() {
        let mut ticker = Ticker::every(Duration::from_millis(0));
        assert!(ticker.poll());
        assert!(ticker.poll());
    }
}
