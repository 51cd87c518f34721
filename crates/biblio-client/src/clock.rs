//! Wall-clock implementation of the core [`Clock`] seam.

use biblio_core::Clock;
use chrono::Datelike;

/// Reads the current year from UTC wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        chrono::Utc::now().year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_post_2020() {
        // Sanity bound rather than an exact value; exact years belong to
        // FixedClock-driven tests.
        assert!(SystemClock.current_year() > 2020);
    }
}
