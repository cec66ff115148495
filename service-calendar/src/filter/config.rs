//! Hour window configuration for the hour-of-day filter.

/// An hour-of-day window measured on the service day.
///
/// Hours may exceed 24 to reach into post-midnight service. Both bounds are
/// exclusive when filtering, so a window whose start is not before its end
/// selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourWindow {
    /// Arrivals must be strictly after this hour.
    pub start_hour: u32,

    /// Departures must be strictly before this hour.
    pub end_hour: u32,
}

impl HourWindow {
    /// Create a new window with the given bounds.
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Returns the lower bound in seconds.
    pub fn start_secs(&self) -> u64 {
        u64::from(self.start_hour) * 3600
    }

    /// Returns the upper bound in seconds.
    pub fn end_secs(&self) -> u64 {
        u64::from(self.end_hour) * 3600
    }

}

impl Default for HourWindow {
    fn default() -> Self {
        Self {
            start_hour: 0,
            end_hour: 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window() {
        let window = HourWindow::default();

        assert_eq!(window.start_hour, 0);
        assert_eq!(window.end_hour, 24);
        assert_eq!(window.end_secs(), 86400);
    }

    #[test]
    fn second_bounds() {
        let window = HourWindow::new(7, 26);

        assert_eq!(window.start_secs(), 25200);
        assert_eq!(window.end_secs(), 93600);
    }

    #[test]
    fn large_hours_do_not_overflow() {
        let window = HourWindow::new(0, u32::MAX);
        assert_eq!(window.end_secs(), u64::from(u32::MAX) * 3600);
    }
}
