use chrono::{Duration, NaiveDateTime};

const MIN_PIXELS_PER_DAY: f32 = 4.0;
const MAX_PIXELS_PER_DAY: f32 = 160.0;

/// Maps the visible time range of the chart onto horizontal pixels.
#[derive(Debug, Clone)]
pub struct TimelineViewport {
    /// Time at the left edge.
    pub start: NaiveDateTime,
    /// Time at the right edge.
    pub end: NaiveDateTime,
    /// Pixels per day (controls zoom level).
    pub pixels_per_day: f32,
}

impl TimelineViewport {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            pixels_per_day: 40.0,
        }
    }

    /// Fit a project span with one day of margin on each side.
    pub fn around(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self::new(start - Duration::days(1), end + Duration::days(1))
    }

    /// Convert a point in time to an x-pixel offset from the viewport start.
    pub fn time_to_x(&self, time: NaiveDateTime) -> f32 {
        let minutes = (time - self.start).num_minutes() as f32;
        minutes / (24.0 * 60.0) * self.pixels_per_day
    }

    /// Total width in pixels for the visible range.
    pub fn total_width(&self) -> f32 {
        self.time_to_x(self.end)
    }

    /// Whole days covered by the viewport.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn zoom_in(&mut self) {
        self.pixels_per_day = (self.pixels_per_day * 1.2).min(MAX_PIXELS_PER_DAY);
    }

    pub fn zoom_out(&mut self) {
        self.pixels_per_day = (self.pixels_per_day / 1.2).max(MIN_PIXELS_PER_DAY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::datetime::parse_datetime;

    #[test]
    fn maps_time_linearly() {
        let vp = TimelineViewport::new(
            parse_datetime("20250101+0000").unwrap(),
            parse_datetime("20250111+0000").unwrap(),
        );
        assert_eq!(vp.time_to_x(parse_datetime("20250101+1200").unwrap()), 20.0);
        assert_eq!(vp.total_width(), 400.0);
        assert_eq!(vp.days(), 10);
    }

    #[test]
    fn zoom_is_clamped() {
        let t = parse_datetime("20250101+0000").unwrap();
        let mut vp = TimelineViewport::around(t, t);
        for _ in 0..50 {
            vp.zoom_in();
        }
        assert_eq!(vp.pixels_per_day, MAX_PIXELS_PER_DAY);
        for _ in 0..100 {
            vp.zoom_out();
        }
        assert_eq!(vp.pixels_per_day, MIN_PIXELS_PER_DAY);
    }
}
