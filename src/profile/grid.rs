//! Uniform time axis over a reporting window

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use super::error::ProfileError;

/// Default spacing between grid points, in minutes
pub const DEFAULT_RESOLUTION_MINUTES: u32 = 5;

/// An equally spaced sequence of timestamps `[t0, t0 + Δ, …, t1]`
///
/// The grid starts at midnight of the first date and ends at midnight of the
/// last date, both inclusive. Points are strictly increasing and `Δ` apart.
/// It is immutable once built, and only [`TimeGrid::build`] and
/// [`TimeGrid::between`] can make one. It serializes but cannot be read back:
///
/// ```compile_fail
/// let grid: pkprofile::profile::TimeGrid = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeGrid {
    start: NaiveDateTime,
    resolution_minutes: u32,
    len: usize,
}

impl TimeGrid {
    /// Build the grid spanning `from 00:00` to `to 00:00`
    ///
    /// `resolution_minutes` must be positive and divide 60 evenly, so that
    /// every hour starts on a grid point and minute-of-hour snapping always
    /// lands on the grid.
    ///
    /// # Errors
    /// - [`ProfileError::InvalidRange`] if `from > to`
    /// - [`ProfileError::InvalidParameter`] for a resolution of zero or one that
    ///   does not divide 60
    pub fn build(
        from: NaiveDate,
        to: NaiveDate,
        resolution_minutes: u32,
    ) -> Result<Self, ProfileError> {
        if from > to {
            return Err(ProfileError::InvalidRange { from, to });
        }
        Self::between(
            from.and_time(NaiveTime::MIN),
            to.and_time(NaiveTime::MIN),
            resolution_minutes,
        )
    }

    /// Build the grid from `start` to the last point at or before `end`
    ///
    /// The grid has `⌊(end - start) / Δ⌋ + 1` points. `start` must itself sit
    /// on a multiple of Δ past the hour with no seconds.
    ///
    /// # Errors
    /// - [`ProfileError::InvalidRange`] if `start > end`
    /// - [`ProfileError::InvalidParameter`] for an invalid resolution or a
    ///   misaligned `start`
    pub fn between(
        start: NaiveDateTime,
        end: NaiveDateTime,
        resolution_minutes: u32,
    ) -> Result<Self, ProfileError> {
        if resolution_minutes == 0 || 60 % resolution_minutes != 0 {
            return Err(ProfileError::invalid_parameter(
                "resolution_minutes",
                resolution_minutes,
            ));
        }
        if start > end {
            return Err(ProfileError::InvalidRange {
                from: start.date(),
                to: end.date(),
            });
        }
        if start.second() != 0
            || start.nanosecond() != 0
            || start.minute() % resolution_minutes != 0
        {
            return Err(ProfileError::invalid_parameter("start", start));
        }

        let span = (end - start).num_minutes() as usize;
        let len = span / resolution_minutes as usize + 1;

        Ok(TimeGrid {
            start,
            resolution_minutes,
            len,
        })
    }

    /// First point of the grid
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Last point of the grid
    pub fn end(&self) -> NaiveDateTime {
        self.at(self.len - 1)
    }

    /// Grid spacing Δ, in minutes
    pub fn resolution_minutes(&self) -> u32 {
        self.resolution_minutes
    }

    /// Grid spacing Δ
    pub fn resolution(&self) -> Duration {
        Duration::minutes(self.resolution_minutes as i64)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Timestamp of the `index`-th point
    ///
    /// Indices past the end extrapolate along the same spacing.
    pub fn at(&self, index: usize) -> NaiveDateTime {
        self.start + Duration::minutes(index as i64 * self.resolution_minutes as i64)
    }

    /// Index of the point at exactly `timestamp`, if it lies on the grid
    pub fn index_of(&self, timestamp: NaiveDateTime) -> Option<usize> {
        let offset = timestamp - self.start;
        let minutes = offset.num_minutes();
        if offset < Duration::zero()
            || offset != Duration::minutes(minutes)
            || minutes % self.resolution_minutes as i64 != 0
        {
            return None;
        }
        let index = (minutes / self.resolution_minutes as i64) as usize;
        (index < self.len).then_some(index)
    }

    /// Whether `timestamp` lies within `[start, end]`
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start && timestamp <= self.end()
    }

    /// Iterate over all points in order
    pub fn points(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        (0..self.len).map(move |i| self.at(i))
    }
}
