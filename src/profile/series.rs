//! Values sampled on a [`TimeGrid`]

use chrono::NaiveDateTime;
use serde::Serialize;

use super::error::ProfileError;
use super::grid::TimeGrid;

macro_rules! grid_series {
    ($name:ident) => {
        impl $name {
            /// The grid this series is sampled on
            pub fn grid(&self) -> &TimeGrid {
                &self.grid
            }

            /// One value per grid point, in grid order
            pub fn values(&self) -> &[f64] {
                &self.values
            }

            /// Value at `timestamp`, if it is a grid point
            pub fn get(&self, timestamp: NaiveDateTime) -> Option<f64> {
                self.grid.index_of(timestamp).map(|i| self.values[i])
            }

            /// Iterate over `(timestamp, value)` pairs
            pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
                self.grid.points().zip(self.values.iter().copied())
            }

            pub fn len(&self) -> usize {
                self.values.len()
            }

            pub fn is_empty(&self) -> bool {
                self.values.is_empty()
            }

            /// Largest value in the series, `None` if empty
            pub fn max(&self) -> Option<f64> {
                self.values.iter().copied().reduce(f64::max)
            }
        }
    };
}

/// Units administered at each grid point, zero where nothing was given
///
/// Holds exactly one value per grid point. Series are only built from a grid,
/// never deserialized:
///
/// ```compile_fail
/// let doses: pkprofile::profile::DoseSeries = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoseSeries {
    grid: TimeGrid,
    values: Vec<f64>,
}

grid_series!(DoseSeries);

impl DoseSeries {
    /// A series of zeros over `grid`
    pub fn zeros(grid: TimeGrid) -> Self {
        DoseSeries {
            grid,
            values: vec![0.0; grid.len()],
        }
    }

    /// Add `units` to the dose at grid index `index`
    pub(crate) fn add(&mut self, index: usize, units: f64) {
        self.values[index] += units;
    }

    /// Grid indices that carry a positive dose, in order
    pub fn dosed_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|&(_, &units)| units > 0.0)
            .map(|(i, _)| i)
    }
}

/// A propagated drug level at each grid point
///
/// Holds administered units after propagation; [`ConcentrationSeries::scaled`]
/// converts to a plasma concentration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcentrationSeries {
    grid: TimeGrid,
    values: Vec<f64>,
}

grid_series!(ConcentrationSeries);

impl ConcentrationSeries {
    pub(crate) fn new(grid: TimeGrid, values: Vec<f64>) -> Self {
        debug_assert_eq!(grid.len(), values.len());
        ConcentrationSeries { grid, values }
    }

    /// Divide every value by the volume of distribution
    ///
    /// # Errors
    /// [`ProfileError::InvalidParameter`] unless `volume_of_distribution` is
    /// finite and positive.
    pub fn scaled(&self, volume_of_distribution: f64) -> Result<Self, ProfileError> {
        if !(volume_of_distribution.is_finite() && volume_of_distribution > 0.0) {
            return Err(ProfileError::invalid_parameter(
                "volume_of_distribution",
                volume_of_distribution,
            ));
        }
        Ok(ConcentrationSeries {
            grid: self.grid,
            values: self
                .values
                .iter()
                .map(|v| v / volume_of_distribution)
                .collect(),
        })
    }
}
