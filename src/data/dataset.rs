//! Dataset Module
//! The four weekly series rendered on the dashboard.

use super::Series;
use serde::{Deserialize, Serialize};

/// Which weekly series a chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TripsPerWeek,
    StationsPerWeek,
    BikesPerWeek,
    TripsPerBikePerWeek,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::TripsPerWeek,
        Metric::StationsPerWeek,
        Metric::BikesPerWeek,
        Metric::TripsPerBikePerWeek,
    ];

    /// Column name in tabular exports.
    pub fn column(self) -> &'static str {
        match self {
            Metric::TripsPerWeek => "trips_per_week",
            Metric::StationsPerWeek => "stations_per_week",
            Metric::BikesPerWeek => "bikes_per_week",
            Metric::TripsPerBikePerWeek => "trips_per_bike_per_week",
        }
    }

    /// Ratios keep a decimal in headlines; counts don't.
    pub fn is_ratio(self) -> bool {
        matches!(self, Metric::TripsPerBikePerWeek)
    }
}

/// Weekly series keyed the way the page template names them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dataset {
    pub trips_per_week: Series,
    pub stations_per_week: Series,
    pub bikes_per_week: Series,
    pub trips_per_bike_per_week: Series,
}

impl Dataset {
    pub fn series(&self, metric: Metric) -> &Series {
        match metric {
            Metric::TripsPerWeek => &self.trips_per_week,
            Metric::StationsPerWeek => &self.stations_per_week,
            Metric::BikesPerWeek => &self.bikes_per_week,
            Metric::TripsPerBikePerWeek => &self.trips_per_bike_per_week,
        }
    }

    pub fn series_mut(&mut self, metric: Metric) -> &mut Series {
        match metric {
            Metric::TripsPerWeek => &mut self.trips_per_week,
            Metric::StationsPerWeek => &mut self.stations_per_week,
            Metric::BikesPerWeek => &mut self.bikes_per_week,
            Metric::TripsPerBikePerWeek => &mut self.trips_per_bike_per_week,
        }
    }

    /// Total number of samples across all four series.
    pub fn sample_count(&self) -> usize {
        Metric::ALL.iter().map(|m| self.series(*m).len()).sum()
    }
}
