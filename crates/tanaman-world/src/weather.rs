//! Garden weather.
//!
//! Weather is rolled once per shop cycle from a fixed rotation table.
//! Sunny weather shortens newly entered phases; rainy weather hands out a
//! free watering can each time it is rolled by a cycle change.

use serde::{Deserialize, Serialize};
use tracing::info;

use tanaman_types::Weather;

use crate::random::{RandomSource, pick};

/// Equally likely outcomes of a weather roll.
pub const WEATHER_ROTATION: [Weather; 5] = [
    Weather::Sunny,
    Weather::Rainy,
    Weather::Cloudy,
    Weather::Cloudy,
    Weather::Cloudy,
];

/// Result of a weather change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherChange {
    /// Weather before the change.
    pub previous: Weather,
    /// Weather after the change.
    pub current: Weather,
    /// Whether the change grants a free watering can.
    pub grants_watering_can: bool,
}

/// Tracks the current weather.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherSystem {
    current: Weather,
}

impl WeatherSystem {
    /// Start with the given weather.
    pub const fn new(current: Weather) -> Self {
        Self { current }
    }

    /// The current weather.
    pub const fn current(&self) -> Weather {
        self.current
    }

    /// Roll the opening weather of a session. Never grants rewards.
    pub fn roll_initial(&mut self, source: &mut dyn RandomSource) -> Weather {
        self.current = pick(source, &WEATHER_ROTATION)
            .copied()
            .unwrap_or_default();
        self.current
    }

    /// Roll the weather for a new cycle.
    pub fn change(&mut self, source: &mut dyn RandomSource) -> WeatherChange {
        let previous = self.current;
        let current = self.roll_initial(source);
        info!(?previous, ?current, "Weather changed");
        WeatherChange {
            previous,
            current,
            grants_watering_can: current == Weather::Rainy,
        }
    }
}
