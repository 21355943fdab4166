use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Coarse weather classification that drives theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Other,
}

impl Category {
    /// Parse the provider's primary category (`weather[0].main` for OpenWeather).
    ///
    /// Matching is exact; anything unrecognized collapses into [`Category::Other`].
    pub fn from_provider(value: &str) -> Self {
        match value {
            "Clear" => Category::Clear,
            "Clouds" => Category::Clouds,
            "Rain" => Category::Rain,
            "Drizzle" => Category::Drizzle,
            "Thunderstorm" => Category::Thunderstorm,
            "Snow" => Category::Snow,
            _ => Category::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Clear => "Clear",
            Category::Clouds => "Clouds",
            Category::Rain => "Rain",
            Category::Drizzle => "Drizzle",
            Category::Thunderstorm => "Thunderstorm",
            Category::Snow => "Snow",
            Category::Other => "Other",
        }
    }

    pub const fn all() -> &'static [Category] {
        &[
            Category::Clear,
            Category::Clouds,
            Category::Rain,
            Category::Drizzle,
            Category::Thunderstorm,
            Category::Snow,
            Category::Other,
        ]
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from_provider(value)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Current conditions for one place, as reported by a weather provider.
///
/// Fields are private: a condition is built once by the provider and only read afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    category: Category,
    description: String,
    temperature_c: f64,
    feels_like_c: f64,
    humidity_pct: u8,
    wind_speed_mps: f64,
    location_name: String,
    observed_at: DateTime<Utc>,
}

impl WeatherCondition {
    pub fn builder(category: Category, location_name: impl Into<String>) -> ConditionBuilder {
        ConditionBuilder {
            inner: WeatherCondition {
                category,
                description: String::new(),
                temperature_c: 0.0,
                feels_like_c: 0.0,
                humidity_pct: 0,
                wind_speed_mps: 0.0,
                location_name: location_name.into(),
                observed_at: Utc::now(),
            },
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    pub fn feels_like_c(&self) -> f64 {
        self.feels_like_c
    }

    pub fn humidity_pct(&self) -> u8 {
        self.humidity_pct
    }

    pub fn wind_speed_mps(&self) -> f64 {
        self.wind_speed_mps
    }

    pub fn location_name(&self) -> &str {
        &self.location_name
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}

/// Consuming builder for [`WeatherCondition`].
#[derive(Debug, Clone)]
pub struct ConditionBuilder {
    inner: WeatherCondition,
}

impl ConditionBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = description.into();
        self
    }

    pub fn temperature_c(mut self, value: f64) -> Self {
        self.inner.temperature_c = value;
        self
    }

    pub fn feels_like_c(mut self, value: f64) -> Self {
        self.inner.feels_like_c = value;
        self
    }

    pub fn humidity_pct(mut self, value: u8) -> Self {
        self.inner.humidity_pct = value;
        self
    }

    pub fn wind_speed_mps(mut self, value: f64) -> Self {
        self.inner.wind_speed_mps = value;
        self
    }

    pub fn observed_at(mut self, value: DateTime<Utc>) -> Self {
        self.inner.observed_at = value;
        self
    }

    pub fn build(self) -> WeatherCondition {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_as_str_roundtrip() {
        for category in Category::all() {
            assert_eq!(Category::from_provider(category.as_str()), *category);
        }
    }

    #[test]
    fn unknown_categories_collapse_into_other() {
        for raw in ["Mist", "Smoke", "Haze", "Fog", "Tornado", "", "clear", "RAIN"] {
            assert_eq!(Category::from(raw), Category::Other, "input: {raw:?}");
        }
    }

    #[test]
    fn builder_sets_every_field() {
        let when = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let condition = WeatherCondition::builder(Category::Snow, "Oslo")
            .description("nieve ligera")
            .temperature_c(-3.2)
            .feels_like_c(-7.9)
            .humidity_pct(88)
            .wind_speed_mps(4.1)
            .observed_at(when)
            .build();

        assert_eq!(condition.category(), Category::Snow);
        assert_eq!(condition.location_name(), "Oslo");
        assert_eq!(condition.description(), "nieve ligera");
        assert_eq!(condition.temperature_c(), -3.2);
        assert_eq!(condition.feels_like_c(), -7.9);
        assert_eq!(condition.humidity_pct(), 88);
        assert_eq!(condition.wind_speed_mps(), 4.1);
        assert_eq!(condition.observed_at(), when);
    }
}
