use std::sync::Arc;

use tracing::debug;

use crate::{
    error::FailureReason,
    location::LocationProvider,
    model::WeatherCondition,
    provider::WeatherProvider,
    view::Source,
};

/// Location and weather lookups composed into one operation per [`Source`].
#[derive(Debug, Clone)]
pub struct Fetcher {
    location: Arc<dyn LocationProvider>,
    weather: Arc<dyn WeatherProvider>,
}

impl Fetcher {
    pub fn new(location: Arc<dyn LocationProvider>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { location, weather }
    }

    pub async fn fetch(&self, source: &Source) -> Result<WeatherCondition, FailureReason> {
        match source {
            Source::CurrentLocation => {
                let at = self.location.current_coordinates().await?;
                debug!(lat = at.latitude, lon = at.longitude, "resolved current location");
                Ok(self.weather.by_coordinates(at).await?)
            }
            Source::CityQuery(name) => Ok(self.weather.by_city_name(name).await?),
        }
    }
}
