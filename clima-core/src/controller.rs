//! Async driver around [`WeatherView`].
//!
//! Intents take a ticket from the view and spawn the fetch on the tokio
//! runtime. Finished fetches come back over a channel as [`Completion`]s and
//! are applied in arrival order; the view's token check discards any that were
//! superseded. In-flight fetches are never cancelled.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::{
    error::{FailureReason, ValidationError},
    fetch::Fetcher,
    view::{Completion, FetchTicket, Source, ViewState, WeatherView},
};

#[derive(Debug)]
pub struct WeatherController {
    view: WeatherView,
    fetcher: Arc<Fetcher>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl WeatherController {
    /// Must be called from within a tokio runtime once an intent is dispatched.
    pub fn new(fetcher: Fetcher) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { view: WeatherView::new(), fetcher: Arc::new(fetcher), tx, rx }
    }

    pub fn view(&self) -> &WeatherView {
        &self.view
    }

    pub fn state(&self) -> &ViewState {
        self.view.state()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.view.set_search_text(text);
    }

    pub fn start(&mut self, source: Source) -> Result<(), ValidationError> {
        let ticket = self.view.start(source)?;
        self.spawn(ticket);
        Ok(())
    }

    pub fn submit_search(&mut self) -> Result<(), ValidationError> {
        let ticket = self.view.submit_search()?;
        self.spawn(ticket);
        Ok(())
    }

    pub fn retry(&mut self) {
        let ticket = self.view.retry();
        self.spawn(ticket);
    }

    /// Wait until the view leaves `Loading`, applying completions as they arrive.
    pub async fn settle(&mut self) -> &ViewState {
        while self.view.state().is_loading() {
            let Some(completion) = self.rx.recv().await else {
                break;
            };
            let token = completion.token;
            if !self.view.apply(completion) {
                debug!(token = token.value(), "stale completion dropped by controller");
            }
        }
        self.view.state()
    }

    fn spawn(&self, ticket: FetchTicket) {
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();

        let FetchTicket { token, source } = ticket;

        tokio::spawn(async move {
            let fetch = tokio::spawn(async move { fetcher.fetch(&source).await });

            // A panicking collaborator still has to release the view from `Loading`.
            let outcome = fetch.await.unwrap_or_else(|err| {
                warn!(token = token.value(), error = %err, "fetch task failed");
                Err(FailureReason::NetworkError)
            });

            // Receiver gone means the view was dropped; nothing left to update.
            let _ = tx.send(Completion { token, outcome });
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        error::{FetchError, LocationError},
        fetch::testing::{ScriptedLocation, ScriptedWeather},
        model::{Category, Coordinates, WeatherCondition},
    };

    fn controller(
        location: Arc<ScriptedLocation>,
        weather: Arc<ScriptedWeather>,
    ) -> WeatherController {
        WeatherController::new(Fetcher::new(location, weather))
    }

    #[tokio::test]
    async fn slow_earlier_search_does_not_clobber_later_one() {
        let weather = Arc::new(
            ScriptedWeather::default()
                .with_city("Lima", Category::Clear, Duration::from_millis(150))
                .with_city("Oslo", Category::Snow, Duration::ZERO),
        );
        let location = Arc::new(ScriptedLocation::new(Ok(Coordinates::new(0.0, 0.0))));
        let mut ctl = controller(location, weather.clone());

        ctl.start(Source::CityQuery("Lima".into())).unwrap();
        ctl.start(Source::CityQuery("Oslo".into())).unwrap();

        let ViewState::Ready { condition, theme } = ctl.settle().await else {
            panic!("expected Ready");
        };
        assert_eq!(condition.location_name(), "Oslo");
        assert_eq!(theme.icon_key(), "snowy");

        // Let the slow Lima response land; it must be discarded.
        tokio::time::sleep(Duration::from_millis(250)).await;
        let ViewState::Ready { condition, .. } = ctl.settle().await else {
            panic!("expected Ready");
        };
        assert_eq!(condition.location_name(), "Oslo");
        assert_eq!(weather.city_calls(), 2);
    }

    #[tokio::test]
    async fn paris_search_ends_ready_and_sunny() {
        let weather = Arc::new(ScriptedWeather::default().with_city(
            "Paris",
            Category::Clear,
            Duration::ZERO,
        ));
        let location = Arc::new(ScriptedLocation::new(Err(LocationError::Unavailable)));
        let mut ctl = controller(location, weather);

        ctl.set_search_text("Paris");
        ctl.submit_search().unwrap();
        assert_eq!(ctl.view().search_text(), "");

        let ViewState::Ready { condition, theme } = ctl.settle().await else {
            panic!("expected Ready");
        };
        assert_eq!(condition.location_name(), "Paris");
        assert_eq!(condition.temperature_c(), 21.0);
        assert_eq!(theme.icon_key(), "sunny");
    }

    #[tokio::test]
    async fn permission_denied_then_retry_asks_for_location_again() {
        let weather = Arc::new(ScriptedWeather::default());
        let location = Arc::new(ScriptedLocation::new(Err(LocationError::PermissionDenied)));
        let mut ctl = controller(location.clone(), weather.clone());

        ctl.start(Source::CurrentLocation).unwrap();
        let ViewState::Error { message } = ctl.settle().await else {
            panic!("expected Error");
        };
        assert!(message.contains("permiso"));
        assert_eq!(location.calls(), 1);

        ctl.retry();
        assert!(matches!(ctl.settle().await, ViewState::Error { .. }));
        assert_eq!(location.calls(), 2);
        assert_eq!(weather.city_calls(), 0);
    }

    #[derive(Debug)]
    struct PanickingWeather;

    #[async_trait::async_trait]
    impl crate::provider::WeatherProvider for PanickingWeather {
        async fn by_coordinates(&self, _at: Coordinates) -> Result<WeatherCondition, FetchError> {
            panic!("provider blew up")
        }

        async fn by_city_name(&self, _name: &str) -> Result<WeatherCondition, FetchError> {
            panic!("provider blew up")
        }
    }

    #[tokio::test]
    async fn panicking_provider_ends_in_retryable_error() {
        let location = Arc::new(ScriptedLocation::new(Ok(Coordinates::new(0.0, 0.0))));
        let mut ctl = WeatherController::new(Fetcher::new(location, Arc::new(PanickingWeather)));

        ctl.start(Source::CityQuery("Paris".into())).unwrap();
        let state = tokio::time::timeout(Duration::from_secs(2), ctl.settle())
            .await
            .expect("settle must not hang on a panicked fetch")
            .clone();
        assert_eq!(
            state,
            ViewState::Error { message: FailureReason::NetworkError.user_message().into() }
        );

        ctl.retry();
        assert_eq!(ctl.state(), &ViewState::Loading);
        assert_eq!(ctl.view().last_source(), Some(&Source::CityQuery("Paris".into())));
    }

    #[tokio::test]
    async fn blank_search_does_not_dispatch() {
        let weather = Arc::new(ScriptedWeather::default());
        let location = Arc::new(ScriptedLocation::new(Ok(Coordinates::new(0.0, 0.0))));
        let mut ctl = controller(location, weather.clone());

        ctl.set_search_text("  ");
        assert_eq!(ctl.submit_search(), Err(ValidationError::EmptyQuery));
        assert_eq!(ctl.state(), &ViewState::Idle);

        // Nothing is loading, so settle returns immediately.
        assert_eq!(ctl.settle().await, &ViewState::Idle);
        assert_eq!(weather.city_calls(), 0);
    }
}
