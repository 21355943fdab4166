//! Weather view state machine.
//!
//! The view owns the presentation state and is its only mutator. Every accepted
//! [`WeatherView::start`] bumps a request generation and hands back a
//! [`FetchTicket`]; a completion is applied only if it carries the current
//! generation while the view is still loading. The most recently *started*
//! request therefore wins, whatever order the responses arrive in.

use tracing::debug;

use crate::{
    error::{FailureReason, ValidationError},
    model::WeatherCondition,
    theme::{Theme, resolve_theme},
};

/// What a fetch should look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    CurrentLocation,
    CityQuery(String),
}

/// Generation number of an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// A request the caller is expected to run and report back on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub token: RequestToken,
    pub source: Source,
}

/// Outcome of a fetch, tagged with the token it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub token: RequestToken,
    pub outcome: Result<WeatherCondition, FailureReason>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Nothing requested yet.
    Idle,
    Loading,
    Error { message: String },
    Ready { condition: WeatherCondition, theme: Theme },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "Idle",
            ViewState::Loading => "Loading",
            ViewState::Error { .. } => "Error",
            ViewState::Ready { .. } => "Ready",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

#[derive(Debug)]
pub struct WeatherView {
    state: ViewState,
    generation: u64,
    last_source: Option<Source>,
    search_text: String,
}

impl Default for WeatherView {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherView {
    pub fn new() -> Self {
        Self {
            state: ViewState::Idle,
            generation: 0,
            last_source: None,
            search_text: String::new(),
        }
    }

    /// New view that immediately starts a current-location lookup.
    pub fn mount() -> (Self, FetchTicket) {
        let mut view = Self::new();
        let ticket = view.begin(Source::CurrentLocation);
        (view, ticket)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Source of the most recently issued request.
    pub fn last_source(&self) -> Option<&Source> {
        self.last_source.as_ref()
    }

    pub fn current_token(&self) -> RequestToken {
        RequestToken(self.generation)
    }

    /// Enter `Loading` for `source`.
    ///
    /// A blank city name is rejected and leaves the view untouched.
    pub fn start(&mut self, source: Source) -> Result<FetchTicket, ValidationError> {
        let source = match source {
            Source::CityQuery(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ValidationError::EmptyQuery);
                }
                Source::CityQuery(name.to_string())
            }
            other => other,
        };

        Ok(self.begin(source))
    }

    /// Search for whatever is in the search box.
    pub fn submit_search(&mut self) -> Result<FetchTicket, ValidationError> {
        let query = self.search_text.clone();
        self.start(Source::CityQuery(query))
    }

    /// Replay the last request kind; a view that never started falls back to the current location.
    pub fn retry(&mut self) -> FetchTicket {
        let source = self.last_source.clone().unwrap_or(Source::CurrentLocation);
        self.begin(source)
    }

    pub fn on_fetch_succeeded(&mut self, token: RequestToken, condition: WeatherCondition) -> bool {
        if !self.accepts(token) {
            return false;
        }

        let theme = resolve_theme(condition.category());
        debug!(token = token.0, category = %condition.category(), "view ready");
        self.state = ViewState::Ready { condition, theme };
        true
    }

    pub fn on_fetch_failed(&mut self, token: RequestToken, reason: FailureReason) -> bool {
        if !self.accepts(token) {
            return false;
        }

        debug!(token = token.0, ?reason, "view error");
        self.state = ViewState::Error { message: reason.user_message().to_string() };
        true
    }

    /// Apply a completion. Returns `false` when it was stale and discarded.
    pub fn apply(&mut self, completion: Completion) -> bool {
        match completion.outcome {
            Ok(condition) => self.on_fetch_succeeded(completion.token, condition),
            Err(reason) => self.on_fetch_failed(completion.token, reason),
        }
    }

    fn begin(&mut self, source: Source) -> FetchTicket {
        self.generation += 1;
        self.state = ViewState::Loading;
        self.search_text.clear();
        self.last_source = Some(source.clone());

        let token = RequestToken(self.generation);
        debug!(token = token.0, ?source, "view loading");
        FetchTicket { token, source }
    }

    fn accepts(&self, token: RequestToken) -> bool {
        let fresh = self.state.is_loading() && token.0 == self.generation;
        if !fresh {
            debug!(
                token = token.0,
                current = self.generation,
                state = self.state.name(),
                "discarding stale completion"
            );
        }
        fresh
    }
}
