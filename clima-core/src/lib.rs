//! Core library for the `clima` weather assistant.
//!
//! This crate defines:
//! - The weather view state machine and its category → theme mapping
//! - Location and weather-provider abstractions, with an OpenWeather client
//! - The mock session gate (registration and login over an in-memory store)
//! - Configuration & credentials handling
//!
//! It is used by `clima-cli`, but can also be driven by any other front-end.

pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod location;
pub mod model;
pub mod provider;
pub mod session;
pub mod theme;
pub mod view;

pub use config::{Config, LocationConfig, OpenWeatherConfig};
pub use controller::WeatherController;
pub use error::{AuthError, FailureReason, FetchError, LocationError, SessionError, ValidationError};
pub use fetch::Fetcher;
pub use location::{ConfiguredLocation, LocationProvider};
pub use model::{Category, Coordinates, WeatherCondition};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use session::{SessionGate, UserStore};
pub use theme::{Color, Theme, resolve_theme};
pub use view::{Completion, FetchTicket, RequestToken, Source, ViewState, WeatherView};
