//! Core library for the weather widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the [`WeatherProvider`] trait
//! - The widget state machine, its debounced suggestion lookups and toasts
//! - Condition-to-background classification and the result panel text model
//!
//! It is used by `weather-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod controller;
pub mod debounce;
pub mod model;
pub mod notify;
pub mod provider;
pub mod theme;
pub mod view;
pub mod widget;

pub use config::Config;
pub use controller::Controller;
pub use model::WeatherReport;
pub use notify::{Toast, ToastKind};
pub use provider::{ProviderError, WeatherProvider};
pub use theme::BackgroundTheme;
pub use widget::{Action, Selection, WidgetState};
