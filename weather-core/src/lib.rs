//! Core library for the `weatherwise` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The MET Norway provider and the normalization of its time series
//! - Geocoding and air quality lookups
//! - Suggestion rules, alerts and advice text derived from a normalized response
//!
//! It is used by `weatherwise-cli`, but can also be reused by other binaries or services.

pub mod advice;
pub mod aggregate;
pub mod air_quality;
pub mod alerts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod geocode;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod service;
pub mod suggestions;
pub mod symbol;
pub mod units;

pub use config::{Config, ServiceId};
pub use dashboard::{Dashboard, PanelState};
pub use error::WeatherError;
pub use geocode::{Geocoder, Location};
pub use model::NormalizedWeatherResponse;
pub use provider::WeatherProvider;
pub use service::WeatherService;
