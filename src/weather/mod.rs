pub mod models;
mod service;
mod view;

pub use models::{ForecastDay, WeatherSnapshot};
pub use service::{WeatherError, WeatherProvider, WeatherService};
pub use view::{LoadPhase, LoadTicket, WeatherPage};
