pub mod cities;
pub mod provider;

pub use cities::CityDirectory;
pub use provider::{plan_lookups, Lookup, WeatherClient, WeatherResult};
