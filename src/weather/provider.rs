//! Current-weather lookups against the OpenWeatherMap API.
//!
//! A city is resolved through an ordered list of lookups (provider id,
//! then the name as given, then its transliteration). The first
//! successful response wins; every failure is reported in-band.

use crate::config::AppConfig;
use crate::mcp::ResponseEnvelope;
use crate::weather::CityDirectory;
use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Flattened weather report returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    pub humidity: u32,
    pub wind_speed: f64,
    pub weather_icon: String,
}

// -- Upstream response schema ------------------------------------------------

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    name: String,
    sys: SysPayload,
    main: MainPayload,
    weather: Vec<ConditionPayload>,
    wind: WindPayload,
}

#[derive(Debug, Deserialize)]
struct SysPayload {
    country: String,
}

#[derive(Debug, Deserialize)]
struct MainPayload {
    temp: f64,
    feels_like: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct ConditionPayload {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindPayload {
    speed: f64,
}

impl TryFrom<CurrentWeather> for WeatherResult {
    type Error = anyhow::Error;

    fn try_from(w: CurrentWeather) -> Result<Self> {
        let condition = w
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("upstream response has no weather conditions"))?;

        Ok(Self {
            city: w.name,
            country: w.sys.country,
            temperature: w.main.temp,
            feels_like: w.main.feels_like,
            description: condition.description,
            humidity: w.main.humidity,
            wind_speed: w.wind.speed,
            weather_icon: condition.icon,
        })
    }
}

// -- Lookup cascade ----------------------------------------------------------

/// One way of asking the provider for a city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    ById(u64),
    ByName(String),
}

impl Lookup {
    fn query_param(&self) -> (&'static str, String) {
        match self {
            Self::ById(id) => ("id", id.to_string()),
            Self::ByName(name) => ("q", name.clone()),
        }
    }
}

/// Ordered lookups for a city.
///
/// A known provider id is authoritative: no name lookups follow it.
/// Otherwise the name as given is tried, then its transliteration if one
/// is known.
pub fn plan_lookups(cities: &CityDirectory, city: &str) -> Vec<Lookup> {
    if let Some(id) = cities.id_of(city) {
        return vec![Lookup::ById(id)];
    }

    let mut plan = vec![Lookup::ByName(city.to_string())];
    if let Some(alt) = cities.transliteration_of(city) {
        plan.push(Lookup::ByName(alt.to_string()));
    }
    plan
}

enum Attempt {
    Found(WeatherResult),
    Rejected { status: u16, body: String },
}

/// OpenWeatherMap client holding the static city tables.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_url: String,
    api_key: String,
    lang: String,
    timeout: Duration,
    cities: CityDirectory,
    http: reqwest::Client,
}

impl WeatherClient {
    pub fn new(api_url: &str, api_key: &str, lang: &str, timeout: Duration) -> Self {
        Self {
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            lang: lang.to_string(),
            timeout,
            cities: CityDirectory::default(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.weather_api_url,
            &config.weather_api_key,
            &config.weather_lang,
            Duration::from_secs(config.weather_timeout_secs),
        )
    }

    /// Replace the city tables.
    pub fn with_cities(mut self, cities: CityDirectory) -> Self {
        self.cities = cities;
        self
    }

    /// Handle a `get_weather` call: `{"city": "..."}` in, envelope out.
    pub async fn get_weather(&self, params: &Map<String, Value>) -> ResponseEnvelope {
        let city = match params.get("city") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => {
                warn!("Rejected non-scalar city: {}", other);
                return ResponseEnvelope::failure("city must be a string");
            }
        };
        let city = city.as_str();

        if city.is_empty() {
            return ResponseEnvelope::failure("city required");
        }

        info!("Weather request for city: {}", city);

        match self.current_weather(city).await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Weather lookup error for {}: {:#}", city, e);
                ResponseEnvelope::failure(format!("weather lookup error: {:#}", e))
            }
        }
    }

    /// Run the lookup cascade for `city`.
    ///
    /// Upstream rejections move on to the next lookup; transport faults
    /// abort the cascade.
    async fn current_weather(&self, city: &str) -> Result<ResponseEnvelope> {
        let mut last_rejection = None;

        for lookup in plan_lookups(&self.cities, city) {
            match self.attempt(&lookup).await? {
                Attempt::Found(result) => {
                    let Value::Object(result) = serde_json::to_value(result)? else {
                        bail!("weather result did not serialize to an object");
                    };
                    return Ok(ResponseEnvelope::Success { result });
                }
                Attempt::Rejected { status, body } => {
                    warn!("Lookup {:?} rejected ({}): {}", lookup, status, body);
                    last_rejection = Some((status, body));
                }
            }
        }

        let (status, body) = last_rejection
            .ok_or_else(|| anyhow!("no lookup could be planned for '{}'", city))?;
        Ok(ResponseEnvelope::failure_with_status(
            format!("weather lookup failed ({}): {}", status, body),
            status,
        ))
    }

    async fn attempt(&self, lookup: &Lookup) -> Result<Attempt> {
        let (key, value) = lookup.query_param();
        debug!("OpenWeatherMap query {}={} lang={}", key, value, self.lang);

        let resp = self
            .http
            .get(&self.api_url)
            .query(&[
                (key, value.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow!("upstream request timed out after {}s", self.timeout.as_secs())
                } else {
                    anyhow::Error::new(e).context("upstream request failed")
                }
            })?;

        let status = resp.status();
        info!("OpenWeatherMap responded {}", status);

        let body = resp
            .text()
            .await
            .context("failed to read upstream response")?;

        if !status.is_success() {
            return Ok(Attempt::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let payload: CurrentWeather =
            serde_json::from_str(&body).context("malformed upstream response")?;
        Ok(Attempt::Found(payload.try_into()?))
    }
}
