use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    error::DashboardError,
    model::{Condition, Coordinates, CurrentConditions, ForecastSample, LocationQuery},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Units are fixed; every request asks for metric values.
const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Shared GET path for both endpoints: send, check status, decode.
    async fn get<T>(&self, endpoint: &str, params: Vec<(&str, String)>) -> Result<T, DashboardError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!("GET {url} {:?}", params);

        let res = self
            .http
            .get(&url)
            .query(&params)
            .query(&[("units", UNITS), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(
                "OpenWeather {endpoint} request failed with status {}: {}",
                status,
                truncate_body(&body),
            );
            let reported = serde_json::from_str::<OwError>(&body)
                .ok()
                .and_then(|e| e.message);
            return Err(DashboardError::upstream(reported, Some(status.as_u16())));
        }

        serde_json::from_str(&body).map_err(|err| {
            warn!("Failed to parse OpenWeather {endpoint} JSON: {err}");
            DashboardError::upstream(None, Some(status.as_u16()))
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, DashboardError> {
        let params = match query {
            LocationQuery::ByName(name) => vec![("q", name.clone())],
            LocationQuery::ByCoordinates(at) => coordinate_params(*at),
        };

        let parsed: OwCurrentResponse = self.get("weather", params).await?;
        Ok(parsed.into())
    }

    async fn forecast(&self, at: Coordinates) -> Result<Vec<ForecastSample>, DashboardError> {
        let parsed: OwForecastResponse = self.get("forecast", coordinate_params(at)).await?;
        Ok(parsed.list.into_iter().map(ForecastSample::from).collect())
    }
}

fn coordinate_params(at: Coordinates) -> Vec<(&'static str, String)> {
    vec![
        ("lat", at.latitude.to_string()),
        ("lon", at.longitude.to_string()),
    ]
}

#[derive(Debug, Deserialize)]
struct OwError {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u32,
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    sys: Option<OwSys>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_condition(weather: Vec<OwWeather>) -> Condition {
    weather
        .into_iter()
        .next()
        .map(|w| Condition {
            code: w.id,
            main: w.main,
            description: w.description,
            icon: w.icon,
        })
        .unwrap_or_default()
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(r: OwCurrentResponse) -> Self {
        Self {
            name: r.name,
            country: r.sys.and_then(|s| s.country).unwrap_or_default(),
            coordinates: Coordinates::new(r.coord.lat, r.coord.lon),
            temperature_c: r.main.temp,
            feels_like_c: r.main.feels_like,
            humidity_pct: r.main.humidity,
            wind_speed_mps: r.wind.speed,
            pressure_hpa: r.main.pressure,
            condition: first_condition(r.weather),
        }
    }
}

impl From<OwForecastEntry> for ForecastSample {
    fn from(e: OwForecastEntry) -> Self {
        Self {
            timestamp: e.dt,
            temp_min_c: e.main.temp_min,
            temp_max_c: e.main.temp_max,
            condition: first_condition(e.weather),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current_body() -> serde_json::Value {
        json!({
            "coord": { "lon": 85.1167, "lat": 25.6 },
            "weather": [{ "id": 721, "main": "Haze", "description": "haze", "icon": "50d" }],
            "main": {
                "temp": 31.96, "feels_like": 33.1, "temp_min": 31.96, "temp_max": 31.96,
                "pressure": 1006, "humidity": 45
            },
            "wind": { "speed": 3.6, "deg": 90 },
            "dt": 1710068400,
            "sys": { "country": "IN" },
            "name": "Patna",
            "cod": 200
        })
    }

    #[tokio::test]
    async fn current_by_name_sends_metric_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Patna"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &server.uri());
        let cc = provider
            .current(&LocationQuery::ByName("Patna".into()))
            .await
            .expect("current conditions");

        assert_eq!(cc.name, "Patna");
        assert_eq!(cc.country, "IN");
        assert_eq!(cc.coordinates, Coordinates::new(25.6, 85.1167));
        assert_eq!(cc.humidity_pct, 45);
        assert_eq!(cc.pressure_hpa, 1006);
        assert_eq!(cc.condition.icon, "50d");
        assert_eq!(cc.condition.code, 721);
    }

    #[tokio::test]
    async fn current_by_coordinates_sends_lat_lon() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "25.6"))
            .and(query_param("lon", "85.1167"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &server.uri());
        let cc = provider
            .current(&LocationQuery::by_coordinates(25.6, 85.1167))
            .await
            .expect("current conditions");
        assert_eq!(cc.name, "Patna");
    }

    #[tokio::test]
    async fn error_payload_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &server.uri());
        let err = provider
            .current(&LocationQuery::ByName("Nowhere".into()))
            .await
            .unwrap_err();

        match err {
            DashboardError::Upstream { message, status } => {
                assert_eq!(message, "city not found");
                assert_eq!(status, Some(404));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_uses_fallback_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &server.uri());
        let err = provider
            .forecast(Coordinates::new(1.0, 2.0))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Failed to fetch weather");
    }

    #[tokio::test]
    async fn forecast_parses_samples_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("lat", "25.6"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cod": "200",
                "cnt": 2,
                "list": [
                    {
                        "dt": 1710072000,
                        "main": { "temp": 30.0, "temp_min": 29.1, "temp_max": 31.2 },
                        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }]
                    },
                    {
                        "dt": 1710082800,
                        "main": { "temp": 27.0, "temp_min": 26.4, "temp_max": 27.5 },
                        "weather": []
                    }
                ],
                "city": { "name": "Patna", "country": "IN" }
            })))
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &format!("{}/", server.uri()));
        let samples = provider
            .forecast(Coordinates::new(25.6, 85.1167))
            .await
            .expect("forecast");

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].timestamp, 1710072000);
        assert_eq!(samples[0].temp_max_c, 31.2);
        assert_eq!(samples[0].condition.description, "clear sky");
        assert_eq!(samples[1].condition, Condition::default());
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");
        let long = "x".repeat(250);
        assert_eq!(truncate_body(&long).len(), 203);
    }
}
