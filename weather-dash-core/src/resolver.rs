//! Location resolution: a user query in, canonical location plus current
//! conditions out.

use tracing::debug;

use crate::{
    error::DashboardError,
    model::{Coordinates, CurrentConditions, LocationQuery},
    provider::WeatherProvider,
};

/// Result of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub conditions: CurrentConditions,
}

impl Resolution {
    /// Coordinates to feed into the forecast fetch.
    pub fn coordinates(&self) -> Coordinates {
        self.conditions.coordinates
    }

    /// Canonical place name, reusable as the next search text.
    pub fn name(&self) -> &str {
        &self.conditions.name
    }
}

/// Resolve `query` with exactly one current-conditions request.
///
/// Name queries are re-validated here so a hand-built `ByName` with blank text
/// never reaches the network.
pub async fn resolve<P>(provider: &P, query: &LocationQuery) -> Result<Resolution, DashboardError>
where
    P: WeatherProvider + ?Sized,
{
    debug!("Resolving location query: {:?}", query);

    let query = match query {
        LocationQuery::ByName(text) => LocationQuery::by_name(text)?,
        LocationQuery::ByCoordinates(_) => query.clone(),
    };

    let conditions = provider.current(&query).await?;

    debug!(
        "Resolved location: {}, {} at ({})",
        conditions.name, conditions.country, conditions.coordinates
    );

    Ok(Resolution { conditions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::openweather::OpenWeatherProvider;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn body(name: &str, lat: f64, lon: f64) -> serde_json::Value {
        json!({
            "coord": { "lon": lon, "lat": lat },
            "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01n" }],
            "main": { "temp": 4.2, "feels_like": 1.0, "pressure": 1021, "humidity": 80 },
            "wind": { "speed": 2.1 },
            "sys": { "country": "NO" },
            "name": name
        })
    }

    #[tokio::test]
    async fn blank_name_never_hits_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("Oslo", 59.9, 10.7)))
            .expect(0)
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &server.uri());
        let err = resolve(&provider, &LocationQuery::ByName("   ".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, DashboardError::Validation { .. }));
    }

    #[tokio::test]
    async fn coordinates_resolve_to_canonical_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "59.91"))
            .and(query_param("lon", "10.75"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("Oslo", 59.9133, 10.7389)))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &server.uri());
        let resolution = resolve(&provider, &LocationQuery::by_coordinates(59.91, 10.75))
            .await
            .expect("resolution");

        assert_eq!(resolution.name(), "Oslo");
        assert_eq!(resolution.coordinates(), Coordinates::new(59.9133, 10.7389));
    }

    #[tokio::test]
    async fn name_is_trimmed_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Oslo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("Oslo", 59.9, 10.7)))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenWeatherProvider::with_base_url("KEY".into(), &server.uri());
        let resolution = resolve(&provider, &LocationQuery::ByName(" Oslo  ".into()))
            .await
            .expect("resolution");
        assert_eq!(resolution.conditions.country, "NO");
    }
}
