use async_trait::async_trait;

use crate::{error::GeolocationError, model::Coordinates};

/// Source of the device position for "use my location".
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Position supplied up front, from flags or config. `None` means the device
/// has no way of reporting where it is; a non-finite coordinate means it
/// reported a position we can't use.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(pub Option<Coordinates>);

#[async_trait]
impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        let at = self.0.ok_or(GeolocationError::Unsupported)?;
        if !at.latitude.is_finite() || !at.longitude.is_finite() {
            return Err(GeolocationError::Unavailable);
        }
        Ok(at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixed_location_reports_coordinates() {
        let loc = FixedLocation(Some(Coordinates::new(1.5, -2.5)));
        assert_eq!(loc.locate().await, Ok(Coordinates::new(1.5, -2.5)));
    }

    #[tokio::test]
    async fn missing_location_is_unsupported() {
        assert_eq!(
            FixedLocation::default().locate().await,
            Err(GeolocationError::Unsupported)
        );
    }

    #[tokio::test]
    async fn non_finite_position_is_unavailable() {
        let loc = FixedLocation(Some(Coordinates::new(f64::NAN, 10.0)));
        assert_eq!(loc.locate().await, Err(GeolocationError::Unavailable));

        let loc = FixedLocation(Some(Coordinates::new(10.0, f64::INFINITY)));
        assert_eq!(loc.locate().await, Err(GeolocationError::Unavailable));
    }
}
