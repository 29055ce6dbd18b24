/// Geodetic position of the observer as the prediction services expect it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverLocation {
    /// Degrees north, -90 to 90.
    latitude: f64,
    /// Degrees east, -180 to 180.
    longitude: f64,
    /// Metres above sea level.
    altitude: f64,
}

impl ObserverLocation {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self { latitude, longitude, altitude }
    }

    pub fn latitude(&self) -> f64 { self.latitude }
    pub fn longitude(&self) -> f64 { self.longitude }
    pub fn altitude(&self) -> f64 { self.altitude }
}
