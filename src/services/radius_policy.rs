use time::Time;
use time::macros::time;

pub const PEAK_HOURS_SERVING_RADIUS_KM: f64 = 3.0;
pub const NORMAL_HOURS_SERVING_RADIUS_KM: f64 = 5.0;

/// Breakfast, lunch and dinner rush. Both ends are part of the window.
pub const PEAK_WINDOWS: [(Time, Time); 3] = [
    (time!(8:00), time!(10:00)),
    (time!(13:00), time!(14:00)),
    (time!(19:00), time!(21:00)),
];

pub fn is_peak_hour(time: Time) -> bool {
    PEAK_WINDOWS
        .iter()
        .any(|(start, end)| *start <= time && time <= *end)
}

pub fn serving_radius_km(time: Time) -> f64 {
    RadiusPolicy::default().serving_radius_km(time)
}

/// Shrinks the delivery area while kitchens are busy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusPolicy {
    pub peak_radius_km: f64,
    pub normal_radius_km: f64,
}

impl RadiusPolicy {
    pub fn new(peak_radius_km: f64, normal_radius_km: f64) -> Self {
        Self {
            peak_radius_km,
            normal_radius_km,
        }
    }

    pub fn serving_radius_km(&self, time: Time) -> f64 {
        if is_peak_hour(time) {
            self.peak_radius_km
        } else {
            self.normal_radius_km
        }
    }
}

impl Default for RadiusPolicy {
    fn default() -> Self {
        Self::new(PEAK_HOURS_SERVING_RADIUS_KM, NORMAL_HOURS_SERVING_RADIUS_KM)
    }
}
