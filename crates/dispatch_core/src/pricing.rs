//! Fare split between drivers and the platform.

/// Flat platform fee deducted from every completed trip.
pub const TRIP_FEE: f64 = 1.65;

/// Fraction of the post-fee fare paid out to the driver.
pub const DRIVER_SHARE: f64 = 0.80;

/// Driver earnings for a single completed trip.
///
/// Formula: `take = (fare - TRIP_FEE) * DRIVER_SHARE`
pub fn driver_take(fare: f64) -> f64 {
    (fare - TRIP_FEE) * DRIVER_SHARE
}

/// Round a currency amount to cents.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
