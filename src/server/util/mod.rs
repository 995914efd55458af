//! Shared helpers used across controllers, services and repositories.

pub mod json;
pub mod pagination;
pub mod search;
pub mod validation;

/// Rounds a value to two decimal places, as used for prices, ratings and averages.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds a value to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(45.99 * 2.0), 91.98);
        assert_eq!(round2(3.336), 3.34);
        assert_eq!(round1(87.25), 87.3);
    }
}
