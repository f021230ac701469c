use serde::{Deserialize, Serialize};
use std::fmt;

/// Logistic slope used when mapping a probability to a score.
const LOGISTIC_K: f64 = 8.0;

/// Confidence score on a 0..=100 scale, as shown next to a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Confidence(u8);

impl Confidence {
    pub fn new(value: u8) -> Result<Self, String> {
        if value > 100 {
            return Err(format!("Confidence must be between 0 and 100, got {value}"));
        }
        Ok(Confidence(value))
    }

    /// Logistic mapping of a model probability, clamped to 1..=99.
    pub fn from_probability(p: f64) -> Self {
        let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.5 };
        let score = 100.0 / (1.0 + (-LOGISTIC_K * (p - 0.5)).exp());
        Confidence(score.round().clamp(1.0, 99.0) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Confidence {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Confidence::new(value)
    }
}

impl From<Confidence> for u8 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Confidence(50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(Confidence::new(101).is_err());
        assert_eq!(Confidence::new(100).unwrap().value(), 100);
    }

    #[test]
    fn test_coin_flip_is_fifty() {
        assert_eq!(Confidence::from_probability(0.5).value(), 50);
    }

    #[test]
    fn test_monotonic_and_clamped() {
        let mut last = 0;
        for i in 0..=20 {
            let c = Confidence::from_probability(i as f64 / 20.0).value();
            assert!(c >= last);
            last = c;
        }
        assert_eq!(Confidence::from_probability(1.0).value(), 98);
        assert_eq!(Confidence::from_probability(0.0).value(), 2);
        assert_eq!(Confidence::from_probability(f64::NAN).value(), 50);
    }

    #[test]
    fn test_serde_as_number() {
        let c = Confidence::new(72).unwrap();
        assert_eq!(serde_json::to_string(&c).unwrap(), "72");
        assert!(serde_json::from_str::<Confidence>("140").is_err());
    }
}
