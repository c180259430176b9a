//! Sampling parameters passed with every generation request.

use crate::session::SessionError;

pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);
pub const TOP_K_RANGE: (u32, u32) = (1, 50);

/// Temperature and top-k, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingConfig {
    temperature: f64,
    top_k: u32,
}

impl SamplingConfig {
    pub fn new(temperature: f64, top_k: u32) -> Result<Self, SessionError> {
        let (t_min, t_max) = TEMPERATURE_RANGE;
        if !(t_min..=t_max).contains(&temperature) {
            return Err(SessionError::InvalidSampling(format!(
                "temperature = {temperature} is out of range [{t_min}, {t_max}]"
            )));
        }
        let (k_min, k_max) = TOP_K_RANGE;
        if !(k_min..=k_max).contains(&top_k) {
            return Err(SessionError::InvalidSampling(format!(
                "top_k = {top_k} is out of range [{k_min}, {k_max}]"
            )));
        }
        Ok(Self { temperature, top_k })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }

    pub fn with_temperature(self, temperature: f64) -> Result<Self, SessionError> {
        Self::new(temperature, self.top_k)
    }

    pub fn with_top_k(self, top_k: u32) -> Result<Self, SessionError> {
        Self::new(self.temperature, top_k)
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(SamplingConfig::new(0.0, 1).is_ok());
        assert!(SamplingConfig::new(2.0, 50).is_ok());
    }

    #[test]
    fn rejects_temperature_out_of_range() {
        let err = SamplingConfig::new(2.1, 10).unwrap_err();
        assert!(matches!(err, SessionError::InvalidSampling(_)));
        assert!(err.to_string().contains("temperature"));
        assert!(SamplingConfig::new(-0.5, 10).is_err());
        assert!(SamplingConfig::new(f64::NAN, 10).is_err());
    }

    #[test]
    fn rejects_top_k_out_of_range() {
        let err = SamplingConfig::new(1.0, 0).unwrap_err();
        assert!(err.to_string().contains("top_k"));
        assert!(SamplingConfig::new(1.0, 51).is_err());
    }

    #[test]
    fn with_helpers_keep_other_field() {
        let config = SamplingConfig::default().with_top_k(5).unwrap();
        assert_eq!(config.top_k(), 5);
        assert!((config.temperature() - 0.7).abs() < f64::EPSILON);

        let config = config.with_temperature(1.5).unwrap();
        assert_eq!(config.top_k(), 5);
        assert!((config.temperature() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn default_is_valid() {
        let d = SamplingConfig::default();
        assert_eq!(SamplingConfig::new(d.temperature(), d.top_k()).unwrap(), d);
    }
}
