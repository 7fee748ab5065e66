//! Range checks for model parameter structs.
//!
//! Each returns `ConfigError::InvalidParameter` naming the field.

use et_core::{ConfigError, ConfigResult};

/// `0 <= v <= 1`.
pub fn unit(name: &'static str, v: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("must be between 0 and 1, got {v}")))
    }
}

/// `0 < v < 1`.
pub fn open_unit(name: &'static str, v: f64) -> ConfigResult<()> {
    if v > 0.0 && v < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("must be strictly between 0 and 1, got {v}")))
    }
}

/// `v >= 1`.
pub fn positive(name: &'static str, v: u32) -> ConfigResult<()> {
    if v >= 1 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, "must be a positive integer"))
    }
}

/// `v > min`.
pub fn greater_than(name: &'static str, v: u32, min: u32) -> ConfigResult<()> {
    if v > min {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("must be greater than {min}, got {v}")))
    }
}
