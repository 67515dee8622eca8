//! Configuration validation.

use crate::config::schema::{Config, TempConfig};
use crate::error::{Error, Result};

/// Largest accepted `temp.random_len`.
pub const MAX_RANDOM_LEN: usize = 64;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use iopath::config::{Config, ConfigValidator, TempConfig};
///
/// let config = Config {
///     temp: Some(TempConfig { random_len: Some(0), ..Default::default() }),
///     ..Default::default()
/// };
/// assert!(ConfigValidator::validate(&config).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error naming the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(temp) = &config.temp {
            Self::validate_temp(temp)?;
        }
        Ok(())
    }

    fn validate_temp(temp: &TempConfig) -> Result<()> {
        if let Some(prefix) = &temp.prefix {
            Self::validate_affix("temp.prefix", prefix)?;
        }
        if let Some(suffix) = &temp.suffix {
            Self::validate_affix("temp.suffix", suffix)?;
        }

        if let Some(len) = temp.random_len {
            if len == 0 || len > MAX_RANDOM_LEN {
                return Err(Error::Validation {
                    field: "temp.random_len".into(),
                    message: format!("Must be between 1 and {MAX_RANDOM_LEN}, got {len}"),
                });
            }
        }

        if temp.max_attempts == Some(0) {
            return Err(Error::Validation {
                field: "temp.max_attempts".into(),
                message: "Must be at least 1".into(),
            });
        }

        Ok(())
    }

    fn validate_affix(field: &str, value: &str) -> Result<()> {
        if value.contains('/') || value.contains('\\') {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("Cannot contain path separators: '{value}'"),
            });
        }
        if value.contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot contain null bytes".into(),
            });
        }
        Ok(())
    }
}
