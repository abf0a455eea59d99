use crate::types::err::{self};

/// A named configuration value with an inclusive range of permitted values.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: PartialOrd + std::fmt::Display> ConfigOption<T> {
    /// Sets the value of the option, so long as the value is within range.
    ///
    /// ```rust
    /// # use otter_bmc::config::ConfigOption;
    /// let mut lean = ConfigOption { name: "polarity_lean", min: 0.0, max: 1.0, value: 0.0 };
    /// assert!(lean.set(0.5).is_ok());
    /// assert!(lean.set(1.5).is_err());
    /// assert_eq!(lean.value, 0.5);
    /// ```
    pub fn set(&mut self, value: T) -> Result<(), err::ConfigError> {
        if value < self.min || value > self.max {
            return Err(err::ConfigError::OutOfRange {
                name: self.name,
                value: value.to_string(),
            });
        }
        self.value = value;
        Ok(())
    }
}
