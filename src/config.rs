//! Session parameters and their parsing. The same parsers back the
//! command-line flags and the interactive prompts.

use crate::policy::Policy;
use clap::ValueEnum;
use core::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid element count `{0}`: enter a positive integer")]
    InvalidMaxElements(String),
    #[error("invalid load factor `{0}`: enter a positive number")]
    InvalidLoadFactor(String),
    #[error("invalid mode `{0}`: enter NORMAL or DEBUG")]
    InvalidMode(String),
}

/// Output verbosity, decided once per session.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Mode {
    #[default]
    Normal,
    /// Also report hash values and every probe on the diagnostic stream.
    Debug,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.eq_ignore_ascii_case("normal") {
            Ok(Mode::Normal)
        } else if t.eq_ignore_ascii_case("debug") {
            Ok(Mode::Debug)
        } else {
            Err(ConfigError::InvalidMode(t.to_string()))
        }
    }
}

pub fn parse_max_elements(s: &str) -> Result<usize, ConfigError> {
    match s.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidMaxElements(s.trim().to_string())),
    }
}

pub fn parse_load_factor(s: &str) -> Result<f64, ConfigError> {
    match s.trim().parse::<f64>() {
        Ok(lf) if lf.is_finite() && lf > 0.0 => Ok(lf),
        _ => Err(ConfigError::InvalidLoadFactor(s.trim().to_string())),
    }
}

/// Fully resolved session parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    pub max_elements: usize,
    pub load_factor: f64,
    pub mode: Mode,
    pub policy: Policy,
}

/// Parameters known before the session starts; missing ones are prompted
/// for.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PartialConfig {
    pub max_elements: Option<usize>,
    pub load_factor: Option<f64>,
    pub mode: Option<Mode>,
    pub policy: Policy,
}

impl PartialConfig {
    pub fn complete(&self) -> Option<Config> {
        Some(Config {
            max_elements: self.max_elements?,
            load_factor: self.load_factor?,
            mode: self.mode?,
            policy: self.policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_is_case_insensitive() {
        assert_eq!("NORMAL".parse::<Mode>(), Ok(Mode::Normal));
        assert_eq!("debug".parse::<Mode>(), Ok(Mode::Debug));
        assert_eq!(" DeBuG ".parse::<Mode>(), Ok(Mode::Debug));
        assert_eq!(
            "verbose".parse::<Mode>(),
            Err(ConfigError::InvalidMode("verbose".to_string()))
        );
    }

    #[test]
    fn element_count_must_be_positive() {
        assert_eq!(parse_max_elements("5"), Ok(5));
        assert!(parse_max_elements("0").is_err());
        assert!(parse_max_elements("-3").is_err());
        assert!(parse_max_elements("five").is_err());
    }

    #[test]
    fn load_factor_must_be_positive_and_finite() {
        assert_eq!(parse_load_factor("0.5"), Ok(0.5));
        assert_eq!(parse_load_factor("2"), Ok(2.0));
        for bad in ["0", "-0.5", "abc", "inf", "NaN"] {
            assert!(parse_load_factor(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn partial_completes_only_when_all_known() {
        let mut p = PartialConfig {
            max_elements: Some(5),
            load_factor: Some(0.5),
            ..PartialConfig::default()
        };
        assert!(p.complete().is_none());
        p.mode = Some(Mode::Debug);
        let c = p.complete().unwrap();
        assert_eq!(c.max_elements, 5);
        assert_eq!(c.mode, Mode::Debug);
    }
}
