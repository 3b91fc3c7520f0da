//! Codec settings shared across the PLG pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;
use std::str::FromStr;

use crate::constants::{JSON_COORD_DECIMALS, MAX_DECIMALS, TEXT_FLOAT_DECIMALS};

/// Where exported vertex colors come from.
///
/// # Examples
/// ```
/// use config::settings::ColorSource;
/// assert_eq!("heuristic".parse::<ColorSource>().unwrap(), ColorSource::Heuristic);
/// assert_eq!(ColorSource::default(), ColorSource::VertexLayer);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSource {
    /// Every vertex color is exported as `0`.
    None,
    /// Only exact black and white corners are tagged; everything else is `0`.
    Heuristic,
    /// Every corner color is packed as ARGB.
    #[default]
    VertexLayer,
}

impl ColorSource {
    /// Returns the command-line spelling of this source.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorSource::None => "none",
            ColorSource::Heuristic => "heuristic",
            ColorSource::VertexLayer => "vertex-layer",
        }
    }
}

impl fmt::Display for ColorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorSource {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(ColorSource::None),
            "heuristic" => Ok(ColorSource::Heuristic),
            "vertex-layer" | "vertex_layer" | "layer" => Ok(ColorSource::VertexLayer),
            other => Err(ConfigError::UnknownColorSource(other.to_string())),
        }
    }
}

/// Immutable snapshot of the codec settings used by one export or import.
///
/// # Examples
/// ```
/// use config::settings::CodecConfig;
/// let config = CodecConfig::default();
/// assert_eq!(config.json_decimals, 4);
/// assert_eq!(config.text_decimals, 6);
/// assert!(!config.emit_text_sidecar);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// How vertex colors are gathered on export.
    pub color_source: ColorSource,
    /// Decimal places kept for coordinates in the JSON form.
    pub json_decimals: u32,
    /// Fixed decimal places of floats in the Y-JSON form.
    pub text_decimals: u32,
    /// Whether export also writes the Y-JSON `.txt` sidecar.
    pub emit_text_sidecar: bool,
}

impl CodecConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// decimal counts.
    ///
    /// # Examples
    /// ```
    /// use config::settings::{CodecConfig, ColorSource};
    /// let cfg = CodecConfig::new(ColorSource::Heuristic, 4, 6).expect("valid config");
    /// assert_eq!(cfg.color_source, ColorSource::Heuristic);
    /// assert!(CodecConfig::new(ColorSource::None, 4, 40).is_err());
    /// ```
    pub fn new(
        color_source: ColorSource,
        json_decimals: u32,
        text_decimals: u32,
    ) -> Result<Self, ConfigError> {
        if json_decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidJsonDecimals(json_decimals));
        }
        if text_decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidTextDecimals(text_decimals));
        }
        Ok(Self {
            color_source,
            json_decimals,
            text_decimals,
            emit_text_sidecar: false,
        })
    }

    /// Returns a copy with the Y-JSON sidecar switched on or off.
    pub fn with_text_sidecar(mut self, emit: bool) -> Self {
        self.emit_text_sidecar = emit;
        self
    }

    /// Returns a copy using another color source.
    pub fn with_color_source(mut self, color_source: ColorSource) -> Self {
        self.color_source = color_source;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            color_source: ColorSource::default(),
            json_decimals: JSON_COORD_DECIMALS,
            text_decimals: TEXT_FLOAT_DECIMALS,
            emit_text_sidecar: false,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the JSON decimal count exceeds `f64` precision.
    InvalidJsonDecimals(u32),
    /// Raised when the text decimal count exceeds `f64` precision.
    InvalidTextDecimals(u32),
    /// Raised when a color source name is not recognized.
    UnknownColorSource(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidJsonDecimals(value) => {
                write!(f, "json_decimals must be <= {MAX_DECIMALS}: {value}")
            }
            ConfigError::InvalidTextDecimals(value) => {
                write!(f, "text_decimals must be <= {MAX_DECIMALS}: {value}")
            }
            ConfigError::UnknownColorSource(value) => {
                write!(
                    f,
                    "unknown color source '{value}' (expected none, heuristic or vertex-layer)"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
