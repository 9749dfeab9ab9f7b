//! Configuration for the Dojo client toolkit.
//!
//! [`DojoConfig`] holds everything the widget layer needs to know about the
//! Dojo release the page is built against: the version (some widgets require
//! different client modules before 1.3), the base URL Dojo is served from
//! (used for widget CSS resources), and the Dijit theme.
//!
//! All fields have sensible defaults and can be loaded from a TOML snippet.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DijitError, DijitResult};

/// A Dojo release version, ordered so widget code can branch on it.
///
/// Parsed from "1", "1.3", or "1.3.2"-style strings; missing components
/// default to zero.
///
/// # Examples
///
/// ```
/// use dijit_forms_core::DojoVersion;
///
/// let v: DojoVersion = "1.2.3".parse().unwrap();
/// assert!(v < DojoVersion::new(1, 3, 0));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct DojoVersion {
    /// Major release number.
    pub major: u32,
    /// Minor release number.
    pub minor: u32,
    /// Patch release number.
    pub patch: u32,
}

impl DojoVersion {
    /// Creates a version from its components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for DojoVersion {
    type Err = DijitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = [0_u32; 3];
        let mut count = 0;
        for (i, component) in s.split('.').enumerate() {
            if i >= 3 {
                return Err(DijitError::ImproperlyConfigured(format!(
                    "invalid dojo version {s:?}: too many components"
                )));
            }
            parts[i] = component.parse().map_err(|_| {
                DijitError::ImproperlyConfigured(format!("invalid dojo version {s:?}"))
            })?;
            count = i + 1;
        }
        if count == 0 {
            return Err(DijitError::ImproperlyConfigured(
                "empty dojo version".to_string(),
            ));
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl fmt::Display for DojoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl TryFrom<String> for DojoVersion {
    type Error = DijitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<DojoVersion> for String {
    fn from(v: DojoVersion) -> Self {
        v.to_string()
    }
}

/// Configuration for the Dojo toolkit integration.
///
/// # Examples
///
/// ```
/// use dijit_forms_core::DojoConfig;
///
/// let config = DojoConfig::default();
/// assert_eq!(config.theme, "claro");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DojoConfig {
    /// The Dojo release the page is built against.
    #[serde(default = "default_version")]
    pub version: DojoVersion,
    /// URL prefix under which the Dojo distribution is served.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// The Dijit theme name (applied by the page template).
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Whether debug mode is enabled (affects logging format).
    #[serde(default)]
    pub debug: bool,
    /// The tracing filter directive (e.g. "info", "dijit_forms=debug").
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_version() -> DojoVersion {
    DojoVersion::new(1, 9, 0)
}

fn default_base_url() -> String {
    "/static/dojo".to_string()
}

fn default_theme() -> String {
    "claro".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DojoConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            base_url: default_base_url(),
            theme: default_theme(),
            debug: false,
            log_level: default_log_level(),
        }
    }
}

impl DojoConfig {
    /// Loads a configuration from a TOML snippet, filling in defaults for
    /// missing fields.
    pub fn from_toml_str(raw: &str) -> DijitResult<Self> {
        let config = toml::from_str(raw)?;
        Ok(config)
    }
}
