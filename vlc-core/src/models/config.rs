use serde::{Deserialize, Serialize};

use super::error::VlcError;

/// HTTP user agent reported by the engine for network access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgent {
    /// Human-readable application name, e.g. "FooBar player 1.2.3".
    pub name: String,
    /// HTTP user agent, e.g. "FooBar/1.2.3 Python/2.6.0".
    pub http: String,
}

/// Application identity used by some outputs (e.g. PulseAudio stream names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppId {
    /// Reverse-DNS identifier, e.g. "com.acme.foobar".
    pub id: String,
    pub version: String,
    pub icon: String,
}

/// Configuration for creating an engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// Command-line style arguments passed to the engine factory.
    pub args: Vec<String>,

    pub user_agent: Option<UserAgent>,

    pub app_id: Option<AppId>,
}

impl InstanceConfig {
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON, then validate it.
    pub fn from_json(json: &str) -> Result<Self, VlcError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| VlcError::ConfigurationFailed(format!("invalid instance config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), VlcError> {
        let mut strings: Vec<&str> = self.args.iter().map(String::as_str).collect();
        if let Some(ref ua) = self.user_agent {
            strings.extend([ua.name.as_str(), ua.http.as_str()]);
        }
        if let Some(ref app) = self.app_id {
            if app.id.is_empty() {
                return Err(VlcError::ConfigurationFailed("app id must not be empty".into()));
            }
            strings.extend([app.id.as_str(), app.version.as_str(), app.icon.as_str()]);
        }
        if let Some(bad) = strings.into_iter().find(|s| s.contains('\0')) {
            return Err(VlcError::InvalidString(bad.to_string()));
        }
        Ok(())
    }
}
