use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of supported hosting providers.
///
/// Adding a provider means adding a variant here plus an
/// `ImageProvider` implementation registered with the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "imgbb")]
    Imgbb,
    #[serde(rename = "cloudinary")]
    Cloudinary,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Imgbb => "imgbb",
            ProviderKind::Cloudinary => "cloudinary",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "imgbb" => Ok(ProviderKind::Imgbb),
            "cloudinary" => Ok(ProviderKind::Cloudinary),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

/// Provider credentials and endpoint configuration.
///
/// Which fields are required depends on the provider: ImgBB needs `api_key`,
/// Cloudinary needs `cloud_name` (with `upload_preset` optional). `base_url`
/// overrides the provider's default endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    pub api_key: String,
    pub cloud_name: Option<String>,
    pub upload_preset: Option<String>,
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Configuration for ImgBB uploads.
    pub fn imgbb(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Configuration for unsigned Cloudinary uploads.
    pub fn cloudinary(cloud_name: impl Into<String>, upload_preset: Option<String>) -> Self {
        Self {
            cloud_name: Some(cloud_name.into()),
            upload_preset,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_round_trips_through_strings() {
        assert_eq!(ProviderKind::Imgbb.as_str(), "imgbb");
        assert_eq!("cloudinary".parse(), Ok(ProviderKind::Cloudinary));
        assert!("imgur".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn config_deserializes_from_camel_case_json() {
        let config: ProviderConfig = serde_json::from_str(
            r#"{"apiKey":"k","cloudName":"demo","uploadPreset":"preset"}"#,
        )
        .unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.cloud_name.as_deref(), Some("demo"));
        assert_eq!(config.upload_preset.as_deref(), Some("preset"));
        assert_eq!(config.base_url, None);
    }
}
