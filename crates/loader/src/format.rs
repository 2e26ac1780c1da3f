//! Decoding raw file bytes into a structured value

use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use types::error::DecodeError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text format of an env file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentFormat {
    #[default]
    Json,
    Yaml,
}

impl ContentFormat {
    /// Pick the format from a path's extension; anything but `.yaml`/`.yml`
    /// is treated as JSON.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ContentFormat::Yaml
            }
            _ => ContentFormat::Json,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ContentFormat::Json => "json",
            ContentFormat::Yaml => "yaml",
        }
    }

    /// Decode raw bytes into a structured value
    pub fn decode(&self, raw: &[u8]) -> Result<Value, DecodeError> {
        let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
        match self {
            ContentFormat::Json => Ok(serde_json::from_slice(raw)?),
            ContentFormat::Yaml => Ok(serde_yaml::from_slice(raw)?),
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ContentFormat::Json),
            "yaml" | "yml" => Ok(ContentFormat::Yaml),
            other => Err(format!("Unknown content format: {}. Valid formats: json, yaml", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_from_extension() {
        assert_eq!(ContentFormat::detect(Path::new("env/prod.json")), ContentFormat::Json);
        assert_eq!(ContentFormat::detect(Path::new("env/prod.yaml")), ContentFormat::Yaml);
        assert_eq!(ContentFormat::detect(Path::new("env/prod.YML")), ContentFormat::Yaml);
        assert_eq!(ContentFormat::detect(Path::new("env/prod")), ContentFormat::Json);
    }

    #[test]
    fn test_decode_json_object() {
        let value = ContentFormat::Json
            .decode(br#"{"name":"svc","region":"us-east-1"}"#)
            .unwrap();
        assert_eq!(value, json!({"name": "svc", "region": "us-east-1"}));
    }

    #[test]
    fn test_decode_skips_bom() {
        let value = ContentFormat::Json.decode(b"\xEF\xBB\xBF{\"a\":1}").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_decode_yaml_object() {
        let value = ContentFormat::Yaml
            .decode(b"name: svc\nreplicas: 3\n")
            .unwrap();
        assert_eq!(value, json!({"name": "svc", "replicas": 3}));
    }

    #[test]
    fn test_decode_malformed_json() {
        assert!(ContentFormat::Json.decode(b"{\"name\": ").is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("JSON".parse::<ContentFormat>(), Ok(ContentFormat::Json));
        assert_eq!("yml".parse::<ContentFormat>(), Ok(ContentFormat::Yaml));
        assert!("toml".parse::<ContentFormat>().is_err());
    }
}
