use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container configuration loaded from guard-docker.yaml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerConfig {
    /// Docker image to run (required to start or stop)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Image tag, also folded into the container name
    #[serde(
        default,
        deserialize_with = "scalar::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub tag: Option<String>,

    /// Host side of the port mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_port: Option<u16>,

    /// Container side of the port mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_port: Option<u16>,

    /// Environment variables, in the order they are passed to `docker run`
    #[serde(default, with = "env_vars", skip_serializing_if = "Vec::is_empty")]
    pub env_vars: Vec<(String, String)>,
}

/// Values given on the command line, layered over the loaded file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub image: Option<String>,
    pub tag: Option<String>,
    pub host_port: Option<u16>,
    pub container_port: Option<u16>,
    pub env_vars: Vec<(String, String)>,
}

impl ContainerConfig {
    /// Load container configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse a configuration from YAML text. An empty document yields the default config.
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ContainerConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Serialize the configuration back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize container config")
    }

    /// Name the container is started under and later stopped by.
    ///
    /// `guard-<image>` without a tag, `guard-<image>-<tag>` with one.
    pub fn container_name(&self) -> Option<String> {
        let image = self.image.as_deref()?;
        Some(match &self.tag {
            Some(tag) => format!("guard-{}-{}", image, tag),
            None => format!("guard-{}", image),
        })
    }

    /// Image reference handed to `docker run`
    pub fn image_reference(&self) -> Option<String> {
        let image = self.image.as_deref()?;
        Some(match &self.tag {
            Some(tag) => format!("{}:{}", image, tag),
            None => image.to_string(),
        })
    }

    /// `HOST:CONTAINER`, only when both sides are configured
    pub fn port_mapping(&self) -> Option<String> {
        match (self.host_port, self.container_port) {
            (Some(host), Some(container)) => Some(format!("{}:{}", host, container)),
            _ => None,
        }
    }

    /// Set an environment variable, keeping the position of an existing key
    pub fn set_env(&mut self, key: &str, value: &str) {
        match self.env_vars.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.env_vars.push((key.to_string(), value.to_string())),
        }
    }

    /// Layer command line overrides on top of this configuration
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if overrides.image.is_some() {
            self.image = overrides.image;
        }
        if overrides.tag.is_some() {
            self.tag = overrides.tag;
        }
        if overrides.host_port.is_some() {
            self.host_port = overrides.host_port;
        }
        if overrides.container_port.is_some() {
            self.container_port = overrides.container_port;
        }
        for (key, value) in &overrides.env_vars {
            self.set_env(key, value);
        }
        self
    }

    /// Create a template configuration for `guard-docker init`
    pub fn template(image: &str) -> Self {
        ContainerConfig {
            image: Some(image.to_string()),
            tag: Some("latest".to_string()),
            host_port: Some(8080),
            container_port: Some(8080),
            env_vars: vec![("RUST_LOG".to_string(), "info".to_string())],
        }
    }
}

/// YAML scalars accepted where a string is expected (`tag: 7`).
///
/// Decimals are refused: `1.10` would come back as `1.1` and name a different image.
mod scalar {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    pub(super) enum Scalar {
        Null,
        Str(String),
        Int(i64),
        Bool(bool),
        Float(f64),
    }

    impl Scalar {
        /// Text passed to docker for the value of `field`; null becomes empty.
        pub(super) fn into_string<E: Error>(self, field: &str) -> Result<String, E> {
            match self {
                Scalar::Null => Ok(String::new()),
                Scalar::Str(s) => Ok(s),
                Scalar::Int(i) => Ok(i.to_string()),
                Scalar::Bool(b) => Ok(b.to_string()),
                Scalar::Float(f) => Err(E::custom(format!(
                    "{} is the decimal number {}; quote it (e.g. \"1.10\") to keep its exact text",
                    field, f
                ))),
            }
        }
    }

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Scalar>::deserialize(deserializer)?
            .map(|value| value.into_string("tag"))
            .transpose()
    }
}

/// Ordered `KEY: value` mapping stored as a list of pairs.
mod env_vars {
    use super::scalar::Scalar;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(vars: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(vars.len()))?;
        for (key, value) in vars {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EnvVisitor;

        impl<'de> Visitor<'de> for EnvVisitor {
            type Value = Vec<(String, String)>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of environment variable names to values")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Vec::new())
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut vars = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Scalar>()? {
                    let value = value.into_string(&key)?;
                    vars.push((key, value));
                }
                Ok(vars)
            }
        }

        deserializer.deserialize_any(EnvVisitor)
    }
}
