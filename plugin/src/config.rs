use std::{
    io,
    path::{Path, PathBuf},
};

/// Environment variable overriding config file location.
pub const CONFIG_PATH_VAR: &str = "EXAMPLE_TRACKING_CONFIG_PATH";

/// Config file location when `CONFIG_PATH_VAR` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "./ExamplePlugin.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::Error,
    },
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
pub struct PluginConfig {
    #[serde(default)]
    pub pose: PoseConfig,

    #[serde(default)]
    pub center: CenterConfig,
}

/// Pose reported for every joint while no real sensor is attached.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
pub struct PoseConfig {
    #[serde(default = "default_pose_position")]
    pub position: [f64; 3],
    #[serde(default = "default_rotation")]
    pub rotation: [f64; 4],
}

impl Default for PoseConfig {
    fn default() -> Self {
        PoseConfig {
            position: default_pose_position(),
            rotation: default_rotation(),
        }
    }
}

/// Tracking space center expressed in VR space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
pub struct CenterConfig {
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default = "default_rotation")]
    pub rotation: [f64; 4],
}

impl Default for CenterConfig {
    fn default() -> Self {
        CenterConfig {
            position: [0.0; 3],
            rotation: default_rotation(),
        }
    }
}

impl PluginConfig {
    /// Config file path for this process.
    pub fn path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_owned(),
                source,
            })?;

        Self::parse(path, &text)
    }

    /// Same as `load` but missing file yields default config.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                tracing::debug!(
                    "No config at {}, using defaults",
                    path.display()
                );
                Ok(PluginConfig::default())
            }
            result => result,
        }
    }

    fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        ron::de::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }
}

fn default_pose_position() -> [f64; 3] {
    [1.1, 1.2, 1.3]
}

fn default_rotation() -> [f64; 4] {
    [1.0, 0.0, 0.0, 0.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<PluginConfig, ConfigError> {
        PluginConfig::parse(Path::new("test.ron"), text)
    }

    #[test]
    fn empty_config_is_default() {
        let config = parse("()").unwrap();
        assert_eq!(config, PluginConfig::default());
        assert_eq!(config.pose.position, [1.1, 1.2, 1.3]);
        assert_eq!(config.pose.rotation, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(config.center.position, [0.0; 3]);
    }

    #[test]
    fn partial_config() {
        let config = parse(
            "(
                pose: (position: (0.0, 1.7, 0.0)),
                center: (rotation: (0.0, 0.0, 1.0, 0.0)),
            )",
        )
        .unwrap();

        assert_eq!(config.pose.position, [0.0, 1.7, 0.0]);
        assert_eq!(config.pose.rotation, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(config.center.position, [0.0; 3]);
        assert_eq!(config.center.rotation, [0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn malformed_config_is_error() {
        match parse("(pose: 42)") {
            Err(ConfigError::Parse { path, .. }) => {
                assert_eq!(path, Path::new("test.ron"))
            }
            other => panic!("Unexpected result {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_default() {
        let path = std::env::temp_dir().join("example-tracking-missing.ron");
        let _ = std::fs::remove_file(&path);

        assert!(matches!(
            PluginConfig::load(&path),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(
            PluginConfig::load_or_default(&path).unwrap(),
            PluginConfig::default()
        );
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!(
            "example-tracking-{}.ron",
            std::process::id()
        ));
        std::fs::write(&path, "(center: (position: (1.0, 0.0, -2.0)))")
            .unwrap();

        let config = PluginConfig::load(&path);
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.unwrap().center.position, [1.0, 0.0, -2.0]);
    }
}
