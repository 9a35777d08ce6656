use crate::error::{NodedevError, Result};
use std::path::PathBuf;

/// Program used when nothing overrides it
pub const DEFAULT_VIRSH: &str = "virsh";

/// Environment variable naming an alternative virsh binary
pub const VIRSH_ENV: &str = "NODEDEV_VIRSH";

/// libvirt's own variable for the default connection URI
pub const URI_ENV: &str = "LIBVIRT_DEFAULT_URI";

/// How to reach libvirt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// virsh executable, looked up on PATH when not absolute
    pub virsh_binary: PathBuf,
    /// Connection URI passed as `virsh -c`; libvirt picks its default when unset
    pub connect_uri: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            virsh_binary: PathBuf::from(DEFAULT_VIRSH),
            connect_uri: None,
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with [`VIRSH_ENV`] and [`URI_ENV`]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let mut config = Self::default();
        if let Some(binary) = lookup(VIRSH_ENV).filter(|v| !v.is_empty()) {
            config.virsh_binary = PathBuf::from(binary);
        }
        config.connect_uri = lookup(URI_ENV).filter(|v| !v.is_empty());
        config
    }

    #[must_use]
    pub fn with_virsh_binary<P: Into<PathBuf>>(mut self, binary: P) -> Self {
        self.virsh_binary = binary.into();
        self
    }

    #[must_use]
    pub fn with_connect_uri<S: Into<String>>(mut self, uri: S) -> Self {
        self.connect_uri = Some(uri.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.virsh_binary.as_os_str().is_empty() {
            return Err(NodedevError::configuration("virsh binary must not be empty"));
        }
        if let Some(uri) = &self.connect_uri {
            if uri.trim().is_empty() {
                return Err(NodedevError::configuration("connect URI must not be blank"));
            }
        }
        Ok(())
    }
}
