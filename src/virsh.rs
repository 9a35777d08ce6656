//! virsh invocation.
//!
//! Runs the `virsh` client for the two node device queries this crate needs.
//! Calls block until virsh exits; there is no timeout.

use crate::capability::CapabilityType;
use crate::config::Config;
use crate::error::{NodedevError, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Exit status and captured output of one command
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CmdResult {
    pub exit_status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CmdResult {
    pub fn success(&self) -> bool {
        self.exit_status == 0
    }
}

/// Something that can describe and enumerate node devices.
pub trait NodedevSource {
    /// `nodedev-dumpxml <name>`
    fn nodedev_dumpxml(&self, name: &str) -> Result<CmdResult>;

    /// `nodedev-list [--cap <type>]`
    fn nodedev_list(&self, cap: Option<CapabilityType>) -> Result<CmdResult>;
}

#[derive(Debug, Clone)]
pub struct Virsh {
    binary: PathBuf,
    uri: Option<String>,
}

impl Default for Virsh {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Virsh {
    pub fn from_config(config: &Config) -> Self {
        Self {
            binary: config.virsh_binary.clone(),
            uri: config.connect_uri.clone(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<CmdResult> {
        let mut cmd = Command::new(&self.binary);
        if let Some(uri) = &self.uri {
            cmd.arg("-c").arg(uri);
        }
        cmd.args(args);

        debug!(program = %self.binary.display(), ?args, uri = ?self.uri, "running virsh");
        let output = cmd.output().map_err(|source| NodedevError::CommandSpawn {
            program: self.binary.clone(),
            source,
        })?;

        // A signal-terminated virsh has no code; report it as a failure
        let result = CmdResult {
            exit_status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            exit_status = result.exit_status,
            stdout_len = result.stdout.len(),
            "virsh finished"
        );
        Ok(result)
    }
}

impl NodedevSource for Virsh {
    fn nodedev_dumpxml(&self, name: &str) -> Result<CmdResult> {
        self.run(&["nodedev-dumpxml", name])
    }

    fn nodedev_list(&self, cap: Option<CapabilityType>) -> Result<CmdResult> {
        match cap {
            Some(kind) => self.run(&["nodedev-list", "--cap", kind.as_str()]),
            None => self.run(&["nodedev-list"]),
        }
    }
}
