//! Live queries against libvirt.
//!
//! These helpers fetch a device description through a [`NodedevSource`] and
//! compose it with the capability tables, producing the two maps used to
//! cross-check what libvirt reports against the kernel's own sysfs files.

use crate::accessors::FieldValue;
use crate::capability::{CapabilityDescriptor, CapabilityType};
use crate::device::NodeDevice;
use crate::error::{NodedevError, Result};
use crate::virsh::NodedevSource;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

impl NodeDevice {
    /// Build a device from `nodedev-dumpxml <name>`, adopting its output
    /// verbatim. A nonzero exit status fails with virsh's stderr.
    pub fn from_dumpxml<S: NodedevSource + ?Sized>(name: &str, source: &S) -> Result<Self> {
        let result = source.nodedev_dumpxml(name)?;
        if !result.success() {
            return Err(NodedevError::DumpFailed {
                device: name.to_string(),
                status: result.exit_status,
                stderr: result.stderr.trim().to_string(),
            });
        }
        debug!(device = name, bytes = result.stdout.len(), "dumped node device");
        Self::from_xml(&result.stdout)
    }
}

/// Capability values libvirt reports for `name`, keyed like
/// [`key_to_sysfs_path`].
pub fn key_to_value<S: NodedevSource + ?Sized>(
    name: &str,
    source: &S,
) -> Result<BTreeMap<&'static str, FieldValue>> {
    let device = NodeDevice::from_dumpxml(name, source)?;
    let capability = device.capability()?;
    capability.field_to_value()
}

/// Sysfs files that independently report each value of [`key_to_value`].
pub fn key_to_sysfs_path<S: NodedevSource + ?Sized>(
    name: &str,
    source: &S,
) -> Result<BTreeMap<&'static str, PathBuf>> {
    NodeDevice::from_dumpxml(name, source)?.field_to_sysfs_path()
}

/// Device names known to libvirt, optionally limited to one capability type.
pub fn list_devices<S: NodedevSource + ?Sized>(
    source: &S,
    cap: Option<CapabilityType>,
) -> Result<Vec<String>> {
    let result = source.nodedev_list(cap)?;
    if !result.success() {
        return Err(NodedevError::ListFailed {
            status: result.exit_status,
            stderr: result.stderr.trim().to_string(),
        });
    }
    Ok(result
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
