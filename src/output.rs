//! Output formatting.
//!
//! Every command renders either human-readable terminal text with colored
//! headings, or pretty-printed JSON for machine consumption.

use crate::accessors::FieldValue;
use crate::capability::{CapabilityDescriptor, CapabilityType};
use crate::device::NodeDevice;
use crate::error::{NodedevError, Result};
use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Everything known about one device
#[derive(Debug, Clone, Serialize)]
pub struct DeviceReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub capability_type: CapabilityType,
    /// Absent when the capability type has no derivable sysfs directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sysfs_path: Option<PathBuf>,
    /// Every modeled field present in the document
    pub fields: BTreeMap<&'static str, FieldValue>,
    /// Sysfs file for each cross-checkable field
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sysfs_files: BTreeMap<&'static str, PathBuf>,
}

impl DeviceReport {
    pub fn from_device(device: &NodeDevice) -> Result<Self> {
        let capability = device.capability()?;
        let kind = capability.capability_type();

        let mut fields = BTreeMap::new();
        for spec in kind.fields() {
            match capability.field(spec.name) {
                Ok(value) => {
                    fields.insert(spec.name, value);
                }
                // Optional elements are routinely left out by libvirt
                Err(NodedevError::MissingElement { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        let (sysfs_path, sysfs_files) = match device.sysfs_path() {
            Ok(path) => (Some(path), device.field_to_sysfs_path()?),
            Err(NodedevError::SysfsPathUnsupported { .. }) => (None, BTreeMap::new()),
            Err(e) => return Err(e),
        };

        Ok(Self {
            name: device.name()?.to_string(),
            parent: device.parent().map(str::to_string),
            capability_type: kind,
            sysfs_path,
            fields,
            sysfs_files,
        })
    }
}

pub fn format_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
}

pub fn format_report_terminal(report: &DeviceReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "Device:".bold(), report.name.cyan()));
    if let Some(parent) = &report.parent {
        out.push_str(&format!("{} {}\n", "Parent:".bold(), parent));
    }
    out.push_str(&format!("{} {}\n", "Capability:".bold(), report.capability_type));
    let sysfs = match &report.sysfs_path {
        Some(path) => path.display().to_string(),
        None => "(not derivable)".dimmed().to_string(),
    };
    out.push_str(&format!("{} {}\n", "Sysfs:".bold(), sysfs));

    if !report.fields.is_empty() {
        out.push_str(&format!("\n{}\n", "Fields".bold().underline()));
        out.push_str(&format_values_terminal(&report.fields));
    }
    if !report.sysfs_files.is_empty() {
        out.push_str(&format!("\n{}\n", "Sysfs files".bold().underline()));
        out.push_str(&format_paths_terminal(&report.sysfs_files));
    }
    out
}

fn key_width<V>(map: &BTreeMap<&'static str, V>) -> usize {
    map.keys().map(|k| k.len()).max().unwrap_or(0)
}

pub fn format_values_terminal(values: &BTreeMap<&'static str, FieldValue>) -> String {
    let width = key_width(values);
    let mut out = String::new();
    for (key, value) in values {
        out.push_str(&format!("  {:<width$}  {}\n", key.green(), value));
    }
    out
}

pub fn format_paths_terminal(paths: &BTreeMap<&'static str, PathBuf>) -> String {
    let width = key_width(paths);
    let mut out = String::new();
    for (key, path) in paths {
        out.push_str(&format!("  {:<width$}  {}\n", key.green(), path.display()));
    }
    out
}

pub fn format_list_terminal(names: &[String]) -> String {
    names.iter().map(|name| format!("{name}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capability;

    fn sample_device() -> NodeDevice {
        let mut device = NodeDevice::new();
        device.set_name("scsi_host2");
        device.set_parent("pci_0000_00_1f_2");
        device.set_capability(
            Capability::new(CapabilityType::ScsiHost)
                .with("host", 2u64)
                .and_then(|c| c.with("unique_id", 3u64))
                .unwrap(),
        );
        device
    }

    #[test]
    fn test_report_from_device() {
        let report = DeviceReport::from_device(&sample_device()).unwrap();
        assert_eq!(report.name, "scsi_host2");
        assert_eq!(report.parent.as_deref(), Some("pci_0000_00_1f_2"));
        assert_eq!(report.capability_type, CapabilityType::ScsiHost);
        assert_eq!(report.sysfs_path, Some(PathBuf::from("/sys/class/scsi_host/host2/")));
        assert_eq!(report.fields["host"], FieldValue::Int(2));
        assert_eq!(
            report.sysfs_files["unique_id"],
            PathBuf::from("/sys/class/scsi_host/host2/unique_id")
        );
    }

    #[test]
    fn test_report_skips_absent_fields() {
        let mut device = NodeDevice::new();
        device.set_name("usb_1_1_1_0");
        device.set_capability(
            Capability::new(CapabilityType::Usb)
                .with("number", 0u64)
                .unwrap(),
        );
        let report = DeviceReport::from_device(&device).unwrap();
        assert_eq!(report.fields.len(), 1);
        assert_eq!(report.sysfs_path, None);
        assert!(report.sysfs_files.is_empty());
    }

    #[test]
    fn test_report_json() {
        let report = DeviceReport::from_device(&sample_device()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&format_json(&report).unwrap()).unwrap();
        assert_eq!(json["capability_type"], "scsi_host");
        assert_eq!(json["fields"]["unique_id"], 3);
        assert_eq!(json["sysfs_path"], "/sys/class/scsi_host/host2/");
    }

    #[test]
    fn test_terminal_contains_values() {
        colored::control::set_override(false);
        let report = DeviceReport::from_device(&sample_device()).unwrap();
        let text = format_report_terminal(&report);
        assert!(text.contains("Device: scsi_host2"));
        assert!(text.contains("Capability: scsi_host"));
        assert!(text.contains("/sys/class/scsi_host/host2/unique_id"));
    }
}
