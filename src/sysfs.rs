//! Sysfs path naming.
//!
//! Pure string computation: nothing here touches the filesystem. The formats
//! must reproduce the directory names the kernel creates, so hex is lowercase
//! and zero-padded to the kernel's widths.

use crate::error::{NodedevError, Result};
use std::path::{Path, PathBuf};

/// Root every capability sub-path is joined onto
pub const SYSFS_ROOT: &str = "/sys/class";

/// Character device major number for USB devices (`/dev/bus/usb/BBB/DDD`)
pub const USB_DEVICE_MAJOR: u32 = 189;

/// Minors reserved per USB bus; device addresses are 7 bits, 0 is unassigned
const USB_MINORS_PER_BUS: u64 = 128;

pub const PCI_DOMAIN_MAX: u64 = 0xffff;
pub const PCI_BUS_MAX: u64 = 0xff;
pub const PCI_SLOT_MAX: u64 = 0x1f;
pub const PCI_FUNCTION_MAX: u64 = 0x7;

/// `DDDD:BB`, the name of a PCI bus under `/sys/class/pci_bus`.
pub fn pci_bus_id(domain: u64, bus: u64) -> String {
    format!("{domain:04x}:{bus:02x}")
}

/// `DDDD:BB:SS.F`, the kernel's name for a PCI function.
pub fn pci_device_id(domain: u64, bus: u64, slot: u64, function: u64) -> String {
    format!("{domain:04x}:{bus:02x}:{slot:02x}.{function:01x}")
}

fn check_range(what: &str, value: u64, max: u64) -> Result<()> {
    if value > max {
        return Err(NodedevError::invalid_capability(format!(
            "{what} {value:#x} exceeds {max:#x}"
        )));
    }
    Ok(())
}

/// `pci_bus/DDDD:BB/device/DDDD:BB:SS.F`. Parts wider than the kernel's
/// fields would name no directory and are rejected.
pub fn pci_sub_path(domain: u64, bus: u64, slot: u64, function: u64) -> Result<String> {
    check_range("PCI domain", domain, PCI_DOMAIN_MAX)?;
    check_range("PCI bus", bus, PCI_BUS_MAX)?;
    check_range("PCI slot", slot, PCI_SLOT_MAX)?;
    check_range("PCI function", function, PCI_FUNCTION_MAX)?;
    Ok(format!(
        "pci_bus/{}/device/{}",
        pci_bus_id(domain, bus),
        pci_device_id(domain, bus, slot, function)
    ))
}

/// Minor number the kernel assigns a USB device: 128 per bus, both numbered
/// from 1.
pub fn usb_char_minor(bus: u64, device: u64) -> Result<u64> {
    if bus == 0 {
        return Err(NodedevError::invalid_capability("USB bus numbers start at 1"));
    }
    if device == 0 || device >= USB_MINORS_PER_BUS {
        return Err(NodedevError::invalid_capability(format!(
            "USB device address {device} outside 1..{USB_MINORS_PER_BUS}"
        )));
    }
    (bus - 1)
        .checked_mul(USB_MINORS_PER_BUS)
        .and_then(|base| base.checked_add(device - 1))
        .ok_or_else(|| NodedevError::invalid_capability(format!("USB bus {bus} out of range")))
}

/// USB devices have no class directory of their own; reach them through the
/// char device link in `/sys/dev`, relative to [`SYSFS_ROOT`].
pub fn usb_device_sub_path(bus: u64, device: u64) -> Result<String> {
    let minor = usb_char_minor(bus, device)?;
    Ok(format!("../dev/char/{USB_DEVICE_MAJOR}:{minor}/"))
}

pub fn scsi_address(host: u64, bus: u64, target: u64, lun: u64) -> String {
    format!("{host}:{bus}:{target}:{lun}")
}

/// Join a capability sub-path onto [`SYSFS_ROOT`].
pub fn join_sysfs(sub_path: &str) -> PathBuf {
    Path::new(SYSFS_ROOT).join(sub_path)
}

#[cfg(test)]
#[path = "sysfs_test.rs"]
mod tests;
