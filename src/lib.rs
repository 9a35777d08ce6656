//! nodedev - typed access to libvirt node device XML.
//!
//! Wraps the documents produced by `virsh nodedev-dumpxml`, resolves each
//! device's capability to one of a closed set of types, and derives the sysfs
//! files that independently report the same values, so libvirt's view of a
//! device can be cross-checked against the kernel's.
//!
//! # Example
//!
//! ```
//! use nodedev::{CapabilityDescriptor, NodeDevice};
//!
//! let device = NodeDevice::from_xml(
//!     "<device><name>pci_0000_00_00_0</name>\
//!      <capability type='pci'><domain>0</domain><bus>0</bus>\
//!      <slot>0</slot><function>0</function></capability></device>",
//! )
//! .unwrap();
//!
//! assert_eq!(device.capability().unwrap().sysfs_sub_path().unwrap(),
//!            "pci_bus/0000:00/device/0000:00:00.0");
//! assert_eq!(device.sysfs_path().unwrap().to_str(),
//!            Some("/sys/class/pci_bus/0000:00/device/0000:00:00.0"));
//! ```

pub mod accessors;
pub mod capability;
pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod output;
pub mod query;
pub mod sysfs;
pub mod virsh;
pub mod xml;

pub use accessors::{FieldKind, FieldLocation, FieldSpec, FieldValue};
pub use capability::{Capability, CapabilityDescriptor, CapabilityRef, CapabilityType};
pub use config::Config;
pub use device::NodeDevice;
pub use error::{NodedevError, Result};
pub use query::{key_to_sysfs_path, key_to_value, list_devices};
pub use sysfs::SYSFS_ROOT;
pub use virsh::{CmdResult, NodedevSource, Virsh};
