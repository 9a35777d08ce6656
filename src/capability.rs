//! Node device capabilities.
//!
//! A capability is the typed `<capability type='...'>` block of a node device.
//! The set of types is closed: [`CapabilityType`] enumerates every type libvirt
//! reports for host devices, and each one maps at compile time to its field
//! declarations, its sysfs filename table and its sysfs sub-path rule.
//!
//! Two handles share the [`CapabilityDescriptor`] contract:
//!
//! - [`Capability`] owns a detached `<capability>` fragment, used to build a
//!   capability before handing it to [`crate::NodeDevice::set_capability`].
//! - [`CapabilityRef`] borrows the `<capability>` element inside a device
//!   document, so reads always reflect the document's current state.

mod tables;

use crate::accessors::{read_field, write_field, FieldSpec, FieldValue};
use crate::error::{NodedevError, Result};
use crate::sysfs;
use crate::xml::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::trace;

/// Tag of the top-level capability element
pub const CAPABILITY_TAG: &str = "capability";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityType {
    System,
    Pci,
    UsbDevice,
    Usb,
    Net,
    ScsiHost,
    Scsi,
    Storage,
}

impl CapabilityType {
    pub const ALL: [CapabilityType; 8] = [
        CapabilityType::System,
        CapabilityType::Pci,
        CapabilityType::UsbDevice,
        CapabilityType::Usb,
        CapabilityType::Net,
        CapabilityType::ScsiHost,
        CapabilityType::Scsi,
        CapabilityType::Storage,
    ];

    /// The `type` attribute value libvirt uses for this capability
    pub fn as_str(self) -> &'static str {
        match self {
            CapabilityType::System => "system",
            CapabilityType::Pci => "pci",
            CapabilityType::UsbDevice => "usb_device",
            CapabilityType::Usb => "usb",
            CapabilityType::Net => "net",
            CapabilityType::ScsiHost => "scsi_host",
            CapabilityType::Scsi => "scsi",
            CapabilityType::Storage => "storage",
        }
    }

    /// Every field this type models, including ones only used for path naming
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            CapabilityType::System => tables::SYSTEM_FIELDS,
            CapabilityType::Pci => tables::PCI_FIELDS,
            CapabilityType::UsbDevice => tables::USB_DEVICE_FIELDS,
            CapabilityType::Usb => tables::USB_FIELDS,
            CapabilityType::Net => tables::NET_FIELDS,
            CapabilityType::ScsiHost => tables::SCSI_HOST_FIELDS,
            CapabilityType::Scsi => tables::SCSI_FIELDS,
            CapabilityType::Storage => tables::STORAGE_FIELDS,
        }
    }

    /// Fields that sysfs reports independently, with the file that holds each
    pub fn sysfs_files(self) -> &'static [(&'static str, &'static str)] {
        match self {
            CapabilityType::System => tables::SYSTEM_FILES,
            CapabilityType::Pci => tables::PCI_FILES,
            CapabilityType::UsbDevice => tables::USB_DEVICE_FILES,
            CapabilityType::Usb => tables::USB_FILES,
            CapabilityType::Net => tables::NET_FILES,
            CapabilityType::ScsiHost => tables::SCSI_HOST_FILES,
            CapabilityType::Scsi => tables::SCSI_FILES,
            CapabilityType::Storage => tables::STORAGE_FILES,
        }
    }

    pub fn field_spec(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.name == name)
    }

    fn require_field(self, name: &str) -> Result<&'static FieldSpec> {
        self.field_spec(name).ok_or_else(|| NodedevError::UnknownField {
            capability_type: self.as_str().to_string(),
            field: name.to_string(),
        })
    }
}

impl fmt::Display for CapabilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapabilityType {
    type Err = NodedevError;

    fn from_str(s: &str) -> Result<Self> {
        CapabilityType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| NodedevError::UnknownCapabilityType(s.to_string()))
    }
}

/// Read the declared type of a `<capability>` element.
fn declared_type(element: &Element) -> Result<CapabilityType> {
    element
        .attribute("type")
        .ok_or(NodedevError::MissingCapability)?
        .parse()
}

/// Behaviour shared by every capability variant.
///
/// Implementors only expose their type and the element holding their fields;
/// the per-type behaviour is dispatched on [`CapabilityType`].
pub trait CapabilityDescriptor {
    fn capability_type(&self) -> CapabilityType;

    fn element(&self) -> &Element;

    /// Read one modeled field. Asking for a field the type does not declare is
    /// `UnknownField`; a declared field absent from the document is
    /// `MissingElement`.
    fn field(&self, name: &str) -> Result<FieldValue> {
        let spec = self.capability_type().require_field(name)?;
        read_field(self.element(), spec)
    }

    fn int_field(&self, name: &str) -> Result<u64> {
        self.field(name)?
            .as_int()
            .ok_or_else(|| NodedevError::FieldKindMismatch {
                field: name.to_string(),
                expected: "integer",
            })
    }

    fn text_field(&self, name: &str) -> Result<String> {
        match self.field(name)? {
            FieldValue::Text(s) => Ok(s),
            FieldValue::Int(_) => Err(NodedevError::FieldKindMismatch {
                field: name.to_string(),
                expected: "text",
            }),
        }
    }

    fn field_to_filename(&self) -> BTreeMap<&'static str, &'static str> {
        self.capability_type().sysfs_files().iter().copied().collect()
    }

    /// Values for exactly the keys of [`CapabilityDescriptor::field_to_filename`].
    fn field_to_value(&self) -> Result<BTreeMap<&'static str, FieldValue>> {
        let mut values = BTreeMap::new();
        for (key, _) in self.capability_type().sysfs_files() {
            values.insert(*key, self.field(key)?);
        }
        Ok(values)
    }

    /// Path segment, relative to [`sysfs::SYSFS_ROOT`], of the directory whose
    /// files report this capability's values.
    fn sysfs_sub_path(&self) -> Result<String> {
        let kind = self.capability_type();
        match kind {
            CapabilityType::System => Ok("dmi/id/".to_string()),
            CapabilityType::Pci => sysfs::pci_sub_path(
                self.int_field("domain")?,
                self.int_field("bus")?,
                self.int_field("slot")?,
                self.int_field("function")?,
            ),
            CapabilityType::UsbDevice => {
                sysfs::usb_device_sub_path(self.int_field("bus")?, self.int_field("device")?)
            }
            CapabilityType::Usb => Err(NodedevError::SysfsPathUnsupported {
                capability_type: kind.as_str().to_string(),
            }),
            CapabilityType::Net => Ok(format!("net/{}/", self.text_field("interface")?)),
            CapabilityType::ScsiHost => Ok(format!("scsi_host/host{}/", self.int_field("host")?)),
            CapabilityType::Scsi => Ok(format!(
                "scsi_device/{}/",
                sysfs::scsi_address(
                    self.int_field("host")?,
                    self.int_field("bus")?,
                    self.int_field("target")?,
                    self.int_field("lun")?,
                )
            )),
            CapabilityType::Storage => {
                let block = self.text_field("block")?;
                let name = Path::new(&block)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .ok_or_else(|| {
                        NodedevError::invalid_capability(format!(
                            "block path '{block}' names no device"
                        ))
                    })?;
                Ok(format!("block/{name}/"))
            }
        }
    }
}

/// A detached capability fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    kind: CapabilityType,
    element: Element,
}

impl Capability {
    /// An empty `<capability type='...'/>` of the given type
    pub fn new(kind: CapabilityType) -> Self {
        Self {
            kind,
            element: Element::new(CAPABILITY_TAG).with_attribute("type", kind.as_str()),
        }
    }

    /// Adopt an existing element. It must be a `<capability>` whose `type`
    /// names a known capability.
    pub fn from_element(element: Element) -> Result<Self> {
        if element.name != CAPABILITY_TAG {
            return Err(NodedevError::invalid_capability(format!(
                "expected <{CAPABILITY_TAG}>, found <{}>",
                element.name
            )));
        }
        let kind = match declared_type(&element) {
            Err(NodedevError::MissingCapability) => {
                return Err(NodedevError::invalid_capability(
                    "capability element has no type attribute",
                ))
            }
            other => other?,
        };
        Ok(Self { kind, element })
    }

    pub fn from_xml(content: &str) -> Result<Self> {
        Self::from_element(Element::parse(content)?)
    }

    pub fn set<V: Into<FieldValue>>(&mut self, field: &str, value: V) -> Result<()> {
        let spec = self.kind.require_field(field)?;
        write_field(&mut self.element, spec, &value.into())
    }

    /// Builder form of [`Capability::set`]
    pub fn with<V: Into<FieldValue>>(mut self, field: &str, value: V) -> Result<Self> {
        self.set(field, value)?;
        Ok(self)
    }

    pub fn to_xml(&self) -> Result<String> {
        self.element.to_xml_string()
    }

    pub fn into_element(self) -> Element {
        self.element
    }
}

impl CapabilityDescriptor for Capability {
    fn capability_type(&self) -> CapabilityType {
        self.kind
    }

    fn element(&self) -> &Element {
        &self.element
    }
}

/// A capability resolved in place inside a device document.
#[derive(Debug, Clone, Copy)]
pub struct CapabilityRef<'a> {
    kind: CapabilityType,
    element: &'a Element,
}

impl<'a> CapabilityRef<'a> {
    pub(crate) fn resolve(element: &'a Element) -> Result<Self> {
        let kind = declared_type(element)?;
        trace!(capability_type = %kind, "resolved capability");
        Ok(Self { kind, element })
    }

    /// Detach a copy that can be edited and set on another device
    pub fn to_owned_capability(&self) -> Capability {
        Capability {
            kind: self.kind,
            element: self.element.clone(),
        }
    }
}

impl CapabilityDescriptor for CapabilityRef<'_> {
    fn capability_type(&self) -> CapabilityType {
        self.kind
    }

    fn element(&self) -> &Element {
        self.element
    }
}

#[cfg(test)]
#[path = "capability_test.rs"]
mod tests;
