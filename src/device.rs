//! Node device documents.
//!
//! [`NodeDevice`] owns one `<device>` document and exposes the top-level
//! fields (`name`, `parent`, the capability type) plus the capability itself.
//! The capability is never cached: every call to [`NodeDevice::capability`]
//! resolves a fresh [`CapabilityRef`] into the document, so edits made through
//! [`NodeDevice::set_capability`] and [`NodeDevice::delete_capability`] are
//! visible to the next read.

use crate::capability::{Capability, CapabilityDescriptor, CapabilityRef, CapabilityType, CAPABILITY_TAG};
use crate::error::{NodedevError, Result};
use crate::sysfs;
use crate::xml::Element;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Tag of a node device document's root element
pub const DEVICE_TAG: &str = "device";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDevice {
    root: Element,
}

impl Default for NodeDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeDevice {
    /// An empty `<device/>` skeleton
    pub fn new() -> Self {
        Self {
            root: Element::new(DEVICE_TAG),
        }
    }

    pub fn from_xml(content: &str) -> Result<Self> {
        let root = Element::parse(content)?;
        if root.name != DEVICE_TAG {
            return Err(NodedevError::UnexpectedRoot {
                expected: DEVICE_TAG.to_string(),
                found: root.name,
            });
        }
        Ok(Self { root })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_xml(&content)
    }

    pub fn to_xml(&self) -> Result<String> {
        self.root.to_xml_string()
    }

    /// Write the document to `path`, replacing it atomically.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(self.to_xml()?.as_bytes())?;
        temp.write_all(b"\n")?;
        temp.flush()?;
        temp.persist(path).map_err(|e| NodedevError::Io(e.error))?;
        debug!(path = %path.display(), "wrote node device document");
        Ok(())
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn name(&self) -> Result<&str> {
        self.root
            .find("name")
            .and_then(Element::text)
            .ok_or_else(|| NodedevError::missing_element("/device/name"))
    }

    pub fn set_name(&mut self, name: &str) {
        self.root.ensure("name").set_text(name);
    }

    /// Name of the parent device; the root `computer` device has none
    pub fn parent(&self) -> Option<&str> {
        self.root.find("parent").and_then(Element::text)
    }

    pub fn set_parent(&mut self, parent: &str) {
        self.root.ensure("parent").set_text(parent);
    }

    pub fn remove_parent(&mut self) {
        self.root.remove("parent");
    }

    pub fn has_capability(&self) -> bool {
        self.root.find(CAPABILITY_TAG).is_some()
    }

    pub fn capability_type(&self) -> Result<CapabilityType> {
        Ok(self.capability()?.capability_type())
    }

    /// Resolve the device's capability in place.
    ///
    /// Fails with `MissingCapability` when there is no `<capability>` element
    /// or it declares no type, and `UnknownCapabilityType` when the type is
    /// not one of [`CapabilityType::ALL`].
    pub fn capability(&self) -> Result<CapabilityRef<'_>> {
        let element = self
            .root
            .find(CAPABILITY_TAG)
            .ok_or(NodedevError::MissingCapability)?;
        CapabilityRef::resolve(element)
    }

    /// Replace any existing capability with `capability`.
    pub fn set_capability(&mut self, capability: Capability) {
        let kind = capability.capability_type();
        self.delete_capability();
        self.root.append(capability.into_element());
        debug!(capability_type = %kind, "set capability");
    }

    /// Remove the capability. Removing an absent capability is a no-op.
    pub fn delete_capability(&mut self) {
        if self.root.remove(CAPABILITY_TAG).is_some() {
            debug!("deleted capability");
        }
    }

    pub fn sysfs_sub_path(&self) -> Result<String> {
        self.capability()?.sysfs_sub_path()
    }

    /// Absolute sysfs directory for this device's capability
    pub fn sysfs_path(&self) -> Result<PathBuf> {
        Ok(sysfs::join_sysfs(&self.sysfs_sub_path()?))
    }

    /// Absolute sysfs file for every field sysfs reports independently
    pub fn field_to_sysfs_path(&self) -> Result<BTreeMap<&'static str, PathBuf>> {
        let base = self.sysfs_path()?;
        Ok(self
            .capability()?
            .field_to_filename()
            .into_iter()
            .map(|(key, filename)| (key, base.join(filename)))
            .collect())
    }
}

#[cfg(test)]
#[path = "device_test.rs"]
mod tests;
