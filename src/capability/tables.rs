//! Field declarations and sysfs filename tables, one pair per capability type.
//!
//! Field locations follow libvirt's node device schema
//! (<https://libvirt.org/formatnode.html>); paths are relative to the
//! `<capability>` element. Sysfs filenames are relative to the directory the
//! capability's sub-path names.

use crate::accessors::FieldSpec;

pub(super) static SYSTEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("product", "product"),
    FieldSpec::text("hardware_vendor", "hardware/vendor"),
    FieldSpec::text("hardware_serial", "hardware/serial"),
    FieldSpec::text("hardware_uuid", "hardware/uuid"),
    FieldSpec::text("firmware_vendor", "firmware/vendor"),
    FieldSpec::text("firmware_version", "firmware/version"),
    FieldSpec::text("firmware_release_date", "firmware/release_date"),
];

pub(super) static SYSTEM_FILES: &[(&str, &str)] = &[
    ("product", "product_name"),
    ("hardware_vendor", "sys_vendor"),
    ("hardware_serial", "product_serial"),
    ("hardware_uuid", "product_uuid"),
    ("firmware_vendor", "bios_vendor"),
    ("firmware_version", "bios_version"),
    ("firmware_release_date", "bios_date"),
];

pub(super) static PCI_FIELDS: &[FieldSpec] = &[
    FieldSpec::int("domain", "domain", 16),
    FieldSpec::int("bus", "bus", 16),
    FieldSpec::int("slot", "slot", 16),
    FieldSpec::int("function", "function", 16),
    FieldSpec::attribute("product_id", "product", "id"),
    FieldSpec::attribute("vendor_id", "vendor", "id"),
    FieldSpec::text("product", "product"),
    FieldSpec::text("vendor", "vendor"),
];

pub(super) static PCI_FILES: &[(&str, &str)] = &[("product_id", "device"), ("vendor_id", "vendor")];

pub(super) static USB_DEVICE_FIELDS: &[FieldSpec] = &[
    FieldSpec::int("bus", "bus", 10),
    FieldSpec::int("device", "device", 10),
    FieldSpec::attribute("product_id", "product", "id"),
    FieldSpec::attribute("vendor_id", "vendor", "id"),
    FieldSpec::text("product", "product"),
    FieldSpec::text("vendor", "vendor"),
];

pub(super) static USB_DEVICE_FILES: &[(&str, &str)] =
    &[("product_id", "idProduct"), ("vendor_id", "idVendor")];

pub(super) static USB_FIELDS: &[FieldSpec] = &[
    FieldSpec::int("number", "number", 10),
    FieldSpec::int("class", "class", 10),
    FieldSpec::int("subclass", "subclass", 10),
    FieldSpec::int("protocol", "protocol", 10),
    FieldSpec::text("description", "description"),
];

pub(super) static USB_FILES: &[(&str, &str)] = &[
    ("number", "bInterfaceNumber"),
    ("class", "bInterfaceClass"),
    ("subclass", "bInterfaceSubClass"),
    ("protocol", "bInterfaceProtocol"),
];

pub(super) static NET_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("interface", "interface"),
    FieldSpec::text("address", "address"),
    FieldSpec::attribute("link_speed", "link", "speed"),
    FieldSpec::attribute("link_state", "link", "state"),
];

pub(super) static NET_FILES: &[(&str, &str)] = &[("address", "address")];

pub(super) static SCSI_HOST_FIELDS: &[FieldSpec] = &[
    FieldSpec::int("host", "host", 10),
    FieldSpec::int("unique_id", "unique_id", 10),
];

pub(super) static SCSI_HOST_FILES: &[(&str, &str)] = &[("unique_id", "unique_id")];

pub(super) static SCSI_FIELDS: &[FieldSpec] = &[
    FieldSpec::int("host", "host", 10),
    FieldSpec::int("bus", "bus", 10),
    FieldSpec::int("target", "target", 10),
    FieldSpec::int("lun", "lun", 10),
    FieldSpec::text("type", "type"),
];

pub(super) static SCSI_FILES: &[(&str, &str)] = &[("type", "device/type")];

pub(super) static STORAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("block", "block"),
    FieldSpec::text("bus", "bus"),
    FieldSpec::text("drive_type", "drive_type"),
    FieldSpec::text("model", "model"),
    FieldSpec::text("vendor", "vendor"),
    FieldSpec::text("serial", "serial"),
    FieldSpec::int("size", "size", 10),
    FieldSpec::int("logical_block_size", "logical_block_size", 10),
    FieldSpec::int("num_blocks", "num_blocks", 10),
];

pub(super) static STORAGE_FILES: &[(&str, &str)] = &[
    ("model", "device/model"),
    ("vendor", "device/vendor"),
    ("logical_block_size", "queue/logical_block_size"),
];
