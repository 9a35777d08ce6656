use super::*;
use std::collections::BTreeSet;

fn keys(kind: CapabilityType) -> BTreeSet<&'static str> {
    Capability::new(kind).field_to_filename().into_keys().collect()
}

fn set_of(names: &[&'static str]) -> BTreeSet<&'static str> {
    names.iter().copied().collect()
}

#[test]
fn test_type_names_round_trip() {
    for kind in CapabilityType::ALL {
        assert_eq!(kind.as_str().parse::<CapabilityType>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.as_str());
    }
}

#[test]
fn test_type_serde_names_match_attribute_values() {
    for kind in CapabilityType::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.as_str()));
    }
}

#[test]
fn test_unknown_type_is_dispatch_error() {
    let err = "bogus".parse::<CapabilityType>().unwrap_err();
    assert!(err.is_dispatch_error());
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn test_documented_filename_tables() {
    assert_eq!(
        keys(CapabilityType::System),
        set_of(&[
            "product",
            "hardware_vendor",
            "hardware_serial",
            "hardware_uuid",
            "firmware_vendor",
            "firmware_version",
            "firmware_release_date",
        ])
    );
    assert_eq!(keys(CapabilityType::Pci), set_of(&["product_id", "vendor_id"]));
    assert_eq!(keys(CapabilityType::UsbDevice), set_of(&["product_id", "vendor_id"]));
    assert_eq!(
        keys(CapabilityType::Usb),
        set_of(&["number", "class", "subclass", "protocol"])
    );
    assert_eq!(keys(CapabilityType::Net), set_of(&["address"]));
    assert_eq!(keys(CapabilityType::ScsiHost), set_of(&["unique_id"]));
    assert_eq!(keys(CapabilityType::Scsi), set_of(&["type"]));
    assert_eq!(
        keys(CapabilityType::Storage),
        set_of(&["model", "vendor", "logical_block_size"])
    );

    let pci = Capability::new(CapabilityType::Pci).field_to_filename();
    assert_eq!(pci["product_id"], "device");
    assert_eq!(pci["vendor_id"], "vendor");
    let system = Capability::new(CapabilityType::System).field_to_filename();
    assert_eq!(system["firmware_release_date"], "bios_date");
}

#[test]
fn test_every_sysfs_key_is_a_declared_field() {
    for kind in CapabilityType::ALL {
        for (key, _) in kind.sysfs_files() {
            assert!(kind.field_spec(key).is_some(), "{kind}: {key} not declared");
        }
        let names: BTreeSet<_> = kind.fields().iter().map(|f| f.name).collect();
        assert_eq!(names.len(), kind.fields().len(), "{kind}: duplicate field");
    }
}

#[test]
fn test_field_to_value_system() {
    let cap = Capability::from_xml(
        r#"<capability type='system'>
             <product>20HRCTO1WW</product>
             <hardware>
               <vendor>LENOVO</vendor>
               <version>ThinkPad X1 Carbon 5th</version>
               <serial>PF0ABCDE</serial>
               <uuid>2a9c4b01-1d0e-11b2-a85c-c9f04f1b6d8e</uuid>
             </hardware>
             <firmware>
               <vendor>LENOVO</vendor>
               <version>N1MET51W (1.36 )</version>
               <release_date>08/08/2018</release_date>
             </firmware>
           </capability>"#,
    )
    .unwrap();

    let values = cap.field_to_value().unwrap();
    assert_eq!(values.len(), 7);
    assert_eq!(values["product"].to_string(), "20HRCTO1WW");
    assert_eq!(values["hardware_uuid"].to_string(), "2a9c4b01-1d0e-11b2-a85c-c9f04f1b6d8e");
    assert_eq!(values["firmware_version"].to_string(), "N1MET51W (1.36 )");
    assert_eq!(cap.sysfs_sub_path().unwrap(), "dmi/id/");
}

#[test]
fn test_field_to_value_requires_every_key() {
    let cap = Capability::from_xml(
        "<capability type='pci'><domain>0</domain><product id='0x1237'/></capability>",
    )
    .unwrap();
    let err = cap.field_to_value().unwrap_err();
    assert!(matches!(err, NodedevError::MissingElement { .. }), "{err}");
}

#[test]
fn test_unknown_field_differs_from_missing_field() {
    let cap = Capability::new(CapabilityType::Pci);
    assert!(matches!(
        cap.field("irq"),
        Err(NodedevError::UnknownField { .. })
    ));
    assert!(matches!(
        cap.field("slot"),
        Err(NodedevError::MissingElement { .. })
    ));
    let mut cap = cap;
    assert!(matches!(
        cap.set("irq", 5u64),
        Err(NodedevError::UnknownField { .. })
    ));
}

#[test]
fn test_pci_sub_path() {
    let cap = Capability::new(CapabilityType::Pci)
        .with("domain", 0u64)
        .unwrap()
        .with("bus", 0u64)
        .unwrap()
        .with("slot", 0u64)
        .unwrap()
        .with("function", 0u64)
        .unwrap();
    assert_eq!(cap.sysfs_sub_path().unwrap(), "pci_bus/0000:00/device/0000:00:00.0");

    let cap = Capability::from_xml(
        "<capability type='pci'><domain>0x0000</domain><bus>0x3a</bus>\
         <slot>0x1f</slot><function>0x6</function></capability>",
    )
    .unwrap();
    assert_eq!(cap.sysfs_sub_path().unwrap(), "pci_bus/0000:3a/device/0000:3a:1f.6");
}

#[test]
fn test_pci_sub_path_missing_slot() {
    let cap = Capability::from_xml(
        "<capability type='pci'><domain>0</domain><bus>0</bus><function>0</function></capability>",
    )
    .unwrap();
    assert!(cap.sysfs_sub_path().unwrap_err().is_schema_error());
}

#[test]
fn test_other_sub_paths() {
    let usb_dev = Capability::from_xml(
        "<capability type='usb_device'><bus>1</bus><device>4</device></capability>",
    )
    .unwrap();
    assert_eq!(usb_dev.sysfs_sub_path().unwrap(), "../dev/char/189:3/");

    let net = Capability::from_xml(
        "<capability type='net'><interface>enp0s31f6</interface></capability>",
    )
    .unwrap();
    assert_eq!(net.sysfs_sub_path().unwrap(), "net/enp0s31f6/");

    let host = Capability::from_xml(
        "<capability type='scsi_host'><host>2</host><unique_id>3</unique_id></capability>",
    )
    .unwrap();
    assert_eq!(host.sysfs_sub_path().unwrap(), "scsi_host/host2/");

    let scsi = Capability::from_xml(
        "<capability type='scsi'><host>2</host><bus>0</bus><target>0</target><lun>1</lun>\
         <type>disk</type></capability>",
    )
    .unwrap();
    assert_eq!(scsi.sysfs_sub_path().unwrap(), "scsi_device/2:0:0:1/");

    let storage = Capability::from_xml(
        "<capability type='storage'><block>/dev/sda</block></capability>",
    )
    .unwrap();
    assert_eq!(storage.sysfs_sub_path().unwrap(), "block/sda/");
}

#[test]
fn test_storage_without_device_name() {
    let storage =
        Capability::from_xml("<capability type='storage'><block>/</block></capability>").unwrap();
    assert!(matches!(
        storage.sysfs_sub_path(),
        Err(NodedevError::InvalidCapability { .. })
    ));
}

#[test]
fn test_usb_interface_has_no_sub_path() {
    let usb = Capability::new(CapabilityType::Usb);
    assert!(matches!(
        usb.sysfs_sub_path(),
        Err(NodedevError::SysfsPathUnsupported { .. })
    ));
}

#[test]
fn test_from_xml_validates_shape() {
    assert!(matches!(
        Capability::from_xml("<device/>"),
        Err(NodedevError::InvalidCapability { .. })
    ));
    assert!(matches!(
        Capability::from_xml("<capability/>"),
        Err(NodedevError::InvalidCapability { .. })
    ));
    assert!(Capability::from_xml("<capability type='mdev'/>")
        .unwrap_err()
        .is_dispatch_error());
}

#[test]
fn test_builder_writes_libvirt_shape() {
    let cap = Capability::new(CapabilityType::Pci)
        .with("vendor_id", "0x8086")
        .unwrap()
        .with("vendor", "Intel Corporation")
        .unwrap()
        .with("bus", 0x3au64)
        .unwrap();

    let element = cap.element();
    assert_eq!(element.attribute("type"), Some("pci"));
    let vendor = element.find("vendor").unwrap();
    assert_eq!(vendor.attribute("id"), Some("0x8086"));
    assert_eq!(vendor.text(), Some("Intel Corporation"));
    assert_eq!(element.find("bus").unwrap().text(), Some("0x3a"));

    let reparsed = Capability::from_xml(&cap.to_xml().unwrap()).unwrap();
    assert_eq!(reparsed, cap);
}
