use super::*;

/// Checks `pci_bus/XXXX:XX/device/XXXX:XX:XX.X` with lowercase hex digits
fn matches_pci_pattern(path: &str) -> bool {
    let Some(rest) = path.strip_prefix("pci_bus/") else {
        return false;
    };
    let Some((bus_id, device_id)) = rest.split_once("/device/") else {
        return false;
    };
    let is_hex = |s: &str, width: usize| {
        s.len() == width && s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    };

    let bus_parts: Vec<&str> = bus_id.split(':').collect();
    let dev_parts: Vec<&str> = device_id.split(':').collect();
    if bus_parts.len() != 2 || dev_parts.len() != 3 {
        return false;
    }
    let Some((slot, function)) = dev_parts[2].split_once('.') else {
        return false;
    };

    is_hex(bus_parts[0], 4)
        && is_hex(bus_parts[1], 2)
        && is_hex(dev_parts[0], 4)
        && is_hex(dev_parts[1], 2)
        && is_hex(slot, 2)
        && is_hex(function, 1)
        && bus_parts[0] == dev_parts[0]
        && bus_parts[1] == dev_parts[1]
}

#[test]
fn test_pci_all_zero() {
    assert_eq!(pci_bus_id(0, 0), "0000:00");
    assert_eq!(pci_device_id(0, 0, 0, 0), "0000:00:00.0");
    assert_eq!(
        pci_sub_path(0, 0, 0, 0).unwrap(),
        "pci_bus/0000:00/device/0000:00:00.0"
    );
}

#[test]
fn test_pci_lowercase_padding() {
    assert_eq!(
        pci_sub_path(0x1, 0xa, 0x1f, 0x7).unwrap(),
        "pci_bus/0001:0a/device/0001:0a:1f.7"
    );
    assert_eq!(
        pci_sub_path(0xffff, 0xff, 0x1f, 0x7).unwrap(),
        "pci_bus/ffff:ff/device/ffff:ff:1f.7"
    );
}

#[test]
fn test_pci_pattern_over_address_space() {
    let domains = [0u64, 1, 0x10, 0xabc, 0xfffe, 0xffff];
    for domain in domains {
        for bus in (0..=0xffu64).step_by(17) {
            for slot in 0..=0x1fu64 {
                for function in 0..=0x7u64 {
                    let path = pci_sub_path(domain, bus, slot, function).unwrap();
                    assert!(matches_pci_pattern(&path), "bad path {path}");
                }
            }
        }
    }
}

#[test]
fn test_pattern_checker_rejects_uppercase() {
    assert!(!matches_pci_pattern("pci_bus/0000:0A/device/0000:0A:00.0"));
    assert!(!matches_pci_pattern("pci_bus/000:00/device/000:00:00.0"));
}

#[test]
fn test_pci_parts_wider_than_kernel_fields() {
    for (domain, bus, slot, function) in [
        (0x1_0000, 0, 0, 0),
        (0, 0x100, 0, 0),
        (0, 0, 0x20, 0),
        (0, 0, 0x100, 0),
        (0, 0, 0, 0x8),
        (0, 0, 0, 0x10),
    ] {
        let err = pci_sub_path(domain, bus, slot, function).unwrap_err();
        assert!(
            matches!(err, NodedevError::InvalidCapability { .. }),
            "{domain:x}:{bus:x}:{slot:x}.{function:x} gave {err:?}"
        );
    }
}

#[test]
fn test_usb_char_minor() {
    assert_eq!(usb_char_minor(1, 1).unwrap(), 0);
    assert_eq!(usb_char_minor(1, 2).unwrap(), 1);
    assert_eq!(usb_char_minor(1, 127).unwrap(), 126);
    assert_eq!(usb_char_minor(2, 1).unwrap(), 128);
    assert_eq!(usb_char_minor(3, 5).unwrap(), 260);
    assert_eq!(usb_device_sub_path(2, 3).unwrap(), "../dev/char/189:130/");
}

#[test]
fn test_usb_zero_bus_or_address_rejected() {
    for (bus, device) in [(0, 0), (0, 1), (1, 0)] {
        assert!(
            matches!(
                usb_device_sub_path(bus, device),
                Err(NodedevError::InvalidCapability { .. })
            ),
            "bus {bus} device {device}"
        );
    }
}

#[test]
fn test_usb_address_beyond_bus_rejected() {
    // Would alias the first device on the next bus
    assert!(usb_char_minor(1, 128).is_err());
    assert!(usb_char_minor(1, u64::MAX).is_err());
}

#[test]
fn test_usb_huge_bus_number_is_an_error() {
    assert!(matches!(
        usb_char_minor(1 << 60, 1),
        Err(NodedevError::InvalidCapability { .. })
    ));
    assert!(usb_device_sub_path(u64::MAX, 1).is_err());
}

#[test]
fn test_scsi_address() {
    assert_eq!(scsi_address(2, 0, 1, 0), "2:0:1:0");
}

#[test]
fn test_join_sysfs() {
    assert_eq!(
        join_sysfs("pci_bus/0000:00/device/0000:00:00.0"),
        PathBuf::from("/sys/class/pci_bus/0000:00/device/0000:00:00.0")
    );
    assert_eq!(
        join_sysfs("dmi/id/").to_str(),
        Some("/sys/class/dmi/id/")
    );
}
