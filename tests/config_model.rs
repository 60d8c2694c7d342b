use max1704x_async_rs::ConfigRegister;

#[test]
fn test_threshold_round_trip() {
    for percent in 1..=32u8 {
        let mut cfg = ConfigRegister::from_bytes([0x97, 0x00]);
        cfg.set_alert_threshold(percent);
        assert_eq!(cfg.alert_threshold(), percent, "threshold {}", percent);
    }
}

#[test]
fn test_threshold_field_encoding() {
    // Raw field stores 32 - percent as 5-bit two's complement.
    let mut cfg = ConfigRegister::from_bytes([0x97, 0x00]);
    cfg.set_alert_threshold(32);
    assert_eq!(cfg.to_bytes()[1] & 0x1F, 0x00);
    cfg.set_alert_threshold(1);
    assert_eq!(cfg.to_bytes()[1] & 0x1F, 0x1F);
    cfg.set_alert_threshold(4);
    assert_eq!(cfg.to_bytes()[1] & 0x1F, 0x1C);
}

#[test]
fn test_threshold_clamps() {
    let mut cfg = ConfigRegister::from_bytes([0x97, 0x00]);
    cfg.set_alert_threshold(0);
    assert_eq!(cfg.alert_threshold(), 1);
    cfg.set_alert_threshold(40);
    assert_eq!(cfg.alert_threshold(), 32);
    cfg.set_alert_threshold(255);
    assert_eq!(cfg.alert_threshold(), 32);
}

#[test]
fn test_threshold_preserves_other_bits() {
    // Sleep bit and alert flag stay put through a threshold update.
    let mut cfg = ConfigRegister::from_bytes([0x97, 0xBC]);
    cfg.set_alert_threshold(8);
    assert_eq!(cfg.compensation(), 0x97);
    assert!(cfg.sleeping());
    assert!(cfg.alert_pending());
    assert_eq!(cfg.alert_threshold(), 8);
}

#[test]
fn test_compensation_preserves_status() {
    let mut cfg = ConfigRegister::from_bytes([0x97, 0xBC]);
    cfg.set_compensation(0xA0);
    assert_eq!(cfg.to_bytes(), [0xA0, 0xBC]);
}

#[test]
fn test_clear_alert_touches_only_bit_5() {
    let mut cfg = ConfigRegister::from_bytes([0x97, 0xBF]);
    cfg.clear_alert();
    assert_eq!(cfg.to_bytes(), [0x97, 0x9F]);
    assert!(!cfg.alert_pending());
    assert!(cfg.sleeping());
    assert_eq!(cfg.alert_threshold(), 1);
}

#[test]
fn test_sleep_bit_round_trip() {
    let mut cfg = ConfigRegister::from_bytes([0x97, 0x1C]);
    assert!(!cfg.sleeping());
    cfg.set_sleep(true);
    assert_eq!(cfg.to_bytes(), [0x97, 0x9C]);
    cfg.set_sleep(false);
    assert_eq!(cfg.to_bytes(), [0x97, 0x1C]);
}
