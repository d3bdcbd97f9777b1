use super::*;

#[test]
fn small_values_have_no_separator() {
    assert_eq!(counter_label(0), "0");
    assert_eq!(counter_label(7), "7");
    assert_eq!(counter_label(999), "999");
}

#[test]
fn groups_from_the_right() {
    assert_eq!(counter_label(1023), "1.023");
    assert_eq!(counter_label(65_535), "65.535");
    assert_eq!(counter_label(1_048_575), "1.048.575");
    assert_eq!(group_thousands(123_456, ','), "123,456");
}

#[test]
fn max_u64_formats() {
    assert_eq!(
        counter_label(u64::MAX),
        "18.446.744.073.709.551.615"
    );
}
