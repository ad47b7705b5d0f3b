use vtzif_test::component::config::{Settings, TemplateConfig};
use vtzif_test::component::convert::convert;
use vtzif_test::component::error::AppError;

use super::helpers::{fixture, read_tzif};

/// ## Summary
/// An extend-only template encodes one local time type taken from the extend string.
#[test_log::test]
fn prague_encodes_footer_and_derived_type() {
    let data = convert(&fixture("prague.ics"), &Settings::default()).unwrap();
    let tzif = read_tzif(&data);

    assert_eq!(tzif.version, b'2');
    assert!(tzif.transitions.is_empty());
    assert_eq!(tzif.types, vec![(3600, false, 0)]);
    assert_eq!(tzif.designation(0), "CET");
    assert_eq!(
        tzif.footer,
        "<CET>-01:00:00<CEST>-02:00:00M3.5.0/02:00:00M10.5.0/03:00:00"
    );
}

/// ## Summary
/// Bounded rules become TZif transitions pointing at their zones.
#[test_log::test]
fn prague_history_encodes_transitions() {
    let mut settings = Settings::default();
    settings.output.version = 3;
    let data = convert(&fixture("prague-history.ics"), &settings).unwrap();
    let tzif = read_tzif(&data);

    assert_eq!(tzif.version, b'3');
    assert_eq!(tzif.v1_transitions, 19);
    assert_eq!(tzif.transitions.len(), 19);
    // 1979-04-01T01:00:00Z into CEST.
    assert_eq!(tzif.transitions[0], (291_776_400, 1));
    assert_eq!(tzif.types, vec![(3600, false, 0), (7200, true, 4)]);
    assert_eq!(tzif.designation(1), "CEST");
    assert_eq!(tzif.designations, b"CET\0CEST\0");
}

/// ## Summary
/// Negative offsets survive the POSIX sign inversion in both directions.
#[test_log::test]
fn bogota_negative_offset() {
    let data = convert(&fixture("bogota.ics"), &Settings::default()).unwrap();
    let tzif = read_tzif(&data);

    assert_eq!(tzif.types, vec![(-5 * 3600, false, 0)]);
    assert_eq!(tzif.designation(0), "-05");
    assert_eq!(tzif.footer, "<-05>05:00:00");
}

#[test]
fn configured_name_does_not_change_output() {
    let input = fixture("prague.ics");
    let mut settings = Settings::default();
    settings.template = TemplateConfig {
        name: Some("Somewhere/Else".to_string()),
    };

    assert_eq!(
        convert(&input, &settings).unwrap(),
        convert(&input, &Settings::default()).unwrap()
    );
}

#[test]
fn two_timezones_are_rejected() {
    let err = convert(&fixture("two-timezones.ics"), &Settings::default()).unwrap_err();
    assert!(matches!(err, AppError::MultipleTimezones));
}
