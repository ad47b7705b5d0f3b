use vtzif_test::component::error::ServiceError;
use vtzif_test::component::vtimezone::to_location_template;

use super::helpers::vtimezone;

/// ## Summary
/// Every rejected fixture fails with a message naming the offending value.
#[test_log::test]
fn rejected_fixtures() {
    let cases = [
        (
            "duplicate-daylight.ics",
            "more than one unbounded daylight rule is not supported",
        ),
        (
            "daylight-only.ics",
            "daylight saving rule without standard rule is not supported",
        ),
        (
            "unsupported-byhour.ics",
            "unsupported combination of rule properties: BYDAY, BYHOUR, BYMONTH",
        ),
        ("weekly-extend.ics", "freq \"WEEKLY\""),
        ("x-component.ics", "unsupported component type \"X-LEGACY\""),
        ("missing-dtstart.ics", "missing DTSTART"),
        ("utc-dtstart.ics", "local date time format"),
        (
            "bad-offset.ics",
            "invalid TZOFFSETFROM: invalid hours in time offset \"+2400\"",
        ),
        ("fifth-week.ics", "unsupported offset 5"),
        ("local-until.ics", "must be specified as UTC time"),
        ("bad-name.ics", "zone name contains >: \"C>T\""),
    ];

    for (name, message) in cases {
        let err = to_location_template("", &vtimezone(name)).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "{name}: expected {message:?}, got {err}"
        );
    }
}

#[test]
fn error_categories() {
    let err = to_location_template("", &vtimezone("daylight-only.ics")).unwrap_err();
    assert!(matches!(err, ServiceError::DaylightWithoutStandard));

    let err = to_location_template("", &vtimezone("missing-dtstart.ics")).unwrap_err();
    assert!(matches!(err, ServiceError::MissingProperty("DTSTART")));

    let err = to_location_template("", &vtimezone("bad-name.ics")).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidZoneName(_)));

    let err = to_location_template("", &vtimezone("fifth-week.ics")).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRuleValue(_)));
}
