use chrono::{DateTime, TimeZone, Utc};
use vtzif_test::component::vtimezone::to_location_template;

use super::helpers::vtimezone;

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 1, 0, 0).unwrap()
}

/// ## Summary
/// A VTIMEZONE with only unbounded rules becomes a bare extend string.
#[test_log::test]
fn prague_unbounded_pair() {
    let template = to_location_template("Europe/Prague", &vtimezone("prague.ics")).unwrap();

    assert_eq!(template.name, "Europe/Prague");
    assert!(template.zones.is_empty());
    assert!(template.changes.is_empty());
    assert_eq!(
        template.extend,
        "<CET>-01:00:00<CEST>-02:00:00M3.5.0/02:00:00M10.5.0/03:00:00"
    );
}

/// ## Summary
/// Bounded rules from different children are merged and sorted by instant.
#[test_log::test]
fn prague_history_mixes_bounded_and_unbounded() {
    let template =
        to_location_template("Europe/Prague", &vtimezone("prague-history.ics")).unwrap();

    assert_eq!(template.zones.len(), 2);
    assert_eq!(template.zones[0].name, "CET");
    assert_eq!(template.zones[0].offset.seconds(), 3600);
    assert!(!template.zones[0].is_dst);
    assert_eq!(template.zones[1].name, "CEST");
    assert_eq!(template.zones[1].offset.seconds(), 7200);
    assert!(template.zones[1].is_dst);

    // 1979..=1995 September changes plus two April changes.
    assert_eq!(template.changes.len(), 19);
    let first: Vec<_> = template
        .changes
        .iter()
        .take(5)
        .map(|c| (c.instant, c.zone_index))
        .collect();
    assert_eq!(
        first,
        vec![
            (at(1979, 4, 1), 1),
            (at(1979, 9, 30), 0),
            (at(1980, 4, 6), 1),
            (at(1980, 9, 28), 0),
            (at(1981, 9, 27), 0),
        ]
    );
    let last = template.changes.last().unwrap();
    assert_eq!((last.instant, last.zone_index), (at(1995, 9, 24), 0));

    assert!(
        template
            .changes
            .windows(2)
            .all(|pair| pair[0].instant <= pair[1].instant)
    );
    assert!(template.validate().is_ok());

    assert_eq!(
        template.extend,
        "<CET>-01:00:00<CEST>-02:00:00M3.5.0/02:00:00M10.5.0/03:00:00"
    );
}

/// ## Summary
/// A lone unbounded standard rule gives a fixed-offset extend string.
#[test_log::test]
fn bogota_standard_only() {
    let template = to_location_template("America/Bogota", &vtimezone("bogota.ics")).unwrap();

    assert!(template.zones.is_empty());
    assert_eq!(template.extend, "<-05>05:00:00");
}
