#![expect(clippy::unwrap_used)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Loading `.ics` fixtures from `tests/fixtures`
//! - Extracting the single VTIMEZONE of a fixture
//! - Reading back the v2+ block of TZif output

use std::path::Path;

use vtzif_test::component::ical::{Component, parse};

/// Reads a fixture file as text.
pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Parses a fixture and returns its only VTIMEZONE.
pub fn vtimezone(name: &str) -> Component {
    let mut timezones = parse(&fixture(name)).unwrap().into_timezones();
    assert_eq!(timezones.len(), 1, "fixture {name} must hold one VTIMEZONE");
    timezones.pop().unwrap()
}

/// The parts of a TZif file the tests look at.
#[derive(Debug)]
pub struct TzifData {
    pub version: u8,
    /// v1 block transition count.
    pub v1_transitions: usize,
    pub transitions: Vec<(i64, u8)>,
    /// `(utoff, isdst, desigidx)` per local time type.
    pub types: Vec<(i32, bool, u8)>,
    pub designations: Vec<u8>,
    pub footer: String,
}

impl TzifData {
    /// Returns the designation a type index points at.
    pub fn designation(&self, type_index: usize) -> &str {
        let start = usize::from(self.types[type_index].2);
        let len = self.designations[start..]
            .iter()
            .position(|b| *b == 0)
            .unwrap();
        std::str::from_utf8(&self.designations[start..start + len]).unwrap()
    }
}

struct Counts {
    timecnt: usize,
    typecnt: usize,
    charcnt: usize,
    block_len_v1: usize,
    block_len_v2: usize,
}

fn header(data: &[u8]) -> Counts {
    assert_eq!(&data[..4], b"TZif");
    let count = |i: usize| {
        let at = 20 + i * 4;
        usize::try_from(u32::from_be_bytes(data[at..at + 4].try_into().unwrap())).unwrap()
    };
    let (isutcnt, isstdcnt, leapcnt) = (count(0), count(1), count(2));
    let (timecnt, typecnt, charcnt) = (count(3), count(4), count(5));
    let rest = typecnt * 6 + charcnt + isstdcnt + isutcnt;
    Counts {
        timecnt,
        typecnt,
        charcnt,
        block_len_v1: timecnt * 5 + leapcnt * 8 + rest,
        block_len_v2: timecnt * 9 + leapcnt * 12 + rest,
    }
}

/// Decodes TZif bytes, skipping the v1 data block.
pub fn read_tzif(data: &[u8]) -> TzifData {
    let v1 = header(data);
    let v2_start = 44 + v1.block_len_v1;
    let v2 = header(&data[v2_start..]);
    let body = &data[v2_start + 44..];

    let times = &body[..v2.timecnt * 8];
    let indices = &body[v2.timecnt * 8..v2.timecnt * 9];
    let transitions = times
        .chunks_exact(8)
        .zip(indices)
        .map(|(time, index)| (i64::from_be_bytes(time.try_into().unwrap()), *index))
        .collect();

    let types_start = v2.timecnt * 9;
    let types = body[types_start..types_start + v2.typecnt * 6]
        .chunks_exact(6)
        .map(|t| {
            (
                i32::from_be_bytes(t[..4].try_into().unwrap()),
                t[4] == 1,
                t[5],
            )
        })
        .collect();

    let chars_start = types_start + v2.typecnt * 6;
    let designations = body[chars_start..chars_start + v2.charcnt].to_vec();

    let footer = &body[v2.block_len_v2..];
    assert_eq!(footer.first(), Some(&b'\n'));
    assert_eq!(footer.last(), Some(&b'\n'));
    let footer = std::str::from_utf8(&footer[1..footer.len() - 1]).unwrap().to_string();

    TzifData {
        version: data[4],
        v1_transitions: v1.timecnt,
        transitions,
        types,
        designations,
        footer,
    }
}
