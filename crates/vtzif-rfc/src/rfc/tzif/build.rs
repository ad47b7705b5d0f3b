//! TZif writer (RFC 8536 §3, §4).

use vtzif_core::types::{Template, Zone};

use super::posix::parse_standard_zone;
use crate::error::{RfcError, RfcResult};

const MAGIC: &[u8; 4] = b"TZif";

/// TZif format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TzifVersion {
    V2,
    V3,
}

impl TzifVersion {
    /// ## Summary
    /// Maps a configured version number to a version.
    ///
    /// ## Errors
    /// Returns `RfcError::EncodeError` for anything other than 2 or 3.
    pub fn from_number(version: u8) -> RfcResult<Self> {
        match version {
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            other => Err(RfcError::EncodeError(format!(
                "unsupported TZif version {other}"
            ))),
        }
    }

    const fn header_byte(self) -> u8 {
        match self {
            Self::V2 => b'2',
            Self::V3 => b'3',
        }
    }
}

/// A local time type record with its designation resolved to a byte index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LocalTimeType {
    ut_offset: i32,
    is_dst: bool,
    designation_index: u8,
}

/// Everything needed to write one data block, already validated against TZif limits.
#[derive(Debug)]
struct DataBlock {
    transitions: Vec<(i64, u8)>,
    types: Vec<LocalTimeType>,
    designations: Vec<u8>,
}

impl DataBlock {
    fn from_template(template: &Template) -> RfcResult<Self> {
        let derived;
        let zones: &[Zone] = if template.zones.is_empty() {
            if template.extend.is_empty() {
                return Err(RfcError::EncodeError(
                    "template has neither zones nor an extend rule".to_string(),
                ));
            }
            derived = [parse_standard_zone(&template.extend)?];
            &derived
        } else {
            &template.zones
        };

        if zones.len() > 256 {
            return Err(RfcError::EncodeError(format!(
                "too many local time types: {} (at most 256)",
                zones.len()
            )));
        }

        let mut designations: Vec<u8> = Vec::new();
        let mut types = Vec::with_capacity(zones.len());
        for zone in zones {
            let designation_index = designation_index(&mut designations, &zone.name)?;
            types.push(LocalTimeType {
                ut_offset: zone.offset.seconds(),
                is_dst: zone.is_dst,
                designation_index,
            });
        }

        let transitions = template
            .changes
            .iter()
            .map(|change| {
                if change.zone_index >= zones.len() {
                    return Err(RfcError::EncodeError(format!(
                        "change references missing zone {}",
                        change.zone_index
                    )));
                }
                let index = u8::try_from(change.zone_index).map_err(|e| {
                    RfcError::EncodeError(format!("zone index {}: {e}", change.zone_index))
                })?;
                Ok((change.instant.timestamp(), index))
            })
            .collect::<RfcResult<Vec<_>>>()?;

        Ok(Self {
            transitions,
            types,
            designations,
        })
    }

    /// Writes the header and data block. `wide` selects 64-bit transition times.
    fn write(&self, out: &mut Vec<u8>, version: TzifVersion, wide: bool) -> RfcResult<()> {
        let transitions: Vec<(i64, u8)> = if wide {
            self.transitions.clone()
        } else {
            self.transitions
                .iter()
                .copied()
                .filter(|(time, _)| i32::try_from(*time).is_ok())
                .collect()
        };

        out.extend_from_slice(MAGIC);
        out.push(version.header_byte());
        out.extend_from_slice(&[0; 15]);
        for count in [
            0, // isutcnt
            0, // isstdcnt
            0, // leapcnt
            transitions.len(),
            self.types.len(),
            self.designations.len(),
        ] {
            let count = u32::try_from(count)
                .map_err(|e| RfcError::EncodeError(format!("count {count}: {e}")))?;
            out.extend_from_slice(&count.to_be_bytes());
        }

        for (time, _) in &transitions {
            if wide {
                out.extend_from_slice(&time.to_be_bytes());
            } else {
                let narrow = i32::try_from(*time)
                    .map_err(|e| RfcError::EncodeError(format!("transition {time}: {e}")))?;
                out.extend_from_slice(&narrow.to_be_bytes());
            }
        }
        out.extend(transitions.iter().map(|(_, index)| *index));

        for record in &self.types {
            out.extend_from_slice(&record.ut_offset.to_be_bytes());
            out.push(u8::from(record.is_dst));
            out.push(record.designation_index);
        }
        out.extend_from_slice(&self.designations);
        Ok(())
    }
}

/// Returns the index of `name` in the designation table, appending it if needed.
fn designation_index(designations: &mut Vec<u8>, name: &str) -> RfcResult<u8> {
    if name.contains('\0') {
        return Err(RfcError::EncodeError(format!(
            "zone designation contains NUL: {name:?}"
        )));
    }

    let mut start = 0;
    for entry in designations.split(|b| *b == 0) {
        if start >= designations.len() {
            break;
        }
        if entry == name.as_bytes() {
            return u8::try_from(start).map_err(|e| {
                RfcError::EncodeError(format!("designation table too large: {e}"))
            });
        }
        start += entry.len() + 1;
    }

    let index = u8::try_from(designations.len())
        .map_err(|e| RfcError::EncodeError(format!("designation table too large: {e}")))?;
    designations.extend_from_slice(name.as_bytes());
    designations.push(0);
    Ok(index)
}

/// ## Summary
/// Encodes a template as a TZif file.
///
/// Writes the v1 block (transitions that fit in 32 bits), the v2+ block, and the
/// footer carrying `template.extend`. When the template has no zones, the single
/// local time type is read from the standard part of the extend string.
///
/// ## Errors
/// Returns `RfcError::EncodeError` if the template exceeds TZif limits, has no
/// usable local time type, or has a non-ASCII extend string.
#[tracing::instrument(skip(template), fields(name = %template.name, zones = template.zones.len(), changes = template.changes.len()))]
pub fn encode(template: &Template, version: TzifVersion) -> RfcResult<Vec<u8>> {
    if !template.extend.is_ascii() || template.extend.contains('\n') {
        return Err(RfcError::EncodeError(format!(
            "extend rule is not a single ASCII line: {:?}",
            template.extend
        )));
    }

    let block = DataBlock::from_template(template)?;

    let mut out = Vec::new();
    block.write(&mut out, version, false)?;
    block.write(&mut out, version, true)?;
    out.push(b'\n');
    out.extend_from_slice(template.extend.as_bytes());
    out.push(b'\n');

    tracing::debug!(bytes = out.len(), "Encoded TZif");

    Ok(out)
}
