//! Reconstruction of the fragment timeline of a stream index.
//!
//! A Smooth Streaming manifest describes fragments with run-length `<c>` records:
//!
//! ```xml
//! <c t="0" d="20020000" r="60" />
//! <c d="9676333" />
//! ```
//!
//! - `d` is the duration of every fragment in the run.
//! - `t` is an optional absolute start time. It can only move time forward: a `t` lower than
//!   or equal to the end of the previous run is ignored.
//! - `r` is the number of fragments in the run. Absent or `0` means a single fragment.
//!
//! References:
//! - [MS-SSTR](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-sstr/)

use crate::{error::ManifestError, model::ChunkRecord};

/// Start times of every fragment of a stream, in timescale ticks and in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline(Vec<u64>);

impl Timeline {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u64> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Upper bound on the number of fragments a single stream index may expand to.
pub const MAX_FRAGMENTS: u64 = 1 << 24;

/// Expands chunk records into the start time of every fragment.
pub fn reconstruct(records: &[ChunkRecord]) -> Result<Timeline, ManifestError> {
    let total = fragment_total(records)?;
    let mut times = Vec::new();
    times
        .try_reserve_exact(total as usize)
        .map_err(|_| ManifestError::TooManyFragments {
            limit: MAX_FRAGMENTS,
        })?;

    // End of the previous run. `None` is lower than any valid timestamp, so the first record
    // always sets it. An end past `u64::MAX` is only an error once another record needs it.
    let mut cursor: Option<Result<u64, ManifestError>> = None;

    for record in records {
        let start_time = record.start_time.unwrap_or(0);
        let mut time = match cursor {
            Some(Err(overflow)) => return Err(overflow),
            Some(Ok(cursor)) if cursor >= start_time => {
                if let Some(t) = record.start_time.filter(|t| *t < cursor) {
                    log::warn!("Ignored chunk start time {t} behind timeline cursor {cursor}.");
                }
                cursor
            }
            _ => start_time,
        };

        log::trace!(
            "Decoding chunk at {time}: duration = {}, fragments = {}",
            record.duration,
            record.fragment_count()
        );

        times.push(time);
        for _ in 1..record.fragment_count() {
            time = advance(time, record.duration)?;
            times.push(time);
        }

        cursor = Some(advance(time, record.duration));
    }

    Ok(Timeline(times))
}

fn fragment_total(records: &[ChunkRecord]) -> Result<u64, ManifestError> {
    records
        .iter()
        .try_fold(0u64, |total, record| total.checked_add(record.fragment_count()))
        .filter(|total| *total <= MAX_FRAGMENTS)
        .ok_or(ManifestError::TooManyFragments {
            limit: MAX_FRAGMENTS,
        })
}

fn advance(time: u64, duration: u64) -> Result<u64, ManifestError> {
    time.checked_add(duration)
        .ok_or(ManifestError::TimelineOverflow { cursor: time, duration })
}
