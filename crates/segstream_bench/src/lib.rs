//! Benchmark utilities.

use rand::Rng;
use segstream_core::{SegResult, SegmentedStream};
use std::io::SeekFrom;

/// Generate random data of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Generate `count` random offsets in `[0, len]`, sorted descending.
///
/// Applying inserts at descending offsets keeps every earlier offset valid.
pub fn descending_offsets(count: usize, len: u64) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    let mut offsets: Vec<u64> = (0..count).map(|_| rng.gen_range(0..=len)).collect();
    offsets.sort_unstable_by(|a, b| b.cmp(a));
    offsets
}

/// Inserts `payload` at each of `offsets`.
///
/// # Errors
///
/// Returns any error from the stream.
pub fn insert_at_each(
    stream: &mut SegmentedStream,
    offsets: &[u64],
    payload: &[u8],
) -> SegResult<()> {
    for &offset in offsets {
        stream.seek(SeekFrom::Start(offset))?;
        stream.insert(payload.len() as u64)?;
        stream.write(payload)?;
    }
    Ok(())
}
