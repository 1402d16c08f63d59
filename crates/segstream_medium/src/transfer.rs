//! Bulk byte transfer within and between media.

use crate::error::MediumResult;
use crate::medium::{same_medium, Medium, SharedMedium};

/// Size of the bounce buffer used for transfers.
pub const TRANSFER_CHUNK: usize = 4096;

/// Moves `len` bytes inside one medium from `from` to `to`.
///
/// Source and destination may overlap. When moving towards the start the
/// bytes are copied front to back; when moving towards the end they are
/// copied back to front, so no byte is overwritten before it has been read.
///
/// # Errors
///
/// Returns [`crate::MediumError::ReadPastEnd`] if the source range runs past
/// the end of the medium, or any error from the medium itself.
pub fn move_within(medium: &mut dyn Medium, from: u64, to: u64, len: u64) -> MediumResult<()> {
    if from == to || len == 0 {
        return Ok(());
    }

    let mut buf = vec![0u8; TRANSFER_CHUNK.min(len as usize)];
    if to < from {
        let mut done = 0u64;
        while done < len {
            let n = (len - done).min(buf.len() as u64) as usize;
            medium.read_exact_at(from + done, &mut buf[..n])?;
            medium.write_at(to + done, &buf[..n])?;
            done += n as u64;
        }
    } else {
        let mut remaining = len;
        while remaining > 0 {
            let n = remaining.min(buf.len() as u64) as usize;
            remaining -= n as u64;
            medium.read_exact_at(from + remaining, &mut buf[..n])?;
            medium.write_at(to + remaining, &buf[..n])?;
        }
    }
    Ok(())
}

/// Copies `len` bytes from `src` at `from` to `dst` at `to`.
///
/// If both handles refer to the same medium this is [`move_within`].
/// Otherwise each chunk is read and written under separate borrows, so a
/// destination that reaches back into the source (a window over a stream
/// that itself reads from `src`) does not trip the `RefCell`.
///
/// # Errors
///
/// Returns [`crate::MediumError::ReadPastEnd`] if the source runs short, or
/// any error from either medium.
pub fn copy_range(
    src: &SharedMedium,
    from: u64,
    dst: &SharedMedium,
    to: u64,
    len: u64,
) -> MediumResult<()> {
    if same_medium(src, dst) {
        return move_within(&mut *dst.borrow_mut(), from, to, len);
    }

    let mut buf = vec![0u8; TRANSFER_CHUNK.min(len as usize)];
    let mut done = 0u64;
    while done < len {
        let n = (len - done).min(buf.len() as u64) as usize;
        src.borrow_mut().read_exact_at(from + done, &mut buf[..n])?;
        dst.borrow_mut().write_at(to + done, &buf[..n])?;
        done += n as u64;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{shared, MediumError, MemoryMedium};
    use proptest::prelude::*;
    use proptest::sample::Index;

    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    #[test]
    fn move_back_overlapping() {
        let mut medium = MemoryMedium::with_data(ALPHABET.to_vec());
        move_within(&mut medium, 10, 5, 10).unwrap();
        assert_eq!(medium.data(), b"ABCDEKLMNOPQRSTPQRSTUVWXYZ");
    }

    #[test]
    fn move_forward_overlapping() {
        let mut medium = MemoryMedium::with_data(ALPHABET.to_vec());
        move_within(&mut medium, 10, 15, 10).unwrap();
        assert_eq!(medium.data(), b"ABCDEFGHIJKLMNOKLMNOPQRSTZ");
    }

    #[test]
    fn move_forward_past_end_grows() {
        let mut medium = MemoryMedium::with_data(ALPHABET.to_vec());
        move_within(&mut medium, 20, 24, 6).unwrap();
        assert_eq!(medium.data(), b"ABCDEFGHIJKLMNOPQRSTUVWXUVWXYZ");
    }

    #[test]
    fn move_larger_than_chunk() {
        let data: Vec<u8> = (0..3 * TRANSFER_CHUNK).map(|i| (i % 251) as u8).collect();
        let mut medium = MemoryMedium::with_data(data.clone());

        move_within(&mut medium, 0, 100, data.len() as u64).unwrap();
        assert_eq!(&medium.data()[100..], &data[..]);

        move_within(&mut medium, 100, 0, data.len() as u64).unwrap();
        assert_eq!(&medium.data()[..data.len()], &data[..]);
    }

    #[test]
    fn move_source_past_end_fails() {
        let mut medium = MemoryMedium::with_data(ALPHABET.to_vec());
        let result = move_within(&mut medium, 20, 0, 10);
        assert!(matches!(result, Err(MediumError::ReadPastEnd { .. })));
    }

    #[test]
    fn copy_between_media() {
        let src = shared(MemoryMedium::with_data(ALPHABET.to_vec()));
        let dst = shared(MemoryMedium::with_data(b"0123456789".to_vec()));
        let src_handle: SharedMedium = src.clone();
        let dst_handle: SharedMedium = dst.clone();

        copy_range(&src_handle, 3, &dst_handle, 8, 4).unwrap();
        assert_eq!(dst.borrow().data(), b"01234567DEFG");
        assert_eq!(src.borrow().data(), ALPHABET);
    }

    #[test]
    fn copy_within_same_handle_is_overlap_safe() {
        let medium = shared(MemoryMedium::with_data(ALPHABET.to_vec()));
        let handle: SharedMedium = medium.clone();

        copy_range(&handle, 10, &handle, 15, 10).unwrap();
        assert_eq!(medium.borrow().data(), b"ABCDEFGHIJKLMNOKLMNOPQRSTZ");
    }

    proptest! {
        #[test]
        fn move_within_matches_copy_within(
            data in prop::collection::vec(any::<u8>(), 1..3 * TRANSFER_CHUNK),
            from in any::<Index>(),
            to in any::<Index>(),
            len in any::<Index>(),
        ) {
            let from = from.index(data.len());
            let to = to.index(data.len());
            let len = len.index(data.len() - from.max(to) + 1);

            let mut expected = data.clone();
            expected.copy_within(from..from + len, to);

            let mut medium = MemoryMedium::with_data(data);
            move_within(&mut medium, from as u64, to as u64, len as u64).unwrap();
            prop_assert_eq!(medium.data(), &expected[..]);
        }
    }
}
