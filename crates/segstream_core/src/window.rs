//! Windows into a stream that is itself being edited.

use crate::error::SegError;
use crate::stream::SegmentedStream;
use segstream_medium::{MediumError, ResizeFn, SharedMedium, SubMedium};
use std::cell::RefCell;
use std::rc::Rc;

/// A stream shared between its owner and the windows opened on it.
pub type SharedStream = Rc<RefCell<SegmentedStream>>;

/// Opens a window onto `[start, start + len)` of `parent`.
///
/// Resizing the window inserts or removes bytes at the end of its region
/// in the parent, so a nested stream can grow or shrink its record while
/// the surrounding container is still uncommitted. Content after the
/// window shifts accordingly; the parent cursor is kept.
///
/// # Example
///
/// ```rust
/// use segstream_core::{nested_window, SegmentedStream};
/// use segstream_medium::{shared, MemoryMedium};
/// use std::cell::RefCell;
/// use std::io::SeekFrom;
/// use std::rc::Rc;
///
/// let file = shared(MemoryMedium::with_data(b"head[abc]tail".to_vec()));
/// let parent = Rc::new(RefCell::new(SegmentedStream::new(file.clone()).unwrap()));
///
/// let window = shared(nested_window(&parent, 5, 3));
/// let mut record = SegmentedStream::new(window).unwrap();
/// record.seek(SeekFrom::End(0)).unwrap();
/// record.write(b"defg").unwrap();
/// record.commit().unwrap();
///
/// parent.borrow_mut().commit().unwrap();
/// assert_eq!(file.borrow().data(), b"head[abcdefg]tail");
/// ```
pub fn nested_window(parent: &SharedStream, start: u64, len: u64) -> SubMedium {
    let target = Rc::clone(parent);
    let resize: ResizeFn = Box::new(move |start, old_len, new_len| {
        target
            .borrow_mut()
            .resize_region(start, old_len, new_len)
            .map_err(|err| match err {
                SegError::Medium(inner) => inner,
                other => MediumError::truncation(new_len, other.to_string()),
            })
    });

    let medium: SharedMedium = parent.clone();
    SubMedium::with_resize(medium, start, len, resize)
}
