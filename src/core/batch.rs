use std::slice::Chunks;

use crate::core::IexError;

/// Split `items` into contiguous groups of at most `size`, in order.
///
/// The last group may be shorter. Unlike [`slice::chunks`], a zero size is an
/// error rather than a panic.
pub fn chunked<T>(items: &[T], size: usize) -> Result<Chunks<'_, T>, IexError> {
    if size == 0 {
        return Err(IexError::InvalidParams("batch size must be at least 1".into()));
    }
    Ok(items.chunks(size))
}
