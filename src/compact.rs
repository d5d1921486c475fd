//! Null-compaction of record arrays.
//!
//! Bulk conversion fills one slot per source entity, so entities that
//! convert to nothing leave null slots behind. [`filtered_array`] removes
//! them while keeping the surviving records in their original order.

use crate::records::CRecordArray;

/// Remove the null slots of `array`.
///
/// `removal_count` is the number of null slots when the caller already knows
/// it, or `None` to have it counted first. When there is nothing to remove the
/// very same array is returned. Otherwise a new array sized to the survivors
/// is built and the original one is released.
///
/// A supplied count that does not match the array is corrected, with a
/// warning, rather than trusted.
pub fn filtered_array<T>(
    array: Box<CRecordArray<T>>,
    removal_count: Option<usize>,
) -> Box<CRecordArray<T>> {
    let removal_count = match removal_count {
        Some(count) => count,
        None => array.null_count(),
    };
    if removal_count == 0 {
        return array;
    }

    let size = array.len();
    let expected = size.saturating_sub(removal_count);
    let mut survivors = Vec::with_capacity(expected);
    for slot in array.into_slots() {
        if slot.is_some() {
            survivors.push(slot);
        }
    }
    if survivors.len() != expected {
        tracing::warn!(
            size,
            removal_count,
            actual = size - survivors.len(),
            "Removal count does not match the number of null slots"
        );
    }

    Box::new(survivors.into_iter().collect())
}
