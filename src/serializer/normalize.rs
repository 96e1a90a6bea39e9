//! Restoration of rich values in decoded lookup leaves.

use crate::condition::Leaf;
use crate::serializer::TimeZonePolicy;
use log::trace;

/// Lookup-key suffix of a two-ended range comparison
pub const RANGE_SUFFIX: &str = "__range";

/// Turn the epoch-second bounds of a range lookup back into date-times.
///
/// Only leaves whose key ends with [`RANGE_SUFFIX`] and whose value is a list
/// of exactly two numbers are rewritten. Everything else, including range
/// values of another length, comes back unchanged.
pub fn normalize_leaf(leaf: Leaf, zone: TimeZonePolicy) -> Leaf {
    if !leaf.key().ends_with(RANGE_SUFFIX) {
        return leaf;
    }

    let bounds = match leaf.value().as_list() {
        Some([low, high]) => zone.value_to_datetime(low).zip(zone.value_to_datetime(high)),
        _ => None,
    };

    match bounds {
        Some(bounds) => {
            let (key, _) = leaf.into_parts();
            Leaf::new(key, bounds)
        }
        None => {
            trace!("Range lookup '{}' left as decoded", leaf.key());
            leaf
        }
    }
}
