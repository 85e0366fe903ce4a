//! Delimited string joining.

use std::fmt::{Display, Write};

/// Formats every element of `source` and joins them with `separator`.
///
/// ```
/// use sequence_ops::join::join_delimited;
///
/// assert_eq!(join_delimited(1..=3, ", "), "1, 2, 3");
/// assert_eq!(join_delimited(Vec::<u8>::new(), ", "), "");
/// ```
pub fn join_delimited<S>(source: S, separator: &str) -> String
where
    S: IntoIterator,
    S::Item: Display,
{
    let mut joined = String::new();
    for (position, item) in source.into_iter().enumerate() {
        if position > 0 {
            joined.push_str(separator);
        }
        // Writing into a `String` cannot fail.
        let _ = write!(joined, "{item}");
    }
    joined
}
