//! Splits text into delimiter-bounded segments.
//!
//! Ranges are expressed over a `&[char]` view of the text so the converter
//! can slice keys out of them without re-decoding UTF-8.

use std::ops::Range;

use crate::delimiter_set::is_delimiter;

/// Splits `chars` at delimiter characters.
///
/// With `inclusive = true` every delimiter closes the range it ends, so a run
/// of consecutive delimiters yields one single-character range per delimiter.
/// With `inclusive = false` the delimiter gets a range of its own, separate
/// from the text that precedes it.
///
/// The returned ranges are ordered, non-overlapping and cover `chars`
/// exactly; an empty input yields no ranges.
///
/// ```
/// use opencc_rounds::segmenter::split_ranges;
///
/// let chars: Vec<char> = "你好，世界！！".chars().collect();
/// assert_eq!(split_ranges(&chars, true), vec![0..3, 3..6, 6..7]);
/// assert_eq!(split_ranges(&chars, false), vec![0..2, 2..3, 3..5, 5..6, 6..7]);
/// ```
pub fn split_ranges(chars: &[char], inclusive: bool) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;

    for (i, &ch) in chars.iter().enumerate() {
        if is_delimiter(ch) {
            if inclusive {
                ranges.push(start..i + 1);
            } else {
                if i > start {
                    ranges.push(start..i);
                }
                ranges.push(i..i + 1);
            }
            start = i + 1;
        }
    }

    if start < chars.len() {
        ranges.push(start..chars.len());
    }

    ranges
}
