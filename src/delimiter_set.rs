//! Fixed delimiter set used to cut text into independently convertible segments.
//!
//! No dictionary key may contain one of these characters. That is what makes
//! splitting before matching equivalent to matching over the whole string.
//! Curly quotes (`“”‘’`) and corner brackets (`「」『』`) are deliberately
//! absent: they are keys of the punctuation tables.

use once_cell::sync::Lazy;

/// ASCII whitespace/punctuation plus common full-width CJK punctuation.
pub const FULL_DELIMITERS: &str =
    " \t\n\r!\"#$%&'()*+,-./:;<=>?@[\\]^_{}|~＝、。﹁﹂—－（）《》〈〉？！…／＼︒︑︔︓︿﹀︹︺︙︐［﹇］﹈︕︖︰︳︴︽︾︵︶｛︷｝︸﹃﹄【︻】︼　～．，；：";

/// Compact delimiter set optimized for per-character membership tests.
///
/// * `U+0000..=U+007F` live in a single [`u128`] mask.
/// * `U+0080..=U+FFFF` live in a 65,536-bit table (`[u64; 1024]`, ~8 KB).
/// * Supplementary-plane characters are never delimiters.
#[derive(Copy, Clone)]
pub struct DelimiterSet {
    ascii_mask: u128,
    bmp_bits: [u64; 1024],
}

impl DelimiterSet {
    /// Builds a set from every `char` of `delimiters`.
    pub fn from_chars(delimiters: &str) -> Self {
        let mut set = DelimiterSet {
            ascii_mask: 0,
            bmp_bits: [0u64; 1024],
        };
        for ch in delimiters.chars() {
            let u = ch as u32;
            if u <= 0x7F {
                set.ascii_mask |= 1u128 << u;
            } else if u <= 0xFFFF {
                set.bmp_bits[(u >> 6) as usize] |= 1u64 << (u & 63);
            }
        }
        set
    }

    /// Tests whether `c` is a delimiter.
    ///
    /// ```
    /// use opencc_rounds::delimiter_set::FULL_DELIMITER_SET;
    /// assert!(FULL_DELIMITER_SET.contains('。'));
    /// assert!(!FULL_DELIMITER_SET.contains('你'));
    /// ```
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        let u = c as u32;
        if u <= 0x7F {
            return ((self.ascii_mask >> u) & 1) == 1;
        }
        if u <= 0xFFFF {
            return ((self.bmp_bits[(u >> 6) as usize] >> (u & 63)) & 1) == 1;
        }
        false
    }
}

/// Global [`DelimiterSet`] built once from [`FULL_DELIMITERS`].
pub static FULL_DELIMITER_SET: Lazy<DelimiterSet> =
    Lazy::new(|| DelimiterSet::from_chars(FULL_DELIMITERS));

/// Hot-path shorthand for `FULL_DELIMITER_SET.contains(c)`.
#[inline]
pub fn is_delimiter(c: char) -> bool {
    FULL_DELIMITER_SET.contains(c)
}
