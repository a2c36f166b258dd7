//! Dictionary table with key-length metadata.
//!
//! [`DictMaxLen`] maps phrase keys (`Box<[char]>`) to replacement strings
//! (`Box<str>`) and records:
//!
//! - `min_len` / `max_len`: shortest and longest key, in **UTF-16 code units**
//! - `max_chars`: longest key in code points (drives the phrase/single split)
//! - `key_length_mask`: bit `n` set ⇔ some key is exactly `n` units long (`n < 64`)
//!
//! Tables are immutable once built and shared read-only (usually behind an
//! `Arc`) by every round and thread that uses them.
//!
//! ## Example
//! ```
//! use opencc_rounds::dictionary_lib::DictMaxLen;
//!
//! let dict = DictMaxLen::build_from_pairs(vec![
//!     ("汉字".to_string(), "漢字".to_string()),
//!     ("𬴂".to_string(), "騑".to_string()),
//! ]);
//!
//! assert_eq!(dict.max_len, 2);
//! assert_eq!(dict.min_len, 2);
//! assert_eq!(dict.max_chars, 2);
//! assert_eq!(dict.get_str("汉字"), Some("漢字"));
//! ```

use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::utils::utf16_len;

/// A dictionary with tracked key-length bounds, optimized for zero-allocation
/// lookups by `&[char]` window.
///
/// Only `map` is trusted when deserializing; the length metadata is always
/// recomputed from the keys.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(from = "SerializedDictMaxLen")]
pub struct DictMaxLen {
    /// Phrase (as boxed slice of `char`) → replacement string.
    pub map: FxHashMap<Box<[char]>, Box<str>>,

    /// Longest key in UTF-16 code units (`0` for an empty table).
    pub max_len: usize,

    /// Shortest key in UTF-16 code units (`0` for an empty table).
    pub min_len: usize,

    /// Longest key in code points.
    pub max_chars: usize,

    /// Bit `n` set ⇔ a key of exactly `n` UTF-16 units exists (`1 <= n < 64`).
    pub key_length_mask: u64,
}

/// Wire form of [`DictMaxLen`]. Stored metadata fields are ignored.
#[derive(Deserialize)]
struct SerializedDictMaxLen {
    #[serde(default)]
    map: FxHashMap<Box<[char]>, Box<str>>,
}

impl From<SerializedDictMaxLen> for DictMaxLen {
    fn from(raw: SerializedDictMaxLen) -> Self {
        Self::from_map(raw.map)
    }
}

impl DictMaxLen {
    /// Builds a table from `(key, value)` pairs.
    ///
    /// ### Duplicates
    /// **First-wins**. Identical duplicates are ignored silently; a conflicting
    /// duplicate keeps the first value and is reported at `debug` level.
    ///
    /// ### Empty keys
    /// Dropped (with a `debug` note). Every stored key is at least one unit long,
    /// so `1 <= min_len <= max_len` holds for any non-empty table.
    pub fn build_from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        use std::collections::hash_map::Entry;

        let it = pairs.into_iter();
        let (lower, _) = it.size_hint();

        let mut map: FxHashMap<Box<[char]>, Box<str>> = FxHashMap::default();
        if lower > 0 {
            map.reserve(lower);
        }

        for (k, v) in it {
            if k.is_empty() {
                debug!("empty dictionary key ignored (value={:?})", v);
                continue;
            }

            let chars: Box<[char]> = k.chars().collect::<Vec<_>>().into_boxed_slice();
            let new_val: Box<str> = v.into_boxed_str();

            match map.entry(chars) {
                Entry::Vacant(e) => {
                    e.insert(new_val);
                }
                Entry::Occupied(e) => {
                    if e.get().as_ref() != new_val.as_ref() {
                        debug!(
                            "duplicate key ignored (first-wins): key={:?}; kept={:?}, ignored={:?}",
                            k,
                            e.get(),
                            new_val
                        );
                    }
                }
            }
        }

        Self::from_map(map)
    }

    /// Wraps an existing map and derives all length metadata from its keys.
    pub fn from_map(map: FxHashMap<Box<[char]>, Box<str>>) -> Self {
        let mut max_len = 0usize;
        let mut min_len = usize::MAX;
        let mut max_chars = 0usize;
        let mut key_length_mask = 0u64;

        for key in map.keys() {
            let len = utf16_len(key);
            max_len = max_len.max(len);
            min_len = min_len.min(len);
            max_chars = max_chars.max(key.len());
            if len < 64 {
                key_length_mask |= 1u64 << len;
            }
        }

        if map.is_empty() {
            min_len = 0;
        }

        debug_assert!(
            (max_len == 0 && min_len == 0) || (min_len >= 1 && min_len <= max_len),
            "min_len/max_len invariant violated: min_len={}, max_len={}",
            min_len,
            max_len
        );

        Self {
            map,
            max_len,
            min_len,
            max_chars,
            key_length_mask,
        }
    }

    /// Parses a line-oriented table: `key<whitespace>value[ more values]`.
    ///
    /// Only the first value of a line is used. Blank lines and lines starting
    /// with `#` are skipped; lines without a value are reported at `debug` level.
    ///
    /// ```
    /// use opencc_rounds::dictionary_lib::DictMaxLen;
    ///
    /// let dict = DictMaxLen::from_text("# comment\n龙\t龍\n里\t裏 裡\n\n坏行\n");
    /// assert_eq!(dict.len(), 2);
    /// assert_eq!(dict.get_str("里"), Some("裏"));
    /// ```
    pub fn from_text(content: &str) -> Self {
        let pairs = content.lines().filter_map(|line| {
            let line = line.trim_start_matches('\u{FEFF}');
            if line.trim().is_empty() || line.starts_with('#') {
                return None;
            }
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(key), Some(value)) => Some((key.to_string(), value.to_string())),
                _ => {
                    debug!("Invalid line format: {}", line);
                    None
                }
            }
        });

        Self::build_from_pairs(pairs)
    }

    /// Looks up an exact key window.
    #[inline]
    pub fn get(&self, key: &[char]) -> Option<&str> {
        self.map.get(key).map(|v| v.as_ref())
    }

    /// Convenience lookup by `&str` (allocates the key; not for hot loops).
    pub fn get_str(&self, key: &str) -> Option<&str> {
        let chars: Vec<char> = key.chars().collect();
        self.get(&chars)
    }

    /// Whether a key of exactly `len` UTF-16 units may exist.
    ///
    /// Exact for `len < 64`; for longer lengths only the `[min_len, max_len]`
    /// bounds are known.
    #[inline]
    pub fn has_key_len(&self, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        if len < 64 {
            return (self.key_length_mask >> len) & 1 == 1;
        }
        self.min_len <= len && len <= self.max_len
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
