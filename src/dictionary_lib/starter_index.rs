use log::debug;
use rustc_hash::FxHashMap;

use crate::dictionary_lib::DictMaxLen;

const BMP_SIZE: usize = 0x10000;
const ASTRAL_BASE: u32 = 0x10000;
const ASTRAL_SIZE: usize = 0x100000;
const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Per-round summary of which code points can start a key, and with which
/// lengths.
///
/// Built from exactly the dictionaries of one round and never mutated
/// afterwards; if the dictionaries change, build a new index.
///
/// - **BMP (0x0000..=0xFFFF)** starters are stored densely:
///   - `bmp_bits`: presence bit-vector (`[u64; 1024]`).
///   - `bmp_mask`: per-starter length mask (`u64`), indexed by code point.
/// - **Supplementary (0x10000..=0x10FFFF)** starters are indexed by offset
///   (`cp - 0x10000`):
///   - `astral_bits`: presence bit-vector, allocated only if such a starter exists.
///   - `astral_mask`: sparse per-starter length mask.
///
/// # Bit layout
/// Bit `n` of a length mask ⇔ some key beginning with that starter is exactly
/// `n` UTF-16 units long. Lengths `>= 64` are not represented; callers fall
/// back to the per-table `[min_len, max_len]` bounds for them.
///
/// # Example
/// ```
/// use opencc_rounds::dictionary_lib::{DictMaxLen, StarterIndex};
///
/// let d1 = DictMaxLen::build_from_pairs(vec![
///     ("你好".to_string(), "您好".to_string()),
///     ("𢫊".to_string(), "替".to_string()),
/// ]);
/// let d2 = DictMaxLen::build_from_pairs(vec![("你".to_string(), "您".to_string())]);
///
/// let idx = StarterIndex::build(&[&d1, &d2]);
/// assert!(idx.has_starter('你' as u32));
/// assert_eq!(idx.len_mask('你' as u32), (1 << 1) | (1 << 2));
/// assert_eq!(idx.len_mask('𢫊' as u32), 1 << 2);
/// assert!(!idx.has_starter('好' as u32));
/// ```
#[derive(Debug)]
pub struct StarterIndex {
    bmp_bits: Vec<u64>,
    bmp_mask: Vec<u64>,
    astral_bits: Vec<u64>,
    astral_mask: FxHashMap<u32, u64>,
    starters: usize,
}

impl StarterIndex {
    /// Builds the index from the first code point of every key in `dicts`.
    ///
    /// Only the starter of each key is inspected, never the whole key.
    pub fn build(dicts: &[&DictMaxLen]) -> Self {
        let mut index = StarterIndex {
            bmp_bits: vec![0u64; BMP_SIZE / 64],
            bmp_mask: vec![0u64; BMP_SIZE],
            astral_bits: Vec::new(),
            astral_mask: FxHashMap::default(),
            starters: 0,
        };

        for d in dicts {
            for key in d.map.keys() {
                let Some(&c0) = key.first() else {
                    continue;
                };
                let len: usize = key.iter().map(|c| c.len_utf16()).sum();
                index.insert(c0 as u32, len);
            }
        }

        debug!(
            "starter index built: {} starters from {} dictionaries",
            index.starters,
            dicts.len()
        );
        index
    }

    fn insert(&mut self, cp: u32, len: usize) {
        let bit = if len < 64 { 1u64 << len } else { 0 };

        if (cp as usize) < BMP_SIZE {
            let word = &mut self.bmp_bits[(cp >> 6) as usize];
            let flag = 1u64 << (cp & 63);
            if *word & flag == 0 {
                *word |= flag;
                self.starters += 1;
            }
            self.bmp_mask[cp as usize] |= bit;
        } else {
            if self.astral_bits.is_empty() {
                self.astral_bits = vec![0u64; ASTRAL_SIZE / 64];
            }
            let off = cp - ASTRAL_BASE;
            let word = &mut self.astral_bits[(off >> 6) as usize];
            let flag = 1u64 << (off & 63);
            if *word & flag == 0 {
                *word |= flag;
                self.starters += 1;
            }
            *self.astral_mask.entry(off).or_default() |= bit;
        }
    }

    /// Can any key of this round start with code point `cp`?
    ///
    /// `false` for values outside the Unicode range.
    #[inline]
    pub fn has_starter(&self, cp: u32) -> bool {
        if (cp as usize) < BMP_SIZE {
            return (self.bmp_bits[(cp >> 6) as usize] >> (cp & 63)) & 1 == 1;
        }
        if cp > MAX_CODE_POINT {
            return false;
        }
        let off = cp - ASTRAL_BASE;
        self.astral_bits
            .get((off >> 6) as usize)
            .is_some_and(|w| (w >> (off & 63)) & 1 == 1)
    }

    /// Length mask for starter `cp`; `0` if `cp` starts no key.
    #[inline]
    pub fn len_mask(&self, cp: u32) -> u64 {
        if (cp as usize) < BMP_SIZE {
            return self.bmp_mask[cp as usize];
        }
        if cp > MAX_CODE_POINT {
            return 0;
        }
        self.astral_mask
            .get(&(cp - ASTRAL_BASE))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct starter code points.
    pub fn starter_count(&self) -> usize {
        self.starters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(items: &[(&str, &str)]) -> DictMaxLen {
        DictMaxLen::build_from_pairs(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn every_key_is_reflected() {
        let d1 = dict(&[("汉字", "漢字"), ("一目了然", "一目瞭然"), ("𬴂", "騑")]);
        let d2 = dict(&[("汉", "漢"), ("𬴂马", "騑馬"), ("“", "「")]);
        let idx = StarterIndex::build(&[&d1, &d2]);

        for d in [&d1, &d2] {
            for key in d.map.keys() {
                let cp = key[0] as u32;
                let len: usize = key.iter().map(|c| c.len_utf16()).sum();
                assert!(idx.has_starter(cp), "missing starter {:?}", key[0]);
                assert_ne!(idx.len_mask(cp) & (1u64 << len), 0, "missing len {len}");
            }
        }
        assert_eq!(idx.starter_count(), 4);
        assert_eq!(idx.len_mask('𬴂' as u32), (1 << 2) | (1 << 3));
    }

    #[test]
    fn unknown_and_out_of_range_code_points() {
        let idx = StarterIndex::build(&[&dict(&[("汉", "漢")])]);
        assert!(!idx.has_starter('字' as u32));
        assert_eq!(idx.len_mask('字' as u32), 0);
        assert!(!idx.has_starter('𬴂' as u32));
        assert_eq!(idx.len_mask('𬴂' as u32), 0);
        assert!(!idx.has_starter(0x110000));
        assert_eq!(idx.len_mask(u32::MAX), 0);
    }

    #[test]
    fn long_keys_set_presence_but_no_length_bit() {
        let key = "长".repeat(64);
        let idx = StarterIndex::build(&[&dict(&[(key.as_str(), "x")])]);
        assert!(idx.has_starter('长' as u32));
        assert_eq!(idx.len_mask('长' as u32), 0);
    }

    #[test]
    fn empty_round_has_no_starters() {
        let empty = DictMaxLen::default();
        let idx = StarterIndex::build(&[&empty]);
        assert_eq!(idx.starter_count(), 0);
        assert!(!idx.has_starter('a' as u32));
    }
}
