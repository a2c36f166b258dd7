//! Greedy longest-match conversion of one delimiter-free segment, for one round.
//!
//! The converter walks the segment code point by code point. At each position
//! it tries the round's *phrase* tables from the longest viable window down to
//! the shortest, then falls back to the *single-unit* tables for the current
//! code point alone. All window lengths are UTF-16 code units; windows are
//! built by walking whole `char`s, so a surrogate pair is never split.
//!
//! Tie-breaks:
//! - a longer match beats a shorter one;
//! - at equal length, the table listed first in the round wins;
//! - any phrase hit beats the single-unit fallback.

use crate::dictionary_lib::{DictMaxLen, StarterIndex};
use crate::utils::utf16_len;

/// A round's tables split into phrase tables and single-unit tables.
///
/// A table is a phrase table when its longest key spans at least two code
/// points; otherwise it only holds single characters (BMP or supplementary)
/// and punctuation, and is consulted by the one-code-point fallback.
/// Empty tables are left out of both groups. Round order is preserved within
/// each group.
#[derive(Debug)]
pub struct DictPartition<'a> {
    phrases: Vec<&'a DictMaxLen>,
    singles: Vec<&'a DictMaxLen>,
    phrase_max_len: usize,
    phrase_min_len: usize,
}

impl<'a> DictPartition<'a> {
    pub fn new<I>(dicts: I) -> Self
    where
        I: IntoIterator<Item = &'a DictMaxLen>,
    {
        let mut phrases = Vec::new();
        let mut singles = Vec::new();

        for dict in dicts {
            if dict.is_empty() {
                continue;
            }
            if dict.max_chars >= 2 {
                phrases.push(dict);
            } else {
                singles.push(dict);
            }
        }

        let phrase_max_len = phrases.iter().map(|d| d.max_len).max().unwrap_or(0);
        let phrase_min_len = phrases.iter().map(|d| d.min_len).min().unwrap_or(0);

        Self {
            phrases,
            singles,
            phrase_max_len,
            phrase_min_len,
        }
    }

    #[inline]
    pub fn has_phrases(&self) -> bool {
        !self.phrases.is_empty()
    }

    #[inline]
    pub fn has_singles(&self) -> bool {
        !self.singles.is_empty()
    }

    /// Longest phrase key in UTF-16 units (`0` without phrase tables).
    pub fn phrase_max_len(&self) -> usize {
        self.phrase_max_len
    }

    /// Shortest phrase key in UTF-16 units (`0` without phrase tables).
    pub fn phrase_min_len(&self) -> usize {
        self.phrase_min_len
    }

    fn lookup_phrase(&self, key: &[char], len: usize) -> Option<&'a str> {
        self.phrases
            .iter()
            .filter(|d| d.has_key_len(len))
            .find_map(|&d| d.get(key))
    }

    fn lookup_single(&self, key: &[char]) -> Option<&'a str> {
        self.singles.iter().find_map(|&d| d.get(key))
    }
}

/// Converts `chars` and appends the result to `out`.
///
/// `round_max_len` caps the phrase window (UTF-16 units). When `starter` is
/// given it must have been built from the same tables as `partition`; code
/// points that start no key are copied through without any lookup.
pub fn convert_segment(
    chars: &[char],
    partition: &DictPartition<'_>,
    round_max_len: usize,
    starter: Option<&StarterIndex>,
    out: &mut String,
) {
    let mut remaining = utf16_len(chars);
    // (chars, units) of each candidate window at the current position.
    let mut windows: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let width = c.len_utf16();

        if let Some(idx) = starter {
            if !idx.has_starter(c as u32) {
                out.push(c);
                i += 1;
                remaining -= width;
                continue;
            }
        }

        let mut hit: Option<(&str, usize, usize)> = None;

        if partition.has_phrases() {
            let try_max = partition.phrase_max_len.min(round_max_len).min(remaining);
            if try_max >= 1 {
                let try_min = partition.phrase_min_len.min(remaining).max(1);
                let mask = starter.map_or(u64::MAX, |idx| idx.len_mask(c as u32));

                windows.clear();
                let mut units = 0;
                for (n, ch) in chars[i..].iter().enumerate() {
                    units += ch.len_utf16();
                    if units > try_max {
                        break;
                    }
                    if units >= try_min {
                        windows.push((n + 1, units));
                    }
                }

                for &(n, len) in windows.iter().rev() {
                    if len < 64 && (mask >> len) & 1 == 0 {
                        continue;
                    }
                    if let Some(value) = partition.lookup_phrase(&chars[i..i + n], len) {
                        hit = Some((value, n, len));
                        break;
                    }
                }
            }
        }

        if hit.is_none() && partition.has_singles() {
            if let Some(value) = partition.lookup_single(&chars[i..i + 1]) {
                hit = Some((value, 1, width));
            }
        }

        match hit {
            Some((value, n, len)) => {
                out.push_str(value);
                i += n;
                remaining -= len;
            }
            None => {
                out.push(c);
                i += 1;
                remaining -= width;
            }
        }
    }
}

/// Convenience wrapper around [`convert_segment`] returning a fresh `String`.
///
/// ```
/// use opencc_rounds::dictionary_lib::DictMaxLen;
/// use opencc_rounds::segment_converter::{convert_str, DictPartition};
///
/// let phrases = DictMaxLen::from_text("汉字\t漢字\n");
/// let partition = DictPartition::new([&phrases]);
/// assert_eq!(convert_str("汉字测试", &partition, phrases.max_len, None), "漢字测试");
/// ```
pub fn convert_str(
    text: &str,
    partition: &DictPartition<'_>,
    round_max_len: usize,
    starter: Option<&StarterIndex>,
) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    convert_segment(&chars, partition, round_max_len, starter, &mut out);
    out
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

    fn run(text: &str, dicts: &[&DictMaxLen]) -> (String, String) {
        let partition = DictPartition::new(dicts.iter().copied());
        let max_len = dicts.iter().map(|d| d.max_len).max().unwrap_or(1);
        let index = StarterIndex::build(dicts);
        let plain = convert_str(text, &partition, max_len, None);
        let indexed = convert_str(text, &partition, max_len, Some(&index));
        (plain, indexed)
    }

    fn assert_both(text: &str, dicts: &[&DictMaxLen], expected: &str) {
        let (plain, indexed) = run(text, dicts);
        assert_eq!(plain, expected, "without starter index");
        assert_eq!(indexed, expected, "with starter index");
    }

    #[test]
    fn longest_match_wins() {
        let d = dict(&[("AB", "X"), ("A", "Y")]);
        assert_both("AB", &[&d], "X");
        assert_both("AC", &[&d], "YC");
    }

    #[test]
    fn earlier_table_wins_at_equal_length() {
        let d1 = dict(&[("AB", "1")]);
        let d2 = dict(&[("AB", "2")]);
        assert_both("AB", &[&d1, &d2], "1");
        assert_both("AB", &[&d2, &d1], "2");
    }

    #[test]
    fn longer_match_in_later_table_beats_shorter_in_earlier() {
        let d1 = dict(&[("一目", "壹目")]);
        let d2 = dict(&[("一目了然", "一目瞭然")]);
        assert_both("一目了然", &[&d1, &d2], "一目瞭然");
    }

    #[test]
    fn phrase_hit_beats_single_fallback() {
        let phrases = dict(&[("汉字", "漢字"), ("干", "乾")]);
        let singles = dict(&[("干", "幹"), ("汉", "漢")]);
        assert_both("干汉", &[&phrases, &singles], "乾漢");
    }

    #[test]
    fn surrogate_pair_advances_two_units() {
        let singles = dict(&[("𬴂", "騑"), ("马", "馬")]);
        assert_both("𬴂马𬴂", &[&singles], "騑馬騑");
    }

    #[test]
    fn astral_phrase_keys_match_whole_chars() {
        let phrases = dict(&[("𬴂马", "騑馬")]);
        let singles = dict(&[("马", "馬")]);
        assert_both("𬴂马马", &[&phrases, &singles], "騑馬馬");
    }

    #[test]
    fn text_without_keys_is_unchanged() {
        let phrases = dict(&[("汉字", "漢字")]);
        let singles = dict(&[("龙", "龍")]);
        let text = "hello 世界 𠀀 123";
        assert_both(text, &[&phrases, &singles], text);
    }

    #[test]
    fn window_never_exceeds_remaining_text() {
        let phrases = dict(&[("一目了然", "一目瞭然"), ("了", "瞭")]);
        assert_both("一目了", &[&phrases], "一目瞭");
    }

    #[test]
    fn round_max_len_caps_phrase_window() {
        let phrases = dict(&[("汉字", "漢字"), ("汉", "漢")]);
        let partition = DictPartition::new([&phrases]);
        assert_eq!(convert_str("汉字", &partition, 1, None), "漢字");
        assert_eq!(convert_str("汉字", &partition, 2, None), "漢字");
    }

    #[test]
    fn partition_groups_by_code_point_span() {
        let phrases = dict(&[("汉字", "漢字")]);
        let astral = dict(&[("𬴂", "騑")]);
        let empty = DictMaxLen::default();
        let p = DictPartition::new([&phrases, &astral, &empty]);
        assert!(p.has_phrases());
        assert!(p.has_singles());
        assert_eq!(p.phrase_max_len(), 2);
        assert_eq!(p.phrase_min_len(), 2);

        let only_singles = DictPartition::new([&astral]);
        assert!(!only_singles.has_phrases());
        assert_eq!(only_singles.phrase_max_len(), 0);
        assert_eq!(only_singles.phrase_min_len(), 0);
    }

    #[test]
    fn keys_of_64_units_or_more_still_match() {
        let long_key = "长".repeat(70);
        let phrases = dict(&[(long_key.as_str(), "L")]);
        let singles = dict(&[("长", "長")]);

        let idx = StarterIndex::build(&[&phrases, &singles]);
        assert_eq!(idx.len_mask('长' as u32) >> 1 & 1, 1);

        let text = format!("{long_key}长");
        assert_both(&text, &[&phrases, &singles], "L長");
        assert_both(&"长".repeat(69), &[&phrases, &singles], &"長".repeat(69));
        assert_both(&"长".repeat(140), &[&phrases, &singles], "LL");
    }

    #[test]
    fn empty_segment_appends_nothing() {
        let d = dict(&[("a", "b")]);
        let partition = DictPartition::new([&d]);
        let mut out = String::from("keep");
        convert_segment(&[], &partition, 1, None, &mut out);
        assert_eq!(out, "keep");
    }
}
