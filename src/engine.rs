//! Applies rounds and plans to whole texts.
//!
//! A round is applied by splitting the text at delimiters and converting each
//! segment independently; segments run sequentially or on the rayon pool
//! depending on a [`ParallelPolicy`]. Both paths produce identical output.

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dict_refs::{Round, RoundPlan};
use crate::segment_converter::{convert_segment, DictPartition};
use crate::segmenter::split_ranges;

/// When to hand segments to the rayon pool.
///
/// Thresholds only affect speed, never output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelPolicy {
    pub enabled: bool,
    /// Minimum text length in `char`s.
    pub min_text_len: usize,
    /// Minimum number of segments.
    pub min_segments: usize,
}

impl ParallelPolicy {
    pub const DEFAULT_MIN_TEXT_LEN: usize = 1000;
    pub const DEFAULT_MIN_SEGMENTS: usize = 2;

    /// A policy that never goes parallel.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    #[inline]
    pub fn should_parallelize(&self, text_len: usize, segments: usize) -> bool {
        self.enabled && text_len >= self.min_text_len && segments >= self.min_segments
    }
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            min_text_len: Self::DEFAULT_MIN_TEXT_LEN,
            min_segments: Self::DEFAULT_MIN_SEGMENTS,
        }
    }
}

/// Applies one round to `text`.
///
/// Each call converts into its own freshly sized buffers; nothing is shared
/// between concurrent calls.
pub fn apply_round(text: &str, round: &Round, policy: &ParallelPolicy) -> String {
    if text.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let partition = DictPartition::new(round.dicts().iter().map(Arc::as_ref));
    let max_len = round.max_len();
    let starter = round.starter_index();
    let ranges = split_ranges(&chars, true);

    if ranges.len() == 1 {
        let mut out = String::with_capacity(text.len());
        convert_segment(&chars, &partition, max_len, starter, &mut out);
        return out;
    }

    if policy.should_parallelize(chars.len(), ranges.len()) {
        let parts: Vec<String> = ranges
            .par_iter()
            .map(|range| {
                let segment = &chars[range.clone()];
                let mut buf = String::with_capacity(segment.len() * 3);
                convert_segment(segment, &partition, max_len, starter, &mut buf);
                buf
            })
            .collect();
        parts.concat()
    } else {
        let mut out = String::with_capacity(text.len());
        for range in ranges {
            convert_segment(&chars[range], &partition, max_len, starter, &mut out);
        }
        out
    }
}

/// Applies every round of `plan` in order, each round reading the previous
/// round's output.
pub fn apply_plan(text: &str, plan: &RoundPlan, policy: &ParallelPolicy) -> String {
    plan.apply_segment_replace(text, |input, round| apply_round(input, round, policy))
}
