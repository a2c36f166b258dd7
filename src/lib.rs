//! Multi-round OpenCC conversion engine.
//!
//! Converts text between Simplified and Traditional Chinese (and the Taiwan,
//! Hong Kong and Japanese Shinjitai variants) by applying one to three rounds
//! of greedy longest-match dictionary substitution.
//!
//! - [`dictionary_lib`] holds the tables and the per-round starter index.
//! - [`segment_converter`] is the matcher for one delimiter-free segment.
//! - [`engine`] splits text, runs segments sequentially or in parallel, and
//!   folds rounds.
//! - [`plan_cache`] builds each mode's [`RoundPlan`] once.
//! - [`OpenCC`] ties these together behind a string-mode API.
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use opencc_rounds::dictionary_lib::{DictMaxLen, DictSlot, DictionaryMaxlength};
//! use opencc_rounds::OpenCC;
//!
//! let dicts = DictionaryMaxlength::default()
//!     .with_slot(DictSlot::StPhrases, DictMaxLen::from_text("汉字\t漢字\n"))
//!     .with_slot(DictSlot::StCharacters, DictMaxLen::from_text("龙\t龍\n"));
//! let opencc = OpenCC::new(Arc::new(dicts));
//!
//! assert_eq!(opencc.convert("汉字测试，龙", "s2t", false), "漢字测试，龍");
//! ```

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

pub mod delimiter_set;
pub mod dict_refs;
pub mod dictionary_lib;
pub mod engine;
pub mod opencc_config;
pub mod plan_cache;
pub mod segment_converter;
pub mod segmenter;
pub mod utils;

pub use crate::dict_refs::{Round, RoundPlan};
pub use crate::dictionary_lib::{DictionaryError, DictionaryMaxlength};
pub use crate::engine::ParallelPolicy;
pub use crate::opencc_config::OpenccConfig;
pub use crate::plan_cache::{PlanCache, PlanKey};

use crate::engine::apply_plan;
use crate::utils::find_max_utf8_length;

static LAST_ERROR: Mutex<Option<String>> = Mutex::new(None);

// ASCII punctuation, whitespace, digits and Latin letters.
static STRIP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[!-/:-@\[-`{-~\t\n\v\f\r 0-9A-Za-z_]").unwrap()
});

const ZHO_CHECK_MAX_BYTES: usize = 200;
const EMPTY_INPUT_MESSAGE: &str = "Input text is empty";

/// Converter facade over a shared dictionary set.
///
/// Cheap to query from many threads at once: plans are built lazily by the
/// internal [`PlanCache`] and are read-only afterwards.
pub struct OpenCC {
    plans: PlanCache,
    policy: ParallelPolicy,
}

impl OpenCC {
    /// Creates a converter over an already loaded dictionary set.
    pub fn new(dictionary: Arc<DictionaryMaxlength>) -> Self {
        OpenCC {
            plans: PlanCache::new(dictionary),
            policy: ParallelPolicy::default(),
        }
    }

    /// Loads the plain-text tables found in `dir`.
    ///
    /// On failure the error is also recorded as the last error.
    pub fn from_dicts_dir<P: AsRef<Path>>(dir: P) -> Result<Self, DictionaryError> {
        Self::load_with(|| DictionaryMaxlength::from_dicts(dir))
    }

    /// Loads a Zstd-compressed CBOR dictionary blob.
    pub fn from_compressed<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        Self::load_with(|| DictionaryMaxlength::load_compressed(path))
    }

    /// Loads an uncompressed CBOR dictionary blob.
    pub fn from_cbor<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        Self::load_with(|| DictionaryMaxlength::deserialize_from_cbor(path))
    }

    fn load_with<F>(load: F) -> Result<Self, DictionaryError>
    where
        F: FnOnce() -> Result<DictionaryMaxlength, DictionaryError>,
    {
        match load() {
            Ok(dicts) => Ok(Self::new(Arc::new(dicts))),
            Err(err) => {
                Self::set_last_error(&format!("Failed to load dictionaries: {}", err));
                Err(err)
            }
        }
    }

    /// Converts `input` using the mode named by `config`.
    ///
    /// An unknown mode falls back to `s2t`; the fallback is recorded as the
    /// last error and conversion proceeds.
    pub fn convert(&self, input: &str, config: &str, punctuation: bool) -> String {
        let cfg = match OpenccConfig::try_from(config) {
            Ok(cfg) => cfg,
            Err(_) => {
                let msg = format!("Invalid config: {}, fallback to s2t", config);
                warn!("{}", msg);
                Self::set_last_error(&msg);
                OpenccConfig::S2t
            }
        };
        self.convert_with_config(input, cfg, punctuation)
    }

    /// Converts `input` with a typed mode.
    ///
    /// Empty input is not converted: the diagnostic `"Input text is empty"` is
    /// recorded as the last error and returned in place of converted text.
    pub fn convert_with_config(
        &self,
        input: &str,
        config: OpenccConfig,
        punctuation: bool,
    ) -> String {
        if input.is_empty() {
            Self::set_last_error(EMPTY_INPUT_MESSAGE);
            return EMPTY_INPUT_MESSAGE.to_string();
        }
        let plan = self.plans.get_plan(config, punctuation);
        apply_plan(input, &plan, &self.policy)
    }

    /// Guesses the script of `input`: `1` Traditional, `2` Simplified,
    /// `0` neither (or undecidable).
    ///
    /// Only the first 200 bytes of CJK content are inspected, after removing
    /// ASCII punctuation, whitespace, digits and Latin letters.
    pub fn zho_check(&self, input: &str) -> i8 {
        if input.is_empty() {
            return 0;
        }
        let stripped = STRIP_REGEX.replace_all(input, "");
        let sample = &stripped[..find_max_utf8_length(&stripped, ZHO_CHECK_MAX_BYTES)];
        if sample.is_empty() {
            return 0;
        }

        let probe = |key| apply_plan(sample, &self.plans.get(key), &self.policy);
        if probe(PlanKey::TsCharactersProbe) != sample {
            1
        } else if probe(PlanKey::StCharactersProbe) != sample {
            2
        } else {
            0
        }
    }

    /// Enables or disables parallel segment conversion.
    pub fn set_parallel(&mut self, is_parallel: bool) {
        self.policy.enabled = is_parallel;
    }

    pub fn get_parallel(&self) -> bool {
        self.policy.enabled
    }

    pub fn set_parallel_policy(&mut self, policy: ParallelPolicy) {
        self.policy = policy;
    }

    pub fn parallel_policy(&self) -> ParallelPolicy {
        self.policy
    }

    /// Drops all cached plans; they are rebuilt on next use.
    pub fn clear_plan_cache(&mut self) {
        self.plans.clear();
    }

    pub fn plan_cache(&self) -> &PlanCache {
        &self.plans
    }

    pub fn dictionary(&self) -> &Arc<DictionaryMaxlength> {
        self.plans.dictionaries()
    }

    pub fn set_last_error(err_msg: &str) {
        let mut slot = LAST_ERROR.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(err_msg.to_string());
    }

    pub fn get_last_error() -> Option<String> {
        LAST_ERROR
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear_last_error() {
        *LAST_ERROR.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
