//! Lazily built, shared [`RoundPlan`]s for every conversion mode.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use log::debug;

use crate::dict_refs::{Round, RoundPlan};
use crate::dictionary_lib::{DictSlot, DictionaryMaxlength, StarterIndex};
use crate::opencc_config::OpenccConfig;

const MODE_SLOTS: usize = OpenccConfig::ALL.len() * 2;

/// Which plan to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanKey {
    /// A conversion mode, with or without its punctuation table.
    Mode { config: OpenccConfig, punct: bool },
    /// `st_characters` alone, used for script detection.
    StCharactersProbe,
    /// `ts_characters` alone, used for script detection.
    TsCharactersProbe,
}

/// Compute-once cache of round plans keyed by `(mode, punctuation)`.
///
/// Each key owns a `OnceLock`, so concurrent first requests for the same key
/// build the plan exactly once, and different keys never wait on each other.
/// Modes without a punctuation table share one plan for both flag values.
#[derive(Debug)]
pub struct PlanCache {
    dicts: Arc<DictionaryMaxlength>,
    modes: [OnceLock<Arc<RoundPlan>>; MODE_SLOTS],
    st_probe: OnceLock<Arc<RoundPlan>>,
    ts_probe: OnceLock<Arc<RoundPlan>>,
    builds: AtomicUsize,
}

impl PlanCache {
    pub fn new(dicts: Arc<DictionaryMaxlength>) -> Self {
        Self {
            dicts,
            modes: std::array::from_fn(|_| OnceLock::new()),
            st_probe: OnceLock::new(),
            ts_probe: OnceLock::new(),
            builds: AtomicUsize::new(0),
        }
    }

    /// The dictionary set plans are built from.
    pub fn dictionaries(&self) -> &Arc<DictionaryMaxlength> {
        &self.dicts
    }

    /// Plan for `config`, building it on first use.
    pub fn get_plan(&self, config: OpenccConfig, punct: bool) -> Arc<RoundPlan> {
        self.get(PlanKey::Mode { config, punct })
    }

    pub fn get(&self, key: PlanKey) -> Arc<RoundPlan> {
        match key {
            PlanKey::Mode { config, punct } => {
                let punct = punct && config.supports_punctuation();
                self.modes[Self::mode_index(config, punct)]
                    .get_or_init(|| self.build_mode(config, punct))
                    .clone()
            }
            PlanKey::StCharactersProbe => self
                .st_probe
                .get_or_init(|| self.build_single(DictSlot::StCharacters))
                .clone(),
            PlanKey::TsCharactersProbe => self
                .ts_probe
                .get_or_init(|| self.build_single(DictSlot::TsCharacters))
                .clone(),
        }
    }

    /// Whether the plan for `key` has been built already.
    pub fn is_cached(&self, key: PlanKey) -> bool {
        match key {
            PlanKey::Mode { config, punct } => {
                let punct = punct && config.supports_punctuation();
                self.modes[Self::mode_index(config, punct)].get().is_some()
            }
            PlanKey::StCharactersProbe => self.st_probe.get().is_some(),
            PlanKey::TsCharactersProbe => self.ts_probe.get().is_some(),
        }
    }

    /// Drops every cached plan; they are rebuilt lazily. The dictionaries are
    /// left untouched.
    pub fn clear(&mut self) {
        self.modes = std::array::from_fn(|_| OnceLock::new());
        self.st_probe = OnceLock::new();
        self.ts_probe = OnceLock::new();
    }

    /// Number of plans built over this cache's lifetime.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    #[inline]
    fn mode_index(config: OpenccConfig, punct: bool) -> usize {
        (config as usize - 1) * 2 + punct as usize
    }

    fn build_mode(&self, config: OpenccConfig, punct: bool) -> Arc<RoundPlan> {
        let rounds: Vec<Round> = config
            .round_slots(punct)
            .into_iter()
            .map(|slots| self.round_of(&slots))
            .collect();
        let plan = RoundPlan::from_rounds(rounds);
        self.builds.fetch_add(1, Ordering::Relaxed);
        debug!(
            "built plan {} (punct={}): {} round(s)",
            config,
            punct,
            plan.round_count()
        );
        Arc::new(plan)
    }

    fn build_single(&self, slot: DictSlot) -> Arc<RoundPlan> {
        let plan = RoundPlan::new(self.round_of(&[slot]));
        self.builds.fetch_add(1, Ordering::Relaxed);
        debug!("built probe plan for {:?}", slot);
        Arc::new(plan)
    }

    fn round_of(&self, slots: &[DictSlot]) -> Round {
        let round = Round::new(slots.iter().map(|&s| self.dicts.get(s).clone()).collect());
        debug!(
            "round {:?}: max_len={}, starters={}",
            slots,
            round.max_len(),
            round.starter_index().map_or(0, StarterIndex::starter_count)
        );
        round
    }
}
