use std::sync::Arc;

use crate::dictionary_lib::{DictMaxLen, StarterIndex};

/// One conversion round: an ordered list of tables (list order = precedence),
/// the longest key across them, and the [`StarterIndex`] built from them.
///
/// # Invariants
/// - `dicts` is non-empty.
/// - `max_len` is the largest `max_len` of `dicts` (at least `1`).
/// - `starter`, when present, reflects exactly `dicts`.
#[derive(Debug, Clone)]
pub struct Round {
    dicts: Vec<Arc<DictMaxLen>>,
    max_len: usize,
    starter: Option<Arc<StarterIndex>>,
}

impl Round {
    /// Creates a round and builds its starter index.
    ///
    /// # Panics
    /// If `dicts` is empty.
    pub fn new(dicts: Vec<Arc<DictMaxLen>>) -> Self {
        let mut round = Self::without_index(dicts);
        let refs: Vec<&DictMaxLen> = round.dicts.iter().map(Arc::as_ref).collect();
        round.starter = Some(Arc::new(StarterIndex::build(&refs)));
        round
    }

    /// Creates a round that scans without a starter index.
    ///
    /// # Panics
    /// If `dicts` is empty.
    pub fn without_index(dicts: Vec<Arc<DictMaxLen>>) -> Self {
        assert!(!dicts.is_empty(), "a round needs at least one dictionary");
        let max_len = dicts.iter().map(|d| d.max_len).max().unwrap_or(1).max(1);
        Self {
            dicts,
            max_len,
            starter: None,
        }
    }

    pub fn dicts(&self) -> &[Arc<DictMaxLen>] {
        &self.dicts
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn starter_index(&self) -> Option<&StarterIndex> {
        self.starter.as_deref()
    }
}

/// One to three [`Round`]s applied strictly in sequence.
///
/// A plan is plain data: build it once, then share it (usually as
/// `Arc<RoundPlan>`) across threads and calls.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use opencc_rounds::dictionary_lib::DictMaxLen;
/// use opencc_rounds::{Round, RoundPlan};
///
/// let r1 = Round::new(vec![Arc::new(DictMaxLen::from_text("A\tB\n"))]);
/// let r2 = Round::new(vec![Arc::new(DictMaxLen::from_text("B\tC\n"))]);
/// let plan = RoundPlan::new(r1).with_round_2(r2);
///
/// // Echo closure: shows the fold, not the conversion.
/// let trace = plan.apply_segment_replace("x", |input, round| {
///     format!("{input}{}", round.max_len())
/// });
/// assert_eq!(trace, "x11");
/// ```
#[derive(Debug, Clone)]
pub struct RoundPlan {
    round_1: Round,
    round_2: Option<Round>,
    round_3: Option<Round>,
}

impl RoundPlan {
    /// Creates a plan with the required first round.
    pub fn new(round_1: Round) -> Self {
        Self {
            round_1,
            round_2: None,
            round_3: None,
        }
    }

    /// Adds the optional second round.
    pub fn with_round_2(mut self, round_2: Round) -> Self {
        self.round_2 = Some(round_2);
        self
    }

    /// Adds the optional third round.
    pub fn with_round_3(mut self, round_3: Round) -> Self {
        self.round_3 = Some(round_3);
        self
    }

    /// Builds a plan from an ordered list of rounds.
    ///
    /// # Panics
    /// Unless `1 <= rounds.len() <= 3`.
    pub fn from_rounds(rounds: Vec<Round>) -> Self {
        assert!(
            (1..=3).contains(&rounds.len()),
            "a round plan holds 1 to 3 rounds, got {}",
            rounds.len()
        );
        let mut it = rounds.into_iter();
        let mut plan = match it.next() {
            Some(first) => Self::new(first),
            None => unreachable!(),
        };
        plan.round_2 = it.next();
        plan.round_3 = it.next();
        plan
    }

    /// Rounds in application order.
    pub fn rounds(&self) -> impl Iterator<Item = &Round> {
        std::iter::once(&self.round_1)
            .chain(self.round_2.as_ref())
            .chain(self.round_3.as_ref())
    }

    pub fn round_count(&self) -> usize {
        1 + self.round_2.is_some() as usize + self.round_3.is_some() as usize
    }

    /// Folds `segment_replace` over the rounds, feeding each round's output to
    /// the next.
    pub fn apply_segment_replace<F>(&self, input: &str, segment_replace: F) -> String
    where
        F: Fn(&str, &Round) -> String,
    {
        let mut out = segment_replace(input, &self.round_1);

        if let Some(r2) = &self.round_2 {
            out = segment_replace(&out, r2);
        }
        if let Some(r3) = &self.round_3 {
            out = segment_replace(&out, r3);
        }
        out
    }
}
