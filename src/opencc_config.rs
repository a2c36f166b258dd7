//! The closed set of conversion modes and the tables each one uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dictionary_lib::DictSlot;

/// A conversion mode.
///
/// The discriminants are stable (`1..=16`) and may be used as numeric ids.
///
/// ```
/// use opencc_rounds::OpenccConfig;
///
/// let cfg = OpenccConfig::try_from(" S2TWP ").unwrap();
/// assert_eq!(cfg, OpenccConfig::S2twp);
/// assert_eq!(cfg as u32, 3);
/// assert_eq!(cfg.to_string(), "s2twp");
/// assert!(OpenccConfig::try_from("s2x").is_err());
/// ```
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenccConfig {
    #[default]
    S2t = 1,
    S2tw = 2,
    S2twp = 3,
    S2hk = 4,
    T2s = 5,
    T2tw = 6,
    T2twp = 7,
    T2hk = 8,
    Tw2s = 9,
    Tw2sp = 10,
    Tw2t = 11,
    Tw2tp = 12,
    Hk2s = 13,
    Hk2t = 14,
    Jp2t = 15,
    T2jp = 16,
}

/// Per-mode table layout: the tables of each round, in priority order, and
/// where the punctuation table goes when punctuation is enabled.
struct ModeRounds {
    rounds: &'static [&'static [DictSlot]],
    punct: Option<(usize, DictSlot)>,
}

use DictSlot::*;

const ST: &[DictSlot] = &[StPhrases, StCharacters];
const TS: &[DictSlot] = &[TsPhrases, TsCharacters];
const TW_REV: &[DictSlot] = &[TwVariantsRevPhrases, TwVariantsRev];
const HK_REV: &[DictSlot] = &[HkVariantsRevPhrases, HkVariantsRev];

const S2T: ModeRounds = ModeRounds {
    rounds: &[ST],
    punct: Some((0, StPunctuations)),
};
const S2TW: ModeRounds = ModeRounds {
    rounds: &[ST, &[TwVariants]],
    punct: Some((0, StPunctuations)),
};
const S2TWP: ModeRounds = ModeRounds {
    rounds: &[ST, &[TwPhrases], &[TwVariants]],
    punct: Some((0, StPunctuations)),
};
const S2HK: ModeRounds = ModeRounds {
    rounds: &[ST, &[HkVariants]],
    punct: Some((0, StPunctuations)),
};
const T2S: ModeRounds = ModeRounds {
    rounds: &[TS],
    punct: Some((0, TsPunctuations)),
};
const T2TW: ModeRounds = ModeRounds {
    rounds: &[&[TwVariants]],
    punct: None,
};
const T2TWP: ModeRounds = ModeRounds {
    rounds: &[&[TwPhrases], &[TwVariants]],
    punct: None,
};
const T2HK: ModeRounds = ModeRounds {
    rounds: &[&[HkVariants]],
    punct: None,
};
const TW2S: ModeRounds = ModeRounds {
    rounds: &[TW_REV, TS],
    punct: Some((1, TsPunctuations)),
};
const TW2SP: ModeRounds = ModeRounds {
    rounds: &[TW_REV, &[TwPhrasesRev], TS],
    punct: Some((2, TsPunctuations)),
};
const TW2T: ModeRounds = ModeRounds {
    rounds: &[TW_REV],
    punct: None,
};
const TW2TP: ModeRounds = ModeRounds {
    rounds: &[TW_REV, &[TwPhrasesRev]],
    punct: None,
};
const HK2S: ModeRounds = ModeRounds {
    rounds: &[HK_REV, TS],
    punct: Some((1, TsPunctuations)),
};
const HK2T: ModeRounds = ModeRounds {
    rounds: &[HK_REV],
    punct: None,
};
const JP2T: ModeRounds = ModeRounds {
    rounds: &[&[JpsPhrases, JpsCharacters, JpVariantsRev]],
    punct: None,
};
const T2JP: ModeRounds = ModeRounds {
    rounds: &[&[JpVariants]],
    punct: None,
};

impl OpenccConfig {
    pub const ALL: [OpenccConfig; 16] = [
        OpenccConfig::S2t,
        OpenccConfig::S2tw,
        OpenccConfig::S2twp,
        OpenccConfig::S2hk,
        OpenccConfig::T2s,
        OpenccConfig::T2tw,
        OpenccConfig::T2twp,
        OpenccConfig::T2hk,
        OpenccConfig::Tw2s,
        OpenccConfig::Tw2sp,
        OpenccConfig::Tw2t,
        OpenccConfig::Tw2tp,
        OpenccConfig::Hk2s,
        OpenccConfig::Hk2t,
        OpenccConfig::Jp2t,
        OpenccConfig::T2jp,
    ];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            OpenccConfig::S2t => "s2t",
            OpenccConfig::S2tw => "s2tw",
            OpenccConfig::S2twp => "s2twp",
            OpenccConfig::S2hk => "s2hk",
            OpenccConfig::T2s => "t2s",
            OpenccConfig::T2tw => "t2tw",
            OpenccConfig::T2twp => "t2twp",
            OpenccConfig::T2hk => "t2hk",
            OpenccConfig::Tw2s => "tw2s",
            OpenccConfig::Tw2sp => "tw2sp",
            OpenccConfig::Tw2t => "tw2t",
            OpenccConfig::Tw2tp => "tw2tp",
            OpenccConfig::Hk2s => "hk2s",
            OpenccConfig::Hk2t => "hk2t",
            OpenccConfig::Jp2t => "jp2t",
            OpenccConfig::T2jp => "t2jp",
        }
    }

    /// Mode with numeric id `value` (`1..=16`).
    pub fn from_u32(value: u32) -> Option<Self> {
        Self::ALL.get(value.checked_sub(1)? as usize).copied()
    }

    /// Whether any round of this mode can take a punctuation table.
    pub fn supports_punctuation(self) -> bool {
        self.layout().punct.is_some()
    }

    fn layout(self) -> &'static ModeRounds {
        match self {
            OpenccConfig::S2t => &S2T,
            OpenccConfig::S2tw => &S2TW,
            OpenccConfig::S2twp => &S2TWP,
            OpenccConfig::S2hk => &S2HK,
            OpenccConfig::T2s => &T2S,
            OpenccConfig::T2tw => &T2TW,
            OpenccConfig::T2twp => &T2TWP,
            OpenccConfig::T2hk => &T2HK,
            OpenccConfig::Tw2s => &TW2S,
            OpenccConfig::Tw2sp => &TW2SP,
            OpenccConfig::Tw2t => &TW2T,
            OpenccConfig::Tw2tp => &TW2TP,
            OpenccConfig::Hk2s => &HK2S,
            OpenccConfig::Hk2t => &HK2T,
            OpenccConfig::Jp2t => &JP2T,
            OpenccConfig::T2jp => &T2JP,
        }
    }

    /// Tables of each round in priority order, with the punctuation table
    /// appended to its round when `punctuation` is set.
    ///
    /// ```
    /// use opencc_rounds::OpenccConfig;
    /// use opencc_rounds::dictionary_lib::DictSlot;
    ///
    /// let rounds = OpenccConfig::Tw2s.round_slots(true);
    /// assert_eq!(rounds.len(), 2);
    /// assert_eq!(rounds[1].last(), Some(&DictSlot::TsPunctuations));
    /// ```
    pub fn round_slots(self, punctuation: bool) -> Vec<Vec<DictSlot>> {
        let layout = self.layout();
        let mut rounds: Vec<Vec<DictSlot>> = layout.rounds.iter().map(|r| r.to_vec()).collect();
        if punctuation {
            if let Some((at, slot)) = layout.punct {
                rounds[at].push(slot);
            }
        }
        rounds
    }
}

impl TryFrom<&str> for OpenccConfig {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|cfg| cfg.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Invalid config: {}", value))
    }
}

impl FromStr for OpenccConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl fmt::Display for OpenccConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
