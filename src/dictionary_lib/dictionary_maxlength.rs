//! The dictionary set every conversion plan draws its tables from.
//!
//! [`DictionaryMaxlength`] owns one [`DictMaxLen`] per [`DictSlot`]. Tables are
//! held behind `Arc` so rounds can share them without copying; the whole set is
//! immutable once loaded and is passed explicitly to the plan cache.
//!
//! Loading is deliberately thin: plain-text tables from a directory, or a
//! (optionally Zstd-compressed) CBOR blob produced by `dict-generate`.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_cbor::{from_reader, from_slice};
use zstd::{decode_all, Decoder, Encoder};

use super::{DictMaxLen, DictionaryError};

/// Names one of the 18 tables of a [`DictionaryMaxlength`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DictSlot {
    StCharacters,
    StPhrases,
    TsCharacters,
    TsPhrases,
    TwPhrases,
    TwPhrasesRev,
    TwVariants,
    TwVariantsRev,
    TwVariantsRevPhrases,
    HkVariants,
    HkVariantsRev,
    HkVariantsRevPhrases,
    JpsCharacters,
    JpsPhrases,
    JpVariants,
    JpVariantsRev,
    StPunctuations,
    TsPunctuations,
}

impl DictSlot {
    pub const ALL: [DictSlot; 18] = [
        DictSlot::StCharacters,
        DictSlot::StPhrases,
        DictSlot::TsCharacters,
        DictSlot::TsPhrases,
        DictSlot::TwPhrases,
        DictSlot::TwPhrasesRev,
        DictSlot::TwVariants,
        DictSlot::TwVariantsRev,
        DictSlot::TwVariantsRevPhrases,
        DictSlot::HkVariants,
        DictSlot::HkVariantsRev,
        DictSlot::HkVariantsRevPhrases,
        DictSlot::JpsCharacters,
        DictSlot::JpsPhrases,
        DictSlot::JpVariants,
        DictSlot::JpVariantsRev,
        DictSlot::StPunctuations,
        DictSlot::TsPunctuations,
    ];

    /// Canonical plain-text file name of this table.
    pub fn file_name(self) -> &'static str {
        match self {
            DictSlot::StCharacters => "STCharacters.txt",
            DictSlot::StPhrases => "STPhrases.txt",
            DictSlot::TsCharacters => "TSCharacters.txt",
            DictSlot::TsPhrases => "TSPhrases.txt",
            DictSlot::TwPhrases => "TWPhrases.txt",
            DictSlot::TwPhrasesRev => "TWPhrasesRev.txt",
            DictSlot::TwVariants => "TWVariants.txt",
            DictSlot::TwVariantsRev => "TWVariantsRev.txt",
            DictSlot::TwVariantsRevPhrases => "TWVariantsRevPhrases.txt",
            DictSlot::HkVariants => "HKVariants.txt",
            DictSlot::HkVariantsRev => "HKVariantsRev.txt",
            DictSlot::HkVariantsRevPhrases => "HKVariantsRevPhrases.txt",
            DictSlot::JpsCharacters => "JPShinjitaiCharacters.txt",
            DictSlot::JpsPhrases => "JPShinjitaiPhrases.txt",
            DictSlot::JpVariants => "JPVariants.txt",
            DictSlot::JpVariantsRev => "JPVariantsRev.txt",
            DictSlot::StPunctuations => "STPunctuations.txt",
            DictSlot::TsPunctuations => "TSPunctuations.txt",
        }
    }
}

/// All OpenCC tables used by the conversion modes, each with its length metadata.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct DictionaryMaxlength {
    pub st_characters: Arc<DictMaxLen>,
    pub st_phrases: Arc<DictMaxLen>,
    pub ts_characters: Arc<DictMaxLen>,
    pub ts_phrases: Arc<DictMaxLen>,
    pub tw_phrases: Arc<DictMaxLen>,
    pub tw_phrases_rev: Arc<DictMaxLen>,
    pub tw_variants: Arc<DictMaxLen>,
    pub tw_variants_rev: Arc<DictMaxLen>,
    pub tw_variants_rev_phrases: Arc<DictMaxLen>,
    pub hk_variants: Arc<DictMaxLen>,
    pub hk_variants_rev: Arc<DictMaxLen>,
    pub hk_variants_rev_phrases: Arc<DictMaxLen>,
    pub jps_characters: Arc<DictMaxLen>,
    pub jps_phrases: Arc<DictMaxLen>,
    pub jp_variants: Arc<DictMaxLen>,
    pub jp_variants_rev: Arc<DictMaxLen>,
    pub st_punctuations: Arc<DictMaxLen>,
    pub ts_punctuations: Arc<DictMaxLen>,
}

impl DictionaryMaxlength {
    /// Shared handle to the table named by `slot`.
    pub fn get(&self, slot: DictSlot) -> &Arc<DictMaxLen> {
        match slot {
            DictSlot::StCharacters => &self.st_characters,
            DictSlot::StPhrases => &self.st_phrases,
            DictSlot::TsCharacters => &self.ts_characters,
            DictSlot::TsPhrases => &self.ts_phrases,
            DictSlot::TwPhrases => &self.tw_phrases,
            DictSlot::TwPhrasesRev => &self.tw_phrases_rev,
            DictSlot::TwVariants => &self.tw_variants,
            DictSlot::TwVariantsRev => &self.tw_variants_rev,
            DictSlot::TwVariantsRevPhrases => &self.tw_variants_rev_phrases,
            DictSlot::HkVariants => &self.hk_variants,
            DictSlot::HkVariantsRev => &self.hk_variants_rev,
            DictSlot::HkVariantsRevPhrases => &self.hk_variants_rev_phrases,
            DictSlot::JpsCharacters => &self.jps_characters,
            DictSlot::JpsPhrases => &self.jps_phrases,
            DictSlot::JpVariants => &self.jp_variants,
            DictSlot::JpVariantsRev => &self.jp_variants_rev,
            DictSlot::StPunctuations => &self.st_punctuations,
            DictSlot::TsPunctuations => &self.ts_punctuations,
        }
    }

    fn get_mut(&mut self, slot: DictSlot) -> &mut Arc<DictMaxLen> {
        match slot {
            DictSlot::StCharacters => &mut self.st_characters,
            DictSlot::StPhrases => &mut self.st_phrases,
            DictSlot::TsCharacters => &mut self.ts_characters,
            DictSlot::TsPhrases => &mut self.ts_phrases,
            DictSlot::TwPhrases => &mut self.tw_phrases,
            DictSlot::TwPhrasesRev => &mut self.tw_phrases_rev,
            DictSlot::TwVariants => &mut self.tw_variants,
            DictSlot::TwVariantsRev => &mut self.tw_variants_rev,
            DictSlot::TwVariantsRevPhrases => &mut self.tw_variants_rev_phrases,
            DictSlot::HkVariants => &mut self.hk_variants,
            DictSlot::HkVariantsRev => &mut self.hk_variants_rev,
            DictSlot::HkVariantsRevPhrases => &mut self.hk_variants_rev_phrases,
            DictSlot::JpsCharacters => &mut self.jps_characters,
            DictSlot::JpsPhrases => &mut self.jps_phrases,
            DictSlot::JpVariants => &mut self.jp_variants,
            DictSlot::JpVariantsRev => &mut self.jp_variants_rev,
            DictSlot::StPunctuations => &mut self.st_punctuations,
            DictSlot::TsPunctuations => &mut self.ts_punctuations,
        }
    }

    /// Replaces one table; handy for assembling small sets in code.
    ///
    /// ```
    /// use opencc_rounds::dictionary_lib::{DictMaxLen, DictSlot, DictionaryMaxlength};
    ///
    /// let dicts = DictionaryMaxlength::default().with_slot(
    ///     DictSlot::StCharacters,
    ///     DictMaxLen::from_text("龙\t龍\n"),
    /// );
    /// assert_eq!(dicts.st_characters.len(), 1);
    /// ```
    pub fn with_slot(mut self, slot: DictSlot, dict: DictMaxLen) -> Self {
        *self.get_mut(slot) = Arc::new(dict);
        self
    }

    /// Loads every table from `<base_dir>/<DictSlot::file_name()>`.
    ///
    /// A missing or unreadable file is an error.
    pub fn from_dicts<P: AsRef<Path>>(base_dir: P) -> Result<Self, DictionaryError> {
        let base_dir = base_dir.as_ref();
        let mut dicts = DictionaryMaxlength::default();

        for slot in DictSlot::ALL {
            let path = base_dir.join(slot.file_name());
            let content = fs::read_to_string(&path).map_err(|err| {
                DictionaryError::IoError(format!(
                    "Failed to read file {}: {}",
                    path.display(),
                    err
                ))
            })?;
            let dict = DictMaxLen::from_text(&content);
            debug!(
                "loaded {}: {} entries, len {}..={}",
                slot.file_name(),
                dict.len(),
                dict.min_len,
                dict.max_len
            );
            *dicts.get_mut(slot) = Arc::new(dict);
        }

        Ok(dicts)
    }

    /// Writes every table as `key\tvalue` lines into `base_dir` (created if missing).
    pub fn to_dicts<P: AsRef<Path>>(&self, base_dir: P) -> Result<(), DictionaryError> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir)?;

        for slot in DictSlot::ALL {
            let path = base_dir.join(slot.file_name());
            let mut file = BufWriter::new(File::create(&path)?);

            let mut entries: Vec<(String, &str)> = self
                .get(slot)
                .map
                .iter()
                .map(|(k, v)| (k.iter().collect::<String>(), v.as_ref()))
                .collect();
            entries.sort_unstable();

            for (key, value) in entries {
                writeln!(file, "{}\t{}", key, value)?;
            }
            file.flush()?;
        }

        Ok(())
    }

    /// Serializes the set to a CBOR file.
    pub fn serialize_to_cbor<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let cbor_data = serde_cbor::to_vec(self)?;
        fs::write(path, cbor_data)?;
        Ok(())
    }

    /// Deserializes the set from a CBOR file.
    pub fn deserialize_from_cbor<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let cbor_data = fs::read(path)?;
        Ok(from_slice(&cbor_data)?)
    }

    /// Saves the set as Zstd-compressed CBOR.
    pub fn save_compressed<P: AsRef<Path>>(&self, path: P) -> Result<(), DictionaryError> {
        let writer = BufWriter::new(File::create(path)?);
        let mut encoder = Encoder::new(writer, 19)?;
        serde_cbor::to_writer(&mut encoder, self)?;
        encoder.finish()?.flush()?;
        Ok(())
    }

    /// Loads a set saved by [`save_compressed`](Self::save_compressed).
    pub fn load_compressed<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let reader = BufReader::new(File::open(path)?);
        let mut decoder = Decoder::new(reader)?;
        Ok(from_reader(&mut decoder)?)
    }

    /// Decodes an in-memory Zstd-compressed CBOR blob (e.g. from `include_bytes!`).
    pub fn from_zstd_bytes(compressed: &[u8]) -> Result<Self, DictionaryError> {
        let decompressed = decode_all(Cursor::new(compressed)).map_err(|err| {
            DictionaryError::IoError(format!("Failed to decompress Zstd: {}", err))
        })?;
        from_slice(&decompressed)
            .map_err(|err| DictionaryError::ParseError(format!("Failed to parse CBOR: {}", err)))
    }

    /// Total number of entries across all tables.
    pub fn total_entries(&self) -> usize {
        DictSlot::ALL.iter().map(|&s| self.get(s).len()).sum()
    }
}
