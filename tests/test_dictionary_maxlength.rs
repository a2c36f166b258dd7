#[cfg(test)]
mod tests {
    use opencc_rounds::dictionary_lib::{DictMaxLen, DictSlot, DictionaryError, DictionaryMaxlength};
    use std::fs;
    use tempfile::tempdir;

    const DICTS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/dicts");

    fn assert_same_tables(a: &DictionaryMaxlength, b: &DictionaryMaxlength) {
        for slot in DictSlot::ALL {
            let x: &DictMaxLen = a.get(slot);
            let y: &DictMaxLen = b.get(slot);
            assert_eq!(x.len(), y.len(), "{:?}", slot);
            assert_eq!((x.min_len, x.max_len), (y.min_len, y.max_len), "{:?}", slot);
            assert_eq!(x.key_length_mask, y.key_length_mask, "{:?}", slot);
            for (k, v) in &x.map {
                assert_eq!(y.get(k), Some(v.as_ref()), "{:?}", slot);
            }
        }
    }

    #[test]
    fn from_dicts_loads_every_table() {
        let dicts = DictionaryMaxlength::from_dicts(DICTS_DIR).unwrap();
        for slot in DictSlot::ALL {
            assert!(!dicts.get(slot).is_empty(), "{} is empty", slot.file_name());
        }
        assert_eq!(dicts.st_phrases.get_str("汉字"), Some("漢字"));
        assert_eq!(dicts.st_characters.get_str("𬴂"), Some("騑"));
        assert_eq!(dicts.st_characters.max_len, 2);
        assert_eq!(dicts.st_characters.max_chars, 1);
        assert_eq!(dicts.st_phrases.max_len, 4);
    }

    #[test]
    fn missing_table_is_io_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::write(dir.path().join("STCharacters.txt"), "龙\t龍\n")?;
        match DictionaryMaxlength::from_dicts(dir.path()) {
            Err(DictionaryError::IoError(msg)) => assert!(msg.contains("STPhrases.txt")),
            other => panic!("unexpected: {:?}", other.map(|d| d.total_entries())),
        }
        Ok(())
    }

    #[test]
    fn cbor_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("dictionary_maxlength.cbor");
        let dicts = DictionaryMaxlength::from_dicts(DICTS_DIR)?;

        dicts.serialize_to_cbor(&path)?;
        let back = DictionaryMaxlength::deserialize_from_cbor(&path)?;
        assert_same_tables(&dicts, &back);
        Ok(())
    }

    #[test]
    fn zstd_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("dictionary_maxlength.zstd");
        let dicts = DictionaryMaxlength::from_dicts(DICTS_DIR)?;

        dicts.save_compressed(&path)?;
        let back = DictionaryMaxlength::load_compressed(&path)?;
        assert_same_tables(&dicts, &back);

        let from_bytes = DictionaryMaxlength::from_zstd_bytes(&fs::read(&path)?)?;
        assert_same_tables(&dicts, &from_bytes);
        Ok(())
    }

    #[test]
    fn text_tables_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let dicts = DictionaryMaxlength::from_dicts(DICTS_DIR)?;

        dicts.to_dicts(dir.path())?;
        let back = DictionaryMaxlength::from_dicts(dir.path())?;
        assert_same_tables(&dicts, &back);
        Ok(())
    }

    #[test]
    fn corrupt_cbor_is_parse_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.cbor");
        fs::write(&path, [0xffu8, 0x00, 0x13])?;
        let err = DictionaryMaxlength::deserialize_from_cbor(&path).unwrap_err();
        assert!(matches!(err, DictionaryError::ParseError(_)), "{err}");
        Ok(())
    }
}
