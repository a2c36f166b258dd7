use opencc_rounds::{OpenCC, OpenccConfig, ParallelPolicy};

#[cfg(test)]
mod tests {
    use super::*;

    const DICTS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/dicts");

    fn opencc() -> OpenCC {
        OpenCC::from_dicts_dir(DICTS_DIR).expect("fixture dictionaries load")
    }

    #[test]
    fn s2t_test() {
        let input = "你好，世界！龙马精神！\t\n";
        let expected_output = "你好，世界！龍馬精神！\t\n";
        let opencc = opencc();
        let actual_output = opencc.convert(input, "s2t", false);
        assert_eq!(actual_output, expected_output);
    }

    #[test]
    fn s2t_phrase_before_characters_test() {
        let opencc = opencc();
        assert_eq!(opencc.convert("汉字测试", "s2t", false), "漢字测试");
        assert_eq!(opencc.convert("头发", "s2t", false), "頭髮");
        assert_eq!(opencc.convert("一目了然", "s2t", false), "一目瞭然");
    }

    #[test]
    fn s2t_extended_test() {
        let input = "俨骖𬴂于上路，访风景于崇阿";
        let expected_output = "儼驂騑於上路，訪風景於崇阿";
        let opencc = opencc();
        assert_eq!(opencc.convert(input, "s2t", false), expected_output);
    }

    #[test]
    fn t2s_test() {
        let opencc = opencc();
        assert_eq!(opencc.convert("漢字，頭髮！龍馬", "t2s", false), "汉字，头发！龙马");
        assert_eq!(opencc.convert("一目瞭然", "t2s", false), "一目了然");
    }

    #[test]
    fn s2tw_test() {
        let opencc = opencc();
        assert_eq!(opencc.convert("你好，意大利！", "s2tw", false), "你好，意大利！");
        assert_eq!(opencc.convert("启示", "s2tw", false), "啟示");
    }

    #[test]
    fn s2twp_test() {
        let opencc = opencc();
        assert_eq!(opencc.convert("你好，意大利！", "s2twp", false), "你好，義大利！");
    }

    #[test]
    fn tw2s_test() {
        let opencc = opencc();
        assert_eq!(opencc.convert("為什麼啟示", "tw2s", false), "为什么启示");
    }

    #[test]
    fn tw2sp_test() {
        let input = "你好，義大利！";
        let expected_output = "你好，意大利！";
        let opencc = opencc();
        assert_eq!(opencc.convert(input, "tw2sp", false), expected_output);
    }

    #[test]
    fn s2hk_and_hk2s_test() {
        let opencc = opencc();
        assert_eq!(opencc.convert("线路", "s2hk", false), "綫路");
        assert_eq!(opencc.convert("綫路", "hk2s", false), "线路");
    }

    #[test]
    fn traditional_variant_modes_test() {
        let opencc = opencc();
        assert_eq!(opencc.convert("啓示", "t2tw", false), "啟示");
        assert_eq!(opencc.convert("啟示", "tw2t", false), "啓示");
        assert_eq!(opencc.convert("軟件", "t2twp", false), "軟體");
        assert_eq!(opencc.convert("軟體", "tw2tp", false), "軟件");
        assert_eq!(opencc.convert("說線", "t2hk", false), "説綫");
        assert_eq!(opencc.convert("説服綫", "hk2t", false), "說服線");
    }

    #[test]
    fn japanese_modes_test() {
        let opencc = opencc();
        assert_eq!(opencc.convert("舊體國", "t2jp", false), "旧体国");
        assert_eq!(opencc.convert("旧体，広島", "jp2t", false), "舊體，廣島");
    }

    #[test]
    fn punctuation_test() {
        let opencc = opencc();
        assert_eq!(opencc.convert("“汉字”‘龙’", "s2t", true), "「漢字」『龍』");
        assert_eq!(opencc.convert("“汉字”", "s2t", false), "“漢字”");
        assert_eq!(opencc.convert("「漢字」", "t2s", true), "“汉字”");
        assert_eq!(opencc.convert("「為」", "tw2s", true), "“为”");
        assert_eq!(opencc.convert("「義大利」", "tw2sp", true), "“意大利”");
        assert_eq!(opencc.convert("「啓」", "t2tw", true), "「啟」");
    }

    #[test]
    fn surrogate_pair_test() {
        let opencc = opencc();
        assert_eq!(opencc.convert("𬴂马𬴂", "s2t", false), "騑馬騑");
        assert_eq!(opencc.convert("騑", "t2s", false), "𬴂");
    }

    #[test]
    fn no_op_text_is_unchanged_test() {
        let mut opencc = opencc();
        let input = "Hello, world! 123 测试。".repeat(200);
        assert_eq!(opencc.convert(&input, "s2t", true), input);
        opencc.set_parallel(false);
        assert_eq!(opencc.convert(&input, "s2t", true), input);
    }

    #[test]
    fn round_trip_test() {
        let opencc = opencc();
        let input = "汉字，龙马精神。头发一目了然！";
        let traditional = opencc.convert(input, "s2t", false);
        assert_eq!(traditional, "漢字，龍馬精神。頭髮一目瞭然！");
        assert_eq!(opencc.convert(&traditional, "t2s", false), input);
    }

    #[test]
    fn parallel_equals_sequential_test() {
        let mut opencc = opencc();
        let input = "俨骖𬴂于上路，访风景于崇阿；“汉字”头发\n".repeat(500);
        for config in OpenccConfig::ALL {
            opencc.set_parallel_policy(ParallelPolicy {
                enabled: true,
                min_text_len: 0,
                min_segments: 0,
            });
            let parallel = opencc.convert_with_config(&input, config, true);
            opencc.set_parallel_policy(ParallelPolicy::sequential());
            let sequential = opencc.convert_with_config(&input, config, true);
            assert_eq!(parallel, sequential, "{config}");
        }
    }

    #[test]
    fn delimiter_invariance_test() {
        let opencc = opencc();
        let input = "汉字，龙马。为什么 意大利；线路\t𬴂“头发”";
        let whole = opencc.convert(input, "s2twp", true);
        let pieces: String = input
            .split_inclusive(|c: char| opencc_rounds::delimiter_set::is_delimiter(c))
            .map(|seg| opencc.convert(seg, "s2twp", true))
            .collect();
        assert_eq!(whole, pieces);
    }

    #[test]
    fn invalid_config_falls_back_to_s2t_test() {
        let opencc = opencc();
        assert_eq!(
            opencc.convert("龙马", "bogus", false),
            opencc.convert("龙马", "s2t", false)
        );
        assert_eq!(opencc.convert("龙马", "S2TW", false), "龍馬");
    }

    #[test]
    fn zho_check_test() {
        let opencc = opencc();
        assert_eq!(opencc.zho_check("你好，世界！龙马精神！"), 2);
        assert_eq!(opencc.zho_check("你好，世界！龍馬精神！"), 1);
        assert_eq!(opencc.zho_check("Hello 123"), 0);
    }

    #[test]
    fn plans_are_built_once_per_key_test() {
        let opencc = opencc();
        let _ = opencc.convert("龙", "s2t", false);
        let _ = opencc.convert("马", "s2t", false);
        let _ = opencc.convert("龙", "s2t", true);
        assert_eq!(opencc.plan_cache().build_count(), 2);
    }
}
