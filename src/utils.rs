/// Returns the length of `chars` in **UTF-16 code units**.
///
/// Every length the engine reasons about (dictionary `min_len`/`max_len`,
/// starter length masks, round windows) is measured in UTF-16 units, so a
/// supplementary-plane character such as `'𬴂'` counts as `2`.
///
/// # Example
/// ```
/// use opencc_rounds::utils::utf16_len;
///
/// let chars: Vec<char> = "汉𬴂".chars().collect();
/// assert_eq!(utf16_len(&chars), 3);
/// ```
#[inline]
pub fn utf16_len(chars: &[char]) -> usize {
    chars.iter().map(|c| c.len_utf16()).sum()
}

/// Largest byte index `<= max_byte_count` at which `sv` can be sliced
/// without splitting a character.
///
/// ```rust
/// use opencc_rounds::utils::find_max_utf8_length;
///
/// let input = "汉字转换测试"; // 3 bytes per character
/// let end = find_max_utf8_length(input, 7);
/// assert_eq!(&input[..end], "汉字");
/// ```
pub fn find_max_utf8_length(sv: &str, max_byte_count: usize) -> usize {
    if sv.len() <= max_byte_count {
        return sv.len();
    }
    (0..=max_byte_count)
        .rev()
        .find(|&i| sv.is_char_boundary(i))
        .unwrap_or(0)
}
