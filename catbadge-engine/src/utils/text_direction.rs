//! 文字方向检测：首个强方向字符为RTL字符时判定为RTL

use once_cell::sync::Lazy;
use regex::Regex;

static RTL_DIR_CHECK: Lazy<Regex> = Lazy::new(|| {
    let ltr_chars = r"A-Za-z\x{00C0}-\x{00D6}\x{00D8}-\x{00F6}\x{00F8}-\x{02B8}\x{0300}-\x{0590}\x{0800}-\x{1FFF}\x{200E}\x{2C00}-\x{FB1C}\x{FE00}-\x{FE6F}\x{FEFD}-\x{FFFF}";
    let rtl_chars = r"\x{0591}-\x{07FF}\x{FB1D}-\x{FDFD}\x{FE70}-\x{FEFC}";
    Regex::new(&format!("^[^{ltr_chars}]*[{rtl_chars}]")).unwrap()
});

pub fn is_rtl(text: &str) -> bool {
    RTL_DIR_CHECK.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_rtl() {
        assert!(is_rtl("مرحبا"));
        assert!(is_rtl("123 שלום"));
        assert!(!is_rtl("Hello שלום"));
        assert!(!is_rtl("Support"));
        assert!(!is_rtl(""));
    }
}
