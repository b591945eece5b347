//! HTML转义（与宿主模板引擎的 escapeExpression 行为一致）

use std::borrow::Cow;

/// 转义 `& < > " ' \` =`，无需转义时零分配返回原串
pub fn escape_expression(input: &str) -> Cow<'_, str> {
    if !input.contains(['&', '<', '>', '"', '\'', '`', '=']) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '`' => out.push_str("&#x60;"),
            '=' => out.push_str("&#x3D;"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_expression() {
        assert!(matches!(escape_expression("plain name"), Cow::Borrowed(_)));
        assert_eq!(
            escape_expression(r#"<b>"Q&A"</b> it's a=b"#),
            "&lt;b&gt;&quot;Q&amp;A&quot;&lt;/b&gt; it&#x27;s a&#x3D;b"
        );
    }
}
