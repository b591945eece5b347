use std::fmt::{self, Display};

/// 日志中单个配置段的最大展示字符数
const SEGMENT_PREVIEW_CHARS: usize = 48;

/// 配置段日志预览：超长截断并追加省略号，不额外分配
pub fn preview_segment(segment: &str) -> impl Display + '_ {
    struct Preview<'a>(&'a str);

    impl Display for Preview<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self.0.char_indices().nth(SEGMENT_PREVIEW_CHARS) {
                Some((cut, _)) => write!(f, "{}…", &self.0[..cut]),
                None => f.write_str(self.0),
            }
        }
    }

    Preview(segment)
}
