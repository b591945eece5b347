//! DOM模块：轻量 arena 文档树
//! document：节点存储与树操作
//! selector：补丁器所需的简单选择器子集
//! parser：基于 html5ever 分词器的 HTML/片段解析
//! serialize：文档 → HTML

pub mod document;
pub mod parser;
pub mod selector;
pub mod serialize;

pub use document::{Document, ElementData, NodeData, NodeId};
pub use selector::Selector;

/// 无结束标签的HTML空元素
pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "keygen" | "link"
            | "meta" | "param" | "source" | "track" | "wbr"
    )
}

/// 内容不做实体转义的原始文本元素
pub(crate) fn is_raw_text_element(name: &str) -> bool {
    matches!(
        name,
        "script" | "style" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext"
    )
}
