//! 文档树 → HTML

use super::document::{Document, NodeData, NodeId};
use super::{is_raw_text_element, is_void_element};

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            other => out.push(other),
        }
    }
}

impl Document {
    /// 整个文档的HTML
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, false, &mut out);
        out
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let raw = self
            .element(id)
            .is_some_and(|el| is_raw_text_element(&el.name));
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(child, raw, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, raw_parent: bool, out: &mut String) {
        match self.data(id) {
            Some(NodeData::Document) => {
                for &child in self.children(id) {
                    self.write_node(child, false, out);
                }
            }
            Some(NodeData::Element(el)) => {
                out.push('<');
                out.push_str(&el.name);
                for (name, value) in &el.attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_attr(value, out);
                    out.push('"');
                }
                out.push('>');

                if is_void_element(&el.name) {
                    return;
                }
                let raw = is_raw_text_element(&el.name);
                for &child in self.children(id) {
                    self.write_node(child, raw, out);
                }
                out.push_str("</");
                out.push_str(&el.name);
                out.push('>');
            }
            Some(NodeData::Text(text)) => {
                if raw_parent {
                    out.push_str(text);
                } else {
                    escape_text(text, out);
                }
            }
            Some(NodeData::Comment(text)) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            Some(NodeData::Doctype(name)) => {
                out.push_str("<!DOCTYPE ");
                out.push_str(name);
                out.push('>');
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_badge_markup() {
        let html = r#"<a class="badge-category__wrapper" href="/c/dev/5"><span data-category-id="5" class="badge-category"><span class="badge-category__name">Dev &amp; Ops</span></span></a>"#;
        let doc = Document::parse(html);
        assert_eq!(doc.to_html(), html);
    }

    #[test]
    fn test_void_and_raw_text_serialization() {
        let doc = Document::parse(r#"<!DOCTYPE html><p title="a &quot;b&quot;">x<br>y</p><style>a > b {}</style><!--note-->"#);
        assert_eq!(
            doc.to_html(),
            r#"<!DOCTYPE html><p title="a &quot;b&quot;">x<br>y</p><style>a > b {}</style><!--note-->"#
        );
    }

    #[test]
    fn test_outer_html_of_fragment_node() {
        let mut doc = Document::new();
        let nodes = doc.parse_fragment(r#"<span class="x">&lt;tag&gt;</span>"#);
        assert_eq!(doc.outer_html(nodes[0]), r#"<span class="x">&lt;tag&gt;</span>"#);
    }
}
