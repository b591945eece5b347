//! HTML → 文档树
//! 基于 html5ever 分词器逐个消费标签token，按开放元素栈建树
//! 不执行完整的HTML树构建算法（无隐式补全），对宿主渲染的徽章/搜索结果片段足够

use std::cell::RefCell;

use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use markup5ever::interface::Attribute;
use tendril::StrTendril;

use super::document::{Document, ElementData, NodeId};
use super::{is_raw_text_element, is_void_element};

/// 分词结果 → 树节点
struct TreeBuilder {
    doc: RefCell<Document>,
    /// 开放元素栈
    open: RefCell<Vec<NodeId>>,
    /// 栈为空时的挂载点；None 表示片段模式，顶层节点收集到 roots
    base: Option<NodeId>,
    roots: RefCell<Vec<NodeId>>,
}

impl TokenSink for TreeBuilder {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        match token {
            Token::TagToken(tag) => {
                let kind = tag.kind;
                match kind {
                    TagKind::StartTag => return self.start_tag(tag),
                    TagKind::EndTag => self.end_tag(tag.name.as_ref()),
                }
            }
            Token::CharacterTokens(text) => self.append_text(&text),
            Token::CommentToken(text) => {
                let id = self.doc.borrow_mut().create_comment(text.to_string());
                self.attach(id);
            }
            Token::DoctypeToken(doctype) => {
                let name = doctype.name.map(|n| n.to_string()).unwrap_or_default();
                let id = self.doc.borrow_mut().create_doctype(name);
                self.attach(id);
            }
            Token::ParseError(err) => log::trace!("HTML tokenizer: {}", err),
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

impl TreeBuilder {
    fn new(doc: Document, base: Option<NodeId>) -> Self {
        Self {
            doc: RefCell::new(doc),
            open: RefCell::new(Vec::new()),
            base,
            roots: RefCell::new(Vec::new()),
        }
    }

    fn current_parent(&self) -> Option<NodeId> {
        self.open.borrow().last().copied().or(self.base)
    }

    fn attach(&self, id: NodeId) {
        match self.current_parent() {
            Some(parent) => {
                self.doc.borrow_mut().append_child(parent, id);
            }
            None => self.roots.borrow_mut().push(id),
        }
    }

    fn start_tag(&self, tag: Tag) -> TokenSinkResult<()> {
        let name = tag.name.as_ref().to_string();
        let element = ElementData {
            attrs: collect_attrs(&tag.attrs),
            name: name.clone(),
        };
        let id = self.doc.borrow_mut().create_element(element);
        self.attach(id);

        if tag.self_closing || is_void_element(&name) {
            return TokenSinkResult::Continue;
        }
        self.open.borrow_mut().push(id);

        // 原始文本元素需切换分词状态，内容按文本处理
        match name.as_str() {
            "script" => TokenSinkResult::RawData(RawKind::ScriptData),
            "textarea" | "title" => TokenSinkResult::RawData(RawKind::Rcdata),
            "plaintext" => TokenSinkResult::Plaintext,
            other if is_raw_text_element(other) => TokenSinkResult::RawData(RawKind::Rawtext),
            _ => TokenSinkResult::Continue,
        }
    }

    /// 弹栈到最近的同名元素；无匹配的结束标签直接忽略
    fn end_tag(&self, name: &str) {
        let mut open = self.open.borrow_mut();
        let doc = self.doc.borrow();
        let matched = open
            .iter()
            .rposition(|&id| doc.element(id).is_some_and(|el| el.name == name));
        if let Some(idx) = matched {
            open.truncate(idx);
        }
    }

    fn append_text(&self, text: &StrTendril) {
        let last = match self.current_parent() {
            Some(parent) => self.doc.borrow().children(parent).last().copied(),
            None => self.roots.borrow().last().copied(),
        };

        // 与相邻文本节点合并
        if let Some(last) = last {
            if let Some(existing) = self.doc.borrow_mut().text_mut(last) {
                existing.push_str(text);
                return;
            }
        }

        let id = self.doc.borrow_mut().create_text(text.to_string());
        self.attach(id);
    }

    fn run(self, html: &str) -> Self {
        let tokenizer = Tokenizer::new(self, TokenizerOpts::default());
        let queue = BufferQueue::default();
        queue.push_back(StrTendril::from(html));

        let _ = tokenizer.feed(&queue);
        tokenizer.end();

        tokenizer.sink
    }
}

fn collect_attrs(attrs: &[Attribute]) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::with_capacity(attrs.len());
    for attr in attrs {
        let name = attr.name.local.as_ref();
        if out.iter().any(|(existing, _)| existing == name) {
            continue;
        }
        out.push((name.to_string(), attr.value.to_string()));
    }
    out
}

impl Document {
    /// 解析完整HTML为新文档
    pub fn parse(html: &str) -> Self {
        let doc = Document::new();
        let root = doc.root();
        let builder = TreeBuilder::new(doc, Some(root)).run(html);
        builder.doc.into_inner()
    }

    /// 将HTML片段解析为本文档中的脱离节点，返回顶层节点（文档顺序）
    pub fn parse_fragment(&mut self, html: &str) -> Vec<NodeId> {
        let doc = std::mem::take(self);
        let builder = TreeBuilder::new(doc, None).run(html);
        *self = builder.doc.into_inner();
        builder.roots.into_inner()
    }
}
