//! Arena 文档树
//! 节点只增不删（移除即脱离父节点），NodeId 在文档生命周期内稳定
//! 所有查询从指定节点向下遍历，脱离的节点自然不可见；失效ID上的操作退化为空操作

use super::selector::Selector;

/// 节点ID（文档内索引）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// 元素数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub name: String,
    pub attrs: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let joined = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
            _ => class.to_string(),
        };
        self.set_attr("class", joined);
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.has_class(class) {
            return;
        }
        let remaining: Vec<&str> = self.classes().filter(|c| *c != class).collect();
        let joined = remaining.join(" ");
        self.set_attr("class", joined);
    }
}

/// 节点数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
    Doctype(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// 文档树
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    // ===================== 节点创建 =====================

    fn push_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// 创建脱离状态的元素
    pub fn create_element(&mut self, element: ElementData) -> NodeId {
        self.push_node(NodeData::Element(element))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeData::Text(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeData::Comment(text.into()))
    }

    pub fn create_doctype(&mut self, name: impl Into<String>) -> NodeId {
        self.push_node(NodeData::Doctype(name.into()))
    }

    // ===================== 基础访问 =====================

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.node(id).map(|n| &n.data)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.data(id)? {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.data)? {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut String> {
        match self.nodes.get_mut(id.0).map(|n| &mut n.data)? {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    /// 节点是否仍挂在文档根下
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root() {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn index_in_parent(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(id)?;
        let idx = self.children(parent).iter().position(|&c| c == id)?;
        Some((parent, idx))
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (parent, idx) = self.index_in_parent(id)?;
        idx.checked_sub(1).map(|prev| self.children(parent)[prev])
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (parent, idx) = self.index_in_parent(id)?;
        self.children(parent).get(idx + 1).copied()
    }

    /// 紧邻的前一个元素兄弟：跳过空白文本与注释，遇到非空白文本视为不相邻
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.previous_sibling(id);
        while let Some(prev) = current {
            match self.data(prev)? {
                NodeData::Element(_) => return Some(prev),
                NodeData::Text(text) if text.trim().is_empty() => {}
                NodeData::Comment(_) => {}
                _ => return None,
            }
            current = self.previous_sibling(prev);
        }
        None
    }

    // ===================== 树修改 =====================

    fn detach(&mut self, id: NodeId) {
        if let Some((parent, idx)) = self.index_in_parent(id) {
            self.nodes[parent.0].children.remove(idx);
        }
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.parent = None;
        }
    }

    /// 禁止把节点挂到自身或其后代之下
    fn would_cycle(&self, parent: NodeId, child: NodeId) -> bool {
        let mut current = Some(parent);
        while let Some(node) = current {
            if node == child {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    fn is_insertable(&self, parent: NodeId, child: NodeId) -> bool {
        self.node(parent).is_some()
            && self.node(child).is_some()
            && child != self.root()
            && !self.would_cycle(parent, child)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.is_insertable(parent, child) {
            return false;
        }
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        true
    }

    /// 在 reference 之前插入 node；reference 无父节点时不做任何修改
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) -> bool {
        if reference == node {
            return false;
        }
        let Some(parent) = self.parent(reference) else {
            return false;
        };
        if !self.is_insertable(parent, node) {
            return false;
        }
        self.detach(node);
        let Some((_, idx)) = self.index_in_parent(reference) else {
            return false;
        };
        self.nodes[parent.0].children.insert(idx, node);
        self.nodes[node.0].parent = Some(parent);
        true
    }

    /// 从父节点移除（节点保留在arena中，可重新插入）
    pub fn remove(&mut self, id: NodeId) -> bool {
        if self.parent(id).is_none() {
            return false;
        }
        self.detach(id);
        true
    }

    // ===================== 查询 =====================

    /// 先序遍历后代（不含自身）
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.element(id).is_some_and(|el| selector.matches(el))
    }

    /// 文档顺序下匹配选择器的后代元素
    pub fn query_all(&self, from: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(from)
            .into_iter()
            .filter(|&id| self.matches(id, selector))
            .collect()
    }

    pub fn query_first(&self, from: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(from)
            .into_iter()
            .find(|&id| self.matches(id, selector))
    }

    /// 含自身的最近匹配祖先
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.matches(node, selector) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        if let Some(NodeData::Text(t)) = self.data(id) {
            text.push_str(t);
        }
        for node in self.descendants(id) {
            if let Some(NodeData::Text(t)) = self.data(node) {
                text.push_str(t);
            }
        }
        text
    }
}
