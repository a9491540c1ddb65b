//! LLM 返回的原始嵌套列表
//!
//! 只在单条记录的处理过程中存在：由请求层产生，被树解析器消费一次后丢弃。

use std::fmt;

/// 字面量节点
#[derive(Debug, Clone, PartialEq)]
pub enum ListNode {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    None,
    List(Vec<ListNode>),
}

impl ListNode {
    /// 便捷构造：字符串节点
    pub fn str(s: impl Into<String>) -> Self {
        ListNode::Str(s.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ListNode::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ListNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListNode::Str(s) => write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            ListNode::Int(n) => write!(f, "{n}"),
            ListNode::Float(n) => write!(f, "{n:?}"),
            ListNode::Bool(true) => f.write_str("True"),
            ListNode::Bool(false) => f.write_str("False"),
            ListNode::None => f.write_str("None"),
            ListNode::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}
