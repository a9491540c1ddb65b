//! 模型输出解析层
//!
//! `literal` 把文本变成 [`ListNode`](crate::models::ListNode)，
//! `tree` 把 `ListNode` 变成规范化的 [`ReqNode`](crate::models::ReqNode)。

pub mod literal;
pub mod tree;

pub use literal::parse_literal;
pub use tree::parse;
