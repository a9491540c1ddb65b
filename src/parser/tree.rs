//! 逻辑树解析与规范化
//!
//! 把 LLM 返回的嵌套列表转换为 [`ReqNode`]：
//! - 字符串：符合课程代码语法则为叶子，否则丢弃
//! - 列表：首元素必须是 `'&'` 或 `'|'`，其余元素递归解析后过滤掉空结果
//! - 过滤后没有子节点则整棵子树为空，只剩一个则直接折叠为该子节点

use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::{CourseCode, ListNode, Operator, ReqNode};

/// 解析并规范化一个节点
///
/// 非法叶子被静默过滤；只有非法运算符会返回错误。
pub fn parse(node: &ListNode) -> AppResult<Option<ReqNode>> {
    match node {
        ListNode::Str(s) => {
            let leaf = CourseCode::parse(s).map(ReqNode::Course);
            if leaf.is_none() {
                debug!("丢弃非课程代码叶子: {:?}", s);
            }
            Ok(leaf)
        }
        ListNode::List(items) => {
            let (head, rest) = items
                .split_first()
                .ok_or_else(|| AppError::invalid_operator("[]"))?;

            let operator = head
                .as_str()
                .and_then(Operator::from_tag)
                .ok_or_else(|| AppError::invalid_operator(head.to_string()))?;

            let mut children = Vec::with_capacity(rest.len());
            for child in rest {
                if let Some(tree) = parse(child)? {
                    children.push(tree);
                }
            }

            Ok(ReqNode::group(operator, children))
        }
        other => {
            debug!("丢弃非字符串叶子: {}", other);
            Ok(None)
        }
    }
}
