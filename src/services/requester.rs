//! 需求树请求 - 业务能力层
//!
//! 把提取出的需求文本变成原始嵌套列表：
//! 1. 快速通道：形如 "Prerequisite: COMP 202" 的文本直接返回课程代码，不调用模型
//! 2. 模型通道：带固定系统指令请求一次补全，再用严格字面量解析器解析

use tracing::debug;

use crate::error::{AppResult, LlmError};
use crate::models::{CourseCode, ListNode};
use crate::parser::parse_literal;
use crate::services::completion::CompletionClient;

/// 描述需求树语法的系统指令
pub const SYSTEM_PROMPT: &str = "You convert course requirement text into a logical requirement tree. \
Output a single nested list literal and nothing else. \
A non-leaf node is a list whose first element is the operator, either '&' (all of) or '|' (one of), \
followed by its children. A leaf is a course code string such as 'COMP 202'. \
Use single-quoted strings. Only include course codes that appear in the text; \
never include prose, credits or other requirements as leaves. \
Example: \"COMP 202 or COMP 250, and MATH 133\" -> ['&', ['|', 'COMP 202', 'COMP 250'], 'MATH 133']";

/// 需求树请求器
pub struct RequisiteRequester<C> {
    client: C,
    model_label: String,
}

impl<C: CompletionClient> RequisiteRequester<C> {
    pub fn new(client: C, model_label: impl Into<String>) -> Self {
        Self {
            client,
            model_label: model_label.into(),
        }
    }

    /// 请求一棵原始需求树
    pub async fn request_tree(&self, text: &str) -> AppResult<ListNode> {
        if let Some(code) = try_direct_code(text) {
            debug!("快速通道命中: {}", code);
            return Ok(ListNode::Str(code.to_string()));
        }

        let content = self
            .client
            .complete(SYSTEM_PROMPT, text)
            .await?
            .ok_or_else(|| LlmError::EmptyCompletion {
                model: self.model_label.clone(),
            })?;

        let flattened: String = content.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        debug!("LLM 返回: {}", flattened);

        parse_literal(&flattened)
    }
}

/// 快速通道：冒号后的部分恰好是一个课程代码时直接返回
///
/// 只按第一个 `": "` 切分；右侧原样整串匹配，带句号或空白的交给模型。
pub fn try_direct_code(text: &str) -> Option<CourseCode> {
    let (_, rhs) = text.split_once(": ")?;
    CourseCode::parse(rhs)
}
