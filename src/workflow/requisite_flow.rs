//! 需求解析流程 - 流程层
//!
//! 定义"一段需求文本"的完整处理流程：
//! 1. HTML 提取为纯文本
//! 2. 请求原始需求树（快速通道或模型）
//! 3. 解析并规范化

use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::models::{ReqNode, Requisite};
use crate::parser;
use crate::services::{extract, extract_codes, CompletionClient, RequisiteRequester};
use crate::workflow::record_ctx::RecordCtx;

/// 需求解析流程
///
/// - 不持有课程集合
/// - 只依赖业务能力（services）
pub struct RequisiteFlow<C> {
    requester: RequisiteRequester<C>,
}

impl<C: CompletionClient> RequisiteFlow<C> {
    pub fn new(requester: RequisiteRequester<C>) -> Self {
        Self { requester }
    }

    pub async fn run(
        &self,
        html: &str,
        kind: Requisite,
        ctx: &RecordCtx,
    ) -> AppResult<Option<ReqNode>> {
        let text = extract(html)?;
        debug!("{} {}文本: {}", ctx, kind.label(), text);

        let raw = self.requester.request_tree(&text).await?;
        let tree = parser::parse(&raw)?;

        match &tree {
            Some(tree) => {
                info!("{} ✓ {}: {}", ctx, kind.label(), tree);

                // 模型可能编造文本中不存在的课程
                let linked = extract_codes(html);
                if !linked.is_empty() {
                    let unlinked: Vec<String> = tree
                        .courses()
                        .into_iter()
                        .filter(|code| !linked.contains(code))
                        .map(ToString::to_string)
                        .collect();
                    if !unlinked.is_empty() {
                        warn!("{} ⚠️ 以下课程未出现在链接中: {}", ctx, unlinked.join(", "));
                    }
                }
            }
            None => info!("{} {}中没有课程代码", ctx, kind.label()),
        }

        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, ParseError};
    use crate::models::{CourseCode, Operator};

    struct FixedReply(&'static str);

    impl CompletionClient for FixedReply {
        async fn complete(&self, _system: &str, _user: &str) -> AppResult<Option<String>> {
            Ok(Some(self.0.to_string()))
        }
    }

    fn flow(reply: &'static str) -> RequisiteFlow<FixedReply> {
        RequisiteFlow::new(RequisiteRequester::new(FixedReply(reply), "stub"))
    }

    fn ctx() -> RecordCtx {
        RecordCtx::new("COMP251", 1, 1)
    }

    #[tokio::test]
    async fn test_end_to_end_or_group() {
        let html = "Prerequisite: <a href='/course/comp-202'>x</a> or <a href='/course/comp-250'>y</a>";
        let tree = flow("['|', 'COMP 202', 'COMP 250']")
            .run(html, Requisite::Prerequisites, &ctx())
            .await
            .unwrap();

        assert_eq!(
            tree,
            Some(ReqNode::Group {
                operator: Operator::Or,
                groups: vec![
                    ReqNode::Course(CourseCode::parse("COMP 202").unwrap()),
                    ReqNode::Course(CourseCode::parse("COMP 250").unwrap()),
                ],
            })
        );
    }

    #[tokio::test]
    async fn test_fast_path_single_link() {
        let html = "Corequisite: <a href='/course/math-133'>MATH 133</a>";
        let tree = flow("this reply is never requested")
            .run(html, Requisite::Corequisites, &ctx())
            .await
            .unwrap();
        assert_eq!(tree, Some(ReqNode::Course(CourseCode::parse("MATH 133").unwrap())));
    }

    #[tokio::test]
    async fn test_prose_only_yields_none() {
        let tree = flow("['&', 'CEGEP level Math']")
            .run(
                "Prerequisites: Familiarity with a programming language and CEGEP level Math.",
                Requisite::Prerequisites,
                &ctx(),
            )
            .await
            .unwrap();
        assert_eq!(tree, None);
    }

    #[tokio::test]
    async fn test_invalid_operator_propagates() {
        let err = flow("['AND', 'COMP 202', 'COMP 250']")
            .run("Prerequisite: COMP 202 and COMP 250", Requisite::Prerequisites, &ctx())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(ParseError::InvalidOperator { .. })));
    }
}
