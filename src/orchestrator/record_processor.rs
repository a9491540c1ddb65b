//! 单门课程处理器 - 编排层
//!
//! 每门课程每次运行只进入一次状态机：
//! - 跳过：已有解析结果且非覆盖模式，或在以往的失败记录中
//! - 无需求：先修和同修都没有需要解析的内容，不发请求，不改动已有结果
//! - 处理：分别解析先修和同修，全部成功后才写回
//! - 失败：任一步出错，清空该课程的结果并记入失败集合

use tracing::{error, info};

use crate::error::AppResult;
use crate::models::{CourseRecord, ReqNode, Requisite};
use crate::services::{CompletionClient, FailureLog};
use crate::workflow::{RecordCtx, RequisiteFlow};

/// 单门课程的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Skipped,
    Empty,
    Processed,
    Failed,
}

/// 处理单门课程
pub async fn process_record<C: CompletionClient>(
    flow: &RequisiteFlow<C>,
    record: &mut CourseRecord,
    failures: &mut FailureLog,
    overwrite: bool,
    ctx: &RecordCtx,
) -> RecordOutcome {
    if failures.contains(&record.id) {
        info!("{} ⏭️ 以往运行中解析失败，跳过", ctx);
        return RecordOutcome::Skipped;
    }

    if record.is_parsed() && !overwrite {
        info!("{} ⏭️ 已解析，跳过", ctx);
        return RecordOutcome::Skipped;
    }

    if record.has_no_requisites() {
        info!("{} 没有先修或同修要求", ctx);
        return RecordOutcome::Empty;
    }

    match resolve_requisites(flow, record, ctx).await {
        Ok(trees) => {
            for (kind, tree) in Requisite::ALL.into_iter().zip(trees) {
                record.set_logical(kind, tree);
            }
            RecordOutcome::Processed
        }
        Err(e) => {
            error!("{} ❌ 解析失败: {}", ctx, e);
            record.set_logical(Requisite::Prerequisites, None);
            record.set_logical(Requisite::Corequisites, None);
            failures.insert(record.id.clone());
            RecordOutcome::Failed
        }
    }
}

/// 依次解析先修和同修，任一出错立即返回
async fn resolve_requisites<C: CompletionClient>(
    flow: &RequisiteFlow<C>,
    record: &CourseRecord,
    ctx: &RecordCtx,
) -> AppResult<[Option<ReqNode>; 2]> {
    let mut trees: [Option<ReqNode>; 2] = [None, None];
    for (slot, kind) in trees.iter_mut().zip(Requisite::ALL) {
        if let Some(html) = record.pending_text(kind) {
            *slot = flow.run(html, kind, ctx).await?;
        }
    }
    Ok(trees)
}
