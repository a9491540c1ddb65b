//! 批量课程处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责课程集合的处理和持久化。
//!
//! ## 核心功能
//!
//! 1. **加载**：读取课程集合和以往的失败记录
//! 2. **顺序处理**：一次只处理一门课程、一段需求、一个请求
//! 3. **限速**：每门课程处理完成后等待固定时间（跳过和无需求的课程不等待）
//! 4. **中断**：收到 Ctrl-C 后在两门课程之间停止，不报错
//! 5. **持久化**：无论正常结束还是中断，都原地写回课程集合并覆盖失败记录
//! 6. **统计**：汇总处理结果并列出所有失败的课程

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{load_courses, save_courses, CourseRecord};
use crate::orchestrator::record_processor::{process_record, RecordOutcome};
use crate::services::{CompletionClient, FailureLog, LlmService, RequisiteRequester};
use crate::utils::logging;
use crate::workflow::{RecordCtx, RequisiteFlow};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> AppResult<Self> {
        config.validate()?;
        logging::log_startup(&config);
        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<RunSummary> {
        let service = LlmService::new(&self.config);
        let shutdown = spawn_interrupt_listener();
        run_batch(&self.config, service, shutdown).await
    }
}

/// 加载、处理并写回整个课程集合
///
/// 读取或写回课程集合失败是唯一会中止运行的错误。
pub async fn run_batch<C: CompletionClient>(
    config: &Config,
    client: C,
    shutdown: Arc<AtomicBool>,
) -> AppResult<RunSummary> {
    let courses_path = Path::new(&config.courses_file);

    info!("\n📁 正在加载课程集合...");
    let mut courses = load_courses(courses_path).await?;
    let mut failures = FailureLog::load(&config.failure_log_file).await?;
    logging::log_courses_loaded(courses.len(), failures.len());

    let requester = RequisiteRequester::new(client, config.llm_model_name.clone());
    let processor = BatchProcessor::new(
        RequisiteFlow::new(requester),
        config.overwrite,
        config.request_delay(),
        shutdown,
    );

    let summary = processor.process_all(&mut courses, &mut failures).await;

    // 无论循环如何结束都写回
    let saved = save_courses(courses_path, &courses).await;
    let logged = failures.save().await;
    saved?;
    logged?;

    logging::print_final_stats(&summary, config);
    Ok(summary)
}

/// 批量处理器
pub struct BatchProcessor<C> {
    flow: RequisiteFlow<C>,
    overwrite: bool,
    delay: Duration,
    shutdown: Arc<AtomicBool>,
}

impl<C: CompletionClient> BatchProcessor<C> {
    pub fn new(
        flow: RequisiteFlow<C>,
        overwrite: bool,
        delay: Duration,
        shutdown: Arc<AtomicBool>,
    ) -> Self {
        Self {
            flow,
            overwrite,
            delay,
            shutdown,
        }
    }

    /// 顺序处理所有课程
    pub async fn process_all(
        &self,
        courses: &mut [CourseRecord],
        failures: &mut FailureLog,
    ) -> RunSummary {
        let total = courses.len();
        let mut summary = RunSummary {
            total,
            ..Default::default()
        };

        for (idx, record) in courses.iter_mut().enumerate() {
            if self.shutdown.load(Ordering::SeqCst) {
                warn!("⚠️ 收到中断信号，停止处理，保存已有进度");
                summary.interrupted = true;
                break;
            }

            let ctx = RecordCtx::new(record.id.clone(), idx + 1, total);
            let outcome =
                process_record(&self.flow, record, failures, self.overwrite, &ctx).await;

            match outcome {
                RecordOutcome::Skipped => summary.skipped += 1,
                RecordOutcome::Empty => summary.empty += 1,
                RecordOutcome::Failed => summary.failed.push(record.id.clone()),
                RecordOutcome::Processed => {
                    summary.processed += 1;
                    if !self.delay.is_zero() {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }

        summary.all_failed = failures.ids().map(str::to_string).collect();
        summary
    }
}

/// 运行统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub processed: usize,
    pub skipped: usize,
    pub empty: usize,
    /// 本次运行中失败的课程编号
    pub failed: Vec<String>,
    /// 失败记录中的全部课程编号（含以往运行）
    pub all_failed: Vec<String>,
    /// 是否因中断信号提前结束
    pub interrupted: bool,
}

impl RunSummary {
    /// 实际进入状态机的课程数
    pub fn visited(&self) -> usize {
        self.processed + self.skipped + self.empty + self.failed.len()
    }
}

/// 监听 Ctrl-C，收到后置位标志
fn spawn_interrupt_listener() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let listener = flag.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("⚠️ 收到 Ctrl-C，将在当前课程处理完成后停止");
            listener.store(true, Ordering::SeqCst);
        }
    });
    flag
}
