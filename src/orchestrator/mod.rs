//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量课程处理器
//! - 加载课程集合与失败记录
//! - 顺序遍历课程，控制请求间隔
//! - 响应中断信号
//! - 无论以何种方式结束都写回课程集合和失败记录
//!
//! ### `record_processor` - 单门课程处理器
//! - 判断跳过 / 无需求 / 处理
//! - 调用 `RequisiteFlow` 解析先修和同修
//! - 失败时丢弃已得到的结果并记入失败集合
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<CourseRecord>)
//!     ↓
//! record_processor (处理单个 CourseRecord)
//!     ↓
//! workflow::RequisiteFlow (处理单段需求文本)
//!     ↓
//! services (能力层：extract / request / failure log)
//! ```

pub mod batch_processor;
pub mod record_processor;

pub use batch_processor::{run_batch, App, BatchProcessor, RunSummary};
pub use record_processor::{process_record, RecordOutcome};
