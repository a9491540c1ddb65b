//! # Course Req Parser
//!
//! 把课程的先修/同修说明（内嵌课程链接的 HTML 片段）解析为
//! 由 AND/OR 组成的最简逻辑树，并批量写回课程集合。
//!
//! ## 架构设计
//!
//! ### ① 数据模型（Models）
//! - `models/` - 课程代码语法、逻辑树、原始列表、课程记录
//! - `CourseCode` - 经过语法校验的课程代码
//! - `ReqNode` - 规范化后的逻辑树，兼容新旧两种 JSON 格式
//!
//! ### ② 解析层（Parser）
//! - `parser::literal` - 严格的字面量解析器，只接受列表/字符串/数字/布尔/None
//! - `parser::tree` - 运算符校验、叶子过滤、退化分组折叠
//!
//! ### ③ 业务能力层（Services）
//! - `html_extractor` - HTML 片段 → 纯文本
//! - `RequisiteRequester` - 快速通道 + 模型请求
//! - `LlmService` - `CompletionClient` 的 async-openai 实现
//! - `FailureLog` - 跨运行持久化的失败集合
//!
//! ### ④ 流程层（Workflow）
//! - `RequisiteFlow` - 一段需求文本的完整流程（提取 → 请求 → 解析）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 顺序遍历课程集合，限速、中断、持久化
//! - `orchestrator/record_processor` - 单门课程的状态机
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{is_valid_code, CourseCode, CourseRecord, ListNode, Operator, ReqNode};
pub use orchestrator::{run_batch, App, RunSummary};
pub use services::{CompletionClient, FailureLog, LlmService};
pub use workflow::RequisiteFlow;
