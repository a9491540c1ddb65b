use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use course_req_parser::utils::logging;
use course_req_parser::{App, Config};

/// 把课程的先修/同修说明解析为逻辑树，并原地写回课程文件
#[derive(Debug, Parser)]
#[command(name = "course-req-parser", version)]
struct Cli {
    /// 课程 JSON 文件
    file: Option<PathBuf>,

    /// 每门课程处理完成后的等待秒数
    #[arg(short, long)]
    delay: Option<f64>,

    /// 重新解析已有逻辑树的课程
    #[arg(short, long)]
    overwrite: bool,

    /// 失败记录文件
    #[arg(long)]
    failure_log: Option<PathBuf>,

    /// TOML 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 输出 debug 日志
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// 命令行参数覆盖配置
    fn apply(self, config: &mut Config) {
        if let Some(file) = self.file {
            config.courses_file = file.to_string_lossy().into_owned();
        }
        if let Some(delay) = self.delay {
            config.request_delay_secs = delay;
        }
        if let Some(path) = self.failure_log {
            config.failure_log_file = path.to_string_lossy().into_owned();
        }
        config.overwrite |= self.overwrite;
        config.verbose_logging |= self.verbose;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let mut config = match &cli.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::from_env()?,
    };
    cli.apply(&mut config);

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let summary = App::initialize(config)?.run().await?;
    if summary.interrupted {
        tracing::warn!("运行被中断，下次运行将从未处理的课程继续");
    }

    Ok(())
}
