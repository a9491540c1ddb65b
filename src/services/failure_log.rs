//! 失败记录存储 - 业务能力层
//!
//! 记录解析失败的课程编号，跨运行持久化，下次运行时直接跳过。
//! 文件格式为每行一个课程编号。

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 失败课程集合
#[derive(Debug, Clone, Default)]
pub struct FailureLog {
    path: PathBuf,
    ids: BTreeSet<String>,
}

impl FailureLog {
    /// 创建一个空的失败记录（不读取文件）
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ids: BTreeSet::new(),
        }
    }

    /// 读取失败记录，文件不存在时返回空集合
    pub async fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("失败记录文件不存在: {}", path.display());
                return Ok(Self::empty(path));
            }
            Err(e) => return Err(AppError::file_read_failed(path.display().to_string(), e)),
        };

        let ids = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self { path, ids })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// 记录一个失败的课程，返回是否是新记录
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 覆盖写入失败记录文件
    pub async fn save(&self) -> AppResult<()> {
        let mut content = String::new();
        for id in &self.ids {
            content.push_str(id);
            content.push('\n');
        }

        fs::write(&self.path, content)
            .await
            .map_err(|e| AppError::file_write_failed(self.path.display().to_string(), e))?;

        debug!("已写入 {} 条失败记录: {}", self.ids.len(), self.path.display());
        Ok(())
    }
}
