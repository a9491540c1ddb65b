use std::path::Path;

use tokio::fs;

use crate::error::{AppError, AppResult};
use crate::models::course::CourseRecord;

/// 从 JSON 文件加载课程集合
pub async fn load_courses(path: &Path) -> AppResult<Vec<CourseRecord>> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let courses: Vec<CourseRecord> =
        serde_json::from_str(&content).map_err(|e| AppError::json_failed(&path_str, e))?;

    tracing::info!("成功加载 {} 门课程: {}", courses.len(), path_str);
    Ok(courses)
}

/// 将课程集合原地写回 JSON 文件
///
/// 先写入同目录下的临时文件再重命名，写入中途失败不会破坏原文件。
pub async fn save_courses(path: &Path, courses: &[CourseRecord]) -> AppResult<()> {
    let path_str = path.display().to_string();
    let content =
        serde_json::to_string_pretty(courses).map_err(|e| AppError::json_failed(&path_str, e))?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, content)
        .await
        .map_err(|e| AppError::file_write_failed(tmp_path.display().to_string(), e))?;
    fs::rename(&tmp_path, path)
        .await
        .map_err(|e| AppError::file_write_failed(&path_str, e))?;

    tracing::info!("已保存 {} 门课程至: {}", courses.len(), path_str);
    Ok(())
}
