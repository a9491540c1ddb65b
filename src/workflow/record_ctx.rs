//! 课程处理上下文
//!
//! 封装"我正在处理第几门课程"这一信息，只用于日志

use std::fmt::Display;

/// 课程处理上下文
#[derive(Debug, Clone)]
pub struct RecordCtx {
    /// 课程编号
    pub course_id: String,

    /// 课程在集合中的位置（从1开始）
    pub record_index: usize,

    /// 课程总数
    pub total: usize,
}

impl RecordCtx {
    pub fn new(course_id: impl Into<String>, record_index: usize, total: usize) -> Self {
        Self {
            course_id: course_id.into(),
            record_index,
            total,
        }
    }
}

impl Display for RecordCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}/{} {}]", self.record_index, self.total, self.course_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(RecordCtx::new("COMP250", 3, 10).to_string(), "[3/10 COMP250]");
    }
}
