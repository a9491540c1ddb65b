//! 课程代码语法
//!
//! 形如 `COMP 202`、`MATH 262D1`：四位大写字母或数字、一个空格、三位数字，
//! 可选后缀取自固定集合。必须整串匹配。

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static COURSE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]{4} [0-9]{3}(?:D1|D2|N1|N2|J1|J2|J3)?$").expect("valid regex")
});

/// 判断字符串是否是合法的课程代码
pub fn is_valid_code(s: &str) -> bool {
    COURSE_CODE_RE.is_match(s)
}

/// 经过校验的课程代码
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseCode(String);

impl CourseCode {
    /// 校验并构造课程代码，不合法时返回 `None`
    pub fn parse(s: &str) -> Option<Self> {
        is_valid_code(s).then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CourseCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CourseCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CourseCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CourseCode::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid course code: {raw}")))
    }
}
