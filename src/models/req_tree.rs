//! 先修/同修课程的逻辑树
//!
//! 叶子是课程代码，分组节点持有 AND/OR 运算符和至少两个子节点。

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::course_code::CourseCode;

/// 逻辑运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl Operator {
    /// 模型输出中的运算符标记：`&` 或 `|`
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "&" => Some(Self::And),
            "|" => Some(Self::Or),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => f.write_str("AND"),
            Operator::Or => f.write_str("OR"),
        }
    }
}

/// 规范化后的逻辑树
///
/// 序列化为带类型标记的格式：
/// `{"type": "course", "data": "COMP 202"}` 与
/// `{"type": "group", "data": {"operator": "OR", "groups": [...]}}`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum ReqNode {
    Course(CourseCode),
    Group {
        operator: Operator,
        groups: Vec<ReqNode>,
    },
}

impl<'de> Deserialize<'de> for ReqNode {
    /// 同时接受带类型标记的新格式和旧的无标记格式
    /// （`"COMP 202"` / `{"operator": "AND", "groups": [...]}`）。
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct GroupData {
            operator: Operator,
            groups: Vec<ReqNode>,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase", tag = "type", content = "data")]
        enum Tagged {
            Course(CourseCode),
            Group(GroupData),
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Legacy {
            Course(CourseCode),
            Group(GroupData),
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Tagged(Tagged),
            Legacy(Legacy),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Tagged(Tagged::Course(code)) | Repr::Legacy(Legacy::Course(code)) => {
                ReqNode::Course(code)
            }
            Repr::Tagged(Tagged::Group(GroupData { operator, groups }))
            | Repr::Legacy(Legacy::Group(GroupData { operator, groups })) => {
                ReqNode::Group { operator, groups }
            }
        })
    }
}

impl ReqNode {
    /// 按规则构造分组：0 个子节点为空，1 个子节点直接折叠为该子节点
    pub fn group(operator: Operator, groups: Vec<ReqNode>) -> Option<ReqNode> {
        let mut groups = groups;
        match groups.len() {
            0 => None,
            1 => groups.pop(),
            _ => Some(ReqNode::Group { operator, groups }),
        }
    }

    /// 对已有的树重新规范化
    ///
    /// 对已经规范化的树是幂等的。
    pub fn normalize(self) -> Option<ReqNode> {
        match self {
            ReqNode::Course(code) => Some(ReqNode::Course(code)),
            ReqNode::Group { operator, groups } => ReqNode::group(
                operator,
                groups.into_iter().filter_map(ReqNode::normalize).collect(),
            ),
        }
    }

    /// 按出现顺序列出所有叶子课程代码（去重）
    pub fn courses(&self) -> Vec<&CourseCode> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        self.collect_courses(&mut seen, &mut out);
        out
    }

    fn collect_courses<'a>(
        &'a self,
        seen: &mut HashSet<&'a CourseCode>,
        out: &mut Vec<&'a CourseCode>,
    ) {
        match self {
            ReqNode::Course(code) => {
                if seen.insert(code) {
                    out.push(code);
                }
            }
            ReqNode::Group { groups, .. } => {
                for child in groups {
                    child.collect_courses(seen, out);
                }
            }
        }
    }
}

impl fmt::Display for ReqNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReqNode::Course(code) => write!(f, "{code}"),
            ReqNode::Group { operator, groups } => {
                f.write_str("(")?;
                for (i, child) in groups.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {operator} ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn course(code: &str) -> ReqNode {
        ReqNode::Course(CourseCode::parse(code).unwrap())
    }

    fn sample() -> ReqNode {
        ReqNode::Group {
            operator: Operator::Or,
            groups: vec![
                course("COMP 451"),
                course("COMP 551"),
                ReqNode::Group {
                    operator: Operator::And,
                    groups: vec![course("MATH 222"), course("MATH 223")],
                },
            ],
        }
    }

    #[test]
    fn test_serializes_tagged() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "group",
                "data": {
                    "operator": "OR",
                    "groups": [
                        {"type": "course", "data": "COMP 451"},
                        {"type": "course", "data": "COMP 551"},
                        {"type": "group", "data": {
                            "operator": "AND",
                            "groups": [
                                {"type": "course", "data": "MATH 222"},
                                {"type": "course", "data": "MATH 223"}
                            ]
                        }}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_deserializes_tagged_and_legacy() {
        let tagged = serde_json::to_string(&sample()).unwrap();
        assert_eq!(serde_json::from_str::<ReqNode>(&tagged).unwrap(), sample());

        let legacy = json!({
            "operator": "OR",
            "groups": ["COMP 451", "COMP 551", {"operator": "AND", "groups": ["MATH 222", "MATH 223"]}]
        });
        assert_eq!(serde_json::from_value::<ReqNode>(legacy).unwrap(), sample());
    }

    #[test]
    fn test_deserialize_rejects_invalid_code() {
        assert!(serde_json::from_value::<ReqNode>(json!("not a code")).is_err());
    }

    #[test]
    fn test_group_collapses_degenerate() {
        assert_eq!(ReqNode::group(Operator::And, vec![]), None);
        assert_eq!(
            ReqNode::group(Operator::And, vec![course("COMP 202")]),
            Some(course("COMP 202"))
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let tree = sample();
        let once = tree.clone().normalize().unwrap();
        assert_eq!(once, tree);
        assert_eq!(once.clone().normalize().unwrap(), once);
    }

    #[test]
    fn test_normalize_collapses_hand_built_degenerate_groups() {
        let tree = ReqNode::Group {
            operator: Operator::And,
            groups: vec![
                ReqNode::Group {
                    operator: Operator::Or,
                    groups: vec![],
                },
                ReqNode::Group {
                    operator: Operator::Or,
                    groups: vec![course("COMP 202")],
                },
            ],
        };
        assert_eq!(tree.normalize(), Some(course("COMP 202")));
    }

    #[test]
    fn test_courses_and_display() {
        let mut tree = sample();
        if let ReqNode::Group { groups, .. } = &mut tree {
            groups.push(course("COMP 451"));
        }
        let codes: Vec<&str> = tree.courses().iter().map(|c| c.as_str()).collect();
        assert_eq!(codes, ["COMP 451", "COMP 551", "MATH 222", "MATH 223"]);
        assert_eq!(
            sample().to_string(),
            "(COMP 451 OR COMP 551 OR (MATH 222 AND MATH 223))"
        );
    }
}
