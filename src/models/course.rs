use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::req_tree::ReqNode;

/// 需求类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requisite {
    Prerequisites,
    Corequisites,
}

impl Requisite {
    pub const ALL: [Requisite; 2] = [Requisite::Prerequisites, Requisite::Corequisites];

    pub fn label(&self) -> &'static str {
        match self {
            Requisite::Prerequisites => "先修",
            Requisite::Corequisites => "同修",
        }
    }
}

/// 课程记录
///
/// 只声明本程序读写的字段，其余字段原样保留，保证整个集合可以无损写回。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    #[serde(rename = "_id")]
    pub id: String,
    /// 需求文本中链接到的课程编号列表
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corequisites: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corequisites_text: Option<String>,
    #[serde(default)]
    pub logical_prerequisites: Option<ReqNode>,
    #[serde(default)]
    pub logical_corequisites: Option<ReqNode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CourseRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// 原始 HTML 文本，空白字符串视为不存在
    pub fn requisite_text(&self, kind: Requisite) -> Option<&str> {
        let text = match kind {
            Requisite::Prerequisites => self.prerequisites_text.as_deref(),
            Requisite::Corequisites => self.corequisites_text.as_deref(),
        };
        text.filter(|t| !t.trim().is_empty())
    }

    /// 需要解析的需求文本
    ///
    /// 有链接列表时以列表为准：列表为空说明文本里没有任何课程，不必请求模型。
    /// 没有链接列表时只看文本。
    pub fn pending_text(&self, kind: Requisite) -> Option<&str> {
        let links = match kind {
            Requisite::Prerequisites => self.prerequisites.as_deref(),
            Requisite::Corequisites => self.corequisites.as_deref(),
        };
        match links {
            Some([]) => None,
            _ => self.requisite_text(kind),
        }
    }

    pub fn set_logical(&mut self, kind: Requisite, tree: Option<ReqNode>) {
        match kind {
            Requisite::Prerequisites => self.logical_prerequisites = tree,
            Requisite::Corequisites => self.logical_corequisites = tree,
        }
    }

    pub fn logical(&self, kind: Requisite) -> Option<&ReqNode> {
        match kind {
            Requisite::Prerequisites => self.logical_prerequisites.as_ref(),
            Requisite::Corequisites => self.logical_corequisites.as_ref(),
        }
    }

    /// 是否已经有解析好的先修或同修树
    pub fn is_parsed(&self) -> bool {
        self.logical_prerequisites.is_some() || self.logical_corequisites.is_some()
    }

    /// 是否没有任何需要解析的需求
    pub fn has_no_requisites(&self) -> bool {
        Requisite::ALL
            .iter()
            .all(|kind| self.pending_text(*kind).is_none())
    }
}
