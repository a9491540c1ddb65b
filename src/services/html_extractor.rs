//! HTML 需求文本提取 - 业务能力层
//!
//! 把课程需求的 HTML 片段转换为纯文本：课程链接替换为课程代码，
//! 其余内容保留原文（包括 "or"、"and" 和标点）。

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

use crate::error::{AppResult, HtmlError};
use crate::models::CourseCode;

static ROOT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div[data-requisite-root]").expect("valid selector"));

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("valid selector"));

/// 提取需求纯文本
///
/// 只遍历根容器的直接子节点：`<a>` 替换为链接中解码出的课程代码，
/// 其他节点取其全部文本。
pub fn extract(html: &str) -> AppResult<String> {
    let document = Html::parse_fragment(&format!("<div data-requisite-root>{html}</div>"));
    let root = document
        .select(&ROOT_SELECTOR)
        .next()
        .ok_or_else(|| HtmlError::Structural {
            fragment: html.to_string(),
        })?;

    let mut text = String::new();
    for child in root.children() {
        match child.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(_) => {
                let Some(element) = ElementRef::wrap(child) else {
                    continue;
                };
                if element.value().name() == "a" {
                    match code_from_link(&element) {
                        Some(code) => text.push_str(&code),
                        None => text.extend(element.text()),
                    }
                } else {
                    text.extend(element.text());
                }
            }
            _ => {}
        }
    }

    debug!("提取需求文本: {}", text);
    Ok(text)
}

/// 按出现顺序列出片段中所有链接指向的课程代码（去重，只保留合法代码）
pub fn extract_codes(html: &str) -> Vec<CourseCode> {
    let document = Html::parse_fragment(html);

    let mut seen = HashSet::new();
    document
        .select(&LINK_SELECTOR)
        .filter_map(|link| code_from_link(&link))
        .filter_map(|code| CourseCode::parse(&code))
        .filter(|code| seen.insert(code.clone()))
        .collect()
}

/// 从链接地址解码课程代码：取最后一段路径，转大写，`-` 换成空格
///
/// `/courses/comp-202` → `COMP 202`
fn code_from_link(link: &ElementRef) -> Option<String> {
    let href = link.value().attr("href")?;
    let segment = href
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())?;
    Some(segment.to_ascii_uppercase().replace('-', " "))
}
