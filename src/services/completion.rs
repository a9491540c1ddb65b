//! 文本补全服务边界
//!
//! 核心流程只依赖"提交系统指令和文本，取回文本"这一种能力，
//! 不关心具体的服务商和请求格式。

use crate::error::AppResult;

/// 文本补全客户端
#[allow(async_fn_in_trait)]
pub trait CompletionClient {
    /// 发送一次补全请求
    ///
    /// 服务没有返回任何内容时返回 `Ok(None)`。
    async fn complete(&self, system_message: &str, user_message: &str)
        -> AppResult<Option<String>>;
}

impl<C: CompletionClient> CompletionClient for &C {
    async fn complete(
        &self,
        system_message: &str,
        user_message: &str,
    ) -> AppResult<Option<String>> {
        (**self).complete(system_message, user_message).await
    }
}
