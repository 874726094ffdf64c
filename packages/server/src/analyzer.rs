//! Name affinity analysis service.
//!
//! Orchestrates one analysis: prompt the upstream GLM model, then recover
//! the verdict from its reply. An unparsable reply is substituted with a
//! fallback verdict; an upstream failure is propagated so the route layer
//! can show the user a message matching the failure class.

use std::sync::Arc;

use affinity::{extract, fallback, AffinityResult};
use async_trait::async_trait;
use glm_client::{GlmClient, GlmError};
use tracing::{info, warn};

const SYSTEM_PROMPT: &str = "你是一个专业的名字关系分析师。根据用户提供的两个名字，分析它们之间的缘分和相似程度，\
给出一个0-100之间的相似度分数和一段简短的评价。请以严格的JSON格式返回结果，只包含similarity和evaluation两个字段，\
不要使用任何Markdown标记或额外的说明文字。例如：{\"similarity\": 80, \"evaluation\": \"这两个名字很有缘分\"}";

/// Chat-completion surface the analyzer depends on.
///
/// Trait abstraction so tests can script replies and failures instead of
/// reaching the real provider.
#[async_trait]
pub trait BaseChatModel: Send + Sync {
    async fn chat_completion(&self, system: &str, user: &str) -> Result<String, GlmError>;
}

#[async_trait]
impl BaseChatModel for GlmClient {
    async fn chat_completion(&self, system: &str, user: &str) -> Result<String, GlmError> {
        GlmClient::chat_completion(self, system, user).await
    }
}

/// Runs name-pair analyses against the upstream model.
#[derive(Clone)]
pub struct AffinityAnalyzer {
    client: Arc<dyn BaseChatModel>,
}

impl AffinityAnalyzer {
    pub fn new(client: impl BaseChatModel + 'static) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Analyze one name pair.
    ///
    /// Returns `Err` only for upstream failures (transport, rate limit,
    /// balance). A reply that arrives but cannot be parsed always yields a
    /// fallback verdict instead of an error.
    pub async fn analyze(
        &self,
        name1: &str,
        name2: &str,
        client_ip: &str,
    ) -> Result<AffinityResult, GlmError> {
        let prompt = build_prompt(name1, name2);
        let reply = self.client.chat_completion(SYSTEM_PROMPT, &prompt).await?;

        info!(
            client_ip = %client_ip,
            name1 = %name1,
            name2 = %name2,
            reply = %reply,
            "analysis reply received"
        );

        match extract(&reply) {
            Ok(verdict) => Ok(verdict),
            Err(e) => {
                warn!(error = %e, reply = %reply, "unparsable reply, substituting fallback verdict");
                Ok(fallback::generate())
            }
        }
    }
}

/// Build the user prompt for a name pair.
fn build_prompt(name1: &str, name2: &str) -> String {
    format!(
        r#"你是一位融合语言学、汉字文化和冷面笑匠气质的名字分析师。请分析以下两个名字之间的亲密度，要求：
- 基于音律、字形、字义、常见搭配等维度做出真实评估，不强行浪漫
- 相似度分数在0-100之间，合理分布（可低可高）
- 评价要简洁（30字内），允许带一点温和幽默或人间清醒式吐槽（如'像跨服聊天''建议合拍短视频'），但不人身攻击
- 以严格的JSON格式返回，仅包含 similarity 和 evaluation 两个字段

名字1：{name1}
名字2：{name2}

示例输出：
{{"similarity": 78, "evaluation": "音调和谐，建议合开正能量有限公司"}}

现在请分析这对名字，输出JSON："#
    )
}
