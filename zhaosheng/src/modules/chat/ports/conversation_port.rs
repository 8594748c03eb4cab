use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 会话服务错误类型
#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("Service error: {code} - {message}")]
    Api { code: String, message: String },

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// 聊天回复
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    /// 机器人回复文本
    pub text: String,
    /// 是否展开资格核查表单
    pub show_eligibility_form: bool,
}

/// 资格核查请求
///
/// 从表单字段构造，提交后即丢弃，不做保存
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityQuery {
    pub level: String,
    pub gpa: String,
    pub test_type: String,
    pub test_score: String,
}

impl EligibilityQuery {
    pub fn new(
        level: impl Into<String>,
        gpa: impl Into<String>,
        test_type: impl Into<String>,
        test_score: impl Into<String>,
    ) -> Self {
        Self {
            level: level.into(),
            gpa: gpa.into(),
            test_type: test_type.into(),
            test_score: test_score.into(),
        }
    }

    /// 四个字段是否都已填写
    pub fn is_complete(&self) -> bool {
        !(self.level.is_empty()
            || self.gpa.is_empty()
            || self.test_type.is_empty()
            || self.test_score.is_empty())
    }
}

/// 资格核查结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EligibilityReport {
    /// 服务端完成判定
    Assessed { eligible: bool, message: String },
    /// 服务端拒绝请求（业务错误，非传输失败）
    Rejected { message: String },
}

/// 会话服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationServiceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ConversationServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// 会话服务端口 - 核心抽象接口
///
/// 客户端对后端招生会话服务的全部依赖都经过这个 trait。
/// 服务端在客户端视角下是无状态的：每次调用独立完成，
/// 不做重试，也不做请求排序
#[async_trait]
pub trait ConversationPort: Send + Sync {
    /// 发送一条用户消息，返回机器人回复
    async fn send_message(&self, message: &str) -> Result<ChatReply, ConversationError>;

    /// 提交资格核查表单
    async fn check_eligibility(
        &self,
        query: &EligibilityQuery,
    ) -> Result<EligibilityReport, ConversationError>;

    /// 重置服务端会话状态
    async fn reset(&self) -> Result<(), ConversationError>;
}
