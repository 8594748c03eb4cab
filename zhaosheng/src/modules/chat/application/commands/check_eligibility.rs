use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::Message;
use crate::modules::chat::ports::{
    ConversationPort, EligibilityQuery, EligibilityReport, ResultPanel, ResultTone, ViewPort,
};

/// 表单校验失败提示
pub const VALIDATION_ALERT: &str = "Please fill in all fields";

/// 核查请求失败时结果面板的固定文案
pub const CHECK_FAILED_TEXT: &str = "Error checking eligibility. Please try again.";

/// 核查结果镜像到聊天记录时的前缀
pub const CHAT_MIRROR_PREFIX: &str = "📊 Eligibility Check Result: ";

/// 资格核查命令
#[derive(Debug, Clone)]
pub struct CheckEligibilityCommand {
    pub query: EligibilityQuery,
}

impl CheckEligibilityCommand {
    pub fn new(query: EligibilityQuery) -> Self {
        Self { query }
    }
}

/// 核查结果
#[derive(Debug, Clone)]
pub enum CheckOutcome {
    /// 服务端完成判定；结果已渲染到面板并镜像到聊天记录
    Assessed {
        eligible: bool,
        message: String,
        mirror: Message,
    },
    /// 服务端拒绝请求，仅渲染在结果面板
    Rejected { message: String },
    /// 请求失败，已渲染固定错误文案
    Failed,
}

/// 资格核查命令处理器
pub struct CheckEligibilityHandler {
    conversation: Arc<dyn ConversationPort>,
    view: Arc<dyn ViewPort>,
}

impl CheckEligibilityHandler {
    pub fn new(conversation: Arc<dyn ConversationPort>, view: Arc<dyn ViewPort>) -> Self {
        Self { conversation, view }
    }
}

#[async_trait]
impl CommandHandler<CheckEligibilityCommand, CheckOutcome> for CheckEligibilityHandler {
    async fn handle(
        &self,
        command: CheckEligibilityCommand,
    ) -> Result<CheckOutcome, ApplicationError> {
        // 校验失败就地提示，不发起请求
        if !command.query.is_complete() {
            self.view.alert(VALIDATION_ALERT);
            return Err(ApplicationError::ValidationError(
                "All eligibility fields are required".to_string(),
            ));
        }

        self.view.set_result_panel(ResultPanel::Loading);

        match self.conversation.check_eligibility(&command.query).await {
            Ok(EligibilityReport::Assessed { eligible, message }) => {
                let tone = if eligible {
                    ResultTone::Success
                } else {
                    ResultTone::Caution
                };
                self.view.set_result_panel(ResultPanel::Verdict {
                    tone,
                    text: message.clone(),
                });

                // 同一结果镜像到主聊天记录
                let mirror = Message::new_bot(format!("{}{}", CHAT_MIRROR_PREFIX, message));
                self.view.append_message(&mirror);

                Ok(CheckOutcome::Assessed {
                    eligible,
                    message,
                    mirror,
                })
            }
            Ok(EligibilityReport::Rejected { message }) => {
                self.view.set_result_panel(ResultPanel::Verdict {
                    tone: ResultTone::Error,
                    text: format!("Error: {}", message),
                });

                Ok(CheckOutcome::Rejected { message })
            }
            Err(e) => {
                tracing::error!("Eligibility request failed: {}", e);
                self.view.set_result_panel(ResultPanel::Verdict {
                    tone: ResultTone::Error,
                    text: CHECK_FAILED_TEXT.to_string(),
                });

                Ok(CheckOutcome::Failed)
            }
        }
    }
}
