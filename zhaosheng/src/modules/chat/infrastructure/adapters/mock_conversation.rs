use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::modules::chat::ports::{
    ChatReply, ConversationError, ConversationPort, EligibilityQuery, EligibilityReport,
};

/// Mock 会话服务适配器
///
/// 用于开发和测试：返回预设回复，可模拟传输失败，并记录调用次数
pub struct MockConversationAdapter {
    chat_reply: ChatReply,
    eligibility_report: EligibilityReport,
    fail: bool,
    chat_calls: AtomicUsize,
    eligibility_calls: AtomicUsize,
    reset_calls: AtomicUsize,
}

impl MockConversationAdapter {
    pub fn new() -> Self {
        Self {
            chat_reply: ChatReply {
                text: "How can I help you with your admission questions today?".to_string(),
                show_eligibility_form: false,
            },
            eligibility_report: EligibilityReport::Assessed {
                eligible: true,
                message: "✅ You are eligible for: Computer Science".to_string(),
            },
            fail: false,
            chat_calls: AtomicUsize::new(0),
            eligibility_calls: AtomicUsize::new(0),
            reset_calls: AtomicUsize::new(0),
        }
    }

    /// 设置聊天回复
    pub fn with_chat_reply(mut self, text: impl Into<String>, show_form: bool) -> Self {
        self.chat_reply = ChatReply {
            text: text.into(),
            show_eligibility_form: show_form,
        };
        self
    }

    /// 设置资格核查结果
    pub fn with_eligibility_report(mut self, report: EligibilityReport) -> Self {
        self.eligibility_report = report;
        self
    }

    /// 所有调用都返回网络错误
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    // 调用计数
    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    pub fn eligibility_calls(&self) -> usize {
        self.eligibility_calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) -> usize {
        self.reset_calls.load(Ordering::SeqCst)
    }

    fn fail_if_configured(&self) -> Result<(), ConversationError> {
        if self.fail {
            Err(ConversationError::Network(
                "connection refused (mock)".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl Default for MockConversationAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationPort for MockConversationAdapter {
    async fn send_message(&self, _message: &str) -> Result<ChatReply, ConversationError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if_configured()?;
        Ok(self.chat_reply.clone())
    }

    async fn check_eligibility(
        &self,
        _query: &EligibilityQuery,
    ) -> Result<EligibilityReport, ConversationError> {
        self.eligibility_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if_configured()?;
        Ok(self.eligibility_report.clone())
    }

    async fn reset(&self) -> Result<(), ConversationError> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        self.fail_if_configured()
    }
}
