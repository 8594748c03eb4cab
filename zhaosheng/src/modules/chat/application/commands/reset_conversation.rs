use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::Message;
use crate::modules::chat::ports::{ConversationPort, ViewPort};

/// 重置后的固定欢迎消息
pub const WELCOME_TEXT: &str =
    "🎓 Welcome back! I'm the University Admissions Bot.\nHow can I help you today? 😊";

/// 重置会话命令
#[derive(Debug, Clone, Default)]
pub struct ResetConversationCommand;

/// 重置结果
#[derive(Debug, Clone)]
pub enum ResetOutcome {
    /// 会话已重置，消息列表只剩欢迎消息
    Completed { welcome: Message },
    /// 请求失败；界面保持原状，失败只记录日志
    Failed,
}

/// 重置会话命令处理器
pub struct ResetConversationHandler {
    conversation: Arc<dyn ConversationPort>,
    view: Arc<dyn ViewPort>,
}

impl ResetConversationHandler {
    pub fn new(conversation: Arc<dyn ConversationPort>, view: Arc<dyn ViewPort>) -> Self {
        Self { conversation, view }
    }
}

#[async_trait]
impl CommandHandler<ResetConversationCommand, ResetOutcome> for ResetConversationHandler {
    async fn handle(
        &self,
        _command: ResetConversationCommand,
    ) -> Result<ResetOutcome, ApplicationError> {
        match self.conversation.reset().await {
            Ok(()) => {
                let welcome = Message::new_bot(WELCOME_TEXT);
                self.view.clear_messages();
                self.view.append_message(&welcome);
                // 隐藏表单时由视图同步清空字段和结果面板
                self.view.set_form_visible(false);

                Ok(ResetOutcome::Completed { welcome })
            }
            Err(e) => {
                // 与其它操作不同，重置失败不向用户展示任何内容
                tracing::error!("Reset request failed: {}", e);
                Ok(ResetOutcome::Failed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::ports::ResultPanel;
    use crate::modules::chat::infrastructure::{InMemoryView, MockConversationAdapter};

    fn populated_view() -> Arc<InMemoryView> {
        let view = Arc::new(InMemoryView::new());
        view.append_message(&Message::new_bot("Hello!"));
        view.append_message(&Message::new_user("hi"));
        view.set_form_visible(true);
        view.fill_form("undergraduate", "3.0", "sat", "1200");
        view
    }

    #[tokio::test]
    async fn test_reset_leaves_single_welcome_message() {
        let mock = Arc::new(MockConversationAdapter::new());
        let view = populated_view();
        let h = ResetConversationHandler::new(mock.clone(), view.clone());

        let outcome = h.handle(ResetConversationCommand).await.unwrap();

        let messages = view.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].is_bot());
        assert_eq!(messages[0].content(), WELCOME_TEXT);

        assert!(!view.form_visible());
        assert_eq!(
            view.form_fields(),
            (String::new(), String::new(), String::new(), String::new())
        );
        assert_eq!(view.result_panel(), ResultPanel::Empty);

        assert!(matches!(outcome, ResetOutcome::Completed { .. }));
        assert_eq!(mock.reset_calls(), 1);
    }

    #[tokio::test]
    async fn test_reset_failure_leaves_view_untouched() {
        let mock = Arc::new(MockConversationAdapter::new().failing());
        let view = populated_view();
        let h = ResetConversationHandler::new(mock, view.clone());

        let outcome = h.handle(ResetConversationCommand).await.unwrap();

        // 失败只记录日志，现有内容原样保留
        assert_eq!(view.messages().len(), 2);
        assert!(view.form_visible());
        assert!(matches!(outcome, ResetOutcome::Failed));
    }
}
