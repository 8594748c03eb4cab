use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::Message;
use crate::modules::chat::ports::{ConversationPort, ViewPort};

/// 请求失败时的固定回退回复
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// 发送消息命令
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// 用户输入的原始文本
    pub content: String,
}

impl SendMessageCommand {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// 发送结果
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// 输入为空白，未渲染任何内容也未发起请求
    Ignored,
    /// 机器人已回复
    Delivered {
        user_message: Message,
        bot_message: Message,
        form_revealed: bool,
    },
    /// 请求失败，已渲染回退回复
    Failed {
        user_message: Message,
        fallback: Message,
    },
}

/// 发送消息命令处理器
///
/// 顺序保证：用户消息先于请求渲染；打字指示器在请求未完成期间
/// 保持可见，并在机器人回复（或回退回复）渲染之前移除。
/// 上一次发送未完成时允许再次发送，各次调用互不排队，
/// 响应落地顺序不保证与发起顺序一致
pub struct SendMessageHandler {
    conversation: Arc<dyn ConversationPort>,
    view: Arc<dyn ViewPort>,
}

impl SendMessageHandler {
    pub fn new(conversation: Arc<dyn ConversationPort>, view: Arc<dyn ViewPort>) -> Self {
        Self { conversation, view }
    }

    /// 快捷消息：把预设文本填入输入框后直接发送
    pub async fn handle_quick(&self, text: &str) -> Result<SendOutcome, ApplicationError> {
        self.view.set_input(text);
        self.handle(SendMessageCommand::new(text)).await
    }
}

#[async_trait]
impl CommandHandler<SendMessageCommand, SendOutcome> for SendMessageHandler {
    async fn handle(&self, command: SendMessageCommand) -> Result<SendOutcome, ApplicationError> {
        let content = command.content.trim();
        if content.is_empty() {
            return Ok(SendOutcome::Ignored);
        }

        // 先渲染用户消息，再发起请求
        let user_message = Message::new_user(content);
        self.view.append_message(&user_message);
        self.view.clear_input();
        self.view.set_typing_indicator(true);

        match self.conversation.send_message(content).await {
            Ok(reply) => {
                self.view.set_typing_indicator(false);

                let form_revealed = reply.show_eligibility_form;
                let bot_message = Message::new_bot(reply.text);
                self.view.append_message(&bot_message);

                if form_revealed {
                    self.view.set_form_visible(true);
                }

                Ok(SendOutcome::Delivered {
                    user_message,
                    bot_message,
                    form_revealed,
                })
            }
            Err(e) => {
                tracing::error!("Chat request failed: {}", e);
                self.view.set_typing_indicator(false);

                let fallback = Message::new_bot(FALLBACK_REPLY);
                self.view.append_message(&fallback);

                Ok(SendOutcome::Failed {
                    user_message,
                    fallback,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::MessageSender;
    use crate::modules::chat::infrastructure::{InMemoryView, MockConversationAdapter};

    fn handler(
        mock: Arc<MockConversationAdapter>,
        view: Arc<InMemoryView>,
    ) -> SendMessageHandler {
        SendMessageHandler::new(mock, view)
    }

    #[tokio::test]
    async fn test_empty_message_is_ignored() {
        let mock = Arc::new(MockConversationAdapter::new());
        let view = Arc::new(InMemoryView::new());
        let h = handler(mock.clone(), view.clone());

        let outcome = h.handle(SendMessageCommand::new("   ")).await.unwrap();

        assert!(matches!(outcome, SendOutcome::Ignored));
        assert!(view.messages().is_empty());
        assert_eq!(mock.chat_calls(), 0);
    }

    #[tokio::test]
    async fn test_user_message_rendered_before_bot_reply() {
        let mock = Arc::new(
            MockConversationAdapter::new().with_chat_reply("Deadlines are in January.", false),
        );
        let view = Arc::new(InMemoryView::new());
        let h = handler(mock.clone(), view.clone());

        let outcome = h
            .handle(SendMessageCommand::new("  When is the deadline?  "))
            .await
            .unwrap();

        let messages = view.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender(), MessageSender::User);
        assert_eq!(messages[0].content(), "When is the deadline?");
        assert_eq!(messages[1].sender(), MessageSender::Bot);
        assert_eq!(messages[1].content(), "Deadlines are in January.");

        assert!(matches!(
            outcome,
            SendOutcome::Delivered {
                form_revealed: false,
                ..
            }
        ));
        assert_eq!(mock.chat_calls(), 1);
    }

    #[tokio::test]
    async fn test_input_cleared_and_indicator_removed() {
        let mock = Arc::new(MockConversationAdapter::new());
        let view = Arc::new(InMemoryView::new());
        view.set_input("draft");
        let h = handler(mock, view.clone());

        h.handle(SendMessageCommand::new("draft")).await.unwrap();

        assert_eq!(view.input(), "");
        assert_eq!(view.typing_indicator_count(), 0);
    }

    #[tokio::test]
    async fn test_reply_flag_reveals_eligibility_form() {
        let mock = Arc::new(
            MockConversationAdapter::new()
                .with_chat_reply("Let's check your eligibility!", true),
        );
        let view = Arc::new(InMemoryView::new());
        let h = handler(mock, view.clone());

        let outcome = h
            .handle(SendMessageCommand::new("am i eligible"))
            .await
            .unwrap();

        assert!(view.form_visible());
        assert!(matches!(
            outcome,
            SendOutcome::Delivered {
                form_revealed: true,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_renders_fallback_reply() {
        let mock = Arc::new(MockConversationAdapter::new().failing());
        let view = Arc::new(InMemoryView::new());
        let h = handler(mock.clone(), view.clone());

        let outcome = h.handle(SendMessageCommand::new("hello")).await.unwrap();

        let messages = view.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content(), "hello");
        assert_eq!(messages[1].content(), FALLBACK_REPLY);
        assert!(messages[1].is_bot());
        assert_eq!(view.typing_indicator_count(), 0);
        assert!(matches!(outcome, SendOutcome::Failed { .. }));
        assert_eq!(mock.chat_calls(), 1);
    }

    #[tokio::test]
    async fn test_quick_message_populates_input_then_sends() {
        let mock = Arc::new(MockConversationAdapter::new());
        let view = Arc::new(InMemoryView::new());
        let h = handler(mock.clone(), view.clone());

        h.handle_quick("How do I apply?").await.unwrap();

        // 输入框先被填入再被清空，消息正常发出
        assert_eq!(view.input(), "");
        assert_eq!(view.messages()[0].content(), "How do I apply?");
        assert_eq!(mock.chat_calls(), 1);
    }
}
