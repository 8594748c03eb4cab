// Chat Module - 聊天模块
//
// 实现六边形架构（Hexagonal Architecture）：
// - domain: 领域层，包含消息实体、值对象和渲染服务
// - ports: 端口层，定义会话服务和渲染表面的抽象接口
// - infrastructure: 基础设施层，实现端口的具体适配器
// - application: 应用层，实现 CQRS 命令处理器

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// 重新导出常用类型
pub use application::{
    // Traits
    ApplicationError,
    CommandHandler,
    // Commands
    CheckEligibilityCommand,
    CheckEligibilityHandler,
    CheckOutcome,
    ResetConversationCommand,
    ResetConversationHandler,
    ResetOutcome,
    SendMessageCommand,
    SendMessageHandler,
    SendOutcome,
    // Fixed copy
    CHAT_MIRROR_PREFIX,
    CHECK_FAILED_TEXT,
    FALLBACK_REPLY,
    VALIDATION_ALERT,
    WELCOME_TEXT,
};

pub use domain::{MarkupRenderer, MarkupSegment, Message, MessageId, MessageSender};

pub use infrastructure::{
    HttpConversationAdapter, InMemoryView, MockConversationAdapter, TerminalView,
};

pub use ports::{
    ChatReply, ConversationError, ConversationPort, ConversationServiceConfig, EligibilityQuery,
    EligibilityReport, ResultPanel, ResultTone, ViewPort,
};

use std::sync::Arc;

/// 会话初始的机器人问候语
pub const GREETING_TEXT: &str =
    "Hello! I'm the University Admissions Bot. How can I help you with your admission questions today?";

/// Chat 模块容器
///
/// 管理模块内的依赖注入
pub struct ChatModule {
    conversation: Arc<dyn ConversationPort>,
    view: Arc<dyn ViewPort>,
    // Handlers
    send_message_handler: SendMessageHandler,
    check_eligibility_handler: CheckEligibilityHandler,
    reset_conversation_handler: ResetConversationHandler,
}

impl ChatModule {
    /// 使用自定义端口创建 ChatModule
    pub fn new(conversation: Arc<dyn ConversationPort>, view: Arc<dyn ViewPort>) -> Self {
        let send_message_handler =
            SendMessageHandler::new(conversation.clone(), view.clone());
        let check_eligibility_handler =
            CheckEligibilityHandler::new(conversation.clone(), view.clone());
        let reset_conversation_handler =
            ResetConversationHandler::new(conversation.clone(), view.clone());

        Self {
            conversation,
            view,
            send_message_handler,
            check_eligibility_handler,
            reset_conversation_handler,
        }
    }

    /// 通过 HTTP 适配器连接招生会话服务
    pub fn with_http(
        config: ConversationServiceConfig,
        view: Arc<dyn ViewPort>,
    ) -> Result<Self, ApplicationError> {
        let adapter = HttpConversationAdapter::new(config)?;
        Ok(Self::new(Arc::new(adapter), view))
    }

    /// 渲染初始问候语
    pub fn greet(&self) {
        self.view.append_message(&Message::new_bot(GREETING_TEXT));
    }

    // Command handlers

    /// 发送消息
    pub async fn send_message(
        &self,
        content: impl Into<String> + Send,
    ) -> Result<SendOutcome, ApplicationError> {
        self.send_message_handler
            .handle(SendMessageCommand::new(content))
            .await
    }

    /// 发送快捷消息（预设建议按钮）
    pub async fn send_quick_message(&self, text: &str) -> Result<SendOutcome, ApplicationError> {
        self.send_message_handler.handle_quick(text).await
    }

    /// 资格核查
    pub async fn check_eligibility(
        &self,
        query: EligibilityQuery,
    ) -> Result<CheckOutcome, ApplicationError> {
        self.check_eligibility_handler
            .handle(CheckEligibilityCommand::new(query))
            .await
    }

    /// 重置会话
    pub async fn reset_conversation(&self) -> Result<ResetOutcome, ApplicationError> {
        self.reset_conversation_handler
            .handle(ResetConversationCommand)
            .await
    }

    /// 显示资格核查表单
    pub fn show_eligibility_form(&self) {
        self.view.set_form_visible(true);
    }

    /// 隐藏资格核查表单（字段和结果面板由视图一并清空）
    pub fn hide_eligibility_form(&self) {
        self.view.set_form_visible(false);
    }

    // Accessors

    pub fn view(&self) -> &Arc<dyn ViewPort> {
        &self.view
    }

    pub fn conversation(&self) -> &Arc<dyn ConversationPort> {
        &self.conversation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_chat_module_integration() {
        let mock = Arc::new(
            MockConversationAdapter::new().with_chat_reply("Let's check your eligibility!", true),
        );
        let view = Arc::new(InMemoryView::new());
        let module = ChatModule::new(mock.clone(), view.clone());

        // 问候语
        module.greet();
        assert_eq!(view.messages().len(), 1);

        // 发送消息后表单展开
        module.send_message("am i eligible").await.unwrap();
        assert_eq!(view.messages().len(), 3);
        assert!(view.form_visible());

        // 填表并核查：结果面板 + 聊天镜像
        view.fill_form("undergraduate", "3.4", "sat", "1280");
        let outcome = module
            .check_eligibility(EligibilityQuery::new("undergraduate", "3.4", "sat", "1280"))
            .await
            .unwrap();
        assert!(matches!(outcome, CheckOutcome::Assessed { .. }));
        assert_eq!(view.messages().len(), 4);

        // 重置：只剩欢迎消息，表单隐藏且已清空
        module.reset_conversation().await.unwrap();
        let messages = view.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content(), WELCOME_TEXT);
        assert!(!view.form_visible());
        assert_eq!(
            view.form_fields(),
            (String::new(), String::new(), String::new(), String::new())
        );
        assert_eq!(mock.reset_calls(), 1);

        // 手动切换表单可见性
        module.show_eligibility_form();
        assert!(view.form_visible());
        module.hide_eligibility_form();
        assert!(!view.form_visible());
    }
}
