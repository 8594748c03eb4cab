use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::value_objects::MessageId;

/// 消息发送方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    /// 用户消息
    User,
    /// 机器人消息
    Bot,
}

/// 消息实体
///
/// 消息列表中的一条消息。创建后不可变，渲染顺序由追加顺序决定；
/// 重置会话时随消息列表整体丢弃，不做任何持久化
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// 消息唯一标识
    id: MessageId,
    /// 发送方
    sender: MessageSender,
    /// 消息内容（原始文本，渲染时再转换为富文本段）
    content: String,
    /// 创建时间
    created_at: DateTime<Utc>,
}

impl Message {
    /// 创建用户消息
    pub fn new_user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender: MessageSender::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// 创建机器人消息
    pub fn new_bot(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender: MessageSender::Bot,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    // Getters
    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn sender(&self) -> MessageSender {
        self.sender
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_bot(&self) -> bool {
        self.sender == MessageSender::Bot
    }
}
