// Chat Application Layer - 应用层
// 实现 CQRS 模式的命令处理器

pub mod commands;

pub use commands::*;

use async_trait::async_trait;
use thiserror::Error;

use super::ports::ConversationError;

/// 应用层错误类型
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conversation error: {0}")]
    ConversationError(#[from] ConversationError),
}

/// 命令处理器 trait
///
/// 遵循 CQRS 模式，命令处理器负责执行有副作用的操作。
/// 传输层失败不会作为错误向上传播：处理器自己把失败渲染到视图，
/// 并在返回值里描述发生了什么
#[async_trait]
pub trait CommandHandler<C, R>: Send + Sync
where
    C: Send + Sync,
{
    /// 执行命令
    async fn handle(&self, command: C) -> Result<R, ApplicationError>;
}
