// Chat Infrastructure Layer
// 基础设施层实现端口的具体适配器

pub mod adapters;
pub mod views;

pub use adapters::{HttpConversationAdapter, MockConversationAdapter};
pub use views::{InMemoryView, TerminalView};
