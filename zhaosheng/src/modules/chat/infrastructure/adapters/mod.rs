mod http_conversation;
mod mock_conversation;

pub use http_conversation::HttpConversationAdapter;
pub use mock_conversation::MockConversationAdapter;
