mod message_id;

pub use message_id::MessageId;
