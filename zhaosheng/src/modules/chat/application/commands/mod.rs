mod check_eligibility;
mod reset_conversation;
mod send_message;

pub use check_eligibility::*;
pub use reset_conversation::*;
pub use send_message::*;
