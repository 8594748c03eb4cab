pub mod modules;
pub mod shared;

pub use modules::chat::ChatModule;
