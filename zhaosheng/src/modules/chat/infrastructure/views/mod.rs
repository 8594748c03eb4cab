mod in_memory;
mod terminal;

pub use in_memory::InMemoryView;
pub use terminal::TerminalView;
