mod markup;

pub use markup::{MarkupRenderer, MarkupSegment};
