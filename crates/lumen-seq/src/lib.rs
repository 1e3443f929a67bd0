pub mod codec;
pub mod parse;
pub mod sequence;
pub mod words;

pub use sequence::Sequence;
pub use words::SeqWords;
