pub mod bits;
pub mod constants;
pub mod error;
pub mod flag;
pub mod mask;

pub use error::SeqError;
pub use flag::Flag;
pub use mask::FlagMask;
