pub mod options;
pub mod text;

pub use options::{ConfigError, RenderOptions};
pub use text::{
    describe, mask_label, point_abbrev, render_flag, render_sequence, render_with, render_words,
};
