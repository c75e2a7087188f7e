pub mod backends;
pub mod diff;
pub mod util;

pub use backends::*;
pub use diff::*;
pub use util::*;
