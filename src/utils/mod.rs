pub mod constants;
pub mod string_utils;

pub use constants::*;
pub use string_utils::{is_blank, strip_wrapping_tag};
