#![doc = include_str!("../README.md")]

pub use exd_bundle as bundle;
pub use exd_reflect as reflect;
pub use exd_utils as utils;
