//! Helper functions shared by the content and generator modules

mod date;

pub use date::*;
