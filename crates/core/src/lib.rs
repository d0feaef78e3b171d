#![forbid(unsafe_code)]

pub mod completion;
pub mod model;
pub mod time;

pub use time::Clock;
