pub mod news;

pub use news::{fields, News};
