pub mod command;
pub mod storage;
