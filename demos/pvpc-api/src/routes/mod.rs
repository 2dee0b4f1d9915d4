pub mod meta;
pub mod pvpc;
