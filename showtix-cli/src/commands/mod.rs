pub mod buy;
pub mod list;
pub mod show;
