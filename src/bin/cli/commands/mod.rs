pub mod add;
pub mod delete;
pub mod list;
pub mod review;
pub mod show;
