pub mod list;
pub mod validate;
