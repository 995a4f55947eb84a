pub mod logs;
pub mod window;
