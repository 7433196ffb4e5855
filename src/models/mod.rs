pub mod dir_size;
pub mod usage;
