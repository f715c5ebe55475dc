pub mod decompression;
pub mod manager;
pub mod mod_fs;
