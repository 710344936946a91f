pub mod compose;
pub mod filter;
pub mod help;
pub mod init_config;
pub mod parse;
pub mod show_config;
pub mod validate_config;
