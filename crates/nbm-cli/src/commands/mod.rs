pub mod assemble;
pub mod init;
pub mod show;
