pub mod backup;
pub mod check;
pub mod config;
pub mod del;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod new;
pub mod rename;
pub mod reset;
pub mod run;
pub mod show;
pub mod watch;
