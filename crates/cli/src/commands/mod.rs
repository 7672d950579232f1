pub mod configure;
pub mod derive;
pub mod init;
pub mod show;
pub mod watch;

pub use configure::configure_command;
pub use derive::derive_command;
pub use init::init_command;
pub use show::show_command;
pub use watch::watch_command;
