mod history;
mod init;
mod plans;

pub use history::cmd_history;
pub use init::cmd_init;
pub use plans::cmd_plans;
