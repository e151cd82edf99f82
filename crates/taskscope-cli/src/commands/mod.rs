use clap::Subcommand;

pub mod tasks;

pub use tasks::Tasks;

#[derive(Subcommand)]
pub enum Commands {
    /// Show tasks of a session attempt
    Tasks(Tasks),
}
