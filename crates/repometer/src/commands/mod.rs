pub(crate) mod scan;
pub(crate) mod summary;

use anyhow::Result;
use repometer_config::{Cli, Commands, TomlConfig};

pub(crate) fn dispatch(cli: Cli, config: &TomlConfig) -> Result<()> {
    match cli.command {
        Commands::Scan(args) => scan::handle(&args, config),
        Commands::Summary(args) => summary::handle(&args, config),
    }
}
