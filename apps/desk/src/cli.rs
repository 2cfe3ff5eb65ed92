//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Estimate desk: edit line-item estimates and record them with numbers.
#[derive(Debug, Parser)]
#[command(name = "tally-desk", version, about)]
pub struct Cli {
    /// Config file (defaults to desk.toml in the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Inventory JSON (an array of catalog items); the sample catalog is used otherwise
    #[arg(long, value_name = "JSON")]
    pub inventory: Option<PathBuf>,

    /// Customer name recorded on saved estimates
    #[arg(long, value_name = "NAME")]
    pub customer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let cli = Cli::parse_from([
            "tally-desk",
            "--config",
            "desk.toml",
            "--customer",
            "Asha Rao",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("desk.toml")));
        assert_eq!(cli.customer.as_deref(), Some("Asha Rao"));
        assert!(cli.inventory.is_none());
    }
}
