use crate::config::toml_config::TomlConfig;
use crate::core::table::{Pagination, SortState, ViewMode, PAGE_SIZES};
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_url, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "bean-catalog")]
#[command(about = "Browse the jelly bean catalog and get flavor recommendations")]
pub struct CliConfig {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Catalog API base URL (overrides file and environment)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Skip the dice roll animation")]
    pub skip_animations: bool,

    #[arg(long, global = true, help = "Log as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check that the catalog service is up
    Health,
    /// List one page of beans
    Beans {
        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long)]
        page_size: Option<u32>,
        /// Column to sort by, e.g. `name` or `name:desc`
        #[arg(long)]
        sort: Option<SortState>,
        /// Keep rows containing this text in any column
        #[arg(long)]
        filter: Option<String>,
        #[arg(long, default_value = "table")]
        view: ViewMode,
        /// Write the page as CSV instead of a table
        #[arg(long)]
        csv: bool,
    },
    /// List colors
    Colors {
        #[arg(long)]
        color_id: Option<String>,
    },
    /// List curated flavor combinations
    Combinations,
    /// Count dietary and seasonal attributes over the whole catalog
    Discovery,
    /// Beans and combinations matched to your taste
    Recommend,
    /// Roll the dice for a random recommended combination
    Lottery,
}

impl CliConfig {
    /// Layers defaults, the config file, environment and flags, in that order.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        }
        .apply_env();

        config.apply_overrides(self.base_url.clone(), self.token.clone());
        if self.skip_animations {
            config.display.skip_animations = true;
        }
        Ok(config)
    }

    pub fn pagination(&self, display_page_size: u32) -> Option<Pagination> {
        match &self.command {
            Command::Beans {
                page, page_size, ..
            } => Some(Pagination::new(
                page.saturating_sub(1),
                page_size.unwrap_or(display_page_size),
            )),
            _ => None,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.base_url {
            validate_url("--base-url", url)?;
        }
        if let Command::Beans {
            page_size: Some(size),
            ..
        } = &self.command
        {
            validate_one_of("--page-size", *size, &PAGE_SIZES)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::{Column, SortDirection};

    #[test]
    fn test_parse_beans_command() {
        let cli = CliConfig::try_parse_from([
            "bean-catalog",
            "beans",
            "--page",
            "3",
            "--page-size",
            "20",
            "--sort",
            "name:desc",
            "--view",
            "grid",
        ])
        .unwrap();

        match &cli.command {
            Command::Beans { sort, view, .. } => {
                let sort = sort.unwrap();
                assert_eq!(sort.column, Column::FlavorName);
                assert_eq!(sort.direction, SortDirection::Desc);
                assert_eq!(*view, ViewMode::Grid);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let pagination = cli.pagination(10).unwrap();
        assert_eq!(pagination.offset(), 40);
        assert_eq!(pagination.limit(), 20);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = CliConfig::try_parse_from([
            "bean-catalog",
            "recommend",
            "--base-url",
            "http://localhost:8080",
            "--skip-animations",
        ])
        .unwrap();
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));

        let config = cli.resolve().unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert!(config.display.skip_animations);
    }

    #[test]
    fn test_invalid_page_size_rejected() {
        let cli =
            CliConfig::try_parse_from(["bean-catalog", "beans", "--page-size", "15"]).unwrap();
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_unknown_sort_column_rejected() {
        assert!(CliConfig::try_parse_from(["bean-catalog", "beans", "--sort", "price"]).is_err());
    }
}
