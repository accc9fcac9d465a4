use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};
use time::Date;
use uuid::Uuid;

use crate::domain::age::parse_date_of_birth;
use crate::domain::types::{Gender, PersonField, SortDirection};

/// Command-line arguments for the roster binary.
#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "Persons and countries registry")]
pub struct RosterArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "ROSTER_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,

    /// Override the database connection URL.
    #[arg(long = "database-url", value_name = "URL", global = true)]
    pub database_url: Option<String>,

    /// Override the database pool size.
    #[arg(long = "database-max-connections", value_name = "COUNT", global = true)]
    pub database_max_connections: Option<u32>,

    /// Toggle the cache-aside layer.
    #[arg(
        long = "cache-enabled",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub cache_enabled: Option<bool>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Apply pending database migrations.
    Migrate,
    /// Country operations.
    Countries(CountriesArgs),
    /// Person operations.
    Persons(PersonsArgs),
}

#[derive(Debug, Args, Clone)]
pub struct CountriesArgs {
    #[command(subcommand)]
    pub command: CountriesCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CountriesCommand {
    /// Add a country.
    Add {
        /// Country name; must not already exist.
        name: String,
    },
    /// List every country.
    List,
    /// Show one country.
    Get { id: Uuid },
    /// Add countries from a file holding one name per line.
    Import {
        #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
}

#[derive(Debug, Args, Clone)]
pub struct PersonsArgs {
    #[command(subcommand)]
    pub command: PersonsCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum PersonsCommand {
    /// Add a person.
    Add(PersonFieldArgs),
    /// List persons, optionally searched and sorted.
    List(PersonListArgs),
    /// Show one person.
    Get { id: Uuid },
    /// Change fields of an existing person; omitted fields keep their value.
    Update {
        id: Uuid,
        #[command(flatten)]
        fields: PersonFieldArgs,
    },
    /// Delete a person.
    Delete { id: Uuid },
}

#[derive(Debug, Args, Default, Clone)]
pub struct PersonFieldArgs {
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    #[arg(long, value_name = "EMAIL")]
    pub email: Option<String>,

    /// Date of birth as `DD MM YYYY`.
    #[arg(long = "date-of-birth", value_name = "DATE", value_parser = parse_date_arg)]
    pub date_of_birth: Option<Date>,

    /// Male, Female or Other.
    #[arg(long, value_name = "GENDER")]
    pub gender: Option<Gender>,

    #[arg(long = "country-id", value_name = "UUID")]
    pub country_id: Option<Uuid>,

    #[arg(long, value_name = "ADDRESS")]
    pub address: Option<String>,

    #[arg(
        long = "receive-newsletters",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub receive_newsletters: Option<bool>,
}

#[derive(Debug, Args, Clone)]
pub struct PersonListArgs {
    /// Field the query is matched against.
    #[arg(long = "search-by", value_name = "FIELD", default_value = "name")]
    pub search_by: PersonField,

    /// Free-text query; empty lists everyone.
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Field to order by; input order is kept when omitted.
    #[arg(long = "sort-by", value_name = "FIELD")]
    pub sort_by: Option<PersonField>,

    /// asc or desc.
    #[arg(long, value_name = "ORDER", default_value = "asc")]
    pub order: SortDirection,
}

fn parse_date_arg(value: &str) -> Result<Date, String> {
    parse_date_of_birth(value).ok_or_else(|| format!("`{value}` is not a `DD MM YYYY` date"))
}
