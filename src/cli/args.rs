//! Command line argument parsing using clap.

use crate::query::types::{LogicalOperator, ObjectKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// catalog-client - query, edit and rank a book/author catalog
#[derive(Parser, Debug, Clone)]
#[command(name = "catalog-client")]
#[command(about = "Command line client for the book and author catalog service")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct CatalogArgs {
    /// Base URL of the catalog service
    #[arg(long, env = "CATALOG_URL", value_name = "URL")]
    pub url: Option<String>,

    /// Print raw JSON instead of formatted text
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fetch one record by identifier
    Get(RecordArgs),

    /// Delete one record by identifier
    Delete(RecordArgs),

    /// Search with one clause or two clauses joined by AND/OR
    Search(SearchArgs),

    /// Rank all records of a kind by rating and chart the top K
    Top(TopArgs),

    /// Replace attributes of an existing record
    Update(UpdateArgs),

    /// Create a single record
    Create(CreateArgs),

    /// Create every record in a JSON array file
    #[command(name = "create-many")]
    CreateMany(CreateManyArgs),

    /// Ask the service to scrape and store an external page
    Scrape(ScrapeArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct RecordArgs {
    /// Object kind (book or author)
    #[arg(value_name = "KIND")]
    pub kind: ObjectKind,

    /// Record identifier
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Object kind (book or author)
    #[arg(value_name = "KIND")]
    pub kind: ObjectKind,

    /// Attribute of the first clause
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Value of the first clause
    #[arg(value_name = "VALUE", default_value = "")]
    pub value: String,

    /// Logical operator joining a second clause
    #[arg(long, requires = "field2")]
    pub op: Option<LogicalOperator>,

    /// Attribute of the second clause
    #[arg(long, requires = "value2")]
    pub field2: Option<String>,

    /// Value of the second clause
    #[arg(long, requires = "op")]
    pub value2: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct TopArgs {
    /// Object kind (book or author)
    #[arg(value_name = "KIND")]
    pub kind: ObjectKind,

    /// Number of entries to keep (defaults to TOP_K)
    #[arg(short, long)]
    pub k: Option<usize>,

    /// Write the chart as an SVG document
    #[arg(long, value_name = "FILE")]
    pub svg: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateArgs {
    /// Object kind (book or author)
    #[arg(value_name = "KIND")]
    pub kind: ObjectKind,

    /// Identifier of the record to update
    #[arg(value_name = "ID")]
    pub id: String,

    /// Attribute assignments in the form attr=value
    #[arg(short, long = "set", value_name = "ATTR=VALUE", required = true)]
    pub assignments: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateArgs {
    /// Object kind (book or author)
    #[arg(value_name = "KIND")]
    pub kind: ObjectKind,

    /// Attribute assignments in the form attr=value
    #[arg(short, long = "set", value_name = "ATTR=VALUE", required = true)]
    pub assignments: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CreateManyArgs {
    /// Object kind (book or author)
    #[arg(value_name = "KIND")]
    pub kind: ObjectKind,

    /// JSON file holding an array of records
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct ScrapeArgs {
    /// Page to scrape, e.g. book/show/3735293-clean-code
    #[arg(value_name = "URL")]
    pub url: String,
}
