//! Command implementations for the catalog CLI.

use crate::chart::{projector, svg};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::gateway::client::CatalogClient;
use crate::gateway::protocol::ServiceReply;
use crate::query::types::{AttributeClause, CompoundClause, FieldSelector, ObjectKind, SearchQuery};
use crate::records::types::Record;
use anyhow::{Context, bail};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Execute a CLI command against the configured catalog service.
pub async fn execute_command(args: CatalogArgs) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &args.url {
        config = config.with_catalog_url(url);
    }
    let client = CatalogClient::from_config(&config);
    tracing::debug!("Using catalog service at {}", client.base_url());

    match &args.command {
        Command::Get(record_args) => {
            let record = client.get(record_args.kind, &record_args.id).await?;
            emit(&args, &record, || format_record(&record))
        }
        Command::Delete(record_args) => {
            let reply = client.delete(record_args.kind, &record_args.id).await?;
            emit_reply(&args, &reply)
        }
        Command::Search(search_args) => {
            let query = build_query(search_args)?;
            let records = client.search_query(&query).await?;
            emit(&args, &records, || format_records(&records))
        }
        Command::Top(top_args) => {
            let k = top_args.k.unwrap_or(config.default_top_k);
            let dataset = client.top_k(top_args.kind, k).await?;
            if let Some(path) = &top_args.svg {
                let model = projector::project(&dataset);
                let caption = svg::caption(top_args.kind, dataset.len());
                std::fs::write(path, svg::render(&model, &caption))
                    .with_context(|| format!("writing chart to {}", path.display()))?;
                tracing::info!("Chart written to {}", path.display());
            }
            emit(&args, &dataset, || format_dataset(&dataset))
        }
        Command::Update(update_args) => {
            let record = parse_assignments(update_args.kind, &update_args.assignments)?;
            let reply = client.update(&update_args.id, &record).await?;
            emit_reply(&args, &reply)
        }
        Command::Create(create_args) => {
            let record = parse_assignments(create_args.kind, &create_args.assignments)?;
            let reply = client.create(&record).await?;
            emit_reply(&args, &reply)
        }
        Command::CreateMany(many_args) => {
            let records = load_records(many_args.kind, &many_args.file)?;
            tracing::info!(
                "Loaded {} {} record(s) from {}",
                records.len(),
                many_args.kind,
                many_args.file.display()
            );
            let reply = client.create_many(many_args.kind, &records).await?;
            emit_reply(&args, &reply)
        }
        Command::Scrape(scrape_args) => {
            let reply = client.scrape(&scrape_args.url).await?;
            emit_reply(&args, &reply)
        }
    }
}

/// Builds a single or compound query from the search arguments.
pub fn build_query(args: &SearchArgs) -> Result<SearchQuery> {
    let first = AttributeClause::new(FieldSelector::parse(args.kind, &args.field)?, &args.value);

    match (args.op, &args.field2, &args.value2) {
        (Some(op), Some(field2), Some(value2)) => {
            let second = AttributeClause::new(FieldSelector::parse(args.kind, field2)?, value2);
            Ok(CompoundClause::new(first, op, second)?.into())
        }
        _ => Ok(first.into()),
    }
}

/// Turns `attr=value` pairs into a record of `kind`. Values are kept as text.
pub fn parse_assignments(kind: ObjectKind, assignments: &[String]) -> anyhow::Result<Record> {
    let mut record = Record::new(kind);
    for assignment in assignments {
        let Some((attribute, value)) = assignment.split_once('=') else {
            bail!("expected ATTR=VALUE, got `{}`", assignment);
        };
        record.set(attribute.trim(), value)?;
    }
    Ok(record)
}

/// Reads a JSON array of records from `path`.
pub fn load_records(kind: ObjectKind, path: &Path) -> anyhow::Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading records from {}", path.display()))?;
    parse_records(kind, &content)
}

pub fn parse_records(kind: ObjectKind, content: &str) -> anyhow::Result<Vec<Record>> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        bail!("expected a JSON array of {} records", kind);
    };
    let records = items
        .into_iter()
        .map(|item| Record::from_value(kind, item))
        .collect::<Result<Vec<_>>>()?;
    Ok(records)
}

fn emit<T: Serialize>(
    args: &CatalogArgs,
    value: &T,
    human: impl FnOnce() -> String,
) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", human());
    }
    Ok(())
}

fn emit_reply(args: &CatalogArgs, reply: &ServiceReply) -> anyhow::Result<()> {
    emit(args, reply, || format_reply(reply))?;
    if !reply.is_success() {
        bail!("service answered with status {}", reply.status);
    }
    Ok(())
}
