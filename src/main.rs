use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cqlmap::config;
use cqlmap::cql_generator;
use cqlmap::mapping::{MappingContext, MappingDefinition, TableSpec};
use std::path::PathBuf;

/// cqlmap - derive CQL schema from mapping definitions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Mapping definition YAML file (defaults to CQLMAP_DEFINITION or cqlmap.yaml)
    #[arg(short, long, global = true)]
    definition: Option<PathBuf>,

    /// Skip eager validation of every mapped property
    #[arg(long, global = true)]
    skip_validation: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the resolved columns of every table entity
    Describe {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print CREATE KEYSPACE / TABLE / INDEX statements
    Ddl,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<&Cli> for config::CliConfig {
    fn from(cli: &Cli) -> Self {
        config::CliConfig {
            definition_path: cli.definition.clone(),
            skip_validation: cli.skip_validation,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = config::ToolConfig::from_cli((&cli).into()).context("Configuration error")?;

    // Defaults to the configured filter, can be overridden with RUST_LOG
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_filter))
        .init();

    let definition = MappingDefinition::from_yaml_file(&config.definition_path)?;
    let context = definition.build_context()?;

    if config.validate_mappings {
        if let Err(errors) = context.validate() {
            for e in &errors {
                eprintln!("error: {}", e);
            }
            bail!("{} mapping error(s) in {}", errors.len(), config.definition_path.display());
        }
    }

    match cli.command {
        Command::Describe { format } => describe(&context, format),
        Command::Ddl => {
            let keyspace = definition.keyspace_spec()?;
            for statement in cql_generator::generate_schema_cql(&context, keyspace.as_ref())? {
                println!("{}", statement);
            }
            Ok(())
        }
    }
}

fn describe(context: &MappingContext, format: OutputFormat) -> Result<()> {
    let resolver = context.resolver();
    let tables = context
        .table_entities()
        .map(|entity| TableSpec::from_entity(&resolver, entity))
        .collect::<Result<Vec<_>, _>>()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tables)?),
        OutputFormat::Text => {
            for table in &tables {
                println!("{} -> {}", table.entity, table.name);
                for column in &table.columns {
                    let mut line = format!("  {} {}", column.name, column.column_type);
                    if column.is_partition_key() {
                        line.push_str(" PARTITION KEY");
                    }
                    if column.is_clustering_key() {
                        line.push_str(&format!(
                            " CLUSTERING {}",
                            column.ordering.unwrap_or_default().as_cql()
                        ));
                    }
                    if column.indexed {
                        line.push_str(" INDEXED");
                    }
                    println!("{}", line);
                }
            }
        }
    }
    Ok(())
}
