//! Command-line interface for xsd-typegraph

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use xsd_typegraph::builder::build_order_locations;
#[cfg(feature = "cli")]
use xsd_typegraph::naming::to_pascal_case;
#[cfg(feature = "cli")]
use xsd_typegraph::{Configuration, GraphDump, ModelBuilder, PascalCaseNaming, SchemaSet};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsd-typegraph")]
#[command(author, version, about = "Build a language-agnostic type graph from a compiled XSD set", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the type graph of a schema set
    Build {
        /// Compiled schema set, serialized as JSON
        #[arg(value_name = "SCHEMA_SET")]
        schema_set: PathBuf,

        /// Configuration file (options and namespace mappings)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Derive output names for unmapped namespaces from their last segment
        #[arg(long)]
        generate_namespaces: bool,

        /// Output the graph as JSON
        #[arg(short, long)]
        json: bool,

        /// Pretty print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Print the order documents are built in
    Order {
        /// Compiled schema set, serialized as JSON
        #[arg(value_name = "SCHEMA_SET")]
        schema_set: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            schema_set,
            config,
            generate_namespaces,
            json,
            pretty,
        } => cmd_build(schema_set, config, generate_namespaces, json, pretty),
        Commands::Order { schema_set } => cmd_order(schema_set),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn cmd_build(
    schema_set: PathBuf,
    config: Option<PathBuf>,
    generate_namespaces: bool,
    json: bool,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let set = SchemaSet::from_file(&schema_set)?;
    let config = match config {
        Some(path) => Configuration::from_file(path)?,
        None => Configuration::default(),
    };

    let naming = PascalCaseNaming::new();
    let mut builder = ModelBuilder::from_configuration(&set, &config, &naming);
    if generate_namespaces {
        builder = builder.with_namespace_policy(|_source: Option<&str>, namespace: &str| {
            let segment = namespace
                .rsplit(['/', ':', '#'])
                .find(|s| !s.is_empty())
                .unwrap_or("Default");
            Some(to_pascal_case(segment))
        });
    }
    let graph = builder.build()?;
    let dump = GraphDump::from_graph(&graph);

    if json {
        println!("{}", dump.to_json(pretty)?);
    } else {
        println!("xsd-typegraph v{}", xsd_typegraph::VERSION);
        println!();
        print!("{}", dump);
        println!();
        println!("{} types in {} namespaces", dump.type_count(), dump.namespaces.len());
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_order(schema_set: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let set = SchemaSet::from_file(&schema_set)?;
    for (i, location) in build_order_locations(&set).iter().enumerate() {
        println!("{:>3}. {}", i + 1, location);
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
