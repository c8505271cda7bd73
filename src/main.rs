//! Model Inputs CLI
//!
//! Loads the bound input tables from a directory of CSV files and resolves
//! lookups against them from the command line.

use anyhow::Context;
use clap::{Parser, Subcommand};
use model_inputs::{InputSpace, KeyedLookup, ReferenceBindings, TableValue};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "model_inputs", about = "Input table lookups for the cash-flow model")]
struct Args {
    /// Directory containing the input CSV files
    #[arg(long, default_value = "data/input")]
    input_dir: PathBuf,

    /// References JSON overriding the standard bindings
    #[arg(long)]
    references: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up an assumption value
    Asmp {
        /// Assumption item name
        item: String,
        #[arg(long)]
        product: Option<String>,
        #[arg(long)]
        policy_type: Option<String>,
        #[arg(long)]
        generation: Option<String>,
    },
    /// Look up a product spec value
    Spec {
        /// Spec item name
        item: String,
        #[arg(long)]
        product: Option<String>,
        #[arg(long)]
        policy_type: Option<String>,
        #[arg(long)]
        generation: Option<String>,
    },
    /// Look up a value in any named reference table
    Get {
        /// Reference name (e.g. Scenarios, DiscountRate)
        reference: String,
        /// Item name
        item: String,
        #[arg(long)]
        product: Option<String>,
        #[arg(long)]
        policy_type: Option<String>,
        #[arg(long)]
        generation: Option<String>,
    },
    /// List loaded references and their entry counts
    List,
}

fn print_result(value: Option<&TableValue>) {
    match value {
        Some(v) => println!("{}", v),
        None => println!("absent"),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let refs = match &args.references {
        Some(path) => ReferenceBindings::from_json_path(path)
            .with_context(|| format!("loading references from {}", path.display()))?,
        None => ReferenceBindings::standard(),
    };

    let space = InputSpace::load(&args.input_dir, &refs)
        .with_context(|| format!("loading input tables from {}", args.input_dir.display()))?;

    match &args.command {
        Command::Asmp {
            item,
            product,
            policy_type,
            generation,
        } => {
            print_result(space.asmp_lookup(
                item,
                product.as_deref(),
                policy_type.as_deref(),
                generation.as_deref(),
            ));
        }
        Command::Spec {
            item,
            product,
            policy_type,
            generation,
        } => {
            print_result(space.spec_lookup(
                item,
                product.as_deref(),
                policy_type.as_deref(),
                generation.as_deref(),
            ));
        }
        Command::Get {
            reference,
            item,
            product,
            policy_type,
            generation,
        } => {
            let table = space
                .table(reference)
                .with_context(|| format!("no table loaded for reference {}", reference))?;
            print_result(table.lookup(
                item,
                product.as_deref(),
                policy_type.as_deref(),
                generation.as_deref(),
            ));
        }
        Command::List => {
            println!("{:<18} {:<18} {:>8}", "Reference", "Range", "Entries");
            for (name, binding) in refs.iter() {
                let entries = space.table(name).map(|t| t.len()).unwrap_or(0);
                println!("{:<18} {:<18} {:>8}", name, binding.range, entries);
            }
        }
    }

    Ok(())
}
