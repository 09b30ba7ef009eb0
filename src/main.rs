use clap::{Parser, Subcommand};
use querywire::types::MemberSignature;
use querywire::{
    ClientEvaluation, CompileError, Expr, MemberNaming, QueryOptions, QueryWireBuilder,
    QueryWireError,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Compile typed expression trees into wire query text")]
struct Args {
    /// Keep member names as declared instead of camel-casing them
    #[arg(long, global = true, default_value_t = false)]
    verbatim_members: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a predicate lambda into `$filter` text
    Compile {
        /// JSON file holding the expression tree
        tree: PathBuf,
        /// Print the encoded `$filter=` option instead of raw text
        #[arg(long, default_value_t = false)]
        encode: bool,
    },
    /// Compile a selector lambda into `$select` text
    Select {
        tree: PathBuf,
        #[arg(long, default_value_t = false)]
        encode: bool,
    },
    /// Split a selector into a server projection and a client remainder
    Partition {
        tree: PathBuf,
        /// Fail instead of leaving unsupported parts to the client
        #[arg(long, default_value_t = false)]
        forbid_client: bool,
    },
}

#[derive(Serialize)]
struct PartitionReport {
    arity: usize,
    server: Option<String>,
    client_reasons: Vec<String>,
    unmapped: Vec<MemberSignature>,
}

fn read_tree(path: &Path) -> Result<Expr, QueryWireError> {
    log::debug!("Reading expression tree from {}", path.display());
    let source = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&source)?)
}

fn main() -> Result<(), QueryWireError> {
    env_logger::init();
    let args = Args::parse();

    let naming = if args.verbatim_members {
        MemberNaming::Verbatim
    } else {
        MemberNaming::CamelCase
    };
    let builder = QueryWireBuilder::new().with_member_naming(naming);

    match args.command {
        Command::Compile { tree, encode } => {
            let wire = builder.build();
            let text = wire.filter(&read_tree(&tree)?)?;
            if encode {
                println!("{}", QueryOptions::new().with_filter(text));
            } else {
                println!("{}", text);
            }
        }
        Command::Select { tree, encode } => {
            let wire = builder.build();
            let text = wire.select(&read_tree(&tree)?)?;
            if encode {
                println!("{}", QueryOptions::new().with_select(text));
            } else {
                println!("{}", text);
            }
        }
        Command::Partition {
            tree,
            forbid_client,
        } => {
            let evaluation = if forbid_client {
                ClientEvaluation::Forbidden
            } else {
                ClientEvaluation::Allowed
            };
            let wire = builder.with_client_evaluation(evaluation).build();
            let split = wire.partition(&read_tree(&tree)?)?;
            let report = PartitionReport {
                arity: split.arity,
                server: split.server_text().map(str::to_string),
                client_reasons: split.client_reasons.iter().map(|r| r.to_string()).collect(),
                unmapped: split
                    .client_reasons
                    .iter()
                    .filter_map(|r| match r {
                        CompileError::UnmappedMember { signature } => Some(signature.clone()),
                        _ => None,
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
