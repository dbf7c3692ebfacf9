use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use queryquill::config::Config;
use queryquill::file::loader::{load_example_file, load_example_from_stdin};
use queryquill::query::{self, PathExpression, Predicate, Step};

/// QueryQuill - query-by-example path expressions
#[derive(Parser)]
#[command(name = "queryquill")]
#[command(version)]
#[command(about = "Compile example graphs into path expressions", long_about = None)]
struct Cli {
    /// Output format: text or json (default: from config)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile an example document (YAML or JSON) into a path expression
    Compile {
        /// Example file to compile (omit to read from stdin)
        file: Option<String>,

        /// Only navigate to nodes marked with `_match` instead of forcing the root
        #[arg(long)]
        example: bool,
    },
    /// Parse a path expression and show its steps and predicates
    Parse {
        /// Path expression, e.g. "/Project()/fileset::File()[@extension='ts']"
        expression: String,
    },
}

fn init_logging(config: &Config) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load();
    // CLI format overrides config format
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    init_logging(&config);

    match cli.command {
        Command::Compile { file, example } => {
            let node = match file {
                Some(path) => load_example_file(&path)?,
                None => load_example_from_stdin()?,
            };
            let expression = if example || !config.force_root_match {
                query::by_example(&node)
            } else {
                query::for_root(&node)
            };
            print_expression(&expression, &config)?;
        }
        Command::Parse { expression } => {
            let parsed = query::Parser::parse(&expression)
                .with_context(|| format!("Invalid path expression: {}", expression))?;
            print_expression(&parsed, &config)?;
        }
    }

    Ok(())
}

fn print_expression(expression: &PathExpression, config: &Config) -> Result<()> {
    if config.is_json() {
        let json = serde_json::json!({
            "expression": expression.to_string(),
            "steps": expression.steps(),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{}", expression);
    for step in expression.steps() {
        print_step(step, 1);
    }
    Ok(())
}

/// Prints a step and its predicates as an indented outline.
fn print_step(step: &Step, depth: usize) {
    let indent = "  ".repeat(depth);
    match &step.axis {
        Some(axis) => println!("{}{} -> {}", indent, axis, step.test),
        None => println!("{}{}", indent, step.test),
    }
    for predicate in &step.predicates {
        match predicate {
            Predicate::Property { name, value } => {
                println!("{}  @{} = '{}'", indent, name, value)
            }
            Predicate::Path(steps) => {
                println!("{}  exists:", indent);
                for nested in steps {
                    print_step(nested, depth + 2);
                }
            }
        }
    }
}
