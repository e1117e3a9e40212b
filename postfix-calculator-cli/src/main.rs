mod shell;

use anyhow::{anyhow, Context as _, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::debug;
use postfix_calculator::interpreter::context::Context;
use std::io;
use std::io::Write;

/// Evaluates arithmetic expressions written in postfix (Reverse Polish) notation
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate. Starts an interactive session when omitted
    expression: Option<String>,

    /// Binds a variable before anything is evaluated, e.g. `-D x=5`
    #[clap(
        short = 'D',
        long = "define",
        value_name = "NAME=VALUE",
        parse(try_from_str = parse_definition)
    )]
    definitions: Vec<(String, f64)>,

    /// Prints the parsed expression tree before each result
    #[clap(long)]
    tree: bool,

    #[clap(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let mut context: Context = args.definitions.into_iter().collect();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    match args.expression {
        Some(expression) => {
            let value = shell::evaluate(&expression, &context, args.tree, &mut output)
                .with_context(|| format!("Could not evaluate '{}'", expression))?;
            writeln!(output, "{}", value)?;
            Ok(())
        }
        None => {
            debug!("Starting interactive session");
            let stdin = io::stdin();
            shell::run(stdin.lock(), &mut output, &mut context, args.tree)
        }
    }
}

fn parse_definition(definition: &str) -> Result<(String, f64), String> {
    read_definition(definition).map_err(|error| format!("{:#}", error))
}

fn read_definition(definition: &str) -> Result<(String, f64)> {
    let (name, value) = definition
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected NAME=VALUE but found '{}'", definition))?;
    let name = shell::variable_name(name.trim())?;
    let value = value
        .trim()
        .parse::<f64>()
        .with_context(|| format!("'{}' is not a number", value.trim()))?;
    Ok((name.to_string(), value))
}
