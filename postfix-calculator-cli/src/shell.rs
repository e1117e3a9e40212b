use anyhow::{bail, Context as _, Result};
use log::{debug, info};
use postfix_calculator::interpreter;
use postfix_calculator::interpreter::context::Context;
use std::io::{BufRead, Write};

const PROMPT: &str = "Enter a postfix expression (or type 'exit' to quit): ";
const EXIT_COMMAND: &str = "exit";
const SET_COMMAND: &str = "set";

/// A single line of user input.
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Exit,
    Skip,
    Set { name: &'a str, expression: &'a str },
    Evaluate(&'a str),
}

impl<'a> Command<'a> {
    fn from_line(line: &'a str) -> Result<Command<'a>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Skip);
        }
        if line.eq_ignore_ascii_case(EXIT_COMMAND) {
            return Ok(Command::Exit);
        }
        match line.strip_prefix(SET_COMMAND) {
            Some(arguments) if arguments.starts_with(char::is_whitespace) => {
                let arguments = arguments.trim_start();
                let (name, expression) = arguments
                    .split_once(char::is_whitespace)
                    .unwrap_or((arguments, ""));
                // Without a name to bind, `set` is an ordinary variable in an expression.
                if variable_name(name).is_err() {
                    return Ok(Command::Evaluate(line));
                }
                if expression.trim().is_empty() {
                    bail!("Usage: set <name> <postfix expression>");
                }
                Ok(Command::Set { name, expression })
            }
            _ => Ok(Command::Evaluate(line)),
        }
    }
}

/// Checks that `name` is something the lexer reads back as a single identifier.
pub fn variable_name(name: &str) -> Result<&str> {
    if name.is_empty() || !name.chars().all(char::is_alphabetic) {
        bail!("'{}' is not a valid variable name", name);
    }
    Ok(name)
}

/// Parses and evaluates `expression`, printing its tree first when `show_tree` is set.
pub fn evaluate(
    expression: &str,
    context: &Context,
    show_tree: bool,
    output: &mut impl Write,
) -> Result<f64> {
    let tree = interpreter::parse(expression)?;
    if show_tree {
        write!(output, "{}", tree)?;
    }
    Ok(interpreter::evaluate(&tree, context)?)
}

/// Reads lines from `input` until `exit` or end of input, answering each one on `output`.
///
/// Every line is evaluated against the same `context`; `set <name> <expression>` binds
/// the value of an expression to a variable for later lines. A line starting with `set`
/// that does not name a variable is evaluated as an expression. Errors on a line are
/// reported and the session continues.
pub fn run(
    mut input: impl BufRead,
    output: &mut impl Write,
    context: &mut Context,
    show_tree: bool,
) -> Result<()> {
    let mut line = String::new();
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();
        let read = input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            writeln!(output)?;
            info!("End of input, leaving session");
            return Ok(());
        }

        let answer = Command::from_line(&line).and_then(|command| match command {
            Command::Exit => Ok(None),
            Command::Skip => Ok(Some(String::new())),
            Command::Set { name, expression } => {
                let value = evaluate(expression, context, show_tree, output)?;
                context.set(name, value);
                debug!("Bound {} to {}", name, value);
                Ok(Some(format!("{} = {}\n", name, value)))
            }
            Command::Evaluate(expression) => {
                let value = evaluate(expression, context, show_tree, output)?;
                Ok(Some(format!("Result: {}\n", value)))
            }
        });

        match answer {
            Ok(None) => return Ok(()),
            Ok(Some(text)) => write!(output, "{}", text)?,
            Err(error) => {
                debug!("Rejected {:?}: {:?}", line.trim(), error);
                writeln!(output, "Error: {}", error)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn session(input: &str, context: &mut Context) -> String {
        let mut output = Vec::new();
        run(Cursor::new(input), &mut output, context, false).unwrap();
        String::from_utf8(output).unwrap().replace(PROMPT, "")
    }

    #[test]
    fn expression_result_is_printed() {
        let output = session("3 4 +\nexit\n", &mut Context::new());

        assert_eq!(output, "Result: 7\n");
    }

    #[test]
    fn exit_is_case_insensitive() {
        let output = session("  ExIt \n3 4 +\n", &mut Context::new());

        assert_eq!(output, "");
    }

    #[test]
    fn end_of_input_ends_session() {
        let output = session("2 2 *\n", &mut Context::new());

        assert_eq!(output, "Result: 4\n\n");
    }

    #[test]
    fn errors_are_reported_and_session_continues() {
        let output = session("10 0 /\n3 4 $\n+ 3\n1 1 +\nexit\n", &mut Context::new());

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Error: division by zero");
        assert_eq!(lines[1], "Error: unrecognized character '$' at position 4");
        assert!(lines[2].starts_with("Error: malformed expression"));
        assert_eq!(lines[3], "Result: 2");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let output = session("\n   \n5\nexit\n", &mut Context::new());

        assert_eq!(output, "Result: 5\n");
    }

    #[test]
    fn set_binds_variable_for_later_lines() {
        let mut context = Context::new();

        let output = session("set x 2 3 *\nx 1 -\nexit\n", &mut context);

        assert_eq!(output, "x = 6\nResult: 5\n");
        assert_eq!(context.get("x"), 6.0);
    }

    #[test]
    fn context_outlives_the_session() {
        let mut context = Context::new();
        context.set("y", 4.0);

        let output = session("y y *\nexit\n", &mut context);

        assert_eq!(output, "Result: 16\n");
    }

    #[test]
    fn unset_variable_reads_as_zero() {
        let output = session("x 5 *\nexit\n", &mut Context::new());

        assert_eq!(output, "Result: 0\n");
    }

    #[test]
    fn set_without_expression_is_rejected() {
        let mut context = Context::new();

        let output = session("set x\nexit\n", &mut context);

        assert!(output.starts_with("Error: Usage"));
        assert_eq!(context.get("x"), 0.0);
    }

    #[test]
    fn set_with_invalid_name_is_evaluated_as_expression() {
        let output = session("set x1 5\nexit\n", &mut Context::new());

        assert_eq!(
            output,
            "Error: malformed expression: 4 operands were left without an operator\n"
        );
    }

    #[test]
    fn set_can_be_used_as_variable() {
        let mut context = Context::new();
        context.set("set", 4.0);

        let output = session("set 2 *\nexit\n", &mut context);

        assert_eq!(output, "Result: 8\n");
    }

    #[test]
    fn set_prefix_of_variable_is_evaluated_as_expression() {
        let mut context = Context::new();
        context.set("settle", 3.0);

        let output = session("settle 2 *\nexit\n", &mut context);

        assert_eq!(output, "Result: 6\n");
    }

    #[test]
    fn tree_is_printed_before_result() {
        let mut output = Vec::new();

        let value = evaluate("3 4 +", &Context::new(), true, &mut output).unwrap();

        let printed = String::from_utf8(output).unwrap();
        assert_eq!(value, 7.0);
        assert!(printed.contains('+'));
        assert!(printed.contains('3'));
    }

    #[test]
    fn command_is_read_from_line() {
        assert_eq!(Command::from_line("exit\n").unwrap(), Command::Exit);
        assert_eq!(Command::from_line(" \n").unwrap(), Command::Skip);
        assert_eq!(
            Command::from_line("set a 1 2 +").unwrap(),
            Command::Set {
                name: "a",
                expression: "1 2 +",
            }
        );
        assert_eq!(
            Command::from_line("a 1 +\n").unwrap(),
            Command::Evaluate("a 1 +")
        );
        assert_eq!(
            Command::from_line("set 2 *").unwrap(),
            Command::Evaluate("set 2 *")
        );
    }
}
