//! Command grammar
//!
//! Lines are split on whitespace and dispatched on the first token. Parsing
//! is pure so the grammar can be tested without a terminal attached.

use super::NewLevelArgs;

/// Printed after an unknown command
pub const COMMAND_LIST: &str = "Legal commands are save, load, new, rename, name, quit, exit";

/// A parsed console command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Save,
    Load { name: String },
    New(NewLevelArgs),
    Rename { name: String },
    Name,
    Quit,
}

/// Error type for command parsing
#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// Blank line; not an error worth reporting
    Empty,
    /// Wrong argument count; carries the usage string
    Usage(&'static str),
    /// A numeric argument failed to parse
    BadNumber(String),
    /// Unrecognized command word; carries the full line
    Unknown(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => Ok(()),
            ParseError::Usage(usage) => write!(f, "Error: expected '{}'", usage),
            ParseError::BadNumber(arg) => write!(f, "Error: '{}' is not a number", arg),
            ParseError::Unknown(line) => write!(f, "'{}' is not a legal command", line),
        }
    }
}

fn parse_number<T: std::str::FromStr>(arg: &str) -> Result<T, ParseError> {
    arg.parse().map_err(|_| ParseError::BadNumber(arg.to_string()))
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, ParseError> {
        let args: Vec<&str> = line.split_whitespace().collect();
        let Some(&word) = args.first() else {
            return Err(ParseError::Empty);
        };

        match word {
            "save" => Ok(Command::Save),
            "load" => {
                if args.len() == 2 {
                    Ok(Command::Load {
                        name: args[1].to_string(),
                    })
                } else {
                    Err(ParseError::Usage("load some_file_name"))
                }
            }
            "new" => {
                if args.len() == 3 || args.len() == 4 {
                    let cols = parse_number(args[1])?;
                    let rows = parse_number(args[2])?;
                    let fill = match args.get(3) {
                        Some(arg) => Some(parse_number(arg)?),
                        None => None,
                    };
                    Ok(Command::New(NewLevelArgs { cols, rows, fill }))
                } else {
                    Err(ParseError::Usage(
                        "new x_dimension y_dimension [default_tile_type]",
                    ))
                }
            }
            "rename" => {
                if args.len() == 2 {
                    Ok(Command::Rename {
                        name: args[1].to_string(),
                    })
                } else {
                    Err(ParseError::Usage("rename some_new_name"))
                }
            }
            "name" => Ok(Command::Name),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(ParseError::Unknown(line.trim().to_string())),
        }
    }
}
