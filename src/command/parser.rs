//! Console command parsing - one line of text into a table command

use crate::battle::{Alignment, AxisKind};
use crate::command::interaction::TableCommand;
use crate::core::error::{Result, TableError};
use crate::geometry::Point;

/// A parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Table(TableCommand),
    ListUnits,
    ShowLog,
    Help,
    Quit,
}

/// Usage text printed by `help`
pub const HELP: &str = "\
Commands:
  select <name>              - Select a unit (prefix match)
  clear                      - Clear the selection
  move / rotate              - Start moving or rotating the selected unit
  forward / sideways         - Toggle the FORWARD or SIDEWAYS axis
  align <front|rear|left|right> - Align to the clicked unit's side
  distance / arc             - Check distance or arc from the selected unit
  pointer <x> <y>            - Move the pointer (inches)
  click <x> <y>              - Click on the table (inches)
  heading <deg>              - Set an explicit heading
  finalize / cancel / abort  - Commit, discard, or leave the current mode
  units / log                - List units or dump the event log as JSON
  quit / q                   - Exit";

/// Parse a single console line
pub fn parse_command(line: &str) -> Result<ConsoleInput> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(TableError::InvalidCommand("empty input".into()));
    };
    let rest: Vec<&str> = words.collect();

    let table = |command: TableCommand| -> Result<ConsoleInput> { Ok(ConsoleInput::Table(command)) };
    match verb.to_lowercase().as_str() {
        "select" | "sel" => {
            if rest.is_empty() {
                return Err(TableError::InvalidCommand("Usage: select <name>".into()));
            }
            table(TableCommand::Select(rest.join(" ")))
        }
        "clear" => table(TableCommand::ClearSelection),
        "move" | "m" => table(TableCommand::StartMove),
        "rotate" | "r" => table(TableCommand::StartRotate),
        "forward" | "f" => table(TableCommand::ToggleAxis(AxisKind::Forward)),
        "sideways" | "s" => table(TableCommand::ToggleAxis(AxisKind::Sideways)),
        "align" => {
            let alignment = match rest.first().map(|w| w.to_lowercase()).as_deref() {
                Some("front") => Alignment::Front,
                Some("rear") | Some("back") => Alignment::Rear,
                Some("left") => Alignment::LeftFlank,
                Some("right") => Alignment::RightFlank,
                _ => {
                    return Err(TableError::InvalidCommand(
                        "Usage: align <front|rear|left|right>".into(),
                    ))
                }
            };
            table(TableCommand::StartAlign(alignment))
        }
        "distance" | "d" => table(TableCommand::CheckDistance),
        "arc" | "a" => table(TableCommand::CheckArc),
        "pointer" | "p" => table(TableCommand::PointerMove(parse_point(verb, &rest)?)),
        "click" | "c" => table(TableCommand::PointerClick(parse_point(verb, &rest)?)),
        "heading" | "h" => {
            let degrees = match rest.as_slice() {
                [value] => parse_number(value)?,
                _ => return Err(TableError::InvalidCommand("Usage: heading <deg>".into())),
            };
            table(TableCommand::SetRotation(degrees))
        }
        "finalize" | "commit" => table(TableCommand::Finalize),
        "cancel" => table(TableCommand::Cancel),
        "abort" | "esc" => table(TableCommand::Abort),
        "units" | "u" => Ok(ConsoleInput::ListUnits),
        "log" => Ok(ConsoleInput::ShowLog),
        "help" | "?" => Ok(ConsoleInput::Help),
        "quit" | "q" | "exit" => Ok(ConsoleInput::Quit),
        other => Err(TableError::InvalidCommand(format!("unknown command '{}'", other))),
    }
}

fn parse_point(verb: &str, args: &[&str]) -> Result<Point> {
    match args {
        [x, y] => Ok(Point::new(parse_number(x)?, parse_number(y)?)),
        _ => Err(TableError::InvalidCommand(format!("Usage: {} <x> <y>", verb))),
    }
}

fn parse_number(word: &str) -> Result<f64> {
    word.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TableError::InvalidCommand(format!("'{}' is not a number", word)))
}
