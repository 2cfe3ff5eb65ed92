//! # Command Console
//!
//! Drives a mounted [`EstimateEditor`] from line-oriented commands on stdin.
//!
//! ## Commands
//! ```text
//! add                         append a blank line
//! rm <n>                      remove line n
//! set <n> <field> <value>     field: item | qty | rate | disc
//! search <n> <term>           type into line n's item and list matches
//! pick <k>                    apply suggestion k
//! key <name>                  enter | tab | backtab | esc | up | down
//! discount <v>                global discount percent
//! tax <v>                     global tax percent
//! show                        print lines and totals
//! save                        send the estimate to the host
//! clear                       reset to one blank line
//! help                        this text
//! quit                        leave the desk
//! ```
//!
//! Line and suggestion numbers are 1-based, as displayed.

use std::io::Write;
use std::str::FromStr;

use tally_core::LineField;
use tally_editor::{EstimateEditor, Key, KeyOutcome, SuggestionList};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::error::{DeskError, DeskResult};

pub const HELP: &str = "\
Commands:
  add                         append a blank line
  rm <n>                      remove line n
  set <n> <field> <value>     field: item | qty | rate | disc
  search <n> <term>           type into line n's item and list matches
  pick <k>                    apply suggestion k
  key <name>                  enter | tab | backtab | esc | up | down
  discount <v>                global discount percent
  tax <v>                     global tax percent
  show                        print lines and totals
  save                        send the estimate to the host
  clear                       reset to one blank line
  help                        this text
  quit                        leave the desk";

// =============================================================================
// Commands
// =============================================================================

/// A parsed console command. Indices are already zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add,
    Remove { line: usize },
    Set { line: usize, field: LineField, value: String },
    Search { line: usize, term: String },
    Pick { suggestion: usize },
    Key(Key),
    Discount(String),
    Tax(String),
    Show,
    Save,
    Clear,
    Help,
    Quit,
}

/// Whether the console keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl FromStr for Command {
    type Err = DeskError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let name = words
            .next()
            .ok_or_else(|| DeskError::usage("empty command"))?
            .to_ascii_lowercase();
        let rest: Vec<&str> = words.collect();

        let command = match name.as_str() {
            "add" => Command::Add,
            "rm" | "remove" => Command::Remove {
                line: one_based(arg(&rest, 0, "rm <n>")?)?,
            },
            "set" => {
                let line = one_based(arg(&rest, 0, "set <n> <field> <value>")?)?;
                let field = arg(&rest, 1, "set <n> <field> <value>")?
                    .parse::<LineField>()
                    .map_err(|e| DeskError::usage(e.to_string()))?;
                Command::Set {
                    line,
                    field,
                    value: rest.get(2..).unwrap_or_default().join(" "),
                }
            }
            "search" => Command::Search {
                line: one_based(arg(&rest, 0, "search <n> <term>")?)?,
                term: rest.get(1..).unwrap_or_default().join(" "),
            },
            "pick" => Command::Pick {
                suggestion: one_based(arg(&rest, 0, "pick <k>")?)?,
            },
            "key" => Command::Key(
                arg(&rest, 0, "key <name>")?
                    .parse::<Key>()
                    .map_err(DeskError::Usage)?,
            ),
            "discount" => Command::Discount(rest.join(" ")),
            "tax" => Command::Tax(rest.join(" ")),
            "show" => Command::Show,
            "save" => Command::Save,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => {
                return Err(DeskError::usage(format!(
                    "unknown command '{}' (try 'help')",
                    other
                )))
            }
        };
        Ok(command)
    }
}

fn arg<'a>(args: &[&'a str], position: usize, usage: &str) -> DeskResult<&'a str> {
    args.get(position)
        .copied()
        .ok_or_else(|| DeskError::usage(format!("usage: {}", usage)))
}

/// Parses a displayed (1-based) number into an index.
fn one_based(raw: &str) -> DeskResult<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(DeskError::usage(format!(
            "'{}' is not a line or suggestion number (numbers start at 1)",
            raw
        ))),
    }
}

// =============================================================================
// Execution
// =============================================================================

/// Runs one command against the editor, writing feedback to `out`.
pub fn execute(
    editor: &mut EstimateEditor,
    command: Command,
    out: &mut impl Write,
) -> DeskResult<Flow> {
    debug!(?command, "Executing console command");

    match command {
        Command::Add => {
            let index = editor.add_line();
            writeln!(out, "Added line {}", index + 1)?;
        }
        Command::Remove { line } => {
            editor.remove_line(line)?;
            writeln!(out, "Removed line {} ({} left)", line + 1, editor.session().len())?;
        }
        Command::Set { line, field, value } => {
            editor.update_field(line, field, &value)?;
            print_line(editor, line, out)?;
        }
        Command::Search { line, term } => {
            let shown = editor.type_item(line, &term)?;
            if shown == 0 {
                writeln!(out, "No matches")?;
            }
            print_suggestions(editor.suggestions(), out)?;
        }
        Command::Pick { suggestion } => {
            editor.select_suggestion(suggestion)?;
            if let Some(line) = editor.focus().line_index() {
                print_line(editor, line, out)?;
            }
        }
        Command::Key(key) => {
            let outcome = editor.handle_key(key)?;
            print_outcome(editor, outcome, out)?;
        }
        Command::Discount(raw) => {
            editor.set_global_discount(&raw);
            print_grand_total(editor, out)?;
        }
        Command::Tax(raw) => {
            editor.set_global_tax(&raw);
            print_grand_total(editor, out)?;
        }
        Command::Show => {
            write!(out, "{}", editor.view())?;
            writeln!(out, "Focus: {}", editor.focus())?;
        }
        Command::Save => {
            let payload = editor.save()?;
            writeln!(
                out,
                "Saved estimate with {} line(s), grand total {}",
                payload.lines().len(),
                editor.totals_view().grand_total
            )?;
        }
        Command::Clear => {
            editor.clear();
            writeln!(out, "Cleared")?;
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

fn print_line(editor: &EstimateEditor, index: usize, out: &mut impl Write) -> DeskResult<()> {
    let view = editor.view();
    if let Some(line) = view.lines.get(index) {
        writeln!(
            out,
            "{}. {} | qty {} | rate {} | disc {} | amount {}",
            line.serial, line.item, line.quantity, line.rate, line.discount, line.amount
        )?;
    }
    print_grand_total(editor, out)
}

fn print_grand_total(editor: &EstimateEditor, out: &mut impl Write) -> DeskResult<()> {
    writeln!(out, "Grand Total: {}", editor.totals_view().grand_total)?;
    Ok(())
}

fn print_suggestions(list: Option<&SuggestionList>, out: &mut impl Write) -> DeskResult<()> {
    let Some(list) = list else {
        return Ok(());
    };

    for (k, item) in list.items().iter().enumerate() {
        let marker = if list.highlight() == Some(k) { ">" } else { " " };
        writeln!(out, "{} {}. {} - {}", marker, k + 1, item.label(), item.price)?;
    }
    Ok(())
}

fn print_outcome(
    editor: &EstimateEditor,
    outcome: KeyOutcome,
    out: &mut impl Write,
) -> DeskResult<()> {
    match outcome {
        KeyOutcome::Focus(target) => writeln!(out, "Focus: {}", target)?,
        KeyOutcome::LineAdded { index } => writeln!(out, "Added line {}", index + 1)?,
        KeyOutcome::SuggestionSelected { line } => print_line(editor, line, out)?,
        KeyOutcome::SuggestionsClosed => writeln!(out, "Suggestions closed")?,
        KeyOutcome::Highlight(_) => print_suggestions(editor.suggestions(), out)?,
        KeyOutcome::Saved => writeln!(
            out,
            "Saved estimate, grand total {}",
            editor.totals_view().grand_total
        )?,
        KeyOutcome::SaveRejected => {
            if let Some(notice) = editor.notice() {
                writeln!(out, "! {}", notice)?;
            }
        }
        KeyOutcome::Cleared => writeln!(out, "Cleared")?,
        KeyOutcome::Ignored => {}
    }
    Ok(())
}

// =============================================================================
// Console Loop
// =============================================================================

/// Reads commands from stdin until `quit` or end of input.
///
/// Usage and editor errors are printed and the loop carries on.
pub async fn run_console(editor: &mut EstimateEditor) -> DeskResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut stdout = std::io::stdout().lock();
        let result = line
            .parse::<Command>()
            .and_then(|command| execute(editor, command, &mut stdout));

        match result {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(e) if e.is_recoverable() => writeln!(stdout, "! {}", e)?,
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_editor::{EditorConfig, FocusTarget, HostLink};

    use crate::catalog::sample_catalog;

    fn editor() -> EstimateEditor {
        EstimateEditor::mount(
            EditorConfig::default().with_inventory(sample_catalog()),
            HostLink::detached(),
        )
    }

    fn run(editor: &mut EstimateEditor, script: &[&str]) -> String {
        let mut out = Vec::new();
        for line in script {
            let command: Command = line.parse().unwrap();
            execute(editor, command, &mut out).unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("add".parse::<Command>().unwrap(), Command::Add);
        assert_eq!(
            "rm 2".parse::<Command>().unwrap(),
            Command::Remove { line: 1 }
        );
        assert_eq!(
            "set 1 item Cable tie pack".parse::<Command>().unwrap(),
            Command::Set {
                line: 0,
                field: LineField::Item,
                value: "Cable tie pack".into()
            }
        );
        assert_eq!(
            "SEARCH 1 4k".parse::<Command>().unwrap(),
            Command::Search {
                line: 0,
                term: "4k".into()
            }
        );
        assert_eq!("key shift-tab".parse::<Command>().unwrap(), Command::Key(Key::BackTab));
        assert_eq!("quit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_errors_are_usage() {
        for bad in ["rm 0", "rm", "set 1 colour red", "pick x", "key f1", "launch"] {
            let err = bad.parse::<Command>().unwrap_err();
            assert!(matches!(err, DeskError::Usage(_)), "{} gave {:?}", bad, err);
        }
    }

    #[test]
    fn test_reference_scenario() {
        let mut editor = editor();
        let out = run(
            &mut editor,
            &["set 1 qty 2", "set 1 rate 35000", "set 1 disc 5", "discount 10"],
        );

        assert!(out.contains("amount ₹66500.00"));
        assert!(out.ends_with("Grand Total: ₹70623.00\n"));
    }

    #[test]
    fn test_search_and_pick() {
        let mut editor = editor();
        let out = run(&mut editor, &["search 1 monitor", "pick 1", "set 1 qty 2"]);

        assert!(out.contains("  1. 4K Monitor (MONITOR001) - 35000.00"));
        assert!(out.contains("1. 4K Monitor (MONITOR001) | qty 2 | rate ₹35000.00 | disc 5%"));
        assert!(editor.suggestions().is_none());
    }

    #[test]
    fn test_key_navigation() {
        let mut editor = editor();
        let out = run(&mut editor, &["key tab", "key enter"]);

        assert!(out.contains("Focus: line 1 quantity"));
        assert!(out.contains("Focus: line 1 rate"));
        assert_eq!(
            editor.focus(),
            FocusTarget::Line {
                index: 0,
                field: LineField::Rate
            }
        );
    }

    #[test]
    fn test_editor_errors_are_recoverable() {
        let mut editor = editor();
        let mut out = Vec::new();

        let err = execute(&mut editor, Command::Remove { line: 4 }, &mut out).unwrap_err();
        assert!(err.is_recoverable());

        run(&mut editor, &["rm 1"]);
        let err = execute(&mut editor, Command::Save, &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Please add at least one item to the estimate");
    }

    #[test]
    fn test_missing_line_is_reported_by_its_number() {
        let mut editor = editor();
        let command: Command = "set 2 qty 1".parse().unwrap();
        let err = execute(&mut editor, command, &mut Vec::<u8>::new()).unwrap_err();
        assert_eq!(err.to_string(), "Line 2 does not exist (estimate has 1 lines)");
    }

    #[test]
    fn test_quit_stops() {
        let mut editor = editor();
        let mut out = Vec::new();
        assert_eq!(
            execute(&mut editor, Command::Quit, &mut out).unwrap(),
            Flow::Quit
        );
    }
}
