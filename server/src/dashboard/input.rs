use crate::dashboard::DashboardError;
use crate::dashboard::view::Tab;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};
use std::marker::PhantomData;
use std::str::FromStr;
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

pub type CommandEditor = Editor<EnumCompleter<Command>, DefaultHistory>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    Users,
    Cities,
    Events,
    Refresh,
    Help,
    Clear,
    Exit,
}

impl Command {
    /// The tab this command switches to, if any.
    pub fn tab(self) -> Option<Tab> {
        match self {
            Self::Users => Some(Tab::Users),
            Self::Cities => Some(Tab::Cities),
            Self::Events => Some(Tab::Events),
            Self::Refresh | Self::Help | Self::Clear | Self::Exit => None,
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::iter().map(Self::into).collect()
    }
}

/// Completes the word under the cursor with the names of `E`'s variants.
pub struct EnumCompleter<E> {
    _phantom_data: PhantomData<E>,
}

impl<E> EnumCompleter<E> {
    pub fn new() -> Self {
        Self {
            _phantom_data: PhantomData,
        }
    }
}

impl<E: IntoEnumIterator + Into<&'static str>> Completer for EnumCompleter<E> {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos].rfind(' ').map_or(0, |i| i + 1);
        let prefix = &line[start..pos];

        let matches: Vec<Pair> = E::iter()
            .map(E::into)
            .filter(|name: &&str| name.starts_with(prefix))
            .map(|name| Pair {
                display: name.to_owned(),
                replacement: name.to_owned(),
            })
            .collect();

        Ok((start, matches))
    }
}

impl<E> Hinter for EnumCompleter<E> {
    type Hint = String;
}
impl<E> Highlighter for EnumCompleter<E> {}
impl<E> Validator for EnumCompleter<E> {}
impl<E: IntoEnumIterator + Into<&'static str>> Helper for EnumCompleter<E> {}

pub fn create_editor() -> Result<CommandEditor, DashboardError> {
    let editor_config = Config::builder().completion_type(CompletionType::List).build();
    let mut editor = Editor::with_config(editor_config)?;
    editor.set_helper(Some(EnumCompleter::new()));
    Ok(editor)
}

/// Reads commands until a valid one is entered. Ctrl+C and Ctrl+D count as `exit`.
pub fn read_command(editor: &mut CommandEditor) -> Result<Command, DashboardError> {
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                match Command::from_str(trimmed) {
                    Ok(command) => return Ok(command),
                    Err(_) => eprintln!("Unknown command \"{trimmed}\". Expected one of {:?}", Command::names()),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(Command::Exit),
            Err(err) => return Err(err.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rustyline::history::MemHistory;

    #[test]
    fn parse_commands() {
        assert_eq!(Command::from_str("refresh"), Ok(Command::Refresh));
        assert_eq!(Command::from_str("events").map(Command::tab), Ok(Some(Tab::Events)));
        assert_eq!(Command::Help.tab(), None);
        assert!(Command::from_str("Refresh").is_err());
        assert_eq!(Command::names(), ["users", "cities", "events", "refresh", "help", "clear", "exit"]);
    }

    #[test]
    fn completion() {
        let completer = EnumCompleter::<Command>::new();
        let history = MemHistory::new();
        let context = Context::new(&history);

        let (start, candidates) = completer.complete("c", 1, &context).unwrap();
        assert_eq!(start, 0);
        let names: Vec<&str> = candidates.iter().map(|pair| pair.replacement.as_str()).collect();
        assert_eq!(names, ["cities", "clear"]);

        let (_, candidates) = completer.complete("ref", 3, &context).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].display, "refresh");
    }
}
