//! Line-oriented terminal front end for the to-do list.
//!
//! Reads one command per line from stdin, forwards it to the store as a view
//! event and prints the list again. Positions are 1-based and always refer
//! to the full list, whatever filter is active. A position names a row of
//! the list as last printed; the event carries that row's id.

use anyhow::Context;
use tasklist::{Config, Key, TodoId, TodoStore, ViewEvent, ViewModel};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
Commands:
  add <text>          add a task
  toggle <n>          mark task n completed / pending
  edit <n>            start editing task n
  commit <n> <text>   save the edit of task n
  cancel <n>          abandon the edit of task n
  delete <n>          remove task n
  filter <mode>       show all | completed | remaining
  list                print the list
  help                print this help
  quit                exit";

/// One parsed input line
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Event(ViewEvent),
    Row { position: usize, input: RowInput },
    List,
    Help,
    Quit,
}

/// Something done to one printed row
#[derive(Debug, PartialEq, Eq)]
enum RowInput {
    Toggle,
    Edit,
    Commit(String),
    Cancel,
    Delete,
}

impl RowInput {
    fn event(self, id: TodoId) -> ViewEvent {
        match self {
            Self::Toggle => ViewEvent::ToggleClicked { id },
            Self::Edit => ViewEvent::TitleClicked { id },
            Self::Commit(text) => ViewEvent::EditKey {
                id,
                key: Key::Enter,
                text,
            },
            Self::Cancel => ViewEvent::EditKey {
                id,
                key: Key::Escape,
                text: String::new(),
            },
            Self::Delete => ViewEvent::DeleteClicked { id },
        }
    }
}

fn parse_position(arg: &str) -> Result<usize, String> {
    arg.trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| format!("expected a task number starting at 1, got {arg:?}"))
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match verb.to_ascii_lowercase().as_str() {
        "add" => Command::Event(ViewEvent::NewTodoKey {
            key: Key::Enter,
            text: rest.to_string(),
        }),
        "toggle" => Command::Row {
            position: parse_position(rest)?,
            input: RowInput::Toggle,
        },
        "edit" => Command::Row {
            position: parse_position(rest)?,
            input: RowInput::Edit,
        },
        "commit" => {
            let (position, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Command::Row {
                position: parse_position(position)?,
                input: RowInput::Commit(text.to_string()),
            }
        },
        "cancel" => Command::Row {
            position: parse_position(rest)?,
            input: RowInput::Cancel,
        },
        "delete" => Command::Row {
            position: parse_position(rest)?,
            input: RowInput::Delete,
        },
        "filter" => Command::Event(ViewEvent::FilterClicked {
            title: rest.to_string(),
        }),
        "list" => Command::List,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command {other:?}; try `help`")),
    };
    Ok(Some(command))
}

fn render(view: &ViewModel) -> String {
    let mut out = format!(
        "Todos ({} total, {} completed, {} remaining)\nFilter:",
        view.total, view.completed, view.remaining
    );
    for option in &view.filters {
        if option.active {
            out.push_str(&format!(" [{}]", option.label));
        } else {
            out.push_str(&format!(" {}", option.label));
        }
    }
    out.push('\n');

    if view.items.is_empty() {
        out.push_str("  (nothing to show)\n");
    }
    for item in &view.items {
        let check = if item.completed { 'x' } else { ' ' };
        let marker = if item.editing { " (editing)" } else { "" };
        out.push_str(&format!(
            "  {:>2}. [{check}] {}{marker}  Status: {}\n",
            item.index + 1,
            item.title,
            item.status
        ));
    }
    out
}

/// Id of the row printed at full-list `position`, if it was printed
fn row_id(view: &ViewModel, position: usize) -> Option<TodoId> {
    view.items
        .iter()
        .find(|item| item.index == position)
        .map(|item| item.id)
}

async fn print_list(store: &TodoStore) -> ViewModel {
    let view = tasklist::view_model(store).await;
    print!("{}", render(&view));
    view
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env().context("invalid configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(
        use_seed_data = config.use_seed_data,
        seed_path = ?config.seed_path,
        "Configuration loaded"
    );

    let store = tasklist::open(&config)
        .await
        .context("failed to build the todo store")?;

    println!("{HELP}\n");
    let mut shown = print_list(&store).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let event = match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(Command::Event(event))) => event,
            Ok(Some(Command::Row { position, input })) => match row_id(&shown, position) {
                Some(id) => input.event(id),
                None => {
                    println!("error: task {} is not on screen", position + 1);
                    continue;
                },
            },
            Ok(Some(Command::List)) => {
                shown = print_list(&store).await;
                continue;
            },
            Ok(Some(Command::Help)) => {
                println!("{HELP}");
                continue;
            },
            Ok(Some(Command::Quit)) => break,
            Err(message) => {
                println!("error: {message}");
                continue;
            },
        };

        match tasklist::dispatch(&store, event).await {
            Ok(()) => shown = print_list(&store).await,
            Err(err) => println!("error: {err}"),
        }
    }

    store.shutdown();
    Ok(())
}
