//! Interactive form session: one line per keystroke-equivalent.

use anyhow::{Result, anyhow, bail};
use api::VectorBackend;
use console::style;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::debug;
use ui::views::{render_collections, render_help, render_results};
use ui::{ActionKind, FormController, FormField, Notifier, StoreState, VectorStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Set { field: FormField, value: String },
    Show,
    Action(ActionKind),
    Results,
    Collections,
    Help(String),
    Quit,
    Empty,
}

/// Parse one input line. The command word and field name are trimmed, but
/// the value of `set` is the rest of the line verbatim after the single
/// separating space, trailing whitespace included.
pub fn parse_line(line: &str) -> Result<ShellCommand> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    let body = line.trim_start();
    if body.trim_end().is_empty() {
        return Ok(ShellCommand::Empty);
    }
    let (head, rest) = match body.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest),
        None => (body, ""),
    };
    let cmd = match head.to_ascii_lowercase().as_str() {
        "set" => {
            let rest = rest.trim_start();
            let (name, value) = match rest.split_once(char::is_whitespace) {
                Some((name, value)) => (name, value),
                None => (rest.trim_end(), ""),
            };
            if name.is_empty() {
                bail!("usage: set <field> <value>");
            }
            ShellCommand::Set {
                field: name.parse()?,
                value: value.to_string(),
            }
        }
        "show" => ShellCommand::Show,
        "results" => ShellCommand::Results,
        "collections" => ShellCommand::Collections,
        "help" | "?" => ShellCommand::Help(rest.trim().to_string()),
        "quit" | "exit" => ShellCommand::Quit,
        other => ActionKind::from_command(other)
            .map(ShellCommand::Action)
            .ok_or_else(|| anyhow!("unknown command `{other}`; try `help`"))?,
    };
    Ok(cmd)
}

fn render_form<B: VectorBackend, N: Notifier>(controller: &FormController<B, N>) -> String {
    let mut out = String::new();
    for field in FormField::ALL {
        let value = controller.form.get(field);
        let shown = if value.is_empty() {
            style(field.hint()).dim().to_string()
        } else {
            value
        };
        out.push_str(&format!(
            "  {} {shown}\n",
            style(format!("{:<12}", field.name())).cyan()
        ));
    }
    out
}

/// Re-render a view whenever the part of the state it shows changes.
fn spawn_renderer<B: VectorBackend>(store: &VectorStore<B>) -> JoinHandle<()> {
    let mut rx = store.subscribe();
    let mut last: StoreState = rx.borrow_and_update().clone();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let next = rx.borrow_and_update().clone();
            if next.results != last.results {
                println!("\n{}", render_results(&next.results));
            }
            if next.collections != last.collections {
                println!("\n{}", render_collections(&next.collections));
            }
            last = next;
        }
    })
}

/// Run the shell on stdin until `quit` or end of input.
pub async fn run_shell<B: VectorBackend, N: Notifier>(
    controller: &mut FormController<B, N>,
) -> Result<()> {
    println!(
        "{} type `help` for fields and actions, `quit` to leave",
        style("vectordesk").bold()
    );
    run_session(controller, BufReader::new(tokio::io::stdin())).await
}

/// Drive a session from any line source. Actions are fire-and-forget; the
/// session waits for outstanding requests before returning, also on Ctrl-C.
pub async fn run_session<B, N, R>(controller: &mut FormController<B, N>, reader: R) -> Result<()>
where
    B: VectorBackend,
    N: Notifier,
    R: AsyncBufRead + Unpin,
{
    let renderer = spawn_renderer(controller.store());
    let mut lines = reader.lines();

    loop {
        let next = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted; waiting for pending requests");
                None
            }
        };
        let Some(line) = next else { break };
        let cmd = match parse_line(&line) {
            Ok(cmd) => cmd,
            Err(err) => {
                eprintln!("{} {err}", style("?").yellow());
                continue;
            }
        };
        match cmd {
            ShellCommand::Empty => {}
            ShellCommand::Quit => break,
            ShellCommand::Set { field, value } => {
                if let Err(err) = controller.form.set(field, &value) {
                    eprintln!("{} {err}", style("!").red().bold());
                }
            }
            ShellCommand::Show => print!("{}", render_form(controller)),
            ShellCommand::Action(kind) => {
                if let Some(id) = controller.press(kind) {
                    debug!(%id, action = %kind, "dispatched");
                }
            }
            ShellCommand::Results => {
                println!("{}", render_results(&controller.store().results()));
            }
            ShellCommand::Collections => {
                println!("{}", render_collections(&controller.store().collections()));
            }
            ShellCommand::Help(filter) => print!("{}", render_help(&filter)),
        }
    }

    controller.store().wait_idle().await;
    renderer.abort();
    Ok(())
}
