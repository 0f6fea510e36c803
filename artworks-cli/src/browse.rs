//! Interactive table session.

use artworks_lib::controller::Notice;
use artworks_lib::controller::TableController;
use artworks_lib::error::Error;
use artworks_lib::select::BulkSummary;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::error::CliError;
use crate::view;

const HELP: &str = "\
Commands:
  next | n           show the next page
  prev | p           show the previous page
  page <N>           jump to page N
  rows <N>           show N rows per page
  toggle <ID> | t    select or deselect a row on this page
  all                select or deselect every row on this page
  select <N> | s     select N more rows, continuing onto later pages
  clear              deselect everything
  selected           list selected rows
  show               redraw the table
  help | ?           show this help
  quit | q           exit";

/// A parsed REPL command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Page(usize),
    Rows(usize),
    Toggle(u64),
    ToggleAll,
    Select(usize),
    Clear,
    Selected,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Ok(Self::Show);
        };
        let arg = parts.next();

        let command = match name {
            "next" | "n" => Self::Next,
            "prev" | "p" => Self::Prev,
            "page" => Self::Page(number(name, arg)?),
            "rows" => Self::Rows(number(name, arg)?),
            "toggle" | "t" => Self::Toggle(number(name, arg)?),
            "all" => Self::ToggleAll,
            "select" | "s" => Self::Select(number(name, arg)?),
            "clear" => Self::Clear,
            "selected" => Self::Selected,
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(format!("unknown command `{other}`, try `help`")),
        };

        if parts.next().is_some() {
            return Err(format!("too many arguments for `{name}`"));
        }
        Ok(command)
    }
}

fn number<T: std::str::FromStr>(name: &str, arg: Option<&str>) -> Result<T, String> {
    let arg = arg.ok_or_else(|| format!("`{name}` needs a number"))?;
    arg.parse()
        .map_err(|_| format!("`{arg}` is not a valid number for `{name}`"))
}

/// Runs the interactive session until the user quits.
pub async fn run(controller: &mut TableController, start_page: usize) -> Result<(), CliError> {
    println!("Loading page {start_page}...");
    if let Err(e) = controller.load_page(start_page).await {
        controller.push_notice(Notice::error(format!("Could not load page {start_page}: {e}")));
    }
    print!("{}", view::render(controller));
    print_notices(controller);

    let mut editor = DefaultEditor::new()?;

    loop {
        let line = match editor.readline("artworks> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            if let Err(e) = editor.add_history_entry(line.as_str()) {
                log::debug!("history entry dropped: {e}");
            }
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        if !execute(controller, command).await? {
            break;
        }
        print_notices(controller);
    }

    Ok(())
}

/// Executes one command. Returns `false` when the session should end.
async fn execute(controller: &mut TableController, command: Command) -> Result<bool, CliError> {
    match command {
        Command::Next => {
            match controller.next_page().await {
                Ok(true) => print!("{}", view::render(controller)),
                Ok(false) => println!("Already on the last page"),
                Err(e) => controller.push_notice(Notice::error(format!("Could not load page: {e}"))),
            }
        }
        Command::Prev => {
            match controller.previous_page().await {
                Ok(true) => print!("{}", view::render(controller)),
                Ok(false) => println!("Already on the first page"),
                Err(e) => controller.push_notice(Notice::error(format!("Could not load page: {e}"))),
            }
        }
        Command::Page(page) => {
            let rows = controller.cursor().page_size;
            match page.saturating_sub(1).checked_mul(rows) {
                Some(first) => {
                    let result = controller.change_page(first, rows).await;
                    show_loaded(controller, result);
                }
                None => controller.push_notice(Notice::error(format!("Page {page} is out of range"))),
            }
        }
        Command::Rows(rows) => {
            let first = controller.cursor().first();
            let result = controller.change_page(first, rows).await;
            show_loaded(controller, result);
        }
        Command::Toggle(id) => match controller.toggle(id) {
            Some(_) => print!("{}", view::render(controller)),
            None => eprintln!("No row with id {id} on this page"),
        },
        Command::ToggleAll => {
            controller.toggle_page();
            print!("{}", view::render(controller));
        }
        Command::Select(count) => {
            controller.open_bulk_input();
            let clamped = controller.set_rows_to_select(count);
            if clamped < count {
                println!("Only {clamped} records exist, selecting up to {clamped}");
            }
            if let Some(summary) = bulk_select(controller).await? {
                print_summary(&summary);
            }
            print!("{}", view::render(controller));
        }
        Command::Clear => {
            controller.clear_selection();
            print!("{}", view::render(controller));
        }
        Command::Selected => {
            print!(
                "{}",
                view::render_rows(controller.selection().records(), controller.selection())
            );
            println!("{} selected", controller.selection().len());
        }
        Command::Show => print!("{}", view::render(controller)),
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn show_loaded(controller: &mut TableController, result: Result<(), Error>) {
    match result {
        Ok(()) => print!("{}", view::render(controller)),
        Err(e) => controller.push_notice(Notice::error(format!("Could not load page: {e}"))),
    }
}

/// Runs a bulk selection in the background; Ctrl-C cancels it.
async fn bulk_select(controller: &mut TableController) -> Result<Option<BulkSummary>, CliError> {
    let task = controller.begin_bulk_select();
    let cancel = task.cancel_token();
    let mut handle = tokio::spawn(task.run());

    println!("Selecting {} rows (Ctrl-C to stop)...", controller.rows_to_select());

    let report = tokio::select! {
        report = &mut handle => report?,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            println!("Cancelled");
            handle.await?
        }
    };

    Ok(controller.apply_bulk_select(report))
}

pub fn print_summary(summary: &BulkSummary) {
    println!(
        "Added {} of {} rows ({} extra pages fetched)",
        summary.added, summary.requested, summary.pages_fetched
    );
}

pub fn print_notices(controller: &mut TableController) {
    for notice in controller.drain_notices() {
        eprintln!("{notice}");
    }
}
