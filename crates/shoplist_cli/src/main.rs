//! Thin shopping list client.
//!
//! # Responsibility
//! - Open the configured store once and inject it into `ListService`.
//! - Run one list operation per invocation and re-render the list after it.
//! - Poll and re-render on a fixed interval in `watch` mode.

mod config;
mod render;

use clap::Parser;
use config::{Backend, Cli, Command};
use log::info;
use render::render_view;
use shoplist_core::db::open_db;
use shoplist_core::{
    default_log_level, init_logging, ItemStore, JsonFileStore, ListService, SqliteSheetStore,
    UpdateOutcome,
};
use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or_else(|| default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("shoplist: {err}");
            return ExitCode::FAILURE;
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("shoplist: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let path = cli.store_path();
    info!(
        "event=cli_start module=cli status=ok backend={:?} store={}",
        cli.backend,
        path.display()
    );

    match cli.backend {
        Backend::Json => {
            let store = JsonFileStore::open(&path)?;
            execute(&ListService::new(store), &cli.command)
        }
        Backend::Sheet => {
            let conn = open_db(&path)?;
            let store = SqliteSheetStore::try_new(&conn)?;
            execute(&ListService::new(store), &cli.command)
        }
    }
}

fn execute<S: ItemStore>(
    service: &ListService<S>,
    command: &Command,
) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::List => {}
        Command::Add { name } => {
            let item = service.add_item(&name.join(" "))?;
            writeln!(out, "added '{}'", item.name)?;
        }
        Command::Check { name } => toggle(service, &mut out, &name.join(" "), true)?,
        Command::Uncheck { name } => toggle(service, &mut out, &name.join(" "), false)?,
        Command::ClearChecked => {
            service.clear_checked()?;
            writeln!(out, "cart cleared")?;
        }
        Command::ClearAll => {
            service.clear_all()?;
            writeln!(out, "list reset")?;
        }
        Command::Watch {
            interval_secs,
            iterations,
        } => return watch(service, &mut out, *interval_secs, *iterations),
    }

    render_view(&mut out, &service.view())?;
    Ok(())
}

fn toggle<S: ItemStore>(
    service: &ListService<S>,
    out: &mut impl Write,
    name: &str,
    checked: bool,
) -> Result<(), Box<dyn Error>> {
    if service.set_checked(name, checked)? == UpdateOutcome::NoMatch {
        writeln!(out, "no item named '{name}'")?;
    }
    Ok(())
}

fn watch<S: ItemStore>(
    service: &ListService<S>,
    out: &mut impl Write,
    interval_secs: u64,
    iterations: Option<u64>,
) -> Result<(), Box<dyn Error>> {
    let interval = Duration::from_secs(interval_secs);
    let mut refreshes = 0_u64;

    loop {
        writeln!(out, "--- refresh {} ---", refreshes + 1)?;
        render_view(&mut *out, &service.view())?;
        out.flush()?;

        refreshes += 1;
        if iterations.is_some_and(|limit| refreshes >= limit) {
            return Ok(());
        }
        thread::sleep(interval);
    }
}
