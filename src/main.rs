use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{error, warn};

use rofimenu::command::SystemExecutor;
use rofimenu::error::NavError;
use rofimenu::navigator::Navigator;
use rofimenu::picker::{Picker, RofiPicker};
use rofimenu::{config, logging};

const PICKER_ENV: &str = "ROFIMENU_PICKER";

#[derive(Parser, Debug)]
#[command(
    name = "rofimenu",
    version,
    about = "Nested menus, commands and confirmations on top of rofi -dmenu"
)]
struct Cli {
    /// Menu file. Defaults to $ROFIMENU_CONFIG, then ./menu.yaml.
    #[arg(value_name = "CONFIG")]
    config_path: Option<PathBuf>,

    /// Same as the positional CONFIG.
    #[arg(short, long, conflicts_with = "config_path")]
    config: Option<PathBuf>,

    /// Picker binary. Defaults to $ROFIMENU_PICKER, then `rofi`.
    #[arg(long)]
    picker: Option<String>,

    /// Validate the menu file and print a summary without showing anything.
    #[arg(long)]
    check: bool,

    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Extra flags passed verbatim to every picker invocation (e.g. `-- -theme dark`).
    #[arg(last = true)]
    picker_args: Vec<String>,
}

impl Cli {
    fn config_arg(&self) -> Option<&Path> {
        self.config_path.as_deref().or(self.config.as_deref())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let picker = RofiPicker::new(picker_program(&cli), cli.picker_args.clone());

    let result = if cli.check { check(&cli) } else { run(&cli, &picker) };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "rofimenu failed");
            if cli.check {
                eprintln!("Error: {err:#}");
            } else {
                report(&picker, &err);
            }
            ExitCode::FAILURE
        }
    }
}

fn picker_program(cli: &Cli) -> String {
    if let Some(p) = &cli.picker {
        return p.clone();
    }
    match env::var(PICKER_ENV) {
        Ok(p) if !p.trim().is_empty() => p,
        _ => rofimenu::picker::DEFAULT_PROGRAM.to_string(),
    }
}

fn run(cli: &Cli, picker: &RofiPicker) -> Result<()> {
    let path = config::resolve_config_path(cli.config_arg());
    let cfg = config::load(&path).context("loading menus")?;

    let output = Navigator::new(&cfg.menus, picker, SystemExecutor::new())
        .with_max_depth(cfg.options.max_depth)
        .start()?;

    if cfg.options.stdout && !output.is_empty() {
        println!("{}", output.trim_end_matches('\n'));
    }
    Ok(())
}

fn check(cli: &Cli) -> Result<()> {
    let path = config::resolve_config_path(cli.config_arg());
    let cfg = config::load(&path).context("loading menus")?;

    let menus = cfg.menus.menus();
    let items: usize = menus.iter().map(|m| m.items.len()).sum();
    for (menu, item) in cfg.menus.dangling_refs() {
        warn!(menu, item, "item references an unknown menu");
        eprintln!("warning: item `{item}` in menu `{menu}` references an unknown menu");
    }
    println!("{}: {} menus, {} items", path.display(), menus.len(), items);
    Ok(())
}

/// Shows `err` in a picker message box, unless the picker itself is what
/// failed.
fn report(picker: &RofiPicker, err: &anyhow::Error) {
    let picker_broken = err
        .downcast_ref::<NavError>()
        .is_some_and(NavError::is_picker_launch);
    if picker_broken {
        return;
    }
    if let Err(e) = picker.show_error(&format!("{err:#}")) {
        warn!(program = picker.program(), error = %e, "error dialog failed");
        eprintln!("Error: {err:#}");
    }
}
