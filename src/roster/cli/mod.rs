//! Command-line front end.
//!
//! Wires a file-backed [`Platform`] (storage under the roster data directory,
//! the desktop color scheme, an in-memory document) into a [`RosterApi`],
//! dispatches the parsed command and prints the result.
//!
//! ## Environment
//!
//! - `ROSTER_HOME`: use this directory for both config and data.
//! - `ROSTER_COLOR_SCHEME`: `light` or `dark` pins the reported system
//!   preference, `none` removes it. Unset means ask the desktop.

mod args;
mod print;
mod styles;

use args::{Cli, Commands, ThemeCommands, UserCommands};
use clap::Parser;
use directories::ProjectDirs;
use log::debug;
use print::{print_config, print_messages, print_theme, print_users};
use roster::api::{CmdMessage, RosterApi};
use roster::commands::users::UserPatch;
use roster::config::RosterConfig;
use roster::error::{Result, RosterError};
use roster::model::{FormData, Theme};
use roster::platform::document::Document;
use roster::platform::scheme::{ManualScheme, SystemScheme};
use roster::platform::{ColorSchemeSource, Platform};
use roster::store::fs::FsStorage;
use roster::store::{KeyValueStore, THEME_KEY};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use styles::Palette;

const HOME_ENV: &str = "ROSTER_HOME";
const COLOR_SCHEME_ENV: &str = "ROSTER_COLOR_SCHEME";

struct RosterPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl RosterPaths {
    fn resolve() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV) {
            let home = PathBuf::from(home);
            return Ok(Self {
                config_dir: home.clone(),
                data_dir: home,
            });
        }
        let dirs = ProjectDirs::from("com", "roster", "roster")
            .ok_or_else(|| RosterError::Api("Could not determine config dir".to_string()))?;
        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }
}

struct AppContext {
    api: RosterApi,
    document: Rc<Document>,
    system: Option<Rc<SystemScheme>>,
}

impl AppContext {
    /// Read at print time so a theme change shows up in the same run.
    fn palette(&self) -> Palette {
        Palette::for_document(&self.document)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    let paths = RosterPaths::resolve()?;
    let config = RosterConfig::load(&paths.config_dir)?;
    let origin = cli.origin.as_deref();

    match cli.command {
        Some(Commands::Config { key, value }) => handle_config(&paths, config, key, value),
        Some(Commands::Users { command }) => {
            let ctx = init_context(&paths, config, origin)?;
            handle_users(&ctx, command.unwrap_or(UserCommands::List))
        }
        Some(Commands::Theme { command }) => {
            let ctx = init_context(&paths, config, origin)?;
            handle_theme(&ctx, command.unwrap_or(ThemeCommands::Show))
        }
        None => {
            let ctx = init_context(&paths, config, origin)?;
            handle_users(&ctx, UserCommands::List)
        }
    }
}

fn init_logger(verbose: bool) -> Result<()> {
    let filter = if verbose {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Warn
    };

    simplelog::TermLogger::init(
        filter,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .map_err(|e| RosterError::Api(format!("Could not initialize logging: {}", e)))
}

fn init_context(
    paths: &RosterPaths,
    mut config: RosterConfig,
    origin: Option<&str>,
) -> Result<AppContext> {
    if let Some(origin) = origin {
        config.set_origin(origin)?;
    }
    let storage_path = config.storage_path(&paths.data_dir);
    debug!("Using storage at {}", storage_path.display());

    let document = Rc::new(Document::new());
    let mut platform = Platform::headless()
        .with_storage(Rc::new(FsStorage::new(storage_path)))
        .with_display(document.clone());

    let mut system = None;
    match std::env::var(COLOR_SCHEME_ENV).ok().as_deref() {
        None => {
            let scheme = Rc::new(SystemScheme::new());
            platform = platform.with_color_scheme(scheme.clone());
            system = Some(scheme);
        }
        Some("none") => {}
        Some(value) => {
            let pinned = value.parse::<Theme>()?;
            platform = platform.with_color_scheme(Rc::new(ManualScheme::new(pinned == Theme::Dark)));
        }
    }

    Ok(AppContext {
        api: RosterApi::init(platform),
        document,
        system,
    })
}

fn handle_users(ctx: &AppContext, command: UserCommands) -> Result<()> {
    let result = match command {
        UserCommands::List => ctx.api.list_users(),
        UserCommands::Add { name, email, role } => {
            ctx.api.add_user(FormData::new(name, email, role))?
        }
        UserCommands::Edit {
            id,
            name,
            email,
            role,
        } => {
            let patch = UserPatch { name, email, role };
            if patch.is_empty() {
                return Err(RosterError::Api(
                    "Nothing to change: pass --name, --email or --role".to_string(),
                ));
            }
            ctx.api.edit_user(id, patch)?
        }
        UserCommands::Delete { id } => ctx.api.delete_user(id)?,
    };

    let palette = ctx.palette();
    print_users(&palette, &result.listed_users);
    print_messages(&palette, &result.messages);
    Ok(())
}

fn handle_theme(ctx: &AppContext, command: ThemeCommands) -> Result<()> {
    let result = match command {
        ThemeCommands::Show => ctx.api.show_theme(),
        ThemeCommands::Set { theme } => ctx.api.set_theme(theme),
        ThemeCommands::Toggle => ctx.api.toggle_theme(),
        ThemeCommands::Clear => ctx.api.clear_theme(),
        ThemeCommands::Watch { interval_ms } => return handle_watch(ctx, interval_ms),
    };

    let palette = ctx.palette();
    print_messages(&palette, &result.messages);
    if let Some(report) = &result.theme {
        print_theme(&palette, report);
    }
    Ok(())
}

fn handle_watch(ctx: &AppContext, interval_ms: u64) -> Result<()> {
    let system = ctx.system.as_ref().ok_or_else(|| {
        RosterError::Api(format!(
            "theme watch needs the desktop color scheme (unset {})",
            COLOR_SCHEME_ENV
        ))
    })?;

    let document = Rc::clone(&ctx.document);
    let _printer = ctx.api.theme().subscribe(move |theme| {
        let palette = Palette::for_document(&document);
        println!("{}", palette.heading.apply_to(format!("theme: {}", theme)));
    });

    let interval = Duration::from_millis(interval_ms.max(1));
    loop {
        std::thread::sleep(interval);
        if system.poll() {
            debug!("System color scheme changed (dark={})", system.prefers_dark());
        }
    }
}

fn handle_config(
    paths: &RosterPaths,
    mut config: RosterConfig,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let palette = stored_palette(paths, &config);
    match (key.as_deref(), value) {
        (None, _) => print_config(&palette, &config),
        (Some("origin"), None) => println!("{}", config.origin),
        (Some("origin"), Some(v)) => {
            config.set_origin(&v)?;
            config.save(&paths.config_dir)?;
            print_messages(
                &palette,
                &[CmdMessage::success(format!(
                    "origin = {}",
                    config.origin
                ))],
            );
        }
        (Some(other), _) => {
            return Err(RosterError::Api(format!("Unknown config key: {}", other)));
        }
    }
    Ok(())
}

/// Palette from the origin's persisted theme, read without initializing the
/// stores (which would write to storage).
fn stored_palette(paths: &RosterPaths, config: &RosterConfig) -> Palette {
    let storage = FsStorage::new(config.storage_path(&paths.data_dir));
    let theme = storage
        .get_item(THEME_KEY)
        .ok()
        .flatten()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_default();
    Palette::for_theme(theme)
}
