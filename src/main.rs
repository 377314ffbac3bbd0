//! Church Visitors - register church visitors and share the list.
//!
//! Visitors are kept in a local storage database and can be searched,
//! exported to spreadsheet or CSV files, or sent as a WhatsApp message.
//!
//! QUICK START:
//!   visitantes add -n "Maria Silva" -p 11987654321 -c "São Paulo" -d 10/03/2024 -t 19:00
//!   visitantes list --search maria
//!   visitantes export xlsx
//!   visitantes whatsapp "(11) 99999-9999"

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::path::Path;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    build_outbound_message, clear_after_export, delete_all, delete_one, export, filter_visitors,
    format_notification, format_visitors_json, format_visitors_table, parse_service_date,
    parse_visitor_import, registered_notification, send_to_whatsapp, Field, FormController,
    OutboundMessage, OutputFormat, VisitorStore,
};
use cli::{Cli, Commands, ConfigCommand};
use domain::{AppConfig, AppError, Notification};
use infrastructure::{
    ensure_config_exists, load_config, render_config, save_download, AssumeYes, Confirm,
    LocalStorage, StdinPrompt, SystemOpener,
};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("{}", format_notification(&e.notification()));
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(cli: Cli) -> domain::Result<()> {
    let config = load_config(cli.data_dir.as_deref())?;

    match cli.command {
        Commands::Add {
            name,
            phone,
            city,
            date,
            time,
            obs,
        } => {
            let mut form = FormController::new();
            form.update_field(Field::FullName, &name);
            form.update_field(Field::Phone, &phone);
            form.update_field(Field::City, &city);
            form.select_date(Some(parse_service_date(&date)?));
            form.update_field(Field::ServiceTime, &time);
            form.update_field(Field::Observations, obs.as_deref().unwrap_or_default());
            cmd_add(&config, form)?;
        }
        Commands::List { search, format } => {
            let format = cli::parse_output_format(&format)
                .map_err(|message| AppError::Config { message })?;
            cmd_list(&config, search.as_deref(), format)?;
        }
        Commands::Export {
            format,
            search,
            dir,
            clear_after,
        } => {
            let kind = cli::parse_export_kind(&format)
                .map_err(|message| AppError::Config { message })?;
            let dir = dir.unwrap_or_else(|| config.exports_dir());
            let clear_after = clear_after || config.export.clear_after_spreadsheet;
            cmd_export(&config, kind, search.as_deref(), &dir, clear_after)?;
        }
        Commands::Whatsapp {
            number,
            search,
            no_open,
        } => {
            let number = number
                .or_else(|| config.whatsapp.default_number.clone())
                .unwrap_or_default();
            cmd_whatsapp(&config, &number, search.as_deref(), !no_open)?;
        }
        Commands::Delete { id, yes } => {
            cmd_delete(&config, &id, &mut *confirmer(yes))?;
        }
        Commands::Clear { yes } => {
            cmd_clear(&config, &mut *confirmer(yes))?;
        }
        Commands::Import { file } => {
            cmd_import(&config, &file)?;
        }
        Commands::Config { action } => {
            cmd_config(&config, &action)?;
        }
    }

    Ok(())
}

/// Open the visitor store for the configured data directory.
fn open_store(config: &AppConfig) -> domain::Result<VisitorStore<LocalStorage>> {
    let storage = LocalStorage::open(&config.storage_db_path())?;
    VisitorStore::load(storage)
}

fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinPrompt)
    }
}

fn notify(note: &Notification) {
    println!("{}", format_notification(note));
}

/// Register a visitor from a filled form.
fn cmd_add(config: &AppConfig, mut form: FormController) -> domain::Result<()> {
    let mut store = open_store(config)?;
    let date_label = form.selected_date_label();

    let visitor = form.submit(&mut store)?;

    notify(&registered_notification());
    println!(
        "  {} | {} | {} | {}",
        visitor.short_id(),
        visitor.full_name,
        visitor.phone,
        date_label.unwrap_or_else(|| visitor.service_date.clone())
    );

    Ok(())
}

/// List visitors command.
fn cmd_list(config: &AppConfig, search: Option<&str>, format: OutputFormat) -> domain::Result<()> {
    let store = open_store(config)?;
    let visitors = filter_visitors(store.visitors(), search.unwrap_or_default());

    let output = match format {
        OutputFormat::Table => format_visitors_table(&visitors, store.len()),
        OutputFormat::Json => format_visitors_json(&visitors).map_err(AppError::json_parse)?,
    };

    println!("{output}");
    Ok(())
}

/// Export visitors to a spreadsheet or CSV file.
fn cmd_export(
    config: &AppConfig,
    kind: application::ExportKind,
    search: Option<&str>,
    dir: &Path,
    clear_after: bool,
) -> domain::Result<()> {
    let mut store = open_store(config)?;

    let file = {
        let visitors = filter_visitors(store.visitors(), search.unwrap_or_default());
        export(kind, &visitors, Local::now())?
    };

    let path = save_download(dir, &file.file_name, &file.bytes)?;
    tracing::info!(path = %path.display(), rows = file.rows, "Export written");

    notify(&file.notification());
    println!("  {}", path.display());

    if let Some(removed) = clear_after_export(&mut store, kind, clear_after)? {
        notify(&Notification::success(
            "Lista limpa",
            format!("{removed} visitante(s) removido(s) após a exportação."),
        ));
    }

    Ok(())
}

/// Build the WhatsApp message and open it.
fn cmd_whatsapp(
    config: &AppConfig,
    number: &str,
    search: Option<&str>,
    open: bool,
) -> domain::Result<()> {
    let store = open_store(config)?;
    let visitors = filter_visitors(store.visitors(), search.unwrap_or_default());

    if !open {
        let message = build_outbound_message(&visitors, number, Local::now())?;
        println!("{}", message.url);
        return Ok(());
    }

    let message = send_to_whatsapp(&visitors, number, Local::now(), &mut SystemOpener)?;
    println!("{}", message.url);
    notify(&OutboundMessage::notification());

    Ok(())
}

/// Delete one visitor after confirmation.
fn cmd_delete(config: &AppConfig, id: &str, confirm: &mut dyn Confirm) -> domain::Result<()> {
    let mut store = open_store(config)?;
    if let Some(note) = delete_one(&mut store, id, confirm)? {
        notify(&note);
    }
    Ok(())
}

/// Delete every visitor after confirmation.
fn cmd_clear(config: &AppConfig, confirm: &mut dyn Confirm) -> domain::Result<()> {
    let mut store = open_store(config)?;
    if let Some(note) = delete_all(&mut store, confirm)? {
        notify(&note);
    }
    Ok(())
}

/// Import visitors from a browser export.
fn cmd_import(config: &AppConfig, file: &Path) -> domain::Result<()> {
    let data = std::fs::read(file)
        .map_err(|e| AppError::io(format!("Failed to read {}", file.display()), e))?;
    let records = parse_visitor_import(&data)?;
    let offered = records.len();

    let mut store = open_store(config)?;
    let added = store.import(records)?;

    notify(&Notification::success(
        "Importação concluída",
        format!(
            "{added} de {offered} visitante(s) importado(s); {} já existiam.",
            offered - added
        ),
    ));
    Ok(())
}

/// Configuration commands.
fn cmd_config(config: &AppConfig, action: &ConfigCommand) -> domain::Result<()> {
    match action {
        ConfigCommand::Init => {
            let path = ensure_config_exists(config)?;
            println!("{}", path.display());
        }
        ConfigCommand::Show => {
            println!("{}", render_config(config)?);
            println!("# storage: {}", config.storage_db_path().display());
            println!("# exports: {}", config.exports_dir().display());
        }
        ConfigCommand::Path => {
            println!("{}", config.config_file_path().display());
        }
    }
    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
