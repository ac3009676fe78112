use super::render::{
    print_messages, render_config, render_contact_list, render_full_contacts,
};
use super::setup::{Cli, Commands};
use clap::Parser;
use contactor::api::{ConfigAction, ContactEdit, ContactsApi};
use contactor::error::Result;
use contactor::init::{initialize, DynBackend};
use contactor::model::NewContact;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type Api = ContactsApi<DynBackend>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = initialize()?;
    let api = &mut ctx.api;

    match cli.command {
        Some(Commands::List { search }) => handle_list(api, search),
        Some(Commands::Search { term }) => handle_list(api, Some(term)),
        Some(Commands::View { selectors }) => handle_view(api, selectors),
        Some(Commands::Add { name, phone, photo }) => handle_add(api, name, phone, photo),
        Some(Commands::Edit {
            selector,
            name,
            phone,
            photo,
            clear_photo,
        }) => handle_edit(api, selector, name, phone, photo, clear_photo),
        Some(Commands::Delete { selectors }) => handle_delete(api, selectors),
        Some(Commands::Import { file }) => handle_import(api, &file),
        Some(Commands::Reset { yes }) => handle_reset(api, yes),
        Some(Commands::Path { selectors }) => handle_paths(api, selectors),
        Some(Commands::Config { key, value }) => handle_config(api, key, value),
        None => handle_list(api, None),
    }
}

/// Logs go to stderr so they never mix with command output.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("contactor=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn handle_list(api: &mut Api, search: Option<String>) -> Result<()> {
    let result = match search {
        Some(term) => api.search_contacts(&term)?,
        None => api.list_contacts()?,
    };
    print!("{}", render_contact_list(&result.listed_contacts));
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(api: &mut Api, selectors: Vec<String>) -> Result<()> {
    let result = api.view_contacts(&selectors)?;
    print!("{}", render_full_contacts(&result.listed_contacts));
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(api: &mut Api, name: String, phone: String, photo: Option<String>) -> Result<()> {
    let mut input = NewContact::new(name, phone);
    input.photo = photo.as_deref().map(photo_uri);
    let result = api.create_contact(input)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    api: &mut Api,
    selector: String,
    name: Option<String>,
    phone: Option<String>,
    photo: Option<String>,
    clear_photo: bool,
) -> Result<()> {
    let photo = if clear_photo {
        Some(None)
    } else {
        photo.as_deref().map(|p| Some(photo_uri(p)))
    };
    let edit = ContactEdit {
        name,
        phone_number: phone,
        photo,
    };
    let result = api.update_contact(&selector, edit)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(api: &mut Api, selectors: Vec<String>) -> Result<()> {
    let result = api.delete_contacts(&selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(api: &mut Api, file: &Path) -> Result<()> {
    let result = api.import_file(file)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_reset(api: &mut Api, yes: bool) -> Result<()> {
    let count = api.store().len();
    if count == 0 {
        println!("No contacts to remove.");
        return Ok(());
    }

    if !yes && !confirm(&format!("Delete all {} contacts? [y/N] ", count))? {
        println!("Aborted.");
        return Ok(());
    }

    let result = api.reset_contacts()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_paths(api: &mut Api, selectors: Vec<String>) -> Result<()> {
    let result = api.contact_paths(&selectors)?;
    for path in &result.contact_paths {
        println!("{}", path.display());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(api: &mut Api, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let is_show_all = matches!(action, ConfigAction::ShowAll);

    let result = api.config(action)?;
    if is_show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

/// Reads a yes/no answer. Anything but "y"/"yes", including no input, is no.
fn confirm(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        print!("{}", prompt);
        io::stdout().flush()?;
    }

    let mut answer = String::new();
    stdin.lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// URLs and data URIs pass through; anything else is a local path and
/// becomes an absolute `file://` URI.
fn photo_uri(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() || raw.contains("://") || raw.starts_with("data:") {
        return raw.to_string();
    }

    let path = PathBuf::from(raw);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&path))
            .unwrap_or(path)
    };
    format!("file://{}", absolute.display())
}
