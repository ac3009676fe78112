//! # Rendering
//!
//! Turns command results into terminal text. Layout (width, truncation,
//! padding) is computed with `unicode-width` so names in any script line up.
//! Functions return strings; the handlers decide where they go.

use chrono::{DateTime, Utc};
use colored::*;
use contactor::api::{CmdMessage, MessageLevel};
use contactor::config::{ContactorConfig, KEYS};
use contactor::index::DisplayContact;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const NAME_WIDTH: usize = 32;
pub const PHONE_WIDTH: usize = 20;
pub const TIME_WIDTH: usize = 16;

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
            MessageLevel::Warning => message.content.yellow(),
            MessageLevel::Error => message.content.red(),
        };
        out.push_str(&format!("{}\n", line));
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

pub fn render_contact_list(contacts: &[DisplayContact]) -> String {
    if contacts.is_empty() {
        return "No contacts found.\n".to_string();
    }

    let idx_width = contacts
        .iter()
        .map(|d| d.index.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for dp in contacts {
        let idx = format!("{:>width$}.", dp.index, width = idx_width);
        let name = pad_to_width(&truncate_to_width(&dp.contact.name, NAME_WIDTH), NAME_WIDTH);
        let phone = pad_to_width(
            &truncate_to_width(&dp.contact.phone_number, PHONE_WIDTH),
            PHONE_WIDTH,
        );
        let time_ago = format_time_ago(dp.contact.updated_at);

        out.push_str(&format!(
            "  {} {} {} {}\n",
            idx.yellow(),
            name.bold(),
            phone,
            time_ago.dimmed()
        ));
    }
    out
}

pub fn render_full_contacts(contacts: &[DisplayContact]) -> String {
    let mut out = String::new();
    for (i, dp) in contacts.iter().enumerate() {
        if i > 0 {
            out.push_str("\n--------------------------------\n\n");
        }
        out.push_str(&format!(
            "{} {}\n",
            format!("{}.", dp.index).yellow(),
            dp.contact.name.bold()
        ));
        out.push_str(&format!("  {:<8}{}\n", "Phone", dp.contact.phone_number));
        if let Some(photo) = &dp.contact.photo {
            out.push_str(&format!("  {:<8}{}\n", "Photo", photo));
        }
        out.push_str(&format!(
            "  {:<8}{}\n",
            "Added",
            format_timestamp(dp.contact.created_at)
        ));
        out.push_str(&format!(
            "  {:<8}{}\n",
            "Updated",
            format_timestamp(dp.contact.updated_at)
        ));
        out.push_str(&format!("  {:<8}{}\n", "Id", dp.contact.id.to_string().dimmed()));
    }
    out
}

pub fn render_config(config: &ContactorConfig) -> String {
    KEYS.iter()
        .filter_map(|key| config.get(key).ok().map(|val| format!("{} = {}\n", key, val)))
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    format!(
        "{} ({})",
        timestamp.format("%Y-%m-%d %H:%M"),
        format_time_ago(timestamp).trim()
    )
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
