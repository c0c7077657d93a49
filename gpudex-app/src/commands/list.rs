//! `list ...` commands.

use super::{with_persistence, Invocation};
use crate::error::CommandError;
use crate::state::AppState;
use gpudex_core::MAX_LIST_SIZE;
use gpudex_export::ExportFormat;

const NO_ACTIVE: &str = "[INFO] Active list: None\n\
                         Use 'list new <name>' to create one or 'list all' to see saved lists.";

pub(super) fn create(state: &mut AppState, invocation: &Invocation) -> Result<String, CommandError> {
    let name = invocation.rest().unwrap_or_default();
    let applied = state.registry.create(&name)?;
    Ok(with_persistence(
        format!("[SUCCESS] List '{}' created and set as active.", applied.value),
        &applied,
    ))
}

pub(super) fn status(state: &mut AppState, _invocation: &Invocation) -> Result<String, CommandError> {
    Ok(match state.registry.status() {
        Some(status) => format!("{status}This list is saved automatically."),
        None => NO_ACTIVE.to_string(),
    })
}

pub(super) fn show(state: &mut AppState, _invocation: &Invocation) -> Result<String, CommandError> {
    Ok(match state.registry.details() {
        Some(details) => details.to_string().trim_end().to_string(),
        None => NO_ACTIVE.to_string(),
    })
}

pub(super) fn export(state: &mut AppState, invocation: &Invocation) -> Result<String, CommandError> {
    let format = match invocation.value("format") {
        Some(raw) => raw.parse::<ExportFormat>()?,
        None => state.default_export_format(),
    };

    let list = state.registry.active_entries()?;
    let path = state
        .exporter
        .export(list, format, invocation.value("output"))?;

    Ok(format!(
        "[SUCCESS] List '{}' exported as {} ({} GPUs): {}",
        list.name(),
        format.extension().to_uppercase(),
        list.len(),
        path.display()
    ))
}

pub(super) fn clear(state: &mut AppState, _invocation: &Invocation) -> Result<String, CommandError> {
    Ok(match state.registry.clear_active() {
        Some(applied) => with_persistence(
            format!(
                "[SUCCESS] Current list cleared ({} GPUs removed).",
                applied.value
            ),
            &applied,
        ),
        None => "[INFO] No active list to clear.".to_string(),
    })
}

pub(super) fn all(state: &mut AppState, _invocation: &Invocation) -> Result<String, CommandError> {
    let overview = state.registry.all_lists();
    if overview.is_empty() {
        return Ok("[INFO] No saved lists. Use 'list new <name>' to create one.".to_string());
    }

    let mut lines = vec![format!("[SAVED LISTS] {}", overview.len())];
    lines.extend(overview.iter().map(ToString::to_string));
    lines.push(String::new());
    lines.push("* = active list".to_string());
    Ok(lines.join("\n"))
}

pub(super) fn switch(state: &mut AppState, invocation: &Invocation) -> Result<String, CommandError> {
    let name = invocation.rest().unwrap_or_default();
    let list = state.registry.switch_active(&name)?;
    Ok(format!(
        "[SUCCESS] Switched to list '{}' ({}/{MAX_LIST_SIZE})",
        list.name(),
        list.len()
    ))
}

pub(super) fn delete(state: &mut AppState, invocation: &Invocation) -> Result<String, CommandError> {
    let name = invocation.rest().unwrap_or_default();
    let applied = state.registry.delete(&name)?;
    Ok(with_persistence(
        format!("[SUCCESS] List '{}' deleted.", applied.value),
        &applied,
    ))
}

pub(super) fn rename(state: &mut AppState, invocation: &Invocation) -> Result<String, CommandError> {
    let old = invocation.arg(0).unwrap_or_default();
    let new = invocation.arg(1).unwrap_or_default();
    let applied = state.registry.rename(old, new)?;
    Ok(with_persistence(
        format!("[SUCCESS] List '{}' renamed to '{}'.", old.trim(), applied.value),
        &applied,
    ))
}

pub(super) fn load(state: &mut AppState, _invocation: &Invocation) -> Result<String, CommandError> {
    let count = state.registry.reload()?;
    Ok(format!(
        "[SUCCESS] Loaded {count} lists from {}. Use 'list all' to view.",
        state.config.lists.directory.display()
    ))
}
