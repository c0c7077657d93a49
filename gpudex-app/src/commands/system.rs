//! Help, status, suggestions, catalogue reload and session control.

use super::{command_table, Invocation, RULE};
use crate::error::CommandError;
use crate::state::AppState;

pub(super) fn help(_state: &mut AppState, _invocation: &Invocation) -> Result<String, CommandError> {
    Ok(command_reference())
}

fn command_reference() -> String {
    let mut lines = Vec::new();
    let mut section = "";

    for spec in command_table() {
        if spec.section != section {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push(format!("[{}]", spec.section));
            section = spec.section;
        }
        lines.push(format!("   {:<46} {}", spec.usage, spec.summary));
    }

    lines.join("\n")
}

pub(super) fn full_help(
    _state: &mut AppState,
    _invocation: &Invocation,
) -> Result<String, CommandError> {
    let rule = "=".repeat(70);
    let lines = [
        String::new(),
        rule.clone(),
        "                    GPUDEX - FULL GUIDE".to_string(),
        rule.clone(),
        String::new(),
        command_reference(),
        String::new(),
        "[PRACTICAL EXAMPLES]".to_string(),
        "   search rtx 4060              Search GPUs".to_string(),
        "   gpu show 1                   Show details of the first result".to_string(),
        "   list new \"My Comparison\"     Create a list".to_string(),
        "   gpu add 1                    Add the first result to the list".to_string(),
        "   gpu compare \"GeForce RTX 4060\" \"Radeon RX 7600\"".to_string(),
        "   gpu remove -m 1 3            Remove positions 1 and 3".to_string(),
        "   list export -f xlsx          Export as a spreadsheet".to_string(),
        "   list switch Gaming           Switch list".to_string(),
        String::new(),
        "[QUICK TIPS]".to_string(),
        "   - Use result numbers instead of full names".to_string(),
        "   - Quote names that contain spaces when a command takes two names".to_string(),
        "   - Use 'suggest' if unsure what to do".to_string(),
        "   - Lists are saved automatically".to_string(),
        String::new(),
        rule,
    ];
    Ok(lines.join("\n"))
}

pub(super) fn suggest(state: &mut AppState, _invocation: &Invocation) -> Result<String, CommandError> {
    let mut tips = Vec::new();

    if state.engine.catalog().is_empty() {
        tips.push(
            "The GPU catalogue is empty. Check the catalog path in your configuration.".to_string(),
        );
    }

    if state.session.results().is_empty() {
        tips.push("Start with a search, e.g. 'search rtx 4060'.".to_string());
    } else {
        tips.push(format!(
            "Your last search '{}' has {} results: try 'gpu show 1' or 'gpu add 1'.",
            state.session.last_query(),
            state.session.results().len()
        ));
    }

    match state.registry.active() {
        None if state.registry.is_empty() => {
            tips.push("Create a list to collect GPUs: 'list new <name>'.".to_string());
        }
        None => tips.push(format!(
            "You have {} saved lists but none is active: 'list all', then 'list switch <name>'.",
            state.registry.len()
        )),
        Some(list) if list.is_full() => tips.push(format!(
            "List '{}' is full. Export it with 'list export' or remove GPUs with 'gpu remove'.",
            list.name()
        )),
        Some(list) if list.is_empty() => tips.push(format!(
            "List '{}' is empty. Add GPUs with 'gpu add <number|name>'.",
            list.name()
        )),
        Some(list) if list.len() >= 2 => tips.push(format!(
            "List '{}' has {} GPUs. Compare two with 'gpu compare', or export with 'list export -f xlsx'.",
            list.name(),
            list.len()
        )),
        Some(list) => tips.push(format!(
            "List '{}' has one GPU. Add another to compare them.",
            list.name()
        )),
    }

    let mut lines = vec!["[SUGGESTIONS]".to_string(), "-".repeat(RULE)];
    lines.extend(tips.into_iter().map(|tip| format!("  - {tip}")));
    Ok(lines.join("\n"))
}

pub(super) fn status(state: &mut AppState, _invocation: &Invocation) -> Result<String, CommandError> {
    let query = state.session.last_query();
    let mut lines = vec![
        "[SYSTEM STATUS]".to_string(),
        "-".repeat(RULE),
        format!(
            "Last search: '{}'",
            if query.is_empty() { "None" } else { query }
        ),
        format!("Saved results: {}", state.session.results().len()),
    ];

    match state.registry.status() {
        Some(status) => lines.push(status.to_string().trim_end().to_string()),
        None => lines.push("Active list: None".to_string()),
    }

    lines.push(format!("Saved lists: {}", state.registry.len()));
    lines.push(format!("Database: {} GPUs", state.engine.catalog().len()));
    lines.push(format!("Cached searches: {}", state.engine.cached_queries()));
    lines.push("-".repeat(RULE));
    Ok(lines.join("\n"))
}

pub(super) fn reload_catalog(
    state: &mut AppState,
    _invocation: &Invocation,
) -> Result<String, CommandError> {
    let count = state.reload_catalog()?;
    Ok(format!("[SUCCESS] Catalogue reloaded: {count} GPUs."))
}

pub(super) fn clear_session(
    state: &mut AppState,
    _invocation: &Invocation,
) -> Result<String, CommandError> {
    state.session.clear();
    Ok("[SUCCESS] Session cleared. Ready for a new search.".to_string())
}

pub(super) fn exit(_state: &mut AppState, _invocation: &Invocation) -> Result<String, CommandError> {
    Ok("Exiting gpudex... Goodbye!".to_string())
}
