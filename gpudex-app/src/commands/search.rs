//! `search` and `results`.

use super::{hit_lines, with_persistence, Invocation, RULE};
use crate::error::CommandError;
use crate::state::AppState;
use gpudex_catalog::{Refinements, SearchEngine};
use gpudex_core::MAX_LIST_SIZE;

pub(super) fn search(state: &mut AppState, invocation: &Invocation) -> Result<String, CommandError> {
    let query = invocation.rest().unwrap_or_default();
    let hits = state.engine.search(&query);
    state.session.record(query.clone(), hits.clone());

    if hits.is_empty() {
        if SearchEngine::is_too_general(&query) {
            return Ok(format!(
                "[WARNING] '{query}' is too general to search.\n{}",
                Refinements::for_query(&query)
            ));
        }
        let mut message = format!("No results found for: {query}");
        if state.engine.catalog().is_empty() {
            message.push_str(" (the GPU catalogue is empty)");
        }
        return Err(CommandError::new("NO_RESULTS", message));
    }

    let mut lines = vec![
        format!("[RESULTS FOR] '{query}'"),
        format!("[Total found] {} GPUs", hits.len()),
        "-".repeat(RULE),
    ];
    lines.extend(hit_lines(&hits));

    if state.engine.is_capped(&hits) {
        lines.push(String::new());
        lines.push("[WARNING] TOO GENERAL SEARCH".to_string());
        lines.push("-".repeat(RULE));
        lines.push(Refinements::for_query(&query).to_string().trim_end().to_string());
    }

    lines.push(String::new());
    if invocation.has("add") {
        let first = &hits[0].title;
        let line = match state.registry.add_to_active(first, &state.engine) {
            Ok(applied) => with_persistence(
                format!(
                    "[SUCCESS] '{}' added to '{}' ({}/{MAX_LIST_SIZE})",
                    applied.value.gpu, applied.value.list, applied.value.count
                ),
                &applied,
            ),
            Err(e) => CommandError::from(e).to_string(),
        };
        lines.push(line);
    } else {
        lines.push("Use 'gpu show <number>' to view details.".to_string());
        lines.push("Use 'gpu add <number>' to add a result to the active list.".to_string());
    }

    Ok(lines.join("\n"))
}

pub(super) fn results(state: &mut AppState, _invocation: &Invocation) -> Result<String, CommandError> {
    let hits = state.session.results();
    if hits.is_empty() {
        return Ok([
            "[INFO] No recent search results.",
            "Use 'search <terms>' to search GPUs",
            "Example: 'search rtx 4060'",
        ]
        .join("\n"));
    }

    let mut lines = vec![
        format!("[LAST SEARCH] '{}'", state.session.last_query()),
        "-".repeat(RULE),
    ];
    lines.extend(hit_lines(hits));
    lines.extend([
        String::new(),
        "[WHAT YOU CAN DO NOW]".to_string(),
        "  'gpu show 1' - Show details of the first GPU".to_string(),
        "  'gpu add 1' - Add the first GPU to your list".to_string(),
        "  'gpu add \"Exact Name\"' - Add a specific GPU".to_string(),
        "  'search \"new terms\"' - Perform another search".to_string(),
    ]);

    Ok(lines.join("\n"))
}
