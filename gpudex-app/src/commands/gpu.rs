//! `gpu show`, `gpu compare`, `gpu add` and `gpu remove`.

use super::{parse_index, with_persistence, Invocation};
use crate::error::CommandError;
use crate::state::AppState;
use gpudex_catalog::{GpuRecord, RecordField, ValueFormat};
use gpudex_core::MAX_LIST_SIZE;

const SHOW_USAGE: &str = "gpu show <number>";
const REMOVE_USAGE: &str = "gpu remove -i <number> | -n <name> | -m <numbers...>";

/// Details view layout: section heading, then label, field and format per line.
const DETAIL_SECTIONS: &[(Option<&str>, &[(&str, RecordField, ValueFormat)])] = &[
    (
        None,
        &[
            ("Manufacturer:", RecordField::Manufacturer, ValueFormat::Raw),
            ("Architecture:", RecordField::Architecture, ValueFormat::Raw),
            ("Release Date:", RecordField::ReleaseDate, ValueFormat::Raw),
        ],
    ),
    (
        Some("PERFORMANCE"),
        &[("FP32:", RecordField::Fp32, ValueFormat::TwoDecimal)],
    ),
    (
        Some("GRAPHICS"),
        &[
            ("Base Clock:", RecordField::BaseClock, ValueFormat::Integer),
            ("Boost Clock:", RecordField::BoostClock, ValueFormat::Integer),
        ],
    ),
    (
        Some("MEMORY"),
        &[
            ("Size:", RecordField::MemorySize, ValueFormat::OneDecimal),
            ("Type:", RecordField::MemoryType, ValueFormat::Raw),
            ("Bus:", RecordField::MemoryBus, ValueFormat::Integer),
            ("Bandwidth:", RecordField::Bandwidth, ValueFormat::OneDecimal),
        ],
    ),
    (
        Some("SPECIFICATIONS"),
        &[
            ("Shading Units:", RecordField::ShadingUnits, ValueFormat::Integer),
            ("TDP:", RecordField::Tdp, ValueFormat::Raw),
            ("Suggested PSU:", RecordField::SuggestedPsu, ValueFormat::Raw),
        ],
    ),
];

pub(super) fn show(state: &mut AppState, invocation: &Invocation) -> Result<String, CommandError> {
    let index = parse_index(invocation.arg(0).unwrap_or_default(), SHOW_USAGE)?;
    let results = state.session.results();

    if results.is_empty() {
        return Err(CommandError::new(
            "NO_RESULTS",
            "No recent searches. Use 'search <query>' first.",
        ));
    }

    let hit = state.session.result(index).ok_or_else(|| {
        CommandError::new(
            "INDEX_OUT_OF_RANGE",
            format!("Invalid index. Must be between 1 and {}.", results.len()),
        )
    })?;

    let record = state.engine.details(&hit.title)?;
    Ok(format_details(record))
}

fn format_details(record: &GpuRecord) -> String {
    let rule = "=".repeat(super::RULE);
    let mut lines = vec![format!("DETAILS FOR: {}", record.name), rule.clone()];

    for (heading, fields) in DETAIL_SECTIONS {
        if let Some(heading) = heading {
            lines.push(String::new());
            lines.push(format!("[{heading}]"));
        }
        for &(label, field, format) in *fields {
            let value = record.field(field);
            let mut rendered = value.render(format);
            // Text fields such as TDP sometimes carry their unit already.
            if let (false, Some(unit)) = (value.is_missing(), field.unit()) {
                if !rendered.ends_with(unit) {
                    rendered = format!("{rendered} {unit}");
                }
            }
            lines.push(format!("{label:<20} {rendered}"));
        }
    }

    lines.push(rule);
    lines.push(format!(
        "Use 'gpu add \"{}\"' to add it to the active list.",
        record.name
    ));
    lines.join("\n")
}

pub(super) fn compare(state: &mut AppState, invocation: &Invocation) -> Result<String, CommandError> {
    let first = invocation.arg(0).unwrap_or_default();
    let second = invocation.arg(1).unwrap_or_default();

    let table = gpudex_compare::compare(state.engine.catalog(), first, second)?;
    Ok(table.to_string().trim_end().to_string())
}

pub(super) fn add(state: &mut AppState, invocation: &Invocation) -> Result<String, CommandError> {
    let argument = invocation.rest().unwrap_or_default();

    // A number naming one of the last results picks it; anything else,
    // including numbers like "4060", is looked up as a GPU name.
    let query = argument
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|index| state.session.result(index))
        .map_or(argument, |hit| hit.title.clone());

    let applied = state.registry.add_to_active(&query, &state.engine)?;
    Ok(with_persistence(
        format!(
            "[SUCCESS] '{}' added to '{}' ({}/{MAX_LIST_SIZE})",
            applied.value.gpu, applied.value.list, applied.value.count
        ),
        &applied,
    ))
}

pub(super) fn remove(state: &mut AppState, invocation: &Invocation) -> Result<String, CommandError> {
    let selectors = ["index", "name", "multiple"]
        .iter()
        .filter(|s| invocation.has(s))
        .count();

    match selectors {
        0 => {
            return Err(CommandError::usage(
                "Missing arguments for 'gpu remove'. Choose how to remove:\n  \
                 -i <number>     Remove by position in the list\n  \
                 -n <name>       Remove by GPU name (partial match)\n  \
                 -m <numbers>    Remove several positions at once\n\
                 [TIP] Use 'list show' to see positions in your list",
                REMOVE_USAGE,
            ))
        }
        1 => {}
        _ => {
            return Err(CommandError::usage(
                "Use only ONE option: -i <index> OR -n <name> OR -m <indices>",
                REMOVE_USAGE,
            ))
        }
    }

    if let Some(raw) = invocation.value("index") {
        let index = parse_index(raw, REMOVE_USAGE)?;
        let applied = state.registry.remove_by_index(index)?;
        return Ok(with_persistence(
            removed_message(state, &applied.value.name),
            &applied,
        ));
    }

    if let Some(parts) = invocation.values("name") {
        let applied = state.registry.remove_by_name(&parts.join(" "))?;
        return Ok(with_persistence(
            removed_message(state, &applied.value.name),
            &applied,
        ));
    }

    let indices = invocation
        .values("multiple")
        .unwrap_or_default()
        .iter()
        .map(|raw| parse_index(raw, REMOVE_USAGE))
        .collect::<Result<Vec<_>, _>>()?;

    let applied = state.registry.remove_batch(&indices)?;
    let list = active_name(state);
    let mut lines = vec![format!(
        "[SUCCESS] Removed {} GPUs from '{list}':",
        applied.value.len()
    )];
    lines.extend(applied.value.iter().map(|name| format!("  - {name}")));
    Ok(with_persistence(lines.join("\n"), &applied))
}

fn removed_message(state: &AppState, gpu: &str) -> String {
    format!("[SUCCESS] Removed '{gpu}' from '{}'", active_name(state))
}

fn active_name(state: &AppState) -> String {
    state
        .registry
        .active()
        .map(|list| list.name().to_string())
        .unwrap_or_default()
}
