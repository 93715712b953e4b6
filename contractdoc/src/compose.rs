//! Composition of contract blocks into documentation lines.
//!
//! Every function here returns a flat list of lines without embedded line breaks. A
//! heading is only emitted together with at least one bullet below it.
use log::debug;

use crate::{
    bullet::bullet_item,
    condition::{condition_body, render_condition},
    config::RenderConfig,
    error_info::{compose_suffix, infer_error},
    markup::Section,
    model::{
        Accessor, Contract, ContractGroup, ContractSet, InvariantSet, PropertyContractBundle,
        Snapshot, SnapshotCapture,
    },
    multiline::code_block,
};

fn single_line(text: String) -> String {
    if text.contains('\n') {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        text
    }
}

/// Condition block followed by its description and error suffix in parentheses.
///
/// The suffix shares the line of a single-line condition and follows a code block on a
/// line of its own.
pub fn format_contract(contract: &Contract, config: &RenderConfig) -> Vec<String> {
    let mut block = render_condition(&contract.condition, config);

    let info = infer_error(contract.error.as_ref());
    if let Some(suffix) = compose_suffix(contract.description.as_deref(), &info, config.markup) {
        let suffix = single_line(suffix);
        match block.as_mut_slice() {
            [line] => *line = format!("{line} ({suffix})"),
            _ => block.push(format!("({suffix})")),
        }
    }

    block
}

fn format_section<'a, I>(
    heading: String,
    contracts: I,
    config: &RenderConfig,
    lines: &mut Vec<String>,
) where
    I: IntoIterator<Item = &'a Contract>,
{
    let start = lines.len();
    lines.push(heading);
    for contract in contracts {
        lines.extend(bullet_item(&format_contract(contract, config), config.bullet_indent));
    }
    if lines.len() == start + 1 {
        lines.truncate(start);
    }
}

/// `requires` block for the first non-empty group, `requires else` for each later one.
pub fn format_preconditions(
    groups: &[ContractGroup],
    prefix: Option<Accessor>,
    config: &RenderConfig,
) -> Vec<String> {
    let mut lines = Vec::new();

    let mut emitted = 0;
    for (index, group) in groups.iter().enumerate() {
        if group.is_empty() {
            debug!("skipping empty precondition group {index}");
            continue;
        }

        let section = if emitted == 0 {
            Section::Requires
        } else {
            Section::RequiresElse
        };
        format_section(config.markup.heading(prefix, section), group, config, &mut lines);
        emitted += 1;
    }

    lines
}

fn format_snapshot(snapshot: &Snapshot, config: &RenderConfig) -> Vec<String> {
    let markup = config.markup;
    let name = markup.code(&snapshot.name);

    match &snapshot.capture {
        SnapshotCapture::Named(callable) => {
            let call = format!("{}({})", callable.name, callable.params.join(", "));
            vec![format!("{name} = {}", markup.code(&call))]
        }
        SnapshotCapture::Inline(expr) => {
            let body = condition_body(expr);
            let text = body.text();
            if text.contains('\n') {
                let mut block = code_block(text, config.code_block_indent);
                if let Some(marker) = block.first_mut() {
                    *marker = format!("{name} = ::");
                }
                block
            } else {
                vec![format!("{name} = {}", markup.code(text))]
            }
        }
    }
}

/// `OLD` block listing every snapshot as `name = capture`.
pub fn format_snapshots(
    snapshots: &[Snapshot],
    prefix: Option<Accessor>,
    config: &RenderConfig,
) -> Vec<String> {
    if snapshots.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![config.markup.heading(prefix, Section::Old)];
    for snapshot in snapshots {
        lines.extend(bullet_item(&format_snapshot(snapshot, config), config.bullet_indent));
    }
    lines
}

pub fn format_postconditions(
    postconditions: &[Contract],
    prefix: Option<Accessor>,
    config: &RenderConfig,
) -> Vec<String> {
    let mut lines = Vec::new();
    format_section(
        config.markup.heading(prefix, Section::Ensures),
        postconditions,
        config,
        &mut lines,
    );
    lines
}

pub fn format_invariants(invariants: &InvariantSet, config: &RenderConfig) -> Vec<String> {
    let mut lines = Vec::new();
    format_section(
        config.markup.heading(None, Section::Establishes),
        &invariants.invariants,
        config,
        &mut lines,
    );
    lines
}

/// Preconditions, snapshots and postconditions, in that order.
pub fn format_contract_set(
    set: &ContractSet,
    prefix: Option<Accessor>,
    config: &RenderConfig,
) -> Vec<String> {
    let mut lines = format_preconditions(&set.preconditions, prefix, config);
    lines.extend(format_snapshots(&set.snapshots, prefix, config));
    lines.extend(format_postconditions(&set.postconditions, prefix, config));
    lines
}

/// Each present accessor's contracts in `get`, `set`, `del` order, headings prefixed
/// with the accessor keyword.
pub fn format_property_contracts(
    bundle: &PropertyContractBundle,
    config: &RenderConfig,
) -> Vec<String> {
    bundle
        .iter()
        .flat_map(|(accessor, set)| format_contract_set(set, Some(accessor), config))
        .collect()
}
