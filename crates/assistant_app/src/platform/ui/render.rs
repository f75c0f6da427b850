use assistant_core::{AppViewModel, FileSlotView, NoticeSeverity};

/// Renders the whole form as console lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "=== Employee Assistant ({} employees) ===",
        view.employee_count
    ));

    let selected = view.selected_employee.as_deref().unwrap_or("none");
    lines.push(format!(
        "Employee search: \"{}\" (selected: {selected})",
        view.search.query
    ));
    for (index, suggestion) in view.search.suggestions.iter().enumerate() {
        let marker = if suggestion.highlighted { '>' } else { ' ' };
        lines.push(format!("  {marker}{:>2}. {}", index + 1, suggestion.name));
    }

    lines.push(format!(
        "Question: {}{}",
        view.question,
        if view.ask_enabled { "" } else { "  [ask disabled]" }
    ));

    if view.response.loading {
        lines.push("Assistant: thinking...".to_string());
    }
    if let Some(text) = &view.response.text {
        let label = if view.response.failed {
            "Assistant error"
        } else {
            "Assistant response"
        };
        lines.push(format!("{label}: {text}"));
    }

    lines.push("Upload new files:".to_string());
    lines.push(format_slot(&view.roster));
    lines.push(format_slot(&view.policy));
    if view.is_uploading {
        lines.push("  uploading...".to_string());
    }

    if let Some(notice) = &view.notice {
        let tag = match notice.severity {
            NoticeSeverity::Info => "info",
            NoticeSeverity::Error => "error",
        };
        lines.push(format!("[{tag}] {} (type `ok` to dismiss)", notice.text));
    }

    lines
}

fn format_slot(slot: &FileSlotView) -> String {
    let accepted = slot
        .accepted
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ");
    let pending = slot.pending.as_deref().unwrap_or("-");
    match slot.last_confirmed.as_deref() {
        Some(confirmed) => format!(
            "  {} ({accepted}): selected {pending}, last uploaded {confirmed}",
            slot.label
        ),
        None => format!("  {} ({accepted}): selected {pending}", slot.label),
    }
}
