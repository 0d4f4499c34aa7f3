use chrono::{DateTime, Utc};
use estatedesk_application::{RowView, TableBodyProps, TableBodyRenderer};
use estatedesk_domain::RowMenuEntry;

/// Plain-text table body for terminal output.
pub struct TextTableRenderer;

impl TableBodyRenderer for TextTableRenderer {
    type Output = String;

    fn render(&self, props: TableBodyProps<'_>) -> String {
        let mut lines = Vec::with_capacity(props.rows.len() + 3);

        let mut header = vec!["id".to_owned(), "title".to_owned()];
        if props.resource.is_publishable() {
            header.push("status".to_owned());
        }
        header.extend(props.columns.iter().map(|column| column.id().to_owned()));
        header.push("updated".to_owned());
        header.push("actions".to_owned());
        lines.push(header.join(" | "));

        for row in &props.rows {
            let mut cells = vec![
                row.row.id.clone(),
                row.row.title.clone().unwrap_or_else(|| "-".to_owned()),
            ];
            if let Some(status) = row.row.status {
                cells.push(status.as_str().to_owned());
            }
            cells.extend(
                props
                    .columns
                    .iter()
                    .map(|column| column.cell(row.record).unwrap_or_else(|| "-".to_owned())),
            );
            cells.push(row.row.updated_at.map_or_else(|| "-".to_owned(), format_date));
            cells.push(actions_cell(row));
            lines.push(cells.join(" | "));
        }

        if props.rows.is_empty() {
            lines.push(if props.is_loading {
                "(loading)".to_owned()
            } else {
                "(no rows)".to_owned()
            });
        }

        let mut footer = match props.meta {
            Some(meta) => format!(
                "page {}/{} · {} rows",
                meta.page,
                meta.total_pages.max(1),
                meta.total_records
            ),
            None => format!("page {}", props.pagination.page()),
        };
        for (key, values) in props.filters.iter() {
            footer.push_str(&format!(" · {key}={}", values.join(",")));
        }
        lines.push(footer);

        lines.join("\n")
    }
}

/// Formats a timestamp the way list tables show it.
fn format_date(value: DateTime<Utc>) -> String {
    value.format("%d/%m/%Y").to_string()
}

fn actions_cell(row: &RowView<'_>) -> String {
    if row.is_in_flight {
        return "(working)".to_owned();
    }

    let mut entries: Vec<String> = Vec::with_capacity(row.menu.len() + 1);
    if let Some(primary) = row.primary_action {
        entries.push(format!("[{}]", primary.as_str()));
    }
    entries.extend(row.menu.iter().filter_map(|entry| match entry {
        RowMenuEntry::Action(action) if Some(*action) != row.primary_action => {
            Some(action.as_str().to_owned())
        }
        RowMenuEntry::Action(_) | RowMenuEntry::Divider => None,
    }));

    entries.join(" ")
}
