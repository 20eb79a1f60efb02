//! HTML for the three panels of an entity page: actions, list and search.
//!
//! Everything is plain links and forms; table state lives in the query string
//! so every control is a link to the next state.

use crate::fields::{FieldKind, FieldSpec};
use crate::models::{Column, EntityKind, Row, Session};
use crate::services::Fetched;
use super::html::{escape_html, href};
use super::table::{page_count, SortDirection, TableState, PAGE_SIZES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    ById,
    ByOwner,
}

impl SearchMode {
    pub fn parse(kind: EntityKind, value: Option<&str>) -> Self {
        match value {
            Some("owner") if kind.owner_lookup().is_some() => SearchMode::ByOwner,
            _ => SearchMode::ById,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            SearchMode::ById => "id",
            SearchMode::ByOwner => "owner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub mode: SearchMode,
    pub text: Option<String>,
}

impl SearchQuery {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("mode", self.mode.as_str().to_string())];
        if let Some(text) = &self.text {
            pairs.push(("q", text.clone()));
        }
        pairs
    }
}

/// Everything needed to render links back to the same page.
pub struct PageContext {
    pub kind: EntityKind,
    pub table: TableState,
    pub search: SearchQuery,
}

impl PageContext {
    fn link(&self, table: &TableState, search: &SearchQuery) -> String {
        let mut pairs = table.query_pairs();
        pairs.extend(search.query_pairs());
        escape_html(&href(&self.kind.page_path(), &pairs))
    }

    fn table_link(&self, table: &TableState) -> String {
        self.link(table, &self.search)
    }
}

pub fn render_list_panel(ctx: &PageContext, fetched: &Fetched) -> String {
    let title = ctx.kind.title();
    let body = match fetched {
        Fetched::Error(message) => {
            format!(r#"<div class="panel-error">Error: {}</div>"#, escape_html(message))
        }
        Fetched::Empty => format!(
            r#"<div class="panel-empty">No {} found.</div>"#,
            title.to_lowercase()
        ),
        Fetched::Single(_) | Fetched::Collection(_) => {
            let mut rows = fetched.rows().to_vec();
            ctx.table.sort(&mut rows);
            render_table(ctx, &rows)
        }
    };

    format!(
        r#"<section class="panel list-panel"><h2>All {}</h2>{}</section>"#,
        title, body
    )
}

fn render_table(ctx: &PageContext, rows: &[Row]) -> String {
    let columns = ctx.kind.columns();
    let state = &ctx.table;

    let toolbar = if state.selected.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="toolbar">{} selected</div>"#, state.selected.len())
    };

    let mut select_all = state.clone();
    select_all.toggle_all(rows);
    let mut header = format!(
        r#"<th><a class="check" href="{}">{}</a></th>"#,
        ctx.table_link(&select_all),
        checkbox(state.all_selected(rows))
    );
    for column in columns {
        let mut next = state.clone();
        next.request_sort(column.key);
        let arrow = match (state.sort_key == column.key, state.direction) {
            (true, SortDirection::Asc) => " ▲",
            (true, SortDirection::Desc) => " ▼",
            (false, _) => "",
        };
        header.push_str(&format!(
            r#"<th{}><a href="{}">{}{}</a></th>"#,
            align(column),
            ctx.table_link(&next),
            column.label,
            arrow
        ));
    }

    let body = state
        .window(rows)
        .iter()
        .map(|row| {
            let mut toggled = state.clone();
            toggled.toggle_row(&row.key);
            let selected = state.is_selected(&row.key);
            format!(
                r#"<tr{}><td><a class="check" href="{}">{}</a></td>{}</tr>"#,
                if selected { r#" class="selected""# } else { "" },
                ctx.table_link(&toggled),
                checkbox(selected),
                render_cells(columns, row)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"{}<table class="list"><thead><tr>{}</tr></thead><tbody>{}</tbody></table>{}"#,
        toolbar,
        header,
        body,
        render_pager(ctx, rows.len())
    )
}

fn render_pager(ctx: &PageContext, total: usize) -> String {
    let state = &ctx.table;
    let page = state.current_page(total);
    let pages = page_count(total, state.page_size);

    let sizes = PAGE_SIZES
        .iter()
        .map(|size| {
            if *size == state.page_size {
                format!("<strong>{}</strong>", size)
            } else {
                let mut next = state.clone();
                next.set_page_size(*size);
                format!(r#"<a href="{}">{}</a>"#, ctx.table_link(&next), size)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    let first = if total == 0 { 0 } else { page * state.page_size + 1 };
    let last = (page * state.page_size + state.page_size).min(total);

    let step = |target: usize, label: &str, enabled: bool| {
        if enabled {
            let mut next = state.clone();
            next.set_page(target);
            format!(r#"<a href="{}">{}</a>"#, ctx.table_link(&next), label)
        } else {
            format!(r#"<span class="disabled">{}</span>"#, label)
        }
    };

    format!(
        r#"<div class="pager">Rows per page: {} <span>{}–{} of {}</span> {} {}</div>"#,
        sizes,
        first,
        last,
        total,
        step(page.saturating_sub(1), "‹ prev", page > 0),
        step(page + 1, "next ›", page + 1 < pages)
    )
}

pub fn render_search_panel(ctx: &PageContext, result: Option<&Fetched>) -> String {
    let kind = ctx.kind;
    let mut html = format!(
        r#"<section class="panel search-panel"><h2>Search {}</h2>"#,
        kind.title()
    );

    if kind.owner_lookup().is_some() {
        let modes = [
            (SearchMode::ById, format!("by {} id", kind.singular())),
            (SearchMode::ByOwner, "by user id".to_string()),
        ];
        let switch = modes
            .into_iter()
            .map(|(mode, label)| {
                if mode == ctx.search.mode {
                    format!("<strong>{}</strong>", label)
                } else {
                    // switching drops the previous query, and with it any results or error
                    let cleared = SearchQuery { mode, text: None };
                    format!(r#"<a href="{}">{}</a>"#, ctx.link(&ctx.table, &cleared), label)
                }
            })
            .collect::<Vec<_>>()
            .join(" | ");
        html.push_str(&format!(r#"<div class="switch">Search {}</div>"#, switch));
    }

    let hidden = ctx
        .table
        .query_pairs()
        .into_iter()
        .chain(std::iter::once(("mode", ctx.search.mode.as_str().to_string())))
        .map(|(k, v)| format!(r#"<input type="hidden" name="{}" value="{}">"#, k, escape_html(&v)))
        .collect::<String>();
    let placeholder = match ctx.search.mode {
        SearchMode::ById => format!("{} id", kind.singular()),
        SearchMode::ByOwner => "user id".to_string(),
    };
    html.push_str(&format!(
        r#"<form method="get" action="{}">{}<input type="text" name="q" placeholder="{}" value="{}" required><button type="submit">Search</button></form>"#,
        kind.page_path(),
        hidden,
        placeholder,
        escape_html(ctx.search.text.as_deref().unwrap_or(""))
    ));

    let state = match result {
        None => r#"<p class="panel-idle">Enter an id to search.</p>"#.to_string(),
        Some(Fetched::Error(message)) => {
            format!(r#"<div class="panel-error">Error: {}</div>"#, escape_html(message))
        }
        Some(Fetched::Empty) => r#"<div class="panel-empty">No results found.</div>"#.to_string(),
        Some(fetched) => {
            let columns = kind.columns();
            let head = columns
                .iter()
                .map(|c| format!("<th{}>{}</th>", align(c), c.label))
                .collect::<String>();
            let body = fetched
                .rows()
                .iter()
                .map(|row| format!("<tr>{}</tr>", render_cells(columns, row)))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                r#"<table class="results"><thead><tr>{}</tr></thead><tbody>{}</tbody></table>"#,
                head, body
            )
        }
    };
    html.push_str(&state);
    html.push_str("</section>");
    html
}

pub fn render_action_panel(kind: EntityKind, session: &Session) -> String {
    let base = kind.page_path();
    let fields = render_fields(kind.fields());
    let id_input = format!(
        r#"<label>{} ID <input type="text" name="id" required></label>"#,
        capitalize(kind.singular())
    );

    let delete = if session.is_admin() {
        format!(
            r#"<details><summary>Delete {0}</summary><form method="post" action="{1}/delete">{2}<button type="submit" class="danger">Delete</button></form></details>"#,
            kind.singular(),
            base,
            id_input
        )
    } else {
        format!(
            r#"<p class="denied">Only admins can delete {}.</p>"#,
            kind.title().to_lowercase()
        )
    };

    format!(
        r#"<section class="panel action-panel"><h2>{0} actions</h2>
<details><summary>Create {1}</summary><form method="post" action="{2}/create">{3}<button type="submit">Create</button></form></details>
<details><summary>Update {1}</summary><form method="post" action="{2}/update">{4}{3}<button type="submit">Update</button></form></details>
{5}</section>"#,
        kind.title(),
        kind.singular(),
        base,
        fields,
        id_input,
        delete
    )
}

fn render_fields(fields: &[FieldSpec]) -> String {
    fields
        .iter()
        .map(|field| {
            let required = if field.required { " required" } else { "" };
            let input = match field.kind {
                FieldKind::Role => format!(
                    r#"<select name="{}"{}><option value="regular">regular</option><option value="admin">admin</option></select>"#,
                    field.name, required
                ),
                // browsers already refuse non-numbers; the server checks again
                FieldKind::Integer => format!(
                    r#"<input type="number" step="1" name="{}"{}>"#,
                    field.name, required
                ),
                kind => format!(
                    r#"<input type="{}" name="{}"{}>"#,
                    kind.input_type(),
                    field.name,
                    required
                ),
            };
            format!("<label>{} {}</label>", field.label, input)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_cells(columns: &[Column], row: &Row) -> String {
    columns
        .iter()
        .map(|c| format!("<td{}>{}</td>", align(c), escape_html(&row.get(c.key).display())))
        .collect()
}

fn align(column: &Column) -> &'static str {
    if column.numeric { r#" class="num""# } else { "" }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "☑" } else { "☐" }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
