use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    Extension,
};
use serde::Deserialize;
use std::collections::HashMap;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Billing, Entity, EntityKind, Session, Task, User};
use crate::services::{ApiClient, Fetched};
use crate::views::{
    escape_html, render_action_panel, render_dashboard, render_list_panel, render_search_panel,
    status_banner, PageContext, SearchMode, SearchQuery, TableState,
};

#[derive(Debug, Deserialize)]
pub struct StatQuery {
    stat: Option<String>,
}

pub async fn serve_dashboard(
    Extension(session): Extension<Session>,
    Query(query): Query<StatQuery>,
) -> AppResult<Response> {
    tracing::info!("Accessing dashboard overview for {}", session.display_name());

    let cards = EntityKind::ALL
        .into_iter()
        .filter(|kind| *kind == EntityKind::Tasks || session.is_admin())
        .map(|kind| {
            format!(
                r#"<a href="{}"><h3>{}</h3><p>Manage {}</p></a>"#,
                kind.page_path(),
                kind.title(),
                kind.title().to_lowercase()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let content = format!(
        r#"<p>Welcome back, {}.</p><div class="cards">{}</div>"#,
        escape_html(session.display_name()),
        cards
    );

    let html = render_dashboard(
        "Dashboard",
        &session,
        &status_banner(query.stat.as_deref()),
        &content,
    )?;
    Ok(Html(html).into_response())
}

pub async fn serve_entity_page(
    State((api, config)): State<(ApiClient, Config)>,
    Extension(session): Extension<Session>,
    Path(page): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Response> {
    let kind = EntityKind::from_page(&page)
        .ok_or_else(|| AppError::NotFound(format!("dashboard page {}", page)))?;
    tracing::info!("Accessing {} page", kind.title());

    match kind {
        EntityKind::Users => entity_page::<User>(&api, &config, &session, &params).await,
        EntityKind::Tasks => entity_page::<Task>(&api, &config, &session, &params).await,
        EntityKind::Billings => entity_page::<Billing>(&api, &config, &session, &params).await,
    }
}

async fn entity_page<E: Entity>(
    api: &ApiClient,
    config: &Config,
    session: &Session,
    params: &HashMap<String, String>,
) -> AppResult<Response> {
    let kind = E::KIND;
    let param = |name: &str| params.get(name).map(String::as_str);

    let table = TableState::from_params(
        kind,
        config.table.default_page_size,
        param("sort"),
        param("order"),
        param("page"),
        param("rows"),
        param("selected"),
    );
    let search = SearchQuery {
        mode: SearchMode::parse(kind, param("mode")),
        text: param("q")
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string),
    };
    let token = session.token();

    // The list and the search panel fetch independently
    let found = async {
        let q = match search.text.as_deref() {
            Some(q) => q,
            None => return None,
        };
        tracing::debug!("Searching {} {:?} for {}", kind.resource(), search.mode, q);
        Some(match search.mode {
            SearchMode::ById => Fetched::single(api.get::<E>(q, token).await),
            SearchMode::ByOwner => Fetched::collection(api.list_by_owner::<E>(q, token).await),
        })
    };
    let (listed, found) = tokio::join!(api.list::<E>(token), found);

    // A rejected token means the whole page is unusable, not just one panel
    let list = match listed {
        Err(e) if e.rejects_session() => {
            tracing::info!("API rejected the session on {} page: {}", kind.title(), e);
            return Err(e.into());
        }
        listed => Fetched::collection(listed),
    };

    let ctx = PageContext { kind, table, search };
    let content = format!(
        "{}\n{}\n{}",
        render_action_panel(kind, session),
        render_list_panel(&ctx, &list),
        render_search_panel(&ctx, found.as_ref())
    );
    let html = render_dashboard(
        kind.title(),
        session,
        &status_banner(param("stat")),
        &content,
    )?;
    Ok(Html(html).into_response())
}
