use axum::{
    extract::{Form, Path, State},
    response::Redirect,
    Extension,
};
use std::collections::HashMap;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::fields::{build_payload, required_id};
use crate::models::{EntityKind, Session};
use crate::services::ApiClient;
use crate::views::href;

type Submitted = HashMap<String, String>;

fn resolve(page: &str) -> AppResult<EntityKind> {
    EntityKind::from_page(page).ok_or_else(|| AppError::NotFound(format!("dashboard page {}", page)))
}

// Every outcome lands back on the entity page with a stat flag.
fn finish(kind: EntityKind, action: &str, outcome: AppResult<()>) -> Redirect {
    let stat = match outcome {
        Ok(()) => {
            tracing::info!("{} {} succeeded", action, kind.singular());
            "succeed"
        }
        Err(AppError::Validation(e)) => {
            tracing::warn!("{} {} rejected: {}", action, kind.singular(), e);
            "failed"
        }
        Err(e) => {
            tracing::error!("{} {} failed: {}", action, kind.singular(), e);
            "failed"
        }
    };
    Redirect::to(&href(&kind.page_path(), &[("stat", stat.to_string())]))
}

pub async fn create_entity(
    State((api, _)): State<(ApiClient, Config)>,
    Extension(session): Extension<Session>,
    Path(page): Path<String>,
    Form(submitted): Form<Submitted>,
) -> AppResult<Redirect> {
    let kind = resolve(&page)?;
    let outcome = async {
        let payload = build_payload(kind.fields(), &submitted)?;
        api.create(kind, &payload, session.token()).await?;
        Ok::<_, AppError>(())
    }
    .await;
    Ok(finish(kind, "create", outcome))
}

pub async fn update_entity(
    State((api, _)): State<(ApiClient, Config)>,
    Extension(session): Extension<Session>,
    Path(page): Path<String>,
    Form(submitted): Form<Submitted>,
) -> AppResult<Redirect> {
    let kind = resolve(&page)?;
    let outcome = async {
        let id = required_id(&submitted)?;
        let payload = build_payload(kind.fields(), &submitted)?;
        api.update(kind, &id, &payload, session.token()).await?;
        Ok::<_, AppError>(())
    }
    .await;
    Ok(finish(kind, "update", outcome))
}

pub async fn delete_entity(
    State((api, config)): State<(ApiClient, Config)>,
    Extension(session): Extension<Session>,
    Path(page): Path<String>,
    Form(submitted): Form<Submitted>,
) -> AppResult<Redirect> {
    let kind = resolve(&page)?;
    if !session.is_admin() {
        tracing::warn!(
            "Non-admin {} tried to delete a {}",
            session.display_name(),
            kind.singular()
        );
        return Ok(Redirect::to(&config.guard.access_denied_path));
    }

    let outcome = async {
        let id = required_id(&submitted)?;
        api.remove(kind, &id, session.token()).await?;
        Ok::<_, AppError>(())
    }
    .await;
    Ok(finish(kind, "delete", outcome))
}
