use axum::{
    Router,
    extract::{Form, Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;

use cachetier::{AdminError, FormValues, assemble_page, clear_cache, update_policy};
use cachetier_core::{CoreError, Locale, Node, NodeId, Site, SiteId};

use crate::state::AppState;
use crate::view;

/// Build the admin router.
///
/// The node cache page lives at
/// `/cms/{site}/{revision}/{locale}/{node}/cache`; GET renders it, POST
/// dispatches on the `action` form field.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/cms/{site}/{revision}/{locale}/{node}/cache",
            get(show).post(submit),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    referer: Option<String>,
    message: Option<String>,
}

type PagePath = Path<(String, u64, String, String)>;

async fn resolve(
    state: &AppState,
    site_id: &str,
    revision: u64,
    locale: &str,
    node_id: &str,
) -> Result<(Site, Node, Locale), Response> {
    let site = state
        .site(&SiteId::new(site_id))
        .cloned()
        .ok_or_else(|| (StatusCode::NOT_FOUND, "site not found").into_response())?;
    let node = state
        .repo
        .load(site.id(), revision, &NodeId::new(node_id))
        .await
        .map_err(|err| match err {
            CoreError::SiteNotFound(_) | CoreError::NodeNotFound { .. } => {
                (StatusCode::NOT_FOUND, "node not found").into_response()
            }
            other => internal_error(other),
        })?;
    Ok((site, node, Locale::new(locale)))
}

fn internal_error(err: impl std::fmt::Display) -> Response {
    tracing::error!(error = %err, "node cache page failure");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

fn with_message(referer: &str, message_key: &str) -> String {
    let separator = if referer.contains('?') { '&' } else { '?' };
    format!("{referer}{separator}message={message_key}")
}

fn request_base_url(headers: &HeaderMap) -> String {
    // Behind TLS termination the proxy carries the public scheme.
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    format!("{scheme}://{host}")
}

async fn render_page(
    state: &AppState,
    site: &Site,
    node: &Node,
    locale: &Locale,
    submitted: Option<&FormValues>,
    errors: Option<&cachetier::ValidationErrors>,
    referer: Option<String>,
    message: Option<String>,
) -> Response {
    let page = assemble_page(
        state.repo.as_ref(),
        &state.translator,
        site,
        node,
        locale,
        (*state.locales).clone(),
        state.capabilities,
        submitted,
        errors,
        referer,
        message,
    )
    .await;
    match page {
        Ok(page) => Html(view::render(&page)).into_response(),
        Err(err) => internal_error(err),
    }
}

async fn show(
    State(state): State<AppState>,
    Path((site_id, revision, locale, node_id)): PagePath,
    Query(query): Query<PageQuery>,
) -> Response {
    let (site, node, locale) = match resolve(&state, &site_id, revision, &locale, &node_id).await {
        Ok(resolved) => resolved,
        Err(response) => return response,
    };
    let message = query.message.as_deref().map(|key| {
        // The saved confirmation names the site, the cleared one the node.
        let subject = if key == "success.node.saved" {
            site.name(&locale).unwrap_or(node.name())
        } else {
            node.name()
        };
        state
            .translator
            .translate_with(&locale, key, &[("node", subject)])
    });
    render_page(&state, &site, &node, &locale, None, None, query.referer, message).await
}

async fn submit(
    State(state): State<AppState>,
    Path((site_id, revision, locale, node_id)): PagePath,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let (site, node, locale) = match resolve(&state, &site_id, revision, &locale, &node_id).await {
        Ok(resolved) => resolved,
        Err(response) => return response,
    };
    let values = FormValues::from_pairs(pairs);

    // Self-referential fallback when no referer was supplied.
    let self_url = format!(
        "/cms/{}/{}/{}/{}/cache",
        site.id(),
        revision,
        locale,
        node.id()
    );
    let referer = query.referer.clone().unwrap_or(self_url);

    match values.get("action") {
        Some("headers") => {
            if !state.capabilities.edit_headers {
                return StatusCode::FORBIDDEN.into_response();
            }
            match update_policy(
                state.repo.as_ref(),
                &site,
                &node,
                &locale,
                &values,
                &state.translator,
            )
            .await
            {
                Ok(_) => Redirect::to(&with_message(&referer, "success.node.saved")).into_response(),
                Err(AdminError::Validation(errors)) => {
                    render_page(
                        &state,
                        &site,
                        &node,
                        &locale,
                        Some(&values),
                        Some(&errors),
                        query.referer,
                        None,
                    )
                    .await
                }
                Err(err) => internal_error(err),
            }
        }
        Some("clear") => {
            let recursive = values.is_checked("recursive");
            let base_url = request_base_url(&headers);
            match clear_cache(
                state.ban.as_ref(),
                &site,
                &node,
                &locale,
                recursive,
                &base_url,
            )
            .await
            {
                Ok(()) => {
                    Redirect::to(&with_message(&referer, "success.node.cache.cleared"))
                        .into_response()
                }
                Err(AdminError::Ban(err)) => {
                    tracing::warn!(node = %node.id(), error = %err, "ban request failed");
                    let banner = state.translator.translate(&locale, "error.cache.clear");
                    render_page(
                        &state,
                        &site,
                        &node,
                        &locale,
                        None,
                        None,
                        query.referer,
                        Some(banner),
                    )
                    .await
                }
                Err(err) => internal_error(err),
            }
        }
        _ => (StatusCode::BAD_REQUEST, "unknown action").into_response(),
    }
}
