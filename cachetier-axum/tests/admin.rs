//! Router tests for the node cache admin page.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use cachetier::{AdminConfig, Capabilities, Translator};
use cachetier_axum::{AppState, router};
use cachetier_core::{
    BanClient, BanError, EXPIRES_SENTINEL, HEADER_EXPIRES, HEADER_MAX_AGE, HEADER_S_MAXAGE,
    HeaderSetting, Locale, Node, NodeId, NodeRepository, PROPERTY_CACHE_TARGET, SiteId,
};
use cachetier_memory::InMemoryNodes;

type BanCall = (String, String, String, bool);

#[derive(Clone, Default)]
struct RecordingBan {
    calls: Arc<Mutex<Vec<BanCall>>>,
}

#[async_trait]
impl BanClient for RecordingBan {
    async fn ban_node(
        &self,
        node: &Node,
        base_url: &str,
        locale: &Locale,
        recursive: bool,
    ) -> Result<(), BanError> {
        self.calls.lock().unwrap().push((
            node.id().to_string(),
            base_url.to_string(),
            locale.to_string(),
            recursive,
        ));
        Ok(())
    }
}

#[derive(Clone, Default)]
struct FailingBan;

#[async_trait]
impl BanClient for FailingBan {
    async fn ban_node(
        &self,
        _node: &Node,
        _base_url: &str,
        _locale: &Locale,
        _recursive: bool,
    ) -> Result<(), BanError> {
        Err(BanError::Transport("connection refused".into()))
    }
}

const CONFIG: &str = r#"
locales: [en, nl]
sites:
  - id: main
    revision: 1
    names:
      en: Main site
    base_urls:
      en: "https://example.com"
"#;

const BARE_CONFIG: &str = "
locales: [en]
sites:
  - id: main
    revision: 1
";

fn setup(config: &str, capabilities: Capabilities) -> (AppState, Arc<InMemoryNodes>, RecordingBan) {
    let repo = Arc::new(InMemoryNodes::new());
    repo.insert_site("main", 1);
    repo.insert_node("main", Node::new("home", "Home"));

    let ban = RecordingBan::default();
    let state = AppState::new(
        repo.clone(),
        Arc::new(ban.clone()),
        Translator::new(),
        AdminConfig::from_yaml(config).unwrap(),
        capabilities,
    );
    (state, repo, ban)
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::HOST, "admin.test")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn page_renders_both_forms() {
    let (state, _, _) = setup(CONFIG, Capabilities::default());
    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/cms/main/1/en/home/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("name=\"cacheTarget\""));
    assert!(body.contains("value=\"headers\""));
    assert!(body.contains("value=\"clear\""));
    assert!(body.contains("name=\"recursive\""));
}

#[tokio::test]
async fn denied_edit_capability_omits_the_headers_form() {
    let (state, _, _) = setup(
        CONFIG,
        Capabilities {
            edit_headers: false,
        },
    );
    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/cms/main/1/en/home/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(!body.contains("name=\"cacheTarget\""));
    // The clear form is not permission-gated.
    assert!(body.contains("value=\"clear\""));
}

#[tokio::test]
async fn policy_submission_persists_and_redirects() {
    let (state, repo, _) = setup(CONFIG, Capabilities::default());
    let response = router(state)
        .oneshot(post(
            "/cms/main/1/en/home/cache",
            "action=headers&cacheTarget=intermediate&sharedMaxAge=900",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/cms/main/1/en/home/cache?message=success.node.saved"
    );

    let locale = Locale::new("en");
    let node = repo
        .load(&SiteId::new("main"), 2, &NodeId::new("home"))
        .await
        .unwrap();
    assert_eq!(
        node.property(&locale, PROPERTY_CACHE_TARGET),
        Some("intermediate")
    );
    assert_eq!(
        node.header(&locale, HEADER_MAX_AGE),
        HeaderSetting::Value("0".to_string())
    );
    assert_eq!(
        node.header(&locale, HEADER_S_MAXAGE),
        HeaderSetting::Value("900".to_string())
    );
    assert_eq!(
        node.header(&locale, HEADER_EXPIRES),
        HeaderSetting::Value(EXPIRES_SENTINEL.to_string())
    );
    assert_eq!(
        repo.change_log(&SiteId::new("main")),
        vec!["Set cache properties for Home".to_string()]
    );
}

#[tokio::test]
async fn failed_validation_rerenders_with_the_error_attached() {
    let (state, repo, _) = setup(CONFIG, Capabilities::default());
    let response = router(state)
        .oneshot(post(
            "/cms/main/1/en/home/cache",
            "action=headers&cacheTarget=",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("error.validation.required"));
    assert!(repo.change_log(&SiteId::new("main")).is_empty());
}

#[tokio::test]
async fn clear_invokes_the_ban_client_once_and_redirects_to_the_referer() {
    let (state, _, ban) = setup(CONFIG, Capabilities::default());
    let response = router(state)
        .oneshot(post(
            "/cms/main/1/en/home/cache?referer=/cms/overview",
            "action=clear&recursive=1",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/cms/overview?message=success.node.cache.cleared"
    );

    let calls = ban.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![(
            "home".to_string(),
            "https://example.com".to_string(),
            "en".to_string(),
            true
        )]
    );
}

#[tokio::test]
async fn failed_ban_rerenders_with_an_error_banner() {
    let repo = Arc::new(InMemoryNodes::new());
    repo.insert_site("main", 1);
    repo.insert_node("main", Node::new("home", "Home"));
    let state = AppState::new(
        repo,
        Arc::new(FailingBan),
        Translator::new(),
        AdminConfig::from_yaml(CONFIG).unwrap(),
        Capabilities::default(),
    );

    let response = router(state)
        .oneshot(post(
            "/cms/main/1/en/home/cache?referer=/cms/overview",
            "action=clear&recursive=1",
        ))
        .await
        .unwrap();

    // Recoverable and user-visible: the page re-renders, no redirect.
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::LOCATION).is_none());
    let body = body_text(response).await;
    assert!(body.contains("error.cache.clear"));
}

#[tokio::test]
async fn confirmation_messages_name_the_site_and_the_node() {
    let repo = Arc::new(InMemoryNodes::new());
    repo.insert_site("main", 1);
    repo.insert_node("main", Node::new("home", "Home"));
    let translator = Translator::from_yaml(
        r#"
en:
  success.node.saved: Saved cache properties for {node}
  success.node.cache.cleared: Cleared cache for {node}
"#,
    )
    .unwrap();
    let state = AppState::new(
        repo,
        Arc::new(RecordingBan::default()),
        translator,
        AdminConfig::from_yaml(CONFIG).unwrap(),
        Capabilities::default(),
    );
    let app = router(state);

    let saved = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/cms/main/1/en/home/cache?message=success.node.saved")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_text(saved).await;
    // The saved confirmation carries the site name.
    assert!(body.contains("Saved cache properties for Main site"));

    let cleared = app
        .oneshot(
            Request::builder()
                .uri("/cms/main/1/en/home/cache?message=success.node.cache.cleared")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_text(cleared).await;
    assert!(body.contains("Cleared cache for Home"));
}

#[tokio::test]
async fn forwarded_proto_sets_the_fallback_scheme() {
    let (state, _, ban) = setup(BARE_CONFIG, Capabilities::default());
    let request = Request::builder()
        .method("POST")
        .uri("/cms/main/1/en/home/cache")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::HOST, "admin.test")
        .header("x-forwarded-proto", "https")
        .body(Body::from("action=clear".to_string()))
        .unwrap();

    let response = router(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let calls = ban.calls.lock().unwrap();
    assert_eq!(calls[0].1, "https://admin.test");
}

#[tokio::test]
async fn clear_falls_back_to_the_request_base_url() {
    let (state, _, ban) = setup(BARE_CONFIG, Capabilities::default());
    let response = router(state)
        .oneshot(post("/cms/main/1/en/home/cache", "action=clear"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let calls = ban.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].1, "http://admin.test");
    assert!(!calls[0].3);
}

#[tokio::test]
async fn edit_denied_submission_is_forbidden() {
    let (state, repo, _) = setup(
        CONFIG,
        Capabilities {
            edit_headers: false,
        },
    );
    let response = router(state)
        .oneshot(post(
            "/cms/main/1/en/home/cache",
            "action=headers&cacheTarget=none",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(repo.change_log(&SiteId::new("main")).is_empty());
}

#[tokio::test]
async fn unknown_action_is_a_bad_request() {
    let (state, _, _) = setup(CONFIG, Capabilities::default());
    let response = router(state)
        .oneshot(post("/cms/main/1/en/home/cache", "action=publish"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_node_is_not_found() {
    let (state, _, _) = setup(CONFIG, Capabilities::default());
    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/cms/main/1/en/missing/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn inherited_summary_appears_for_inheriting_nodes() {
    let (state, repo, _) = setup(CONFIG, Capabilities::default());
    let locale = Locale::new("en");
    let mut section = Node::new("section", "Section");
    section.set_property(&locale, PROPERTY_CACHE_TARGET, "all");
    section.set_header(&locale, HEADER_MAX_AGE, HeaderSetting::seconds(3600));
    section.set_header(&locale, HEADER_S_MAXAGE, HeaderSetting::seconds(86400));
    repo.insert_node("main", section);
    repo.insert_node("main", Node::with_parent("page", "Page", "section"));

    let response = router(state)
        .oneshot(
            Request::builder()
                .uri("/cms/main/1/en/page/cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("label.cache.target.all"));
    assert!(body.contains("label.cache.time.3600"));
    assert!(body.contains("label.cache.time.86400"));
}
