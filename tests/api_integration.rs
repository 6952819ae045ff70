use genbi_tui::api::ApiService;
use genbi_tui::internal::comment::{CommentError, CommentForm};
use genbi_tui::internal::pages::{
    ArticlesState, Fetch, GalleryDetailState, Page, PageCommand, PageSettings, PageState, Route,
};
use mockito::Matcher;

async fn run_all(state: &mut dyn PageState, fetches: Vec<Fetch>, api: &ApiService) {
    for fetch in fetches {
        let loaded = fetch.run(api).await;
        state.apply(loaded);
    }
}

fn article_json(id: u64) -> String {
    format!(r#"{{"id":{id},"slug":"artikel-{id}","title":"Artikel {id}"}}"#)
}

fn page_body(ids: &[u64], last_page: u32) -> String {
    let items: Vec<String> = ids.iter().map(|id| article_json(*id)).collect();
    format!(
        r#"{{"success":true,"data":{{"last_page":{last_page},"data":[{}]}}}}"#,
        items.join(",")
    )
}

async fn mock_sidebars(server: &mut mockito::ServerGuard) {
    for path in ["/api/artikel/trending-monthly", "/api/artikel/rekomendasi"] {
        server
            .mock("GET", path)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"data":[]}"#)
            .create_async()
            .await;
    }
}

#[tokio::test]
async fn test_article_listing_split_and_next_page() {
    let mut server = mockito::Server::new_async().await;
    mock_sidebars(&mut server).await;
    server
        .mock("GET", "/api/artikel")
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(&[1, 2, 3, 4], 2))
        .create_async()
        .await;
    let page2 = server
        .mock("GET", "/api/artikel")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(&[4, 5], 2))
        .expect(1)
        .create_async()
        .await;

    let api = ApiService::with_base_url(server.url());
    let settings = PageSettings {
        scroll_threshold: 0,
        dedupe_pages: true,
    };
    let mut state = ArticlesState::new(&settings);
    let fetches = state.load();
    run_all(&mut state, fetches, &api).await;

    assert_eq!(state.hero().map(|a| a.id), Some(1));
    assert_eq!(state.secondary().len(), 2);
    assert_eq!(state.main_list().len(), 1);

    let mut fetches = Vec::new();
    for _ in 0..3 {
        fetches.extend(state.down());
    }
    assert_eq!(fetches.len(), 1, "one request per page");
    run_all(&mut state, fetches, &api).await;

    let ids: Vec<u64> = state.articles.items.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert!(state.scroll.is_exhausted());
    assert!(state.down().is_empty());
    page2.assert_async().await;
}

#[tokio::test]
async fn test_application_error_fills_error_slot() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/galeri/tidak-ada")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":false,"message":"Galeri tidak ditemukan"}"#)
        .create_async()
        .await;

    let api = ApiService::with_base_url(server.url());
    let mut state = GalleryDetailState::new("tidak-ada");
    let fetches = state.load();
    run_all(&mut state, fetches, &api).await;

    assert!(state.gallery.value.is_none());
    assert!(!state.gallery.loading);
    let error = state.gallery.error.as_deref().unwrap_or_default();
    assert!(error.contains("Galeri tidak ditemukan"), "got {error}");
}

#[tokio::test]
async fn test_response_for_closed_page_is_dropped() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/event")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true,"data":[{"id":1,"slug":"a","nama":"A"}]}"#)
        .create_async()
        .await;
    let api = ApiService::with_base_url(server.url());
    let settings = PageSettings::default();

    let (mut first, first_fetches) = Page::open(&Route::Events, &settings);
    first.state_mut().cancel();
    let (mut second, _) = Page::open(&Route::Events, &settings);

    // The first page's request completes after it was closed and reopened.
    for fetch in first_fetches {
        let loaded = fetch.run(&api).await;
        second.state_mut().apply(loaded.clone());
        first.state_mut().apply(loaded);
    }

    let (Page::Events(first), Page::Events(second)) = (first, second) else {
        panic!("expected events pages");
    };
    assert!(first.events.items.is_empty());
    assert!(second.events.items.is_empty());
    assert!(second.events.loading, "second page still waits for its own request");
}

#[tokio::test]
async fn test_gallery_video_tab_opens_storage_url() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/galeri/dies-natalis")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"success":true,"data":{"id":3,"slug":"dies-natalis","title":"Dies Natalis",
            "image_galeri":[{"nama":"galeri/a.jpg"},{"nama":"galeri/b.MP4"},{"nama":"galeri/c.webm"}]}}"#,
        )
        .create_async()
        .await;

    let api = ApiService::with_base_url(server.url());
    let mut state = GalleryDetailState::new("dies-natalis");
    let fetches = state.load();
    run_all(&mut state, fetches, &api).await;

    state.prev_tab();
    let names: Vec<&str> = state
        .visible_media()
        .iter()
        .map(|m| m.file_name.as_str())
        .collect();
    assert_eq!(names, vec!["galeri/b.MP4", "galeri/c.webm"]);
    assert_eq!(
        state.activate(api.base_url()),
        Some(PageCommand::Open(format!(
            "{}/storage/galeri/b.MP4",
            server.url()
        )))
    );
}

#[tokio::test]
async fn test_comment_round_trip() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/komen")
        .match_body(Matcher::PartialJsonString(
            r#"{"artikel_id":9,"nama":"Sari","email":"sari@example.com","komentar":"Mantap"}"#
                .to_string(),
        ))
        .with_status(201)
        .create_async()
        .await;

    let api = ApiService::with_base_url(server.url());
    let mut form = CommentForm {
        name: " Sari ".into(),
        email: "sari@example.com".into(),
        text: "Mantap".into(),
        ..Default::default()
    };

    let payload = form.begin_submit(9).expect("valid form");
    assert!(form.begin_submit(9).is_none(), "no second submit while in flight");

    let result = api
        .submit_comment(&payload)
        .await
        .map_err(|_| CommentError::SubmitFailed);
    form.finish_submit(result);

    mock.assert_async().await;
    assert!(form.name.is_empty() && form.text.is_empty());
    assert!(!form.submitting);
}
