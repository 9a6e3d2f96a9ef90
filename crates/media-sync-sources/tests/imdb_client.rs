use chrono::NaiveDate;
use httpmock::prelude::*;
use media_sync_sources::{DecodeError, ImdbClient, ImdbError, ImdbListSource, SessionCredentials};

const LIST_HEADER: &str = "Position,Const,Created,Modified,Description,Title,URL,Title Type,IMDb Rating,Runtime (mins),Year,Genres,Num Votes,Release Date,Directors";
const RATINGS_HEADER: &str = "Const,Your Rating,Date Rated,Title,URL,Title Type,IMDb Rating,Runtime (mins),Year,Genres,Num Votes,Release Date,Directors";

const PROFILE_PAGE: &str = r#"<html><body><div class="user-profile userId" data-userid="ur12345678"><h1>film fan</h1></div></body></html>"#;
const WATCHLIST_PAGE: &str = r#"<html><head><meta property="pageId" content="ls000000001"></head><body></body></html>"#;

fn list_csv(rows: &[(&str, &str)]) -> String {
    let mut csv = format!("{}\n", LIST_HEADER);
    for (i, (id, title_type)) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},2020-01-01,2020-01-01,,Some Title,https://www.imdb.com/title/{}/,{},8.0,120,2000,Drama,1000,2000-01-01,\n",
            i + 1,
            id,
            id,
            title_type
        ));
    }
    csv
}

fn client_for(server: &MockServer, user_id: Option<&str>, watchlist_id: Option<&str>) -> ImdbClient {
    let credentials = SessionCredentials::new("at-token", "ubid-token")
        .with_user_id(user_id.map(str::to_string))
        .with_watchlist_id(watchlist_id.map(str::to_string));
    ImdbClient::new(credentials, &server.base_url(), None).unwrap()
}

#[tokio::test]
async fn connect_scrapes_user_and_watchlist_ids() {
    let server = MockServer::start_async().await;
    let profile = server
        .mock_async(|when, then| {
            when.method(GET).path("/profile").header_exists("cookie");
            then.status(200).header("content-type", "text/html").body(PROFILE_PAGE);
        })
        .await;
    let watchlist = server
        .mock_async(|when, then| {
            when.method(GET).path("/watchlist").header_exists("cookie");
            then.status(200).header("content-type", "text/html").body(WATCHLIST_PAGE);
        })
        .await;

    let credentials = SessionCredentials::new("at-token", "ubid-token").with_user_id(Some("scrape".to_string()));
    let client = ImdbClient::connect(credentials, &server.base_url(), None).await.unwrap();

    profile.assert_async().await;
    watchlist.assert_async().await;
    assert_eq!(client.credentials().user_id(), Some("ur12345678"));
    assert_eq!(client.credentials().watchlist_id(), Some("ls000000001"));
}

#[tokio::test]
async fn connect_keeps_configured_user_id_but_rescrapes_watchlist() {
    let server = MockServer::start_async().await;
    let profile = server
        .mock_async(|when, then| {
            when.method(GET).path("/profile");
            then.status(200).body(PROFILE_PAGE);
        })
        .await;
    let watchlist = server
        .mock_async(|when, then| {
            when.method(GET).path("/watchlist");
            then.status(200).body(WATCHLIST_PAGE);
        })
        .await;

    let credentials = SessionCredentials::new("at-token", "ubid-token")
        .with_user_id(Some("ur99".to_string()))
        .with_watchlist_id(Some("ls-stale".to_string()));
    let client = ImdbClient::connect(credentials, &server.base_url(), None).await.unwrap();

    assert_eq!(profile.hits_async().await, 0);
    assert_eq!(watchlist.hits_async().await, 1);
    assert_eq!(client.credentials().user_id(), Some("ur99"));
    assert_eq!(client.credentials().watchlist_id(), Some("ls000000001"));
}

#[tokio::test]
async fn connect_fails_when_profile_has_no_user_id() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/profile");
            then.status(404).body("<html><body>Page not found</body></html>");
        })
        .await;

    let result = ImdbClient::connect(SessionCredentials::new("a", "b"), &server.base_url(), None).await;
    assert!(matches!(
        result,
        Err(ImdbError::ScrapeNotFound { attribute: "data-userid", .. })
    ));
}

#[tokio::test]
async fn connect_surfaces_authorization_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/profile");
            then.status(403);
        })
        .await;

    let err = ImdbClient::connect(SessionCredentials::new("expired", "expired"), &server.base_url(), None)
        .await
        .err()
        .unwrap();
    assert!(err.is_authorization());
    assert!(err.to_string().contains("update the imdb cookie values"));
}

#[tokio::test]
async fn fetch_list_reads_name_slug_and_items() {
    let server = MockServer::start_async().await;
    let export = server
        .mock_async(|when, then| {
            when.method(GET).path("/list/ls100/export").header_exists("cookie");
            then.status(200)
                .header("content-type", "text/csv")
                .header("content-disposition", "attachment; filename=\"My Watchlist.csv\"")
                .body(list_csv(&[("tt0111161", "Movie"), ("tt0944947", "TV Series")]));
        })
        .await;

    let client = client_for(&server, Some("ur1"), None);
    let list = client.fetch_list("ls100").await.unwrap();

    export.assert_async().await;
    assert_eq!(list.list_id, "ls100");
    assert_eq!(list.list_name, "My Watchlist");
    assert_eq!(list.slug, "my-watchlist");
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[0].id, "tt0111161");
    assert_eq!(list.items[1].title_type, "TV Series");
    assert!(list.items.iter().all(|item| item.rating.is_none()));
    assert!(!list.is_watchlist);
}

#[tokio::test]
async fn fetch_watchlist_is_flagged() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/list/ls000000001/export");
            then.status(200)
                .header("content-disposition", "attachment; filename=\"WATCHLIST.csv\"")
                .body(list_csv(&[("tt0111161", "Movie")]));
        })
        .await;

    let client = client_for(&server, Some("ur1"), Some("ls000000001"));
    let list = client.get_watchlist().await.unwrap();

    assert!(list.is_watchlist);
    assert_eq!(list.list_name, "WATCHLIST");
    assert_eq!(list.slug, "watchlist");
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn fetch_watchlist_without_id_is_an_error() {
    let server = MockServer::start_async().await;
    let client = client_for(&server, Some("ur1"), None);
    assert!(matches!(
        client.fetch_watchlist().await,
        Err(ImdbError::MissingIdentity("watchlist id"))
    ));
}

#[tokio::test]
async fn fetch_list_not_found_names_the_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/list/nonexistent/export");
            then.status(404);
        })
        .await;

    let client = client_for(&server, Some("ur1"), None);
    match client.fetch_list("nonexistent").await {
        Err(ImdbError::ListNotFound { list_id, url }) => {
            assert_eq!(list_id, "nonexistent");
            assert!(url.ends_with("/list/nonexistent/export"));
        }
        other => panic!("expected ListNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_list_without_content_disposition_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/list/ls100/export");
            then.status(200).body(list_csv(&[("tt0111161", "Movie")]));
        })
        .await;

    let client = client_for(&server, Some("ur1"), None);
    assert!(matches!(
        client.fetch_list("ls100").await,
        Err(ImdbError::Decode(DecodeError::MissingHeader(_)))
    ));
}

#[tokio::test]
async fn forbidden_surfaces_authorization_error_everywhere() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(403);
        })
        .await;

    let client = client_for(&server, Some("ur1"), Some("ls1"));

    let err = client.fetch_list("ls100").await.unwrap_err();
    assert!(err.is_authorization());
    assert_eq!(err.status(), Some(403));
    assert!(client.fetch_watchlist().await.unwrap_err().is_authorization());
    assert!(client.fetch_all_lists().await.unwrap_err().is_authorization());
    assert!(client.fetch_ratings().await.unwrap_err().is_authorization());
}

#[tokio::test]
async fn unexpected_status_carries_code() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/list/ls100/export");
            then.status(503);
        })
        .await;

    let client = client_for(&server, Some("ur1"), None);
    match client.fetch_list("ls100").await {
        Err(ImdbError::UnexpectedStatus { status, method, url, client }) => {
            assert_eq!(status, 503);
            assert_eq!(method, reqwest::Method::GET);
            assert_eq!(client, "imdb");
            assert!(url.ends_with("/list/ls100/export"));
        }
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn fetch_all_lists_skips_failed_lists() {
    let server = MockServer::start_async().await;
    let overview = server
        .mock_async(|when, then| {
            when.method(GET).path("/user/ur1/lists").header_exists("cookie");
            then.status(200).body(
                r#"<html><body>
                    <div class="user-list" id="ls001"></div>
                    <div class="user-list" id="ls404"></div>
                    <div class="user-list" id="ls002"></div>
                </body></html>"#,
            );
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/list/ls001/export");
            then.status(200)
                .header("content-disposition", "attachment; filename=\"Sci-Fi Favorites 2024.csv\"")
                .body(list_csv(&[("tt0083658", "Movie")]));
        })
        .await;
    let missing = server
        .mock_async(|when, then| {
            when.method(GET).path("/list/ls404/export");
            then.status(404);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/list/ls002/export");
            then.status(200)
                .header("content-disposition", "attachment; filename=\"Comfort Shows.csv\"")
                .body(list_csv(&[("tt0108778", "TV Series"), ("tt0098904", "TV Series")]));
        })
        .await;

    let client = client_for(&server, Some("ur1"), None);
    let lists = client.get_lists().await.unwrap();

    overview.assert_async().await;
    missing.assert_async().await;
    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0].list_id, "ls001");
    assert_eq!(lists[0].slug, "sci-fi-favorites-2024");
    assert_eq!(lists[1].list_id, "ls002");
    assert_eq!(lists[1].slug, "comfort-shows");
    assert_eq!(lists[1].items.len(), 2);
}

#[tokio::test]
async fn fetch_all_lists_with_no_lists_is_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/user/ur1/lists");
            then.status(200).body("<html><body><p>You have no lists</p></body></html>");
        })
        .await;

    let client = client_for(&server, Some("ur1"), None);
    assert!(client.fetch_all_lists().await.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_ratings_decodes_rows() {
    let server = MockServer::start_async().await;
    let export = server
        .mock_async(|when, then| {
            when.method(GET).path("/user/ur1/ratings/export").header_exists("cookie");
            then.status(200).body(format!(
                "{}\ntt0111161,9,2022-05-01,The Shawshank Redemption,https://www.imdb.com/title/tt0111161/,movie\n",
                RATINGS_HEADER
            ));
        })
        .await;

    let client = client_for(&server, Some("ur1"), None);
    let ratings = client.get_ratings().await.unwrap();

    export.assert_async().await;
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].id, "tt0111161");
    assert_eq!(ratings[0].title_type, "movie");
    assert_eq!(ratings[0].rating(), Some(9));
    assert_eq!(ratings[0].rating_date(), NaiveDate::from_ymd_opt(2022, 5, 1));
}

#[tokio::test]
async fn fetch_ratings_with_bad_date_fails_whole_call() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/user/ur1/ratings/export");
            then.status(200).body(format!(
                "{}\ntt0111161,9,2022-05-01,a,b,movie\ntt0944947,8,yesterday,c,d,TV Series\n",
                RATINGS_HEADER
            ));
        })
        .await;

    let client = client_for(&server, Some("ur1"), None);
    assert!(matches!(
        client.fetch_ratings().await,
        Err(ImdbError::Decode(DecodeError::RatingDate { .. }))
    ));
}

#[tokio::test]
async fn fetch_ratings_not_found_is_unexpected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/user/ur1/ratings/export");
            then.status(404);
        })
        .await;

    let client = client_for(&server, Some("ur1"), None);
    let err = client.fetch_ratings().await.unwrap_err();
    assert!(matches!(err, ImdbError::UnexpectedStatus { status: 404, .. }));
}

#[tokio::test]
async fn fetch_ratings_requires_user_id() {
    let server = MockServer::start_async().await;
    let client = client_for(&server, Some("scrape"), None);
    assert!(matches!(
        client.fetch_ratings().await,
        Err(ImdbError::MissingIdentity("user id"))
    ));
}

/// Serve one canned HTTP response with exactly the given header bytes.
async fn serve_raw_once(headers: Vec<u8>, body: String) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let mut response = b"HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nConnection: close\r\n".to_vec();
        response.extend_from_slice(&headers);
        response.extend_from_slice(format!("Content-Length: {}\r\n\r\n", body.len()).as_bytes());
        response.extend_from_slice(body.as_bytes());
        socket.write_all(&response).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn fetch_list_accepts_utf8_filename_in_header() {
    let mut header = b"Content-Disposition: attachment; filename=\"Am".to_vec();
    header.extend_from_slice("é".as_bytes());
    header.extend_from_slice(b"lie Picks.csv\"\r\n");
    let base_url = serve_raw_once(header, list_csv(&[("tt0211915", "Movie")])).await;

    let credentials = SessionCredentials::new("at-token", "ubid-token").with_user_id(Some("ur1".to_string()));
    let client = ImdbClient::new(credentials, &base_url, None).unwrap();
    let list = client.fetch_list("ls1").await.unwrap();

    assert_eq!(list.list_name, "Amélie Picks");
    assert_eq!(list.slug, "amlie-picks");
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].id, "tt0211915");
}
