use httpmock::Method::{GET, POST};
use httpmock::MockServer;
use tempfile::tempdir;
use url::Url;

fn token_mock(server: &MockServer) {
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/access_token");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(r#"{"access_token":"test-token","token_type":"bearer","expires_in":3600}"#);
    });
}

fn comments_body() -> String {
    // top1
    // ├── reply1
    // │   └── <more m1> -> deep1
    // └── reply2
    // <more m_top> -> top2
    r#"[
  {"kind":"Listing","data":{"children":[
    {"kind":"t3","data":{
      "id":"abc123","name":"t3_abc123","title":"Interesting thread",
      "author":"op_user","score":321,"upvote_ratio":0.95,"num_comments":5,
      "created_utc":1700000000.0,
      "url":"https://www.reddit.com/r/rust/comments/abc123/interesting_thread/",
      "selftext":"the post text","permalink":"/r/rust/comments/abc123/interesting_thread/",
      "subreddit":"rust","link_flair_text":null,
      "over_18":false,"spoiler":false,"locked":false,"gilded":0}}]}},
  {"kind":"Listing","data":{"children":[
    {"kind":"t1","data":{
      "id":"top1","name":"t1_top1","author":"alice","body":"first!",
      "score":50,"created_utc":1700000100.0,
      "permalink":"/r/rust/comments/abc123/interesting_thread/top1/",
      "parent_id":"t3_abc123","is_submitter":false,"distinguished":null,
      "edited":false,"controversiality":0,"gilded":0,
      "replies":{"kind":"Listing","data":{"children":[
        {"kind":"t1","data":{
          "id":"reply1","name":"t1_reply1","author":"bob","body":"nested",
          "score":10,"created_utc":1700000200.0,
          "permalink":"/r/rust/comments/abc123/interesting_thread/reply1/",
          "parent_id":"t1_top1","is_submitter":false,"edited":false,
          "controversiality":0,"gilded":0,
          "replies":{"kind":"Listing","data":{"children":[
            {"kind":"more","data":{"count":1,"id":"m1","name":"t1_m1",
              "parent_id":"t1_reply1","children":["deep1"]}}]}}}},
        {"kind":"t1","data":{
          "id":"reply2","name":"t1_reply2","author":"op_user","body":"thanks all",
          "score":8,"created_utc":1700000300.0,
          "permalink":"/r/rust/comments/abc123/interesting_thread/reply2/",
          "parent_id":"t1_top1","is_submitter":true,"edited":false,
          "controversiality":0,"gilded":0,"replies":""}}]}}}},
    {"kind":"more","data":{"count":1,"id":"m_top","name":"t1_m_top",
      "parent_id":"t3_abc123","children":["top2"]}}]}}
]"#
    .to_string()
}

#[test]
fn scrapes_a_thread_with_continuations_and_writes_all_exports() {
    let server = MockServer::start();
    token_mock(&server);

    server.mock(|when, then| {
        when.method(GET)
            .path("/comments/abc123.json")
            .header("authorization", "Bearer test-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(comments_body());
    });

    server.mock(|when, then| {
        when.method(GET)
            .path("/api/morechildren.json")
            .query_param("link_id", "t3_abc123")
            .query_param("children", "deep1");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(
                r#"{"json":{"errors":[],"data":{"things":[
                  {"kind":"t1","data":{
                    "id":"deep1","name":"t1_deep1","author":"[deleted]","body":"buried reply",
                    "score":2,"created_utc":1700000400.0,
                    "permalink":"/r/rust/comments/abc123/interesting_thread/deep1/",
                    "parent_id":"t1_reply1","is_submitter":false,"edited":false,
                    "controversiality":0,"gilded":0,"replies":""}}]}}}"#,
            );
    });

    server.mock(|when, then| {
        when.method(GET)
            .path("/api/morechildren.json")
            .query_param("link_id", "t3_abc123")
            .query_param("children", "top2");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(
                r#"{"json":{"errors":[],"data":{"things":[
                  {"kind":"t1","data":{
                    "id":"top2","name":"t1_top2","author":"carol","body":"late to the party",
                    "score":1,"created_utc":1700000500.0,
                    "permalink":"/r/rust/comments/abc123/interesting_thread/top2/",
                    "parent_id":"t3_abc123","is_submitter":false,"edited":1700000600.0,
                    "controversiality":0,"gilded":0,"replies":""}}]}}}"#,
            );
    });

    let tmp = tempdir().unwrap();
    let prefix = tmp.path().join("thread").to_str().unwrap().to_string();
    let base = Url::parse(&server.url("/")).unwrap();

    let args = reddit_thread_export::CliArgs {
        submission_id: "abc123".to_string(),
        out_prefix: prefix.clone(),
        client_id: "test-id".to_string(),
        client_secret: "test-secret".to_string(),
        user_agent: "test-agent".to_string(),
        search_user: Some("op_user".to_string()),
        progress: reddit_thread_export::ProgressMode::Never,
        api_url: base.clone(),
        auth_url: base,
    };
    reddit_thread_export::run(args).unwrap();

    // JSON: full structural dump in traversal order
    let raw = std::fs::read_to_string(format!("{prefix}.json")).unwrap();
    let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(v["post"]["id"], "abc123");
    assert_eq!(v["total_comments"], 5);
    let ids: Vec<&str> = v["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["top1", "reply1", "deep1", "reply2", "top2"]);
    let depths: Vec<u64> = v["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["depth"].as_u64().unwrap())
        .collect();
    assert_eq!(depths, [0, 1, 2, 1, 0]);
    assert_eq!(v["comments"][2]["author"], "[deleted]");
    assert_eq!(v["comments"][4]["edited"], true);

    // transcript: header block and depth-proportional indentation
    let txt = std::fs::read_to_string(format!("{prefix}.txt")).unwrap();
    assert!(txt.contains("TITLE: Interesting thread"));
    assert!(txt.contains("AUTHOR: u/op_user"));
    assert!(txt.contains("COMMENTS (5 total)"));
    assert!(txt.contains("┌─ [50] u/alice (depth: 0)"));
    assert!(txt.contains("    ┌─ [2] u/[deleted] (depth: 2)"));
    assert!(txt.contains("│  buried reply"));
    assert!(txt.contains("u/op_user [OP]"));

    // CSV: one row per comment plus the header
    let csv = std::fs::read_to_string(format!("{prefix}.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines[0],
        "id,author,score,depth,is_submitter,created_datetime,body"
    );
    assert!(lines[4].starts_with("\"reply2\",\"op_user\",8,1,true,"));

    // top comments: sorted by score descending
    let top = std::fs::read_to_string(format!("{prefix}_top_comments.txt")).unwrap();
    assert!(top.starts_with("TOP 50 COMMENTS BY SCORE"));
    let alice = top.find("u/alice").unwrap();
    let bob = top.find("u/bob").unwrap();
    assert!(alice < bob);
}

#[test]
fn unknown_submission_is_a_not_found_error() {
    let server = MockServer::start();
    token_mock(&server);

    server.mock(|when, then| {
        when.method(GET).path("/comments/missing.json");
        then.status(404)
            .header("Content-Type", "application/json")
            .body(r#"{"message":"Not Found","error":404}"#);
    });

    let base = Url::parse(&server.url("/")).unwrap();
    let creds = reddit_thread_export::CliArgs {
        submission_id: "missing".to_string(),
        out_prefix: "unused".to_string(),
        client_id: "test-id".to_string(),
        client_secret: "test-secret".to_string(),
        user_agent: "test-agent".to_string(),
        search_user: None,
        progress: reddit_thread_export::ProgressMode::Never,
        api_url: base.clone(),
        auth_url: base,
    };
    let err = reddit_thread_export::run(creds).unwrap_err();
    let err = err.downcast::<reddit_thread_export::Error>().unwrap();
    assert!(matches!(err, reddit_thread_export::Error::NotFound(id) if id == "missing"));
}

#[test]
fn placeholder_credentials_fail_before_any_network_call() {
    // no server at all; validation must reject first
    let base = Url::parse("http://127.0.0.1:1/").unwrap();
    let args = reddit_thread_export::CliArgs {
        submission_id: "abc123".to_string(),
        out_prefix: "unused".to_string(),
        client_id: "YOUR_CLIENT_ID_HERE".to_string(),
        client_secret: "YOUR_CLIENT_SECRET_HERE".to_string(),
        user_agent: "test-agent".to_string(),
        search_user: None,
        progress: reddit_thread_export::ProgressMode::Never,
        api_url: base.clone(),
        auth_url: base,
    };
    let err = reddit_thread_export::run(args).unwrap_err();
    assert!(err.to_string().contains("credentials"));
}
