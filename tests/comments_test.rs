use linkedin_activity_export::{
    extract, extract_with_options, CommentKind, CommentRecord, Error, Mode, Options, Records,
};

const COMMENTS_PAGE: &str = include_str!("fixtures/comments_page.html");

fn comments(records: Records) -> Vec<CommentRecord> {
    match records {
        Records::Comments(rows) => rows,
        Records::Posts(_) => panic!("expected comments"),
    }
}

#[test]
fn comment_page_is_detected_and_deduplicated() {
    let rows = comments(extract(COMMENTS_PAGE).expect("extraction failed"));
    let texts: Vec<&str> = rows.iter().map(|r| r.comment.as_str()).collect();
    assert_eq!(
        texts,
        [
            "Totally agree with this",
            "Mostly vim and coffee",
            "Thanks for reading!",
            "Congrats!",
        ]
    );
    // the first of the duplicate pair survives
    assert_eq!(rows[0].likes, 5);
}

#[test]
fn duplicates_kept_when_disabled() {
    let options = Options {
        deduplicate_comments: false,
        ..Options::default()
    };
    let rows = comments(extract_with_options(COMMENTS_PAGE, &options).expect("extraction failed"));
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[3].likes, 6);
}

#[test]
fn direct_comment_on_other_authors_post() {
    let rows = comments(extract(COMMENTS_PAGE).expect("extraction failed"));
    let row = &rows[0];

    assert_eq!(row.kind, CommentKind::AuthorPost("Sam Lee".to_string()));
    assert_eq!(row.kind.to_string(), "Direct comment on Sam Lee's post");
    assert_eq!(row.in_response_to, "Big news: we shipped v2");
    assert_eq!(row.when.date, "2023-12-11");
    assert_eq!(row.when.time, "15:30:54");
    assert_eq!(row.when.day, "Monday");
    assert_eq!(
        row.url,
        "https://www.linkedin.com/feed/update/urn:li:activity:7140000000000000000/"
    );
}

#[test]
fn reply_targets_parent_comment() {
    let rows = comments(extract(COMMENTS_PAGE).expect("extraction failed"));
    let row = &rows[1];

    assert_eq!(row.kind, CommentKind::Reply("Sam Lee".to_string()));
    assert_eq!(row.kind.to_string(), "Reply to Sam Lee");
    assert_eq!(row.in_response_to, "What tools do you use?");
    assert_eq!(row.likes, 2);
    assert_eq!(row.when.date, "2024-01-08");
}

#[test]
fn comment_on_own_post() {
    let rows = comments(extract(COMMENTS_PAGE).expect("extraction failed"));
    let row = &rows[2];

    assert_eq!(row.kind, CommentKind::OwnPost);
    assert_eq!(row.kind.to_string(), "Direct comment on their own post");
    assert_eq!(row.in_response_to, "Hello world");
    assert_eq!(row.likes, 0);
}

#[test]
fn comment_without_author_or_id() {
    let rows = comments(extract(COMMENTS_PAGE).expect("extraction failed"));
    let row = &rows[3];

    assert_eq!(row.kind, CommentKind::Post);
    assert_eq!(row.kind.to_string(), "Direct comment on post");
    assert_eq!(row.in_response_to, "");
    assert_eq!(row.url, "");
    assert!(row.when.is_empty());
}

#[test]
fn posts_override_on_comment_page() {
    let options = Options {
        mode: Some(Mode::Posts),
        ..Options::default()
    };
    let records = extract_with_options(COMMENTS_PAGE, &options).expect("extraction failed");
    assert_eq!(records.mode(), Mode::Posts);
    assert_eq!(records.len(), 6);
}

#[test]
fn comments_mode_without_comment_updates_is_empty() {
    let html = r#"<p>Loaded 1 Comments posts</p>
        <div class="feed-shared-update-v2">
            <div class="update-components-header">Jane Doe reposted this</div>
        </div>"#;
    assert!(matches!(extract(html), Err(Error::EmptyResult)));
}
