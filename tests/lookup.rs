mod support;

use serde_json::json;

use sluggable::infrastructure::repositories::SqliteScope;
use sluggable::{ApplicationError, QueryScope, RecordId};
use support::{Post, memory_manager};

fn posts() -> Vec<Post> {
    vec![
        Post::stored(42, "Answer", "answer"),
        Post::stored(7, "My Post", "my-post"),
        Post::stored(8, "Hidden", "hidden").trashed(),
    ]
}

/// Records the predicates composed into it.
#[derive(Debug, Default, PartialEq)]
struct RecordingScope(Vec<String>);

impl QueryScope for RecordingScope {
    fn where_key(mut self, key: RecordId) -> Self {
        self.0.push(format!("id = {key}"));
        self
    }

    fn where_field(mut self, field: &str, value: &str) -> Self {
        self.0.push(format!("{field} = {value}"));
        self
    }
}

#[tokio::test]
async fn find_by_slug_matches_exactly() {
    let (manager, _) = memory_manager(posts(), json!({}));

    let found = manager.find_by_slug("my-post").await.unwrap().unwrap();
    assert_eq!(found.id, Some(7));

    assert!(manager.find_by_slug("my").await.unwrap().is_none());
}

#[tokio::test]
async fn or_fail_variants_signal_not_found() {
    let (manager, _) = memory_manager(posts(), json!({}));

    assert_eq!(manager.find_by_slug_or_fail("answer").await.unwrap().id, Some(42));
    assert!(matches!(
        manager.find_by_slug_or_fail("missing").await,
        Err(ApplicationError::NotFound(_))
    ));
    assert!(manager.find_by_slug_or_id_or_fail("999").await.unwrap_err().is_not_found());
    assert!(manager.find_by_slug_or_id_or_fail("nope").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn numeric_input_resolves_by_id() {
    let (manager, _) = memory_manager(posts(), json!({}));

    let by_id = manager.find_by_slug_or_id("42").await.unwrap().unwrap();
    assert_eq!(by_id.slug.as_deref(), Some("answer"));

    let by_slug = manager.find_by_slug_or_id("my-post").await.unwrap().unwrap();
    assert_eq!(by_slug.id, Some(7));

    let or_fail = manager.find_by_slug_or_id_or_fail("7").await.unwrap();
    assert_eq!(or_fail.slug.as_deref(), Some("my-post"));
}

#[tokio::test]
async fn non_positive_numbers_are_treated_as_slugs() {
    let (manager, _) = memory_manager(vec![Post::stored(3, "Zero", "0")], json!({}));

    let found = manager.find_by_slug_or_id("0").await.unwrap().unwrap();
    assert_eq!(found.id, Some(3));
}

#[tokio::test]
async fn trashed_records_are_not_found() {
    let (manager, _) = memory_manager(posts(), json!({}));

    assert!(manager.find_by_slug("hidden").await.unwrap().is_none());
    assert!(manager.find_by_slug_or_id("8").await.unwrap().is_none());
}

#[tokio::test]
async fn get_by_slug_returns_every_match() {
    let (manager, repo) = memory_manager(posts(), json!({ "unique": false }));
    repo.save(Post::stored(9, "Answer", "answer")).unwrap();

    let found = manager.get_by_slug("answer").await.unwrap();
    let mut ids: Vec<_> = found.iter().filter_map(|post| post.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, [9, 42]);
}

#[tokio::test]
async fn lookups_follow_the_configured_field() {
    let mut post = Post::stored(5, "Custom", "ignored");
    post.subtitle = Some("by-subtitle".into());
    let (manager, _) = memory_manager(vec![post], json!({ "save_to": "subtitle" }));

    let found = manager.find_by_slug("by-subtitle").await.unwrap().unwrap();
    assert_eq!(found.id, Some(5));
}

#[test]
fn scopes_compose_into_caller_queries() {
    let (manager, _) = memory_manager::<Post>(Vec::new(), json!({}));

    let scope = manager.where_slug(RecordingScope::default(), "my-post").unwrap();
    assert_eq!(scope.0, ["slug = my-post"]);

    let scope = manager.where_id_or_slug(RecordingScope::default(), "42").unwrap();
    assert_eq!(scope.0, ["id = 42"]);

    let scope = manager
        .where_id_or_slug(RecordingScope::default(), "my-post")
        .unwrap();
    assert_eq!(scope.0, ["slug = my-post"]);
}

#[test]
fn scopes_render_sql_for_sqlite() {
    let (manager, _) = memory_manager::<Post>(Vec::new(), json!({}));

    let scope = manager
        .where_id_or_slug(SqliteScope::select::<Post>(), "my-post")
        .unwrap();
    assert_eq!(
        scope.sql(),
        "SELECT id, title, subtitle, slug, deleted_at FROM posts WHERE \"deleted_at\" IS NULL AND \"slug\" = ?"
    );

    let scope = manager
        .where_id_or_slug(SqliteScope::select::<Post>(), "42")
        .unwrap();
    assert!(scope.sql().ends_with("AND \"id\" = ?"));
}
