//! Cyclic object graphs, lazy field lists and union membership.
//!
//! Statics are declared inside each test so call counters are not shared
//! between tests running in parallel.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use gqlkind_schema::{
    Arguments, Field, FieldError, FieldValue, ObjectKind, Schema, SchemaConfig, SchemaError, Thunk,
    Type, UnionKind,
};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

fn leaf(name: &str, ty: Type<()>) -> Field<()> {
    Field::new(name, ty, |_| Thunk::value(FieldValue::Null))
}

fn json_field(name: &str, key: &'static str, ty: Type<()>) -> Field<()> {
    Field::new(name, ty, move |rc| match rc.parent_json() {
        Ok(source) => Thunk::value(source.get(key).cloned().unwrap_or_default()),
        Err(err) => Thunk::error(err),
    })
}

// =============================================================================
// Cyclic graphs
// =============================================================================

#[test]
fn test_cyclic_graph_forces_each_producer_once() {
    static AUTHOR_CALLS: AtomicUsize = AtomicUsize::new(0);
    static POST_CALLS: AtomicUsize = AtomicUsize::new(0);

    static AUTHOR: LazyLock<Arc<ObjectKind<()>>> = LazyLock::new(|| {
        Arc::new(ObjectKind::lazy("Author", || {
            AUTHOR_CALLS.fetch_add(1, Ordering::SeqCst);
            vec![
                json_field("name", "name", Type::non_null(Type::string())),
                leaf("posts", Type::list(Type::non_null(Type::from(Arc::clone(&POST))))),
            ]
        }))
    });

    static POST: LazyLock<Arc<ObjectKind<()>>> = LazyLock::new(|| {
        Arc::new(ObjectKind::lazy("Post", || {
            POST_CALLS.fetch_add(1, Ordering::SeqCst);
            vec![
                json_field("title", "title", Type::string()),
                leaf("author", Type::non_null(Type::from(Arc::clone(&AUTHOR)))),
            ]
        }))
    });

    let schema = Schema::new(vec![leaf("author", Type::from(Arc::clone(&AUTHOR)))], None).unwrap();
    assert!(!AUTHOR.is_forced());
    assert_eq!(AUTHOR_CALLS.load(Ordering::SeqCst), 0);

    assert_ok!(schema.validate());
    assert_ok!(schema.validate());
    let sdl = schema.to_sdl();

    assert_eq!(AUTHOR_CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(POST_CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(sdl.matches("type Author {").count(), 1);
    assert_eq!(sdl.matches("type Post {").count(), 1);
    assert!(sdl.contains("  author: Author!\n"));

    // Walking the cycle lands back on the same node.
    let posts = AUTHOR.field("posts").unwrap();
    let post = posts.ty().named_type().as_object().unwrap();
    let author = post.field("author").unwrap().ty().named_type().as_object().unwrap();
    assert!(Arc::ptr_eq(author, &*AUTHOR));
}

#[test]
fn test_reachable_validation_finds_lazy_duplicates() {
    static BROKEN: LazyLock<Arc<ObjectKind<()>>> = LazyLock::new(|| {
        Arc::new(ObjectKind::lazy("Broken", || {
            vec![
                leaf("id", Type::id()),
                leaf("self", Type::from(Arc::clone(&BROKEN))),
                leaf("id", Type::id()),
            ]
        }))
    });

    let root = || leaf("broken", Type::from(Arc::clone(&BROKEN)));

    // Root-only validation accepts the schema without forcing the object.
    let schema = assert_ok!(Schema::new(vec![root()], None));
    let err = assert_err!(schema.validate());
    assert_eq!(err, SchemaError::duplicate_field("Broken", "id"));

    let config = SchemaConfig::from_toml("[schema]\nvalidate_reachable = true").unwrap();
    let err = assert_err!(Schema::builder().query(root()).config(config).build());
    assert_eq!(err.error_code(), "DUPLICATE_FIELD");
}

// =============================================================================
// Concurrent first access
// =============================================================================

#[test]
fn test_concurrent_first_access_across_threads() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let object = ObjectKind::<()>::lazy("Slow", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        vec![leaf("a", Type::int()), leaf("b", Type::int())]
    });

    let seen: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| object.fields().as_ptr() as usize))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(seen.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(object.fields().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_access_across_tasks() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let object = Arc::new(ObjectKind::<()>::lazy("Shared", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(10));
        vec![leaf("value", Type::string())]
    }));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let object = Arc::clone(&object);
            tokio::spawn(async move { object.fields().len() })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), 1);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Unions
// =============================================================================

fn search_schema(include_post: bool) -> (Schema<()>, Arc<ObjectKind<()>>) {
    let author = Arc::new(
        ObjectKind::new("Author", vec![json_field("name", "name", Type::string())]).unwrap(),
    );
    let post = Arc::new(
        ObjectKind::new("Post", vec![json_field("title", "title", Type::string())]).unwrap(),
    );

    let members = if include_post {
        vec![Arc::clone(&author), Arc::clone(&post)]
    } else {
        vec![Arc::clone(&author)]
    };
    let (pick_author, pick_post) = (Arc::clone(&author), Arc::clone(&post));
    let union = UnionKind::new(members, move |value: &FieldValue| {
        let is_post = value.as_json().and_then(|v| v.get("title")).is_some();
        if is_post { Arc::clone(&pick_post) } else { Arc::clone(&pick_author) }
    })
    .named("SearchResult");

    let search = Field::new("search", Type::list(Type::non_null(Type::union(union))), |_| {
        Thunk::pending(async {
            Ok(FieldValue::from(json!([{ "name": "Ada" }, { "title": "Notes" }])))
        })
    });

    (Schema::new(vec![search], None).unwrap(), post)
}

#[tokio::test]
async fn test_union_resolves_declared_members() {
    let (schema, _) = search_schema(true);
    let search = schema.query("search").unwrap();

    let value = search.resolve_checked(None, &(), &Arguments::new()).await.unwrap();
    let union = search.ty().named_type().as_union().unwrap();
    let names: Vec<String> = value
        .as_list()
        .unwrap()
        .iter()
        .map(|item| union.resolve_member(item).unwrap().name().to_string())
        .collect();
    assert_eq!(names, ["Author", "Post"]);
}

#[tokio::test]
async fn test_union_undeclared_member_is_detected() {
    let (schema, post) = search_schema(false);
    let search = schema.query("search").unwrap();

    // Construction and validation cannot see the discriminator's answers.
    assert_ok!(schema.validate());
    assert!(!search.ty().named_type().as_union().unwrap().is_member(post.name()));

    let err = search
        .resolve_checked(None, &(), &Arguments::new())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        FieldError::Schema(SchemaError::undeclared_union_member("SearchResult", "Post"))
    );
    assert_eq!(err.error_code(), "UNDECLARED_UNION_MEMBER");
}
