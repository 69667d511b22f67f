use goosemgr::connections::connector_fn;
use goosemgr::{ConfigError, Definitions, Goose, GooseConnection, GooseMgr, COMMENT_KEY};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::atomic::Ordering;
use tempfile::NamedTempFile;

mod common;
use common::stub_goose::{StubConnector, StubError, StubGoose};

fn json_file(contents: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[tokio::test]
async fn path_source_builds_models_from_file() -> anyhow::Result<()> {
    let file = json_file(r#"{ "tableA": { "id": "int" } }"#)?;
    let (connector, _) = StubConnector::succeeding();

    let mut mgr = GooseMgr::<StubGoose, _>::new(file.path(), connector)?;
    mgr.connect(json!({})).await?;

    let table_a = mgr.model("tableA").expect("tableA must be built");
    assert_eq!(table_a.schema.definition, json!({ "id": "int" }));
    assert!(mgr.model(COMMENT_KEY).is_none());
    Ok(())
}

#[test]
fn file_contents_equal_parsing_the_json_directly() -> anyhow::Result<()> {
    let text = r#"{ "//": "shop", "users": { "name": "string" }, "orders": [1, 2] }"#;
    let file = json_file(text)?;
    let (connector, _) = StubConnector::succeeding();

    let path = file.path().to_str().expect("temp paths are utf-8").to_owned();
    let mgr = GooseMgr::<StubGoose, _>::new(path, connector)?;

    let direct: Definitions<Value> = Definitions::from_json_str(text)?;
    assert_eq!(mgr.definitions(), &direct);
    Ok(())
}

#[test]
fn invalid_json_fails_at_construction_before_any_connect() -> anyhow::Result<()> {
    let file = json_file("{ \"users\": ")?;
    let (connector, calls) = StubConnector::succeeding();

    let err = match GooseMgr::<StubGoose, _>::new(file.path(), connector) {
        Ok(_) => panic!("invalid JSON must not produce a manager"),
        Err(e) => e,
    };

    assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == file.path()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn missing_file_fails_at_construction() {
    let dir = tempfile::tempdir().unwrap();
    let (connector, _) = StubConnector::succeeding();

    let result = GooseMgr::<StubGoose, _>::new(dir.path().join("absent.json"), connector);

    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

/// A driver whose definitions are a concrete struct instead of raw JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct TableDef {
    columns: Vec<String>,
}

struct TypedGoose;

impl Goose for TypedGoose {
    type Definition = TableDef;
    type Schema = TableDef;

    fn new() -> Self {
        TypedGoose
    }

    fn schema(definition: &TableDef) -> TableDef {
        definition.clone()
    }
}

struct TypedConnection;

impl GooseConnection<TypedGoose> for TypedConnection {
    type Model = (String, TableDef);

    fn model(&self, name: &str, schema: TableDef) -> (String, TableDef) {
        (name.to_owned(), schema)
    }
}

#[tokio::test]
async fn typed_definitions_accept_any_comment_value() -> anyhow::Result<()> {
    for comment in [r#""accounts database""#, r#"["a", 1]"#, "null"] {
        let file = json_file(&format!(
            r#"{{ "//": {comment}, "users": {{ "columns": ["id", "email"] }} }}"#
        ))?;
        let connector = connector_fn(|_: ()| async { Ok::<_, StubError>(TypedConnection) });

        let mut mgr = GooseMgr::<TypedGoose, _>::new(file.path(), connector)?;
        mgr.connect(()).await?;

        let (name, schema) = mgr.model("users").expect("users must be built");
        assert_eq!(name, "users");
        assert_eq!(schema.columns, ["id", "email"]);
        assert!(mgr.model(COMMENT_KEY).is_none(), "comment {comment} is not a model");
        assert_eq!(
            mgr.definitions().comment(),
            Some(&serde_json::from_str::<Value>(comment)?)
        );
    }
    Ok(())
}

#[test]
fn typed_definition_errors_are_still_reported() -> anyhow::Result<()> {
    let file = json_file(r#"{ "//": "fine", "users": { "columns": "id" } }"#)?;
    let connector = connector_fn(|_: ()| async { Ok::<_, StubError>(TypedConnection) });

    let result = GooseMgr::<TypedGoose, _>::new(file.path(), connector);

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
    Ok(())
}
