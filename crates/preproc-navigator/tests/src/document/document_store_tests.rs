use super::*;

#[test]
fn store_open_get_content_close() {
    let store = DocumentStore::new();
    let uri = Url::parse("file:///sample.i").unwrap();
    store.open(uri.clone(), "#line 1 \"a.c\"".to_string(), 1);

    assert_eq!(store.get_content(&uri), Some("#line 1 \"a.c\"".to_string()));

    store.close(&uri);
    assert!(store.get_content(&uri).is_none());
}

#[test]
fn store_update_existing() {
    let store = DocumentStore::new();
    let uri = Url::parse("file:///sample.i").unwrap();
    store.open(uri.clone(), "v1".to_string(), 1);
    store.update(uri.clone(), "v2".to_string(), 2);
    let doc = store.get(&uri).unwrap();
    assert_eq!(doc.text, "v2");
    assert_eq!(doc.version, 2);
}

#[test]
fn store_update_unknown_creates() {
    let store = DocumentStore::new();
    let uri = Url::parse("file:///new.i").unwrap();
    store.update(uri.clone(), "content".to_string(), 1);
    assert!(store.get_content(&uri).is_some());
}

#[test]
fn store_applies_incremental_changes() {
    let store = DocumentStore::new();
    let uri = Url::parse("file:///sample.i").unwrap();
    store.open(uri.clone(), "int a;".to_string(), 1);
    store.apply_changes(
        &uri,
        vec![TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "int b;".to_string(),
        }],
        2,
    );
    assert_eq!(store.get_content(&uri), Some("int b;".to_string()));
}
