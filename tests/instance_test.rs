// Building, validating and serialising annotation graphs

use whatswrong_wasm::{Edge, ModelError, NlpInstance, RenderCategory, RenderMode, TokenProperty};

fn scenario() -> NlpInstance {
    let mut instance = NlpInstance::new();
    for word in ["root", "Add", "a", "gold", "corpus", "!"] {
        instance.add_token_with_properties([TokenProperty::new("word", word)]);
    }
    instance
}

#[test]
fn test_missing_endpoint_leaves_instance_unchanged() {
    let mut instance = scenario();
    instance.add_dependency(0, 1, "ROOT", "dep").unwrap();

    let result = instance.add_dependency(0, 99, "X", "dep");
    assert_eq!(result, Err(ModelError::MissingEndpoint { start: 0, end: 99 }));
    assert_eq!(instance.edge_count(), 1);
    assert_eq!(instance.token_count(), 6);
}

#[test]
fn test_equal_edges_collapse_in_get_edges() {
    let mut instance = scenario();
    instance.add_edge(Edge::new(1, 4, "OBJ", "dep")).unwrap();
    instance
        .add_edge(Edge::new(1, 4, "OBJ", "dep").with_description("again").with_final(false))
        .unwrap();
    instance.add_span(2, 4, "NP", "chunk").unwrap();

    assert_eq!(instance.edge_count(), 3);
    assert_eq!(instance.get_edges(None).len(), 2);
    assert_eq!(instance.get_edges(Some(RenderCategory::Arc)).len(), 1);
    assert_eq!(instance.get_edges(Some(RenderCategory::Span))[0].label, "NP");
}

#[test]
fn test_out_of_order_construction_and_consistify() {
    let mut instance = NlpInstance::new();
    instance.add_token(Some(3)).unwrap().set_property("word", "d");
    instance.add_token(Some(0)).unwrap().set_property("word", "a");
    assert!(!instance.is_consistent());
    assert_eq!(instance.token_count(), 2);

    instance.consistify();
    assert!(instance.is_consistent());
    let indices: Vec<usize> = instance.tokens().map(|t| t.index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert!(!instance.token(1).unwrap().is_actual);
    assert!(instance.token(3).unwrap().is_actual);
}

#[test]
fn test_json_document_round_trip_preserves_layout_data() {
    let mut instance = scenario();
    instance.set_render_mode(RenderMode::Alignment);
    instance.add_split_point(3);
    instance
        .add_edge(Edge::new(0, 4, "align", "align").with_note("sure"))
        .unwrap();

    let json = serde_json::to_string(&instance).unwrap();
    let parsed: NlpInstance = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.render_mode(), RenderMode::Alignment);
    assert_eq!(parsed.split_points(), &[3]);
    assert_eq!(parsed.token_count(), 6);
    assert_eq!(parsed.token(4).unwrap().property("word"), Some("corpus"));
    assert_eq!(parsed.edges(), instance.edges());
}

#[test]
fn test_merge_adds_properties_and_edges() {
    let mut words = scenario();
    let mut tags = NlpInstance::new();
    for tag in ["ROOT", "VB", "DT", "JJ", "NN", "."] {
        tags.add_token_with_properties([TokenProperty::new("pos", tag)]);
    }
    tags.add_dependency(1, 4, "OBJ", "dep").unwrap();

    words.merge(&tags).unwrap();
    let token = words.token(4).unwrap();
    assert_eq!(token.property("word"), Some("corpus"));
    assert_eq!(token.property("pos"), Some("NN"));
    assert_eq!(words.edge_count(), 1);

    let short = NlpInstance::new();
    assert_eq!(
        words.merge(&short),
        Err(ModelError::LengthMismatch { left: 6, right: 0 })
    );
}
