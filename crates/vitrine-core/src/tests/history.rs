use crate::history::{GeneratedImage, RefinementHistory};

fn image(tag: u8) -> GeneratedImage {
    GeneratedImage::new(vec![tag], None)
}

#[test]
fn append_then_undo_restores_the_exact_predecessor() {
    let mut history = RefinementHistory::new();
    let root_id = history.append(image(0)).id.clone();
    history.append(GeneratedImage::new(
        vec![1],
        Some("mais contraste".to_string()),
    ));

    let restored = history.undo().unwrap();
    assert_eq!(restored.id, root_id);
    assert_eq!(history.current().unwrap().id, root_id);
}

#[test]
fn undo_on_a_single_node_chain_is_a_noop() {
    let mut history = RefinementHistory::new();
    let root_id = history.append(image(0)).id.clone();
    assert!(history.undo().is_none());
    assert_eq!(history.current().unwrap().id, root_id);
    assert_eq!(history.len(), 1);
}

#[test]
fn undo_on_an_empty_chain_is_a_noop() {
    let mut history = RefinementHistory::new();
    assert!(history.undo().is_none());
    assert!(history.current().is_none());
}

#[test]
fn append_after_undo_discards_forward_history() {
    let mut history = RefinementHistory::new();
    history.append(image(0));
    history.append(image(1));
    history.append(image(2));
    history.undo();
    history.undo();

    let replacement_id = history.append(image(9)).id.clone();
    assert_eq!(history.len(), 2);
    assert_eq!(history.current().unwrap().id, replacement_id);
    // The discarded branch is unreachable: undo from here lands on the root.
    let root_id = history.root().unwrap().id.clone();
    assert_eq!(history.undo().unwrap().id, root_id);
    assert!(history.undo().is_none());
}

#[test]
fn clear_empties_the_chain() {
    let mut history = RefinementHistory::new();
    history.append(image(0));
    history.append(image(1));
    history.clear();
    assert!(history.is_empty());
    assert!(history.current().is_none());
}

#[test]
fn nodes_carry_instruction_and_payload() {
    let mut history = RefinementHistory::new();
    let node = history.append(GeneratedImage::new(
        vec![1, 2, 3],
        Some("fundo mais claro".to_string()),
    ));
    assert_eq!(node.bytes, vec![1, 2, 3]);
    assert_eq!(node.instruction.as_deref(), Some("fundo mais claro"));
}
