//! Structural operations on Tree

use narytree::{Position, Tree, TreeError};
use rstest::{fixture, rstest};

/// ```text
/// A
/// ├── B
/// │   └── D
/// └── C
/// ```
struct Sample {
    tree: Tree<&'static str>,
    a: Position,
    b: Position,
    c: Position,
    d: Position,
}

#[fixture]
fn sample() -> Sample {
    let mut tree = Tree::new();
    let a = tree.add_root("A").unwrap();
    let b = tree.add("B", a).unwrap();
    let c = tree.add("C", a).unwrap();
    let d = tree.add("D", b).unwrap();
    Sample { tree, a, b, c, d }
}

fn labels(
    tree: &Tree<&'static str>,
    positions: impl Iterator<Item = Position>,
) -> Vec<&'static str> {
    positions.map(|p| *tree.get(p).unwrap()).collect()
}

// ============================================================
// Root
// ============================================================

#[test]
fn given_empty_tree_when_queried_then_reports_empty() {
    let tree: Tree<i32> = Tree::new();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.root(), Err(TreeError::EmptyTree));
    assert_eq!(tree.iter().count(), 0);
}

#[test]
fn given_empty_tree_when_adding_root_then_size_is_one() {
    let mut tree = Tree::new();
    let root = tree.add_root(7).unwrap();
    assert_eq!(tree.size(), 1);
    assert!(!tree.is_empty());
    assert_eq!(tree.root().unwrap(), root);
    assert!(tree.is_root(root).unwrap());
    assert!(tree.is_leaf(root).unwrap());
    assert!(!tree.is_internal(root).unwrap());
}

#[test]
fn given_root_when_adding_second_root_then_fails_and_keeps_tree() {
    let mut tree = Tree::new();
    let root = tree.add_root(1).unwrap();
    assert_eq!(tree.add_root(2), Err(TreeError::RootExists));
    assert_eq!(tree.size(), 1);
    assert_eq!(*tree.get(root).unwrap(), 1);
}

// ============================================================
// Adding children
// ============================================================

#[rstest]
fn given_parent_when_adding_child_then_appends_and_grows_by_one(mut sample: Sample) {
    let e = sample.tree.add("E", sample.a).unwrap();
    assert_eq!(sample.tree.size(), 5);
    assert_eq!(sample.tree.children(sample.a).unwrap(), [sample.b, sample.c, e]);
    assert_eq!(sample.tree.parent(e).unwrap(), sample.a);
}

#[rstest]
#[case(0, ["E", "B", "C"])]
#[case(1, ["B", "E", "C"])]
#[case(2, ["B", "C", "E"])]
fn given_index_when_adding_child_then_splices_at_index(
    mut sample: Sample,
    #[case] index: usize,
    #[case] expected: [&str; 3],
) {
    sample.tree.add_at("E", sample.a, index).unwrap();
    let children = sample.tree.children(sample.a).unwrap();
    assert_eq!(labels(&sample.tree, children.into_iter()), expected);
    assert_eq!(sample.tree.size(), 5);
}

#[rstest]
fn given_index_past_end_when_adding_child_then_fails_unchanged(mut sample: Sample) {
    let err = sample.tree.add_at("E", sample.a, 3).unwrap_err();
    assert_eq!(err, TreeError::IndexOutOfRange { index: 3, len: 2 });
    assert_eq!(sample.tree.size(), 4);
    assert_eq!(sample.tree.children(sample.a).unwrap(), [sample.b, sample.c]);
}

#[rstest]
fn given_leaf_when_adding_at_zero_then_becomes_internal(mut sample: Sample) {
    sample.tree.add_at("E", sample.c, 0).unwrap();
    assert!(sample.tree.is_internal(sample.c).unwrap());
}

// ============================================================
// Queries
// ============================================================

#[rstest]
fn given_sample_when_querying_structure_then_matches(sample: Sample) {
    let tree = &sample.tree;
    assert_eq!(tree.size(), 4);
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.root().unwrap(), sample.a);
    assert_eq!(tree.parent(sample.d).unwrap(), sample.b);
    assert_eq!(tree.parent(sample.a), Err(TreeError::NoParent(sample.a)));
    assert_eq!(tree.children(sample.b).unwrap(), [sample.d]);
    assert!(tree.children(sample.c).unwrap().is_empty());
    assert_eq!(tree.child_count(sample.a).unwrap(), 2);
    assert!(tree.is_internal(sample.b).unwrap());
    assert!(tree.is_leaf(sample.d).unwrap());
    assert!(!tree.is_root(sample.b).unwrap());
    assert_eq!(tree.depth(sample.a).unwrap(), 0);
    assert_eq!(tree.depth(sample.d).unwrap(), 2);
    assert_eq!(tree.height(), 3);
    assert_eq!(labels(tree, tree.leaves()), ["D", "C"]);
}

// ============================================================
// Elements
// ============================================================

#[rstest]
fn given_two_positions_when_swapping_twice_then_restores(mut sample: Sample) {
    sample.tree.swap_elements(sample.b, sample.d).unwrap();
    assert_eq!(*sample.tree.get(sample.b).unwrap(), "D");
    assert_eq!(*sample.tree.get(sample.d).unwrap(), "B");
    // structure is untouched
    assert_eq!(sample.tree.parent(sample.d).unwrap(), sample.b);

    sample.tree.swap_elements(sample.b, sample.d).unwrap();
    assert_eq!(*sample.tree.get(sample.b).unwrap(), "B");
    assert_eq!(*sample.tree.get(sample.d).unwrap(), "D");
}

#[rstest]
fn given_same_position_when_swapping_then_no_op(mut sample: Sample) {
    sample.tree.swap_elements(sample.c, sample.c).unwrap();
    assert_eq!(*sample.tree.get(sample.c).unwrap(), "C");
}

#[rstest]
fn given_position_when_replacing_then_returns_old_element(mut sample: Sample) {
    assert_eq!(sample.tree.replace(sample.c, "X").unwrap(), "C");
    assert_eq!(*sample.tree.get(sample.c).unwrap(), "X");
    assert_eq!(sample.tree.replace(sample.c, "C").unwrap(), "X");
    assert_eq!(*sample.tree.get(sample.c).unwrap(), "C");
}

#[rstest]
fn given_position_when_mutating_through_get_mut_then_updates(mut sample: Sample) {
    *sample.tree.get_mut(sample.a).unwrap() = "Z";
    assert_eq!(*sample.tree.get(sample.a).unwrap(), "Z");
}

// ============================================================
// Removal
// ============================================================

#[rstest]
fn given_inner_node_when_removing_then_drops_whole_subtree(mut sample: Sample) {
    sample.tree.remove(sample.b).unwrap();
    assert_eq!(sample.tree.size(), 2);
    assert_eq!(labels(&sample.tree, sample.tree.iter_breadth_first()), ["A", "C"]);
    assert!(!sample.tree.contains(sample.b));
    assert!(!sample.tree.contains(sample.d));
    assert_eq!(
        sample.tree.get(sample.d),
        Err(TreeError::InvalidPosition(sample.d))
    );
    assert_eq!(
        sample.tree.remove(sample.b),
        Err(TreeError::InvalidPosition(sample.b))
    );
}

#[rstest]
fn given_root_when_removing_then_tree_is_empty(mut sample: Sample) {
    sample.tree.remove(sample.a).unwrap();
    assert!(sample.tree.is_empty());
    assert_eq!(sample.tree.size(), 0);
    assert_eq!(sample.tree.root(), Err(TreeError::EmptyTree));
    assert!(!sample.tree.contains(sample.c));

    // a fresh root can be added again
    let root = sample.tree.add_root("N").unwrap();
    assert_eq!(sample.tree.size(), 1);
    assert_ne!(root, sample.a);
}

#[rstest]
fn given_removed_slot_reused_when_using_stale_position_then_rejected(mut sample: Sample) {
    sample.tree.remove(sample.c).unwrap();
    let e = sample.tree.add("E", sample.a).unwrap();
    assert_ne!(e, sample.c);
    assert_eq!(
        sample.tree.replace(sample.c, "X"),
        Err(TreeError::InvalidPosition(sample.c))
    );
    assert_eq!(*sample.tree.get(e).unwrap(), "E");
}

// ============================================================
// Foreign positions
// ============================================================

#[rstest]
fn given_position_of_other_tree_when_used_then_rejected(mut sample: Sample) {
    let mut other = Tree::new();
    let foreign = other.add_root("F").unwrap();

    assert_eq!(
        sample.tree.add("X", foreign),
        Err(TreeError::InvalidPosition(foreign))
    );
    assert_eq!(
        sample.tree.swap_elements(sample.a, foreign),
        Err(TreeError::InvalidPosition(foreign))
    );
    assert_eq!(
        sample.tree.is_leaf(foreign),
        Err(TreeError::InvalidPosition(foreign))
    );
    assert_eq!(*sample.tree.get(sample.a).unwrap(), "A");
    assert_eq!(sample.tree.size(), 4);
}

// ============================================================
// Subtree extraction and attaching
// ============================================================

#[rstest]
fn given_inner_node_when_extracting_subtree_then_moves_nodes(mut sample: Sample) {
    let extracted = sample.tree.sub_tree(sample.b).unwrap();

    assert_eq!(extracted.size(), 2);
    assert_eq!(labels(&extracted, extracted.iter_preorder()), ["B", "D"]);
    assert_eq!(sample.tree.size(), 2);
    assert_eq!(labels(&sample.tree, sample.tree.iter_preorder()), ["A", "C"]);
    assert!(!sample.tree.contains(sample.b));
    assert!(!sample.tree.contains(sample.d));
    // extracted tree hands out its own positions
    assert!(!extracted.contains(sample.b));
}

#[rstest]
fn given_root_when_extracting_subtree_then_source_is_empty(mut sample: Sample) {
    let extracted = sample.tree.sub_tree(sample.a).unwrap();
    assert!(sample.tree.is_empty());
    assert_eq!(extracted.size(), 4);
    assert_eq!(labels(&extracted, extracted.iter_postorder()), ["D", "B", "C", "A"]);
}

#[rstest]
fn given_invalid_position_when_extracting_then_fails(mut sample: Sample) {
    sample.tree.remove(sample.d).unwrap();
    assert!(matches!(
        sample.tree.sub_tree(sample.d),
        Err(TreeError::InvalidPosition(_))
    ));
    assert_eq!(sample.tree.size(), 3);
}

#[rstest]
fn given_other_tree_when_attaching_then_grafts_as_last_child(mut sample: Sample) {
    let mut other = Tree::new();
    let x = other.add_root("X").unwrap();
    other.add("Y", x).unwrap();
    other.add("Z", x).unwrap();

    let grafted = sample.tree.attach(sample.c, &mut other).unwrap().unwrap();

    assert!(other.is_empty());
    assert!(!other.contains(x));
    assert_eq!(sample.tree.size(), 7);
    assert_eq!(sample.tree.parent(grafted).unwrap(), sample.c);
    assert_eq!(
        labels(&sample.tree, sample.tree.iter_preorder()),
        ["A", "B", "D", "C", "X", "Y", "Z"]
    );
}

#[rstest]
fn given_empty_other_when_attaching_then_nothing_changes(mut sample: Sample) {
    let mut other = Tree::new();
    assert_eq!(sample.tree.attach(sample.a, &mut other), Ok(None));
    assert_eq!(sample.tree.size(), 4);
}

#[rstest]
fn given_invalid_position_when_attaching_then_both_trees_unchanged(mut sample: Sample) {
    sample.tree.remove(sample.d).unwrap();
    let mut other = Tree::new();
    other.add_root("X").unwrap();

    assert_eq!(
        sample.tree.attach(sample.d, &mut other),
        Err(TreeError::InvalidPosition(sample.d))
    );
    assert_eq!(other.size(), 1);
    assert_eq!(sample.tree.size(), 3);
}

#[rstest]
fn given_extracted_subtree_when_reattached_then_orders_restored(mut sample: Sample) {
    // C is the last child of A, so grafting it back restores the shape
    let before = labels(&sample.tree, sample.tree.iter_preorder());
    let mut extracted = sample.tree.sub_tree(sample.c).unwrap();
    sample.tree.attach(sample.a, &mut extracted).unwrap();
    assert_eq!(labels(&sample.tree, sample.tree.iter_preorder()), before);
}

#[test]
fn given_non_clone_elements_when_extracting_then_elements_are_moved() {
    struct Token(u32);

    let mut tree = Tree::new();
    let root = tree.add_root(Token(1)).unwrap();
    let child = tree.add(Token(2), root).unwrap();
    tree.add(Token(3), child).unwrap();

    let extracted = tree.sub_tree(child).unwrap();
    let values: Vec<u32> = extracted
        .iter_preorder()
        .map(|p| extracted.get(p).unwrap().0)
        .collect();
    assert_eq!(values, [2, 3]);
    assert_eq!(tree.size(), 1);
}
