use dossier_nav::model::{Descriptor, NavTree, NodeIndex, compare_keys};
use std::cmp::Ordering;

/// Nested `(key, href)` snapshot of the tree below `index`.
#[derive(Debug, PartialEq)]
struct Shape {
    key: String,
    href: Option<String>,
    children: Vec<Shape>,
}

fn shape(tree: &NavTree<'_>, index: NodeIndex) -> Vec<Shape> {
    tree[index]
        .children()
        .unwrap_or_default()
        .iter()
        .map(|&c| Shape {
            key: tree[c].key().to_string(),
            href: tree[c].value().map(|v| v.href.clone()),
            children: shape(tree, c),
        })
        .collect()
}

fn assert_sorted(tree: &NavTree<'_>) {
    for (index, _) in tree.pre_order_iter() {
        let keys = tree.child_keys(index);
        for pair in keys.windows(2) {
            assert_eq!(compare_keys(pair[0], pair[1]), Ordering::Less);
        }
    }
}

fn assert_normalized(tree: &NavTree<'_>) {
    for (index, node) in tree.pre_order_iter() {
        if index == tree.root_index() {
            continue;
        }
        if node.is_leaf() {
            assert!(node.has_value(), "leaf '{}' without value", node.key());
        }
        if let Some(value) = node.value() {
            if node.child_count() > 0 {
                assert!(value.namespace || value.has_types(), "'{}'", node.key());
            }
        }
    }
}

// --- BASIC SHAPES ---
#[test]
fn test_namespace_wrappers_merge() {
    let descriptors = vec![
        Descriptor::new("a.b.C", "a.b.C.html"),
        Descriptor::new("a.b.D", "a.b.D.html"),
    ];
    let tree = NavTree::build(&descriptors, false);

    assert_eq!(tree.top_level_keys(), vec!["a.b"]);
    let ab = tree.find_child(tree.root_index(), "a.b").unwrap();
    assert!(!tree[ab].has_value());
    assert_eq!(tree.child_keys(ab), vec!["C", "D"]);

    let c = tree.find_child(ab, "C").unwrap();
    let d = tree.find_child(ab, "D").unwrap();
    assert_eq!(tree[c].value(), Some(&descriptors[0]));
    assert_eq!(tree[d].value(), Some(&descriptors[1]));
    assert!(tree.is_valid());
}

#[test]
fn test_plain_entity_hands_up_children() {
    let descriptors = vec![
        Descriptor::new("x", "x.html"),
        Descriptor::new("x.Y", "x.Y.html"),
    ];
    let tree = NavTree::build(&descriptors, false);

    assert_eq!(tree.top_level_keys(), vec!["x", "x.Y"]);
    let x = tree.find_child(tree.root_index(), "x").unwrap();
    assert!(tree[x].children().is_none());
    assert_eq!(tree[x].value(), Some(&descriptors[0]));

    let xy = tree.find_child(tree.root_index(), "x.Y").unwrap();
    assert_eq!(tree[xy].value(), Some(&descriptors[1]));
    assert!(tree.is_valid());
}

#[test]
fn test_module_with_nested_types() {
    let modules = vec![Descriptor::new_module(
        "fs",
        "module/fs.html",
        vec![Descriptor::new("Stats", "fs.Stats.html")],
    )];
    let tree = NavTree::build(&modules, true);

    assert_eq!(tree.top_level_keys(), vec!["fs"]);
    let fs = tree.find_child(tree.root_index(), "fs").unwrap();
    assert_eq!(tree[fs].value(), Some(&modules[0]));
    assert_eq!(tree.child_keys(fs), vec!["Stats"]);

    let stats = tree.find_child(fs, "Stats").unwrap();
    assert_eq!(tree[stats].value().unwrap().href, "fs.Stats.html");
}

// --- BUILDING ---
#[test]
fn test_namespace_keeps_children() {
    let descriptors = vec![
        Descriptor::new("goog", "goog.html").as_namespace(),
        Descriptor::new("goog.Uri", "goog.Uri.html"),
        Descriptor::new("goog.array", "goog.array.html").as_namespace(),
        Descriptor::new("goog.array.ArrayLike", "goog.array.ArrayLike.html"),
    ];
    let tree = NavTree::build(&descriptors, false);

    assert_eq!(tree.top_level_keys(), vec!["goog"]);
    let goog = tree.find_path(&["goog"]).unwrap();
    assert_eq!(tree.child_keys(goog), vec!["Uri", "array"]);
    assert!(tree.find_path(&["goog", "array", "ArrayLike"]).is_some());
    assert_normalized(&tree);
}

#[test]
fn test_module_types_qualified_with_module_name() {
    let modules = vec![Descriptor::new_module(
        "events",
        "module/events.html",
        vec![
            Descriptor::new("events.EventEmitter", "events.EventEmitter.html"),
            Descriptor::new("events.EventEmitter.Listener", "events.Listener.html"),
        ],
    )];
    let tree = NavTree::build(&modules, true);

    let events = tree.find_path(&["events"]).unwrap();
    assert_eq!(
        tree.child_keys(events),
        vec!["EventEmitter", "EventEmitter.Listener"]
    );
}

#[test]
fn test_module_without_types_is_leaf() {
    let modules = vec![Descriptor {
        name: "path".to_string(),
        href: "module/path.html".to_string(),
        module: true,
        ..Default::default()
    }];
    let tree = NavTree::build(&modules, true);
    let path = tree.find_path(&["path"]).unwrap();
    assert!(tree[path].children().is_none());
    assert!(tree.is_valid());
}

#[test]
fn test_module_with_empty_types_keeps_entry() {
    let modules = vec![Descriptor::new_module("os", "module/os.html", vec![])];
    let tree = NavTree::build(&modules, true);
    assert_eq!(tree.top_level_keys(), vec!["os"]);
}

#[test]
fn test_modules_are_sorted() {
    let modules = vec![
        Descriptor::new_module("zlib", "zlib.html", vec![]),
        Descriptor::new_module("assert", "assert.html", vec![]),
        Descriptor::new_module("Buffer", "Buffer.html", vec![]),
    ];
    let tree = NavTree::build(&modules, true);
    assert_eq!(tree.top_level_keys(), vec!["Buffer", "assert", "zlib"]);
}

#[test]
#[should_panic]
fn test_duplicate_qualified_name_panics() {
    let descriptors = vec![
        Descriptor::new("a.B", "a.B.html"),
        Descriptor::new("a.B", "other.html"),
    ];
    NavTree::build(&descriptors, false); // Should panic
}

#[test]
#[should_panic(expected = "has no qualified name")]
fn test_empty_qualified_name_panics() {
    let descriptors = vec![Descriptor {
        name: "goog.Uri".to_string(),
        href: "goog.Uri.html".to_string(),
        ..Default::default()
    }];
    NavTree::build(&descriptors, false); // Should panic
}

#[test]
#[should_panic(expected = "Two modules share the name 'fs'")]
fn test_duplicate_module_name_panics() {
    let modules = vec![
        Descriptor::new_module("fs", "module/fs.html", vec![]),
        Descriptor::new_module("fs", "module/fs2.html", vec![]),
    ];
    NavTree::build(&modules, true); // Should panic
}

#[test]
fn test_empty_input() {
    let tree = NavTree::build(&[], false);
    assert!(tree.top_level_keys().is_empty());
    assert_eq!(tree.num_nodes(), 1);
}

#[test]
fn test_every_descriptor_keeps_a_node() {
    let descriptors = vec![
        Descriptor::new("a.b.C", "a.b.C.html"),
        Descriptor::new("a.b.D", "a.b.D.html"),
        Descriptor::new("x", "x.html"),
        Descriptor::new("x.Y", "x.Y.html"),
        Descriptor::new("goog", "goog.html").as_namespace(),
        Descriptor::new("goog.dom.TagName", "goog.dom.TagName.html"),
    ];
    let tree = NavTree::build(&descriptors, false);

    assert_eq!(tree.num_values(), descriptors.len());
    // Root, a.b, C, D, x, x.Y, goog, dom.TagName
    assert_eq!(tree.num_nodes(), 8);
}

#[test]
fn test_input_not_mutated() {
    let descriptors = vec![
        Descriptor::new("a.b.C", "a.b.C.html"),
        Descriptor::new("x", "x.html"),
        Descriptor::new("x.Y", "x.Y.html"),
    ];
    let copy = descriptors.clone();
    let _ = NavTree::build(&descriptors, false);
    assert_eq!(descriptors, copy);
}

// --- COLLAPSING ---
#[test]
fn test_long_wrapper_chain() {
    let descriptors = vec![Descriptor::new("a.b.c.d.E", "E.html")];
    let tree = NavTree::build(&descriptors, false);
    assert_eq!(tree.top_level_keys(), vec!["a.b.c.d.E"]);
    assert_eq!(tree.num_nodes(), 2);
}

#[test]
fn test_wrapper_with_two_branches_stays() {
    let descriptors = vec![
        Descriptor::new("a.b.C", "C.html"),
        Descriptor::new("a.d.E", "E.html"),
    ];
    let tree = NavTree::build(&descriptors, false);

    assert_eq!(tree.top_level_keys(), vec!["a"]);
    let a = tree.find_path(&["a"]).unwrap();
    assert_eq!(tree.child_keys(a), vec!["b.C", "d.E"]);
}

#[test]
fn test_plain_entity_with_nested_namespace() {
    let descriptors = vec![
        Descriptor::new("x", "x.html"),
        Descriptor::new("x.y.Z", "x.y.Z.html"),
        Descriptor::new("x.W", "x.W.html"),
    ];
    let tree = NavTree::build(&descriptors, false);

    assert_eq!(tree.top_level_keys(), vec!["x", "x.W", "x.y.Z"]);
    assert_normalized(&tree);
    assert!(tree.is_valid());
}

#[test]
fn test_collapse_is_idempotent() {
    let descriptors = vec![
        Descriptor::new("a.b.C", "a.b.C.html"),
        Descriptor::new("a.b.D", "a.b.D.html"),
        Descriptor::new("x", "x.html"),
        Descriptor::new("x.Y", "x.Y.html"),
        Descriptor::new("x.y.z.W", "x.y.z.W.html"),
        Descriptor::new("p.q", "p.q.html"),
        Descriptor::new("p.q.r.S", "p.q.r.S.html"),
        Descriptor::new("p.q.r.T", "p.q.r.T.html"),
        Descriptor::new("n", "n.html").as_namespace(),
        Descriptor::new("n.m.o.P", "n.m.o.P.html"),
    ];
    let mut tree = NavTree::build(&descriptors, false);
    let once = shape(&tree, tree.root_index());

    let root = tree.root_index();
    tree.collapse_nodes(root);
    tree.sort_tree(root);
    let twice = shape(&tree, root);

    assert_eq!(once, twice);
    assert_normalized(&tree);
    assert!(tree.is_valid());
}

#[test]
fn test_independent_of_input_order() {
    let descriptors = vec![
        Descriptor::new("a.b.C", "a.b.C.html"),
        Descriptor::new("a.b.D", "a.b.D.html"),
        Descriptor::new("x", "x.html"),
        Descriptor::new("x.Y", "x.Y.html"),
        Descriptor::new("goog", "goog.html").as_namespace(),
        Descriptor::new("goog.dom.TagName", "goog.dom.TagName.html"),
    ];
    let mut reversed = descriptors.clone();
    reversed.reverse();

    let forward = NavTree::build(&descriptors, false);
    let backward = NavTree::build(&reversed, false);
    assert_eq!(
        shape(&forward, forward.root_index()),
        shape(&backward, backward.root_index())
    );
}

#[test]
#[should_panic]
fn test_collapse_rejects_valueless_leaf() {
    let mut tree = NavTree::new();
    let root = tree.root_index();
    let a = tree.add_node("a", None);
    tree.add_child(root, a);
    tree.collapse_nodes(root); // Should panic
}

// --- SORTING ---
#[test]
fn test_sort_is_stable_on_sorted_tree() {
    let descriptors = vec![
        Descriptor::new("b.Z", "b.Z.html"),
        Descriptor::new("b.A", "b.A.html"),
        Descriptor::new("a", "a.html"),
        Descriptor::new("B", "B.html"),
    ];
    let mut tree = NavTree::build(&descriptors, false);
    assert_sorted(&tree);
    assert_eq!(tree.top_level_keys(), vec!["B", "a", "b"]);

    let before = shape(&tree, tree.root_index());
    let root = tree.root_index();
    tree.sort_tree(root);
    assert_eq!(before, shape(&tree, root));
}

#[test]
fn test_dotted_keys_sort_after_prefix() {
    let descriptors = vec![
        Descriptor::new("x.Y", "x.Y.html"),
        Descriptor::new("x", "x.html"),
        Descriptor::new("xa", "xa.html"),
    ];
    let tree = NavTree::build(&descriptors, false);
    assert_eq!(tree.top_level_keys(), vec!["x", "x.Y", "xa"]);
}
