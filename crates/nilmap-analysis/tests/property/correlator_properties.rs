use nilmap_analysis::correlator::{correlate, NodeIndex, SyntaxTree};
use nilmap_analysis::syntax::{
    MemorySource, MemorySourceBuilder, NodeKind, SyntaxSource, TraversalShape, TypeDescriptor,
};
use nilmap_analysis::Analyzer;
use nilmap_core::IssueCategory;
use proptest::prelude::*;

/// Tree shape: a node and its children. Childless nodes become literals.
#[derive(Debug, Clone)]
struct Shape(Vec<Shape>);

fn shape() -> impl Strategy<Value = Shape> {
    Just(Shape(Vec::new())).prop_recursive(5, 96, 5, |inner| {
        prop::collection::vec(inner, 0..5).prop_map(Shape)
    })
}

fn emit(b: &mut MemorySourceBuilder, shape: &Shape) {
    if shape.0.is_empty() {
        b.literal(TypeDescriptor::Primitive);
    } else {
        b.node(NodeKind::Call, TypeDescriptor::Unknown, |b| {
            for child in &shape.0 {
                emit(b, child);
            }
        });
    }
}

fn build(statements: &[Shape]) -> MemorySource {
    let mut b = MemorySourceBuilder::new("prop.go");
    for statement in statements {
        b.stmt(|b| emit(b, statement));
    }
    b.build()
}

fn parents(tree: &SyntaxTree) -> Vec<Option<NodeIndex>> {
    tree.iter().map(|(_, n)| n.parent).collect()
}

fn tree_with(source: MemorySource, shape: TraversalShape) -> SyntaxTree {
    let source = source.with_shape(shape);
    correlate(source.path(), source.traversal())
}

proptest! {
    #[test]
    fn parent_span_contains_child(statements in prop::collection::vec(shape(), 0..6)) {
        let tree = tree_with(build(&statements), TraversalShape::Preorder);
        for (index, node) in tree.iter() {
            if let Some(parent) = node.parent {
                prop_assert!(parent < index);
                prop_assert!(tree.node(parent).span.contains(&node.span));
            }
        }
    }

    #[test]
    fn no_tighter_container_between_parent_and_child(
        statements in prop::collection::vec(shape(), 0..6)
    ) {
        let tree = tree_with(build(&statements), TraversalShape::Preorder);
        for (index, node) in tree.iter() {
            let Some(parent) = node.parent else { continue };
            for between in (parent.0 + 1)..index.0 {
                prop_assert!(
                    !tree.node(NodeIndex(between)).span.contains(&node.span),
                    "node {} contains {} but parent is {}",
                    between, index.0, parent.0
                );
            }
        }
    }

    #[test]
    fn only_the_file_node_is_a_root(statements in prop::collection::vec(shape(), 0..6)) {
        let source = build(&statements);
        let expected = source.nodes().len();
        let tree = tree_with(source, TraversalShape::Preorder);
        prop_assert_eq!(tree.len(), expected);
        prop_assert_eq!(tree.roots(), &[NodeIndex(0)]);
    }

    #[test]
    fn stack_and_scan_agree(statements in prop::collection::vec(shape(), 0..6)) {
        let source = build(&statements);
        let scanned = tree_with(source.clone(), TraversalShape::Preorder);
        let stacked = tree_with(source, TraversalShape::Events);
        prop_assert_eq!(parents(&scanned), parents(&stacked));
        for (index, node) in scanned.iter() {
            prop_assert_eq!(node.children.as_slice(), stacked.children(index));
        }
    }

    #[test]
    fn correlation_is_idempotent(statements in prop::collection::vec(shape(), 0..6)) {
        let source = build(&statements);
        let first = correlate(source.path(), source.traversal());
        let second = correlate(source.path(), source.traversal());
        prop_assert_eq!(parents(&first), parents(&second));
    }

    #[test]
    fn wrapped_function_lookup_is_one_direct_access(wrappers in 1usize..6) {
        // handlers["k"] under `wrappers` nested calls
        fn wrap(b: &mut MemorySourceBuilder, depth: usize) {
            if depth == 0 {
                b.lookup("handlers", TypeDescriptor::Mapping, TypeDescriptor::Function);
            } else {
                b.call(TypeDescriptor::Unknown, |b| wrap(b, depth - 1));
            }
        }
        let mut b = MemorySourceBuilder::new("wrap.go");
        b.stmt(|b| wrap(b, wrappers));
        let analysis = Analyzer::default().analyze_file(&b.build());
        let categories: Vec<IssueCategory> =
            analysis.diagnostics.iter().map(|d| d.category).collect();
        prop_assert_eq!(categories, vec![IssueCategory::DirectAccess]);
    }
}
