//! Access classification over structurally built files.

use nilmap_analysis::classifier::{AccessClassifier, Classification, ClassifierPolicy, FileAnalysis};
use nilmap_analysis::correlator::{correlate, NodeIndex};
use nilmap_analysis::syntax::{
    AssignForm, MemorySource, MemorySourceBuilder, NodeKind, SyntaxSource, TypeDescriptor as T,
};
use nilmap_analysis::Analyzer;
use nilmap_core::config::AnalysisConfig;
use nilmap_core::errors::AnalysisError;
use nilmap_core::IssueCategory;

fn analyze(source: &MemorySource) -> FileAnalysis {
    Analyzer::default().analyze_file(source)
}

fn categories(analysis: &FileAnalysis) -> Vec<IssueCategory> {
    analysis.diagnostics.iter().map(|d| d.category).collect()
}

fn file(f: impl FnOnce(&mut MemorySourceBuilder)) -> MemorySource {
    let mut b = MemorySourceBuilder::new("test.go");
    f(&mut b);
    b.build()
}

// ---- Reference scenarios ----

#[test]
fn call_on_function_lookup_is_direct_access() {
    // if handlers["ccc"]() { }
    let source = file(|b| {
        b.stmt(|b| {
            b.node(NodeKind::If, T::Unknown, |b| {
                b.call(T::Primitive, |b| {
                    b.lookup("handlers", T::Mapping, T::Function);
                });
                b.node(NodeKind::Block, T::Unknown, |_| {});
            });
        });
    });
    let analysis = analyze(&source);
    assert_eq!(categories(&analysis), vec![IssueCategory::DirectAccess]);
    assert_eq!(analysis.diagnostics[0].line, 1);
    assert_eq!(analysis.diagnostics[0].file, "test.go");
    assert!(analysis.notes.is_empty());
}

#[test]
fn field_read_on_pointer_lookup_is_direct_access() {
    // _ = pointers["bbb"].Field
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Assign, 1, |b| {
                b.blank();
                b.selector(T::Primitive, |b| {
                    b.lookup("pointers", T::Mapping, T::Pointer);
                    b.ident("Field", T::Primitive);
                });
            });
        });
    });
    assert_eq!(categories(&analyze(&source)), vec![IssueCategory::DirectAccess]);
}

#[test]
fn retained_presence_flag_is_safe() {
    // assignment, ok := pointers["bbb"]
    // if ok { assignment.Method() }
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Define, 2, |b| {
                b.ident("assignment", T::Pointer);
                b.ident("ok", T::Primitive);
                b.lookup("pointers", T::Mapping, T::Pointer);
            });
        });
        b.stmt(|b| {
            b.node(NodeKind::If, T::Unknown, |b| {
                b.ident("ok", T::Primitive);
                b.node(NodeKind::Block, T::Unknown, |b| {
                    b.call(T::Unknown, |b| {
                        b.selector(T::Function, |b| {
                            b.ident("assignment", T::Pointer);
                            b.ident("Method", T::Function);
                        });
                    });
                });
            });
        });
    });
    let analysis = analyze(&source);
    assert!(analysis.diagnostics.is_empty());
    assert_eq!(analysis.index_exprs, 1);
}

#[test]
fn discarded_presence_flag_is_reported() {
    // p, _ := pointers["DDD"]
    // p.Method()
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Define, 2, |b| {
                b.ident("p", T::Pointer);
                b.blank();
                b.lookup("pointers", T::Mapping, T::Pointer);
            });
        });
        b.stmt(|b| {
            b.call(T::Unknown, |b| {
                b.selector(T::Function, |b| {
                    b.ident("p", T::Pointer);
                    b.ident("Method", T::Function);
                });
            });
        });
    });
    let analysis = analyze(&source);
    assert_eq!(categories(&analysis), vec![IssueCategory::DiscardedPresenceCheck]);
    assert_eq!(analysis.diagnostics[0].line, 1);
}

#[test]
fn value_typed_lookup_is_never_reported() {
    // s, _ := structs["bbb"]
    // s2 := structs["ccc"]
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Define, 2, |b| {
                b.ident("s", T::Struct);
                b.blank();
                b.lookup("structs", T::Mapping, T::Struct);
            });
        });
        b.stmt(|b| {
            b.assign(AssignForm::Define, 1, |b| {
                b.ident("s2", T::Struct);
                b.lookup("structs", T::Mapping, T::Struct);
            });
        });
    });
    assert!(analyze(&source).diagnostics.is_empty());
}

#[test]
fn lookup_inside_literal_is_direct_but_sequence_index_is_not() {
    // list := []*T{pointers["aaa"]}
    // list[0].Method()
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Define, 1, |b| {
                b.ident("list", T::Sequence);
                b.node(NodeKind::CompositeLit, T::Sequence, |b| {
                    b.leaf(NodeKind::Other { kind: "array_type".into() }, T::Unknown);
                    b.lookup("pointers", T::Mapping, T::Pointer);
                });
            });
        });
        b.stmt(|b| {
            b.call(T::Unknown, |b| {
                b.selector(T::Function, |b| {
                    b.index(T::Pointer, |b| {
                        b.ident("list", T::Sequence);
                        b.literal(T::Primitive);
                    });
                    b.ident("Method", T::Function);
                });
            });
        });
    });
    let analysis = analyze(&source);
    assert_eq!(categories(&analysis), vec![IssueCategory::DirectAccess]);
    assert_eq!(analysis.diagnostics[0].line, 1);
    assert_eq!(analysis.index_exprs, 2);
}

// ---- Single-target reads ----

fn single_target_read() -> MemorySource {
    // v := pointers["x"]
    file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Define, 1, |b| {
                b.ident("v", T::Pointer);
                b.lookup("pointers", T::Mapping, T::Pointer);
            });
        });
    })
}

#[test]
fn single_target_read_is_ambiguous() {
    assert_eq!(
        categories(&analyze(&single_target_read())),
        vec![IssueCategory::AmbiguousSingleTargetRead]
    );
}

#[test]
fn single_target_reads_can_be_switched_off() {
    let config = AnalysisConfig {
        flag_single_target_reads: Some(false),
        ..Default::default()
    };
    let analysis = Analyzer::new(&config).analyze_file(&single_target_read());
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn switched_off_category_is_still_classified() {
    let source = single_target_read();
    let tree = correlate(source.path(), source.traversal());
    let mut policy = ClassifierPolicy::all();
    policy.flag_single_target_reads = false;
    let classifier = AccessClassifier::new(policy);
    let (index, _) = tree
        .iter()
        .find(|(_, n)| n.kind.is_index_expr())
        .expect("lookup present");
    assert_eq!(
        classifier.classify(&tree, &source, index),
        Ok(Classification::Finding(IssueCategory::AmbiguousSingleTargetRead))
    );
}

#[test]
fn typed_var_declaration_skips_type_annotation() {
    // var v *T = pointers["x"]
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::VarDecl, 1, |b| {
                b.ident("v", T::Pointer);
                b.node(NodeKind::TypeExpr, T::Unknown, |b| {
                    b.ident("T", T::Unknown);
                });
                b.lookup("pointers", T::Mapping, T::Pointer);
            });
        });
    });
    assert_eq!(
        categories(&analyze(&source)),
        vec![IssueCategory::AmbiguousSingleTargetRead]
    );
}

#[test]
fn blank_and_write_through_targets_are_safe() {
    // _ = pointers["x"]
    // obj.field = pointers["y"]
    // other["k"] = pointers["z"]
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Assign, 1, |b| {
                b.blank();
                b.lookup("pointers", T::Mapping, T::Pointer);
            });
        });
        b.stmt(|b| {
            b.assign(AssignForm::Assign, 1, |b| {
                b.selector(T::Pointer, |b| {
                    b.ident("obj", T::Struct);
                    b.ident("field", T::Pointer);
                });
                b.lookup("pointers", T::Mapping, T::Pointer);
            });
        });
        b.stmt(|b| {
            b.assign(AssignForm::Assign, 1, |b| {
                b.lookup("other", T::Mapping, T::Pointer);
                b.lookup("pointers", T::Mapping, T::Pointer);
            });
        });
    });
    let analysis = analyze(&source);
    assert!(analysis.diagnostics.is_empty(), "{:?}", analysis.diagnostics);
    assert_eq!(analysis.index_exprs, 4);
}

#[test]
fn map_write_target_is_safe() {
    // pointers["x"] = p
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Assign, 1, |b| {
                b.lookup("pointers", T::Mapping, T::Pointer);
                b.ident("p", T::Pointer);
            });
        });
    });
    assert!(analyze(&source).diagnostics.is_empty());
}

#[test]
fn parallel_assignment_with_blank_second_target_discards_the_flag() {
    // a, _ = pointers["x"], pointers["y"]
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Assign, 2, |b| {
                b.ident("a", T::Pointer);
                b.blank();
                b.lookup("pointers", T::Mapping, T::Pointer);
                b.lookup("pointers", T::Mapping, T::Pointer);
            });
        });
    });
    assert_eq!(
        categories(&analyze(&source)),
        vec![
            IssueCategory::DiscardedPresenceCheck,
            IssueCategory::DiscardedPresenceCheck
        ]
    );
}

#[test]
fn parallel_assignment_with_named_targets_is_safe() {
    // a, b = pointers["x"], pointers["y"]
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Assign, 2, |b| {
                b.ident("a", T::Pointer);
                b.ident("b", T::Pointer);
                b.lookup("pointers", T::Mapping, T::Pointer);
                b.lookup("pointers", T::Mapping, T::Pointer);
            });
        });
    });
    let analysis = analyze(&source);
    assert!(analysis.diagnostics.is_empty(), "{:?}", analysis.diagnostics);
    assert!(analysis.notes.is_empty());
    assert_eq!(analysis.index_exprs, 2);
}

// ---- Nesting and container shapes ----

#[test]
fn nested_reads_are_judged_independently() {
    // funcs[keys["a"].Name]()
    let source = file(|b| {
        b.stmt(|b| {
            b.call(T::Unknown, |b| {
                b.index(T::Function, |b| {
                    b.ident("funcs", T::Mapping);
                    b.selector(T::Primitive, |b| {
                        b.lookup("keys", T::Mapping, T::Pointer);
                        b.ident("Name", T::Primitive);
                    });
                });
            });
        });
    });
    let analysis = analyze(&source);
    assert_eq!(
        categories(&analysis),
        vec![IssueCategory::DirectAccess, IssueCategory::DirectAccess]
    );
    // Outer expression first: pre-order.
    assert!(analysis.diagnostics[0].span.contains(&analysis.diagnostics[1].span));
}

#[test]
fn map_of_maps_reports_only_the_nilable_step() {
    // nested["a"]["b"]()
    let source = file(|b| {
        b.stmt(|b| {
            b.call(T::Unknown, |b| {
                b.index(T::Function, |b| {
                    b.lookup("nested", T::Mapping, T::Mapping);
                    b.literal(T::Primitive);
                });
            });
        });
    });
    assert_eq!(categories(&analyze(&source)), vec![IssueCategory::DirectAccess]);
}

#[test]
fn field_and_method_containers_are_checked() {
    // s.handlers["x"]()
    // s.Handlers()["y"]()
    let source = file(|b| {
        b.stmt(|b| {
            b.call(T::Unknown, |b| {
                b.index(T::Function, |b| {
                    b.selector(T::Mapping, |b| {
                        b.ident("s", T::Struct);
                        b.ident("handlers", T::Mapping);
                    });
                    b.literal(T::Primitive);
                });
            });
        });
        b.stmt(|b| {
            b.call(T::Unknown, |b| {
                b.index(T::Function, |b| {
                    b.call(T::Mapping, |b| {
                        b.selector(T::Function, |b| {
                            b.ident("s", T::Struct);
                            b.ident("Handlers", T::Function);
                        });
                    });
                    b.literal(T::Primitive);
                });
            });
        });
    });
    let analysis = analyze(&source);
    assert_eq!(analysis.diagnostics.len(), 2);
    assert_eq!(analysis.diagnostics[0].line, 1);
    assert_eq!(analysis.diagnostics[1].line, 2);
}

#[test]
fn sequence_of_functions_is_out_of_scope() {
    // fns[0]()
    let source = file(|b| {
        b.stmt(|b| {
            b.call(T::Unknown, |b| {
                b.lookup("fns", T::Sequence, T::Function);
            });
        });
    });
    assert!(analyze(&source).diagnostics.is_empty());
}

#[test]
fn unknown_types_never_produce_findings() {
    let source = file(|b| {
        b.stmt(|b| {
            b.call(T::Unknown, |b| {
                b.lookup("mystery", T::Unknown, T::Function);
            });
        });
        b.stmt(|b| {
            b.call(T::Unknown, |b| {
                b.lookup("handlers", T::Mapping, T::Unknown);
            });
        });
    });
    assert!(analyze(&source).diagnostics.is_empty());
}

#[test]
fn lookup_under_paren_is_direct_access() {
    // v := (pointers["x"])
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Define, 1, |b| {
                b.ident("v", T::Pointer);
                b.node(NodeKind::Paren, T::Pointer, |b| {
                    b.lookup("pointers", T::Mapping, T::Pointer);
                });
            });
        });
    });
    assert_eq!(categories(&analyze(&source)), vec![IssueCategory::DirectAccess]);
}

// ---- Structural inconsistencies ----

#[test]
fn index_without_container_becomes_a_note() {
    let source = file(|b| {
        b.stmt(|b| {
            b.call(T::Unknown, |b| {
                b.leaf(NodeKind::IndexExpr, T::Function);
            });
        });
        b.stmt(|b| {
            b.call(T::Unknown, |b| {
                b.lookup("handlers", T::Mapping, T::Function);
            });
        });
    });
    let analysis = analyze(&source);
    assert_eq!(analysis.notes.len(), 1);
    assert!(matches!(
        analysis.notes[0],
        AnalysisError::MissingIndexedEntity { .. }
    ));
    assert_eq!(categories(&analysis), vec![IssueCategory::DirectAccess]);
    assert_eq!(analysis.diagnostics[0].line, 2);
}

#[test]
fn assignment_with_too_few_targets_becomes_a_note() {
    // Two values, one declared target: the second value has nothing to bind to.
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Assign, 1, |b| {
                b.ident("a", T::Pointer);
                b.lookup("pointers", T::Mapping, T::Pointer);
                b.lookup("pointers", T::Mapping, T::Pointer);
            });
        });
    });
    let analysis = analyze(&source);
    assert_eq!(
        categories(&analysis),
        vec![IssueCategory::AmbiguousSingleTargetRead]
    );
    assert!(matches!(
        analysis.notes.as_slice(),
        [AnalysisError::MalformedAssignment { targets: 1, children: 3, .. }]
    ));
}

#[test]
fn non_index_nodes_are_irrelevant() {
    let source = single_target_read();
    let tree = correlate(source.path(), source.traversal());
    let classifier = AccessClassifier::default();
    assert_eq!(
        classifier.classify(&tree, &source, NodeIndex(0)),
        Ok(Classification::Irrelevant)
    );
    assert_eq!(
        classifier.classify(&tree, &source, NodeIndex(999)),
        Ok(Classification::Irrelevant)
    );
}

#[test]
fn category_filter_drops_other_findings() {
    let source = file(|b| {
        b.stmt(|b| {
            b.assign(AssignForm::Define, 2, |b| {
                b.ident("p", T::Pointer);
                b.blank();
                b.lookup("pointers", T::Mapping, T::Pointer);
            });
        });
        b.stmt(|b| {
            b.call(T::Unknown, |b| {
                b.lookup("handlers", T::Mapping, T::Function);
            });
        });
    });
    let analyzer =
        Analyzer::default().with_policy(ClassifierPolicy::only([IssueCategory::DirectAccess]));
    let analysis = analyzer.analyze_file(&source);
    assert_eq!(categories(&analysis), vec![IssueCategory::DirectAccess]);
}
