#[cfg(test)]
mod tests {
    use crate::rules::SymbolKind;
    use crate::symbol::SymbolTree;
    use crate::text::Span;

    fn kinds(tree: &SymbolTree) -> Vec<SymbolKind> {
        tree.iter().map(|s| s.kind).collect()
    }

    fn names(tree: &SymbolTree) -> Vec<&str> {
        tree.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_structure_with_fields() {
        let text = "Structure P\n  x.l\nEndStructure";
        let tree = SymbolTree::build(text);
        assert_eq!(tree.root_ids().len(), 1);

        let root = tree.roots().next().unwrap();
        assert_eq!(root.kind, SymbolKind::Structure);
        assert_eq!(root.name, "P");
        assert_eq!(root.span, Span::new(0, text.len()));
        assert_eq!(root.name_span, Span::new(10, 11));
        assert_eq!(root.selection_span, Span::new(0, 11));
        assert!(root.closed);
        assert!(root.is_root);

        let fields: Vec<_> = tree.children(tree.root_ids()[0]).collect();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].kind, SymbolKind::Field);
        assert_eq!(fields[0].name, "x");
        assert_eq!(fields[0].name_span, Span::new(14, 15));
        assert!(!fields[0].is_root);
        let field = tree[tree.root_ids()[0]].children[0];
        assert_eq!(tree.parent(field).unwrap().name, "P");
    }

    #[test]
    fn test_fields_after_statement_separators() {
        let tree = SymbolTree::build("Structure Node : *next.Node : value.s : EndStructure");
        assert_eq!(names(&tree), vec!["Node", "*next", "value"]);
        assert!(tree.roots().next().unwrap().closed);
    }

    #[test]
    fn test_opening_keyword_without_name_is_discarded() {
        assert!(SymbolTree::build("Procedure").is_empty());

        let tree = SymbolTree::build("Procedure\nEndProcedure\nMacro M\nEndMacro");
        assert_eq!(kinds(&tree), vec![SymbolKind::Macro]);
        assert!(tree[tree.root_ids()[0]].closed);
    }

    #[test]
    fn test_unclosed_block_ends_at_document_end() {
        let text = "Module M\n  Procedure.i Sum(a, b)\n    ProcedureReturn a + b\n";
        let tree = SymbolTree::build(text);
        assert_eq!(names(&tree), vec!["M", "Sum"]);
        for symbol in &tree {
            assert!(!symbol.closed);
            assert_eq!(symbol.span.end, text.len());
        }
        let sum = tree.iter().nth(1).unwrap();
        assert_eq!(sum.detail.as_deref(), Some(".i"));
        assert_eq!(sum.span.start, 11);
    }

    #[test]
    fn test_closing_ancestor_closes_open_descendants() {
        let text = "Module M\nProcedure P()\nx = 1\nEndModule\n#AFTER = 1";
        let tree = SymbolTree::build(text);
        assert_eq!(kinds(&tree), vec![SymbolKind::Module, SymbolKind::Procedure, SymbolKind::Constant]);

        let module = &tree.iter().next().unwrap();
        let procedure = &tree.iter().nth(1).unwrap();
        assert_eq!(module.span.end, 38);
        assert_eq!(procedure.span.end, module.span.end);
        assert!(module.closed);
        assert!(!procedure.closed);

        // the stack is empty again, so the constant is a root
        let constant = tree.iter().nth(2).unwrap();
        assert!(constant.is_root);
        assert_eq!(tree.root_ids().len(), 2);
    }

    #[test]
    fn test_closer_matches_innermost_block_of_its_kind() {
        let text = "Module A\nModule B\nEndModule\nEndModule";
        let tree = SymbolTree::build(text);
        let a = &tree[tree.root_ids()[0]];
        let b = tree.children(tree.root_ids()[0]).next().unwrap();
        assert_eq!(b.name, "B");
        assert_eq!(b.span.end, 27);
        assert_eq!(a.span.end, text.len());
        assert!(a.closed && b.closed);
    }

    #[test]
    fn test_enum_members_need_an_enumeration() {
        let text = "#A = 1\nEnumeration Colors\n  #Red\n  #Green = 5\nEndEnumeration\n#B";
        let tree = SymbolTree::build(text);
        assert_eq!(
            kinds(&tree),
            vec![
                SymbolKind::Constant,
                SymbolKind::Enumeration,
                SymbolKind::EnumMember,
                SymbolKind::EnumMember,
                SymbolKind::Constant,
            ]
        );
        let roots: Vec<_> = tree.roots().map(|s| s.name.as_str()).collect();
        assert_eq!(roots, vec!["#A", "Colors", "#B"]);
        let members: Vec<_> = tree.children(tree.root_ids()[1]).map(|s| s.name.as_str()).collect();
        assert_eq!(members, vec!["#Red", "#Green"]);
    }

    #[test]
    fn test_balanced_blocks_end_after_their_closer() {
        let block = "Procedure A()\nEndProcedure\n";
        let text = block.repeat(3);
        let tree = SymbolTree::build(&text);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root_ids().len(), 3);
        for (i, symbol) in tree.iter().enumerate() {
            let start = i * block.len();
            assert_eq!(symbol.span, Span::new(start, start + block.len() - 1));
            assert!(symbol.closed);
            assert!(symbol.children.is_empty());
        }
    }

    #[test]
    fn test_literals_do_not_close_blocks() {
        let text = "procedure Foo()\n  s$ = \"EndProcedure\" ; EndProcedure\nendprocedure";
        let tree = SymbolTree::build(text);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[tree.root_ids()[0]].span.end, text.len());
    }

    #[test]
    fn test_import_path_is_the_name() {
        let tree = SymbolTree::build("ImportC \"user32.lib\"\n  MessageBox(a, b)\nEndImport");
        let import = tree.roots().next().unwrap();
        assert_eq!(import.kind, SymbolKind::Import);
        assert_eq!(import.name, "\"user32.lib\"");
        assert!(import.children.is_empty());
    }

    #[test]
    fn test_unmatched_closer_is_ignored() {
        let tree = SymbolTree::build("EndStructure\nStructure S\nEndStructure");
        assert_eq!(tree.len(), 1);
        assert!(tree[tree.root_ids()[0]].closed);
    }

    #[test]
    fn test_ancestor_closer_inside_structure() {
        let text = "Module M\nStructure S\n  x.l\nEndModule\n#AFTER = 1";
        let tree = SymbolTree::build(text);
        assert_eq!(
            kinds(&tree),
            vec![SymbolKind::Module, SymbolKind::Structure, SymbolKind::Field, SymbolKind::Constant]
        );
        assert!(!names(&tree).contains(&"EndModule"));

        let module = tree.roots().next().unwrap();
        assert!(module.closed);
        assert_eq!(module.span, Span::new(0, 36));

        let structure = tree.iter().find(|s| s.kind == SymbolKind::Structure).unwrap();
        assert!(!structure.closed);
        assert_eq!(structure.span.end, 36);

        let after = tree.iter().find(|s| s.name == "#AFTER").unwrap();
        assert!(after.is_root);
    }

    #[test]
    fn test_compiler_directives_are_not_fields() {
        let text = "Structure S\nCompilerIf #X\n  a.l\nCompilerEndIf\nEndStructure";
        let tree = SymbolTree::build(text);
        assert_eq!(kinds(&tree), vec![SymbolKind::Structure, SymbolKind::Field]);
        assert_eq!(names(&tree), vec!["S", "a"]);
        assert!(tree[tree.root_ids()[0]].closed);
    }
}
