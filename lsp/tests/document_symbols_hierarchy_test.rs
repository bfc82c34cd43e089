use pbls_lsp::analyzer::PbAnalyzer;
use tower_lsp::lsp_types::{DocumentSymbol, Position, Range, SymbolKind};

fn get_symbol<'a>(symbols: &'a [DocumentSymbol], name: &str) -> Option<&'a DocumentSymbol> {
    symbols.iter().find(|s| s.name == name)
}

fn get_child<'a>(parent: &'a DocumentSymbol, name: &str) -> Option<&'a DocumentSymbol> {
    parent
        .children
        .as_ref()
        .and_then(|kids| kids.iter().find(|s| s.name == name))
}

fn list_child_names(parent: &DocumentSymbol) -> Vec<String> {
    parent
        .children
        .as_ref()
        .map(|kids| kids.iter().map(|s| s.name.clone()).collect())
        .unwrap_or_default()
}

const SHAPES: &str = "DeclareModule Shapes
  Structure Point
    x.i
    *next
  EndStructure
  Enumeration Color
    #Red
    #Green
  EndEnumeration
EndDeclareModule
Module Shapes
  Procedure.i Area(w, h)
    ProcedureReturn w * h
  EndProcedure
EndModule
#Version = 1
";

#[test]
fn test_module_outline_hierarchy() {
    let res = PbAnalyzer::new().analyze(SHAPES);
    assert!(res.diagnostics.is_empty(), "unexpected diagnostics: {:?}", res.diagnostics);

    let names: Vec<_> = res.symbols.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Shapes", "Shapes", "#Version"]);

    let declared = &res.symbols[0];
    assert_eq!(declared.kind, SymbolKind::MODULE);
    assert_eq!(list_child_names(declared), vec!["Point", "Color"]);

    let point = get_child(declared, "Point").expect("structure symbol");
    assert_eq!(point.kind, SymbolKind::STRUCT);
    assert_eq!(list_child_names(point), vec!["x", "*next"]);
    assert!(get_child(point, "x").is_some_and(|f| f.kind == SymbolKind::FIELD));

    let color = get_child(declared, "Color").expect("enumeration symbol");
    assert_eq!(color.kind, SymbolKind::ENUM);
    assert_eq!(list_child_names(color), vec!["#Red", "#Green"]);
    assert!(get_child(color, "#Red").is_some_and(|m| m.kind == SymbolKind::ENUM_MEMBER));

    let version = get_symbol(&res.symbols, "#Version").expect("constant symbol");
    assert_eq!(version.kind, SymbolKind::CONSTANT);
    assert!(version.children.is_none());
}

#[test]
fn test_procedure_symbol_detail_and_ranges() {
    let res = PbAnalyzer::new().analyze(SHAPES);
    let module = &res.symbols[1];
    assert_eq!(module.kind, SymbolKind::MODULE);
    assert_eq!(list_child_names(module), vec!["Area"]);

    let area = get_child(module, "Area").expect("procedure symbol");
    assert_eq!(area.kind, SymbolKind::FUNCTION);
    assert_eq!(area.detail.as_deref(), Some(".i"));
    // block spans from the keyword to the end of `EndProcedure`
    assert_eq!(area.range, Range::new(Position::new(11, 2), Position::new(13, 14)));
    assert_eq!(area.selection_range.start, Position::new(11, 2));
    // procedure bodies hold no fields
    assert!(area.children.is_none());
}

#[test]
fn test_unclosed_blocks_extend_to_document_end() {
    let code = "Procedure Open()\n  x = 1\n";
    let res = PbAnalyzer::new().analyze(code);
    let open = get_symbol(&res.symbols, "Open").expect("procedure symbol");
    assert_eq!(open.range.end, Position::new(2, 0));
}
