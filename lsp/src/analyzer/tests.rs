use super::*;
use pbls_core::settings::Settings;
use serde_json::json;
use tower_lsp::lsp_types::{DiagnosticSeverity, NumberOrString, Position, Range, SymbolKind, Url};

fn create_analyzer() -> PbAnalyzer {
    PbAnalyzer::new()
}

#[test]
fn test_analyze_outline() {
    let analyzer = create_analyzer();
    let result = analyzer.analyze("DeclareModule Shapes\n  Structure Point\n    x.l\n  EndStructure\nEndDeclareModule\n");

    assert!(result.diagnostics.is_empty());
    assert_eq!(result.symbols.len(), 1);
    let module = &result.symbols[0];
    assert_eq!(module.name, "Shapes");
    assert_eq!(module.kind, SymbolKind::MODULE);
    assert_eq!(module.range, Range::new(Position::new(0, 0), Position::new(4, 16)));
    assert_eq!(module.selection_range, Range::new(Position::new(0, 0), Position::new(0, 20)));

    let point = &module.children.as_ref().unwrap()[0];
    assert_eq!(point.kind, SymbolKind::STRUCT);
    let field = &point.children.as_ref().unwrap()[0];
    assert_eq!(field.name, "x");
    assert_eq!(field.kind, SymbolKind::FIELD);
    assert!(field.children.is_none());
}

#[test]
fn test_procedure_detail_is_return_type() {
    let result = create_analyzer().analyze("Procedure.s Greet(name$)\nEndProcedure");
    let greet = &result.symbols[0];
    assert_eq!(greet.kind, SymbolKind::FUNCTION);
    assert_eq!(greet.detail.as_deref(), Some(".s"));
}

#[test]
fn test_diagnostics_carry_codes() {
    let result = create_analyzer().analyze("Macro Bad$\nEndMacro\n#2x = 1");
    let codes: Vec<_> = result.diagnostics.iter().map(|d| d.code.clone()).collect();
    assert_eq!(
        codes,
        vec![
            Some(NumberOrString::String("PB1000".into())),
            Some(NumberOrString::String("PB1002".into())),
        ]
    );
    assert!(result
        .diagnostics
        .iter()
        .all(|d| d.severity == Some(DiagnosticSeverity::ERROR) && d.source.as_deref() == Some("purebasic")));
    assert_eq!(
        result.diagnostics[0].range,
        Range::new(Position::new(0, 6), Position::new(0, 10))
    );
}

#[test]
fn test_settings_cap_diagnostics() {
    let settings = Settings::from_json(json!({ "diagnostics": { "maxNumberOfProblems": 1 } })).unwrap();
    let analyzer = PbAnalyzer::with_settings(&settings);
    assert_eq!(analyzer.max_problems(), 1);
    let result = analyzer.analyze("#1 = 1\n#2 = 2\n#3 = 3");
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].range.start.line, 0);
}

#[test]
fn test_workspace_symbol_search() {
    let result = create_analyzer().analyze("Module Net\nProcedure Connect()\nEndProcedure\nEndModule\n#NET_PORT = 80");
    let uri = Url::parse("file:///tmp/net.pb").unwrap();

    let mut found = Vec::new();
    collect_workspace_symbols(&uri, &result.symbols, None, "net", &mut found);
    let names: Vec<_> = found.iter().map(|s| (s.name.as_str(), s.container_name.as_deref())).collect();
    assert_eq!(names, vec![("Net", None), ("#NET_PORT", None)]);

    let mut all = Vec::new();
    collect_workspace_symbols(&uri, &result.symbols, None, "", &mut all);
    assert_eq!(all.len(), 3);
    assert_eq!(all[1].container_name.as_deref(), Some("Net"));
    assert_eq!(all[1].location.uri, uri);
}
