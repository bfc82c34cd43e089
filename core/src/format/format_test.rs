#[cfg(test)]
mod tests {
    use crate::format::{TextEdit, apply_edits, format_all, format_on_type, format_range};
    use crate::indent::FormattingOptions;
    use crate::settings::Settings;
    use crate::text::{Position, Range};

    fn spaces() -> FormattingOptions {
        FormattingOptions::default()
    }

    fn format(text: &str) -> String {
        apply_edits(text, &format_all(text, &spaces(), &Settings::default()))
    }

    fn edit(line: u32, start: u32, end: u32, new_text: &str) -> TextEdit {
        TextEdit {
            range: Range::new(Position::new(line, start), Position::new(line, end)),
            new_text: new_text.to_string(),
        }
    }

    #[test]
    fn test_format_all() {
        let text = concat!(
            "Procedure.s Greet(name$)   \n",
            "x=1\n",
            "If x<>2 ; check\n",
            "y$ = \"a  ,b\"+name$\n",
            "EndIf\n",
            "  ProcedureReturn y$\n",
            "EndProcedure\n",
        );
        let expected = concat!(
            "Procedure.s Greet(name$)\n",
            "    x = 1\n",
            "    If x <> 2 ; check\n",
            "        y$ = \"a  ,b\" + name$\n",
            "    EndIf\n",
            "    ProcedureReturn y$\n",
            "EndProcedure\n",
        );
        assert_eq!(format(text), expected);
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let text = "Structure  P\nx.l\n *next.P\nEndStructure\nSelect a\nCase 1:b=2\nEndSelect\n";
        let once = format(text);
        assert!(format_all(&once, &spaces(), &Settings::default()).is_empty());
        assert_eq!(once, "Structure P\n    x.l\n    *next.P\nEndStructure\nSelect a\n    Case 1 : b = 2\nEndSelect\n");
    }

    #[test]
    fn test_tabs_and_blank_lines() {
        let options = FormattingOptions {
            tab_size: 4,
            insert_spaces: false,
        };
        let text = "While x\n   \ny\nWend";
        let edits = format_all(text, &options, &Settings::default());
        assert_eq!(edits, vec![edit(1, 0, 3, ""), edit(2, 0, 1, "\ty")]);
    }

    #[test]
    fn test_range_picks_context_from_previous_line() {
        let text = "Procedure a()\n    If b\nc=1\n    EndIf\nEndProcedure";
        let edits = format_range(text, &spaces(), &Settings::default(), 2, 3, None);
        assert_eq!(edits, vec![edit(2, 0, 3, "        c = 1")]);
    }

    #[test]
    fn test_pick_skips_lines_without_rules() {
        let text = "While x\n\n  y = 1\nz=2";
        let edits = format_range(text, &spaces(), &Settings::default(), 3, 3, None);
        assert_eq!(edits, vec![edit(3, 0, 3, "    z = 2")]);
    }

    #[test]
    fn test_end_line_is_clamped() {
        let edits = format_range("a=1", &spaces(), &Settings::default(), 0, 40, None);
        assert_eq!(edits, vec![edit(0, 0, 3, "a = 1")]);
        assert!(format_range("a=1", &spaces(), &Settings::default(), 5, 40, None).is_empty());
    }

    #[test]
    fn test_on_type_formats_left_of_cursor_only() {
        let text = "If a\nx=1:y=2";
        let edits = format_on_type(text, &spaces(), &Settings::default(), Position::new(1, 4));
        assert_eq!(edits, vec![edit(1, 0, 4, "    x = 1:")]);
    }

    #[test]
    fn test_on_type_trims_after_cursor_on_blank_prefix() {
        let text = "While x\n    \t  y";
        let edits = format_on_type(text, &spaces(), &Settings::default(), Position::new(1, 4));
        assert_eq!(edits, vec![edit(1, 4, 8, "y")]);
    }

    #[test]
    fn test_on_type_on_first_line() {
        let edits = format_on_type("x=1", &spaces(), &Settings::default(), Position::new(0, 3));
        assert_eq!(edits, vec![edit(0, 0, 3, "x = 1")]);
    }

    #[test]
    fn test_region_comments_indent() {
        assert_eq!(format(";> region\nx\n;< end\ny"), ";> region\n    x\n;< end\ny");
    }

    #[test]
    fn test_utf16_columns_and_crlf() {
        assert_eq!(format("s$ = \"é😀\"+t$"), "s$ = \"é😀\" + t$");

        let text = "If a\r\nb\r\nEndIf\r\n";
        let edits = format_all(text, &spaces(), &Settings::default());
        assert_eq!(edits, vec![edit(1, 0, 1, "    b")]);
        assert_eq!(apply_edits(text, &edits), "If a\r\n    b\r\nEndIf\r\n");
    }
}
