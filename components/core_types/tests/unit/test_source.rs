//! Unit tests for SourcePosition

use core_types::SourcePosition;

#[cfg(test)]
mod source_position_tests {
    use super::*;

    #[test]
    fn test_source_position_creation() {
        let pos = SourcePosition {
            line: 10,
            column: 5,
            offset: 150,
        };

        assert_eq!(pos.line, 10);
        assert_eq!(pos.column, 5);
        assert_eq!(pos.offset, 150);
    }

    #[test]
    fn test_source_position_is_copy() {
        let pos = SourcePosition::offset_only(3);
        let copy = pos;
        assert_eq!(pos, copy);
    }

    #[test]
    fn test_from_offset_start_of_source() {
        let pos = SourcePosition::from_offset("class Test is end", 0);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 1);
    }

    #[test]
    fn test_from_offset_counts_lines() {
        let source = "class Test is\n  var x: Integer\nend";
        let offset = source.find("var").unwrap();
        let pos = SourcePosition::from_offset(source, offset);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 3);
    }

    #[test]
    fn test_from_offset_past_end_is_clamped() {
        let pos = SourcePosition::from_offset("ab", 100);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 3);
        assert_eq!(pos.offset, 100);
    }

    #[test]
    fn test_display_line_and_column() {
        let pos = SourcePosition {
            line: 3,
            column: 7,
            offset: 20,
        };
        assert_eq!(pos.to_string(), "3:7");
    }
}
