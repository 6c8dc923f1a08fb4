//! Unit tests for CompileError and ErrorKind

use core_types::{CompileError, CompileResult, ErrorKind, SourcePosition};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_variants_have_names() {
        let kinds = [
            ErrorKind::LexError,
            ErrorKind::ParseError,
            ErrorKind::UndefinedClass,
            ErrorKind::UndefinedIdentifier,
            ErrorKind::UnknownMethod,
            ErrorKind::DuplicateDeclaration,
            ErrorKind::TypeMismatch,
            ErrorKind::ArityMismatch,
            ErrorKind::InvalidRoot,
            ErrorKind::UnsupportedConstruct,
        ];
        for kind in kinds {
            assert!(!kind.as_str().is_empty());
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(ErrorKind::TypeMismatch, ErrorKind::TypeMismatch);
        assert_ne!(ErrorKind::TypeMismatch, ErrorKind::ArityMismatch);
    }
}

#[cfg(test)]
mod compile_error_tests {
    use super::*;

    #[test]
    fn test_compile_error_without_position() {
        let error = CompileError::new(ErrorKind::UnknownMethod, "Unknown method foo");
        assert_eq!(error.to_string(), "UnknownMethod: Unknown method foo");
    }

    #[test]
    fn test_compile_error_with_position() {
        let error = CompileError::new(ErrorKind::LexError, "Unknown token: #")
            .at(SourcePosition::from_offset("a\n#", 2));
        assert_eq!(error.to_string(), "LexError: Unknown token: # (at 2:1)");
    }

    #[test]
    fn test_at_opt_keeps_existing_position() {
        let error = CompileError::new(ErrorKind::TypeMismatch, "x")
            .at(SourcePosition::offset_only(1))
            .at_opt(None);
        assert_eq!(error.source_position, Some(SourcePosition::offset_only(1)));
    }

    #[test]
    fn test_compile_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        let error = CompileError::new(ErrorKind::InvalidRoot, "root");
        takes_error(&error);
    }

    #[test]
    fn test_compile_result_alias() {
        let result: CompileResult<u32> = Err(CompileError::new(ErrorKind::ParseError, "p"));
        assert!(result.is_err());
    }
}
