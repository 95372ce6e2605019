#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxKind {
    CURLY_OPEN,
    CURLY_CLOSE,
    SQUARE_BRACKET_OPEN,
    SQUARE_BRACKET_CLOSE,
    COLON,
    COMMA,

    WHITESPACE,
    COMMENT,
    UNTERMINATED_COMMENT,
    ROOT_LEVEL_VALUE_DELIMITER,

    STRING_LITERAL,
    INTEGER_LITERAL,
    BOOLEAN_LITERAL,
    MISSING_VALUE,
    UNDEFINED_VALUE,
    UNKNOWN_SYMBOL,
    ERROR_STRING,

    EOF,

    MULTI_VALUE,
    VALUE_WITH_BACKGROUND,
    BACKGROUND_LIST,
    KEY_VALUE,
    MAP,
    LIST,
}

impl SyntaxKind {
    pub const fn is_background(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE
                | Self::COMMENT
                | Self::UNTERMINATED_COMMENT
                | Self::ROOT_LEVEL_VALUE_DELIMITER
        )
    }

    /// Kinds a value can start with.
    pub const fn is_value_start(self) -> bool {
        matches!(
            self,
            Self::CURLY_OPEN
                | Self::SQUARE_BRACKET_OPEN
                | Self::STRING_LITERAL
                | Self::INTEGER_LITERAL
                | Self::BOOLEAN_LITERAL
                | Self::UNDEFINED_VALUE
                | Self::UNKNOWN_SYMBOL
                | Self::ERROR_STRING
        )
    }
}
