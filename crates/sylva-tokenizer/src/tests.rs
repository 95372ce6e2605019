use sylva_yellow::SyntaxKind::*;

use super::*;

fn token_text<'a>(token: &Token, text: &'a str) -> &'a str {
    &text[token.range]
}

fn kinds(text: &str) -> Vec<SyntaxKind> {
    Tokenizer::new(text).map(|token| token.kind()).collect()
}

fn codes(tokenizer: &Tokenizer<'_>) -> Vec<(ErrorCode, TextRange)> {
    tokenizer.diagnostics().iter().map(|diagnostic| (diagnostic.code(), diagnostic.range())).collect()
}

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

fn single_string(text: &str) -> (Symbol, Vec<(ErrorCode, TextRange)>) {
    let mut tokenizer = Tokenizer::new(text);
    let token = tokenizer.next_token();
    assert_eq!(tokenizer.peek().kind(), EOF, "{text:?} is a single token");
    (token.symbol, codes(&tokenizer))
}

fn string_value(text: &str) -> String {
    match single_string(text) {
        (Symbol::Value(GreenValue::StringLiteral(literal)), errors) if errors.is_empty() => {
            literal.value().to_owned()
        }
        other => panic!("expected a clean string for {text:?}, got {other:?}"),
    }
}

#[test]
fn punctuation_and_background() {
    assert_eq!(
        kinds("{ \"a\" :[1,true]}"),
        [
            CURLY_OPEN,
            WHITESPACE,
            STRING_LITERAL,
            WHITESPACE,
            COLON,
            SQUARE_BRACKET_OPEN,
            INTEGER_LITERAL,
            COMMA,
            BOOLEAN_LITERAL,
            SQUARE_BRACKET_CLOSE,
            CURLY_CLOSE,
        ]
    );
}

#[test]
fn tokens_cover_the_text() {
    let inputs = [
        "",
        "  {\"a\": [1, -2, +3]} // done",
        "/* a */ true\r\n false\t",
        "\"\\q\" null é \"open",
        "[1 2 3,,]::}",
        "/*",
    ];

    for text in inputs {
        let mut end = TextSize::new(0);
        let mut tokenizer = Tokenizer::new(text);
        for token in tokenizer.by_ref() {
            assert_eq!(token.range.start(), end, "{text:?}");
            assert_eq!(token.range.len(), token.symbol.text_len(), "{text:?}");
            end = token.range.end();
        }
        assert_eq!(end, TextSize::of(text), "{text:?}");
        assert_eq!(tokenizer.peek().range, TextRange::empty(TextSize::of(text)));
    }
}

#[test]
fn eof_repeats() {
    let mut tokenizer = Tokenizer::new("1");
    assert_eq!(tokenizer.next_token().kind(), INTEGER_LITERAL);
    assert_eq!(tokenizer.next_token().kind(), EOF);
    assert_eq!(tokenizer.next_token().kind(), EOF);
}

#[test]
fn line_comment_stops_before_line_break() {
    let text = "// note\n1";
    let mut tokenizer = Tokenizer::new(text);

    let token = tokenizer.next_token();
    assert_eq!(token.kind(), COMMENT);
    assert_eq!(token_text(&token, text), "// note");

    let token = tokenizer.next_token();
    assert_eq!(token.kind(), WHITESPACE);
    assert_eq!(token_text(&token, text), "\n");

    assert_eq!(tokenizer.next_token().kind(), INTEGER_LITERAL);
    assert!(tokenizer.diagnostics().is_empty());
}

#[test]
fn block_comments() {
    let text = "/* a * / b */1";
    let mut tokenizer = Tokenizer::new(text);
    let token = tokenizer.next_token();
    assert_eq!(token.kind(), COMMENT);
    assert_eq!(token_text(&token, text), "/* a * / b */");
    assert_eq!(tokenizer.next_token().kind(), INTEGER_LITERAL);
}

#[test]
fn unterminated_comment() {
    let mut tokenizer = Tokenizer::new("/*");
    let token = tokenizer.next_token();
    assert_eq!(token.kind(), UNTERMINATED_COMMENT);
    assert_eq!(token.range, range(0, 2));
    assert_eq!(codes(&tokenizer), [(ErrorCode::UnterminatedComment, range(0, 2))]);
    assert_eq!(tokenizer.diagnostics()[0].severity(), sylva_errors::Severity::Warning);

    let mut tokenizer = Tokenizer::new("1 /* x */ /*/ ");
    let kinds: Vec<_> = tokenizer.by_ref().map(|token| token.kind()).collect();
    assert_eq!(kinds, [INTEGER_LITERAL, WHITESPACE, COMMENT, WHITESPACE, UNTERMINATED_COMMENT]);
    assert_eq!(codes(&tokenizer), [(ErrorCode::UnterminatedComment, range(10, 14))]);
}

#[test]
fn lone_slash_is_unknown() {
    let mut tokenizer = Tokenizer::new("/ 1");
    let token = tokenizer.next_token();
    assert_eq!(token.symbol, Symbol::Value(GreenValue::UnknownSymbol(GreenUnknownSymbol::new('/'))));
    assert_eq!(codes(&tokenizer), [(ErrorCode::UnknownSymbol, range(0, 1))]);
}

#[test]
fn unknown_symbols_use_utf8_length() {
    let text = "é1";
    let mut tokenizer = Tokenizer::new(text);
    let token = tokenizer.next_token();
    assert_eq!(token.kind(), UNKNOWN_SYMBOL);
    assert_eq!(token.range, range(0, 2));
    assert_eq!(tokenizer.next_token().kind(), INTEGER_LITERAL);
    assert_eq!(codes(&tokenizer), [(ErrorCode::UnknownSymbol, range(0, 2))]);
}

#[test]
fn undefined_values() {
    for text in ["null", "1.5", "1e10", "--1", "-", "Infinity"] {
        let mut tokenizer = Tokenizer::new(text);
        let token = tokenizer.next_token();
        assert_eq!(token.kind(), UNDEFINED_VALUE, "{text:?}");
        assert_eq!(token.range.len(), TextSize::of(text));
        assert_eq!(codes(&tokenizer), [(ErrorCode::UnknownSymbol, token.range)]);
    }
}

#[test]
fn value_runs_stop_at_delimiters() {
    let text = "-12,true]";
    let mut tokenizer = Tokenizer::new(text);

    let token = tokenizer.next_token();
    assert_eq!(token.kind(), INTEGER_LITERAL);
    assert_eq!(token_text(&token, text), "-12");
    assert_eq!(tokenizer.next_token().kind(), COMMA);

    let token = tokenizer.next_token();
    assert_eq!(token.symbol, Symbol::Value(GreenValue::TRUE));
    assert_eq!(tokenizer.next_token().kind(), SQUARE_BRACKET_CLOSE);
}

#[test]
fn string_escapes() {
    assert_eq!(string_value(r#""plain""#), "plain");
    assert_eq!(string_value(r#""""#), "");
    assert_eq!(string_value(r#""\"\\\/\b\f\n\r\t""#), "\"\\/\u{8}\u{c}\n\r\t");
    assert_eq!(string_value(r#""\u00e9\u0041""#), "éA");
    assert_eq!(string_value(r#""\ud83d\ude00""#), "😀");
    assert_eq!(string_value("\"é\""), "é");
}

#[test]
fn unpaired_surrogates_are_replaced() {
    assert_eq!(string_value(r#""\ud800x""#), "\u{FFFD}x");
    assert_eq!(string_value(r#""\udc00""#), "\u{FFFD}");
    assert_eq!(string_value(r#""\ud800\u0041""#), "\u{FFFD}A");
}

#[test]
fn bad_escapes() {
    let (symbol, errors) = single_string(r#""\q""#);
    assert_eq!(symbol.kind(), ERROR_STRING);
    assert_eq!(errors, [(ErrorCode::BadEscapeSequence, range(1, 3))]);

    let (_, errors) = single_string(r#""\u12x""#);
    assert_eq!(errors, [(ErrorCode::BadEscapeSequence, range(1, 5))]);
}

#[test]
fn escaped_control_character() {
    let (symbol, errors) = single_string("\"a\\\nb\"");
    assert_eq!(symbol.kind(), ERROR_STRING);
    assert_eq!(symbol.text_len(), TextSize::new(6));
    assert_eq!(
        errors,
        [
            (ErrorCode::BadEscapeSequence, range(2, 4)),
            (ErrorCode::IllegalControlCharacter, range(3, 4)),
        ]
    );
}

#[test]
fn control_characters() {
    let (symbol, errors) = single_string("\"a\u{1}b\tc\"");
    assert_eq!(symbol.text_len(), TextSize::new(7));
    assert_eq!(
        errors,
        [
            (ErrorCode::IllegalControlCharacter, range(2, 3)),
            (ErrorCode::IllegalControlCharacter, range(4, 5)),
        ]
    );
}

#[test]
fn unterminated_strings() {
    let text = r#"  "ab\q"#;
    let mut tokenizer = Tokenizer::new(text);
    assert_eq!(tokenizer.next_token().kind(), WHITESPACE);

    let token = tokenizer.next_token();
    assert_eq!(token.range, range(2, 7));
    let Symbol::Value(GreenValue::ErrorString(string)) = token.symbol else {
        panic!("expected an error string")
    };
    let relative: Vec<_> = string.errors().iter().map(|error| (error.code(), error.range())).collect();
    assert_eq!(
        relative,
        [(ErrorCode::UnterminatedString, range(0, 5)), (ErrorCode::BadEscapeSequence, range(3, 5))]
    );
    assert_eq!(
        codes(&tokenizer),
        [(ErrorCode::UnterminatedString, range(2, 7)), (ErrorCode::BadEscapeSequence, range(5, 7))]
    );
}

#[test]
fn trailing_backslash() {
    let (symbol, errors) = single_string("\"a\\");
    assert_eq!(symbol.kind(), ERROR_STRING);
    assert_eq!(errors, [(ErrorCode::UnterminatedString, range(0, 3))]);
}

#[test]
fn drained_diagnostics_are_gone() {
    let mut tokenizer = Tokenizer::new("# $");
    while tokenizer.next_token().kind() != EOF {}
    assert_eq!(tokenizer.drain_diagnostics().count(), 2);
    assert!(tokenizer.diagnostics().is_empty());
}
