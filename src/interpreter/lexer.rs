use std::collections::VecDeque;

use logos::{Logos, Span};
use tracing::warn;

use crate::{config::Limits, error::ParseError};

/// The kind of a lexical token.
///
/// Keywords are matched as exact tokens and take priority over the identifier
/// pattern of the same length, so `let` is a keyword while `letter` is an
/// identifier.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(extras = LexerExtras)]
pub enum TokenKind {
    /// `let`
    #[token("let")]
    Let,
    /// `const`
    #[token("const")]
    Const,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `break`
    #[token("break")]
    Break,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// Identifier tokens such as `score` or `$pad_1`.
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,
    /// Digit runs. A directly attached leading `-` is folded in after lexing.
    #[regex(r"[0-9]+")]
    Number,
    /// `"text"`, kept verbatim with both quotes.
    #[regex(r#""[^"]*""#, allow_greedy = true)]
    String,
    /// A string literal that runs to the end of the input.
    #[regex(r#""[^"]*"#, allow_greedy = true)]
    UnterminatedString,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// Terminates every token queue. Never produced by the scanner itself.
    EndOfFile,
}

/// Additional information carried by the lexer during tokenization.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// A token as handed to the parser: its kind, the exact source text and the
/// line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind:   TokenKind,
    pub lexeme: String,
    pub line:   usize,
}

impl Token {
    /// Creates the end-of-file sentinel for the given line.
    #[must_use]
    pub fn end_of_file(line: usize) -> Self {
        Self { kind: TokenKind::EndOfFile,
               lexeme: "EOF".to_string(),
               line }
    }

    /// Returns whether this token can end an operand, which decides whether a
    /// following `-` is a binary minus or the sign of a literal.
    fn ends_operand(&self) -> bool {
        matches!(self.kind,
                 TokenKind::Identifier
                 | TokenKind::Number
                 | TokenKind::String
                 | TokenKind::UnterminatedString
                 | TokenKind::RParen
                 | TokenKind::RBracket)
    }
}

struct RawToken {
    kind: TokenKind,
    span: Span,
    line: usize,
}

/// Converts a raw script buffer into a queue of tokens.
///
/// The buffer is decoded as UTF-8 (invalid sequences become replacement
/// characters and are then reported as unrecognized). Lexing never aborts:
/// unrecognized characters and unterminated strings are pushed to
/// `diagnostics`, the scanner moves on, and the queue is always terminated by
/// an [`TokenKind::EndOfFile`] token.
///
/// A `-` directly attached to a digit run becomes part of a negative literal.
/// The fold is skipped when the previous token ends an operand (an
/// identifier, number, string, `)` or `]`): folding there would leave `x-3`
/// as two operands with no operator between them. So `x = -3` reads a
/// literal, while `x-3` and `f()-1` still subtract.
///
/// # Parameters
/// - `buffer`: The script bytes, without the transport's `EOF` marker.
/// - `limits`: Bounds applied while lexing (token count).
/// - `diagnostics`: Shared channel receiving recoverable errors.
///
/// # Returns
/// The token queue, ending in exactly one end-of-file token.
///
/// # Example
/// ```
/// use padscript::{config::Limits, interpreter::lexer::{TokenKind, tokenize}};
///
/// let mut diagnostics = Vec::new();
/// let tokens = tokenize(b"let x = -4;", &Limits::default(), &mut diagnostics);
///
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds,
///            [TokenKind::Let,
///             TokenKind::Identifier,
///             TokenKind::Equals,
///             TokenKind::Number,
///             TokenKind::Semicolon,
///             TokenKind::EndOfFile]);
/// assert_eq!(tokens[3].lexeme, "-4");
/// assert!(diagnostics.is_empty());
/// ```
pub fn tokenize(buffer: &[u8],
                limits: &Limits,
                diagnostics: &mut Vec<ParseError>)
                -> VecDeque<Token> {
    let source = String::from_utf8_lossy(buffer);
    let mut lexer = TokenKind::lexer_with_extras(&source, LexerExtras { line: 1 });
    let mut raw = Vec::new();

    while let Some(result) = lexer.next() {
        let line = lexer.extras.line;
        match result {
            Ok(kind) => {
                if raw.len() >= limits.max_tokens {
                    report(diagnostics,
                           ParseError::TooManyTokens { limit: limits.max_tokens,
                                                       line });
                    break;
                }
                if matches!(kind, TokenKind::String | TokenKind::UnterminatedString) {
                    lexer.extras.line += lexer.slice().matches('\n').count();
                }
                if kind == TokenKind::UnterminatedString {
                    report(diagnostics, ParseError::UnterminatedString { line });
                }
                raw.push(RawToken { kind,
                                    span: lexer.span(),
                                    line });
            },
            Err(()) => {
                let character = lexer.slice().chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                report(diagnostics, ParseError::UnrecognizedCharacter { character, line });
            },
        }
    }

    let last_line = lexer.extras.line;
    let mut tokens = fold_negative_literals(&source, raw);
    tokens.push_back(Token::end_of_file(last_line));

    tokens
}

fn fold_negative_literals(source: &str, raw: Vec<RawToken>) -> VecDeque<Token> {
    let mut tokens: VecDeque<Token> = VecDeque::with_capacity(raw.len() + 1);
    let mut iter = raw.into_iter().peekable();

    while let Some(RawToken { kind, span, line }) = iter.next() {
        let operand_before = tokens.back().is_some_and(Token::ends_operand);

        if kind == TokenKind::Minus
           && !operand_before
           && let Some(next) = iter.peek()
           && next.kind == TokenKind::Number
           && next.span.start == span.end
           && let Some(number) = iter.next()
        {
            tokens.push_back(Token { kind: TokenKind::Number,
                                     lexeme: format!("-{}", &source[number.span]),
                                     line });
            continue;
        }

        tokens.push_back(Token { kind,
                                 lexeme: source[span].to_string(),
                                 line });
    }

    tokens
}

fn report(diagnostics: &mut Vec<ParseError>, error: ParseError) {
    warn!(%error, "lexer diagnostic");
    diagnostics.push(error);
}
