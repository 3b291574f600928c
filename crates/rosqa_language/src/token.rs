//! Token types for the ROSpec lexer.

use crate::span::Span;
use std::fmt;

/// A token with its source location.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Where the token appears in the source.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The different kinds of tokens in ROSpec source.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Left brace `{`.
    LBrace,
    /// Right brace `}`.
    RBrace,
    /// Left parenthesis `(`.
    LParen,
    /// Right parenthesis `)`.
    RParen,
    /// Colon `:`.
    Colon,
    /// Semicolon `;`.
    Semicolon,
    /// Equals sign `=`.
    Equals,
    /// Arrow `->`.
    Arrow,
    /// Boolean literal `true`.
    True,
    /// Boolean literal `false`.
    False,
    /// Integer literal.
    Int(i64),
    /// Floating point literal.
    Float(f64),
    /// String literal (without quotes).
    Str(String),
    /// A reserved keyword.
    Keyword(Kw),
    /// A graph name or identifier, possibly containing `/`.
    Name(String),
    /// A line comment starting with `//`.
    Comment(String),
    /// End of input.
    Eof,
    /// A lexical error with a description.
    Error(String),
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::Equals => "'='",
            TokenKind::Arrow => "'->'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::Int(_) => "integer",
            TokenKind::Float(_) => "float",
            TokenKind::Str(_) => "string",
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Name(_) => "name",
            TokenKind::Comment(_) => "comment",
            TokenKind::Eof => "end of input",
            TokenKind::Error(_) => "invalid token",
        }
    }

    /// Returns true if this token carries no syntactic meaning.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Comment(_))
    }
}

/// Reserved words of the ROSpec grammar.
///
/// Keywords are only recognized for words without `/`; a name like
/// `/use` stays a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kw {
    /// `node`
    Node,
    /// `type`
    Type,
    /// `instance`
    Instance,
    /// `system`
    System,
    /// `topic`
    Topic,
    /// `service`
    Service,
    /// `param`
    Param,
    /// `optional`
    Optional,
    /// `context`
    Context,
    /// `use`
    Use,
    /// `remap`
    Remap,
    /// `to`
    To,
    /// `publishes`
    Publishes,
    /// `subscribes`
    Subscribes,
    /// `provides`
    Provides,
    /// `uses`
    Uses,
    /// `content`
    Content,
    /// `qos`
    Qos,
    /// `policy`
    Policy,
    /// `attach`
    Attach,
    /// `alias`
    Alias,
    /// `message`
    Message,
    /// `tf`
    Tf,
    /// `broadcasts`
    Broadcasts,
    /// `listens`
    Listens,
    /// `where`
    Where,
}

impl Kw {
    /// Looks up a reserved word, returning `None` for ordinary names.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Kw> {
        let kw = match word {
            "node" => Kw::Node,
            "type" => Kw::Type,
            "instance" => Kw::Instance,
            "system" => Kw::System,
            "topic" => Kw::Topic,
            "service" => Kw::Service,
            "param" => Kw::Param,
            "optional" => Kw::Optional,
            "context" => Kw::Context,
            "use" => Kw::Use,
            "remap" => Kw::Remap,
            "to" => Kw::To,
            "publishes" => Kw::Publishes,
            "subscribes" => Kw::Subscribes,
            "provides" => Kw::Provides,
            "uses" => Kw::Uses,
            "content" => Kw::Content,
            "qos" => Kw::Qos,
            "policy" => Kw::Policy,
            "attach" => Kw::Attach,
            "alias" => Kw::Alias,
            "message" => Kw::Message,
            "tf" => Kw::Tf,
            "broadcasts" => Kw::Broadcasts,
            "listens" => Kw::Listens,
            "where" => Kw::Where,
            _ => return None,
        };
        Some(kw)
    }

    /// Returns the source spelling of this keyword.
    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            Kw::Node => "node",
            Kw::Type => "type",
            Kw::Instance => "instance",
            Kw::System => "system",
            Kw::Topic => "topic",
            Kw::Service => "service",
            Kw::Param => "param",
            Kw::Optional => "optional",
            Kw::Context => "context",
            Kw::Use => "use",
            Kw::Remap => "remap",
            Kw::To => "to",
            Kw::Publishes => "publishes",
            Kw::Subscribes => "subscribes",
            Kw::Provides => "provides",
            Kw::Uses => "uses",
            Kw::Content => "content",
            Kw::Qos => "qos",
            Kw::Policy => "policy",
            Kw::Attach => "attach",
            Kw::Alias => "alias",
            Kw::Message => "message",
            Kw::Tf => "tf",
            Kw::Broadcasts => "broadcasts",
            Kw::Listens => "listens",
            Kw::Where => "where",
        }
    }
}

impl fmt::Display for Kw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word())
    }
}
