//! Parser for the ROSpec DSL.
//!
//! The parser converts a stream of tokens into a [`SpecAst`]. Top-level
//! declarations may appear in any order; resolution of the names they
//! mention happens later, against the architecture graph, so the parser
//! never rejects a forward reference.
//!
//! `where { ... }` blocks are captured as raw text with balanced braces.
//! Their interior is never interpreted, so any token stream is tolerated
//! inside them, including ones the lexer cannot classify.

use rosqa_foundation::{Error, ParamType, Result, Value};

use crate::ast::{
    AliasDecl, AliasKind, ChannelRef, ContextAssign, ContextDecl, Decl, InstanceItem,
    NodeInstanceDecl, NodeTypeDecl, NodeTypeItem, Param, ParamAssign, QosAttachDecl,
    QosPolicyDecl, QosSetting, Remap, Role, RoleKind, ServiceDecl, ServiceType, SpecAst,
    SystemDecl, TfEdge, TfRole, TopicDecl,
};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Kw, Token, TokenKind};

/// Parser for ROSpec source code.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Span of the most recently consumed token.
    prev_span: Span,
    /// Source text (for error messages and raw block capture).
    source: &'src str,
    /// Whether a `system` block has already been parsed.
    seen_system: bool,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            prev_span: Span::at_start(),
            source,
            seen_system: false,
        }
    }

    /// Parses the whole source into a spec tree.
    ///
    /// # Errors
    /// Returns an error if the source violates the ROSpec grammar.
    pub fn parse(&mut self) -> Result<SpecAst> {
        self.skip_trivia();
        let mut decls = Vec::new();
        while self.current.kind != TokenKind::Eof {
            decls.push(self.parse_decl()?);
        }
        Ok(SpecAst { decls })
    }

    /// Parses one top-level declaration.
    fn parse_decl(&mut self) -> Result<Decl> {
        match &self.current.kind {
            TokenKind::Keyword(Kw::Node) => self.parse_node_type().map(Decl::NodeType),
            TokenKind::Keyword(Kw::System) => self.parse_system().map(Decl::System),
            TokenKind::Keyword(Kw::Topic) => self.parse_topic().map(Decl::Topic),
            TokenKind::Keyword(Kw::Service) => self.parse_service().map(Decl::Service),
            TokenKind::Keyword(Kw::Qos) => self.parse_qos_policy().map(Decl::QosPolicy),
            TokenKind::Keyword(Kw::Attach) => self.parse_qos_attach().map(Decl::QosAttach),
            TokenKind::Keyword(Kw::Type) => self.parse_alias(AliasKind::Type).map(Decl::Alias),
            TokenKind::Keyword(Kw::Message) => {
                self.parse_alias(AliasKind::Message).map(Decl::Alias)
            }
            _ => Err(self.unexpected("a declaration")),
        }
    }

    /// Parses a `node type` declaration, including its optional
    /// trailing `where` block.
    fn parse_node_type(&mut self) -> Result<NodeTypeDecl> {
        let start = self.current.span;
        self.bump(); // node
        self.expect_kw(Kw::Type)?;
        let name = self.expect_ident()?;
        self.expect(&TokenKind::LBrace)?;

        let mut items = Vec::new();
        while self.current.kind != TokenKind::RBrace {
            items.push(self.parse_node_type_item()?);
        }
        self.bump(); // }

        let where_block = if self.at_kw(Kw::Where) {
            self.bump();
            Some(self.parse_raw_block()?)
        } else {
            None
        };

        Ok(NodeTypeDecl {
            name,
            items,
            where_block,
            span: start.to(self.prev_span),
        })
    }

    /// Parses one item in a node type body.
    fn parse_node_type_item(&mut self) -> Result<NodeTypeItem> {
        match &self.current.kind {
            TokenKind::Keyword(Kw::Param) => self.parse_param(false).map(NodeTypeItem::Param),
            TokenKind::Keyword(Kw::Optional) => {
                self.bump();
                if !self.at_kw(Kw::Param) {
                    return Err(self.unexpected("keyword 'param'"));
                }
                self.parse_param(true).map(NodeTypeItem::Param)
            }
            TokenKind::Keyword(Kw::Publishes) => self.parse_topic_role(RoleKind::Publishes),
            TokenKind::Keyword(Kw::Subscribes) => self.parse_topic_role(RoleKind::Subscribes),
            TokenKind::Keyword(Kw::Provides) => self.parse_service_role(RoleKind::Provides),
            TokenKind::Keyword(Kw::Uses) => self.parse_service_role(RoleKind::Uses),
            TokenKind::Keyword(Kw::Tf) => self.parse_tf(),
            _ => Err(self.unexpected("a node type item")),
        }
    }

    /// Parses a `publishes to` or `subscribes to` role.
    fn parse_topic_role(&mut self, kind: RoleKind) -> Result<NodeTypeItem> {
        self.bump(); // publishes | subscribes
        self.expect_kw(Kw::To)?;
        self.parse_role_tail(kind)
    }

    /// Parses a `provides service` or `uses service` role.
    fn parse_service_role(&mut self, kind: RoleKind) -> Result<NodeTypeItem> {
        self.bump(); // provides | uses
        self.expect_kw(Kw::Service)?;
        self.parse_role_tail(kind)
    }

    /// Parses the channel, optional inline type, and terminator of a role.
    fn parse_role_tail(&mut self, kind: RoleKind) -> Result<NodeTypeItem> {
        let channel = self.parse_channel()?;
        let ty = if self.current.kind == TokenKind::Colon {
            self.bump();
            Some(self.expect_name()?)
        } else {
            None
        };
        self.expect(&TokenKind::Semicolon)?;
        Ok(NodeTypeItem::Role(Role { kind, channel, ty }))
    }

    /// Parses a parameter declaration; `optional` has already been consumed.
    fn parse_param(&mut self, optional: bool) -> Result<Param> {
        self.bump(); // param
        let name = self.expect_ident()?;
        self.expect(&TokenKind::Colon)?;
        let ty_span = self.current.span;
        let ty_word = self.expect_ident()?;
        let Some(ty) = ParamType::from_name(&ty_word) else {
            return Err(self.error_at(ty_span, &format!("unknown parameter type: {ty_word}")));
        };
        let default = if self.current.kind == TokenKind::Equals {
            self.bump();
            Some(self.parse_literal()?)
        } else {
            None
        };
        let constraint = if self.at_kw(Kw::Where) {
            self.bump();
            Some(self.parse_raw_block()?)
        } else {
            None
        };
        self.expect(&TokenKind::Semicolon)?;
        Ok(Param {
            name,
            ty,
            optional,
            default,
            constraint,
        })
    }

    /// Parses a TF frame relation.
    fn parse_tf(&mut self) -> Result<NodeTypeItem> {
        self.bump(); // tf
        let role = match &self.current.kind {
            TokenKind::Keyword(Kw::Broadcasts) => TfRole::Broadcasts,
            TokenKind::Keyword(Kw::Listens) => TfRole::Listens,
            _ => return Err(self.unexpected("'broadcasts' or 'listens'")),
        };
        self.bump();
        let parent = self.expect_name()?;
        self.expect(&TokenKind::Arrow)?;
        let child = self.expect_name()?;
        self.expect(&TokenKind::Semicolon)?;
        Ok(NodeTypeItem::Tf(TfEdge { role, parent, child }))
    }

    /// Parses a channel reference: a literal name or `content(param)`.
    fn parse_channel(&mut self) -> Result<ChannelRef> {
        if self.at_kw(Kw::Content) {
            self.bump();
            self.expect(&TokenKind::LParen)?;
            let param = self.expect_ident()?;
            self.expect(&TokenKind::RParen)?;
            Ok(ChannelRef::Content(param))
        } else {
            Ok(ChannelRef::Literal(self.expect_name()?))
        }
    }

    /// Parses the `system` block. Only one may appear per file.
    fn parse_system(&mut self) -> Result<SystemDecl> {
        let start = self.current.span;
        if self.seen_system {
            return Err(self.error("duplicate system block"));
        }
        self.seen_system = true;
        self.bump(); // system
        self.expect(&TokenKind::LBrace)?;

        let mut contexts = Vec::new();
        let mut instances = Vec::new();
        while self.current.kind != TokenKind::RBrace {
            match &self.current.kind {
                TokenKind::Keyword(Kw::Context) => contexts.push(self.parse_context()?),
                TokenKind::Keyword(Kw::Node) => instances.push(self.parse_instance()?),
                _ => return Err(self.unexpected("'context' or 'node instance'")),
            }
        }
        self.bump(); // }

        Ok(SystemDecl {
            contexts,
            instances,
            span: start.to(self.prev_span),
        })
    }

    /// Parses a context declaration.
    fn parse_context(&mut self) -> Result<ContextDecl> {
        let start = self.current.span;
        self.bump(); // context
        let name = self.expect_ident()?;
        self.expect(&TokenKind::LBrace)?;

        let mut assigns = Vec::new();
        while self.current.kind != TokenKind::RBrace {
            let key = self.expect_ident()?;
            self.expect(&TokenKind::Equals)?;
            let value = self.parse_literal()?;
            self.expect(&TokenKind::Semicolon)?;
            assigns.push(ContextAssign { key, value });
        }
        self.bump(); // }

        Ok(ContextDecl {
            name,
            assigns,
            span: start.to(self.prev_span),
        })
    }

    /// Parses a node instance declaration.
    fn parse_instance(&mut self) -> Result<NodeInstanceDecl> {
        let start = self.current.span;
        self.bump(); // node
        self.expect_kw(Kw::Instance)?;
        let name = self.expect_ident()?;
        self.expect(&TokenKind::Colon)?;
        let type_name = self.expect_ident()?;
        self.expect(&TokenKind::LBrace)?;

        let mut items = Vec::new();
        while self.current.kind != TokenKind::RBrace {
            match &self.current.kind {
                TokenKind::Keyword(Kw::Param) => {
                    self.bump();
                    let param = self.expect_ident()?;
                    self.expect(&TokenKind::Equals)?;
                    let value = self.parse_literal()?;
                    self.expect(&TokenKind::Semicolon)?;
                    items.push(InstanceItem::ParamAssign(ParamAssign { name: param, value }));
                }
                TokenKind::Keyword(Kw::Use) => {
                    self.bump();
                    self.expect_kw(Kw::Context)?;
                    let context = self.expect_ident()?;
                    self.expect(&TokenKind::Semicolon)?;
                    items.push(InstanceItem::UseContext(context));
                }
                TokenKind::Keyword(Kw::Remap) => {
                    self.bump();
                    let from = self.expect_name()?;
                    self.expect_kw(Kw::To)?;
                    let to = self.expect_name()?;
                    self.expect(&TokenKind::Semicolon)?;
                    items.push(InstanceItem::Remap(Remap { from, to }));
                }
                _ => return Err(self.unexpected("an instance item")),
            }
        }
        self.bump(); // }

        Ok(NodeInstanceDecl {
            name,
            type_name,
            items,
            span: start.to(self.prev_span),
        })
    }

    /// Parses an explicit topic declaration.
    fn parse_topic(&mut self) -> Result<TopicDecl> {
        let start = self.current.span;
        self.bump(); // topic
        let name = self.expect_name()?;
        self.expect(&TokenKind::Colon)?;
        let ty = self.expect_name()?;
        self.expect(&TokenKind::Semicolon)?;
        Ok(TopicDecl {
            name,
            ty,
            span: start.to(self.prev_span),
        })
    }

    /// Parses an explicit service declaration, in either type form.
    fn parse_service(&mut self) -> Result<ServiceDecl> {
        let start = self.current.span;
        self.bump(); // service
        let name = self.expect_name()?;
        self.expect(&TokenKind::Colon)?;
        let first = self.expect_name()?;
        let ty = if self.current.kind == TokenKind::Arrow {
            self.bump();
            let response = self.expect_name()?;
            ServiceType::ReqResp {
                request: first,
                response,
            }
        } else {
            ServiceType::Pair(first)
        };
        self.expect(&TokenKind::Semicolon)?;
        Ok(ServiceDecl {
            name,
            ty,
            span: start.to(self.prev_span),
        })
    }

    /// Parses a QoS policy declaration.
    fn parse_qos_policy(&mut self) -> Result<QosPolicyDecl> {
        let start = self.current.span;
        self.bump(); // qos
        self.expect_kw(Kw::Policy)?;
        let name = self.expect_ident()?;
        self.expect(&TokenKind::LBrace)?;

        let mut settings = Vec::new();
        while self.current.kind != TokenKind::RBrace {
            let key = self.expect_ident()?;
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_setting_value()?;
            self.expect(&TokenKind::Semicolon)?;
            settings.push(QosSetting { key, value });
        }
        self.bump(); // }

        Ok(QosPolicyDecl {
            name,
            settings,
            span: start.to(self.prev_span),
        })
    }

    /// Parses a QoS setting value, rendering literals as written.
    fn parse_setting_value(&mut self) -> Result<String> {
        let value = match &self.current.kind {
            TokenKind::Name(n) => n.clone(),
            TokenKind::Int(n) => n.to_string(),
            TokenKind::Float(f) => Value::Double(*f).to_string(),
            TokenKind::Str(s) => s.clone(),
            TokenKind::True => "true".to_string(),
            TokenKind::False => "false".to_string(),
            _ => return Err(self.unexpected("a setting value")),
        };
        self.bump();
        Ok(value)
    }

    /// Parses an `attach qos` declaration.
    fn parse_qos_attach(&mut self) -> Result<QosAttachDecl> {
        let start = self.current.span;
        self.bump(); // attach
        self.expect_kw(Kw::Qos)?;
        let policy = self.expect_ident()?;
        self.expect_kw(Kw::To)?;
        let channel = self.expect_name()?;
        self.expect(&TokenKind::Semicolon)?;
        Ok(QosAttachDecl {
            policy,
            channel,
            span: start.to(self.prev_span),
        })
    }

    /// Parses a `type alias` or `message alias` declaration; the leading
    /// `type`/`message` keyword is still the current token.
    fn parse_alias(&mut self, kind: AliasKind) -> Result<AliasDecl> {
        let start = self.current.span;
        self.bump(); // type | message
        self.expect_kw(Kw::Alias)?;
        let name = self.expect_ident()?;
        self.expect(&TokenKind::Equals)?;
        let target = self.expect_name()?;
        self.expect(&TokenKind::Semicolon)?;
        Ok(AliasDecl {
            kind,
            name,
            target,
            span: start.to(self.prev_span),
        })
    }

    /// Captures the raw text of a brace-balanced block.
    ///
    /// The opening brace must be the current token. Interior tokens are
    /// only inspected for brace depth, so lexically invalid text (for
    /// example `rate_hz > 0`) passes through untouched. Braces inside
    /// strings and comments never affect the depth because they arrive
    /// inside a single token.
    fn parse_raw_block(&mut self) -> Result<String> {
        let open_span = self.current.span;
        if self.current.kind != TokenKind::LBrace {
            return Err(self.unexpected("'{'"));
        }
        self.advance();

        let start = open_span.end;
        let mut depth = 1usize;
        loop {
            match &self.current.kind {
                TokenKind::LBrace => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        let end = self.current.span.start;
                        self.bump();
                        return Ok(self.source[start..end].trim().to_string());
                    }
                    self.advance();
                }
                TokenKind::Eof => {
                    return Err(self.error_at(open_span, "unterminated where block"));
                }
                _ => self.advance(),
            }
        }
    }

    /// Parses a literal value.
    fn parse_literal(&mut self) -> Result<Value> {
        let value = match &self.current.kind {
            TokenKind::True => Value::Bool(true),
            TokenKind::False => Value::Bool(false),
            TokenKind::Int(n) => Value::Int(*n),
            TokenKind::Float(f) => Value::Double(*f),
            TokenKind::Str(s) => Value::Str(s.clone()),
            _ => return Err(self.unexpected("a literal value")),
        };
        self.bump();
        Ok(value)
    }

    /// Returns true if the current token is the given keyword.
    fn at_kw(&self, kw: Kw) -> bool {
        self.current.kind == TokenKind::Keyword(kw)
    }

    /// Skips comment tokens.
    fn skip_trivia(&mut self) {
        while self.current.kind.is_trivia() {
            self.advance();
        }
    }

    /// Advances to the next token without skipping trivia.
    fn advance(&mut self) {
        self.prev_span = self.current.span;
        self.current = self.lexer.next_token();
    }

    /// Advances to the next meaningful token.
    fn bump(&mut self) {
        self.advance();
        self.skip_trivia();
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, expected: &TokenKind) -> Result<()> {
        // Use discriminant comparison for token kinds that carry data
        let matches =
            std::mem::discriminant(&self.current.kind) == std::mem::discriminant(expected);

        if matches {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected(expected.name()))
        }
    }

    /// Expects a specific keyword, then advances.
    fn expect_kw(&mut self, kw: Kw) -> Result<()> {
        if self.at_kw(kw) {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected(&format!("keyword '{kw}'")))
        }
    }

    /// Expects any name token, including ones containing `/`.
    fn expect_name(&mut self) -> Result<String> {
        match &self.current.kind {
            TokenKind::Name(n) => {
                let name = n.clone();
                self.bump();
                Ok(name)
            }
            _ => Err(self.unexpected("a name")),
        }
    }

    /// Expects an identifier: a name without `/`.
    fn expect_ident(&mut self) -> Result<String> {
        match &self.current.kind {
            TokenKind::Name(n) if !n.contains('/') => {
                let name = n.clone();
                self.bump();
                Ok(name)
            }
            TokenKind::Name(n) => {
                Err(self.error(&format!("identifier may not contain '/': {n}")))
            }
            _ => Err(self.unexpected("an identifier")),
        }
    }

    /// Creates a parse error for an unexpected current token.
    ///
    /// Lexer errors carry their own message, which takes precedence.
    fn unexpected(&self, expected: &str) -> Error {
        match &self.current.kind {
            TokenKind::Error(msg) => self.error(msg),
            kind => self.error(&format!("expected {expected}, found {}", kind.name())),
        }
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    /// Creates a parse error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::syntax(message, span.line, span.column, self.context_at(span))
    }

    /// Gets the source line containing a span, for error messages.
    fn context_at(&self, span: Span) -> String {
        let line_start = self.source[..span.start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = self.source[span.start..]
            .find('\n')
            .map_or(self.source.len(), |i| span.start + i);

        self.source[line_start..line_end].to_string()
    }
}

/// Parses ROSpec source into a spec tree.
///
/// # Errors
/// Returns an error if the source violates the ROSpec grammar.
pub fn parse(source: &str) -> Result<SpecAst> {
    Parser::new(source).parse()
}
