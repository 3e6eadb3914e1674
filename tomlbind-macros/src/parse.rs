//! Parsing of the derive input into [`PStruct`].
//!
//! The item header, attributes and field declarations go through `unsynn`
//! grammars. Generics and field lists are split by hand, since `<`/`>` are
//! plain punctuation and do not group tokens.

use proc_macro2::{Delimiter, Span, TokenStream, TokenTree};
use unsynn::*;

use crate::rename::RenameRule;

keyword! {
    KStruct = "struct";
    KEnum = "enum";
    KUnion = "union";
    KPub = "pub";
    KBind = "bind";
}

operator! {
    AttrEq = "=";
    Col = ":";
}

unsynn! {
    /// `#[...]`
    struct OuterAttr {
        _pound: Pound,
        content: BracketGroup,
    }

    /// `pub`, `pub(crate)`, ...
    enum Vis {
        PubIn(Cons<KPub, ParenthesisGroup>),
        Pub(KPub),
    }

    enum ItemKind {
        Struct(KStruct),
        Enum(KEnum),
        Union(KUnion),
    }

    /// Everything up to and including the type name; generics, where clause
    /// and body are left in `rest`.
    struct ItemHead {
        attrs: Vec<OuterAttr>,
        _vis: Option<Vis>,
        kind: ItemKind,
        name: Ident,
        rest: Vec<TokenTree>,
    }

    struct NamedFieldDecl {
        attrs: Vec<OuterAttr>,
        _vis: Option<Vis>,
        name: Ident,
        _colon: Col,
        ty: Vec<TokenTree>,
    }

    struct TupleFieldDecl {
        attrs: Vec<OuterAttr>,
        _vis: Option<Vis>,
        ty: Vec<TokenTree>,
    }

    /// `bind(key, rename = "x", ...)`
    struct BindAttr {
        _bind: KBind,
        args: ParenthesisGroupContaining<CommaDelimitedVec<BindArg>>,
    }

    struct BindArg {
        key: Ident,
        value: Option<Cons<AttrEq, ArgValue>>,
    }

    struct ArgValue {
        tokens: Any<Cons<Except<Comma>, TokenTree>>,
    }
}

/// A compile error anchored at a span.
#[derive(Debug)]
pub(crate) struct Error {
    pub(crate) message: String,
    pub(crate) span: Span,
}

impl Error {
    pub(crate) fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

pub(crate) type Result<T> = core::result::Result<T, Error>;

/// A parsed struct, ready for code generation.
pub(crate) struct PStruct {
    pub(crate) name: proc_macro2::Ident,
    pub(crate) attrs: ContainerAttrs,
    pub(crate) generics: Vec<GenericParam>,
    pub(crate) where_clause: Option<TokenStream>,
    pub(crate) body: PBody,
}

pub(crate) enum PBody {
    Named(Vec<PField>),
    Tuple(Vec<PField>),
    Unit,
}

pub(crate) struct PField {
    /// `None` for tuple fields
    pub(crate) ident: Option<proc_macro2::Ident>,
    pub(crate) ty: TokenStream,
    pub(crate) attrs: FieldAttrs,
    pub(crate) span: Span,
}

#[derive(Default)]
pub(crate) struct ContainerAttrs {
    pub(crate) rename_all: Option<RenameRule>,
    pub(crate) key: Option<Span>,
    pub(crate) crate_path: Option<TokenStream>,
}

#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub(crate) rename: Option<String>,
    pub(crate) default: Option<String>,
    pub(crate) skip: bool,
    pub(crate) opaque: bool,
}

pub(crate) enum GenericParam {
    Type {
        name: proc_macro2::Ident,
        bounds: TokenStream,
    },
    Const {
        name: proc_macro2::Ident,
        decl: TokenStream,
    },
}

pub(crate) fn parse_struct(input: TokenStream) -> Result<PStruct> {
    let mut iter = input.to_token_iter();
    let head: ItemHead = iter
        .parse()
        .map_err(|e| Error::new(Span::call_site(), e.to_string()))?;

    let name: proc_macro2::Ident = head.name.clone();
    match head.kind {
        ItemKind::Struct(_) => {}
        ItemKind::Enum(_) | ItemKind::Union(_) => {
            return Err(Error::new(
                name.span(),
                "#[derive(Bind)] only supports structs",
            ));
        }
    }

    let attrs = container_attrs(&head.attrs)?;
    let rest: Vec<TokenTree> = head.rest.iter().cloned().collect();
    let mut pos = 0;

    let generics = match rest.first() {
        Some(TokenTree::Punct(p)) if p.as_char() == '<' => {
            let (inner, next) = angle_bracketed(&rest, name.span())?;
            pos = next;
            generic_params(inner)?
        }
        _ => Vec::new(),
    };

    let mut where_tokens = Vec::new();
    let body = loop {
        match rest.get(pos) {
            Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Brace => {
                break PBody::Named(named_fields(g.stream(), &attrs)?);
            }
            Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Parenthesis => {
                let fields = tuple_fields(g.stream())?;
                // `struct S<T>(T) where T: X;`
                where_tokens.extend(
                    rest[pos + 1..]
                        .iter()
                        .filter(|t| !matches!(t, TokenTree::Punct(p) if p.as_char() == ';'))
                        .cloned(),
                );
                break PBody::Tuple(fields);
            }
            Some(TokenTree::Punct(p)) if p.as_char() == ';' => break PBody::Unit,
            Some(tt) => {
                where_tokens.push(tt.clone());
                pos += 1;
            }
            None => return Err(Error::new(name.span(), "expected a struct body")),
        }
    };

    let where_clause = match where_tokens.split_first() {
        Some((TokenTree::Ident(kw), preds)) if kw == "where" => {
            let preds = match preds.split_last() {
                Some((TokenTree::Punct(p), init)) if p.as_char() == ',' => init,
                _ => preds,
            };
            Some(preds.iter().cloned().collect::<TokenStream>())
        }
        Some((tt, _)) => return Err(Error::new(tt.span(), "unexpected token")),
        None => None,
    };

    if attrs.key.is_some() && !matches!(&body, PBody::Tuple(f) if f.len() == 1) {
        return Err(Error::new(
            attrs.key.unwrap_or(name.span()),
            "#[bind(key)] requires a newtype struct, e.g. `struct Name(String);`",
        ));
    }
    if let PBody::Tuple(fields) = &body {
        if fields.len() != 1 {
            return Err(Error::new(
                name.span(),
                "tuple structs must have exactly one field to derive Bind",
            ));
        }
    }

    Ok(PStruct {
        name,
        attrs,
        generics,
        where_clause,
        body,
    })
}

/// Returns the tokens between a leading `<` and its matching `>`, and the
/// index just past the `>`.
fn angle_bracketed(tokens: &[TokenTree], span: Span) -> Result<(&[TokenTree], usize)> {
    let mut depth = 0usize;
    for (i, tt) in tokens.iter().enumerate() {
        if let TokenTree::Punct(p) = tt {
            match p.as_char() {
                '<' => depth += 1,
                '>' if !is_arrow_tail(tokens, i) => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok((&tokens[1..i], i + 1));
                    }
                }
                _ => {}
            }
        }
    }
    Err(Error::new(span, "unbalanced generic parameters"))
}

// the `>` of `->` does not close anything
fn is_arrow_tail(tokens: &[TokenTree], i: usize) -> bool {
    i > 0
        && matches!(
            &tokens[i - 1],
            TokenTree::Punct(p) if p.as_char() == '-' && p.spacing() == proc_macro2::Spacing::Joint
        )
}

/// Splits on commas that are not nested inside `<...>`.
fn split_top_level(tokens: &[TokenTree]) -> Vec<&[TokenTree]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, tt) in tokens.iter().enumerate() {
        if let TokenTree::Punct(p) = tt {
            match p.as_char() {
                '<' => depth += 1,
                '>' if !is_arrow_tail(tokens, i) => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    parts.push(&tokens[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
    }
    if start < tokens.len() {
        parts.push(&tokens[start..]);
    }
    parts
}

fn generic_params(tokens: &[TokenTree]) -> Result<Vec<GenericParam>> {
    let mut params = Vec::new();
    for part in split_top_level(tokens) {
        // drop `= Default`
        let part = match part
            .iter()
            .position(|t| matches!(t, TokenTree::Punct(p) if p.as_char() == '='))
        {
            Some(eq) => &part[..eq],
            None => part,
        };
        match part {
            [TokenTree::Punct(p), ..] if p.as_char() == '\'' => {
                return Err(Error::new(
                    p.span(),
                    "Bind types must be 'static; lifetime parameters are not supported",
                ));
            }
            [TokenTree::Ident(kw), TokenTree::Ident(name), ..] if kw == "const" => {
                params.push(GenericParam::Const {
                    name: name.clone(),
                    decl: part.iter().cloned().collect(),
                });
            }
            [TokenTree::Ident(name), rest @ ..] => {
                let bounds = match rest {
                    [TokenTree::Punct(p), bounds @ ..] if p.as_char() == ':' => {
                        bounds.iter().cloned().collect()
                    }
                    _ => TokenStream::new(),
                };
                params.push(GenericParam::Type {
                    name: name.clone(),
                    bounds,
                });
            }
            [tt, ..] => return Err(Error::new(tt.span(), "unsupported generic parameter")),
            [] => {}
        }
    }
    Ok(params)
}

fn named_fields(body: TokenStream, container: &ContainerAttrs) -> Result<Vec<PField>> {
    let tokens: Vec<TokenTree> = body.into_iter().collect();
    let mut fields = Vec::new();
    for part in split_top_level(&tokens) {
        let stream: TokenStream = part.iter().cloned().collect();
        let span = part.first().map_or_else(Span::call_site, TokenTree::span);
        let decl: NamedFieldDecl = stream
            .to_token_iter()
            .parse()
            .map_err(|e| Error::new(span, e.to_string()))?;

        let ident: proc_macro2::Ident = decl.name.clone();
        let mut attrs = field_attrs(&decl.attrs)?;
        if attrs.rename.is_none() {
            let raw = ident.to_string();
            let raw = raw.strip_prefix("r#").unwrap_or(&raw);
            attrs.rename = container.rename_all.map(|rule| rule.apply(raw));
        }

        fields.push(PField {
            span: ident.span(),
            ident: Some(ident),
            ty: decl.ty.iter().map(|t| t.to_token_stream()).collect(),
            attrs,
        });
    }
    Ok(fields)
}

fn tuple_fields(body: TokenStream) -> Result<Vec<PField>> {
    let tokens: Vec<TokenTree> = body.into_iter().collect();
    let mut fields = Vec::new();
    for part in split_top_level(&tokens) {
        let stream: TokenStream = part.iter().cloned().collect();
        let span = part.first().map_or_else(Span::call_site, TokenTree::span);
        let decl: TupleFieldDecl = stream
            .to_token_iter()
            .parse()
            .map_err(|e| Error::new(span, e.to_string()))?;
        let attrs = field_attrs(&decl.attrs)?;
        if attrs.rename.is_some() || attrs.default.is_some() || attrs.skip || attrs.opaque {
            return Err(Error::new(
                span,
                "newtype fields are transparent and take no #[bind] attributes",
            ));
        }
        fields.push(PField {
            ident: None,
            ty: decl.ty.iter().map(|t| t.to_token_stream()).collect(),
            attrs,
            span,
        });
    }
    Ok(fields)
}

/// Yields `(key, value tokens, span)` for every argument of every
/// `#[bind(...)]` attribute in `attrs`.
fn bind_args(attrs: &[OuterAttr]) -> Result<Vec<(String, Option<Vec<TokenTree>>, Span)>> {
    let mut out = Vec::new();
    for attr in attrs {
        let content = attr.content.0.stream();
        let is_bind = matches!(content.clone().into_iter().next(), Some(TokenTree::Ident(i)) if i == "bind");
        if !is_bind {
            continue;
        }
        let span = attr.content.0.span();
        let parsed: BindAttr = content
            .to_token_iter()
            .parse()
            .map_err(|e| Error::new(span, format!("malformed #[bind] attribute: {e}")))?;
        for arg in parsed.args.content.iter() {
            let arg = &arg.value;
            let key: proc_macro2::Ident = arg.key.clone();
            let value = arg.value.as_ref().map(|v| {
                v.second
                    .tokens
                    .iter()
                    .map(|t| t.value.second.clone())
                    .collect::<Vec<TokenTree>>()
            });
            out.push((key.to_string(), value, key.span()));
        }
    }
    Ok(out)
}

fn container_attrs(attrs: &[OuterAttr]) -> Result<ContainerAttrs> {
    let mut out = ContainerAttrs::default();
    for (key, value, span) in bind_args(attrs)? {
        match (key.as_str(), value) {
            ("rename_all", Some(v)) => {
                let rule = string_literal(&v)
                    .and_then(|s| RenameRule::parse(&s))
                    .ok_or_else(|| {
                        Error::new(
                            span,
                            format!("rename_all expects one of {}", RenameRule::ACCEPTED),
                        )
                    })?;
                out.rename_all = Some(rule);
            }
            ("key", None) => out.key = Some(span),
            ("crate", Some(v)) if !v.is_empty() => out.crate_path = Some(v.into_iter().collect()),
            ("rename_all" | "crate", _) => {
                return Err(Error::new(span, format!("`{key}` expects `{key} = ...`")));
            }
            ("key", Some(_)) => return Err(Error::new(span, "`key` takes no value")),
            _ => {
                return Err(Error::new(
                    span,
                    format!(
                        "unknown container attribute `{key}`; expected `rename_all`, `key` or `crate`"
                    ),
                ));
            }
        }
    }
    Ok(out)
}

fn field_attrs(attrs: &[OuterAttr]) -> Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for (key, value, span) in bind_args(attrs)? {
        match (key.as_str(), value) {
            ("rename", Some(v)) => {
                out.rename = Some(
                    string_literal(&v)
                        .ok_or_else(|| Error::new(span, "rename expects a string literal"))?,
                );
            }
            ("default", Some(v)) => {
                out.default = Some(default_literal(&v).ok_or_else(|| {
                    Error::new(
                        span,
                        "default expects a string, number or bool literal, e.g. `default = \"8080\"`",
                    )
                })?);
            }
            ("skip", None) => out.skip = true,
            ("opaque", None) => out.opaque = true,
            ("rename" | "default", None) => {
                return Err(Error::new(span, format!("`{key}` expects `{key} = ...`")));
            }
            ("skip" | "opaque", Some(_)) => {
                return Err(Error::new(span, format!("`{key}` takes no value")));
            }
            _ => {
                return Err(Error::new(
                    span,
                    format!(
                        "unknown field attribute `{key}`; expected `rename`, `default`, `skip` or `opaque`"
                    ),
                ));
            }
        }
    }
    if out.skip && (out.opaque || out.default.is_some() || out.rename.is_some()) {
        return Err(Error::new(
            Span::call_site(),
            "`skip` cannot be combined with other #[bind] field attributes",
        ));
    }
    Ok(out)
}

fn string_literal(tokens: &[TokenTree]) -> Option<String> {
    let [TokenTree::Literal(lit)] = tokens else {
        return None;
    };
    unquote(&lit.to_string())
}

/// Contents of a `"..."` or `r#"..."#` literal, escapes resolved.
fn unquote(text: &str) -> Option<String> {
    if let Some(raw) = text.strip_prefix('r') {
        let hashes = raw.len() - raw.trim_start_matches('#').len();
        let body = raw.get(hashes..raw.len() - hashes)?;
        return Some(body.strip_prefix('"')?.strip_suffix('"')?.to_string());
    }

    let body = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            _ => return None,
        }
    }
    Some(out)
}

/// A string literal's contents, or the source text of a numeric or bool
/// literal (with an optional leading `-`).
fn default_literal(tokens: &[TokenTree]) -> Option<String> {
    if let Some(s) = string_literal(tokens) {
        return Some(s);
    }
    match tokens {
        [TokenTree::Ident(b)] if b == "true" || b == "false" => Some(b.to_string()),
        [TokenTree::Literal(l)] => numeric(l),
        [TokenTree::Punct(minus), TokenTree::Literal(l)] if minus.as_char() == '-' => {
            numeric(l).map(|n| format!("-{n}"))
        }
        _ => None,
    }
}

fn numeric(lit: &proc_macro2::Literal) -> Option<String> {
    let text = lit.to_string();
    text.starts_with(|c: char| c.is_ascii_digit()).then_some(text)
}
