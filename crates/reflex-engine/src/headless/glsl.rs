use std::collections::HashSet;

use crate::device::ShaderStage;
use crate::program::DataKind;

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Number(String),
    Punct(char),
    Eof,
}

#[derive(Debug, Clone)]
struct Spanned {
    tok: Token,
    line: u32,
}

/// Compile diagnostic, formatted the way GL drivers print info logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: u32,
    pub message: String,
}

impl Diagnostic {
    fn new(line: u32, message: impl Into<String>) -> Self {
        Self { line, message: message.into() }
    }

    pub fn to_log(&self) -> String {
        format!("ERROR: 0:{}: {}\n", self.line, self.message)
    }
}

// ── Interface ─────────────────────────────────────────────────────────────

/// GLSL dialect a stage declares with `#version`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Dialect {
    Es100,
    Es300,
}

/// One global `attribute`/`uniform`/`varying`/`in`/`out` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub kind: DataKind,
    /// Array length, `None` for non-arrays.
    pub array: Option<u32>,
    /// `layout(location = N)`, if given.
    pub location: Option<u32>,
}

impl Declaration {
    pub fn size(&self) -> i32 {
        self.array.map_or(1, |n| i32::try_from(n).unwrap_or(i32::MAX))
    }
}

/// Largest array length a declaration may have.
pub const MAX_ARRAY_LEN: u32 = 4096;

/// What a compiled stage exposes to the linker.
#[derive(Debug, Clone)]
pub struct ShaderInterface {
    pub dialect: Dialect,
    pub attributes: Vec<Declaration>,
    pub uniforms: Vec<Declaration>,
    /// Varyings read (fragment) or written (vertex) across the stage boundary.
    pub inputs: Vec<Declaration>,
    pub outputs: Vec<Declaration>,
    /// Identifiers appearing in any function body.
    pub referenced: HashSet<String>,
    /// Color `main` writes when its body is a single constant store.
    pub constant_output: Option<[f32; 4]>,
}

impl ShaderInterface {
    pub fn is_referenced(&self, name: &str) -> bool {
        self.referenced.contains(name)
    }
}

// ── Lexer ─────────────────────────────────────────────────────────────────

struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    line: u32,
    at_line_start: bool,
    version: Option<(String, u32)>,
}

impl<'s> Lexer<'s> {
    fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1, at_line_start: true, version: None }
    }

    fn tokenize(mut self) -> Result<(Vec<Spanned>, Option<(String, u32)>), Diagnostic> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let eof = tok.tok == Token::Eof;
            tokens.push(tok);
            if eof {
                break;
            }
        }
        Ok((tokens, self.version))
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.at_line_start = true;
        } else if !ch.is_whitespace() {
            self.at_line_start = false;
        }
        Some(ch)
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn skip_trivia(&mut self) -> Result<(), Diagnostic> {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.advance();
            }
            if self.rest().starts_with("//") {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.advance();
                }
            } else if self.rest().starts_with("/*") {
                let line = self.line;
                self.advance();
                self.advance();
                loop {
                    if self.rest().starts_with("*/") {
                        self.advance();
                        self.advance();
                        break;
                    }
                    if self.advance().is_none() {
                        return Err(Diagnostic::new(line, "unterminated comment"));
                    }
                }
            } else if self.at_line_start && self.peek() == Some('#') {
                self.directive()?;
            } else {
                return Ok(());
            }
        }
    }

    fn directive(&mut self) -> Result<(), Diagnostic> {
        let line = self.line;
        let start = self.pos;
        while !matches!(self.peek(), None | Some('\n')) {
            self.advance();
        }
        let text = self.src[start..self.pos].trim_start_matches('#').trim();
        if let Some(rest) = text.strip_prefix("version") {
            if self.version.is_some() {
                return Err(Diagnostic::new(line, "'#version' : must occur only once"));
            }
            self.version = Some((rest.trim().to_string(), line));
        }
        Ok(())
    }

    fn next_token(&mut self) -> Result<Spanned, Diagnostic> {
        self.skip_trivia()?;
        let line = self.line;

        let Some(ch) = self.peek() else {
            return Ok(Spanned { tok: Token::Eof, line });
        };

        let tok = match ch {
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = self.pos;
                while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
                    self.advance();
                }
                Token::Ident(self.src[start..self.pos].to_string())
            }
            c if c.is_ascii_digit() || (c == '.' && self.rest()[1..].starts_with(|d: char| d.is_ascii_digit())) => {
                let start = self.pos;
                while let Some(c) = self.peek() {
                    let exponent_sign = (c == '+' || c == '-')
                        && matches!(self.src[..self.pos].chars().last(), Some('e' | 'E'));
                    if c.is_ascii_alphanumeric() || c == '.' || exponent_sign {
                        self.advance();
                    } else {
                        break;
                    }
                }
                Token::Number(self.src[start..self.pos].to_string())
            }
            c if c.is_ascii_punctuation() => {
                self.advance();
                Token::Punct(c)
            }
            other => {
                return Err(Diagnostic::new(line, format!("'{other}' : invalid character")));
            }
        };

        Ok(Spanned { tok, line })
    }
}

// ── Scanner ───────────────────────────────────────────────────────────────

const STORAGE: &[&str] = &["attribute", "uniform", "varying", "in", "out", "const"];
const QUALIFIERS: &[&str] = &[
    "highp", "mediump", "lowp", "flat", "smooth", "centroid", "invariant",
];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Storage {
    Attribute,
    Uniform,
    Varying,
    In,
    Out,
    Const,
    Global,
}

/// Scans a stage's source down to its interface.
///
/// This is a declaration-level check, not a full GLSL front end: expressions
/// inside function bodies are only tokenized, never typed.
pub fn scan(stage: ShaderStage, source: &str) -> Result<ShaderInterface, Diagnostic> {
    let (tokens, version) = Lexer::new(source).tokenize()?;

    let dialect = match version {
        None => Dialect::Es100,
        Some((v, _)) if v == "100" => Dialect::Es100,
        Some((v, _)) if v.split_whitespace().eq(["300", "es"]) => Dialect::Es300,
        Some((v, line)) => {
            return Err(Diagnostic::new(line, format!("'{v}' : version number not supported")));
        }
    };

    Scanner {
        stage,
        dialect,
        tokens,
        pos: 0,
        structs: HashSet::new(),
        iface: ShaderInterface {
            dialect,
            attributes: Vec::new(),
            uniforms: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            referenced: HashSet::new(),
            constant_output: None,
        },
        has_main: false,
        main_body: None,
    }
    .run()
}

struct Scanner {
    stage: ShaderStage,
    dialect: Dialect,
    tokens: Vec<Spanned>,
    pos: usize,
    structs: HashSet<String>,
    iface: ShaderInterface,
    has_main: bool,
    main_body: Option<(usize, usize)>,
}

impl Scanner {
    fn run(mut self) -> Result<ShaderInterface, Diagnostic> {
        while !self.at_eof() {
            self.item()?;
        }
        if !self.has_main {
            return Err(Diagnostic::new(self.line(), "'main' : function not defined"));
        }
        self.iface.constant_output = self.constant_output();
        Ok(self.iface)
    }

    // ── cursor ────────────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)].tok
    }

    fn line(&self) -> u32 {
        self.tokens[self.pos.min(self.tokens.len() - 1)].line
    }

    fn at_eof(&self) -> bool {
        *self.peek() == Token::Eof
    }

    fn bump(&mut self) -> Token {
        let tok = self.peek().clone();
        if tok != Token::Eof {
            self.pos += 1;
        }
        tok
    }

    fn peek_ident(&self) -> Option<&str> {
        match self.peek() {
            Token::Ident(s) => Some(s),
            _ => None,
        }
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if *self.peek() == Token::Punct(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char) -> Result<(), Diagnostic> {
        if self.eat_punct(c) {
            Ok(())
        } else {
            Err(self.syntax_error(&format!("'{c}'")))
        }
    }

    fn expect_ident(&mut self) -> Result<String, Diagnostic> {
        match self.peek() {
            Token::Ident(s) => {
                let s = s.clone();
                self.pos += 1;
                Ok(s)
            }
            _ => Err(self.syntax_error("identifier")),
        }
    }

    fn syntax_error(&self, expected: &str) -> Diagnostic {
        let found = match self.peek() {
            Token::Ident(s) | Token::Number(s) => format!("'{s}'"),
            Token::Punct(c) => format!("'{c}'"),
            Token::Eof => "end of file".to_string(),
        };
        Diagnostic::new(self.line(), format!("{found} : syntax error, expected {expected}"))
    }

    /// Consumes a balanced group opened by the current token, returning the
    /// token range strictly inside it.
    fn skip_group(&mut self, open: char, close: char) -> Result<(usize, usize), Diagnostic> {
        let line = self.line();
        self.expect_punct(open)?;
        let start = self.pos;
        let mut depth = 1usize;
        loop {
            match self.bump() {
                Token::Punct(c) if c == open => depth += 1,
                Token::Punct(c) if c == close => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok((start, self.pos - 1));
                    }
                }
                Token::Punct(c @ ('(' | '[' | '{')) => {
                    self.pos -= 1;
                    let (o, cl) = match c {
                        '(' => ('(', ')'),
                        '[' => ('[', ']'),
                        _ => ('{', '}'),
                    };
                    self.skip_group(o, cl)?;
                }
                Token::Punct(c @ (')' | ']' | '}')) => {
                    return Err(Diagnostic::new(self.line(), format!("'{c}' : unbalanced")));
                }
                Token::Eof => {
                    return Err(Diagnostic::new(line, format!("'{open}' : missing matching '{close}'")));
                }
                _ => {}
            }
        }
    }

    // ── items ─────────────────────────────────────────────────────────────

    fn item(&mut self) -> Result<(), Diagnostic> {
        if self.eat_punct(';') {
            return Ok(());
        }

        match self.peek_ident() {
            Some("precision") => {
                self.bump();
                while !self.eat_punct(';') {
                    if self.at_eof() {
                        return Err(self.syntax_error("';'"));
                    }
                    self.bump();
                }
                return Ok(());
            }
            Some("struct") => return self.struct_definition(),
            _ => {}
        }

        let location = self.layout()?;
        let storage = self.storage()?;
        while matches!(self.peek_ident(), Some(q) if QUALIFIERS.contains(&q)) {
            self.bump();
        }

        let type_line = self.line();
        let type_name = self.expect_ident()?;
        let kind = DataKind::from_glsl_type(&type_name);
        if kind.is_none() && type_name != "void" && !self.structs.contains(&type_name) {
            return Err(Diagnostic::new(type_line, format!("'{type_name}' : unknown type")));
        }

        let name = self.expect_ident()?;

        if *self.peek() == Token::Punct('(') {
            return self.function(&type_name, &name);
        }

        let mut name = name;
        loop {
            let array = self.array_suffix()?;
            if self.eat_punct('=') {
                self.initializer()?;
            }
            if let Some(kind) = kind {
                self.record(storage, Declaration { name: name.clone(), kind, array, location }, type_line)?;
            }
            if self.eat_punct(';') {
                return Ok(());
            }
            self.expect_punct(',')?;
            name = self.expect_ident()?;
        }
    }

    fn layout(&mut self) -> Result<Option<u32>, Diagnostic> {
        if self.peek_ident() != Some("layout") {
            return Ok(None);
        }
        self.bump();
        let line = self.line();
        let (start, end) = self.skip_group('(', ')')?;
        let inner = &self.tokens[start..end];
        let value = inner.windows(3).find_map(|w| match (&w[0].tok, &w[1].tok, &w[2].tok) {
            (Token::Ident(k), Token::Punct('='), Token::Number(n)) if k == "location" => Some(n),
            _ => None,
        });
        match value {
            None => Ok(None),
            Some(n) => n.parse::<u32>().map(Some).map_err(|_| {
                Diagnostic::new(line, format!("'{n}' : location out of range"))
            }),
        }
    }

    fn storage(&mut self) -> Result<Storage, Diagnostic> {
        let Some(word) = self.peek_ident().filter(|w| STORAGE.contains(w)) else {
            return Ok(Storage::Global);
        };
        let storage = match word {
            "attribute" => Storage::Attribute,
            "uniform" => Storage::Uniform,
            "varying" => Storage::Varying,
            "in" => Storage::In,
            "out" => Storage::Out,
            _ => Storage::Const,
        };

        let legal = match (self.dialect, storage) {
            (Dialect::Es100, Storage::In | Storage::Out) => false,
            (Dialect::Es300, Storage::Attribute | Storage::Varying) => false,
            (_, Storage::Attribute) => self.stage == ShaderStage::Vertex,
            _ => true,
        };
        if !legal {
            return Err(Diagnostic::new(
                self.line(),
                format!("'{word}' : storage qualifier not allowed here"),
            ));
        }

        self.bump();
        Ok(storage)
    }

    fn array_suffix(&mut self) -> Result<Option<u32>, Diagnostic> {
        if *self.peek() != Token::Punct('[') {
            return Ok(None);
        }
        let line = self.line();
        let (start, end) = self.skip_group('[', ']')?;
        match &self.tokens[start..end] {
            [Spanned { tok: Token::Number(n), .. }] => match n.parse::<u32>() {
                Ok(len) if len > MAX_ARRAY_LEN => {
                    Err(Diagnostic::new(line, format!("'{n}' : array size exceeds {MAX_ARRAY_LEN}")))
                }
                Ok(len) if len > 0 => Ok(Some(len)),
                _ => Err(Diagnostic::new(line, format!("'{n}' : array size must be a positive integer"))),
            },
            _ => Err(Diagnostic::new(line, "array size must be a constant integer")),
        }
    }

    fn initializer(&mut self) -> Result<(), Diagnostic> {
        loop {
            match self.peek() {
                Token::Punct(',' | ';') => return Ok(()),
                Token::Punct('(') => {
                    self.skip_group('(', ')')?;
                }
                Token::Eof => return Err(self.syntax_error("';'")),
                _ => {
                    if let Token::Ident(id) = self.bump() {
                        self.iface.referenced.insert(id);
                    }
                }
            }
        }
    }

    fn record(&mut self, storage: Storage, decl: Declaration, line: u32) -> Result<(), Diagnostic> {
        let list = match (storage, self.stage) {
            (Storage::Attribute, _) | (Storage::In, ShaderStage::Vertex) => &mut self.iface.attributes,
            (Storage::Uniform, _) => &mut self.iface.uniforms,
            (Storage::Varying | Storage::Out, ShaderStage::Vertex) => &mut self.iface.outputs,
            (Storage::Varying | Storage::In, ShaderStage::Fragment) => &mut self.iface.inputs,
            (Storage::Out, ShaderStage::Fragment) | (Storage::Const | Storage::Global, _) => {
                return Ok(());
            }
        };
        if list.iter().any(|d| d.name == decl.name) {
            return Err(Diagnostic::new(line, format!("'{}' : redefinition", decl.name)));
        }
        list.push(decl);
        Ok(())
    }

    fn struct_definition(&mut self) -> Result<(), Diagnostic> {
        self.bump();
        let name = self.expect_ident()?;
        self.skip_group('{', '}')?;
        self.structs.insert(name);
        // `struct S { .. } s;` declares a global too; its members are never
        // reflected.
        while !self.eat_punct(';') {
            if self.at_eof() {
                return Err(self.syntax_error("';'"));
            }
            self.bump();
        }
        Ok(())
    }

    fn function(&mut self, return_type: &str, name: &str) -> Result<(), Diagnostic> {
        self.skip_group('(', ')')?;
        if self.eat_punct(';') {
            return Ok(());
        }

        let (start, end) = self.skip_group('{', '}')?;
        for tok in &self.tokens[start..end] {
            if let Token::Ident(id) = &tok.tok {
                self.iface.referenced.insert(id.clone());
            }
        }

        if name == "main" {
            if return_type != "void" {
                return Err(Diagnostic::new(self.line(), "'main' : must return void"));
            }
            self.has_main = true;
            self.main_body = Some((start, end));
        }
        Ok(())
    }

    /// Recognizes a `main` that is exactly `<out> = vec4(<consts>);`.
    fn constant_output(&self) -> Option<[f32; 4]> {
        if self.stage != ShaderStage::Fragment {
            return None;
        }
        let (start, end) = self.main_body?;
        let body: Vec<&Token> = self.tokens[start..end].iter().map(|t| &t.tok).collect();

        let outputs: HashSet<&str> =
            std::iter::once("gl_FragColor").chain(self.fragment_outs()).collect();

        let [Token::Ident(target), Token::Punct('='), Token::Ident(ctor), Token::Punct('('), args @ .., Token::Punct(')'), Token::Punct(';')] =
            body.as_slice()
        else {
            return None;
        };
        if !outputs.contains(target.as_str()) || ctor != "vec4" {
            return None;
        }

        let mut values = Vec::new();
        let mut negate = false;
        for (i, tok) in args.iter().enumerate() {
            match tok {
                Token::Punct('-') => negate = true,
                Token::Number(n) => {
                    let v: f32 = n.trim_end_matches(['f', 'F']).parse().ok()?;
                    values.push(if negate { -v } else { v });
                    negate = false;
                }
                Token::Punct(',') if i > 0 => {}
                _ => return None,
            }
        }

        match values.as_slice() {
            &[v] => Some([v; 4]),
            &[r, g, b, a] => Some([r, g, b, a]),
            _ => None,
        }
    }

    fn fragment_outs(&self) -> Vec<&str> {
        // Fragment `out`s are not recorded as interface entries, so pick
        // them back out of the token stream.
        self.tokens
            .windows(3)
            .filter_map(|w| match (&w[0].tok, &w[1].tok, &w[2].tok) {
                (Token::Ident(q), Token::Ident(ty), Token::Ident(name))
                    if q == "out" && DataKind::from_glsl_type(ty).is_some() =>
                {
                    Some(name.as_str())
                }
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(src: &str) -> ShaderInterface {
        scan(ShaderStage::Vertex, src).unwrap_or_else(|d| panic!("{}", d.to_log()))
    }

    fn fragment(src: &str) -> ShaderInterface {
        scan(ShaderStage::Fragment, src).unwrap_or_else(|d| panic!("{}", d.to_log()))
    }

    // ── declarations ──────────────────────────────────────────────────────

    #[test]
    fn collects_vertex_interface() {
        let iface = vertex(
            "#version 100\n\
             attribute vec2 a_Pos, a_Uv;\n\
             uniform mat4 u_Mvp;\n\
             uniform float u_Weights[4];\n\
             varying vec2 v_Uv;\n\
             void main() { v_Uv = a_Uv; gl_Position = u_Mvp * vec4(a_Pos, 0.0, 1.0); }\n",
        );
        let names: Vec<_> = iface.attributes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a_Pos", "a_Uv"]);
        assert_eq!(iface.uniforms[1].array, Some(4));
        assert_eq!(iface.outputs[0].name, "v_Uv");
        assert!(iface.is_referenced("u_Mvp"));
        assert!(!iface.is_referenced("u_Weights"));
    }

    #[test]
    fn comments_and_directives_are_ignored() {
        let iface = vertex(
            "// header\n#define FOO 1\n/* attribute vec3 a_Hidden; */\n\
             attribute vec3 a_Pos; // trailing\n\
             void main() { gl_Position = vec4(a_Pos, 1.0); }",
        );
        assert_eq!(iface.attributes.len(), 1);
        assert_eq!(iface.dialect, Dialect::Es100);
    }

    #[test]
    fn es300_layout_locations() {
        let iface = vertex(
            "#version 300 es\n\
             layout(location = 3) in vec4 a_Color;\n\
             out vec4 v_Color;\n\
             void main() { v_Color = a_Color; gl_Position = vec4(0.0); }",
        );
        assert_eq!(iface.dialect, Dialect::Es300);
        assert_eq!(iface.attributes[0].location, Some(3));
    }

    #[test]
    fn out_of_range_locations_and_array_sizes_are_rejected() {
        let err = scan(
            ShaderStage::Vertex,
            "#version 300 es\nlayout(location = 4294967296) in vec4 a_P;\n\
             void main() { gl_Position = a_P; }",
        )
        .unwrap_err();
        assert_eq!(err.to_log(), "ERROR: 0:2: '4294967296' : location out of range\n");

        let err = scan(
            ShaderStage::Vertex,
            "uniform vec4 u_Big[4294967295];\nvoid main() { gl_Position = u_Big[0]; }",
        )
        .unwrap_err();
        assert!(err.to_log().contains("array size exceeds 4096"), "{}", err.to_log());

        let iface = vertex(
            "uniform vec4 u_Max[4096];\nvoid main() { gl_Position = u_Max[0]; }",
        );
        assert_eq!(iface.uniforms[0].size(), 4096);
    }

    #[test]
    fn structs_are_known_types() {
        let iface = fragment(
            "precision mediump float;\n\
             struct Light { vec3 dir; float power; };\n\
             uniform Light u_Light;\n\
             uniform float u_Gain;\n\
             void main() { gl_FragColor = vec4(u_Gain); }",
        );
        assert_eq!(iface.uniforms.len(), 1);
    }

    // ── diagnostics ───────────────────────────────────────────────────────

    #[test]
    fn missing_main_is_an_error() {
        let err = scan(ShaderStage::Fragment, "precision lowp float;").unwrap_err();
        assert!(err.message.contains("main"));
    }

    #[test]
    fn unbalanced_braces_are_an_error() {
        assert!(scan(ShaderStage::Vertex, "void main( {").is_err());
        assert!(scan(ShaderStage::Vertex, "void main() { if (true) { }").is_err());
    }

    #[test]
    fn dialect_specific_storage_is_checked() {
        assert!(scan(ShaderStage::Vertex, "#version 300 es\nattribute vec2 a;\nvoid main() {}").is_err());
        assert!(scan(ShaderStage::Vertex, "in vec2 a;\nvoid main() {}").is_err());
        assert!(scan(ShaderStage::Fragment, "attribute vec2 a;\nvoid main() {}").is_err());
    }

    #[test]
    fn diagnostics_carry_line_numbers() {
        let err = scan(ShaderStage::Vertex, "\n\nuniform vex3 u_X;\nvoid main() {}").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.to_log(), "ERROR: 0:3: 'vex3' : unknown type\n");
    }

    // ── constant output ───────────────────────────────────────────────────

    #[test]
    fn detects_constant_fragment_color() {
        let iface = fragment("void main() { gl_FragColor = vec4(0.0); }");
        assert_eq!(iface.constant_output, Some([0.0; 4]));

        let iface = fragment(
            "#version 300 es\nprecision lowp float;\nout vec4 o;\n\
             void main() { o = vec4(1.0, 0.5, -0.25, 1.0); }",
        );
        assert_eq!(iface.constant_output, Some([1.0, 0.5, -0.25, 1.0]));
    }

    #[test]
    fn varying_output_is_not_constant() {
        let iface = fragment(
            "precision lowp float;\nuniform float u_T;\nvoid main() { gl_FragColor = vec4(u_T); }",
        );
        assert_eq!(iface.constant_output, None);
    }
}
