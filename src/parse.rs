use crate::buffer::SourceBuffer;
use crate::errors::RewriteError;
use crate::span::Span;
use crate::tree::{NodeId, NodeKind, SyntaxTree};

/// Parser boundary: anything that can turn a buffer into a tree.
///
/// The engine does not care where the tree comes from; a real language
/// front-end can be plugged in here. The built-in [`ClassScanner`] covers the
/// TypeScript-like subset the rewriter targets.
pub trait Frontend {
    fn parse(&self, buffer: &SourceBuffer) -> Result<SyntaxTree, RewriteError>;
}

/// Built-in heuristic front-end for class/decorator syntax.
///
/// A single pass over the bytes, aware of strings and comments, tracking
/// brace depth. It recognizes:
/// - `@name` / `@name(...)` decorators,
/// - a decorated declaration header `name(params) [: type]` followed by a
///   `{` body (a `MethodDeclaration` with a `Block` child) or a `;`
///   (declaration-only, no block),
/// - a decorated `{` with no method header (for example a decorated class),
///   folded into an `Other` declaration node,
/// - every other `{...}` as a plain `Block`.
///
/// Undecorated methods are not modeled as declarations; their bodies still
/// appear as nested blocks, which is all the rewriter needs.
#[derive(Debug, Clone, Default)]
pub struct ClassScanner;

impl Frontend for ClassScanner {
    fn parse(&self, buffer: &SourceBuffer) -> Result<SyntaxTree, RewriteError> {
        Scanner::new(buffer.text()).run()
    }
}

/// Stack entry while scanning.
enum Open {
    /// The root node or an open `{` block: accepts children.
    Container(NodeId),
    /// A decorated declaration waiting for its body block to close.
    Decl(NodeId),
}

struct Scanner<'a> {
    bytes: &'a [u8],
    i: usize,
    tree: SyntaxTree,
    stack: Vec<Open>,
    /// Decorators parsed but not yet attached to a declaration.
    pending: Vec<NodeId>,
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b == b'.'
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        let mut tree = SyntaxTree::new();
        let root = tree.push(NodeKind::Other, Span::new(0, text.len() as u32));
        tree.set_root(root);
        Self {
            bytes: text.as_bytes(),
            i: 0,
            tree,
            stack: vec![Open::Container(root)],
            pending: Vec::new(),
        }
    }

    fn run(mut self) -> Result<SyntaxTree, RewriteError> {
        while self.i < self.bytes.len() {
            match self.bytes[self.i] {
                b'/' => self.skip_comment_or_advance()?,
                b'"' | b'\'' | b'`' => self.skip_string()?,
                b'@' => self.decorator()?,
                b'{' => {
                    if self.pending.is_empty() {
                        self.open_block();
                    } else {
                        // Decorated non-method declaration (for example a class).
                        self.open_decl(NodeKind::Other);
                    }
                }
                b'}' => self.close_block()?,
                b if is_ident_start(b) => {
                    let _ = self.read_ident();
                    if !self.pending.is_empty() {
                        self.try_decl_header()?;
                    }
                }
                _ => self.i += 1,
            }
        }

        if self.stack.len() != 1 {
            return Err(RewriteError::ParseFailure {
                reason: "unbalanced braces at end of input".to_string(),
            });
        }

        // Decorators with nothing following stay attached to the root so the
        // excisor can report them instead of losing them.
        let root = self.tree.root().expect("scanner always sets a root");
        for deco in std::mem::take(&mut self.pending) {
            self.tree.attach(root, deco);
        }

        Ok(self.tree)
    }

    fn top_container(&self) -> NodeId {
        match self.stack.last() {
            Some(Open::Container(id)) => *id,
            // A Decl frame is always covered by its body block's Container
            // frame, pushed in the same step.
            _ => unreachable!("scanner stack top is always a container"),
        }
    }

    /// Parse `@name` with an optional balanced `(...)` argument list.
    fn decorator(&mut self) -> Result<(), RewriteError> {
        let start = self.i;
        self.i += 1;

        if self.i >= self.bytes.len() || !is_ident_start(self.bytes[self.i]) {
            return Ok(()); // a stray '@', not a decorator
        }
        while self.i < self.bytes.len() && is_ident_continue(self.bytes[self.i]) {
            self.i += 1;
        }

        let after_name = self.i;
        self.skip_trivia()?;
        let end = if self.i < self.bytes.len() && self.bytes[self.i] == b'(' {
            self.consume_parens()?;
            self.i
        } else {
            after_name
        };

        let span = Span::new(start as u32, (end - start) as u32);
        let deco = self.tree.push(NodeKind::Decorator, span);
        self.pending.push(deco);
        Ok(())
    }

    /// After an identifier with pending decorators, look for
    /// `(params) [: type]` followed by `{` or `;`.
    fn try_decl_header(&mut self) -> Result<(), RewriteError> {
        self.skip_trivia()?;
        if self.i >= self.bytes.len() || self.bytes[self.i] != b'(' {
            return Ok(()); // modifier or keyword; keep scanning
        }
        self.consume_parens()?;
        self.skip_trivia()?;

        if self.i < self.bytes.len() && self.bytes[self.i] == b':' {
            self.i += 1;
            self.scan_to_body_or_semi()?;
        }
        self.skip_trivia()?;

        match self.bytes.get(self.i) {
            Some(b'{') => self.open_decl(NodeKind::MethodDeclaration),
            Some(b';') => {
                // Declaration-only method: no body block.
                self.i += 1;
                let start = self.tree.node(self.pending[0]).span.start;
                let span = Span::new(start, self.i as u32 - start);
                let decl = self.tree.push(NodeKind::MethodDeclaration, span);
                for deco in std::mem::take(&mut self.pending) {
                    self.tree.attach(decl, deco);
                }
                let container = self.top_container();
                self.tree.attach(container, decl);
            }
            _ => {} // fizzled header; decorators stay pending
        }
        Ok(())
    }

    /// Open a decorated declaration node plus its body block.
    ///
    /// Expects the cursor on the body's `{`. The declaration's span starts at
    /// its first decorator and is extended when the body closes.
    fn open_decl(&mut self, kind: NodeKind) {
        let start = self.tree.node(self.pending[0]).span.start;
        let decl = self.tree.push(kind, Span::new(start, 0));
        for deco in std::mem::take(&mut self.pending) {
            self.tree.attach(decl, deco);
        }
        self.stack.push(Open::Decl(decl));
        self.open_block();
    }

    fn open_block(&mut self) {
        let block = self.tree.push(NodeKind::Block, Span::new(self.i as u32, 0));
        self.stack.push(Open::Container(block));
        self.i += 1;
    }

    fn close_block(&mut self) -> Result<(), RewriteError> {
        if self.stack.len() == 1 {
            return Err(RewriteError::ParseFailure {
                reason: format!("unexpected `}}` at offset {}", self.i),
            });
        }

        let Some(Open::Container(block)) = self.stack.pop() else {
            unreachable!("scanner stack top is always a container");
        };

        // Decorators dangling inside this block belong to it.
        for deco in std::mem::take(&mut self.pending) {
            self.tree.attach(block, deco);
        }

        self.i += 1;
        let end = self.i as u32;
        let node = self.tree.node_mut(block);
        node.span.len = end - node.span.start;

        if matches!(self.stack.last(), Some(Open::Decl(_))) {
            let Some(Open::Decl(decl)) = self.stack.pop() else {
                unreachable!("top frame was just checked");
            };
            self.tree.attach(decl, block);
            let node = self.tree.node_mut(decl);
            node.span.len = end - node.span.start;
            let container = self.top_container();
            self.tree.attach(container, decl);
        } else {
            let container = self.top_container();
            self.tree.attach(container, block);
        }
        Ok(())
    }

    fn read_ident(&mut self) -> Span {
        let start = self.i;
        while self.i < self.bytes.len() && is_ident_continue(self.bytes[self.i]) {
            self.i += 1;
        }
        Span::new(start as u32, (self.i - start) as u32)
    }

    /// Consume a balanced parenthesis group, strings and comments included.
    fn consume_parens(&mut self) -> Result<(), RewriteError> {
        let open_at = self.i;
        let mut depth = 0usize;
        while self.i < self.bytes.len() {
            match self.bytes[self.i] {
                b'/' => {
                    self.skip_comment_or_advance()?;
                    continue;
                }
                b'"' | b'\'' | b'`' => {
                    self.skip_string()?;
                    continue;
                }
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        self.i += 1;
                        return Ok(());
                    }
                }
                _ => {}
            }
            self.i += 1;
        }
        Err(RewriteError::ParseFailure {
            reason: format!("unterminated parenthesis group at offset {open_at}"),
        })
    }

    /// Skip a return-type annotation: everything up to `{`, `;`, or `}`.
    fn scan_to_body_or_semi(&mut self) -> Result<(), RewriteError> {
        while self.i < self.bytes.len() {
            match self.bytes[self.i] {
                b'/' => self.skip_comment_or_advance()?,
                b'"' | b'\'' | b'`' => self.skip_string()?,
                b'{' | b';' | b'}' => return Ok(()),
                _ => self.i += 1,
            }
        }
        Ok(())
    }

    fn skip_trivia(&mut self) -> Result<(), RewriteError> {
        while self.i < self.bytes.len() {
            match self.bytes[self.i] {
                b' ' | b'\t' | b'\r' | b'\n' => self.i += 1,
                b'/' if self.peek(1) == Some(b'/') || self.peek(1) == Some(b'*') => {
                    self.skip_comment_or_advance()?;
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// At a `/`: skip a line or block comment, or advance one byte.
    fn skip_comment_or_advance(&mut self) -> Result<(), RewriteError> {
        match self.peek(1) {
            Some(b'/') => {
                while self.i < self.bytes.len() && self.bytes[self.i] != b'\n' {
                    self.i += 1;
                }
            }
            Some(b'*') => {
                let open_at = self.i;
                self.i += 2;
                loop {
                    if self.i + 1 >= self.bytes.len() {
                        return Err(RewriteError::ParseFailure {
                            reason: format!("unterminated block comment at offset {open_at}"),
                        });
                    }
                    if self.bytes[self.i] == b'*' && self.bytes[self.i + 1] == b'/' {
                        self.i += 2;
                        break;
                    }
                    self.i += 1;
                }
            }
            _ => self.i += 1,
        }
        Ok(())
    }

    /// At a quote: skip the whole literal, honoring backslash escapes.
    fn skip_string(&mut self) -> Result<(), RewriteError> {
        let quote = self.bytes[self.i];
        let open_at = self.i;
        self.i += 1;
        while self.i < self.bytes.len() {
            match self.bytes[self.i] {
                b'\\' => self.i += 2,
                b if b == quote => {
                    self.i += 1;
                    return Ok(());
                }
                _ => self.i += 1,
            }
        }
        Err(RewriteError::ParseFailure {
            reason: format!("unterminated string literal at offset {open_at}"),
        })
    }

    fn peek(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.i + ahead).copied()
    }
}
