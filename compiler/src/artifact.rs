//! Line-oriented text builder shared by the generators.
//!
//! Generators describe their output as an ordered list of lines, each with an
//! indentation depth, and only render to text at the very end. Tests can
//! inspect [`Artifact::lines`] directly.

const INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub depth: usize,
    pub text:  String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifact {
    lines: Vec<Line>,
    depth: usize,
}

impl Artifact {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line at the current depth.
    pub fn push(&mut self, text: impl Into<String>) -> &mut Self {
        self.lines.push(Line { depth: self.depth, text: text.into() });
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.push("")
    }

    /// Adds a line and indents everything after it.
    pub fn open(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(text);
        self.depth += 1;
        self
    }

    /// Dedents and adds a closing line.
    pub fn close(&mut self, text: impl Into<String>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.push(text)
    }

    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Appends every line of `other`, shifted by the current depth.
    pub fn append(&mut self, other: &Artifact) -> &mut Self {
        let base = self.depth;
        self.lines.extend(other.lines.iter().map(|line| Line {
            depth: base + line.depth,
            text:  line.text.clone(),
        }));
        self
    }

    /// Appends multi-line text verbatim at depth zero.
    pub fn raw(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.lines.push(Line { depth: 0, text: line.to_string() });
        }
        self
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Renders with four spaces per depth level. Empty lines carry no
    /// indentation and the output ends with a newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            if !line.text.is_empty() {
                for _ in 0..line.depth {
                    out.push_str(INDENT);
                }
                out.push_str(&line.text);
            }
            out.push('\n');
        }
        out
    }
}
