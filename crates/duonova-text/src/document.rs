//! Positioned document content

/// One line of text with its position on the page
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    /// Zero-based page number
    pub page: u32,
    /// Vertical position, increasing down the page
    pub top: f32,
    /// Horizontal position, increasing to the right
    pub left: f32,
    /// Line content
    pub text: String,
}

impl LayoutLine {
    /// Create a line
    pub fn new(page: u32, top: f32, left: f32, text: impl Into<String>) -> Self {
        Self {
            page,
            top,
            left,
            text: text.into(),
        }
    }
}

/// A hyperlink target anchored at a page position
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    /// Zero-based page number
    pub page: u32,
    /// Vertical position of the link
    pub top: f32,
    /// Link target
    pub uri: String,
}

impl Anchor {
    /// Create an anchor
    pub fn new(page: u32, top: f32, uri: impl Into<String>) -> Self {
        Self {
            page,
            top,
            uri: uri.into(),
        }
    }
}

/// Lines and link anchors extracted from a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredDocument {
    /// Text lines, in any order
    pub lines: Vec<LayoutLine>,
    /// Hyperlinks
    pub anchors: Vec<Anchor>,
}

impl StructuredDocument {
    /// Build a document from plain lines, one per row of page 0
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines
                .into_iter()
                .enumerate()
                .map(|(row, text)| LayoutLine::new(0, row as f32, 0.0, text))
                .collect(),
            anchors: Vec::new(),
        }
    }

    /// Lines sorted into reading order: page, then top, then left
    pub fn reading_order(&self) -> Vec<LayoutLine> {
        let mut lines = self.lines.clone();
        lines.sort_by(|a, b| {
            a.page
                .cmp(&b.page)
                .then(a.top.total_cmp(&b.top))
                .then(a.left.total_cmp(&b.left))
        });
        lines
    }

    /// True when no line has visible text
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.text.trim().is_empty())
    }
}
