use std::fmt;
use std::sync::Arc;

/// Which section of a table a row lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Head,
    Body,
}

impl Section {
    pub fn is_head(self) -> bool {
        matches!(self, Section::Head)
    }

    /// Short label used in identity formatting and log output.
    pub fn label(self) -> &'static str {
        match self {
            Section::Head => "head",
            Section::Body => "body",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cell element kind: header cells render differently from data cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellKind {
    Header,
    #[default]
    Data,
}

/// Cell content. Html content keeps its raw markup; callers decide how to
/// extract visible text from it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Html(String),
}

impl Content {
    /// The raw content string. For `Html` this is the markup itself.
    pub fn raw(&self) -> &str {
        match self {
            Content::Empty => "",
            Content::Text(s) | Content::Html(s) => s,
        }
    }

    pub fn is_html(&self) -> bool {
        matches!(self, Content::Html(_))
    }

    pub fn is_empty(&self) -> bool {
        self.raw().is_empty()
    }
}

/// Click handler slot attached to a cell.
pub type ClickFn = Arc<dyn Fn() + Send + Sync>;

/// A single cell element.
#[derive(Clone)]
pub struct CellNode {
    pub kind: CellKind,
    pub content: Content,
    pub css_classes: Vec<String>,
    pub visible: bool,
    pub click: Option<ClickFn>,
}

impl Default for CellNode {
    fn default() -> Self {
        Self {
            kind: CellKind::Data,
            content: Content::Empty,
            css_classes: Vec::new(),
            visible: true,
            click: None,
        }
    }
}

impl CellNode {
    pub fn data() -> Self {
        Self::default()
    }

    pub fn header() -> Self {
        Self {
            kind: CellKind::Header,
            ..Default::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.content = Content::Html(html.into());
        self
    }

    pub fn css_class(mut self, class: impl Into<String>) -> Self {
        self.css_classes.push(class.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn on_click(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.click = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for CellNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellNode")
            .field("kind", &self.kind)
            .field("content", &self.content)
            .field("css_classes", &self.css_classes)
            .field("visible", &self.visible)
            .field("click", &self.click.is_some())
            .finish()
    }
}

/// A row of cells.
#[derive(Debug, Clone)]
pub struct RowNode {
    pub cells: Vec<CellNode>,
    pub visible: bool,
}

impl Default for RowNode {
    fn default() -> Self {
        Self::new()
    }
}

impl RowNode {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            visible: true,
        }
    }

    pub fn cell(mut self, cell: CellNode) -> Self {
        self.cells.push(cell);
        self
    }

    pub fn cells(mut self, cells: impl IntoIterator<Item = CellNode>) -> Self {
        self.cells.extend(cells);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
