//! Word-processor document model
//!
//! This module defines the block and run nodes a converted document is built
//! from. Values are immutable once built; style inheritance is resolved before
//! a [`Run`] is constructed.

/// Paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Alignment {
    /// Left in left-to-right text
    #[default]
    Start,
    Center,
    /// Right in left-to-right text
    End,
    Justify,
}

/// Paragraph spacing in WordprocessingML units.
///
/// `before` and `after` are in twentieths of a point; `line` is in 240ths of
/// a line (360 = 1.5 lines).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Spacing {
    pub line: u32,
    pub before: u32,
    pub after: u32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            line: 360,
            before: 60,
            after: 60,
        }
    }
}

/// Bold/italic flags carried by a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct RunFlags {
    pub bold: bool,
    pub italic: bool,
}

impl RunFlags {
    pub const NONE: RunFlags = RunFlags {
        bold: false,
        italic: false,
    };

    pub fn new(bold: bool, italic: bool) -> Self {
        Self { bold, italic }
    }

    /// Effective flags of a node given its ancestors' flags.
    ///
    /// A flag set by an ancestor can never be cleared further down.
    pub fn combine(parent: RunFlags, own: RunFlags) -> RunFlags {
        RunFlags {
            bold: parent.bold || own.bold,
            italic: parent.italic || own.italic,
        }
    }
}

/// A contiguous span of text sharing one set of style attributes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Run {
    pub text: String,
    pub font: String,
    /// Font size in half-points (28 = 14pt)
    pub size: u32,
    pub bold: bool,
    pub italic: bool,
    /// Line breaks emitted before the text (one per `<br>` in the source)
    pub breaks_before: u32,
}

impl Run {
    pub fn new(text: impl Into<String>, font: impl Into<String>, size: u32, flags: RunFlags) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size,
            bold: flags.bold,
            italic: flags.italic,
            breaks_before: 0,
        }
    }

    pub fn with_breaks(mut self, count: u32) -> Self {
        self.breaks_before = count;
        self
    }

    pub fn flags(&self) -> RunFlags {
        RunFlags::new(self.bold, self.italic)
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A paragraph of runs
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Paragraph {
    pub alignment: Alignment,
    pub runs: Vec<Run>,
    /// `None` leaves spacing to the document defaults (used inside table cells)
    pub spacing: Option<Spacing>,
}

impl Paragraph {
    pub fn new(alignment: Alignment, runs: Vec<Run>) -> Self {
        Self {
            alignment,
            runs,
            spacing: None,
        }
    }

    /// An empty paragraph, used to keep table cells non-empty
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = Some(spacing);
        self
    }

    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(Run::is_blank)
    }

    /// Concatenated run text
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
}

impl TableCell {
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self { rows }
    }

    /// Widest row, used to size the table grid
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}

/// A block-level content unit
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl Block {
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        }
    }
}

/// An ordered sequence of blocks forming a single-section document
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(Block::as_paragraph)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(Block::as_table)
    }
}
