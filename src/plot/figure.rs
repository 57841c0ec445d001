//! Geometric description of a figure, independent of any rasterizer.
//!
//! Composers build a [FigureModel] out of panels and elements; the
//! renderer walks the model and issues the drawing calls. Keeping the
//! two apart means every curve, region and marker position can be
//! tested as plain numbers.

use crate::configuration;

/// How the canvas is split into panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Single,
    /// Two panels side by side.
    Dual,
    /// Two by two grid.
    GridOfFour,
}

impl Layout {
    /// Canvas size in pixels for this layout.
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        return match self {
            Layout::Single => configuration::canvas::SINGLE,
            Layout::Dual => configuration::canvas::DUAL,
            Layout::GridOfFour => configuration::canvas::GRID_OF_FOUR,
        };
    }

    /// `(rows, columns)` of the panel grid.
    #[must_use]
    pub const fn grid(&self) -> (usize, usize) {
        return match self {
            Layout::Single => (1, 1),
            Layout::Dual => (1, 2),
            Layout::GridOfFour => (2, 2),
        };
    }
}

/// Closed color palette. The renderer maps each name to one RGB value,
/// so figures stay consistent across families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteColor {
    Blue,
    LightBlue,
    Red,
    LightRed,
    Green,
    Orange,
    Gray,
    Black,
}

/// Marker glyphs for scatter style elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Cross,
    /// `>` glyph, used for right censored observations.
    RightArrow,
}

/// One histogram or bar chart bar, in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub left: f64,
    pub right: f64,
    pub height: f64,
}

/// Five number summary of one boxed sample, whiskers already clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    /// Lower whisker end.
    pub minimum: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Upper whisker end.
    pub maximum: f64,
    /// Points beyond the whiskers.
    pub outliers: Vec<f64>,
}

/// A drawable item of a panel, all coordinates in data space.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Curve {
        points: Vec<(f64, f64)>,
        color: PaletteColor,
        width: u32,
        label: Option<String>,
    },
    /// Filled polygon, used for shaded critical regions and bands.
    Polygon {
        points: Vec<(f64, f64)>,
        color: PaletteColor,
        opacity: f64,
    },
    VerticalLine {
        x: f64,
        color: PaletteColor,
        dashed: bool,
        label: Option<String>,
    },
    HorizontalLine {
        y: f64,
        color: PaletteColor,
        dashed: bool,
        label: Option<String>,
    },
    Bars {
        bars: Vec<Bar>,
        color: PaletteColor,
    },
    Markers {
        points: Vec<(f64, f64)>,
        color: PaletteColor,
        shape: MarkerShape,
        size: u32,
        label: Option<String>,
    },
    /// One box of a box plot, centered at `at` with the given width.
    BoxWhisker {
        at: f64,
        width: f64,
        stats: BoxStats,
        color: PaletteColor,
    },
    /// Short text at a data coordinate.
    Annotation {
        x: f64,
        y: f64,
        text: String,
        color: PaletteColor,
    },
    /// Monospace block filling the whole panel, no axes involved.
    TextBlock { lines: Vec<String> },
}

/// One panel of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub caption: String,
    pub x_label: String,
    pub y_label: String,
    /// Mesh and axes are skipped for text-only panels.
    pub mesh: bool,
    /// Auto-ranged from the elements when absent.
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
    pub elements: Vec<Element>,
}

impl Panel {
    #[must_use]
    pub fn new(caption: &str, x_label: &str, y_label: &str) -> Panel {
        return Panel {
            caption: caption.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            mesh: true,
            x_range: None,
            y_range: None,
            elements: Vec::new(),
        };
    }

    /// A panel holding only a monospace text block.
    #[must_use]
    pub fn text_panel(caption: &str, lines: Vec<String>) -> Panel {
        return Panel {
            caption: caption.to_string(),
            x_label: String::new(),
            y_label: String::new(),
            mesh: false,
            x_range: None,
            y_range: None,
            elements: vec![Element::TextBlock { lines }],
        };
    }
}

/// A complete figure: title, layout and its panels.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureModel {
    pub title: String,
    pub layout: Layout,
    /// Canvas size in pixels.
    pub size: (u32, u32),
    pub panels: Vec<Panel>,
}

impl FigureModel {
    #[must_use]
    pub fn new(title: &str, layout: Layout) -> FigureModel {
        return FigureModel {
            title: title.to_string(),
            layout,
            size: layout.canvas_size(),
            panels: Vec::new(),
        };
    }
}

/// A panel that could not be composed, with the reason kept for logs.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSkip {
    pub caption: String,
    pub reason: String,
}

/// What a composer hands back: the model plus the panels it had to
/// give up on. Sibling panels survive a skipped one.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedFigure {
    pub model: FigureModel,
    pub skipped: Vec<PanelSkip>,
}

impl ComposedFigure {
    #[must_use]
    pub fn new(model: FigureModel) -> ComposedFigure {
        return ComposedFigure {
            model,
            skipped: Vec::new(),
        };
    }

    pub fn skip(&mut self, caption: &str, reason: String) {
        self.skipped.push(PanelSkip {
            caption: caption.to_string(),
            reason,
        });
    }
}
