#![forbid(unsafe_code)]

//! Panel appearance with override merging.
//!
//! A [`PanelStyle`] is a set of optional properties. Callers usually pass a
//! sparse override that is merged on top of [`PanelStyle::default_panel`]:
//! every property the override sets wins, everything else keeps the default.
//!
//! ```
//! use droplist_render::cell::Rgb;
//! use droplist_widgets::style::PanelStyle;
//!
//! let custom = PanelStyle::default().width(40).background(Rgb(20, 20, 30));
//! let resolved = PanelStyle::default_panel().merge(&custom).resolve();
//! assert_eq!(resolved.width, Some(40));
//! ```

use droplist_render::cell::{CellFlags, CellStyle, Rgb};
use droplist_render::drawing::BorderType;

/// Optional panel properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelStyle {
    /// Fixed panel width in cells. Unset means "fill the render area".
    pub width: Option<u16>,
    /// Border glyphs. Unset means "no override".
    pub border: Option<BorderType>,
    /// Draw a border at all.
    pub show_border: Option<bool>,
    pub background: Option<Rgb>,
    pub foreground: Option<Rgb>,
    /// Border and panel title.
    pub header: Option<CellStyle>,
    /// Border while a drag is in progress.
    pub dragging: Option<CellStyle>,
    pub group_header: Option<CellStyle>,
    pub title: Option<CellStyle>,
    pub subtitle: Option<CellStyle>,
}

/// Fully resolved properties used while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub width: Option<u16>,
    pub border: BorderType,
    pub show_border: bool,
    /// Base cell style for the whole panel surface.
    pub surface: CellStyle,
    pub header: CellStyle,
    pub dragging: CellStyle,
    pub group_header: CellStyle,
    pub title: CellStyle,
    pub subtitle: CellStyle,
}

impl PanelStyle {
    /// The default panel look.
    #[must_use]
    pub fn default_panel() -> Self {
        Self {
            width: None,
            border: Some(BorderType::Rounded),
            show_border: Some(true),
            background: None,
            foreground: None,
            header: Some(CellStyle::new().flags(CellFlags::BOLD)),
            dragging: Some(CellStyle::new().flags(CellFlags::BOLD | CellFlags::DIM)),
            group_header: Some(CellStyle::new().flags(CellFlags::BOLD | CellFlags::UNDERLINE)),
            title: Some(CellStyle::new()),
            subtitle: Some(CellStyle::new().flags(CellFlags::DIM)),
        }
    }

    /// Layer `other` on top of `self`; properties `other` sets win.
    #[must_use]
    pub fn merge(&self, other: &PanelStyle) -> PanelStyle {
        PanelStyle {
            width: other.width.or(self.width),
            border: other.border.or(self.border),
            show_border: other.show_border.or(self.show_border),
            background: other.background.or(self.background),
            foreground: other.foreground.or(self.foreground),
            header: other.header.or(self.header),
            dragging: other.dragging.or(self.dragging),
            group_header: other.group_header.or(self.group_header),
            title: other.title.or(self.title),
            subtitle: other.subtitle.or(self.subtitle),
        }
    }

    /// Fill every unset property with a neutral value.
    #[must_use]
    pub fn resolve(&self) -> ResolvedStyle {
        let mut surface = CellStyle::new();
        surface.fg = self.foreground;
        surface.bg = self.background;
        ResolvedStyle {
            width: self.width,
            border: self.border.unwrap_or_default(),
            show_border: self.show_border.unwrap_or(true),
            surface,
            header: self.header.unwrap_or_default(),
            dragging: self.dragging.or(self.header).unwrap_or_default(),
            group_header: self.group_header.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            subtitle: self.subtitle.unwrap_or_default(),
        }
    }

    /// Set the panel width.
    #[must_use]
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the border glyphs.
    #[must_use]
    pub fn border(mut self, border: BorderType) -> Self {
        self.border = Some(border);
        self
    }

    /// Show or hide the border.
    #[must_use]
    pub fn show_border(mut self, show: bool) -> Self {
        self.show_border = Some(show);
        self
    }

    /// Set the surface background.
    #[must_use]
    pub fn background(mut self, color: Rgb) -> Self {
        self.background = Some(color);
        self
    }

    /// Set the surface foreground.
    #[must_use]
    pub fn foreground(mut self, color: Rgb) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Set the item title style.
    #[must_use]
    pub fn title(mut self, style: CellStyle) -> Self {
        self.title = Some(style);
        self
    }

    /// Set the item subtitle style.
    #[must_use]
    pub fn subtitle(mut self, style: CellStyle) -> Self {
        self.subtitle = Some(style);
        self
    }

    /// Set the group header style.
    #[must_use]
    pub fn group_header(mut self, style: CellStyle) -> Self {
        self.group_header = Some(style);
        self
    }
}
