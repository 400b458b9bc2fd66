//! Theme resolution for chart controls.
//!
//! Controls hand the resolver their type name and a partial [`ThemeSpec`];
//! the resolver merges variant defaults and returns concrete [`ChartParams`]
//! plus the class/attribute hooks to stamp on the root element.

use crate::color::Color;
use crate::element::Element;
use crate::geometry::Size;
use serde::{Deserialize, Serialize};

/// A named, ordered list of series colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Palette name
    pub name: &'static str,
    /// Colors in assignment order
    pub colors: &'static [&'static str],
}

impl Palette {
    /// Color for the series at `index`, cycling through the palette.
    #[must_use]
    pub fn color(&self, index: usize) -> &'static str {
        if self.colors.is_empty() {
            return "#888888";
        }
        self.colors[index % self.colors.len()]
    }

    /// Look up a palette by name.
    #[must_use]
    pub fn named(name: &str) -> Option<&'static Self> {
        PALETTES.iter().find(|p| p.name == name)
    }

    /// The default palette.
    #[must_use]
    pub const fn fallback() -> &'static Self {
        &PALETTES[0]
    }
}

/// Built-in palettes. The first entry is the default.
pub const PALETTES: &[Palette] = &[
    Palette {
        name: "default",
        colors: &[
            "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1",
            "#ff9da7", "#9c755f", "#bab0ac",
        ],
    },
    Palette {
        name: "vibrant",
        colors: &[
            "#0077bb", "#33bbee", "#009988", "#ee7733", "#cc3311", "#ee3377", "#bbbbbb",
        ],
    },
    Palette {
        name: "pastel",
        colors: &[
            "#a1c9f4", "#ffb482", "#8de5a1", "#ff9f9b", "#d0bbff", "#debb9b", "#fab0e4",
        ],
    },
    Palette {
        name: "monochrome",
        colors: &["#1f3b73", "#2f5597", "#4472c4", "#8faadc", "#b4c7e7", "#dae3f3"],
    },
];

/// Size presets for charts without explicit dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePreset {
    /// 300 x 200
    Small,
    /// 500 x 300
    #[default]
    Medium,
    /// 800 x 500
    Large,
}

impl SizePreset {
    /// Pixel dimensions of the preset.
    #[must_use]
    pub const fn dimensions(self) -> Size {
        match self {
            Self::Small => Size::new(300.0, 200.0),
            Self::Medium => Size::new(500.0, 300.0),
            Self::Large => Size::new(800.0, 500.0),
        }
    }

    /// Lowercase name used in class hooks.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

/// Colors and type sizes for chart chrome (axes, grid, labels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTheme {
    /// Theme name
    pub name: String,
    /// Axis line and tick color
    pub axis: Color,
    /// Grid line color
    pub grid: Color,
    /// Label text color
    pub text: Color,
    /// Background fill
    pub background: Color,
    /// Label font size in pixels
    pub font_size: f64,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl ChartTheme {
    /// Light chrome on a white background.
    #[must_use]
    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            axis: Color::new(0.4, 0.4, 0.4, 1.0),
            grid: Color::new(0.9, 0.9, 0.9, 1.0),
            text: Color::new(0.2, 0.2, 0.2, 1.0),
            background: Color::WHITE,
            font_size: 11.0,
        }
    }

    /// Dark chrome on a near-black background.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            axis: Color::new(0.7, 0.7, 0.7, 1.0),
            grid: Color::new(0.25, 0.25, 0.25, 1.0),
            text: Color::new(0.9, 0.9, 0.9, 1.0),
            background: Color::new(0.07, 0.07, 0.07, 1.0),
            font_size: 11.0,
        }
    }

    /// Look up a theme by name.
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "light" => Some(Self::light()),
            "dark" => Some(Self::dark()),
            _ => None,
        }
    }
}

/// Partial theming input; `None` fields take variant defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSpec {
    /// Variant name (e.g. "minimal", "dashboard")
    pub variant: Option<String>,
    /// Size preset
    pub size: Option<SizePreset>,
    /// Palette name
    pub palette: Option<String>,
    /// Theme name ("light" / "dark")
    pub theme: Option<String>,
    /// Draw grid lines
    pub grid: Option<bool>,
    /// Show legend
    pub legend: Option<bool>,
    /// Enable entry animation classes
    pub animation: Option<bool>,
}

/// Fully resolved theming parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartParams {
    /// Resolved variant name
    pub variant: String,
    /// Size preset
    pub size: SizePreset,
    /// Series palette
    pub palette: &'static Palette,
    /// Chrome colors
    pub theme: ChartTheme,
    /// Draw grid lines
    pub grid: bool,
    /// Show legend
    pub legend: bool,
    /// Enable entry animation classes
    pub animation: bool,
}

impl Default for ChartParams {
    fn default() -> Self {
        resolve("chart", &ThemeSpec::default()).params
    }
}

/// Class and attribute hooks produced by resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeHooks {
    /// Classes to add to the root element
    pub classes: Vec<String>,
    /// Attributes to set on the root element
    pub attrs: Vec<(String, String)>,
}

impl ThemeHooks {
    /// Stamp the hooks onto an element.
    pub fn apply(&self, element: &mut Element) {
        for class in &self.classes {
            element.add_class(class.clone());
        }
        for (name, value) in &self.attrs {
            element.set_attr(name.clone(), value.clone());
        }
    }
}

/// Result of [`resolve`].
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Parameter bag consumed by the control
    pub params: ChartParams,
    /// Hooks for the root element
    pub hooks: ThemeHooks,
}

struct VariantDefaults {
    size: SizePreset,
    palette: &'static str,
    theme: &'static str,
    grid: bool,
    legend: bool,
    animation: bool,
}

fn variant_defaults(variant: &str) -> VariantDefaults {
    let base = VariantDefaults {
        size: SizePreset::Medium,
        palette: "default",
        theme: "light",
        grid: true,
        legend: true,
        animation: false,
    };
    match variant {
        "minimal" => VariantDefaults {
            grid: false,
            legend: false,
            palette: "monochrome",
            ..base
        },
        "dashboard" => VariantDefaults {
            size: SizePreset::Large,
            palette: "vibrant",
            animation: true,
            ..base
        },
        "compact" => VariantDefaults {
            size: SizePreset::Small,
            legend: false,
            ..base
        },
        "dark" => VariantDefaults {
            theme: "dark",
            palette: "vibrant",
            ..base
        },
        _ => base,
    }
}

/// Resolve a theming spec for a control type.
///
/// Explicit spec fields win over variant defaults. Unknown palette or theme
/// names fall back to the defaults.
#[must_use]
pub fn resolve(control_type: &str, spec: &ThemeSpec) -> Resolved {
    let variant = spec.variant.clone().unwrap_or_else(|| "default".to_string());
    let defaults = variant_defaults(&variant);

    let palette_name = spec.palette.as_deref().unwrap_or(defaults.palette);
    let palette = Palette::named(palette_name).unwrap_or_else(|| {
        tracing::warn!(palette = palette_name, "unknown palette, using default");
        Palette::fallback()
    });

    let theme_name = spec.theme.as_deref().unwrap_or(defaults.theme);
    let theme = ChartTheme::named(theme_name).unwrap_or_else(|| {
        tracing::warn!(theme = theme_name, "unknown theme, using light");
        ChartTheme::light()
    });

    let params = ChartParams {
        size: spec.size.unwrap_or(defaults.size),
        palette,
        grid: spec.grid.unwrap_or(defaults.grid),
        legend: spec.legend.unwrap_or(defaults.legend),
        animation: spec.animation.unwrap_or(defaults.animation),
        theme,
        variant,
    };

    let mut classes = vec![control_type.to_string()];
    if params.variant != "default" {
        classes.push(format!("{control_type}--{}", params.variant));
    }
    classes.push(format!("size-{}", params.size.name()));
    if params.animation {
        classes.push("animated".to_string());
    }
    let attrs = vec![("data-theme".to_string(), params.theme.name.clone())];

    tracing::debug!(
        control_type,
        variant = %params.variant,
        palette = params.palette.name,
        "resolved theme"
    );

    Resolved {
        params,
        hooks: ThemeHooks { classes, attrs },
    }
}
