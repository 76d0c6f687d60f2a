use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Host capability assigning a stroke color to each series index.
pub trait PaletteProvider {
    fn color_for_series(&self, index: usize) -> Color;
}

impl<F> PaletteProvider for F
where
    F: Fn(usize) -> Color,
{
    fn color_for_series(&self, index: usize) -> Color {
        self(index)
    }
}

/// Default dashboard theme colors, in assignment order.
pub const DEFAULT_THEME_COLORS: [&str; 8] = [
    "#01B8AA", "#374649", "#FD625E", "#F2C80F", "#5F6B6D", "#8AD4EB", "#FE9666", "#A66999",
];

/// Fixed color list, repeated when there are more series than colors.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticPalette {
    colors: Vec<Color>,
}

impl StaticPalette {
    pub fn new(colors: Vec<Color>) -> ChartResult<Self> {
        if colors.is_empty() {
            return Err(ChartError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        for color in &colors {
            color.validate()?;
        }
        Ok(Self { colors })
    }

    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> ChartResult<Self> {
        let colors = colors
            .iter()
            .map(|hex| Color::from_hex(hex.as_ref()))
            .collect::<ChartResult<Vec<_>>>()?;
        Self::new(colors)
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for StaticPalette {
    fn default() -> Self {
        let colors = DEFAULT_THEME_COLORS
            .iter()
            .filter_map(|hex| Color::from_hex(hex).ok())
            .collect();
        Self { colors }
    }
}

impl PaletteProvider for StaticPalette {
    fn color_for_series(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }
}
