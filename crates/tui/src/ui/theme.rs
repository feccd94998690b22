use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(8, 12, 16),
            surface: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            border: Color::Rgb(60, 70, 80),
            border_focused: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(90, 180, 110),
            negative: Color::Rgb(210, 100, 90),
            error: Color::Rgb(200, 80, 80),
        }
    }
}

/// Pie slice colors, assigned in slice order and repeated when exhausted.
pub const SLICE_COLORS: [Color; 8] = [
    Color::Rgb(231, 111, 81),
    Color::Rgb(244, 162, 97),
    Color::Rgb(233, 196, 106),
    Color::Rgb(42, 157, 143),
    Color::Rgb(38, 70, 83),
    Color::Rgb(138, 177, 125),
    Color::Rgb(181, 101, 167),
    Color::Rgb(120, 144, 156),
];

pub fn slice_color(index: usize) -> Color {
    SLICE_COLORS[index % SLICE_COLORS.len()]
}
