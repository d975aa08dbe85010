use crossterm::style::Color;

pub fn title_fg() -> Color {
    Color::AnsiValue(46)
} // Bright green
pub fn subtitle_fg() -> Color {
    Color::AnsiValue(51)
} // Bright cyan
pub fn text_fg() -> Color {
    Color::AnsiValue(231)
} // Pure white
pub fn muted_fg() -> Color {
    Color::AnsiValue(245)
} // Grey
pub fn highlight_fg() -> Color {
    Color::AnsiValue(226)
} // Bright yellow
pub fn error_fg() -> Color {
    Color::AnsiValue(196)
} // Bright red
