use ratatui::style::Color;

pub fn color_for_language(language: &str) -> Color {
    match language.to_lowercase().as_str() {
        "rust" => Color::LightRed,
        "python" => Color::Yellow,
        "javascript" | "typescript" => Color::LightYellow,
        "c" | "c++" | "c#" => Color::LightBlue,
        "go" => Color::Cyan,
        "java" | "kotlin" | "scala" => Color::Red,
        "ruby" => Color::LightMagenta,
        "php" => Color::Magenta,
        "swift" | "objective-c" => Color::LightCyan,
        "html" | "css" => Color::Green,
        "shell" | "dockerfile" | "makefile" => Color::Gray,
        "r" | "julia" | "matlab" => Color::Blue,
        _ => Color::White,
    }
}

pub fn star_color(stars: u64) -> Color {
    if stars > 0 {
        Color::Yellow
    } else {
        Color::DarkGray
    }
}
