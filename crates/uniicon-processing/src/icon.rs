//! Deterministic local icon synthesis.
//!
//! Used whenever the remote image service is unavailable. The archetype and
//! colour pair are picked by case-insensitive keyword search over fixed
//! tables, first match wins, so the same prompt always yields the same SVG.

use uniicon_core::truncate_prompt;

const CANVAS_SIZE: u32 = 1024;
const CAPTION_MAX_CHARS: usize = 20;
const STROKE_WIDTH: u32 = 8;

/// Icon shape template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    Star,
    Heart,
    Home,
    User,
    Default,
}

const ARCHETYPE_KEYWORDS: &[(Archetype, &[&str])] = &[
    (Archetype::Star, &["star", "favorite", "rating", "award"]),
    (Archetype::Heart, &["heart", "love", "like", "health"]),
    (Archetype::Home, &["home", "house", "building"]),
    (
        Archetype::User,
        &["user", "person", "profile", "account", "people"],
    ),
];

impl Archetype {
    pub fn for_prompt(prompt: &str) -> Self {
        let lowered = prompt.to_lowercase();
        ARCHETYPE_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(archetype, _)| *archetype)
            .unwrap_or(Archetype::Default)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::Star => "star",
            Archetype::Heart => "heart",
            Archetype::Home => "home",
            Archetype::User => "user",
            Archetype::Default => "default",
        }
    }

    /// SVG elements for the shape, without paint attributes
    fn shape(&self) -> &'static [&'static str] {
        match self {
            Archetype::Star => &[
                r#"<polygon points="512,200 559,335 702,338 588,425 630,562 512,480 394,562 436,425 322,338 465,335""#,
            ],
            Archetype::Heart => &[
                r#"<path d="M512 560 C360 460 300 340 390 280 C450 240 500 270 512 310 C524 270 574 240 634 280 C724 340 664 460 512 560 Z""#,
            ],
            Archetype::Home => &[
                r#"<path d="M512 200 L712 380 L652 380 L652 580 L372 580 L372 380 L312 380 Z""#,
            ],
            Archetype::User => &[
                r#"<circle cx="512" cy="310" r="90""#,
                r#"<path d="M352 580 C352 470 432 420 512 420 C592 420 672 470 672 580 Z""#,
            ],
            Archetype::Default => &[r#"<circle cx="512" cy="400" r="200""#],
        }
    }
}

/// Primary fill and secondary stroke colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPair {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
}

const BLUE: ColorPair = ColorPair {
    name: "blue",
    primary: "#3B82F6",
    secondary: "#1E40AF",
};
const RED: ColorPair = ColorPair {
    name: "red",
    primary: "#EF4444",
    secondary: "#B91C1C",
};
const GREEN: ColorPair = ColorPair {
    name: "green",
    primary: "#10B981",
    secondary: "#047857",
};
const YELLOW: ColorPair = ColorPair {
    name: "yellow",
    primary: "#F59E0B",
    secondary: "#B45309",
};
const PURPLE: ColorPair = ColorPair {
    name: "purple",
    primary: "#8B5CF6",
    secondary: "#6D28D9",
};
const SLATE: ColorPair = ColorPair {
    name: "slate",
    primary: "#64748B",
    secondary: "#334155",
};

const COLOR_KEYWORDS: &[(ColorPair, &[&str])] = &[
    (BLUE, &["blue", "water", "ocean", "sea", "sky"]),
    (RED, &["red", "fire", "love", "heart"]),
    (GREEN, &["green", "nature", "leaf", "tree", "plant"]),
    (YELLOW, &["yellow", "sun", "gold", "star"]),
    (PURPLE, &["purple", "magic", "royal"]),
];

impl ColorPair {
    pub fn for_prompt(prompt: &str) -> Self {
        let lowered = prompt.to_lowercase();
        COLOR_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lowered.contains(k)))
            .map(|(pair, _)| *pair)
            .unwrap_or(SLATE)
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// A synthesized icon: shape, colours and caption derived from a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackIcon {
    pub archetype: Archetype,
    pub colors: ColorPair,
    pub caption: String,
}

impl FallbackIcon {
    pub fn for_prompt(prompt: &str) -> Self {
        Self {
            archetype: Archetype::for_prompt(prompt),
            colors: ColorPair::for_prompt(prompt),
            caption: truncate_prompt(prompt.trim(), CAPTION_MAX_CHARS),
        }
    }

    pub fn to_svg(&self) -> String {
        let mut svg = String::with_capacity(1024);
        svg.push_str(&format!(
            r#"<svg width="{size}" height="{size}" viewBox="0 0 {size} {size}" xmlns="http://www.w3.org/2000/svg">"#,
            size = CANVAS_SIZE
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <rect width="{size}" height="{size}" fill="white"/>"#,
            size = CANVAS_SIZE
        ));
        svg.push('\n');
        for element in self.archetype.shape() {
            svg.push_str(&format!(
                r#"  {} fill="{}" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
                element, self.colors.primary, self.colors.secondary, STROKE_WIDTH
            ));
            svg.push('\n');
        }
        svg.push_str(&format!(
            r##"  <text x="512" y="720" font-family="Arial, sans-serif" font-size="48" text-anchor="middle" fill="#1F2937">{}</text>"##,
            escape_xml(&self.caption)
        ));
        svg.push('\n');
        svg.push_str(
            r##"  <text x="512" y="800" font-family="Arial, sans-serif" font-size="24" text-anchor="middle" fill="#6B7280">Fallback Icon</text>"##,
        );
        svg.push_str("\n</svg>\n");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archetype_keywords() {
        assert_eq!(Archetype::for_prompt("favorite star icon"), Archetype::Star);
        assert_eq!(Archetype::for_prompt("FAVORITE STAR"), Archetype::Star);
        assert_eq!(Archetype::for_prompt("i love cats"), Archetype::Heart);
        assert_eq!(Archetype::for_prompt("office building"), Archetype::Home);
        assert_eq!(Archetype::for_prompt("Account settings"), Archetype::User);
        assert_eq!(Archetype::for_prompt("a rocket"), Archetype::Default);
    }

    #[test]
    fn test_archetype_first_match_wins() {
        // "rating" is a star keyword; star is checked before user
        assert_eq!(Archetype::for_prompt("user rating"), Archetype::Star);
    }

    #[test]
    fn test_color_keywords() {
        assert_eq!(ColorPair::for_prompt("a blue water droplet").primary, "#3B82F6");
        assert_eq!(ColorPair::for_prompt("campfire").primary, "#EF4444");
        assert_eq!(ColorPair::for_prompt("Tree of life").primary, "#10B981");
        assert_eq!(ColorPair::for_prompt("gold coin").primary, "#F59E0B");
        assert_eq!(ColorPair::for_prompt("magic wand").primary, "#8B5CF6");
        assert_eq!(ColorPair::for_prompt("a rocket").primary, "#64748B");
    }

    #[test]
    fn test_star_prompt_picks_yellow_unless_earlier_color_matches() {
        assert_eq!(ColorPair::for_prompt("favorite star").name, "yellow");
        assert_eq!(ColorPair::for_prompt("red star").name, "red");
    }

    #[test]
    fn test_same_prompt_same_svg() {
        let first = FallbackIcon::for_prompt("a blue water droplet").to_svg();
        let second = FallbackIcon::for_prompt("a blue water droplet").to_svg();
        assert_eq!(first, second);
    }

    #[test]
    fn test_svg_contains_colors_and_caption() {
        let svg = FallbackIcon::for_prompt("a blue water droplet").to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r##"fill="#3B82F6""##));
        assert!(svg.contains(r##"stroke="#1E40AF""##));
        assert!(svg.contains(">a blue water droplet</text>"));
        assert!(svg.contains("Fallback Icon"));
    }

    #[test]
    fn test_long_caption_is_truncated() {
        let icon = FallbackIcon::for_prompt("a very long description of an icon");
        assert_eq!(icon.caption, "a very long descript...");
    }

    #[test]
    fn test_caption_is_escaped() {
        let icon = FallbackIcon::for_prompt("<b>&</b>");
        assert!(icon.to_svg().contains("&lt;b&gt;&amp;&lt;/b&gt;"));
    }
}
