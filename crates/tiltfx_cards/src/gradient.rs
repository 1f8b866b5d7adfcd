//! Gradient class strings
//!
//! Card and service backgrounds are stored as utility-class gradient strings:
//!
//! ```text
//! from-gray-700 to-gray-800
//! from-blue-500/20 to-purple-500/20
//! from-[#ff0000] to-[#000000]
//! from-[purple-500/20] to-gray-800
//! ```
//!
//! Parsing is lenient by default: repeated brackets are collapsed, the first
//! `from-… to-…` pair anywhere in the string wins, and anything unreadable falls
//! back to `from-gray-700 to-gray-800`. [`GradientClasses::try_parse`] is the
//! strict variant for configuration input.

use crate::palette::{hex_to_color, utility_hex, FALLBACK_HEX};
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_till1, take_while_m_n},
    character::complete::{char, digit1, multispace1},
    combinator::{all_consuming, map, recognize},
    error::ParseError as NomParseError,
    sequence::{delimited, pair, preceded, separated_pair},
    IResult,
};
use tiltfx_core::{Color, Gradient, GradientDirection, Result, TiltError};

const DEFAULT_FROM: &str = "gray-700";
const DEFAULT_TO: &str = "gray-800";

/// A `from` / `to` pair of color references
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradientClasses {
    pub from: String,
    pub to: String,
}

impl Default for GradientClasses {
    fn default() -> Self {
        Self {
            from: DEFAULT_FROM.to_string(),
            to: DEFAULT_TO.to_string(),
        }
    }
}

impl GradientClasses {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: clean_color(&from.into()),
            to: clean_color(&to.into()),
        }
    }

    /// Lenient parse, falling back to `from-gray-700 to-gray-800`
    pub fn parse(input: &str) -> Self {
        match scan(input) {
            Some(classes) => classes,
            None => {
                tracing::debug!(input, "unreadable gradient classes, using fallback");
                Self::default()
            }
        }
    }

    /// Strict parse
    pub fn try_parse(input: &str) -> Result<Self> {
        scan(input).ok_or_else(|| {
            TiltError::Gradient(format!("no `from-… to-…` pair in '{}'", input.trim()))
        })
    }

    /// Class string, bracketing colors that need it
    ///
    /// `from-gray-700 to-[#000000]`, `from-[blue-500/20] to-purple-600`
    pub fn format(&self) -> String {
        format!("{} {}", class_part("from", &self.from), class_part("to", &self.to))
    }

    /// Full background class (`bg-gradient-to-br from-… to-…`)
    pub fn to_class(&self) -> String {
        format!("bg-gradient-to-br {}", self.format())
    }

    /// CSS background
    ///
    /// Opacity suffixes are ignored here; unknown names render as gray-500.
    pub fn to_css(&self) -> String {
        format!(
            "linear-gradient(to bottom right, {}, {})",
            color_hex(&self.from),
            color_hex(&self.to)
        )
    }

    /// Resolve into a renderable gradient, honoring opacity suffixes
    pub fn to_gradient(&self) -> Gradient {
        Gradient::linear(
            GradientDirection::ToBottomRight,
            resolve_color(&self.from),
            resolve_color(&self.to),
        )
    }
}

impl std::fmt::Display for GradientClasses {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color helpers
// ─────────────────────────────────────────────────────────────────────────────

/// True for `#rrggbb` (exactly six hex digits)
pub fn is_hex_color(color: &str) -> bool {
    all_consuming(hex_color::<nom::error::Error<&str>>)(color).is_ok()
}

/// Strip stray brackets from a color reference
///
/// `[[purple-500/20]]` and `a[blue-500]b` both become the bracket content.
pub fn clean_color(color: &str) -> String {
    let mut cleaned = color
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string();
    if cleaned.contains('[') || cleaned.contains(']') {
        cleaned = match cleaned.find('[').and_then(|start| {
            let rest = &cleaned[start + 1..];
            rest.find(']')
                .filter(|&end| end > 0)
                .map(|end| rest[..end].to_string())
        }) {
            Some(inner) => inner,
            None => cleaned.chars().filter(|c| *c != '[' && *c != ']').collect(),
        };
    }
    cleaned.trim().to_string()
}

/// Whether a color must be wrapped in `[...]` inside a class string
pub fn needs_brackets(color: &str) -> bool {
    is_hex_color(color) || color.contains('/') || color.contains('[') || color.contains(']')
}

/// Hex string for a color reference, `#6b7280` when unknown
pub fn color_hex(color: &str) -> String {
    if is_hex_color(color) {
        return color.to_string();
    }
    let base = color.split('/').next().unwrap_or(color);
    utility_hex(base).unwrap_or(FALLBACK_HEX).to_string()
}

/// Resolve a color reference including its `/NN` opacity
pub fn resolve_color(color: &str) -> Color {
    if is_hex_color(color) {
        return hex_to_color(color).unwrap_or(Color::BLACK);
    }
    let fallback = hex_to_color(FALLBACK_HEX).unwrap_or(Color::BLACK);
    match all_consuming(named_color::<nom::error::Error<&str>>)(color) {
        Ok((_, (name, opacity))) => {
            let base = utility_hex(name)
                .and_then(hex_to_color)
                .unwrap_or(fallback);
            match opacity {
                Some(alpha) => base.with_alpha(alpha),
                None => base,
            }
        }
        Err(_) => fallback,
    }
}

fn class_part(prefix: &str, color: &str) -> String {
    if needs_brackets(color) {
        format!("{}-[{}]", prefix, color)
    } else {
        format!("{}-{}", prefix, color)
    }
}

/// Collapse `[[` / `]]` runs into single brackets
fn collapse_brackets(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last: Option<char> = None;
    for c in input.chars() {
        if (c == '[' || c == ']') && last == Some(c) {
            continue;
        }
        out.push(c);
        last = Some(c);
    }
    out
}

/// First `from-… to-…` pair, preferring a fully bracketed pair anywhere in the
/// string over bare tokens
fn scan(input: &str) -> Option<GradientClasses> {
    let collapsed = collapse_brackets(input);
    find_pair(&collapsed, from_to(bracketed_color::<nom::error::Error<&str>>))
        .or_else(|| find_pair(&collapsed, from_to(bare_color::<nom::error::Error<&str>>)))
}

fn find_pair<'a, P>(input: &'a str, mut parser: P) -> Option<GradientClasses>
where
    P: FnMut(&'a str) -> IResult<&'a str, (String, String)>,
{
    for (start, _) in input.match_indices("from-") {
        if let Ok((_, (from, to))) = parser(&input[start..]) {
            if from.is_empty() || to.is_empty() {
                continue;
            }
            return Some(GradientClasses { from, to });
        }
    }
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsers
// ─────────────────────────────────────────────────────────────────────────────

fn hex_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    recognize(pair(
        char('#'),
        take_while_m_n(6, 6, |c: char| c.is_ascii_hexdigit()),
    ))(input)
}

/// `blue-500` or `blue-500/20`
fn named_color<'a, E: NomParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, (&'a str, Option<f32>), E> {
    alt((
        map(
            separated_pair(take_till1(|c: char| c == '/'), char('/'), digit1),
            |(name, pct): (&str, &str)| {
                let alpha = pct.parse::<f32>().unwrap_or(100.0) / 100.0;
                (name, Some(alpha.clamp(0.0, 1.0)))
            },
        ),
        map(take_till1(|c: char| c == '/'), |name| (name, None)),
    ))(input)
}

/// `[anything]`, trimmed
fn bracketed_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, String, E> {
    map(delimited(char('['), is_not("]"), char(']')), |s: &str| {
        s.trim().to_string()
    })(input)
}

/// A whitespace-free token with leading `[` and trailing `]` stripped
fn bare_color<'a, E: NomParseError<&'a str>>(input: &'a str) -> IResult<&'a str, String, E> {
    map(take_till1(|c: char| c.is_whitespace()), |s: &str| {
        s.trim_start_matches('[')
            .trim_end_matches(']')
            .trim()
            .to_string()
    })(input)
}

/// `from-<color> to-<color>` with one color form on both sides
fn from_to<'a, E, F>(color: F) -> impl FnMut(&'a str) -> IResult<&'a str, (String, String), E>
where
    E: NomParseError<&'a str>,
    F: FnMut(&'a str) -> IResult<&'a str, String, E> + Clone,
{
    move |input| {
        let (input, from) = preceded(tag("from-"), color.clone())(input)?;
        let (input, _) = multispace1(input)?;
        let (input, to) = preceded(tag("to-"), color.clone())(input)?;
        Ok((input, (from, to)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let g = GradientClasses::parse("from-gray-700 to-gray-800");
        assert_eq!(g, GradientClasses::new("gray-700", "gray-800"));
    }

    #[test]
    fn test_parse_with_opacity() {
        let g = GradientClasses::parse("bg-gradient-to-br from-blue-500/20 to-purple-500/20");
        assert_eq!(g.from, "blue-500/20");
        assert_eq!(g.to, "purple-500/20");
    }

    #[test]
    fn test_parse_bracketed() {
        let g = GradientClasses::parse("from-[#ff0000] to-[#000000]");
        assert_eq!(g.from, "#ff0000");
        assert_eq!(g.to, "#000000");
    }

    #[test]
    fn test_parse_mixed_forms() {
        let g = GradientClasses::parse("from-[purple-500/20] to-gray-800");
        assert_eq!((g.from.as_str(), g.to.as_str()), ("purple-500/20", "gray-800"));

        let g = GradientClasses::parse("from-gray-700 to-[#000000]");
        assert_eq!((g.from.as_str(), g.to.as_str()), ("gray-700", "#000000"));
    }

    #[test]
    fn test_trailing_junk_after_bracket_reads_bare_tokens() {
        let g = GradientClasses::parse("from-[#ff0000]x to-gray-800");
        assert_eq!((g.from.as_str(), g.to.as_str()), ("#ff0000]x", "gray-800"));

        let g = GradientClasses::try_parse("from-gray-700 to-[#000000]!").unwrap();
        assert_eq!((g.from.as_str(), g.to.as_str()), ("gray-700", "#000000]!"));
    }

    #[test]
    fn test_bracketed_pair_wins_over_earlier_bare_pair() {
        let g = GradientClasses::parse("from-red-500 to-blue-500 from-[#111111] to-[#222222]");
        assert_eq!((g.from.as_str(), g.to.as_str()), ("#111111", "#222222"));
    }

    #[test]
    fn test_repeated_brackets_collapse() {
        let g = GradientClasses::parse("from-[[[#ff0000]]] to-[[gray-800]]");
        assert_eq!(g.from, "#ff0000");
        assert_eq!(g.to, "gray-800");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(GradientClasses::parse(""), GradientClasses::default());
        assert_eq!(GradientClasses::parse("bg-red-500"), GradientClasses::default());
        assert!(matches!(
            GradientClasses::try_parse("to-gray-800 from-"),
            Err(TiltError::Gradient(_))
        ));
    }

    #[test]
    fn test_format_brackets_only_where_needed() {
        let g = GradientClasses::new("gray-700", "#000000");
        assert_eq!(g.format(), "from-gray-700 to-[#000000]");

        let g = GradientClasses::new("blue-500/20", "purple-600");
        assert_eq!(g.format(), "from-[blue-500/20] to-purple-600");
        assert_eq!(g.to_class(), "bg-gradient-to-br from-[blue-500/20] to-purple-600");
    }

    #[test]
    fn test_format_parse_agree() {
        for input in [
            "from-gray-700 to-gray-800",
            "from-[#ff0000] to-[#000000]",
            "from-[purple-500/20] to-gray-800",
            "from-gray-700 to-[#000000]",
        ] {
            let g = GradientClasses::parse(input);
            assert_eq!(g.format(), input);
            assert_eq!(GradientClasses::parse(&g.format()), g);
        }
    }

    #[test]
    fn test_clean_color() {
        assert_eq!(clean_color("  [[purple-500/20]] "), "purple-500/20");
        assert_eq!(clean_color("a[blue-500]b"), "blue-500");
        assert_eq!(clean_color("gray-[700"), "gray-700");
        assert_eq!(clean_color("#ff0000"), "#ff0000");
    }

    #[test]
    fn test_needs_brackets() {
        assert!(needs_brackets("#ff0000"));
        assert!(needs_brackets("blue-500/20"));
        assert!(!needs_brackets("gray-700"));
        assert!(!needs_brackets("#fff"));
    }

    #[test]
    fn test_css_output() {
        let g = GradientClasses::parse("from-blue-500/20 to-unknown-300");
        assert_eq!(
            g.to_css(),
            "linear-gradient(to bottom right, #3b82f6, #6b7280)"
        );
        let g = GradientClasses::parse("from-[#FF0000] to-gray-900");
        assert_eq!(
            g.to_css(),
            "linear-gradient(to bottom right, #FF0000, #111827)"
        );
    }

    #[test]
    fn test_to_gradient_keeps_opacity() {
        let g = GradientClasses::parse("from-blue-500/20 to-gray-800").to_gradient();
        assert!((g.first_color().a - 0.2).abs() < 1e-6);
        assert_eq!(g.last_color().to_hex_string(), "#1f2937");
    }
}
