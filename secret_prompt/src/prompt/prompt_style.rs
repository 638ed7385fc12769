// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Resolve style strings (eg: `"bold #61afef bg:#282c34"`) into
//! [`crossterm::style::ContentStyle`] for each [`StyleClass`]. User styles are merged
//! on top of the default palette, unless they contain `noinherit`.

use std::collections::HashMap;

use crossterm::style::{Attribute, Attributes, Color, ContentStyle};
use strum::IntoEnumIterator;

use crate::{ConfigurationError, StyleClass};

pub const DEFAULT_QUESTIONMARK_STYLE: &str = "#e5c07b";
pub const DEFAULT_QUESTION_STYLE: &str = "bold";
pub const DEFAULT_ANSWER_STYLE: &str = "#61afef";
pub const DEFAULT_INPUT_STYLE: &str = "#98c379";
pub const DEFAULT_VALIDATOR_STYLE: &str = "#e06c75";

/// One parsed style string. Unset colours leave the base colour alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleSpec {
    pub maybe_fg: Option<Color>,
    pub maybe_bg: Option<Color>,
    pub attributes: Attributes,
    pub no_inherit: bool,
}

impl StyleSpec {
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MalformedStyle`] for an unknown token or a bad hex
    /// colour.
    pub fn try_parse(
        style_class: StyleClass,
        style_str: &str,
    ) -> Result<Self, ConfigurationError> {
        let mut spec = StyleSpec::default();

        for token in style_str.split_whitespace() {
            let malformed = |reason: &'static str| ConfigurationError::MalformedStyle {
                style_class: style_class.class_name(),
                token: token.to_string(),
                reason,
            };

            let lower = token.to_ascii_lowercase();
            if let Some(color_str) = lower.strip_prefix("bg:") {
                spec.maybe_bg = Some(parse_color(color_str).ok_or_else(|| malformed("bad colour"))?);
            } else if let Some(color_str) = lower.strip_prefix("fg:") {
                spec.maybe_fg = Some(parse_color(color_str).ok_or_else(|| malformed("bad colour"))?);
            } else if let Some(attribute) = parse_attribute(&lower) {
                spec.attributes.set(attribute);
            } else if lower == "noinherit" {
                spec.no_inherit = true;
            } else if lower.starts_with('#') {
                spec.maybe_fg = Some(parse_color(&lower).ok_or_else(|| malformed("bad hex colour"))?);
            } else if let Some(color) = parse_color(&lower) {
                spec.maybe_fg = Some(color);
            } else {
                return Err(malformed("unknown token"));
            }
        }

        Ok(spec)
    }

    #[must_use]
    pub fn apply_to(&self, base: ContentStyle) -> ContentStyle {
        let mut style = if self.no_inherit { ContentStyle::new() } else { base };
        if let Some(fg) = self.maybe_fg {
            style.foreground_color = Some(fg);
        }
        if let Some(bg) = self.maybe_bg {
            style.background_color = Some(bg);
        }
        style.attributes.extend(self.attributes);
        style
    }
}

/// `#rrggbb`, `#rgb`, `default`, or an ANSI colour name with an optional `ansi` prefix
/// (eg: `ansired`, `darkgrey`).
fn parse_color(color_str: &str) -> Option<Color> {
    if let Some(hex) = color_str.strip_prefix('#') {
        return parse_hex(hex);
    }

    let name = color_str.strip_prefix("ansi").unwrap_or(color_str);
    let color = match name {
        "default" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "yellow" => Color::DarkYellow,
        "blue" => Color::DarkBlue,
        "magenta" => Color::DarkMagenta,
        "cyan" => Color::DarkCyan,
        "gray" | "grey" => Color::Grey,
        "darkgray" | "darkgrey" | "brightblack" => Color::DarkGrey,
        "brightred" => Color::Red,
        "brightgreen" => Color::Green,
        "brightyellow" => Color::Yellow,
        "brightblue" => Color::Blue,
        "brightmagenta" => Color::Magenta,
        "brightcyan" => Color::Cyan,
        "white" => Color::White,
        _ => return None,
    };
    Some(color)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        }),
        3 => {
            let expand = |it: u8| it * 17;
            Some(Color::Rgb {
                r: expand(channel(0..1)?),
                g: expand(channel(1..2)?),
                b: expand(channel(2..3)?),
            })
        }
        _ => None,
    }
}

fn parse_attribute(token: &str) -> Option<Attribute> {
    match token {
        "bold" => Some(Attribute::Bold),
        "italic" => Some(Attribute::Italic),
        "underline" => Some(Attribute::Underlined),
        "reverse" => Some(Attribute::Reverse),
        "dim" => Some(Attribute::Dim),
        "blink" => Some(Attribute::SlowBlink),
        "hidden" => Some(Attribute::Hidden),
        _ => None,
    }
}

fn default_style_str(style_class: StyleClass) -> &'static str {
    match style_class {
        StyleClass::QuestionMark => DEFAULT_QUESTIONMARK_STYLE,
        StyleClass::Question => DEFAULT_QUESTION_STYLE,
        StyleClass::Answer => DEFAULT_ANSWER_STYLE,
        StyleClass::Input => DEFAULT_INPUT_STYLE,
        StyleClass::Validator => DEFAULT_VALIDATOR_STYLE,
        StyleClass::Instruction => "",
    }
}

/// Resolved style for every [`StyleClass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptStyle {
    pub styles: HashMap<StyleClass, ContentStyle>,
}

impl PromptStyle {
    /// Start from the default palette, then apply `overrides` in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MalformedStyle`] if any override can't be parsed.
    pub fn try_new(overrides: &[(StyleClass, String)]) -> Result<Self, ConfigurationError> {
        let mut styles = HashMap::new();
        for style_class in StyleClass::iter() {
            let spec = StyleSpec::try_parse(style_class, default_style_str(style_class))?;
            styles.insert(style_class, spec.apply_to(ContentStyle::new()));
        }

        for (style_class, style_str) in overrides {
            let spec = StyleSpec::try_parse(*style_class, style_str)?;
            let base = styles.get(style_class).copied().unwrap_or_default();
            styles.insert(*style_class, spec.apply_to(base));
        }

        Ok(Self { styles })
    }

    #[must_use]
    pub fn get(&self, style_class: StyleClass) -> ContentStyle {
        self.styles.get(&style_class).copied().unwrap_or_default()
    }
}

impl Default for PromptStyle {
    fn default() -> Self {
        Self::try_new(&[]).unwrap_or_else(|_| Self {
            styles: HashMap::new(),
        })
    }
}
