//! Decoding of zenity's stdout.

use shared::{
    domain::{Credentials, DialogKind, Rgb},
    error::DialogError,
};

use crate::args::SEPARATOR;

pub fn split_values(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(SEPARATOR).map(str::to_string).collect()
}

pub fn credentials(raw: &str, with_username: bool) -> Credentials {
    match raw.split_once(SEPARATOR) {
        Some((username, password)) if with_username => Credentials {
            username: Some(username.to_string()),
            password: password.to_string(),
        },
        _ => Credentials {
            username: None,
            password: raw.to_string(),
        },
    }
}

/// Accepts `rgb(r,g,b)`, `rgba(r,g,b,a)`, `#rrggbb` and `#rrrrggggbbbb`.
pub fn color(raw: &str) -> Result<Rgb, DialogError> {
    let trimmed = raw.trim();
    let parsed = match trimmed.strip_prefix('#') {
        Some(hex) => hex_color(hex),
        None => functional_color(trimmed),
    };
    parsed.ok_or_else(|| DialogError::parse(DialogKind::Color, raw))
}

fn hex_color(hex: &str) -> Option<Rgb> {
    if !hex.is_ascii() {
        return None;
    }
    let width = match hex.len() {
        6 => 2,
        12 => 4,
        _ => return None,
    };
    // Wider channels keep only their most significant byte.
    let channel = |index: usize| {
        let start = index * width;
        u8::from_str_radix(&hex[start..start + 2], 16).ok()
    };
    Some(Rgb::new(channel(0)?, channel(1)?, channel(2)?))
}

fn functional_color(raw: &str) -> Option<Rgb> {
    let body = raw
        .strip_prefix("rgba(")
        .or_else(|| raw.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    let mut parts = body.split(',').map(str::trim);
    let mut channel = || parts.next()?.parse::<u8>().ok();
    Some(Rgb::new(channel()?, channel()?, channel()?))
}
