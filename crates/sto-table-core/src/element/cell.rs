//! Cell text helpers shared by the element codecs.
//!
//! Scalars use Rust's shortest round-trip `f64` text. Fixed-size vectors are
//! written as `~[c0,c1,...]`; nested vectors nest the same form.

use std::fmt::Write as _;

pub(crate) fn push_f64(out: &mut String, value: f64) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{value:?}");
}

pub(crate) fn parse_f64(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

pub(crate) fn push_components(out: &mut String, components: &[f64]) {
    out.push_str("~[");
    for (i, c) in components.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_f64(out, *c);
    }
    out.push(']');
}

/// Strip the `~[` ... `]` wrapper and return the inner text.
pub(crate) fn unwrap_brackets(text: &str) -> Option<&str> {
    let text = text.trim();
    let text = text.strip_prefix('~').unwrap_or(text);
    text.strip_prefix('[')?.strip_suffix(']')
}

pub(crate) fn parse_components<const N: usize>(text: &str) -> Option<[f64; N]> {
    let inner = unwrap_brackets(text)?;
    let mut out = [0.0; N];
    let mut parts = inner.split(',');
    for slot in out.iter_mut() {
        *slot = parse_f64(parts.next()?)?;
    }
    match parts.next() {
        Some(_) => None,
        None => Some(out),
    }
}

/// Split `~[a,b,c],~[d,e,f]` into its two bracketed halves.
pub(crate) fn split_nested_pair(inner: &str) -> Option<(&str, &str)> {
    let close = inner.find(']')?;
    let (first, rest) = inner.split_at(close + 1);
    let second = rest.trim_start().strip_prefix(',')?;
    Some((first, second))
}
