// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SVG templates: `{{ KEY }}` placeholders compiled once into segments and
// substituted many times.

pub mod catalog;

use std::collections::BTreeMap;

use papiers_core::error::{PapiersError, Result};

/// One piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A compiled SVG template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgTemplate {
    name: String,
    segments: Vec<Segment>,
}

impl SvgTemplate {
    /// Split `source` into literal text and `{{ KEY }}` placeholders.
    ///
    /// Keys are upper-case ASCII letters, digits and underscores; whitespace
    /// inside the braces is ignored.
    pub fn compile(name: impl Into<String>, source: &str) -> Result<Self> {
        let name = name.into();
        let mut segments = Vec::new();
        let mut rest = source;

        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_owned()));
            }
            let after_open = &rest[open + 2..];
            let close = after_open.find("}}").ok_or_else(|| {
                PapiersError::Template(format!(
                    "{name}: unterminated placeholder at byte {}",
                    source.len() - rest.len() + open
                ))
            })?;
            let key = after_open[..close].trim();
            if key.is_empty()
                || !key
                    .chars()
                    .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
            {
                return Err(PapiersError::Template(format!(
                    "{name}: invalid placeholder name {key:?}"
                )));
            }
            segments.push(Segment::Placeholder(key.to_owned()));
            rest = &after_open[close + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }

        Ok(Self { name, segments })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distinct placeholder names, in first-use order.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(key) = segment {
                if !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Substitute every placeholder. A placeholder without a value is an error.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(key) => {
                    let value = context.values.get(key).ok_or_else(|| {
                        PapiersError::Template(format!("{}: no value for {key}", self.name))
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Values substituted into a template. Text is XML-escaped on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    values: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`, escaping it for XML text and attributes.
    pub fn insert(&mut self, key: impl Into<String>, value: impl AsRef<str>) -> &mut Self {
        self.values.insert(key.into(), escape_xml(value.as_ref()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Escape the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
