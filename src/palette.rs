use crate::error::{Error, Result};
use crate::feature::TypeId;
use ratatui::style::Color;
use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;

const DEFAULT_COLORS: [(&str, &str); 5] = [
    ("1", "rgb(50, 50, 0)"),
    ("2", "rgb(50, 0, 0)"),
    ("3", "rgb(0, 50, 75)"),
    ("4", "rgb(0, 50, 0)"),
    ("5", "rgb(0, 50, 75)"),
];

const SELECTED_COLORS: [(&str, &str); 10] = [
    ("0", "rgb(230, 230, 120)"),
    ("1", "rgb(255, 255, 50)"),
    ("2", "rgb(250, 0, 50)"),
    ("3", "rgb(0, 200, 250)"),
    ("4", "rgb(0, 200, 100)"),
    ("5", "rgb(200, 80, 80)"),
    ("6", "rgb(50, 150, 200)"),
    ("7", "rgb(100, 240, 50)"),
    ("8", "rgb(255, 180, 100)"),
    ("9", "rgb(150, 150, 200)"),
];

/// The two built-in palettes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Palette {
    Default,
    #[default]
    Selected,
}

impl Palette {
    pub fn table(self) -> ColorTable {
        match self {
            Palette::Default => ColorTable::from_pairs(DEFAULT_COLORS),
            Palette::Selected => ColorTable::from_pairs(SELECTED_COLORS),
        }
    }
}

/// Maps a feature type to the color string handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    colors: HashMap<TypeId, String>,
}

impl ColorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut table = Self::new();
        for (type_id, color) in pairs {
            table.insert(TypeId::from(type_id), color);
        }
        table
    }

    pub fn insert(&mut self, type_id: TypeId, color: impl Into<String>) -> Option<String> {
        self.colors.insert(type_id, color.into())
    }

    /// Unknown types resolve to `None`; no fallback is substituted.
    pub fn get(&self, type_id: &TypeId) -> Option<&str> {
        self.colors.get(type_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Read a table whose header names a `type_id` and a `color` column. Every
    /// color must be parseable by [`parse_color`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column = |names: &[&str]| -> Result<usize> {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
                .ok_or_else(|| Error::InvalidRecord {
                    line: 1,
                    reason: format!("missing `{}` column", names[0]),
                })
        };
        let type_col = column(&["type_id", "type", "id"])?;
        let color_col = column(&["color", "colour"])?;

        let mut table = Self::new();
        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line() as usize);
            let (Some(type_id), Some(color)) = (record.get(type_col), record.get(color_col)) else {
                return Err(Error::InvalidRecord {
                    line,
                    reason: "expected `type_id,color`".to_string(),
                });
            };
            parse_color(color)?;
            if table.insert(TypeId::from(type_id), color).is_some() {
                tracing::warn!("color table line {line}: type {type_id} redefined");
            }
        }

        if table.is_empty() {
            return Err(Error::EmptyInput("color table"));
        }
        Ok(table)
    }
}

/// Convert a color string from a table into a terminal color.
///
/// Accepts `rgb(r, g, b)` as well as anything ratatui understands (`#rrggbb`,
/// named colors, indexed colors).
pub fn parse_color(spec: &str) -> Result<Color> {
    let spec = spec.trim();
    if let Some(inner) = spec
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let channels = inner
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<std::result::Result<Vec<u8>, _>>()
            .map_err(|_| Error::InvalidColor(spec.to_string()))?;
        return match channels[..] {
            [r, g, b] => Ok(Color::Rgb(r, g, b)),
            _ => Err(Error::InvalidColor(spec.to_string())),
        };
    }
    Color::from_str(spec).map_err(|_| Error::InvalidColor(spec.to_string()))
}
