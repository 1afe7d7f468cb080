use crate::coverage::{Coverage, CoverageSegment, LegendEntry};
use crate::coverage::clamped;
use crate::palette::parse_color;
use crossterm::queue;
use crossterm::style::{
    Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use ratatui::prelude::{Color, Line, Modifier, Span, Style};
use std::io::{self, Write};

/// Glyph painted in the legend swatch.
const SWATCH: &str = "  ";

fn to_color(spec: &str) -> Option<Color> {
    match parse_color(spec) {
        Ok(color) => Some(color),
        Err(e) => {
            tracing::warn!("{e}, painting without it");
            None
        }
    }
}

/// Style of one accepted segment. Segments without a background color only
/// keep their underline; the text color is applied together with a background.
pub fn segment_style(segment: &CoverageSegment) -> Style {
    let mut style = Style::default();
    if let Some(bg) = segment.background_color.as_deref().and_then(to_color) {
        style = style.bg(bg);
        if let Some(fg) = to_color(&segment.text_color) {
            style = style.fg(fg);
        }
    }
    if segment.underline {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

/// Paint `sequence` with the coverage segments, wrapping every `width` bases.
pub fn sequence_lines(sequence: &str, coverage: &Coverage, width: usize) -> Vec<Line<'static>> {
    let seq = sequence.as_bytes();
    let width = width.max(1);

    let mut position_styles: Vec<Style> = vec![Style::default(); seq.len()];
    for segment in &coverage.segments {
        let style = segment_style(segment);
        let range = clamped(seq.len(), segment.start, segment.end);
        for pos_style in &mut position_styles[range] {
            *pos_style = style;
        }
    }

    seq.chunks(width)
        .zip(position_styles.chunks(width))
        .map(|(bases, styles)| {
            // group consecutive positions with the same style
            let mut spans = Vec::new();
            let mut current_start = 0;
            for pos in 1..=bases.len() {
                if pos == bases.len() || styles[pos] != styles[current_start] {
                    spans.push(styled_span(&bases[current_start..pos], styles[current_start]));
                    current_start = pos;
                }
            }
            Line::from(spans)
        })
        .collect()
}

fn styled_span(bases: &[u8], style: Style) -> Span<'static> {
    let text = String::from_utf8_lossy(bases).into_owned();
    if style == Style::default() {
        text.into()
    } else {
        Span::styled(text, style)
    }
}

/// One line per legend entry: a color swatch followed by the feature name.
pub fn legend_lines(legend: &[LegendEntry]) -> Vec<Line<'static>> {
    legend
        .iter()
        .map(|entry| {
            let mut swatch = Style::default();
            if let Some(color) = entry.color.as_deref().and_then(to_color) {
                swatch = swatch.bg(color);
            }
            let mut name = Style::default();
            if entry.underline {
                name = name.add_modifier(Modifier::UNDERLINED);
            }
            Line::from(vec![
                Span::styled(SWATCH, swatch),
                Span::from(" "),
                Span::styled(entry.name.clone(), name),
            ])
        })
        .collect()
}

/// Write styled lines to a terminal stream.
pub fn print_lines<W: Write>(out: &mut W, lines: &[Line]) -> io::Result<()> {
    for line in lines {
        for span in &line.spans {
            if let Some(fg) = span.style.fg {
                queue!(out, SetForegroundColor(fg.into()))?;
            }
            if let Some(bg) = span.style.bg {
                queue!(out, SetBackgroundColor(bg.into()))?;
            }
            if span.style.add_modifier.contains(Modifier::UNDERLINED) {
                queue!(out, SetAttribute(Attribute::Underlined))?;
            }
            queue!(out, Print(&span.content), SetAttribute(Attribute::Reset), ResetColor)?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{highlight, BuildOptions, Ignore};
    use crate::feature::Feature;
    use crate::palette::Palette;

    fn coverage(features: &[Feature], seq: &str) -> Coverage {
        highlight(features, seq, &Palette::Selected.table(), BuildOptions::default(), Ignore)
    }

    #[test]
    fn test_segment_style() {
        let cov = coverage(&[Feature::new(0, 2, "A", 1)], "ACGT");
        let style = segment_style(&cov.segments[0]);
        assert_eq!(style.bg, Some(Color::Rgb(255, 255, 50)));
        assert_eq!(style.fg, Some(Color::Black));
    }

    #[test]
    fn test_unknown_color_keeps_default_style() {
        let cov = coverage(&[Feature::new(0, 2, "A", 77)], "ACGT");
        assert_eq!(segment_style(&cov.segments[0]), Style::default());
    }

    #[test]
    fn test_sequence_lines_spans() {
        let seq = "AAACCCGGGT";
        let cov = coverage(&[Feature::new(3, 6, "C", 2)], seq);
        let lines = sequence_lines(seq, &cov, 80);
        assert_eq!(lines.len(), 1);
        let spans = &lines[0].spans;
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0].content, "AAA");
        assert_eq!(spans[0].style, Style::default());
        assert_eq!(spans[1].content, "CCC");
        assert_eq!(spans[1].style.bg, Some(Color::Rgb(250, 0, 50)));
        assert_eq!(spans[2].content, "GGGT");
    }

    #[test]
    fn test_sequence_lines_wrap() {
        let seq = "AAACCCGGGT";
        let cov = coverage(&[Feature::new(2, 5, "C", 2), Feature::new(8, 20, "past", 3)], seq);
        let lines = sequence_lines(seq, &cov, 4);
        let text: Vec<String> = lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(text, vec!["AAAC", "CCGG", "GT"]);
        // the painted segment is split across the wrap
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[1].spans[0].content, "C");
        assert_eq!(lines[2].spans[0].style.bg, Some(Color::Rgb(0, 200, 250)));
    }

    #[test]
    fn test_empty_sequence() {
        let cov = coverage(&[Feature::new(0, 2, "A", 1)], "");
        assert!(sequence_lines("", &cov, 10).is_empty());
    }

    #[test]
    fn test_legend_lines() {
        let features = [Feature::new(0, 2, "promoter", 1), Feature::new(2, 3, "odd", 99)];
        let cov = coverage(&features, "ACGT");
        let lines = legend_lines(&cov.legend);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].spans[0].style.bg, Some(Color::Rgb(255, 255, 50)));
        assert_eq!(lines[0].spans[2].content, "promoter");
        assert_eq!(lines[1].spans[0].style.bg, None);
    }

    #[test]
    fn test_print_lines() {
        let seq = "ACGT";
        let cov = coverage(&[Feature::new(1, 3, "CG", 1)], seq);
        let mut out = Vec::new();
        print_lines(&mut out, &sequence_lines(seq, &cov, 80)).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with('A'));
        assert!(printed.contains("CG"));
        assert!(printed.ends_with("T\u{1b}[0m\u{1b}[0m\n"));
    }
}
