//! Static font-metric tables and greedy word-wrap for the PDF writer.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe AFM advance widths (/1000) for the two builtin Helvetica faces the
//! PDF writer uses. Static tables let the writer break lines without loading
//! font files at render time; builtin-font metrics are exact for ASCII, and
//! non-ASCII codepoints fall back to an average width.
//!
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// US letter, in millimetres (8.5in × 11in).
pub const PAGE_WIDTH_MM: f32 = 215.9;
pub const PAGE_HEIGHT_MM: f32 = 279.4;

/// 1.0in left/right margins, 0.5in top/bottom.
pub const SIDE_MARGIN_MM: f32 = 25.4;
pub const TOP_MARGIN_MM: f32 = 12.7;
pub const BOTTOM_MARGIN_MM: f32 = 12.7;

pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Usable text width in points (6.5in × 72 = 468pt for the margins above).
pub fn printable_width_pt() -> f32 {
    (PAGE_WIDTH_MM - 2.0 * SIDE_MARGIN_MM) / MM_PER_PT
}

/// Usable text height in points, measured from the top margin down.
pub fn printable_height_pt() -> f32 {
    (PAGE_HEIGHT_MM - TOP_MARGIN_MM - BOTTOM_MARGIN_MM) / MM_PER_PT
}

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

/// The two builtin faces used in rendered documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for one face.
///
/// All widths are in em units at 1em (i.e., at the configured font size).
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space)
/// through 0x7E (~).
pub struct FontMetricTable {
    pub face: FontFace,
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters (codepoints > 0x7E).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Non-ASCII characters fall back to `average_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Measures the rendered width of a string in points at `font_size_pt`.
    pub fn width_pt(&self, s: &str, font_size_pt: f32) -> f32 {
        self.measure_str(s) * font_size_pt
    }
}

/// Returns the static metric table for a face.
pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Helvetica => &HELVETICA_TABLE,
        FontFace::HelveticaBold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Greedy word-wrap
// ────────────────────────────────────────────────────────────────────────────

/// Word-wraps `text` at `max_width_pt` for the given face and size.
///
/// Greedy first-fit: a word that does not fit starts a new line; a single
/// word wider than the line stays on its own line unbroken. Runs of
/// whitespace collapse to single spaces. Empty input yields no lines.
pub fn wrap_text(text: &str, face: FontFace, font_size_pt: f32, max_width_pt: f32) -> Vec<String> {
    let metrics = get_metrics(face);
    let max_em = max_width_pt / font_size_pt;
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_str(word);
        if !current.is_empty() && current_width + metrics.space_width + word_w > max_em {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            if !current.is_empty() {
                current.push(' ');
                current_width += metrics.space_width;
            }
            current.push_str(word);
            current_width += word_w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica regular, Adobe core AFM advance widths / 1000.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

/// Helvetica bold, Adobe core AFM advance widths / 1000.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    face: FontFace::HelveticaBold,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.611,
    space_width: 0.278,
};

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        let metrics = get_metrics(FontFace::Helvetica);
        assert_eq!(metrics.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_single_space() {
        let metrics = get_metrics(FontFace::Helvetica);
        let width = metrics.measure_str(" ");
        assert!(
            (width - 0.278).abs() < 1e-4,
            "space width should be 0.278, got {width}"
        );
    }

    #[test]
    fn test_measure_str_known_word() {
        let metrics = get_metrics(FontFace::Helvetica);
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics.measure_str("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust width should be ~2.056, got {width}"
        );
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back() {
        let metrics = get_metrics(FontFace::Helvetica);
        let width = metrics.measure_str("é");
        assert!(
            (width - metrics.average_char_width).abs() < 1e-4,
            "non-ASCII should use average_char_width"
        );
    }

    #[test]
    fn test_bold_face_measures_wider() {
        let regular = get_metrics(FontFace::Helvetica);
        let bold = get_metrics(FontFace::HelveticaBold);
        let text = "Professional Experience";
        assert!(
            bold.measure_str(text) > regular.measure_str(text),
            "bold should measure wider than regular"
        );
    }

    #[test]
    fn test_width_pt_scales_with_font_size() {
        let metrics = get_metrics(FontFace::Helvetica);
        let at_10 = metrics.width_pt("Resume", 10.0);
        let at_20 = metrics.width_pt("Resume", 20.0);
        assert!(
            (at_20 - 2.0 * at_10).abs() < 1e-3,
            "doubling the font size should double the width"
        );
    }

    #[test]
    fn test_printable_width_matches_us_letter() {
        // 8.5in page minus two 1.0in margins = 6.5in = 468pt
        let width = printable_width_pt();
        assert!(
            (width - 468.0).abs() < 0.5,
            "printable width should be ~468pt, got {width}"
        );
    }

    #[test]
    fn test_wrap_text_empty_yields_no_lines() {
        let lines = wrap_text("", FontFace::Helvetica, 10.0, 468.0);
        assert!(lines.is_empty());
        let blank = wrap_text("   \n  ", FontFace::Helvetica, 10.0, 468.0);
        assert!(blank.is_empty());
    }

    #[test]
    fn test_wrap_text_single_word_single_line() {
        let lines = wrap_text("Rust", FontFace::Helvetica, 10.0, 468.0);
        assert_eq!(lines, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_wrap_text_lines_fit_within_width() {
        let text = "Built a document pipeline that ingests uploaded resumes, validates the \
                    extracted profile, and renders styled PDF output for four document types";
        let max_width = 150.0;
        let lines = wrap_text(text, FontFace::Helvetica, 10.0, max_width);
        assert!(lines.len() > 1, "narrow width should force wrapping");
        let metrics = get_metrics(FontFace::Helvetica);
        for line in &lines {
            assert!(
                metrics.width_pt(line, 10.0) <= max_width + 0.01,
                "line exceeds max width: {line:?}"
            );
        }
    }

    #[test]
    fn test_wrap_text_preserves_all_words() {
        let text = "one  two\tthree\nfour five";
        let lines = wrap_text(text, FontFace::Helvetica, 10.0, 60.0);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, "one two three four five");
    }

    #[test]
    fn test_wrap_text_overlong_word_kept_whole() {
        let word = "Supercalifragilisticexpialidocious";
        let lines = wrap_text(word, FontFace::Helvetica, 12.0, 40.0);
        assert_eq!(lines, vec![word.to_string()], "words are never split");
    }
}
