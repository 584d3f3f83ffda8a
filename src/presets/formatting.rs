//! Formatter preset.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingComma {
    All,
    Es5,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EndOfLine {
    Lf,
    Crlf,
    Cr,
    Auto,
}

/// Prettier options used by every downstream project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatterPreset {
    pub semi: bool,
    pub trailing_comma: TrailingComma,
    pub single_quote: bool,
    pub print_width: u16,
    pub tab_width: u8,
    pub end_of_line: EndOfLine,
}

impl Default for FormatterPreset {
    fn default() -> Self {
        Self {
            semi: false,
            trailing_comma: TrailingComma::All,
            single_quote: false,
            print_width: 120,
            tab_width: 2,
            end_of_line: EndOfLine::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_snapshot() {
        let json = serde_json::to_string_pretty(&FormatterPreset::default()).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "semi": false,
          "trailingComma": "all",
          "singleQuote": false,
          "printWidth": 120,
          "tabWidth": 2,
          "endOfLine": "auto"
        }
        "#);
    }
}
