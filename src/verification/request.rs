//! Classification request builder.
//!
//! A request is the triple submitted to the oracle: a natural-language
//! description of what must be checked, the mandatory output format, and a
//! one-sentence acceptance criterion. Building one is pure and infallible.

use std::fmt::Write as _;

/// Type of a required output field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Free string.
    Str,
    /// String with a short note, e.g. `str (first 50 chars)`.
    StrNote(&'static str),
    /// Boolean flag.
    Bool,
    /// Unbounded integer.
    Int,
    /// Integer within an inclusive range.
    IntRange(i64, i64),
    /// Unbounded float.
    Float,
    /// Float within an inclusive range.
    FloatRange(f64, f64),
    /// List of short strings.
    StrList,
    /// String restricted to a fixed set of literals.
    Enum(&'static [&'static str]),
}

impl FieldType {
    fn render(&self) -> String {
        match self {
            Self::Str => "str".to_string(),
            Self::StrNote(note) => format!("str ({note})"),
            Self::Bool => "bool".to_string(),
            Self::Int => "int".to_string(),
            Self::IntRange(lo, hi) => format!("int ({lo}-{hi})"),
            Self::Float => "float".to_string(),
            Self::FloatRange(lo, hi) => format!("float ({lo:?} to {hi:?})"),
            Self::StrList => "list[str]".to_string(),
            Self::Enum(values) => format!("str ({})", values.join(" or ")),
        }
    }
}

const MANDATORY: &str = "It is mandatory that you respond only using the JSON format above";
const NO_EXTRA_WORDS: &str = ",\nnothing else. Don't include any other words or characters";
const NO_FORMATTING: &str = ",\nyour output must be only JSON without any formatting prefix or suffix.";

/// How firmly the contract excludes text outside the JSON answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Exclusivity {
    /// Only the mandatory sentence.
    #[default]
    Mandatory,
    /// No other words or characters.
    NoExtraWords,
    /// No other words, and no formatting prefix or suffix.
    NoFormatting,
}

/// Mandatory-exclusive output format: an ordered list of required fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatContract {
    preamble: String,
    fields: Vec<(&'static str, FieldType)>,
    exclusivity: Exclusivity,
}

impl FormatContract {
    /// Start a JSON contract introduced by `preamble`.
    #[must_use]
    pub fn json(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
            fields: Vec::new(),
            exclusivity: Exclusivity::Mandatory,
        }
    }

    /// Add a required field.
    #[must_use]
    pub fn field(mut self, name: &'static str, ty: FieldType) -> Self {
        self.fields.push((name, ty));
        self
    }

    /// Forbid any other words or characters besides the JSON.
    #[must_use]
    pub fn no_extra_words(mut self) -> Self {
        self.exclusivity = Exclusivity::NoExtraWords;
        self
    }

    /// Forbid other words and any formatting prefix or suffix around the answer.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.exclusivity = Exclusivity::NoFormatting;
        self
    }

    /// Names of the required fields, in order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Render the contract text handed to the oracle.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(self.preamble.trim_end());
        out.push_str("\n{\n");
        let last = self.fields.len().saturating_sub(1);
        for (i, (name, ty)) in self.fields.iter().enumerate() {
            let sep = if i == last { "" } else { "," };
            let _ = writeln!(out, "    \"{name}\": {}{sep}", ty.render());
        }
        out.push_str("}\n\n");
        out.push_str(MANDATORY);
        match self.exclusivity {
            Exclusivity::Mandatory => out.push('.'),
            Exclusivity::NoExtraWords => {
                out.push_str(NO_EXTRA_WORDS);
                out.push('.');
            }
            Exclusivity::NoFormatting => {
                out.push_str(NO_EXTRA_WORDS);
                out.push_str(NO_FORMATTING);
            }
        }
        out
    }
}

/// The triple submitted to the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    /// What must be checked and which questions to answer.
    pub description: String,
    /// Rendered output-format contract.
    pub format: String,
    /// One sentence stating what makes a verdict acceptable.
    pub criterion: String,
}

impl ClassificationRequest {
    /// Build a request from its parts.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        format: &FormatContract,
        criterion: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            format: format.render(),
            criterion: criterion.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_fields_in_order() {
        let contract = FormatContract::json("Respond in JSON format:")
            .field("url", FieldType::Str)
            .field("is_original", FieldType::Bool)
            .field("originality_score", FieldType::IntRange(0, 100))
            .field("plagiarism_indicators", FieldType::StrList)
            .field("result", FieldType::Enum(&["ORIGINAL", "PLAGIARIZED"]));

        let text = contract.render();
        assert_eq!(
            text,
            "Respond in JSON format:\n{\n    \"url\": str,\n    \"is_original\": bool,\n    \
             \"originality_score\": int (0-100),\n    \"plagiarism_indicators\": list[str],\n    \
             \"result\": str (ORIGINAL or PLAGIARIZED)\n}\n\n\
             It is mandatory that you respond only using the JSON format above."
        );
        assert_eq!(
            contract.field_names().collect::<Vec<_>>(),
            vec![
                "url",
                "is_original",
                "originality_score",
                "plagiarism_indicators",
                "result"
            ]
        );
    }

    #[test]
    fn test_strict_suffix() {
        let text = FormatContract::json("Provide a JSON response:")
            .field("is_genuine", FieldType::Bool)
            .strict()
            .render();
        assert!(text.ends_with(
            "above,\nnothing else. Don't include any other words or characters,\n\
             your output must be only JSON without any formatting prefix or suffix."
        ));
    }

    #[test]
    fn test_no_extra_words_suffix() {
        let text = FormatContract::json("Provide weather information in the following JSON format:")
            .field("city", FieldType::Str)
            .no_extra_words()
            .render();
        assert!(text.ends_with(
            "above,\nnothing else. Don't include any other words or characters."
        ));
        assert!(!text.contains("formatting prefix"));
    }

    #[test]
    fn test_float_range_and_note() {
        let text = FormatContract::json("JSON:")
            .field("sentiment_score", FieldType::FloatRange(-1.0, 1.0))
            .field("text_preview", FieldType::StrNote("first 50 chars"))
            .render();
        assert!(text.contains("\"sentiment_score\": float (-1.0 to 1.0),"));
        assert!(text.contains("\"text_preview\": str (first 50 chars)\n"));
    }

    #[test]
    fn test_request_is_pure() {
        let contract = FormatContract::json("JSON:").field("status", FieldType::Str);
        let a = ClassificationRequest::new("Check it", &contract, "Be truthful.");
        let b = ClassificationRequest::new("Check it", &contract, "Be truthful.");
        assert_eq!(a, b);
        assert_eq!(a.format, contract.render());
    }
}
