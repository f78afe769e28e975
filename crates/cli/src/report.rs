use repofind_locator::FunctionMatch;
use serde::Serialize;

/// JSON shape for `find`/`find-local` results.
#[derive(Debug, Serialize)]
pub struct FindOutput {
    pub file: String,
    pub function: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl FindOutput {
    pub fn found(file: &str, function: &str, m: &FunctionMatch) -> Self {
        Self {
            file: file.to_string(),
            function: function.to_string(),
            found: true,
            start_line: Some(m.start_line),
            end_line: Some(m.end_line),
            text: Some(m.text.clone()),
        }
    }

    pub fn not_found(file: &str, function: &str) -> Self {
        Self {
            file: file.to_string(),
            function: function.to_string(),
            found: false,
            start_line: None,
            end_line: None,
            text: None,
        }
    }
}
