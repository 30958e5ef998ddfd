use rush_schema::Milliseconds;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartErrorKind {
    Timing,
    Windows,
    Object,
}

impl ChartErrorKind {
    pub(crate) fn from_code(code: &'static str) -> Self {
        match code {
            "E1001" | "E1002" => Self::Timing,
            "E2001" | "E2002" | "E2003" | "E2004" => Self::Windows,
            "E3001" => Self::Object,

            // Unknown codes are treated as object errors.
            _ => Self::Object,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{code}: {message}")]
pub struct ChartError {
    pub code: &'static str,
    pub kind: ChartErrorKind,
    pub message: String,

    pub object_index: Option<usize>,
    pub time_ms: Option<Milliseconds>,
}

impl ChartError {
    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            kind: ChartErrorKind::from_code(code),
            message: message.into(),

            object_index: None,
            time_ms: None,
        }
    }

    pub fn with_object_index(mut self, index: usize) -> Self {
        self.object_index = Some(index);
        self
    }

    pub fn with_time_ms(mut self, time_ms: Milliseconds) -> Self {
        self.time_ms = Some(time_ms);
        self
    }
}
