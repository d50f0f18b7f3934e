use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone)]
pub enum ParseError {
    #[error("empty input")]
    EmptyInput,

    #[error("malformed markup: {0}")]
    Malformed(String),

    #[error("document has no root element")]
    NoRootElement,

    #[error("multiple root elements")]
    MultipleRoots,
}

impl ParseError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}

impl From<quick_xml::Error> for ParseError {
    fn from(e: quick_xml::Error) -> Self {
        ParseError::Malformed(e.to_string())
    }
}
