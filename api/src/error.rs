use app::backend;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("http request failed")]
    Http(#[from] reqwest::Error),
    #[error("invalid url")]
    Url(#[from] url::ParseError),
    #[error("unexpected status {0}")]
    Status(StatusCode),
}

impl From<Error> for backend::Error {
    fn from(e: Error) -> Self {
        match e {
            Error::Status(status) => backend::Error::Status(status.as_u16()),
            Error::Http(e) if e.is_decode() => backend::Error::Decode(Box::new(e)),
            e => backend::Error::Transport(Box::new(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_keeps_code() {
        let e: backend::Error = Error::Status(StatusCode::SERVICE_UNAVAILABLE).into();
        assert!(matches!(e, backend::Error::Status(503)));
    }

    #[test]
    fn test_url_error_is_transport() {
        let e: backend::Error = Error::Url(url::ParseError::EmptyHost).into();
        assert!(matches!(e, backend::Error::Transport(_)));
    }
}
