use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Invalid config value: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_and_format_errors_display() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.to_string(), "IO error: gone");
        let err = "zip".parse::<crate::format::Format>().unwrap_err();
        assert!(matches!(err, Error::UnknownFormat(ref s) if s == "zip"));
    }
}
