use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read vendor policy file {path}")]
    PolicyFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse vendor policy file")]
    PolicyFileParse(#[from] serde_yaml::Error),

    #[error("invalid vendor policy: {0}")]
    Validation(String),

    #[error("unknown vendor: {0}")]
    UnknownVendor(String),

    #[error("unknown range '{key}' for vendor {vendor}")]
    UnknownRange { vendor: String, key: String },
}
