use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RsrpError {
    #[error("unknown environment '{0}'")]
    UnknownEnvironment(String),

    #[error("invalid value for '{0}'")]
    Builder(&'static str),
}
