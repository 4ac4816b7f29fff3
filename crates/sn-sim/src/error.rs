use sn_core::NavError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("entrance {index} pairs with missing entrance {partner}")]
    DanglingEntrance {
        index:   usize,
        partner: usize,
    },

    #[error("navigation setup failed: {0}")]
    Nav(#[from] NavError),
}

pub type SimResult<T> = Result<T, SimError>;
