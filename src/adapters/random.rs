use crate::domain::ports::SecretSource;
use crate::utils::error::{InitError, Result};
use rand::rngs::OsRng;
use rand::TryRngCore;

/// Operating-system CSPRNG. Failures surface as errors rather than panics.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSecretSource;

impl SecretSource for OsSecretSource {
    fn fill_bytes(&self, buf: &mut [u8]) -> Result<()> {
        let mut csprng = OsRng;
        csprng
            .try_fill_bytes(buf)
            .map_err(|e| InitError::SecretError {
                message: e.to_string(),
            })
    }
}
