//! PKCE (RFC 7636) S256 verifier and challenge generation.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, thread_rng};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
pub struct PkceChallenge {
    pub code_verifier: String,
    pub code_challenge: String,
}

impl PkceChallenge {
    pub const METHOD: &'static str = "S256";

    pub fn generate() -> Self {
        let mut rng = thread_rng();
        let bytes: Vec<u8> = (0..48).map(|_| rng.r#gen::<u8>()).collect();
        let code_verifier = URL_SAFE_NO_PAD.encode(bytes);
        let code_challenge = challenge_for(&code_verifier);

        Self {
            code_verifier,
            code_challenge,
        }
    }
}

pub fn challenge_for(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}
