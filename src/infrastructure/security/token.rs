// src/infrastructure/security/token.rs
use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::security::{TokenVerifier, VerifiedToken},
};
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};

/// Verifies Biscuit tokens minted by the authentication service. This
/// service never issues tokens; it only checks signatures and embedded
/// caveats (expiry included) and extracts the subject id.
#[derive(Clone)]
pub struct BiscuitTokenVerifier {
    public: PublicKey,
}

impl BiscuitTokenVerifier {
    pub fn new(public_key_hex: &str) -> ApplicationResult<Self> {
        let public = PublicKey::from_bytes_hex(public_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        Ok(Self { public })
    }
}

#[async_trait]
impl TokenVerifier for BiscuitTokenVerifier {
    async fn verify(&self, token: &str) -> ApplicationResult<VerifiedToken> {
        let biscuit = Biscuit::from_base64(token, self.public)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        // Enforce the caveats baked into the token, including time checks.
        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        authorizer
            .authorize()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        let view = biscuit
            .authorizer()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;
        let (facts, _, _, _) = view.dump();

        extract_user_id(facts)
    }
}

/// The issuing service embeds a `user({id}, {name})` fact; the first integer
/// term of that fact is the subject id.
fn extract_user_id(facts: Vec<biscuit_auth::builder::Fact>) -> ApplicationResult<VerifiedToken> {
    for fact in facts {
        if fact.predicate.name != "user" {
            continue;
        }
        for term in &fact.predicate.terms {
            if let Term::Integer(user_id) = term {
                return Ok(VerifiedToken { user_id: *user_id });
            }
        }
    }

    Err(ApplicationError::unauthorized("token carries no user fact"))
}
