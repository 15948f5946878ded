use tracing::{info, warn};

use crate::auth::dto::{LoginRequest, RegisterRequest};
use crate::auth::jwt::JwtKeys;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::validation::{credential_errors, normalize_email};
use crate::error::ApiError;
use crate::farmers::FarmerStore;

const DEFAULT_ROLE: &str = "Farmer";

/// Validates, creates the farmer record and signs a token for it.
/// Input is checked before the store is touched.
pub async fn register_farmer(
    store: &dyn FarmerStore,
    keys: &JwtKeys,
    req: RegisterRequest,
) -> Result<String, ApiError> {
    let email = normalize_email(&req.email);

    let mut errors = credential_errors(&email, &req.password);
    if req.name.trim().is_empty() {
        errors.insert("name", "Name is required.".into());
    }
    if !errors.is_empty() {
        warn!(fields = ?errors.keys().collect::<Vec<_>>(), "register validation failed");
        return Err(ApiError::Validation(errors));
    }

    if store.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::DuplicateEmail);
    }

    let hash = hash_password(&req.password)?;
    let role = req
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .unwrap_or(DEFAULT_ROLE);

    let farmer = store.create(req.name.trim(), &email, &hash, role).await?;
    let token = keys.sign(farmer.id)?;
    info!(farmer_id = %farmer.id, email = %farmer.email, "farmer registered");
    Ok(token)
}

/// Checks credentials and signs a fresh token. Unknown email and wrong
/// password return the same error so accounts cannot be enumerated.
pub async fn login_farmer(
    store: &dyn FarmerStore,
    keys: &JwtKeys,
    req: LoginRequest,
) -> Result<String, ApiError> {
    let email = normalize_email(&req.email);

    let errors = credential_errors(&email, &req.password);
    if !errors.is_empty() {
        warn!(fields = ?errors.keys().collect::<Vec<_>>(), "login validation failed");
        return Err(ApiError::Validation(errors));
    }

    let farmer = match store.find_by_email(&email).await? {
        Some(farmer) => farmer,
        None => {
            warn!(email = %email, "login unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(&req.password, &farmer.password_hash)? {
        warn!(farmer_id = %farmer.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = keys.sign(farmer.id)?;
    info!(farmer_id = %farmer.id, "farmer logged in");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use axum::extract::FromRef;

    use super::*;
    use crate::state::AppState;

    fn setup() -> (AppState, JwtKeys) {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        (state, keys)
    }

    fn register_req(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: None,
        }
    }

    #[tokio::test]
    async fn register_normalizes_email_and_defaults_role() {
        let (state, keys) = setup();
        let token = register_farmer(
            state.store.as_ref(),
            &keys,
            register_req("Ravi", "Ravi.K@GMAIL.com", "Secret@123"),
        )
        .await
        .expect("register");

        let claims = keys.verify(&token).expect("token is valid");
        let farmer = state
            .store
            .find_by_email("ravi.k@gmail.com")
            .await
            .expect("find")
            .expect("stored under normalized email");
        assert_eq!(farmer.id, claims.sub);
        assert_eq!(farmer.role, "Farmer");
        assert_ne!(farmer.password_hash, "Secret@123"); // never stored in the clear
    }

    #[tokio::test]
    async fn register_rejects_bad_input_per_field() {
        let (state, keys) = setup();
        let err = register_farmer(
            state.store.as_ref(),
            &keys,
            register_req("  ", "ravi@yahoo.com", "weak"),
        )
        .await
        .unwrap_err();

        match err {
            ApiError::Validation(errors) => {
                assert!(errors.contains_key("name"));
                assert!(errors.contains_key("email"));
                assert!(errors.contains_key("password"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        // nothing was written
        assert!(state
            .store
            .find_by_email("ravi@yahoo.com")
            .await
            .expect("find")
            .is_none());
    }

    #[tokio::test]
    async fn register_twice_with_case_variant_email_is_a_duplicate() {
        let (state, keys) = setup();
        register_farmer(
            state.store.as_ref(),
            &keys,
            register_req("Ravi", "ravi.k@gmail.com", "Secret@123"),
        )
        .await
        .expect("first register");

        let err = register_farmer(
            state.store.as_ref(),
            &keys,
            register_req("Ravi Again", "RAVI.K@gmail.com", "Another@123"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::DuplicateEmail));
    }

    #[tokio::test]
    async fn register_honors_explicit_role() {
        let (state, keys) = setup();
        register_farmer(
            state.store.as_ref(),
            &keys,
            RegisterRequest {
                name: "Ravi".into(),
                email: "ravi.k@gmail.com".into(),
                password: "Secret@123".into(),
                role: Some("Agronomist".into()),
            },
        )
        .await
        .expect("register");

        let farmer = state
            .store
            .find_by_email("ravi.k@gmail.com")
            .await
            .expect("find")
            .expect("present");
        assert_eq!(farmer.role, "Agronomist");
    }

    #[tokio::test]
    async fn login_succeeds_with_correct_credentials() {
        let (state, keys) = setup();
        register_farmer(
            state.store.as_ref(),
            &keys,
            register_req("Ravi", "ravi.k@gmail.com", "Secret@123"),
        )
        .await
        .expect("register");

        let token = login_farmer(
            state.store.as_ref(),
            &keys,
            LoginRequest {
                email: "  Ravi.K@Gmail.Com ".into(),
                password: "Secret@123".into(),
            },
        )
        .await
        .expect("login");
        keys.verify(&token).expect("token is valid");
    }

    #[tokio::test]
    async fn login_failure_is_indistinguishable() {
        let (state, keys) = setup();
        register_farmer(
            state.store.as_ref(),
            &keys,
            register_req("Ravi", "ravi.k@gmail.com", "Secret@123"),
        )
        .await
        .expect("register");

        let wrong_password = login_farmer(
            state.store.as_ref(),
            &keys,
            LoginRequest {
                email: "ravi.k@gmail.com".into(),
                password: "Wrong@1234".into(),
            },
        )
        .await
        .unwrap_err();

        let unknown_email = login_farmer(
            state.store.as_ref(),
            &keys,
            LoginRequest {
                email: "nobody@gmail.com".into(),
                password: "Secret@123".into(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(wrong_password, ApiError::InvalidCredentials));
        assert!(matches!(unknown_email, ApiError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn login_validates_format_before_lookup() {
        let (state, keys) = setup();
        let err = login_farmer(
            state.store.as_ref(),
            &keys,
            LoginRequest {
                email: "not-an-email".into(),
                password: "Secret@123".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
