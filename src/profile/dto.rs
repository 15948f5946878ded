use serde::{Deserialize, Serialize};

use crate::farmers::Farmer;

/// Partial profile update. There is no `email` field on purpose: the address
/// is immutable after registration, so an `email` key in the payload is
/// dropped during deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "profilePicture")]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct FarmerResponse {
    pub success: bool,
    pub farmer: Farmer,
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_drops_email_key() {
        let req: UpdateProfileRequest = serde_json::from_str(
            r#"{"name":"Ravi","email":"new@gmail.com","profilePicture":"data:image/png;base64,xyz"}"#,
        )
        .expect("deserialize");
        assert_eq!(req.name.as_deref(), Some("Ravi"));
        assert_eq!(req.profile_picture.as_deref(), Some("data:image/png;base64,xyz"));
        assert!(req.role.is_none());
    }

    #[test]
    fn farmer_response_hides_password_hash() {
        use time::OffsetDateTime;
        use uuid::Uuid;

        let response = FarmerResponse {
            success: true,
            farmer: Farmer {
                id: Uuid::new_v4(),
                name: "Ravi".into(),
                email: "ravi.k@gmail.com".into(),
                password_hash: "secret-hash".into(),
                role: "Farmer".into(),
                profile_picture: None,
                created_at: OffsetDateTime::now_utc(),
            },
        };
        let json = serde_json::to_string(&response).expect("serialize");
        assert!(json.contains("ravi.k@gmail.com"));
        assert!(json.contains("profilePicture"));
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }
}
