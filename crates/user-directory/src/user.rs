use common::UserId;
use serde::{Deserialize, Serialize};

/// A user record as served by the user directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_directory_payload_and_ignores_extra_fields() {
        let json = r#"{
            "userId": 1,
            "firstName": "John",
            "lastName": "Doe",
            "email": "john@example.com",
            "phone": "123456789",
            "imageUrl": "john.png",
            "credential": {"username": "johndoe"}
        }"#;

        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.user_id, Some(UserId::new(1)));
        assert_eq!(user.first_name.as_deref(), Some("John"));
        assert_eq!(user.phone.as_deref(), Some("123456789"));
    }

    #[test]
    fn missing_fields_are_absent() {
        let user: User = serde_json::from_str(r#"{"userId": 2}"#).unwrap();
        assert_eq!(user.user_id, Some(UserId::new(2)));
        assert!(user.email.is_none());
    }
}
