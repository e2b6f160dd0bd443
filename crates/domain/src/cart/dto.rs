use common::{CartId, UserId};
use serde::{Deserialize, Serialize};
use user_directory::User;

/// Cart as exchanged over HTTP.
///
/// `user` is only populated by the cart service after a directory lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    #[serde(default)]
    pub cart_id: Option<CartId>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}
