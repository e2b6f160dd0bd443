use serde::{Deserialize, Serialize};

/// Declares an integer identity newtype.
///
/// Identities are generated by the persistence layer, so the wrapped value is
/// a plain `i32` that serializes transparently as a JSON number.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Wraps a raw identity value.
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Returns the raw identity value.
            pub const fn as_i32(self) -> i32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identity of a persisted cart.
    CartId
);

entity_id!(
    /// Identity of a persisted order.
    OrderId
);

entity_id!(
    /// Identity of a persisted product category.
    CategoryId
);

entity_id!(
    /// Identity of a persisted product.
    ProductId
);

entity_id!(
    /// Identity of a user owned by the remote user directory.
    UserId
);
