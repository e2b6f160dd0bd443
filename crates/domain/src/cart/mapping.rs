use entity_store::Cart;

use super::CartDto;

impl From<Cart> for CartDto {
    fn from(cart: Cart) -> Self {
        Self {
            cart_id: cart.cart_id,
            user_id: cart.user_id,
            user: None,
        }
    }
}

impl From<CartDto> for Cart {
    fn from(dto: CartDto) -> Self {
        Self {
            cart_id: dto.cart_id,
            user_id: dto.user_id,
        }
    }
}

/// Applies the fields present in `dto` to a loaded cart. The identity is kept.
pub(crate) fn overlay(mut cart: Cart, dto: CartDto) -> Cart {
    if let Some(user_id) = dto.user_id {
        cart.user_id = Some(user_id);
    }
    cart
}
