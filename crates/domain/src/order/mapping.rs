use entity_store::{Cart, Order};

use super::OrderDto;
use crate::cart::CartDto;

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_id,
            order_date: order.order_date,
            order_desc: order.order_desc,
            order_fee: order.order_fee,
            cart: order.cart.map(CartDto::from),
        }
    }
}

impl From<OrderDto> for Order {
    fn from(dto: OrderDto) -> Self {
        Self {
            order_id: dto.order_id,
            order_date: dto.order_date,
            order_desc: dto.order_desc,
            order_fee: dto.order_fee,
            cart: dto.cart.map(|cart| Cart::reference(cart.cart_id)),
        }
    }
}

/// Applies the fields present in `dto` to a loaded order. The identity is kept.
pub(crate) fn overlay(mut order: Order, dto: OrderDto) -> Order {
    if dto.order_date.is_some() {
        order.order_date = dto.order_date;
    }
    if dto.order_desc.is_some() {
        order.order_desc = dto.order_desc;
    }
    if dto.order_fee.is_some() {
        order.order_fee = dto.order_fee;
    }
    if let Some(cart) = dto.cart {
        order.cart = Some(Cart::reference(cart.cart_id));
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{CartId, OrderId, UserId};
    use rust_decimal::Decimal;
    use user_directory::User;

    fn stored() -> Order {
        Order {
            order_id: Some(OrderId::new(1)),
            order_date: None,
            order_desc: Some("Test Order".to_string()),
            order_fee: Some(Decimal::new(10000, 2)),
            cart: Some(Cart {
                cart_id: Some(CartId::new(1)),
                user_id: Some(UserId::new(1)),
            }),
        }
    }

    #[test]
    fn entity_to_dto_embeds_cart() {
        let dto = OrderDto::from(stored());
        let cart = dto.cart.unwrap();
        assert_eq!(cart.cart_id, Some(CartId::new(1)));
        assert_eq!(cart.user_id, Some(UserId::new(1)));
        assert!(cart.user.is_none());
    }

    #[test]
    fn dto_to_entity_reduces_cart_to_reference() {
        let dto = OrderDto {
            order_desc: Some("New".to_string()),
            cart: Some(CartDto {
                cart_id: Some(CartId::new(4)),
                user_id: Some(UserId::new(9)),
                user: Some(User::default()),
            }),
            ..OrderDto::default()
        };

        let order = Order::from(dto);

        assert_eq!(order.cart, Some(Cart::reference(Some(CartId::new(4)))));
    }

    #[test]
    fn absent_cart_maps_to_absent() {
        let order = Order::from(OrderDto::default());
        assert!(order.cart.is_none());
        assert!(OrderDto::from(order).cart.is_none());
    }

    #[test]
    fn overlay_replaces_present_fields_only() {
        let updated = overlay(
            stored(),
            OrderDto {
                order_id: Some(OrderId::new(5)),
                order_desc: Some("Updated".to_string()),
                ..OrderDto::default()
            },
        );

        assert_eq!(updated.order_id, Some(OrderId::new(1)));
        assert_eq!(updated.order_desc.as_deref(), Some("Updated"));
        assert_eq!(updated.order_fee, Some(Decimal::new(10000, 2)));
        assert_eq!(updated.cart, stored().cart);
    }

    #[test]
    fn dto_json_uses_wire_formats() {
        let order_date = chrono::NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_micro_opt(5, 6, 7, 8)
            .unwrap();
        let mut dto = OrderDto::from(stored());
        dto.order_date = Some(order_date);

        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["orderId"], 1);
        assert_eq!(json["orderDate"], "04-03-2026__05:06:07:000008");
        assert_eq!(json["orderFee"], 100.0);
        assert_eq!(json["cart"]["cartId"], 1);

        let back: OrderDto = serde_json::from_value(json).unwrap();
        assert_eq!(back, dto);
    }
}
