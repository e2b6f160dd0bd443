//! Integration tests for the domain services over the in-memory store.
//!
//! These cover persistence round trips, the NotFound asymmetry between
//! entities, and cart composition with the user directory.

use common::{CartId, CategoryId, OrderId, ProductId, UserId};
use domain::{
    CartDto, CartService, CategoryDto, CategoryService, DirectoryFailurePolicy, DomainError,
    EntityKind, OrderDto, OrderService, ProductDto, ProductService,
};
use entity_store::InMemoryStore;
use rust_decimal::Decimal;
use user_directory::{InMemoryUserDirectory, User};

fn user(id: i32, first_name: &str) -> User {
    User {
        user_id: Some(UserId::new(id)),
        first_name: Some(first_name.to_string()),
        last_name: Some("Doe".to_string()),
        email: Some(format!("{}@example.com", first_name.to_lowercase())),
        phone: None,
    }
}

fn cart_for(user_id: i32) -> CartDto {
    CartDto {
        user_id: Some(UserId::new(user_id)),
        ..CartDto::default()
    }
}

mod cart_composition {
    use super::*;

    #[tokio::test]
    async fn find_by_id_embeds_directory_user() {
        let directory = InMemoryUserDirectory::new().with_user(user(1, "John"));
        let service = CartService::new(InMemoryStore::new(), directory);
        service.save(cart_for(1)).await.unwrap();

        let cart = service.find_by_id(CartId::new(1)).await.unwrap();

        assert_eq!(cart.user_id, Some(UserId::new(1)));
        assert_eq!(
            cart.user.and_then(|u| u.first_name).as_deref(),
            Some("John")
        );
    }

    #[tokio::test]
    async fn find_all_makes_one_directory_call_per_cart_in_order() {
        let directory = InMemoryUserDirectory::new()
            .with_user(user(1, "John"))
            .with_user(user(2, "Jane"));
        let service = CartService::new(InMemoryStore::new(), directory.clone());
        service.save(cart_for(1)).await.unwrap();
        service.save(cart_for(2)).await.unwrap();

        let carts = service.find_all().await.unwrap();

        let names: Vec<_> = carts
            .iter()
            .map(|c| {
                (
                    c.cart_id,
                    c.user.as_ref().and_then(|u| u.first_name.clone()),
                )
            })
            .collect();
        assert_eq!(
            names,
            vec![
                (Some(CartId::new(1)), Some("John".to_string())),
                (Some(CartId::new(2)), Some("Jane".to_string())),
            ]
        );
        assert_eq!(directory.call_count(), 2);
        assert_eq!(directory.calls(), vec![UserId::new(1), UserId::new(2)]);
    }

    #[tokio::test]
    async fn directory_failure_is_attributed_to_the_failing_user() {
        let directory = InMemoryUserDirectory::new().with_user(user(1, "John"));
        let service = CartService::new(InMemoryStore::new(), directory.clone());
        service.save(cart_for(1)).await.unwrap();
        directory.set_unavailable(true);

        let err = service.find_all().await.unwrap_err();

        match err {
            DomainError::DirectoryUnavailable { user_id, .. } => {
                assert_eq!(user_id, UserId::new(1));
            }
            other => panic!("expected DirectoryUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn owner_missing_from_directory_follows_failure_policy() {
        let store = InMemoryStore::new();
        let failing = CartService::new(store.clone(), InMemoryUserDirectory::new());
        let omitting = CartService::new(store, InMemoryUserDirectory::new())
            .with_failure_policy(DirectoryFailurePolicy::OmitUser);
        let cart_id = failing.save(cart_for(77)).await.unwrap().cart_id.unwrap();

        match failing.find_by_id(cart_id).await.unwrap_err() {
            DomainError::UserNotFound { user_id } => assert_eq!(user_id, UserId::new(77)),
            other => panic!("expected UserNotFound, got {other:?}"),
        }
        assert!(failing.find_all().await.is_err());

        let found = omitting.find_by_id(cart_id).await.unwrap();
        assert_eq!(found.user_id, Some(UserId::new(77)));
        assert!(found.user.is_none());
    }

    #[tokio::test]
    async fn update_replaces_without_existence_check() {
        let directory = InMemoryUserDirectory::new().with_user(user(3, "Jim"));
        let service = CartService::new(InMemoryStore::new(), directory);
        let saved = service.save(cart_for(1)).await.unwrap();

        let updated = service
            .update(CartDto {
                cart_id: saved.cart_id,
                user_id: Some(UserId::new(3)),
                user: None,
            })
            .await
            .unwrap();

        assert_eq!(updated.cart_id, saved.cart_id);
        let found = service.find_by_id(CartId::new(1)).await.unwrap();
        assert_eq!(found.user_id, Some(UserId::new(3)));
    }
}

mod not_found_policies {
    use super::*;

    #[tokio::test]
    async fn every_entity_reports_not_found_on_find() {
        let store = InMemoryStore::new();
        let carts = CartService::new(store.clone(), InMemoryUserDirectory::new());
        let orders = OrderService::new(store.clone());
        let categories = CategoryService::new(store.clone());
        let products = ProductService::new(store);

        let errors = [
            carts.find_by_id(CartId::new(1)).await.unwrap_err(),
            orders.find_by_id(OrderId::new(1)).await.unwrap_err(),
            categories.find_by_id(CategoryId::new(1)).await.unwrap_err(),
            products.find_by_id(ProductId::new(1)).await.unwrap_err(),
        ];

        let entities: Vec<_> = errors
            .iter()
            .map(|e| match e {
                DomainError::NotFound { entity, id: 1 } => *entity,
                other => panic!("expected NotFound, got {other:?}"),
            })
            .collect();
        assert_eq!(
            entities,
            vec![
                EntityKind::Cart,
                EntityKind::Order,
                EntityKind::Category,
                EntityKind::Product
            ]
        );
    }

    #[tokio::test]
    async fn unconditional_deletes_succeed_for_missing_ids() {
        let store = InMemoryStore::new();
        let carts = CartService::new(store.clone(), InMemoryUserDirectory::new());
        let categories = CategoryService::new(store);

        assert!(carts.delete_by_id(CartId::new(10)).await.is_ok());
        assert!(categories.delete_by_id(CategoryId::new(10)).await.is_ok());
    }

    #[tokio::test]
    async fn load_then_act_deletes_fail_for_missing_ids() {
        let store = InMemoryStore::new();
        let orders = OrderService::new(store.clone());
        let products = ProductService::new(store);

        assert!(matches!(
            orders.delete_by_id(OrderId::new(10)).await,
            Err(DomainError::NotFound {
                entity: EntityKind::Order,
                ..
            })
        ));
        assert!(matches!(
            products.delete_by_id(ProductId::new(10)).await,
            Err(DomainError::NotFound {
                entity: EntityKind::Product,
                ..
            })
        ));
    }
}

mod round_trips {
    use super::*;

    #[tokio::test]
    async fn order_save_find_and_update() {
        let store = InMemoryStore::new();
        let carts = CartService::new(store.clone(), InMemoryUserDirectory::new());
        let orders = OrderService::new(store);
        let cart = carts.save(cart_for(1)).await.unwrap();

        let saved = orders
            .save(OrderDto {
                order_desc: Some("Test Order".to_string()),
                order_fee: Some(Decimal::new(10000, 2)),
                cart: Some(CartDto {
                    cart_id: cart.cart_id,
                    ..CartDto::default()
                }),
                ..OrderDto::default()
            })
            .await
            .unwrap();
        let order_id = saved.order_id.unwrap();
        assert_eq!(orders.find_by_id(order_id).await.unwrap(), saved);

        let mut changed = saved.clone();
        changed.order_desc = Some("Updated".to_string());
        orders.update(changed).await.unwrap();

        let found = orders.find_by_id(order_id).await.unwrap();
        assert_eq!(found.order_id, Some(order_id));
        assert_eq!(found.order_desc.as_deref(), Some("Updated"));
        assert_eq!(found.order_fee, Some(Decimal::new(10000, 2)));
    }

    #[tokio::test]
    async fn deleting_cart_removes_its_orders() {
        let store = InMemoryStore::new();
        let carts = CartService::new(store.clone(), InMemoryUserDirectory::new());
        let orders = OrderService::new(store);
        let cart = carts.save(cart_for(1)).await.unwrap();
        orders
            .save(OrderDto {
                cart: Some(cart.clone()),
                ..OrderDto::default()
            })
            .await
            .unwrap();

        carts.delete_by_id(cart.cart_id.unwrap()).await.unwrap();

        assert!(orders.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn product_update_by_id_keeps_category() {
        let store = InMemoryStore::new();
        let categories = CategoryService::new(store.clone());
        let products = ProductService::new(store);
        let category = categories
            .save(CategoryDto {
                category_title: Some("Books".to_string()),
                ..CategoryDto::default()
            })
            .await
            .unwrap();
        let saved = products
            .save(ProductDto {
                product_title: Some("Novel".to_string()),
                quantity: Some(3),
                category: Some(category.clone()),
                ..ProductDto::default()
            })
            .await
            .unwrap();

        let updated = products
            .update_by_id(
                saved.product_id.unwrap(),
                ProductDto {
                    quantity: Some(4),
                    ..ProductDto::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.quantity, Some(4));
        assert_eq!(updated.product_title.as_deref(), Some("Novel"));
        assert_eq!(updated.category, Some(category));
    }
}
