//! End-to-end cart and checkout scenarios against an in-memory order service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storefront_commerce::prelude::*;

/// Serves a fixed catalog and records every order it receives.
#[derive(Default)]
struct InMemoryCatalog {
    products: Vec<Product>,
    orders: Mutex<Vec<OrderSubmission>>,
}

impl InMemoryCatalog {
    fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }
}

#[async_trait]
impl CatalogClient for InMemoryCatalog {
    async fn fetch_config(&self) -> Result<StorefrontConfig, CatalogError> {
        Ok(StorefrontConfig::default())
    }

    async fn fetch_all_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }

    async fn fetch_products_by_category(
        &self,
        category_id: &CategoryId,
    ) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .products
            .iter()
            .filter(|p| &p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn fetch_products_by_style(
        &self,
        style: RegionStyle,
    ) -> Result<Vec<Product>, CatalogError> {
        Ok(filter_by_style(self.products.clone(), StyleFilter::Only(style)))
    }

    async fn fetch_product(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.iter().find(|p| &p.id == product_id).cloned())
    }

    async fn submit_order(&self, order: &OrderSubmission) -> Result<OrderId, CatalogError> {
        let mut orders = self.orders.lock().unwrap();
        orders.push(order.clone());
        Ok(OrderId::new(format!("order-{}", orders.len())))
    }
}

fn catalog_product(id: &str, price: i64, sizes: &[&str]) -> Product {
    Product {
        id: ProductId::new(id),
        category_id: CategoryId::new("men"),
        name: format!("Product {id}"),
        description: String::new(),
        price,
        currency: CurrencyCode::new("EUR"),
        stock_count: 25,
        in_stock: true,
        sizes: sizes.iter().map(|s| s.to_string()).collect(),
        colors: Vec::new(),
        image_url: format!("/images/{id}.jpg"),
        style_tags: vec![RegionStyle::European],
    }
}

#[test]
fn test_merge_remove_and_aggregate_scenario() {
    let cart = CartStore::new();
    let p1_m = || CartLineInput::new("p1", "Linen Shirt", 1999, "EUR").with_size("M");

    cart.add_item(p1_m().with_quantity(1));
    cart.add_item(p1_m().with_quantity(1));
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.lines()[0].quantity, 2);
    assert_eq!(cart.total_amount_minor_units(), 3998);

    cart.update_quantity(&LineIdentity::new("p1").with_size("M"), 0);
    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
    assert_eq!(cart.total_amount_minor_units(), 0);

    cart.add_item(
        CartLineInput::new("p1", "Linen Shirt", 1999, "EUR")
            .with_size("L")
            .with_quantity(1),
    );
    cart.add_item(CartLineInput::new("p2", "Canvas Tote", 500, "EUR").with_quantity(3));
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.total_amount_minor_units(), 1999 + 1500);
    assert_eq!(
        format_price(cart.total_amount_minor_units(), &CurrencyCode::new("EUR")),
        "€34.99"
    );
}

#[tokio::test]
async fn test_missing_email_scenario() {
    let catalog = Arc::new(InMemoryCatalog::default());
    let session = ShopSession::new(catalog.clone());
    session
        .cart()
        .add_item(CartLineInput::new("p1", "Linen Shirt", 1999, "EUR").with_size("M"));
    let before = session.cart().snapshot();

    let checkout = session.begin_checkout();
    checkout.update_form_field(BuyerField::Name, "Ada Lovelace").unwrap();
    checkout
        .update_form_field(BuyerField::ShippingAddress, "12 Analytical Row")
        .unwrap();

    let err = checkout.proceed_to_checkout().await.unwrap_err();
    assert_eq!(err, CheckoutError::MissingFields(vec![BuyerField::Email]));
    assert_eq!(err.to_string(), "Please fill in all fields (missing: email)");
    assert_eq!(checkout.state(), CheckoutState::Editing);
    assert_eq!(catalog.order_count(), 0);
    assert_eq!(session.cart().snapshot(), before);
}

#[tokio::test]
async fn test_browse_select_and_place_order() {
    let catalog = Arc::new(InMemoryCatalog {
        products: vec![
            catalog_product("shirt", 4500, &["S", "M", "L"]),
            catalog_product("tote", 1200, &[]),
        ],
        ..Default::default()
    });
    let session = ShopSession::new(catalog.clone());

    let listing = session
        .browse(&CategoryId::new("men"), StyleFilter::All)
        .await
        .unwrap();
    assert_eq!(listing.len(), 2);

    let shirt = catalog
        .fetch_product(&ProductId::new("shirt"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        session.add_selection(&shirt, &ProductSelection::new(1)),
        Err(CommerceError::SelectionRequired("size"))
    );
    session
        .add_selection(&shirt, &ProductSelection::new(2).with_size("L"))
        .unwrap();
    session.quick_add(&listing[1]).unwrap();
    assert_eq!(session.cart().item_count(), 3);

    let checkout = session.begin_checkout();
    checkout.update_form_field(BuyerField::Name, "Ada Lovelace").unwrap();
    checkout.update_form_field(BuyerField::Email, "ada@example.com").unwrap();
    checkout
        .update_form_field(BuyerField::ShippingAddress, "12 Analytical Row")
        .unwrap();

    let confirmation = checkout.proceed_to_checkout().await.unwrap();
    assert_eq!(confirmation.order_id.as_str(), "order-1");
    assert_eq!(confirmation.total.display(), "€102.00");
    assert!(session.cart().is_empty());

    let orders = catalog.orders.lock().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].line_items.len(), 2);
    assert_eq!(orders[0].line_items[0].size.as_deref(), Some("L"));

    // A new order needs a fresh checkout.
    assert_eq!(
        checkout.proceed_to_checkout().await,
        Err(CheckoutError::AlreadyConfirmed)
    );
    assert_eq!(session.begin_checkout().state(), CheckoutState::Editing);
}
