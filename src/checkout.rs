//! Cart totals and order payloads

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::models::Me;

/// Currency used when none is configured
pub const DEFAULT_CURRENCY: &str = "JOD";

/// Errors raised before an order is sent
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("Please enter your {field}")]
    MissingField { field: &'static str },
    #[error("Quantity for {product} must be at least 1")]
    InvalidQuantity { product: String },
    #[error("Price for {product} must not be negative")]
    InvalidPrice { product: String },
}

/// Format an amount with two decimals followed by the currency code
pub fn format_price(amount: f64, currency: &str) -> String {
    format!("{:.2} {}", amount, currency)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    /// Product configuration chosen during setup (card design, NFC options)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup: Option<serde_json::Value>,
}

impl CartItem {
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, price: f64, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
            quantity,
            setup: None,
        }
    }

    pub fn with_setup(mut self, setup: serde_json::Value) -> Self {
        self.setup = Some(setup);
        self
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Shopping cart held by the client until checkout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Add an item; an existing line for the same product without setup
    /// metadata has its quantity increased instead
    pub fn add(&mut self, item: CartItem) {
        if item.setup.is_none() {
            if let Some(existing) = self
                .items
                .iter_mut()
                .find(|i| i.product_id == item.product_id && i.setup.is_none())
            {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                return;
            }
        }
        self.items.push(item);
    }

    /// Set the quantity of a line; zero removes it
    pub fn set_quantity(&mut self, index: usize, quantity: u32) {
        if quantity == 0 {
            self.remove(index);
        } else if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
        }
    }

    pub fn remove(&mut self, index: usize) -> Option<CartItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, i| count.saturating_add(i.quantity))
    }

    /// Sum of price × quantity over all lines
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn formatted_total(&self, currency: &str) -> String {
        format_price(self.total(), currency)
    }

    pub fn validate(&self) -> Result<(), CheckoutError> {
        if self.items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        for item in &self.items {
            if item.quantity == 0 {
                return Err(CheckoutError::InvalidQuantity {
                    product: item.name.clone(),
                });
            }
            if item.price < 0.0 || !item.price.is_finite() {
                return Err(CheckoutError::InvalidPrice {
                    product: item.name.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerInfo {
    /// Pre-fill from the signed-in user
    pub fn from_me(me: &Me) -> Self {
        let full_name = [me.first_name.as_deref(), me.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            full_name,
            email: me.email.clone().unwrap_or_default(),
            phone: me.phone.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
    Card,
}

/// Body of `POST /api/orders/create`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<CartItem>,
    pub customer_info: CustomerInfo,
    pub shipping_info: ShippingInfo,
    pub payment_method: PaymentMethod,
    pub total: f64,
}

impl OrderRequest {
    /// Build an order from the cart, rejecting incomplete checkouts
    pub fn from_cart(
        cart: &Cart,
        customer: CustomerInfo,
        shipping: ShippingInfo,
        payment_method: PaymentMethod,
    ) -> Result<Self, CheckoutError> {
        cart.validate()?;
        if customer.full_name.trim().is_empty() {
            return Err(CheckoutError::MissingField { field: "full name" });
        }
        if customer.phone.trim().is_empty() {
            return Err(CheckoutError::MissingField { field: "phone number" });
        }
        if shipping.address.trim().is_empty() {
            return Err(CheckoutError::MissingField { field: "shipping address" });
        }
        if shipping.city.trim().is_empty() {
            return Err(CheckoutError::MissingField { field: "city" });
        }
        Ok(Self {
            items: cart.items.clone(),
            customer_info: customer,
            shipping_info: shipping,
            payment_method,
            total: cart.total(),
        })
    }
}
