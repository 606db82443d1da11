//! Seed a running server with demo catalog data.

use thiserror::Error;

use market_client::{ApiClient, ClientError};
use market_core::{CategoryDraft, Price, PriceError, ProductDraft};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("invalid demo price: {0}")]
    Price(#[from] PriceError),
}

struct DemoProduct {
    name: &'static str,
    description: &'static str,
    stock: u32,
    price_cents: i64,
    image: Option<&'static str>,
}

const DEMO_CATALOG: &[(&str, &[DemoProduct])] = &[
    (
        "Electronics",
        &[
            DemoProduct {
                name: "Wireless Headphones",
                description: "Over-ear, 30h battery",
                stock: 12,
                price_cents: 89_99,
                image: Some("https://img.example.com/headphones.png"),
            },
            DemoProduct {
                name: "Mechanical Keyboard",
                description: "Tenkeyless, brown switches",
                stock: 5,
                price_cents: 74_50,
                image: None,
            },
            DemoProduct {
                name: "USB-C Hub",
                description: "7-in-1, HDMI and card reader",
                stock: 0,
                price_cents: 32_00,
                image: None,
            },
        ],
    ),
    (
        "Clothing",
        &[
            DemoProduct {
                name: "Hooded Sweatshirt",
                description: "Unisex, heavyweight cotton",
                stock: 20,
                price_cents: 45_00,
                image: None,
            },
            DemoProduct {
                name: "Wool Socks",
                description: "3-pack, merino blend",
                stock: 48,
                price_cents: 14_25,
                image: None,
            },
        ],
    ),
    (
        "Groceries",
        &[
            DemoProduct {
                name: "Espresso Beans",
                description: "1kg, medium roast",
                stock: 9,
                price_cents: 18_90,
                image: Some("https://img.example.com/espresso.png"),
            },
            DemoProduct {
                name: "Olive Oil",
                description: "Extra virgin, 750ml",
                stock: 0,
                price_cents: 12_40,
                image: None,
            },
        ],
    ),
];

/// Log in and create the demo categories and products.
///
/// # Errors
///
/// Returns [`SeedError::Client`] on the first failing API call; records
/// created before the failure are left in place.
pub async fn run(base_url: &str, username: &str, password: &str) -> Result<(), SeedError> {
    let api = ApiClient::new(base_url)?;
    api.login(username, password).await?;
    tracing::info!(base_url, "Logged in");

    let mut created = 0usize;
    for (category_name, products) in DEMO_CATALOG {
        let category = api
            .create_category(&CategoryDraft {
                name: (*category_name).to_owned(),
            })
            .await?;
        tracing::info!(category = %category.name, id = %category.id, "Created category");

        for demo in *products {
            let product = api
                .create_product(&ProductDraft {
                    name: demo.name.to_owned(),
                    description: demo.description.to_owned(),
                    category: category.id,
                    stock: demo.stock,
                    price: Price::from_cents(demo.price_cents)?,
                    image: demo.image.map(str::to_owned),
                })
                .await?;
            tracing::info!(product = %product.name, id = %product.id, "Created product");
            created += 1;
        }
    }

    tracing::info!(categories = DEMO_CATALOG.len(), products = created, "Seeding complete");
    Ok(())
}
