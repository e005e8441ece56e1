// server/src/db.rs

//! Pool construction, embedded migrations and the optional catalog seed.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, Result};

pub async fn init_pool(database_url: &str) -> Result<PgPool> {
  PgPoolOptions::new()
    .max_connections(10)
    .connect(database_url)
    .await
    .map_err(AppError::Sqlx)
}

/// Applies the embedded migrations under `server/migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
  sqlx::migrate!("./migrations")
    .run(pool)
    .await
    .map_err(|e| AppError::Internal(format!("Migration failed: {}", e)))?;
  info!("Database migrations applied.");
  Ok(())
}

struct SeedProduct {
  name: &'static str,
  description: &'static str,
  image: &'static str,
  price_cents: i32,
  mrp_cents: i32,
  discount: &'static str,
  category: &'static str,
  inventory: i32,
  featured: bool,
  rating: f64,
  rating_count: i32,
  emissions_factor: f64,
  is_eco_friendly: bool,
  carbon_savings: f64,
  sustainability_score: i16,
  materials: &'static [&'static str],
  certifications: &'static [&'static str],
}

/// Seeds the catalog with a starter set of eco products. No-op when any
/// product already exists, so restarts never duplicate rows.
pub async fn seed_products(pool: &PgPool) -> Result<()> {
  let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
    .fetch_one(pool)
    .await?;
  if existing > 0 {
    info!(existing, "Catalog already populated, skipping seed.");
    return Ok(());
  }

  let seed = [
    SeedProduct {
      name: "Bamboo Toothbrush",
      description: "Biodegradable toothbrush with a bamboo handle and charcoal bristles.",
      image: "/images/bamboo-toothbrush.jpg",
      price_cents: 14900,
      mrp_cents: 19900,
      discount: "25%",
      category: "Personal Care",
      inventory: 240,
      featured: true,
      rating: 4.5,
      rating_count: 128,
      emissions_factor: -2.1,
      is_eco_friendly: true,
      carbon_savings: 2.1,
      sustainability_score: 92,
      materials: &["bamboo", "charcoal bristles"],
      certifications: &["FSC"],
    },
    SeedProduct {
      name: "Organic Cotton Tote Bag",
      description: "Reusable shopping tote stitched from certified organic cotton.",
      image: "/images/cotton-tote.jpg",
      price_cents: 29900,
      mrp_cents: 39900,
      discount: "25%",
      category: "Accessories",
      inventory: 180,
      featured: false,
      rating: 4.3,
      rating_count: 64,
      emissions_factor: -1.8,
      is_eco_friendly: true,
      carbon_savings: 1.8,
      sustainability_score: 88,
      materials: &["organic cotton"],
      certifications: &["GOTS"],
    },
    SeedProduct {
      name: "Solar Power Bank",
      description: "10,000 mAh power bank that tops itself up from sunlight.",
      image: "/images/solar-charger.jpg",
      price_cents: 189900,
      mrp_cents: 249900,
      discount: "24%",
      category: "Electronics",
      inventory: 75,
      featured: true,
      rating: 4.1,
      rating_count: 212,
      emissions_factor: -15.2,
      is_eco_friendly: true,
      carbon_savings: 15.2,
      sustainability_score: 85,
      materials: &["recycled ABS", "monocrystalline silicon"],
      certifications: &["CE", "RoHS"],
    },
    SeedProduct {
      name: "Reusable Water Bottle",
      description: "Insulated stainless steel bottle that replaces disposables for years.",
      image: "/images/water-bottle.jpg",
      price_cents: 79900,
      mrp_cents: 99900,
      discount: "20%",
      category: "Kitchen",
      inventory: 320,
      featured: true,
      rating: 4.7,
      rating_count: 431,
      emissions_factor: -8.5,
      is_eco_friendly: true,
      carbon_savings: 8.5,
      sustainability_score: 90,
      materials: &["stainless steel"],
      certifications: &[],
    },
    SeedProduct {
      name: "LED Bulb Four Pack",
      description: "Warm white LED bulbs cutting lighting energy by around 85%.",
      image: "/images/led-bulbs.jpg",
      price_cents: 59900,
      mrp_cents: 79900,
      discount: "25%",
      category: "Home",
      inventory: 400,
      featured: false,
      rating: 4.4,
      rating_count: 152,
      emissions_factor: -12.0,
      is_eco_friendly: true,
      carbon_savings: 12.0,
      sustainability_score: 87,
      materials: &["aluminium", "polycarbonate"],
      certifications: &["Energy Star"],
    },
    SeedProduct {
      name: "Hemp T-Shirt",
      description: "Soft everyday tee woven from low-water hemp fibre.",
      image: "/images/hemp-tshirt.jpg",
      price_cents: 119900,
      mrp_cents: 149900,
      discount: "20%",
      category: "Clothing",
      inventory: 140,
      featured: false,
      rating: 4.2,
      rating_count: 77,
      emissions_factor: -3.5,
      is_eco_friendly: true,
      carbon_savings: 3.5,
      sustainability_score: 84,
      materials: &["hemp", "organic cotton"],
      certifications: &["OEKO-TEX"],
    },
    SeedProduct {
      name: "Cork Yoga Mat",
      description: "Naturally antimicrobial mat with a sustainably harvested cork surface.",
      image: "/images/cork-yoga-mat.jpg",
      price_cents: 249900,
      mrp_cents: 299900,
      discount: "17%",
      category: "Fitness",
      inventory: 60,
      featured: false,
      rating: 4.6,
      rating_count: 93,
      emissions_factor: -4.2,
      is_eco_friendly: true,
      carbon_savings: 4.2,
      sustainability_score: 89,
      materials: &["cork", "natural rubber"],
      certifications: &["FSC"],
    },
    SeedProduct {
      name: "Recycled Paper Notebook",
      description: "A5 notebook made entirely from post-consumer recycled paper.",
      image: "/images/recycled-notebook.jpg",
      price_cents: 19900,
      mrp_cents: 24900,
      discount: "20%",
      category: "Stationery",
      inventory: 500,
      featured: false,
      rating: 4.0,
      rating_count: 45,
      emissions_factor: -1.2,
      is_eco_friendly: true,
      carbon_savings: 1.2,
      sustainability_score: 82,
      materials: &["recycled paper"],
      certifications: &["Blue Angel"],
    },
  ];

  for product in &seed {
    sqlx::query(
      "INSERT INTO products (id, name, description, image, price_cents, mrp_cents, discount, category, inventory, featured, rating, rating_count, emissions_factor, is_eco_friendly, carbon_savings, sustainability_score, materials, certifications) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)",
    )
    .bind(Uuid::new_v4())
    .bind(product.name)
    .bind(product.description)
    .bind(product.image)
    .bind(product.price_cents)
    .bind(product.mrp_cents)
    .bind(product.discount)
    .bind(product.category)
    .bind(product.inventory)
    .bind(product.featured)
    .bind(product.rating)
    .bind(product.rating_count)
    .bind(product.emissions_factor)
    .bind(product.is_eco_friendly)
    .bind(product.carbon_savings)
    .bind(product.sustainability_score)
    .bind(product.materials.iter().map(|m| m.to_string()).collect::<Vec<String>>())
    .bind(product.certifications.iter().map(|c| c.to_string()).collect::<Vec<String>>())
    .execute(pool)
    .await?;
  }

  info!(count = seed.len(), "Seeded catalog with starter products.");
  Ok(())
}
