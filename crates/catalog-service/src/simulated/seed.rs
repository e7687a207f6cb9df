//! Built-in demo catalog the simulated provider starts from.

use catalog_types::prelude::*;
use chrono::{DateTime, Utc};

/// A snapshot of categories and products to (re)initialize a store from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SeedData {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

impl SeedData {
    /// Create seed data from explicit collections.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> Self {
        Self {
            categories,
            products,
        }
    }

    /// The demo catalog: five categories and ten products.
    pub fn demo() -> Self {
        let categories = CATEGORIES
            .iter()
            .map(|(id, name, description)| {
                Category::new(CategoryId::new(*id), *name).with_description(*description)
            })
            .collect();

        let products = PRODUCTS
            .iter()
            .map(|seed| {
                let stamp = timestamp(seed.created_at);
                Product {
                    id: ProductId::new(seed.id),
                    name: seed.name.to_string(),
                    description: seed.description.to_string(),
                    price: Price::from_units(seed.price),
                    category: CategoryId::new(seed.category),
                    image: Some(seed.image.to_string()),
                    stock: seed.stock,
                    created_at: stamp,
                    updated_at: stamp,
                }
            })
            .collect();

        Self {
            categories,
            products,
        }
    }

    /// One past the highest product identifier, or 1 when empty.
    pub fn next_product_id(&self) -> ProductId {
        self.products
            .iter()
            .map(|p| p.id)
            .max()
            .map_or(ProductId::new(1), |id| id.next())
    }

    /// One past the highest category identifier, or 1 when empty.
    pub fn next_category_id(&self) -> CategoryId {
        self.categories
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(CategoryId::new(1), |id| id.next())
    }
}

fn timestamp(text: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

const CATEGORIES: &[(i64, &str, &str)] = &[
    (1, "Electrónicos", "Dispositivos electrónicos y tecnología"),
    (2, "Ropa", "Vestimenta y accesorios"),
    (3, "Hogar", "Artículos para el hogar"),
    (4, "Deportes", "Equipos y accesorios deportivos"),
    (5, "Libros", "Libros y material educativo"),
];

struct ProductSeed {
    id: i64,
    name: &'static str,
    description: &'static str,
    price: u64,
    category: i64,
    image: &'static str,
    stock: u32,
    created_at: &'static str,
}

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        id: 1,
        name: "iPhone 15 Pro",
        description: "El iPhone más avanzado con chip A17 Pro, cámara de 48MP y pantalla Super Retina XDR de 6.1 pulgadas.",
        price: 4_500_000,
        category: 1,
        image: "https://via.placeholder.com/300x300/007AFF/FFFFFF?text=iPhone+15+Pro",
        stock: 15,
        created_at: "2024-01-15T10:30:00Z",
    },
    ProductSeed {
        id: 2,
        name: "MacBook Air M2",
        description: "Laptop ultradelgada con chip M2, pantalla Liquid Retina de 13.6 pulgadas y hasta 18 horas de batería.",
        price: 6_500_000,
        category: 1,
        image: "https://via.placeholder.com/300x300/34C759/FFFFFF?text=MacBook+Air",
        stock: 8,
        created_at: "2024-01-10T14:20:00Z",
    },
    ProductSeed {
        id: 3,
        name: "Camiseta Nike Dri-FIT",
        description: "Camiseta deportiva de secado rápido con tecnología Dri-FIT para máximo rendimiento.",
        price: 85_000,
        category: 2,
        image: "https://via.placeholder.com/300x300/FF3B30/FFFFFF?text=Nike+Dri-FIT",
        stock: 50,
        created_at: "2024-01-08T09:15:00Z",
    },
    ProductSeed {
        id: 4,
        name: "Sofá 3 Puestos Gris",
        description: "Sofá moderno de 3 puestos en tela gris, perfecto para salas contemporáneas.",
        price: 1_200_000,
        category: 3,
        image: "https://via.placeholder.com/300x300/8E8E93/FFFFFF?text=Sofa+3+Puestos",
        stock: 3,
        created_at: "2024-01-05T16:45:00Z",
    },
    ProductSeed {
        id: 5,
        name: "Pelota de Fútbol Adidas",
        description: "Pelota oficial de fútbol Adidas, ideal para partidos y entrenamientos.",
        price: 120_000,
        category: 4,
        image: "https://via.placeholder.com/300x300/FF9500/FFFFFF?text=Adidas+Ball",
        stock: 25,
        created_at: "2024-01-12T11:30:00Z",
    },
    ProductSeed {
        id: 6,
        name: "Clean Code - Robert Martin",
        description: "Libro fundamental sobre programación limpia y buenas prácticas de desarrollo.",
        price: 85_000,
        category: 5,
        image: "https://via.placeholder.com/300x300/5856D6/FFFFFF?text=Clean+Code",
        stock: 12,
        created_at: "2024-01-03T13:20:00Z",
    },
    ProductSeed {
        id: 7,
        name: "AirPods Pro 2da Gen",
        description: "Auriculares inalámbricos con cancelación activa de ruido y audio espacial.",
        price: 1_200_000,
        category: 1,
        image: "https://via.placeholder.com/300x300/007AFF/FFFFFF?text=AirPods+Pro",
        stock: 20,
        created_at: "2024-01-18T08:45:00Z",
    },
    ProductSeed {
        id: 8,
        name: "Zapatillas Nike Air Max",
        description: "Zapatillas deportivas con tecnología Air Max para máximo confort y estilo.",
        price: 450_000,
        category: 2,
        image: "https://via.placeholder.com/300x300/FF3B30/FFFFFF?text=Nike+Air+Max",
        stock: 30,
        created_at: "2024-01-14T15:10:00Z",
    },
    ProductSeed {
        id: 9,
        name: "Mesa de Centro Moderna",
        description: "Mesa de centro de madera maciza con diseño minimalista y acabado natural.",
        price: 350_000,
        category: 3,
        image: "https://via.placeholder.com/300x300/8E8E93/FFFFFF?text=Mesa+Centro",
        stock: 5,
        created_at: "2024-01-07T12:00:00Z",
    },
    ProductSeed {
        id: 10,
        name: "React: The Complete Guide",
        description: "Guía completa de React con ejemplos prácticos y mejores prácticas.",
        price: 95_000,
        category: 5,
        image: "https://via.placeholder.com/300x300/5856D6/FFFFFF?text=React+Guide",
        stock: 18,
        created_at: "2024-01-20T10:15:00Z",
    },
];
