//! REST adapter.
//!
//! Routes:
//!
//! | Method | Path                                         | Status |
//! |--------|----------------------------------------------|--------|
//! | GET    | `/health`                                    | 200    |
//! | POST   | `/products`                                  | 201    |
//! | GET    | `/products`                                  | 200    |
//! | GET    | `/products/{id}`                             | 200    |
//! | PUT    | `/products/{id}`                             | 200    |
//! | DELETE | `/products/{id}`                             | 204    |
//! | PUT    | `/products/{id}/category/{categoryId}`       | 200    |
//! | DELETE | `/products/{id}/category`                    | 200    |
//! | POST   | `/categories`                                | 201    |
//! | GET    | `/categories`                                | 200    |
//! | GET    | `/categories/{id}`                           | 200    |
//! | PUT    | `/categories/{id}`                           | 200    |
//! | DELETE | `/categories/{id}`                           | 204    |
//! | GET    | `/categories/{id}/products`                  | 200    |

pub mod category;
pub mod dto;
pub mod error;
pub mod logging;
pub mod params;
pub mod product;
pub mod router;
