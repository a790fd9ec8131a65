//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!     ┌──────────────┐      ┌─────────────────┐      ┌──────────────┐
//!     │ HTTP adapter │ ───▶ │   Application   │ ───▶ │ Store adapter│
//!     │   (axum)     │      │ Domain + Port   │      │ sqlite/memory│
//!     └──────────────┘      └─────────────────┘      └──────────────┘
//! ```

pub mod outbound;
