//! Stock availability across soft cart reservations.
//!
//! A request is resolved to a single stock pool (a variant row, a legacy
//! `size_stock` slot or the flat product counter), the quantities held in
//! every cart for that pool are summed, and the difference is floored at
//! zero. Cart guards, the stock-check endpoint and the product page all go
//! through this path.

pub mod availability;
pub mod commit;
pub mod reservations;
pub mod resolver;
pub mod size_stock;

pub use availability::{Availability, availability_of, available_stock};
pub use reservations::reserved_quantity;
pub use resolver::{ResolvedStock, StockKey, StockRequest, resolve, resolve_within};
pub use size_stock::SizeStock;
