//! # Repository Module
//!
//! Repository implementations over the SQLite store.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Repositories                               │
//! │                                                                 │
//! │  ProductRepository  - the entity store: product CRUD + listing  │
//! │  SaleRepository     - the stock ledger: the only path through   │
//! │                       which sales mutate product stock          │
//! │  ReportRepository   - the six aggregate report views            │
//! │                                                                 │
//! │  Each repository holds a cheap clone of the shared pool and     │
//! │  wraps every multi-step mutation in one transaction.            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod product;
pub mod report;
pub mod sale;
