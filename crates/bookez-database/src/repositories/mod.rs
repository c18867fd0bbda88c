//! Concrete repository implementations.
//!
//! Every repository holds a cloned `PgPool` and issues parameterized SQL.
//! Business rules live in `bookez-service`; repositories only read and
//! write rows, with the single exception of the lock-and-recheck booking
//! commit that must stay inside one transaction.

pub mod booking;
pub mod calendar;
pub mod member;
pub mod room;
pub mod schedule;
pub mod suspension;
