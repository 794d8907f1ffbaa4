//! Service layer for orchestrating work on top of the Admin API client.

pub mod bulk_update;
