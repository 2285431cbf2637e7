//! SMS gateway tests
