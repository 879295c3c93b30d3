pub mod cover_store;
