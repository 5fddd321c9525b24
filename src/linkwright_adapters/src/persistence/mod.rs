pub mod hashmap_auth_store;

pub use hashmap_auth_store::HashMapAuthStore;
