pub mod client_factory;
