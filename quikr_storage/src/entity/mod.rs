pub mod client_kv;
