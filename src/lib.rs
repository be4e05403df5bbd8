pub mod clubs;
pub mod clubs_fetch;
pub mod compliance;
pub mod contracts;
pub mod csv;
pub mod export;
pub mod feed;
pub mod http_cache;
pub mod http_client;
pub mod persist;
pub mod roster_fetch;
pub mod state;
pub mod transfers_fetch;
pub mod updates_fetch;
