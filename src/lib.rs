// Authentication gateway: token signing, refresh-token lifecycle, identity reconciliation
pub mod domains;
pub mod routes;
pub mod shared;
