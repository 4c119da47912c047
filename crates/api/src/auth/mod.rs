//! Token handling. Issuing tokens (login, refresh) belongs to the identity
//! service; this server only validates them.

pub mod jwt;
