//! Authentication utilities library
//!
//! Provides the two leaf components of the identity core:
//! - Password hashing (Argon2id) with a distinct "no stored credential" signal
//! - Signed bearer token issuance and verification with a fixed expiry horizon
//!
//! The service crate defines its own store ports and verification strategies on
//! top of these primitives. This crate knows nothing about HTTP or persistence.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue("user123", Some("user@x.com")).unwrap();
//! let claims = codec.verify(&token).unwrap();
//! assert_eq!(claims.subject(), Some("user123"));
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::strip_bearer;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TOKEN_TTL_HOURS;
