//! Wire shapes for requests and responses.
//!
//! Request types carry only client-supplied fields (no ids or timestamps).
//! Response views never carry password material. All JSON is camelCase.

pub mod comment;
pub mod pin;
pub mod user;
