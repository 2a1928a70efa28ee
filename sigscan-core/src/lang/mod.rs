//! Built-in language profiles.
//!
//! # Components
//!
//! - `java`: constructors, interface default/static methods, methods
//! - `javascript`: nine declaration/expression/method shapes
//! - `rust`: fn, async fn, const fn, extern fn, impl and trait methods

pub mod java;
pub mod javascript;
pub mod rust;

pub use java::JavaProfile;
pub use javascript::JavaScriptProfile;
pub use rust::RustProfile;
