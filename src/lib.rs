//! # wirepack
//!
//! A MessagePack serialization library: a canonical binary codec for the
//! MessagePack wire format together with a compositional, type-safe codec
//! layer that maps domain records onto the MessagePack value tree.
//!
//! ## Architecture
//!
//! - **Wire layer** ([`pack`] / [`unpack`] / [`unpack_exact`]): canonical
//!   (shortest-form) encoding of a [`Value`], streaming-capable
//!   prefix-dispatched decoding, and the built-in [`Timestamp`] extension.
//! - **Codec layer** ([`codec`]): [`Codec<T>`](codec::Codec) values
//!   composed from primitives, containers, and record builders, with
//!   structured decode errors rendered by [`format_error`] as
//!   `at $.users[2].email: expected String, got Nil`.
//!
//! The [`Value`] tree is the pivot: both layers speak it. Everything is
//! pure and synchronous; codecs are freely shareable across threads.
//!
//! Integers are modeled as `i64`: every value in `[-2^63, 2^63 - 1]`
//! round-trips losslessly, and uint64 payloads above `i64::MAX` fail
//! decoding with [`DecodeError::IntegerOverflow`].
//!
//! ## Example
//!
//! ```
//! use wirepack::codec::{self, Codec};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct User {
//!     id: i64,
//!     name: String,
//!     email: Option<String>,
//! }
//!
//! let user: Codec<User> = codec::object3(
//!     |id, name, email| User { id, name, email },
//!     codec::field("id", codec::int(), |u: &User| u.id),
//!     codec::field("name", codec::string(), |u: &User| u.name.clone()),
//!     codec::field("email", codec::nullable(codec::string()), |u: &User| {
//!         u.email.clone()
//!     }),
//! );
//!
//! let bob = User {
//!     id: 1,
//!     name: "Bob".to_string(),
//!     email: None,
//! };
//!
//! let bytes = user.to_bytes(&bob).unwrap();
//! assert_eq!(user.from_bytes(&bytes).unwrap(), bob);
//! ```
//!
//! ## Tagged unions
//!
//! There is no built-in variant combinator; the wire convention is a map
//! with a `"type"` discriminator field, spelled with
//! [`codec::custom`] (and [`codec::lazy`] when the type is recursive):
//!
//! ```
//! use wirepack::codec::{self, Codec};
//! use wirepack::{DecodeError, Value};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Shape {
//!     Circle { radius: f64 },
//!     Point,
//! }
//!
//! let shape: Codec<Shape> = codec::custom(
//!     |shape: &Shape| match shape {
//!         Shape::Circle { radius } => Value::Map(vec![
//!             (Value::string("type"), Value::string("circle")),
//!             (Value::string("radius"), Value::Float(*radius)),
//!         ]),
//!         Shape::Point => Value::Map(vec![
//!             (Value::string("type"), Value::string("point")),
//!         ]),
//!     },
//!     |value| {
//!         let tag = value
//!             .get_field("type")
//!             .and_then(Value::as_str)
//!             .ok_or_else(|| DecodeError::MissingField("type".to_string()))?;
//!         match tag {
//!             "circle" => {
//!                 let radius = value
//!                     .get_field("radius")
//!                     .and_then(Value::as_f64)
//!                     .ok_or_else(|| DecodeError::MissingField("radius".to_string()))?;
//!                 Ok(Shape::Circle { radius })
//!             }
//!             "point" => Ok(Shape::Point),
//!             other => Err(DecodeError::Custom(format!("unknown shape: {other}"))),
//!         }
//!     },
//! );
//!
//! let circle = Shape::Circle { radius: 2.0 };
//! assert_eq!(shape.decode(&shape.encode(&circle)).unwrap(), circle);
//! ```

pub mod codec;
pub mod error;
pub mod timestamp;
pub mod value;
pub mod wire;

mod report;

pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use report::format_error;
pub use timestamp::Timestamp;
pub use value::{Value, ValueKind};
pub use wire::{pack, unpack, unpack_exact};
