// Copyright (C) 2024 Parity Technologies (UK) Ltd. (admin@parity.io)
// This file is a part of the scale-object crate.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//         http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This crate SCALE encodes and decodes values at runtime, given a textual type name like
//! `Vec<u32>`, `(u32, Option<bool>)` or `Result<u8, String>`. Named types are resolved
//! against a [`TypeRegistry`] of struct, enum and alias definitions.
//!
//! - See [`TypeExpr::parse()`] for the type names that are understood.
//! - See [`TypeRegistry::register()`] to learn how to add types to a registry, or
//!   [`TypeDefinitions`] to load them from JSON.
//! - See [`ScaleObject`] to decode and encode bytes as some type, or [`Codec`] for the
//!   lower level interface that it uses.
//!
//! Decoded values are handed back as [`ScaleValue`]s, which is also what is given when
//! encoding.
//!
//! ```rust
//! use scale_object::{ScaleObject, ScaleValue, TypeDef, TypeExpr, TypeRegistry};
//!
//! let mut types = TypeRegistry::basic();
//! types.register([(
//!     "Status",
//!     TypeDef::enum_of([("Active", TypeExpr::unit()), ("Banned", TypeExpr::named("u32"))]),
//! )])
//! .unwrap();
//!
//! let mut obj = ScaleObject::new("Vec<Status>", &[0x08, 0x00, 0x01, 0x05, 0, 0, 0][..], &types).unwrap();
//! let value = obj.decode().unwrap();
//!
//! assert_eq!(value, ScaleValue::seq([
//!     ScaleValue::variant("Active", ScaleValue::unit()),
//!     ScaleValue::variant("Banned", 5u32.into()),
//! ]));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

extern crate alloc;

pub mod codec;
pub mod compact;
pub mod cursor;
pub mod error;
pub mod scale_object;
pub mod type_def;
pub mod type_definitions;
pub mod type_expr;
pub mod type_registry;
pub mod type_registry_set;
pub mod value;

#[cfg(feature = "std")]
pub mod global;

#[cfg(test)]
mod test_utils;

// Export the main types here for ease of use:
pub use {
    codec::Codec,
    cursor::{ByteBuffer, ByteCursor},
    error::{Error, ErrorKind},
    scale_object::ScaleObject,
    type_def::{Field, TypeDef, Variant},
    type_definitions::TypeDefinitions,
    type_expr::{ParseError, Primitive, TypeExpr},
    type_registry::{TypeLookup, TypeRegistry},
    type_registry_set::TypeRegistrySet,
    value::{Kind, ScaleValue},
};

#[cfg(feature = "std")]
pub use global::{create_scale_object, global_types, register_types};
