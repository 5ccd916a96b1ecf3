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

//! A process wide [`TypeRegistry`], seeded with [`TypeRegistry::basic()`], which types
//! can be registered into at any time and from any thread.
//!
//! Readers take a snapshot of the registry via [`global_types()`]; registering new types
//! never changes a snapshot that has already been handed out.
//!
//! # Example
//!
//! ```rust
//! use scale_object::{create_scale_object, register_types, ScaleValue, TypeDef, TypeExpr};
//!
//! register_types([(
//!     "ExamplePerson",
//!     TypeDef::struct_of([("name", TypeExpr::named("String")), ("age", TypeExpr::named("u8"))]),
//! )])
//! .unwrap();
//!
//! let mut obj = create_scale_object("ExamplePerson", &[0x08, 0x4a, 0x6f, 0x20][..]).unwrap();
//! let value = obj.decode().unwrap();
//! assert_eq!(value.field("age"), Some(&ScaleValue::Int(32, 8)));
//! ```

use crate::error::Error;
use crate::scale_object::ScaleObject;
use crate::type_def::TypeDef;
use crate::type_registry::TypeRegistry;
use std::borrow::Cow;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

static GLOBAL_TYPES: OnceLock<RwLock<Arc<TypeRegistry>>> = OnceLock::new();

fn global() -> &'static RwLock<Arc<TypeRegistry>> {
    GLOBAL_TYPES.get_or_init(|| RwLock::new(Arc::new(TypeRegistry::basic())))
}

/// Register a batch of types into the global registry. Either every type in the batch
/// is registered, or (if any of them are invalid) none are. Registering a name which
/// already exists replaces the existing definition.
pub fn register_types<N: Into<String>>(
    batch: impl IntoIterator<Item = (N, TypeDef)>,
) -> Result<(), Error> {
    let batch: Vec<(String, TypeDef)> =
        batch.into_iter().map(|(name, def)| (name.into(), def)).collect();
    let count = batch.len();

    // A panic elsewhere can't leave the registry half updated, so poisoning is ignored.
    let mut guard = global().write().unwrap_or_else(PoisonError::into_inner);

    // Outstanding snapshots keep the old registry; we only copy it if there are any.
    let types = Arc::make_mut(&mut *guard);
    if let Err(e) = types.register(batch) {
        tracing::debug!(count, error = %e, "rejected batch of global types");
        return Err(e);
    }

    tracing::debug!(count, total = types.len(), "registered global types");
    Ok(())
}

/// A snapshot of the global registry. Types registered after this is called won't
/// be visible through it.
pub fn global_types() -> Arc<TypeRegistry> {
    global().read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Create a [`ScaleObject`] which resolves named types using the global registry.
/// Fails if the type name can't be parsed.
pub fn create_scale_object<'b>(
    type_name: &str,
    bytes: impl Into<Cow<'b, [u8]>>,
) -> Result<ScaleObject<'b, Arc<TypeRegistry>>, Error> {
    ScaleObject::new(type_name, bytes, global_types())
}
